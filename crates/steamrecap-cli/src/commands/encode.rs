use crate::output::Output;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use serde_json::json;
use share_list_codec::{share_link, try_encode};
use share_list_config::Config;
use share_list_models::RecommendationList;
use std::io::Read;
use tracing::info;

/// Read list JSON from a file path, or stdin when `input` is `-`
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .wrap_err("Failed to read list from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(input).wrap_err_with(|| format!("Failed to read list from {}", input))
}

pub fn run_encode(input: &str, as_link: bool, config: &Config, output: &Output) -> Result<()> {
    let content = read_input(input)?;
    let list: RecommendationList = serde_json::from_str(&content)
        .wrap_err_with(|| format!("{} is not a valid recommendation list", input))?;

    if list.title.trim().is_empty() {
        return Err(eyre!("List title cannot be empty"));
    }

    if as_link {
        config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    }

    let token = try_encode(&list).wrap_err("Failed to serialize the list")?;
    info!(title = %list.title, items = list.items.len(), token_chars = token.len(), "Encoded list");

    let link = as_link.then(|| share_link(&config.share.base_url, &config.share.view_path, &token));
    let text = link.clone().unwrap_or_else(|| token.clone());

    output.result(
        text,
        json!({
            "title": list.title,
            "items": list.items.len(),
            "token": token,
            "link": link,
        }),
    );

    Ok(())
}
