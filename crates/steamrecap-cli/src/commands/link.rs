use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use share_list_codec::{decode, extract_token, share_link};
use share_list_config::Config;

pub fn run_link(token: &str, config: &Config, output: &Output) -> Result<()> {
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let token = extract_token(token);
    if decode(&token).is_none() {
        output.warn("Token does not decode to a list; the link will show as invalid");
    }

    let link = share_link(&config.share.base_url, &config.share.view_path, &token);
    output.result(&link, json!({ "token": token, "link": link.clone() }));
    Ok(())
}
