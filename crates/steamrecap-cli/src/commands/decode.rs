use crate::output::{Output, OutputFormat};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use share_list_codec::{extract_token, try_decode};
use share_list_models::{ListKind, RecommendationList, RecommendedItem};
use std::path::Path;
use tracing::warn;

pub fn run_decode(input: &str, out: Option<&Path>, output: &Output) -> Result<()> {
    let token = extract_token(input);
    let list = match try_decode(&token) {
        Ok(list) => list,
        Err(e) => {
            warn!(error = %e, token_chars = token.len(), "Share token rejected");
            return Err(eyre!("This link is invalid or has expired"));
        }
    };

    if let Some(path) = out {
        let content = serde_json::to_string_pretty(&list)?;
        std::fs::write(path, content)
            .wrap_err_with(|| format!("Failed to write list to {}", path.display()))?;
        output.success(format!(
            "Saved \"{}\" ({} items) to {}",
            list.title,
            list.items.len(),
            path.display()
        ));
        return Ok(());
    }

    match output.format() {
        OutputFormat::Human => {
            if !output.is_quiet() {
                print_list(&list);
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&serde_json::to_value(&list)?);
        }
    }

    Ok(())
}

fn print_list(list: &RecommendationList) {
    let kind = match list.kind {
        ListKind::Game => "games",
        ListKind::Manga => "manga",
    };
    println!();
    println!("{}", list.title.bright_cyan().bold());
    println!("{}", format!("{} {} shared with you", list.items.len(), kind).dimmed());
    println!();

    if list.items.is_empty() {
        println!("(empty list)");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Name").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Breakdown").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Notes").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for (index, item) in list.items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.name),
            Cell::new(item.rating).fg(rating_color(item.rating)),
            Cell::new(breakdown(item, list.kind)),
            Cell::new(notes(item)),
        ]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);
}

fn rating_color(rating: u8) -> comfy_table::Color {
    match rating {
        90..=u8::MAX => comfy_table::Color::Green,
        70..=89 => comfy_table::Color::Yellow,
        _ => comfy_table::Color::Red,
    }
}

/// One line per dimension of the list's kind
fn breakdown(item: &RecommendedItem, kind: ListKind) -> String {
    kind.dimensions()
        .iter()
        .map(|d| {
            if item.is_skipped(*d) {
                format!("{}: skipped", d)
            } else {
                match item.ratings.get(*d) {
                    Some(value) => format!("{}: {}", d, value),
                    None => format!("{}: -", d),
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn notes(item: &RecommendedItem) -> String {
    let mut lines = Vec::new();
    if let Some(hours) = item.hours_played() {
        lines.push(format!("{} h played", hours));
    }
    if !item.tags.is_empty() {
        let tags: Vec<String> = item
            .tags
            .iter()
            .map(|(name, score)| format!("{} {:.1}", name, score))
            .collect();
        lines.push(tags.join(", "));
    }
    if let Some(reason) = &item.reason {
        lines.push(reason.clone());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use share_list_models::Dimension;

    #[test]
    fn test_breakdown_marks_skipped() {
        let item = RecommendedItem::steam(440, "Team Fortress 2", 90)
            .with_rating(Dimension::Gameplay, 95)
            .with_skipped(Dimension::Story);
        let text = breakdown(&item, ListKind::Game);
        assert_eq!(text, "gameplay: 95\nvisuals: -\nstory: skipped\nsubjective: -");
    }

    #[test]
    fn test_notes() {
        let item = RecommendedItem::new(1, "Vagabond", 96)
            .with_tag("Art", 9.5)
            .with_reason("Read it");
        assert_eq!(notes(&item), "Art 9.5\nRead it");

        let item = RecommendedItem::steam(620, "Portal 2", 97).with_playtime(600);
        assert_eq!(notes(&item), "10 h played");
    }
}
