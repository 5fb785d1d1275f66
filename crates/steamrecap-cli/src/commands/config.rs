use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use share_list_config::{Config, PathManager};

pub fn run_config(cmd: ConfigCommands, config: &Config, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config, output),
        ConfigCommands::Init { force } => init_config(force, output),
    }
}

fn show_config(config: &Config, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                output.warn(format!(
                    "No configuration file at {}; showing defaults. Run 'steamrecap config init' to create one.",
                    config_file.display()
                ));
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
            table.add_row(vec![Cell::new("Share base URL"), Cell::new(&config.share.base_url)]);
            table.add_row(vec![Cell::new("Share view path"), Cell::new(&config.share.view_path)]);
            table.add_row(vec![Cell::new("Log level"), Cell::new(&config.logging.level)]);
            table.add_row(vec![
                Cell::new("Log file"),
                Cell::new(
                    config
                        .logging
                        .file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stderr".to_string()),
                ),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);

            match config.validate() {
                Ok(()) => println!("{}", "Configuration is valid".green()),
                Err(e) => println!("{} {}", "Configuration problem:".red(), e),
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "exists": config_file.exists(),
                "share": {
                    "base_url": config.share.base_url,
                    "view_path": config.share.view_path,
                },
                "logging": {
                    "level": config.logging.level,
                    "json": config.logging.json,
                    "file": config.logging.file.as_ref().map(|p| p.display().to_string()),
                },
                "valid": config.validate().is_ok(),
            }));
        }
    }

    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", path_manager.config_dir().display(), e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
