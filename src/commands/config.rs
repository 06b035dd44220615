//! Configuration commands.
//!
//! - `config show`: display the effective configuration
//! - `config get`: print one stored value
//! - `config set`: validate and store one value

use owo_colors::OwoColorize;
use serde_json::json;

use super::print_json;
use crate::config::Config;
use crate::error::Result;

fn display_value(value: Option<&str>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "not configured".dimmed().to_string(),
    }
}

/// Show current configuration
pub fn cmd_config_show(json: bool) -> Result<()> {
    let config = Config::load()?;
    let path = Config::config_path()?;
    let base_url = config.base_url();

    if json {
        return print_json(&json!({
            "base_url": base_url,
            "timeout_secs": config.timeout_secs,
            "user": {
                "name": config.user.name,
                "email": config.user.email,
            },
            "config_path": path.display().to_string(),
        }));
    }

    println!("{}: {}", "base_url".cyan(), base_url);
    println!("{}: {}", "timeout_secs".cyan(), config.timeout_secs);
    println!();
    println!("{}:", "user".cyan());
    println!("  name: {}", display_value(config.user.name.as_deref()));
    println!("  email: {}", display_value(config.user.email.as_deref()));
    println!();
    println!("{}", format!("Config file: {}", path.display()).dimmed());
    Ok(())
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, json: bool) -> Result<()> {
    let config = Config::load()?;
    let value = config.get(key)?;

    if json {
        return print_json(&json!({
            "key": key,
            "value": value,
            "configured": value.is_some(),
        }));
    }

    println!("{}", display_value(value.as_deref()));
    Ok(())
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, json: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    if json {
        return print_json(&json!({
            "action": "config_set",
            "key": key,
            "value": value,
            "success": true,
        }));
    }

    println!("Set {} to {}", key.cyan(), value);
    Ok(())
}
