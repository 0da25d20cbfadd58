use std::path::Path;

use anyhow::{anyhow, Error};
use tracing::info;

use crate::args::ConfigSubCommand;
use crate::repos::config::{get_config_path, load_config_from, save_config_to};

/// Apply `--set`, answer `--get`, or render the whole file. Returns the text
/// to print.
pub fn execute(path: &Path, cmd: &ConfigSubCommand) -> Result<String, Error> {
    let mut config = load_config_from(path)?;

    if let Some(pair) = &cmd.set {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{}'", pair))?;
        let key = key.trim();
        config.set(key, value.trim())?;
        save_config_to(path, &config)?;
        info!("Saved {} to {}", key, path.display());
        return Ok(format!("{} updated", key));
    }

    if let Some(key) = &cmd.get {
        return Ok(match config.get(key.trim())? {
            Some(value) => value.to_string(),
            None => format!("{} is not set", key.trim()),
        });
    }

    Ok(toml::to_string_pretty(&config.redacted())?)
}

pub fn run(cmd: &ConfigSubCommand) -> Result<(), Error> {
    let output = execute(&get_config_path(), cmd)?;
    println!("{}", output.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pair: &str) -> ConfigSubCommand {
        ConfigSubCommand {
            set: Some(pair.to_string()),
            get: None,
        }
    }

    fn get(key: &str) -> ConfigSubCommand {
        ConfigSubCommand {
            set: None,
            get: Some(key.to_string()),
        }
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aoai.toml");

        execute(&path, &set("endpoint = https://example.openai.azure.com")).unwrap();
        let value = execute(&path, &get("endpoint")).unwrap();

        assert_eq!(value, "https://example.openai.azure.com");
    }

    #[test]
    fn test_get_unset_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aoai.toml");
        assert_eq!(execute(&path, &get("deployment")).unwrap(), "deployment is not set");
    }

    #[test]
    fn test_set_requires_pair() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aoai.toml");
        assert!(execute(&path, &set("endpoint")).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_listing_redacts_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aoai.toml");
        execute(&path, &set("key=very-secret")).unwrap();
        execute(&path, &set("deployment=gpt-4o-mini")).unwrap();

        let listing = execute(
            &path,
            &ConfigSubCommand {
                set: None,
                get: None,
            },
        )
        .unwrap();

        assert!(listing.contains("deployment = \"gpt-4o-mini\""));
        assert!(!listing.contains("very-secret"));
    }
}
