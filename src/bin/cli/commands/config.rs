//! Configuration command handlers

use sfn_recover::{RecoverConfig, RecoverError, RecoverResult};

use crate::ConfigCommands;

pub fn handle_config_command(cmd: ConfigCommands, config: &RecoverConfig) -> RecoverResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("{}", config.to_toml_string()?);
        }
        ConfigCommands::Init { path, force } => {
            let path = match path {
                Some(p) => p,
                None => RecoverConfig::default_config_path()?,
            };

            if path.exists() && !force {
                return Err(RecoverError::invalid_input(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }

            RecoverConfig::default().save_to_file(&path)?;
            println!("✓ Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}
