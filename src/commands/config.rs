//! Config command handler.

use crate::config::{config_path, save_config, Config};
use crate::error::Result;

/// Display the effective configuration, or write it to the config file when
/// `init` is set.
pub fn config_command(config: &Config, init: bool) -> Result<()> {
    if init {
        let path = save_config(config)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    println!("# {}", config_path()?.display());
    println!("user = {}", config.user.as_deref().unwrap_or("(not set)"));
    println!("color = {}", config.color.as_str());
    Ok(())
}
