use std::path::Path;

use anyhow::Result;

use snapdeck_core::AppConfig;

pub fn path(override_path: Option<&Path>) -> Result<()> {
    match override_path {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", AppConfig::config_path().display()),
    }
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn init() -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        return Ok(());
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
