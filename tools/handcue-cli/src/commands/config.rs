//! Show or save the effective configuration.

use handcue_common::config::AppConfig;

pub fn run(config: &AppConfig, write: bool) -> anyhow::Result<()> {
    config
        .engine
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid engine configuration: {e}"))?;

    println!("{}", serde_json::to_string_pretty(config)?);

    if write {
        let path = config
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;
        println!("\nConfig saved to: {}", path.display());
    }

    Ok(())
}
