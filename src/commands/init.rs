use crate::config::CONFIG_FILE_NAME;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Leadmap Configuration

[weights]
property_value = 0.25
roof_age = 0.25
urgency = 0.25
engagement = 0.25

[normalization]
market_ceiling = 750000.0
max_roof_life_years = 20.0
engagement_ceiling = 10

[thresholds]
hot = 80
warm = 60
cool = 40

[cache]
realtime_ttl_secs = 30
standard_ttl_secs = 300
historical_ttl_secs = 3600
"#;

    std::fs::write(&config_path, default_config)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}
