use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::LeadmapConfig;

/// Name of the configuration file discovered in the directory hierarchy.
pub const CONFIG_FILE_NAME: &str = ".leadmap.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<LeadmapConfig, String> {
    let mut config = toml::from_str::<LeadmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    // Invalid sections fall back to defaults rather than aborting startup
    if let Err(e) = config.weights.validate() {
        log::warn!("Invalid scoring weights: {}. Using defaults.", e);
        config.weights = Default::default();
    } else {
        config.weights.normalize(); // Ensure exact sum of 1.0
    }

    if let Err(e) = config.normalization.validate() {
        log::warn!("Invalid normalization ceilings: {}. Using defaults.", e);
        config.normalization = Default::default();
    }

    if let Err(e) = config.thresholds.validate() {
        log::warn!("Invalid temperature thresholds: {}. Using defaults.", e);
        config.thresholds = Default::default();
    }

    if let Err(e) = config.cache.validate() {
        log::warn!("Invalid cache TTLs: {}. Using defaults.", e);
        config.cache = Default::default();
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<LeadmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub(crate) fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

pub fn load_config() -> LeadmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return LeadmapConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            LeadmapConfig::default()
        })
}
