use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::debug;

use crate::{
    constants::{
        AWS_CONFIG_DIR_NAME, AWS_CONFIG_FILE_NAME, AWS_CREDENTIALS_FILE_NAME, DEFAULT_AWS_REGION,
        DEFAULT_PROFILE, REGION_KEY, config_section,
    },
    error::{Result, RotateError},
};

/// File locations for one invocation, built once at startup and passed down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials_file: PathBuf,
    pub config_file: PathBuf,
}

impl Config {
    pub fn new(credentials_file: impl Into<PathBuf>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            credentials_file: credentials_file.into(),
            config_file: config_file.into(),
        }
    }

    /// Default `~/.aws` locations under `home`
    pub fn from_home(home: &Path) -> Self {
        let aws_dir = home.join(AWS_CONFIG_DIR_NAME);
        Self::new(
            aws_dir.join(AWS_CREDENTIALS_FILE_NAME),
            aws_dir.join(AWS_CONFIG_FILE_NAME),
        )
    }

    /// Explicit paths win; anything left unset falls back to the home directory.
    pub fn resolve(credentials_file: Option<PathBuf>, config_file: Option<PathBuf>) -> Result<Self> {
        if let (Some(credentials_file), Some(config_file)) = (&credentials_file, &config_file) {
            return Ok(Self::new(credentials_file.clone(), config_file.clone()));
        }

        let defaults = dirs::home_dir()
            .map(|home| Self::from_home(&home))
            .ok_or(RotateError::HomeDirectory)?;

        Ok(Self {
            credentials_file: credentials_file.unwrap_or(defaults.credentials_file),
            config_file: config_file.unwrap_or(defaults.config_file),
        })
    }

    /// Region for `profile` from the config file.
    ///
    /// Looks at the profile's own section, then `[default]`. A missing or
    /// unreadable config file yields `None`.
    pub fn region_for(&self, profile: &str) -> Option<String> {
        let ini = match Ini::load_from_file(&self.config_file) {
            Ok(ini) => ini,
            Err(e) => {
                debug!(
                    "Config file {} not used: {}",
                    self.config_file.display(),
                    e
                );
                return None;
            }
        };

        let candidates = [config_section(profile), DEFAULT_PROFILE.to_string()];
        let region = candidates
            .iter()
            .filter_map(|name| ini.section(Some(name.as_str())))
            .filter_map(|section| section.get(REGION_KEY))
            .map(str::trim)
            .find(|region| !region.is_empty())?;

        debug!("Using region {} from {}", region, self.config_file.display());
        Some(region.to_string())
    }

    /// Region to call STS in: `explicit`, then the config file, then the default.
    pub fn resolve_region(&self, explicit: Option<&str>, profile: &str) -> String {
        explicit
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .map(str::to_string)
            .or_else(|| self.region_for(profile))
            .unwrap_or_else(|| {
                debug!("No region configured, using default {}", DEFAULT_AWS_REGION);
                DEFAULT_AWS_REGION.to_string()
            })
    }
}
