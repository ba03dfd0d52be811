use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{aws::StsExchange, config::Config, mfa::TerminalPrompt, rotate::Rotator};

/// Rotates one profile against the real terminal and AWS STS
#[derive(Debug, Clone)]
pub struct RotateCommand {
    pub profile: String,
    pub credentials_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub region: Option<String>,
    pub duration: Option<i32>,
}

impl RotateCommand {
    pub async fn execute(self) -> Result<()> {
        let profile = self.profile.as_str();
        println!("Authenticating for {profile}");

        let config = Config::resolve(self.credentials_file, self.config_file)
            .context("Failed to locate AWS files")?;
        debug!("Credentials file: {}", config.credentials_file.display());
        debug!("Config file: {}", config.config_file.display());

        let region = config.resolve_region(self.region.as_deref(), profile);
        info!("Using region: {}", region);

        let exchange = StsExchange::new(region, self.duration);
        let rotation = Rotator::new(&config, &TerminalPrompt, &exchange)
            .rotate(profile)
            .await
            .with_context(|| format!("Failed to rotate credentials for profile '{profile}'"))?;

        println!(
            "Credentials updated for {}, valid until {}",
            rotation.profile,
            rotation.expiration_local()
        );

        Ok(())
    }
}
