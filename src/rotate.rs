//! Credential rotation.
//!
//! A rotation runs strictly forward: resolve the profile, challenge for an MFA
//! code, exchange it for temporary credentials, then persist. Any failure ends
//! the rotation where it happened. The credentials file is only written after
//! a successful exchange, so it is either fully rotated or left exactly as it
//! was.

use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

use crate::{
    aws::{TemporaryCredentials, TokenExchange},
    config::Config,
    error::Result,
    mfa::{self, MfaPrompt},
    profile::{self, Resolution},
    store::CredentialStore,
};

/// Outcome of a successful rotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub profile: String,
    pub long_term_section: String,
    pub assumed_role: Option<String>,
    pub expiration: DateTime<Utc>,
}

impl Rotation {
    pub fn expiration_local(&self) -> DateTime<Local> {
        self.expiration.with_timezone(&Local)
    }
}

/// Drives one rotation against a credentials file
pub struct Rotator<'a, P: ?Sized, E: ?Sized> {
    config: &'a Config,
    prompt: &'a P,
    exchange: &'a E,
}

impl<'a, P, E> Rotator<'a, P, E>
where
    P: MfaPrompt + ?Sized,
    E: TokenExchange + ?Sized,
{
    pub fn new(config: &'a Config, prompt: &'a P, exchange: &'a E) -> Self {
        Self {
            config,
            prompt,
            exchange,
        }
    }

    /// Rotates temporary credentials for `profile`.
    pub async fn rotate(&self, profile: &str) -> Result<Rotation> {
        let started = Utc::now();
        let path = &self.config.credentials_file;

        let mut store = CredentialStore::load(path)?;
        let resolution = profile::resolve(&store, profile)?;
        info!("Sourcing creds from {}", resolution.long_term.section);
        if let Some(role) = &resolution.assume_role {
            info!("Assuming role {}", role);
        }
        info!("Using the MFA device {}", resolution.long_term.mfa_device);

        let code = mfa::challenge(self.prompt, &resolution.long_term.mfa_device)?;

        let creds = self.run_exchange(&resolution, &code).await?;
        if creds.expiration <= started {
            warn!(
                "Credentials for {} expire at {}, which is not after rotation start",
                profile, creds.expiration
            );
        }

        store.replace_section(profile, creds.entries());
        store.save(path)?;
        info!("Credentials saved to profile: {}", profile);

        Ok(Rotation {
            profile: resolution.profile,
            long_term_section: resolution.long_term.section,
            assumed_role: resolution.assume_role,
            expiration: creds.expiration,
        })
    }

    async fn run_exchange(&self, resolution: &Resolution, code: &str) -> Result<TemporaryCredentials> {
        match resolution.assume_role.as_deref() {
            None => {
                self.exchange
                    .get_session_token(&resolution.long_term, code)
                    .await
            }
            Some(role_arn) => {
                self.exchange
                    .assume_role(&resolution.long_term, code, role_arn, &resolution.profile)
                    .await
            }
        }
    }
}
