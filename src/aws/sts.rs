use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sts::{
    Client as StsClient,
    config::{Config as StsConfig, Credentials as StaticCredentials},
    error::DisplayErrorContext,
    types::Credentials as StsCredentials,
};
use aws_smithy_types::{DateTime as SmithyDateTime, retry::RetryConfig};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{TemporaryCredentials, TokenExchange};
use crate::{
    error::{Result, RotateError},
    profile::LongTermCredential,
};

const GET_SESSION_TOKEN: &str = "GetSessionToken";
const ASSUME_ROLE: &str = "AssumeRole";

/// Provider name attached to the long-term keys handed to the SDK
const PROVIDER_NAME: &str = "awsmfa-long-term";

/// Token exchange backed by AWS STS
#[derive(Debug, Clone)]
pub struct StsExchange {
    region: Region,
    duration_seconds: Option<i32>,
}

impl StsExchange {
    pub fn new(region: impl Into<String>, duration_seconds: Option<i32>) -> Self {
        Self {
            region: Region::new(region.into()),
            duration_seconds,
        }
    }

    pub fn region(&self) -> &str {
        self.region.as_ref()
    }

    /// Client signed with the long-term keys. Retries are off: one round trip per call.
    fn client(&self, credential: &LongTermCredential) -> StsClient {
        let provider = StaticCredentials::new(
            &credential.access_key_id,
            &credential.secret_access_key,
            None,
            None,
            PROVIDER_NAME,
        );

        let config = StsConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(self.region.clone())
            .credentials_provider(provider)
            .retry_config(RetryConfig::disabled())
            .build();

        StsClient::from_conf(config)
    }
}

#[async_trait]
impl TokenExchange for StsExchange {
    async fn get_session_token(
        &self,
        credential: &LongTermCredential,
        code: &str,
    ) -> Result<TemporaryCredentials> {
        info!("Calling AWS STS GetSessionToken");
        debug!("MFA serial: {}", credential.mfa_device);
        debug!("Region: {}", self.region);

        let response = self
            .client(credential)
            .get_session_token()
            .serial_number(&credential.mfa_device)
            .token_code(code)
            .set_duration_seconds(self.duration_seconds)
            .send()
            .await
            .map_err(|e| {
                RotateError::network(GET_SESSION_TOKEN, DisplayErrorContext(&e).to_string())
            })?;

        into_temporary(GET_SESSION_TOKEN, response.credentials())
    }

    async fn assume_role(
        &self,
        credential: &LongTermCredential,
        code: &str,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials> {
        info!("Calling AWS STS AssumeRole");
        debug!("Role ARN: {}", role_arn);
        debug!("Session name: {}", session_name);
        debug!("MFA serial: {}", credential.mfa_device);

        let response = self
            .client(credential)
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .serial_number(&credential.mfa_device)
            .token_code(code)
            .set_duration_seconds(self.duration_seconds)
            .send()
            .await
            .map_err(|e| RotateError::network(ASSUME_ROLE, DisplayErrorContext(&e).to_string()))?;

        into_temporary(ASSUME_ROLE, response.credentials())
    }
}

fn into_temporary(
    operation: &'static str,
    sts_creds: Option<&StsCredentials>,
) -> Result<TemporaryCredentials> {
    let sts_creds =
        sts_creds.ok_or_else(|| RotateError::network(operation, "AWS STS returned no credentials"))?;

    let expiration = to_utc(sts_creds.expiration()).ok_or_else(|| {
        RotateError::network(operation, "credential expiration is out of range")
    })?;

    info!("Successfully obtained AWS credentials");
    Ok(TemporaryCredentials {
        access_key_id: sts_creds.access_key_id().to_string(),
        secret_access_key: sts_creds.secret_access_key().to_string(),
        session_token: sts_creds.session_token().to_string(),
        expiration,
    })
}

fn to_utc(timestamp: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
