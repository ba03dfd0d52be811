use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    constants::{ACCESS_KEY_ID_KEY, SECRET_ACCESS_KEY_KEY, SESSION_TOKEN_KEY},
    error::Result,
    profile::LongTermCredential,
};

pub mod sts;

pub use sts::StsExchange;

/// AWS temporary credentials structure
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: DateTime<Utc>,
}

impl TemporaryCredentials {
    /// Keys written to the rotated profile section
    pub fn entries(&self) -> [(&str, &str); 3] {
        [
            (ACCESS_KEY_ID_KEY, self.access_key_id.as_str()),
            (SECRET_ACCESS_KEY_KEY, self.secret_access_key.as_str()),
            (SESSION_TOKEN_KEY, self.session_token.as_str()),
        ]
    }
}

impl std::fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// The two MFA-gated token exchanges. A rotation calls exactly one of them.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Exchanges `credential` and `code` for a session token, using
    /// `credential.mfa_device` as the MFA serial.
    async fn get_session_token(
        &self,
        credential: &LongTermCredential,
        code: &str,
    ) -> Result<TemporaryCredentials>;

    /// Assumes `role_arn` with `credential` and `code`, naming the session `session_name`.
    async fn assume_role(
        &self,
        credential: &LongTermCredential,
        code: &str,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_cover_session_keys() {
        let creds = TemporaryCredentials {
            access_key_id: "AKIA2".to_string(),
            secret_access_key: "secret2".to_string(),
            session_token: "token2".to_string(),
            expiration: Utc::now(),
        };

        assert_eq!(
            creds.entries(),
            [
                ("aws_access_key_id", "AKIA2"),
                ("aws_secret_access_key", "secret2"),
                ("aws_session_token", "token2"),
            ]
        );
        assert!(!format!("{creds:?}").contains("token2"));
    }
}
