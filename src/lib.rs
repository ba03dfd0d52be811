//! Rotate MFA-gated temporary AWS credentials into the shared credentials file.
//!
//! A profile's long-term keys live in a `<base>-long-term` section. Rotating
//! the profile exchanges those keys plus a one-time MFA code for temporary
//! credentials through AWS STS and writes them back under the profile's own
//! name:
//!
//! ```ini
//! [work-long-term]
//! aws_mfa_device = arn:aws:iam::123456789012:mfa/operator
//! aws_access_key_id = AKIA...
//! aws_secret_access_key = ...
//!
//! [ops]
//! long_term = work
//! assume_role = arn:aws:iam::123456789012:role/Deploy
//! ```

pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod mfa;
pub mod profile;
pub mod rotate;
pub mod store;

pub use aws::{StsExchange, TemporaryCredentials, TokenExchange};
pub use config::Config;
pub use error::{Result, RotateError};
pub use mfa::{MfaPrompt, TerminalPrompt};
pub use profile::{LongTermCredential, Resolution};
pub use rotate::{Rotation, Rotator};
pub use store::CredentialStore;
