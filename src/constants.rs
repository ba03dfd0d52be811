/// AWS configuration directory name
pub const AWS_CONFIG_DIR_NAME: &str = ".aws";

/// AWS configuration file name
pub const AWS_CONFIG_FILE_NAME: &str = "config";

/// AWS shared credentials file name
pub const AWS_CREDENTIALS_FILE_NAME: &str = "credentials";

/// Suffix appended to a base profile name to locate its long-term keys
pub const LONG_TERM_SUFFIX: &str = "-long-term";

/// Profile key naming another base profile to source long-term keys from
pub const LONG_TERM_KEY: &str = "long_term";

/// Profile key holding the role ARN to assume
pub const ASSUME_ROLE_KEY: &str = "assume_role";

pub const MFA_DEVICE_KEY: &str = "aws_mfa_device";
pub const ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY_KEY: &str = "aws_secret_access_key";
pub const SESSION_TOKEN_KEY: &str = "aws_session_token";

/// Region key in the AWS config file
pub const REGION_KEY: &str = "region";

/// Number of digits in a one-time MFA code
pub const MFA_CODE_LENGTH: usize = 6;

/// Default AWS region for STS operations when no region is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Shortest session STS will issue, in seconds
pub const MIN_SESSION_DURATION_SECS: i32 = 900;

/// Longest session GetSessionToken will issue, in seconds
pub const MAX_SESSION_DURATION_SECS: i32 = 129_600;

/// Name of the default profile, which has no `profile ` prefix in the config file
pub const DEFAULT_PROFILE: &str = "default";

/// Long-term section name for a base profile
pub fn long_term_section(base_profile: &str) -> String {
    format!("{base_profile}{LONG_TERM_SUFFIX}")
}

/// Config file section name for a profile
pub fn config_section(profile: &str) -> String {
    if profile == DEFAULT_PROFILE {
        profile.to_string()
    } else {
        format!("profile {profile}")
    }
}
