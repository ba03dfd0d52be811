use std::fmt;

use tracing::{debug, warn};

use crate::{
    constants::{
        ACCESS_KEY_ID_KEY, ASSUME_ROLE_KEY, LONG_TERM_KEY, MFA_DEVICE_KEY, SECRET_ACCESS_KEY_KEY,
        long_term_section,
    },
    error::{Result, RotateError},
    store::CredentialStore,
};

/// Long-term key pair a rotation authenticates with
#[derive(Clone, PartialEq, Eq)]
pub struct LongTermCredential {
    /// Section the keys were read from, e.g. `work-long-term`
    pub section: String,
    pub mfa_device: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for LongTermCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongTermCredential")
            .field("section", &self.section)
            .field("mfa_device", &self.mfa_device)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Where a requested profile gets its keys from and what it turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Profile name as requested; the rotated credentials land here
    pub profile: String,
    pub long_term: LongTermCredential,
    pub assume_role: Option<String>,
}

/// Resolves `profile` against the store.
///
/// `long_term` on the profile's own section redirects to another base profile,
/// `assume_role` selects role assumption. Fails when the long-term section has
/// no key id or secret, before anything interactive happens.
pub fn resolve(store: &CredentialStore, profile: &str) -> Result<Resolution> {
    let own = store.section(profile);

    let base = match own.get(LONG_TERM_KEY) {
        "" => profile,
        alias => alias,
    };
    let assume_role = Some(own.get(ASSUME_ROLE_KEY))
        .filter(|role| !role.is_empty())
        .map(str::to_string);

    let section = long_term_section(base);
    debug!("Profile '{}' sources long-term keys from [{}]", profile, section);

    let lt = store.section(&section);
    let access_key_id = lt.get(ACCESS_KEY_ID_KEY);
    let secret_access_key = lt.get(SECRET_ACCESS_KEY_KEY);

    if access_key_id.is_empty() || secret_access_key.is_empty() {
        return Err(RotateError::MissingCredential { section });
    }

    let mfa_device = lt.get(MFA_DEVICE_KEY);
    if mfa_device.is_empty() {
        warn!("No {} set in [{}]", MFA_DEVICE_KEY, section);
    }

    Ok(Resolution {
        profile: profile.to_string(),
        long_term: LongTermCredential {
            mfa_device: mfa_device.to_string(),
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            section,
        },
        assume_role,
    })
}
