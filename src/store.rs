//! INI-backed credential store.
//!
//! The store is loaded once, mutated in memory and written back once. Nothing
//! reaches the disk until [`CredentialStore::save`] is called.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use ini::{Ini, Properties};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, RotateError};

/// Sections of the shared credentials file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    ini: Ini,
}

/// Read-only view of one section. Missing sections behave as empty ones.
#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    props: Option<&'a Properties>,
}

impl<'a> SectionView<'a> {
    /// Value of `key`, or an empty string when the key or section is absent.
    pub fn get(&self, key: &str) -> &'a str {
        self.props.and_then(|p| p.get(key)).unwrap_or("").trim()
    }

    pub fn exists(&self) -> bool {
        self.props.is_some()
    }

    /// Number of keys in the section.
    pub fn len(&self) -> usize {
        self.props.map_or(0, Properties::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore {
    /// Loads the store from `path`. A missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let ini = Ini::load_from_file(path).map_err(|source| RotateError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Loaded {} sections from {}",
            ini.sections().count(),
            path.display()
        );
        Ok(Self { ini })
    }

    /// Parses a store from INI text.
    pub fn parse(contents: &str, origin: impl Into<PathBuf>) -> Result<Self> {
        let ini = Ini::load_from_str(contents).map_err(|e| RotateError::Config {
            path: origin.into(),
            source: ini::Error::Parse(e),
        })?;
        Ok(Self { ini })
    }

    pub fn section(&self, name: &str) -> SectionView<'_> {
        SectionView {
            props: self.ini.section(Some(name)),
        }
    }

    /// Replaces the contents of section `name` with `entries`.
    ///
    /// An existing section is cleared where it stands so the file keeps its
    /// layout; a new one is appended. Either way exactly one section with
    /// this name holds exactly these keys afterwards.
    pub fn replace_section<'e>(
        &mut self,
        name: &str,
        entries: impl IntoIterator<Item = (&'e str, &'e str)>,
    ) {
        match self.ini.section_mut(Some(name)) {
            Some(props) => *props = Properties::new(),
            None => {
                self.ini.with_section(Some(name));
            }
        }

        for (key, value) in entries {
            self.set(name, key, value);
        }
    }

    /// Assigns `key = value` in section `section`, creating the section if needed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Writes the whole store to `path`.
    ///
    /// The contents go to a temporary file next to `path` which is then
    /// renamed over it, so `path` is either fully replaced or left untouched.
    pub fn save(&self, path: &Path) -> Result<()> {
        let persist_err = |source| RotateError::Persist {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(persist_err)?;
        self.ini.write_to(&mut tmp).map_err(persist_err)?;
        tmp.flush().map_err(persist_err)?;
        tmp.as_file().sync_all().map_err(persist_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(persist_err)?;
        }

        tmp.persist(path).map_err(|e| persist_err(e.error))?;

        debug!("Wrote credentials file {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "\
[work]
long_term = base

[base-long-term]
aws_access_key_id = AKIAEXAMPLE
aws_secret_access_key = secret1

[other]
region = eu-west-1
";

    fn sample_store() -> CredentialStore {
        CredentialStore::parse(SAMPLE, "credentials").unwrap()
    }

    #[test]
    fn test_section_lookup() {
        let store = sample_store();
        let section = store.section("base-long-term");
        assert!(section.exists());
        assert_eq!(section.get("aws_access_key_id"), "AKIAEXAMPLE");
        assert_eq!(section.get("aws_secret_access_key"), "secret1");
        assert_eq!(section.len(), 2);
    }

    #[test]
    fn test_missing_section_reads_empty() {
        let store = sample_store();
        let section = store.section("nope");
        assert!(!section.exists());
        assert!(section.is_empty());
        assert_eq!(section.get("aws_access_key_id"), "");
    }

    #[test]
    fn test_missing_key_reads_empty() {
        let store = sample_store();
        assert_eq!(store.section("work").get("assume_role"), "");
    }

    #[test]
    fn test_replace_section_drops_stale_keys() {
        let mut store = sample_store();
        store.set("work", "aws_session_token", "old-token");
        store.replace_section(
            "work",
            [("aws_access_key_id", "AKIA2"), ("aws_session_token", "token2")],
        );

        let section = store.section("work");
        assert_eq!(section.len(), 2);
        assert_eq!(section.get("aws_access_key_id"), "AKIA2");
        assert_eq!(section.get("aws_session_token"), "token2");
        assert_eq!(section.get("long_term"), "");
    }

    #[test]
    fn test_replace_section_creates_missing() {
        let mut store = sample_store();
        store.replace_section("fresh", [("aws_access_key_id", "AKIA3")]);
        assert_eq!(store.section("fresh").get("aws_access_key_id"), "AKIA3");
    }

    #[test]
    fn test_replace_section_keeps_single_section() {
        let mut store = sample_store();
        store.replace_section("work", [("aws_access_key_id", "a")]);
        store.replace_section("work", [("aws_access_key_id", "b")]);

        let mut buf = Vec::new();
        store.ini.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches("[work]").count(), 1);
        assert_eq!(store.section("work").get("aws_access_key_id"), "b");
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CredentialStore::load(&dir.path().join("credentials")).unwrap_err();
        assert!(matches!(err, RotateError::Config { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, "[unterminated\nkey = value\n").unwrap();
        let err = CredentialStore::load(&path).unwrap_err();
        assert!(matches!(err, RotateError::Config { .. }));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        fs::write(&path, SAMPLE).unwrap();

        let mut store = CredentialStore::load(&path).unwrap();
        store.replace_section("work", [("aws_session_token", "token2")]);
        store.save(&path).unwrap();

        let reloaded = CredentialStore::load(&path).unwrap();
        assert_eq!(reloaded.section("work").get("aws_session_token"), "token2");
        assert_eq!(reloaded.section("other").get("region"), "eu-west-1");
        assert_eq!(
            reloaded.section("base-long-term").get("aws_secret_access_key"),
            "secret1"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        sample_store().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_save_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("credentials");
        let err = sample_store().save(&path).unwrap_err();
        assert!(matches!(err, RotateError::Persist { .. }));
        assert!(!path.exists());
    }
}
