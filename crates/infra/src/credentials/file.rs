//! File-backed credential store.
//!
//! The session is kept in memory and mirrored to a JSON file so it survives
//! restarts:
//! - File permissions set to 0600 on Unix (owner read/write only)
//! - Writes go to a temp file that is then renamed over the target
//! - `clear()` deletes the file

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use storefront_core::CredentialStore;
use storefront_domain::{Result, StoredSession, StorefrontError, TokenPair, UserProfile};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// File permissions for the session file (Unix only): owner read/write.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Session persisted as JSON at a fixed path
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    session: RwLock<Option<StoredSession>>,
}

impl FileCredentialStore {
    /// Open the store, loading any session already on disk.
    ///
    /// An unreadable or corrupt file is treated as signed out and replaced on
    /// the next write.
    ///
    /// # Errors
    /// Returns `StorefrontError::Storage` when the parent directory cannot be
    /// created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(InfraError::from)?;
        }
        let session = match read_session(&path) {
            Ok(session) => session,
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable session file");
                None
            }
        };
        debug!(path = %path.display(), restored = session.is_some(), "credential file opened");
        Ok(Self { path, session: RwLock::new(session) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `update` to the cached session and persist the result.
    fn update(&self, update: impl FnOnce(&mut Option<StoredSession>) -> Result<()>) -> Result<()> {
        let mut session = self.session.write();
        let mut next = session.clone();
        update(&mut next)?;
        match &next {
            Some(stored) => write_session(&self.path, stored)?,
            None => remove_session(&self.path)?,
        }
        *session = next;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.tokens.access_token().to_string())
    }

    fn refresh_token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.tokens.refresh_token().to_string())
    }

    fn set_tokens(&self, tokens: TokenPair) -> Result<()> {
        self.update(|session| {
            let user = session.take().and_then(|s| s.user);
            *session = Some(StoredSession { tokens, user });
            Ok(())
        })
    }

    fn clear(&self) -> Result<()> {
        self.update(|session| {
            *session = None;
            Ok(())
        })
    }

    fn user(&self) -> Option<UserProfile> {
        self.session.read().as_ref().and_then(|s| s.user.clone())
    }

    fn set_user(&self, user: Option<UserProfile>) -> Result<()> {
        self.update(|session| {
            let session = session
                .as_mut()
                .ok_or_else(|| StorefrontError::InvalidInput("no stored session".into()))?;
            session.user = user;
            Ok(())
        })
    }

    fn session(&self) -> Option<StoredSession> {
        self.session.read().clone()
    }
}

fn read_session(path: &Path) -> Result<Option<StoredSession>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(InfraError::from(e).into()),
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    let session = serde_json::from_str(&content).map_err(InfraError::from)?;
    Ok(Some(session))
}

fn write_session(path: &Path, session: &StoredSession) -> Result<()> {
    let content = serde_json::to_vec_pretty(session).map_err(InfraError::from)?;

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, content).map_err(InfraError::from)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(FILE_MODE);
        std::fs::set_permissions(&temp_path, perms).map_err(InfraError::from)?;
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(InfraError::from(e).into());
    }
    debug!(path = %path.display(), "session persisted");
    Ok(())
}

fn remove_session(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(InfraError::from(e).into()),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair::new(access, refresh).unwrap()
    }

    #[test]
    fn persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = FileCredentialStore::open(&path).unwrap();
        store.set_tokens(pair("A1", "R1")).unwrap();
        let profile = UserProfile { id: 42, full_name: "Aysel".into(), ..Default::default() };
        store.set_user(Some(profile)).unwrap();

        let reopened = FileCredentialStore::open(&path).unwrap();
        assert_eq!(reopened.access_token().as_deref(), Some("A1"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("R1"));
        assert_eq!(reopened.user().map(|u| u.id), Some(42));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn clear_deletes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileCredentialStore::open(&path).unwrap();
        store.set_tokens(pair("A", "R")).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.session().is_none());
        assert!(FileCredentialStore::open(&path).unwrap().session().is_none());
    }

    #[test]
    fn corrupt_file_opens_signed_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileCredentialStore::open(&path).unwrap();
        assert!(!store.is_authenticated());

        store.set_tokens(pair("A", "R")).unwrap();
        assert!(FileCredentialStore::open(&path).unwrap().is_authenticated());
    }

    #[test]
    fn half_populated_pair_on_disk_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"tokens":{"access_token":"A","refresh_token":""}}"#).unwrap();

        let store = FileCredentialStore::open(&path).unwrap();
        assert!(store.session().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let store = FileCredentialStore::open(&path).unwrap();
        store.set_tokens(pair("A", "R")).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
