use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use api_types::auth::{TokenPair, User};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;

/// On-disk shape of the durable session.
///
/// Absence of any field at startup means logged out.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<User>,
}

/// Durable storage for the access/refresh tokens and the cached profile.
///
/// One shared store per process: `Clone` hands out the same state. Writers
/// are the session manager (login/logout) and the API client (refresh path).
/// Every write persists the whole file atomically; a failed persist still
/// updates the in-memory view, so stale tokens are never served again within
/// the process.
#[derive(Clone)]
pub struct TokenStore {
    path: PathBuf,
    inner: Arc<Mutex<SessionFile>>,
}

impl TokenStore {
    /// Opens the store at `path`; a missing or unreadable file yields an
    /// empty store, never an error.
    pub fn load_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file = read_json_file(&path).unwrap_or_default();
        Self {
            path,
            inner: Arc::new(Mutex::new(file)),
        }
    }

    pub async fn access_token(&self) -> Option<String> {
        self.inner.lock().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.inner.lock().await.refresh_token.clone()
    }

    /// Both tokens, or `None` unless both are present.
    pub async fn tokens(&self) -> Option<TokenPair> {
        let guard = self.inner.lock().await;
        match (&guard.access_token, &guard.refresh_token) {
            (Some(access), Some(refresh)) => Some(TokenPair {
                access: access.clone(),
                refresh: refresh.clone(),
            }),
            _ => None,
        }
    }

    pub async fn user(&self) -> Option<User> {
        self.inner.lock().await.user.clone()
    }

    /// Stores both tokens (login).
    pub async fn store_tokens(&self, tokens: &TokenPair) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.access_token = Some(tokens.access.clone());
        guard.refresh_token = Some(tokens.refresh.clone());
        write_json_file(&self.path, &guard)?;
        Ok(())
    }

    /// Overwrites only the access token (refresh).
    pub async fn store_access(&self, access: &str) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.access_token = Some(access.to_string());
        write_json_file(&self.path, &guard)?;
        Ok(())
    }

    pub async fn store_user(&self, user: &User) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.user = Some(user.clone());
        write_json_file(&self.path, &guard)?;
        Ok(())
    }

    /// Wipes tokens and profile. The in-memory view is cleared before the
    /// file write, so even a failed persist cannot leave usable tokens.
    pub async fn clear(&self) -> Result<()> {
        let mut guard = self.inner.lock().await;
        *guard = SessionFile::default();
        write_json_file(&self.path, &guard)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_json_file(path: &Path) -> Option<SessionFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn write_json_file(path: &Path, file: &SessionFile) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(file)
        .map_err(|_| std::io::Error::other("serialize failed"))?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}
