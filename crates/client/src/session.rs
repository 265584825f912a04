use api_types::auth::{TokenPair, User};

use crate::{
    error::{ClientError, Result},
    http::ApiClient,
    store::TokenStore,
};

/// Lifecycle of the session.
///
/// `Loading` is only observed between construction and the first
/// [`SessionManager::bootstrap`] resolution; it is never re-entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Loading,
    Authenticated,
    Unauthenticated,
}

/// In-memory owner of the current user and token state.
///
/// Constructed explicitly at the application root with its storage and API
/// client injected; there is no ambient global session. The durable store is
/// the restart mirror, this struct is the source of truth while the process
/// runs.
pub struct SessionManager {
    api: ApiClient,
    store: TokenStore,
    user: Option<User>,
    tokens: Option<TokenPair>,
    state: SessionState,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: TokenStore) -> Self {
        Self {
            api,
            store,
            user: None,
            tokens: None,
            state: SessionState::Uninitialized,
        }
    }

    /// Restores the session from durable storage.
    ///
    /// Only a complete persisted session (profile and both tokens) counts as
    /// authenticated. Storage read failures are swallowed and read as
    /// logged out, never as fatal.
    pub async fn bootstrap(&mut self) {
        self.state = SessionState::Loading;

        let user = self.store.user().await;
        let tokens = self.store.tokens().await;
        match (user, tokens) {
            (Some(user), Some(tokens)) => {
                tracing::debug!("restored persisted session");
                self.user = Some(user);
                self.tokens = Some(tokens);
                self.state = SessionState::Authenticated;
            }
            _ => {
                self.state = SessionState::Unauthenticated;
            }
        }
    }

    /// Logs in and mirrors the stored session into memory.
    ///
    /// On failure the session is left exactly as it was; the error
    /// propagates to the caller for display.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let user = self.api.login(email, password).await?;

        self.tokens = self.store.tokens().await;
        self.user = Some(user.clone());
        self.state = SessionState::Authenticated;
        Ok(user)
    }

    /// Clears the session unconditionally: even if wiping durable storage
    /// fails, the in-memory state is gone.
    pub async fn logout(&mut self) {
        if let Err(err) = self.api.logout().await {
            tracing::warn!("failed to clear session storage: {err}");
        }
        self.user = None;
        self.tokens = None;
        self.state = SessionState::Unauthenticated;
    }

    /// Refreshes the access token; a failure forces a logout and surfaces
    /// as [`ClientError::RefreshFailed`].
    pub async fn refresh_token(&mut self) -> Result<()> {
        match self.api.refresh_access_token().await {
            Ok(()) => {
                if let Some(tokens) = self.tokens.as_mut() {
                    if let Some(access) = self.store.access_token().await {
                        tokens.access = access;
                    }
                }
                Ok(())
            }
            Err(err) => {
                self.logout().await;
                Err(ClientError::RefreshFailed(Box::new(err)))
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.tokens.is_some()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }
}
