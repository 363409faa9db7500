//! Session storage with two interchangeable scopes.
//!
//! The persistent scope survives restarts ("remember me"); the
//! session-only scope lives as long as the process. A login writes to
//! exactly one scope and clears the other, so at most one scope holds a
//! token at any time. Reads check the persistent scope first.
//!
//! The store is handed to [`ApiClient`](crate::ApiClient) explicitly;
//! nothing reads session state from globals.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use voyage_core::error::CoreError;
use voyage_core::models::{AdminProfile, LoginResponse, ROLE_ADMIN};

/// Keys the session recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionKey {
    Token,
    Role,
    Name,
    Email,
    ImageUrl,
}

impl SessionKey {
    pub const ALL: [SessionKey; 5] = [
        SessionKey::Token,
        SessionKey::Role,
        SessionKey::Name,
        SessionKey::Email,
        SessionKey::ImageUrl,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    Persistent,
    SessionOnly,
}

impl SessionScope {
    pub fn for_remember_me(remember: bool) -> Self {
        if remember {
            Self::Persistent
        } else {
            Self::SessionOnly
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Persistent => Self::SessionOnly,
            Self::SessionOnly => Self::Persistent,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to persist session: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Key/value session storage over two scopes.
///
/// Implementors provide the four scoped primitives; everything else is
/// derived from them.
pub trait SessionStore: Send + Sync {
    fn get_in(&self, scope: SessionScope, key: SessionKey) -> Option<String>;

    fn set(&self, scope: SessionScope, key: SessionKey, value: &str) -> Result<(), SessionError>;

    fn remove(&self, scope: SessionScope, key: SessionKey) -> Result<(), SessionError>;

    fn clear(&self, scope: SessionScope) -> Result<(), SessionError>;

    /// Read a key, persistent scope first.
    fn get(&self, key: SessionKey) -> Option<String> {
        self.get_in(SessionScope::Persistent, key)
            .or_else(|| self.get_in(SessionScope::SessionOnly, key))
    }

    /// The scope currently holding the token. Profile details are written
    /// next to it.
    fn active_scope(&self) -> SessionScope {
        if self.get_in(SessionScope::Persistent, SessionKey::Token).is_some() {
            SessionScope::Persistent
        } else {
            SessionScope::SessionOnly
        }
    }

    fn token(&self) -> Option<String> {
        self.get(SessionKey::Token)
    }

    fn role(&self) -> Option<String> {
        self.get(SessionKey::Role)
    }

    fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Record a successful login in the scope picked by `remember` and wipe
    /// the other scope entirely.
    fn store_login(&self, login: &LoginResponse, remember: bool) -> Result<(), SessionError> {
        let scope = SessionScope::for_remember_me(remember);
        self.set(scope, SessionKey::Token, &login.token)?;
        self.set(scope, SessionKey::Role, &login.role)?;
        self.set(scope, SessionKey::Name, &login.name)?;
        self.set(scope, SessionKey::Email, &login.email)?;
        self.clear(scope.other())
    }

    /// Mirror the latest profile details into the active scope.
    fn store_profile(&self, profile: &AdminProfile) -> Result<(), SessionError> {
        let scope = self.active_scope();
        self.set(scope, SessionKey::Name, &profile.name)?;
        self.set(scope, SessionKey::Email, &profile.email)?;
        self.set(
            scope,
            SessionKey::ImageUrl,
            profile.image_url.as_deref().unwrap_or_default(),
        )
    }

    fn logout(&self) -> Result<(), SessionError> {
        self.clear(SessionScope::Persistent)?;
        self.clear(SessionScope::SessionOnly)
    }
}

/// Gate for admin-only operations.
///
/// Without a token the caller must sign in. A token with any role other
/// than `ROLE_ADMIN` is logged out on the spot.
pub fn admin_guard(session: &dyn SessionStore) -> Result<(), CoreError> {
    if !session.is_logged_in() {
        return Err(CoreError::Unauthorized("Not signed in".into()));
    }
    if session.role().as_deref() != Some(ROLE_ADMIN) {
        if let Err(e) = session.logout() {
            tracing::warn!(error = %e, "Failed to clear non-admin session");
        }
        return Err(CoreError::Forbidden("Access denied: admin only.".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scoped session implementation
// ---------------------------------------------------------------------------

type ScopeMap = HashMap<SessionKey, String>;

/// Default [`SessionStore`]: session-only scope in memory, persistent scope
/// in memory and optionally mirrored to a JSON file.
#[derive(Debug, Default)]
pub struct ScopedSession {
    persistent: RwLock<ScopeMap>,
    session_only: RwLock<ScopeMap>,
    file: Option<PathBuf>,
}

impl ScopedSession {
    /// Both scopes in memory. Nothing survives the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Back the persistent scope with `path`, loading it if it exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let persistent = match std::fs::read(&path) {
            Ok(bytes) if !bytes.is_empty() => serde_json::from_slice(&bytes)?,
            Ok(_) => ScopeMap::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ScopeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), keys = persistent.len(), "Session file loaded");
        Ok(Self {
            persistent: RwLock::new(persistent),
            session_only: RwLock::new(ScopeMap::new()),
            file: Some(path),
        })
    }

    fn scope(&self, scope: SessionScope) -> &RwLock<ScopeMap> {
        match scope {
            SessionScope::Persistent => &self.persistent,
            SessionScope::SessionOnly => &self.session_only,
        }
    }

    /// Apply `change` to a scope. Persistent changes only take effect once
    /// they are on disk; a failed flush leaves the scope as it was.
    fn mutate(
        &self,
        scope: SessionScope,
        change: impl FnOnce(&mut ScopeMap),
    ) -> Result<(), SessionError> {
        let mut map = self
            .scope(scope)
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = map.clone();
        change(&mut next);
        if scope == SessionScope::Persistent {
            self.flush(&next)?;
        }
        *map = next;
        Ok(())
    }

    fn flush(&self, map: &ScopeMap) -> Result<(), SessionError> {
        let Some(path) = &self.file else {
            return Ok(());
        };
        if map.is_empty() {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(map)?)?;
        Ok(())
    }
}

impl SessionStore for ScopedSession {
    fn get_in(&self, scope: SessionScope, key: SessionKey) -> Option<String> {
        self.scope(scope)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    fn set(&self, scope: SessionScope, key: SessionKey, value: &str) -> Result<(), SessionError> {
        self.mutate(scope, |map| {
            map.insert(key, value.to_string());
        })
    }

    fn remove(&self, scope: SessionScope, key: SessionKey) -> Result<(), SessionError> {
        self.mutate(scope, |map| {
            map.remove(&key);
        })
    }

    fn clear(&self, scope: SessionScope) -> Result<(), SessionError> {
        self.mutate(scope, ScopeMap::clear)
    }
}
