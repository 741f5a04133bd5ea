use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::storage::{SessionStorage, KEY_ROLES, KEY_TOKEN, KEY_USER_EMAIL, KEY_USER_ID, SESSION_KEYS};

/// Authentication state of the running client. Created empty, populated by a
/// successful login, destroyed by logout or a 401 on any request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub roles: BTreeSet<String>,
}

impl Session {
    pub fn authenticated(
        token: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
        roles: BTreeSet<String>,
    ) -> Self {
        Self {
            is_authenticated: true,
            token: Some(token.into()),
            user_id: Some(user_id.into()),
            email: Some(email.into()),
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Single source of truth for authentication state.
///
/// Holds the current [`Session`] behind a watch channel: subscribers observe
/// the latest value only (no history), synchronous accessors read it without
/// waiting. Every replacement is written through the storage port so a fresh
/// store rehydrates the identical session.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Session>>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let initial = rehydrate(storage.as_ref());
        let (state, _) = watch::channel(initial);
        Self {
            state: Arc::new(state),
            storage,
        }
    }

    /// Replace the current session with a fully-authenticated one, persist
    /// it, and publish to every subscriber.
    pub fn set_authenticated(
        &self,
        token: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
        roles: BTreeSet<String>,
    ) {
        let session = Session::authenticated(token, user_id, email, roles);
        self.persist(&session);
        info!(user_id = session.user_id.as_deref().unwrap_or_default(), "session authenticated");
        self.state.send_replace(session);
    }

    /// Replace the current session with the unauthenticated default and erase
    /// every persisted session key.
    pub fn clear(&self) {
        for key in SESSION_KEYS {
            self.storage.remove(key);
        }
        self.state.send_replace(Session::default());
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.borrow().user_id.clone()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.state.borrow().has_role(role)
    }

    fn persist(&self, session: &Session) {
        if let (Some(token), Some(user_id), Some(email)) =
            (&session.token, &session.user_id, &session.email)
        {
            self.storage.put(KEY_TOKEN, token);
            self.storage.put(KEY_USER_ID, user_id);
            self.storage.put(KEY_USER_EMAIL, email);
            if let Ok(raw) = serde_json::to_string(&session.roles) {
                self.storage.put(KEY_ROLES, &raw);
            }
        }
    }
}

/// Restore a persisted session. Token, user id and email must all be present;
/// anything partial is treated as signed out, never half-authenticated.
fn rehydrate(storage: &dyn SessionStorage) -> Session {
    let token = storage.get(KEY_TOKEN);
    let user_id = storage.get(KEY_USER_ID);
    let email = storage.get(KEY_USER_EMAIL);
    match (token, user_id, email) {
        (Some(token), Some(user_id), Some(email)) => {
            let roles = storage
                .get(KEY_ROLES)
                .map(|raw| parse_roles(&raw))
                .unwrap_or_default();
            debug!(user_id = %user_id, "restored persisted session");
            Session::authenticated(token, user_id, email, roles)
        }
        _ => Session::default(),
    }
}

fn parse_roles(raw: &str) -> BTreeSet<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
