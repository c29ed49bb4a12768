use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::user::User;

pub const TOKEN_KEY: &str = "dreamy-todo-token";
pub const USER_KEY: &str = "dreamy-todo-user";

/// String key-value persistence the session rides on. The browser build
/// backs this with localStorage; tests use `MemoryBackend`.
pub trait SessionBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Updated(User),
    Cleared,
}

pub type SubscriberId = u64;

type Listener = Rc<dyn Fn(&SessionEvent)>;

/// Holds the auth token and the cached user record, and tells subscribers
/// when the identity changes. The subscription interface is the only
/// cross-component signal in the app; there is no ambient event bus.
///
/// Single-threaded by design (the UI thread owns it), hence the plain
/// `RefCell` interior.
pub struct SessionStore<B: SessionBackend> {
    backend: B,
    subscribers: RefCell<Vec<(SubscriberId, Listener)>>,
    next_id: RefCell<SubscriberId>,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            subscribers: RefCell::new(Vec::new()),
            next_id: RefCell::new(0),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.backend.read(TOKEN_KEY)
    }

    pub fn user(&self) -> Option<User> {
        let raw = self.backend.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                warn!(%error, "stored user record is unparsable, treating as absent");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persists both halves and notifies subscribers once.
    pub fn set_session(&self, token: &str, user: &User) {
        self.backend.write(TOKEN_KEY, token);
        self.write_user(user);
        self.notify(&SessionEvent::Updated(user.clone()));
    }

    /// Token-only write for the window between login and the `/users/me/`
    /// fetch. Identity subscribers only hear about user writes and clears.
    pub fn store_token(&self, token: &str) {
        self.backend.write(TOKEN_KEY, token);
    }

    pub fn set_user(&self, user: &User) {
        self.write_user(user);
        self.notify(&SessionEvent::Updated(user.clone()));
    }

    /// Removes token and user together; logout and any 401 land here.
    pub fn clear(&self) {
        self.backend.remove(TOKEN_KEY);
        self.backend.remove(USER_KEY);
        self.notify(&SessionEvent::Cleared);
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + 'static) -> SubscriberId {
        let mut next_id = self.next_id.borrow_mut();
        let id = *next_id;
        *next_id += 1;
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(listener)));
        debug!(subscriber = id, "session subscriber added");
        id
    }

    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }

    fn write_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.backend.write(USER_KEY, &json),
            Err(error) => warn!(%error, "failed to serialize user record"),
        }
    }

    fn notify(&self, event: &SessionEvent) {
        // Snapshot first so a listener may subscribe/unsubscribe reentrantly
        // without tripping the RefCell.
        let snapshot: Vec<Listener> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(event);
        }
    }
}

/// In-memory backend for tests and non-browser callers.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<BTreeMap<String, String>>,
}

impl SessionBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
