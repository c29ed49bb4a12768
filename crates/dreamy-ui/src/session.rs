use std::rc::Rc;

use dreamy_core::session::{SessionBackend, SessionStore};

/// localStorage-backed persistence for the session store. Every accessor
/// tolerates a missing window or storage (e.g. storage disabled) by acting
/// as an empty store.
pub struct LocalStorageBackend;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

impl SessionBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Option<String> {
        storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn write(&self, key: &str, value: &str) {
        if let Some(storage) = storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
}

pub type Session = Rc<SessionStore<LocalStorageBackend>>;

pub fn browser_session() -> Session {
    Rc::new(SessionStore::new(LocalStorageBackend))
}
