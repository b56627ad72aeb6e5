use contracts::system::auth::AuthSession;
use web_sys::window;

const SESSION_KEY: &str = "church_admin_session_v1";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Save the session to localStorage
pub fn save_session(session: &AuthSession) {
    let Some(storage) = get_local_storage() else {
        return;
    };
    match serde_json::to_string(session) {
        Ok(raw) => {
            let _ = storage.set_item(SESSION_KEY, &raw);
        }
        Err(e) => log::error!("Failed to serialize session: {}", e),
    }
}

/// Load the session from localStorage; unreadable entries are discarded
pub fn load_session() -> Option<AuthSession> {
    let raw = get_local_storage()?.get_item(SESSION_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Discarding unreadable stored session: {}", e);
            clear_session();
            None
        }
    }
}

pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
