use contracts::shared::ApiError;
use contracts::system::auth::UserInfo;
use contracts::system::roles::RolePermissions;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage, token};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// Identity provider uid of the signed-in user.
    pub uid: Option<String>,
    pub user_info: Option<UserInfo>,
    /// True while a stored session is being validated on page load.
    pub is_restoring: bool,
    /// Shown on the login page, e.g. after the session expired.
    pub notice: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.uid.is_some() && self.user_info.is_some()
    }

    pub fn permissions(&self) -> RolePermissions {
        self.user_info
            .as_ref()
            .map(UserInfo::permissions)
            .unwrap_or_default()
    }

    fn signed_out(notice: Option<String>) -> Self {
        Self {
            notice,
            ..Self::default()
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let has_stored_session = storage::load_session().is_some();
    let (auth_state, set_auth_state) = signal(AuthState {
        is_restoring: has_stored_session,
        ..AuthState::default()
    });

    token::set_unauthorized_handler(Callback::new(move |_| {
        if auth_state.with_untracked(|s| s.uid.is_none()) {
            return;
        }
        log::warn!("Session rejected, signing out");
        storage::clear_session();
        set_auth_state.set(AuthState::signed_out(Some(
            "Your session has expired. Please sign in again.".to_string(),
        )));
    }));

    // Restore the session from localStorage on mount
    Effect::new(move |_| {
        let Some(session) = storage::load_session() else {
            return;
        };
        spawn_local(async move {
            match api::fetch_profile(&session.uid).await {
                Ok(user_info) => {
                    log::info!("Restored session for {}", user_info.display_name());
                    set_auth_state.set(AuthState {
                        uid: Some(session.uid),
                        user_info: Some(user_info),
                        ..AuthState::default()
                    });
                }
                Err(e) => {
                    log::warn!("Could not restore session: {}", e);
                    if matches!(e, ApiError::Unauthenticated) || e.status() == Some(401) {
                        storage::clear_session();
                    }
                    set_auth_state.set(AuthState::signed_out(Some(e.to_string())));
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Permissions of the signed-in user, tracked reactively.
pub fn use_permissions() -> Signal<RolePermissions> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(AuthState::permissions))
}

/// Sign in, then load the user's role from the backend
pub async fn do_login(
    email: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    let session = api::sign_in(&email, &password)
        .await
        .map_err(|e| e.to_string())?;
    storage::save_session(&session);

    match api::fetch_profile(&session.uid).await {
        Ok(user_info) => {
            log::info!(
                "Signed in as {} ({})",
                user_info.display_name(),
                user_info.role.as_str()
            );
            set_auth_state.set(AuthState {
                uid: Some(session.uid),
                user_info: Some(user_info),
                ..AuthState::default()
            });
            Ok(())
        }
        Err(e) => {
            storage::clear_session();
            Err(format!("Signed in, but your member profile could not be loaded: {}", e))
        }
    }
}

/// Forget the session locally; ID tokens are not revocable client-side
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_session();
    set_auth_state.set(AuthState::default());
    log::info!("Signed out");
}
