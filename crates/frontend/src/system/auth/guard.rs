use contracts::system::roles::DashboardTab;
use leptos::prelude::*;

use super::context::use_auth;

/// Renders `children` only when the signed-in user's role may open `tab`.
/// Hides UI only; the server authorizes every request.
#[component]
pub fn RequirePermission(tab: DashboardTab, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_authenticated() && tab.is_allowed(&s.permissions()))
            fallback=|| view! {
                <div class="alert alert--warning">
                    "You do not have access to this section."
                </div>
            }
        >
            {children()}
        </Show>
    }
}
