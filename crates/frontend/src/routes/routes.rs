use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::{do_logout, use_auth, use_permissions};
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, Spinner};

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    // Runs once when the dashboard mounts.
    tabs_store.init_router_integration(use_permissions());

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

/// Signed in, but the role has no dashboard tabs (plain members, guests).
#[component]
fn NoAccess() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let name = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.display_name())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Church Admin"</h1>
                <div class="alert alert--warning">
                    {move || format!(
                        "{}, your account does not have access to the admin dashboard.",
                        name()
                    )}
                </div>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| do_logout(set_auth_state)
                >
                    "Sign out"
                </Button>
            </div>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let permissions = use_permissions();

    view! {
        <Show
            when=move || !auth_state.with(|s| s.is_restoring)
            fallback=|| view! {
                <div class="login-container">
                    <Spinner />
                    <span>"Restoring session..."</span>
                </div>
            }
        >
            <Show
                when=move || auth_state.with(|s| s.is_authenticated())
                fallback=|| view! { <LoginPage /> }
            >
                <Show
                    when=move || permissions.get().has_admin_access()
                    fallback=|| view! { <NoAccess /> }
                >
                    <MainLayout />
                </Show>
            </Show>
        </Show>
    }
}
