//! Top navigation bar: sidebar toggle, title, signed-in user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();

    let user_label = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| format!("{} · {}", u.display_name(), u.role.label()))
                .unwrap_or_else(|| "Guest".to_string())
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                {icon("heart")}
                <span class="top-header__title">"Church Admin"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>{user_label}</span>
                </div>

                <button
                    class="top-header__icon-btn"
                    on:click=move |_| do_logout(set_auth_state)
                    title="Sign out"
                >
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
