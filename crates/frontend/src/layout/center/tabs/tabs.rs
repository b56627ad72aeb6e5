use crate::layout::center::tabs::tab::Tab as TabComponent;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::prelude::*;

/// Tab bar plus one mounted page per open tab; inactive pages stay mounted
/// but hidden so their filters and scroll position survive switching.
#[component]
pub fn Tabs() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="tabs-container">
            <div class="tabs-bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabComponent tab=tab /> }
                />
            </div>
            <div class="tab-content">
                <Show
                    when=move || !tabs_store.opened.with(Vec::is_empty)
                    fallback=|| view! {
                        <div class="placeholder">"Choose a section from the menu."</div>
                    }
                >
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| view! {
                            <TabPage tab=tab tabs_store=tabs_store />
                        }
                    />
                </Show>
            </div>
        </div>
    }
}
