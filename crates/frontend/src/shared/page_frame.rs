//! PageFrame: standard root wrapper for every page rendered inside a tab.
//!
//! Sets `id="{tab_key}--{category}"` and `data-page-category` on the root
//! element, plus a BEM modifier class derived from the category.

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// HTML id in format `{tab_key}--{category}`, e.g. `"a001_member--list"`.
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants from `page_standard`.
    category: &'static str,
    children: Children,
) -> impl IntoView {
    debug_assert!(is_valid_page_id(page_id), "bad page id {page_id}");

    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        PAGE_CAT_DOCS => "page page--docs",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
