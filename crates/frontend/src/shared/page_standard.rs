//! Page categories used by [`PageFrame`](super::page_frame::PageFrame).
//!
//! Every page rendered inside a tab carries `id="{tab_key}--{category}"` and
//! `data-page-category`, which keeps DOM inspection and styling uniform.

pub const PAGE_CAT_LIST: &str = "list";

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

pub const PAGE_CAT_USECASE: &str = "usecase";

pub const PAGE_CAT_DOCS: &str = "docs";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_USECASE,
    PAGE_CAT_DOCS,
];

pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && ALL_CATEGORIES.contains(&parts[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids_pair_a_key_with_a_known_category() {
        assert!(is_valid_page_id("a001_member--list"));
        assert!(is_valid_page_id("u501_zelle_docs--docs"));
        assert!(!is_valid_page_id("a001_member"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_member--detail"));
    }
}
