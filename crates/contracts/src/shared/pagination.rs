use serde::{Deserialize, Serialize};

/// Pagination block returned next to list payloads. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            total: 0,
            pages: 0,
        }
    }
}

impl Pagination {
    /// Zero-based page index for the pagination widget.
    pub fn page_index(&self) -> usize {
        self.page.saturating_sub(1) as usize
    }

    /// Page count shown in the UI; never below one.
    pub fn display_pages(&self) -> usize {
        self.pages.max(1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let p: Pagination = serde_json::from_str(r#"{"total": 42, "pages": 3}"#).unwrap();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 20);
        assert_eq!(p.page_index(), 0);
        assert_eq!(p.display_pages(), 3);
    }

    #[test]
    fn empty_result_still_shows_one_page() {
        let p = Pagination::default();
        assert_eq!(p.display_pages(), 1);
    }
}
