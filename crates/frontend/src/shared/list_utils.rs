//! Client-side list helpers: sorting, sort indicators, slicing into pages.

use std::cmp::Ordering;

/// Types that can be sorted by a named column.
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Case-insensitive comparison for text columns.
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Sort indicator shown next to a column header.
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(field: &str, current_field: &str) -> &'static str {
    if field == current_field {
        "sort-indicator sort-indicator--active"
    } else {
        "sort-indicator"
    }
}

/// Number of pages for `total` items, never less than zero pages.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Items of the 0-indexed `page`. Out-of-range pages are empty.
pub fn page_slice<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    let start = page.saturating_mul(page_size);
    if page_size == 0 || start >= items.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(items.len());
    items[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(&'static str, u32);

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => cmp_text(self.0, other.0),
                _ => self.1.cmp(&other.1),
            }
        }
    }

    #[test]
    fn sorts_both_directions() {
        let mut rows = vec![Row("b", 2), Row("A", 3), Row("c", 1)];
        sort_list(&mut rows, "name", true);
        assert_eq!(rows[0], Row("A", 3));
        sort_list(&mut rows, "count", false);
        assert_eq!(rows[0], Row("A", 3));
        assert_eq!(rows[2], Row("c", 1));
    }

    #[test]
    fn indicator_marks_active_column() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("name", "email", true), " ⇅");
    }

    #[test]
    fn pages_are_sliced_in_order() {
        let items: Vec<u32> = (1..=45).collect();
        assert_eq!(page_count(items.len(), 20), 3);
        assert_eq!(page_slice(&items, 0, 20).len(), 20);
        assert_eq!(page_slice(&items, 2, 20), vec![41, 42, 43, 44, 45]);
        assert!(page_slice(&items, 3, 20).is_empty());
        assert_eq!(page_count(0, 20), 0);
    }
}
