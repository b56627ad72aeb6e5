//! Tab management
//!
//! - `page` - TabPage wrapper that shows or hides a tab's content
//! - `registry` - tab key → view mapping
//! - `tab_labels` - titles and icons per tab key

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{tab_icon_for_key, tab_label_for_key};
