pub mod api;
pub mod docs;
pub mod view;

pub use docs::ZelleIngestionDocs;
pub use view::ZelleReview;
