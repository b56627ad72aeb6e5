pub mod aggregate;

pub use aggregate::{
    details_summary, details_text, ActionKind, ActivityLog, ActivityLogListResponse, ActivityLogQuery, EntityId,
    ENTITY_TYPES,
};
