pub mod aggregate;

pub use aggregate::{
    can_submit, resolve_member_id, CreateTransactionRequest, CreateTransactionResponse, RowState,
    ZellePreviewItem, ZellePreviewResponse, PAYMENT_TYPES,
};
