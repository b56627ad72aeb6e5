pub mod aggregate;
pub mod status;

pub use aggregate::{Payment, PaymentListResponse, PaymentQuery, PAYMENT_METHODS};
pub use status::{PaymentStatus, PaymentSummary};
