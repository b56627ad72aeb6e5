pub mod aggregate;
pub mod stats;

pub use aggregate::{Member, MemberListResponse, MemberResponse, MemberUpdate, WelcomeNote};
pub use stats::MemberStats;
