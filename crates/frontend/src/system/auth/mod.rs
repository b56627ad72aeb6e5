//! Sign-in against the identity provider and the session that backs every
//! API request.

pub mod api;
pub mod context;
pub mod guard;
pub mod storage;
pub mod token;
