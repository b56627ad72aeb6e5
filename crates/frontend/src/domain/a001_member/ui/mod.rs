pub mod dependents;
pub mod details;
pub mod list;
pub mod welcome_note;
