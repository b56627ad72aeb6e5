pub mod aggregate;

pub use aggregate::{Dependent, NewDependent, RELATIONSHIPS};
