pub mod add_modal;

pub use add_modal::AddDependentModal;
