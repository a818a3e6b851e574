pub mod display_helpers;
pub mod serde_helpers;
pub mod string_helpers;
