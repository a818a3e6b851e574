pub mod platform;
pub mod post;
