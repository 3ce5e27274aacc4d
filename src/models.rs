pub mod bookmark;
pub mod errors;
