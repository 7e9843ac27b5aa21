pub mod albums;
pub mod atomic;
pub mod error;
pub mod favorites;
