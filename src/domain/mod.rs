pub mod album;
pub mod favorite;
