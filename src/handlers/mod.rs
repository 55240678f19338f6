pub mod auth;
pub mod box_entry;
pub mod pokemon;
