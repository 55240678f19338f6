pub mod box_store;
pub mod pokemon;
