pub mod box_entry;
pub mod pokeapi;
pub mod pokemon;
