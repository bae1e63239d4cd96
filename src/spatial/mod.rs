pub mod dirty;
pub mod grid;
pub mod tiles;
