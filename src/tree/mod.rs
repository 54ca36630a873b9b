pub mod predict;
pub mod tree;

// private modules
mod setters;
