pub mod data;
pub mod normalizing;
pub mod persistence;
