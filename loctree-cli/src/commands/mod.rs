pub mod languages;
pub mod sync;
