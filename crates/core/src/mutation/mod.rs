pub mod engine;
pub mod keyed;
pub mod path;
