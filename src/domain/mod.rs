pub mod models;

pub use models::{Match, RawRow};
