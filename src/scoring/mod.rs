pub mod engine;
pub mod highlights;
pub mod movement;
pub mod types;

pub use engine::replay;
pub use types::{DailyHighlights, DailySnapshot, DayOutcome, Movement, Score, Standing, Upset};
