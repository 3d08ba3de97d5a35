pub mod grouping;
pub mod normalize;

pub use grouping::by_day;
pub use normalize::normalize;
