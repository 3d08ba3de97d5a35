pub mod head_to_head;

pub use head_to_head::{HeadToHeadRecord, OpponentTally, aggregate};
