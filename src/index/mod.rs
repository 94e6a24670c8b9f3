pub mod position_index;
pub mod prefix_index;

pub use position_index::PositionIndex;
pub use prefix_index::PrefixIndex;
