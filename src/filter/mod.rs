pub mod position_filter;
pub mod prefix_filter;

pub use position_filter::PositionFilter;
pub use prefix_filter::prefix_filter_candidates;
