pub mod contract;
pub mod listing;
pub mod recommendation;
