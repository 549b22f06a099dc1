pub mod commands;
pub mod model;
pub mod stats;

pub use commands::BidService;
pub use model::{Bid, BidDraft, BidStatus, BidderSnapshot};
pub use stats::BidStats;
