pub mod handlers;

pub use handlers::{TenderQueries, UserTenderSummary};
