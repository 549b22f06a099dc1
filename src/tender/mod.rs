pub mod commands;
pub mod events;
pub mod model;
pub mod status;

pub use commands::TenderService;
pub use events::TenderEvent;
pub use model::{StoredStatus, Tender, TenderDraft, TenderPatch};
pub use status::{effective_status, EffectiveStatus};
