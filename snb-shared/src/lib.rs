pub mod models;
pub mod money;
pub mod pii;

pub use models::event::{ClubEvent, EventMedia, MediaKind};
pub use money::format_minor_units;
pub use pii::Secret;
