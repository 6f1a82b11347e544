pub mod option;
pub mod quote;
pub mod selection;

pub use option::{EventOption, OptionKind, OptionSet};
pub use quote::Quote;
pub use selection::{SelectionError, SelectionState};
