pub mod profile;
pub mod user_event;

pub use profile::*;
pub use user_event::*;
