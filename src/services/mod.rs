pub mod delivery_auth;
pub mod profile_initializer;
pub mod profile_store;

pub use profile_initializer::*;
pub use profile_store::ProfileStore;
