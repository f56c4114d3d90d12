pub mod auth;

pub use auth::DeliveryAuth;
