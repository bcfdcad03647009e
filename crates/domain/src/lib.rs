//! Domain layer for Céu Azul
//!
//! Contains the forecast model, city subscriptions, alerts and the
//! value objects that identify users and cities. No I/O lives here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
