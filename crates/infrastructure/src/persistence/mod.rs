//! Persistence module
//!
//! SQLite-based storage for city forecast documents and device state.

pub mod city_store;
pub mod connection;
pub mod device_state_store;
pub mod migrations;

pub use city_store::SqliteCityStore;
pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use device_state_store::SqliteDeviceState;
