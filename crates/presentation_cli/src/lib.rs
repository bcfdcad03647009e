//! Céu Azul command-line client
//!
//! Plays the role of the mobile app: keeps a device user id, polls the
//! backend for severe-weather alerts and searches cities.

pub mod cli;
pub mod render;
pub mod tasks;

pub use cli::{Cli, Commands};
pub use tasks::{spawn_background_sync, spawn_foreground_sync};
