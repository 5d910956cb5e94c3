pub mod config;
pub mod firestore;
pub mod logging;
pub mod persistence;
