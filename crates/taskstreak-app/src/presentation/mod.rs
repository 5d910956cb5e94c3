pub mod bootstrap;
pub mod error;
pub mod routes;
pub mod state;
