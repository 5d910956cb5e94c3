//! Remote task store on Firestore (REST v1).

mod auth;
mod credentials;
mod document;
mod repository;

pub use auth::{ServiceAccountAuth, TokenSource};
pub use credentials::ServiceAccountKey;
pub use repository::FirestoreTaskRepository;
