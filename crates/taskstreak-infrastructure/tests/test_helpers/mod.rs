#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use taskstreak_infrastructure::persistence::repositories::SqliteTaskRepository;
use taskstreak_infrastructure::persistence::Database;

pub const TEST_RSA_KEY: &str = include_str!("../fixtures/test_rsa_key.pem");

/// Fresh in-memory database with migrations applied.
pub async fn setup_in_memory_repo() -> SqliteTaskRepository {
    let db = Database::in_memory().await.expect("Open in-memory DB");
    db.run_migrations().await.expect("Run migrations");
    SqliteTaskRepository::new(Arc::new(db.pool().clone()))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Service-account blob pointing its token endpoint at `token_uri`.
pub fn service_account_blob(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "task-tracker-app",
        "private_key_id": "test-key-1",
        "private_key": TEST_RSA_KEY,
        "client_email": "tracker@task-tracker-app.iam.gserviceaccount.com",
        "token_uri": token_uri,
    })
    .to_string()
}
