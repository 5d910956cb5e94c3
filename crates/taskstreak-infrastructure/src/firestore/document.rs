//! Task <-> Firestore document encoding.
//!
//! Dates are stored as `timestampValue` at midnight UTC. Documents written by
//! the earlier tracker (`task`, `status`, `date` fields) are still readable.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use taskstreak_domain::shared::{DomainError, TaskId};
use taskstreak_domain::task::Task;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_COMPLETED: &str = "completed";
pub const FIELD_COMPLETED_DATE: &str = "completed_date";
pub const FIELD_CREATED_DATE: &str = "created_date";
pub const FIELD_CREATED_AT: &str = "created_at";

const LEGACY_TITLE: &str = "task";
const LEGACY_STATUS: &str = "status";
const LEGACY_DATE: &str = "date";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirestoreDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<FirestoreDocument>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Request body for inserts: every field of the task.
pub fn encode_task(task: &Task) -> Value {
    json!({
        "fields": {
            FIELD_TITLE: { "stringValue": task.title() },
            FIELD_COMPLETED: { "booleanValue": task.is_completed() },
            FIELD_COMPLETED_DATE: encode_optional_date(task.completed_date()),
            FIELD_CREATED_DATE: encode_date(task.created_date()),
            FIELD_CREATED_AT: { "timestampValue": format_timestamp(task.created_at()) },
        }
    })
}

/// Request body for completion updates, paired with an update mask.
pub fn encode_completion(task: &Task) -> Value {
    json!({
        "fields": {
            FIELD_COMPLETED: { "booleanValue": task.is_completed() },
            FIELD_COMPLETED_DATE: encode_optional_date(task.completed_date()),
        }
    })
}

fn encode_date(date: NaiveDate) -> Value {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    json!({ "timestampValue": format_timestamp(midnight) })
}

fn encode_optional_date(date: Option<NaiveDate>) -> Value {
    match date {
        Some(date) => encode_date(date),
        None => json!({ "nullValue": null }),
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Last path segment of a document resource name.
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

pub fn decode_task(doc: &FirestoreDocument) -> Result<Task, DomainError> {
    let id = TaskId::from_string(document_id(&doc.name));
    let fields = &doc.fields;

    if fields.contains_key(FIELD_TITLE) {
        let title = string_field(fields, FIELD_TITLE)?;
        let completed = bool_field(fields, FIELD_COMPLETED)?;
        let completed_date = optional_date_field(fields, FIELD_COMPLETED_DATE)?;
        let created_date = date_field(fields, FIELD_CREATED_DATE)?;
        let created_at = match fields.get(FIELD_CREATED_AT) {
            Some(_) => timestamp_field(fields, FIELD_CREATED_AT)?,
            None => fallback_created_at(doc, created_date)?,
        };

        return Task::restore(id, title, completed, completed_date, created_date, created_at);
    }

    decode_legacy(id, doc)
}

fn decode_legacy(id: TaskId, doc: &FirestoreDocument) -> Result<Task, DomainError> {
    let fields = &doc.fields;
    let title = string_field(fields, LEGACY_TITLE)?;
    let date = date_field(fields, LEGACY_DATE)?;
    let completed = string_field(fields, LEGACY_STATUS)? == "completed";
    let created_at = fallback_created_at(doc, date)?;

    Task::restore(
        id,
        title,
        completed,
        completed.then_some(date),
        date,
        created_at,
    )
}

fn fallback_created_at(
    doc: &FirestoreDocument,
    created_date: NaiveDate,
) -> Result<DateTime<Utc>, DomainError> {
    match &doc.create_time {
        Some(raw) => parse_timestamp(raw),
        None => Ok(created_date.and_time(NaiveTime::MIN).and_utc()),
    }
}

fn typed<'a>(fields: &'a Map<String, Value>, name: &str, kind: &str) -> Result<&'a Value, DomainError> {
    fields
        .get(name)
        .and_then(|v| v.get(kind))
        .ok_or_else(|| DomainError::Deserialization(format!("Field '{}' is missing or not a {}", name, kind)))
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Result<String, DomainError> {
    typed(fields, name, "stringValue")?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DomainError::Deserialization(format!("Field '{}' is not a string", name)))
}

fn bool_field(fields: &Map<String, Value>, name: &str) -> Result<bool, DomainError> {
    typed(fields, name, "booleanValue")?
        .as_bool()
        .ok_or_else(|| DomainError::Deserialization(format!("Field '{}' is not a boolean", name)))
}

fn timestamp_field(fields: &Map<String, Value>, name: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = typed(fields, name, "timestampValue")?
        .as_str()
        .ok_or_else(|| DomainError::Deserialization(format!("Field '{}' is not a timestamp", name)))?;
    parse_timestamp(raw)
}

fn date_field(fields: &Map<String, Value>, name: &str) -> Result<NaiveDate, DomainError> {
    Ok(timestamp_field(fields, name)?.date_naive())
}

fn optional_date_field(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Option<NaiveDate>, DomainError> {
    match fields.get(name) {
        None => Ok(None),
        Some(value) if value.get("nullValue").is_some() => Ok(None),
        Some(_) => date_field(fields, name).map(Some),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DomainError::Deserialization(format!("Invalid timestamp '{}': {}", raw, e)))
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc(value: Value) -> FirestoreDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_encode_pending_task() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
        let task = Task::new("Write tests", today, now).unwrap();

        let body = encode_task(&task);

        assert_eq!(body["fields"]["title"]["stringValue"], "Write tests");
        assert_eq!(body["fields"]["completed"]["booleanValue"], false);
        assert!(body["fields"]["completed_date"]["nullValue"].is_null());
        assert!(body["fields"]["completed_date"].get("nullValue").is_some());
        assert_eq!(
            body["fields"]["created_date"]["timestampValue"],
            "2024-01-05T00:00:00.000000Z"
        );
        assert_eq!(
            body["fields"]["created_at"]["timestampValue"],
            "2024-01-05T09:30:00.000000Z"
        );
    }

    #[test]
    fn test_decode_current_schema() {
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/tasks/abc123",
            "fields": {
                "title": { "stringValue": "Read" },
                "completed": { "booleanValue": true },
                "completed_date": { "timestampValue": "2024-01-04T00:00:00Z" },
                "created_date": { "timestampValue": "2024-01-02T00:00:00Z" },
                "created_at": { "timestampValue": "2024-01-02T08:00:00.123456Z" }
            },
            "createTime": "2024-01-02T08:00:00.200000Z"
        }));

        let task = decode_task(&d).unwrap();

        assert_eq!(task.id().as_str(), "abc123");
        assert_eq!(task.title(), "Read");
        assert!(task.is_completed());
        assert_eq!(task.completed_date(), NaiveDate::from_ymd_opt(2024, 1, 4));
        assert_eq!(task.created_date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_decode_legacy_schema() {
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/tasks/legacy1",
            "fields": {
                "id": { "stringValue": "legacy1" },
                "task": { "stringValue": "Solved LeetCode #217" },
                "status": { "stringValue": "completed" },
                "date": { "timestampValue": "2023-11-20T00:00:00Z" }
            },
            "createTime": "2023-11-20T18:04:05Z"
        }));

        let task = decode_task(&d).unwrap();

        assert_eq!(task.title(), "Solved LeetCode #217");
        assert!(task.is_completed());
        assert_eq!(task.completed_date(), NaiveDate::from_ymd_opt(2023, 11, 20));
        assert_eq!(
            task.created_at(),
            Utc.with_ymd_and_hms(2023, 11, 20, 18, 4, 5).unwrap()
        );
    }

    #[test]
    fn test_decode_legacy_pending() {
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/tasks/legacy2",
            "fields": {
                "task": { "stringValue": "Gym" },
                "status": { "stringValue": "pending" },
                "date": { "timestampValue": "2023-11-21T00:00:00Z" }
            }
        }));

        let task = decode_task(&d).unwrap();
        assert!(!task.is_completed());
        assert_eq!(task.completed_date(), None);
    }

    #[test]
    fn test_decode_rejects_wrong_types() {
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/tasks/bad",
            "fields": {
                "title": { "integerValue": "7" },
                "completed": { "booleanValue": false },
                "created_date": { "timestampValue": "2024-01-02T00:00:00Z" }
            }
        }));

        assert!(matches!(decode_task(&d), Err(DomainError::Deserialization(_))));
    }

    #[test]
    fn test_decode_rejects_inconsistent_completion() {
        let d = doc(json!({
            "name": "projects/p/databases/(default)/documents/tasks/bad",
            "fields": {
                "title": { "stringValue": "x" },
                "completed": { "booleanValue": true },
                "completed_date": { "nullValue": null },
                "created_date": { "timestampValue": "2024-01-02T00:00:00Z" }
            }
        }));

        assert!(matches!(decode_task(&d), Err(DomainError::DataIntegrity(_))));
    }

    #[test]
    fn test_document_id_and_truncate() {
        assert_eq!(document_id("projects/p/databases/(default)/documents/tasks/x1"), "x1");
        assert_eq!(document_id("x2"), "x2");
        assert_eq!(truncate("héllo", 2), "hé");
    }
}
