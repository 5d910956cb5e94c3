use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use super::auth::TokenSource;
use super::credentials::ServiceAccountKey;
use super::document::{
    self, truncate, ListDocumentsResponse, FirestoreDocument, FIELD_COMPLETED,
    FIELD_COMPLETED_DATE,
};
use crate::config::{FirestoreSettings, TimeoutConfig};
use crate::persistence::ResultExt;
use taskstreak_domain::shared::{DomainError, TaskId};
use taskstreak_domain::task::{Task, TaskRepository};

const PAGE_SIZE: &str = "300";

/// Task store backed by the Firestore REST API.
pub struct FirestoreTaskRepository {
    client: reqwest::Client,
    tokens: TokenSource,
    collection_url: Url,
}

impl FirestoreTaskRepository {
    pub fn new(
        base_url: &str,
        project_id: &str,
        collection: &str,
        tokens: TokenSource,
    ) -> Result<Self, DomainError> {
        let mut collection_url = Url::parse(base_url)
            .map_err(|e| DomainError::Validation(format!("Invalid base_url '{}': {}", base_url, e)))?;
        collection_url
            .path_segments_mut()
            .map_err(|_| DomainError::Validation(format!("base_url '{}' cannot hold a path", base_url)))?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                project_id,
                "databases",
                "(default)",
                "documents",
                collection,
            ]);

        let timeouts = TimeoutConfig::global();
        let client = reqwest::Client::builder()
            .timeout(timeouts.http_request)
            .connect_timeout(timeouts.http_connect)
            .build()
            .to_infra_err()?;

        info!(
            "🔧 Firestore store: {} ({:?})",
            collection_url, tokens
        );

        Ok(Self {
            client,
            tokens,
            collection_url,
        })
    }

    /// Build from configuration and the (optional) credential blob.
    ///
    /// Emulator mode needs only a project id. Otherwise the blob is required
    /// and its `project_id` is used when the settings carry none.
    pub fn from_settings(
        settings: &FirestoreSettings,
        credentials: Option<&str>,
    ) -> Result<Self, DomainError> {
        if settings.emulator {
            let project_id = settings.project_id.as_deref().ok_or_else(|| {
                DomainError::Validation("firestore.project_id is required in emulator mode".to_string())
            })?;
            return Self::new(
                &settings.base_url,
                project_id,
                &settings.collection,
                TokenSource::Emulator,
            );
        }

        let blob = credentials.ok_or_else(|| {
            DomainError::Validation(
                "No service account credentials; set TASKSTREAK_CREDENTIALS or firestore.credentials_path"
                    .to_string(),
            )
        })?;
        let key = ServiceAccountKey::from_json(blob)?;

        let project_id = settings
            .project_id
            .clone()
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| {
                DomainError::Validation("No Firestore project_id configured".to_string())
            })?;

        Self::new(
            &settings.base_url,
            &project_id,
            &settings.collection,
            TokenSource::service_account(key)?,
        )
    }

    /// URL of the document holding `id`, or `None` when no Firestore
    /// document can carry that id. Such a task cannot exist in the store.
    fn document_url(&self, id: &TaskId) -> Option<Url> {
        let id = id.as_str();
        if id.is_empty() || id == "." || id == ".." || id.contains('/') {
            return None;
        }

        let mut url = self.collection_url.clone();
        url.path_segments_mut().ok()?.push(id);
        Some(url)
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response, DomainError> {
        let bearer = self.tokens.bearer().await?;
        request
            .bearer_auth(bearer)
            .send()
            .await
            .to_store_err(operation)
    }

    /// Map a non-success response to a domain error. `id` is set for calls
    /// where 404 means the task does not exist.
    async fn check(
        response: Response,
        operation: &str,
        id: Option<&TaskId>,
    ) -> Result<Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(DomainError::NotFound(id.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{} returned {}: {}", operation, status, truncate(&body, 300));
        Err(DomainError::StoreUnavailable(format!(
            "{} failed with status {}",
            operation, status
        )))
    }

    fn log_elapsed(operation: &str, start: Instant) {
        info!(
            "📊 {}: {:.2}ms",
            operation,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }
}

#[async_trait]
impl TaskRepository for FirestoreTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), DomainError> {
        let start = Instant::now();
        let request = self
            .client
            .post(self.collection_url.clone())
            .query(&[("documentId", task.id().as_str())])
            .json(&document::encode_task(task));

        let response = self.send(request, "Insert task").await?;
        Self::check(response, "Insert task", None).await?;

        Self::log_elapsed(&format!("insert({})", task.id()), start);
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        let start = Instant::now();
        let Some(url) = self.document_url(id) else {
            debug!("find_by_id({}): not a valid document id", id);
            return Ok(None);
        };
        let request = self.client.get(url);

        let response = self.send(request, "Get task").await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check(response, "Get task", None).await?;

        let doc: FirestoreDocument = response.json().await.to_store_err("Decode task")?;
        let task = document::decode_task(&doc)?;

        Self::log_elapsed(&format!("find_by_id({})", id), start);
        Ok(Some(task))
    }

    async fn find_all(&self) -> Result<Vec<Task>, DomainError> {
        let start = Instant::now();
        let mut tasks = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut request = self
                .client
                .get(self.collection_url.clone())
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = self.send(request, "List tasks").await?;
            let response = Self::check(response, "List tasks", None).await?;
            let page: ListDocumentsResponse =
                response.json().await.to_store_err("Decode task list")?;
            pages += 1;

            for doc in &page.documents {
                tasks.push(document::decode_task(doc)?);
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(
            "📊 find_all(): {:.2}ms, {} tasks loaded in {} page(s)",
            start.elapsed().as_secs_f64() * 1000.0,
            tasks.len(),
            pages
        );
        Ok(tasks)
    }

    async fn update_completion(&self, task: &Task) -> Result<(), DomainError> {
        let start = Instant::now();
        let url = self
            .document_url(task.id())
            .ok_or_else(|| DomainError::NotFound(task.id().to_string()))?;
        let request = self
            .client
            .patch(url)
            .query(&[
                ("updateMask.fieldPaths", FIELD_COMPLETED),
                ("updateMask.fieldPaths", FIELD_COMPLETED_DATE),
                ("currentDocument.exists", "true"),
            ])
            .json(&document::encode_completion(task));

        let response = self.send(request, "Update task completion").await?;
        Self::check(response, "Update task completion", Some(task.id())).await?;

        Self::log_elapsed(
            &format!("update_completion({}, completed={})", task.id(), task.is_completed()),
            start,
        );
        Ok(())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError> {
        let start = Instant::now();
        let url = self
            .document_url(id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        let request = self
            .client
            .delete(url)
            .query(&[("currentDocument.exists", "true")]);

        let response = self.send(request, "Delete task").await?;
        Self::check(response, "Delete task", Some(id)).await?;

        Self::log_elapsed(&format!("delete({})", id), start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_and_document_urls() {
        let repo = FirestoreTaskRepository::new(
            "http://localhost:8080",
            "task-tracker-app",
            "tasks",
            TokenSource::Emulator,
        )
        .unwrap();

        assert_eq!(
            repo.collection_url.as_str(),
            "http://localhost:8080/v1/projects/task-tracker-app/databases/(default)/documents/tasks"
        );
        assert_eq!(
            repo.document_url(&TaskId::from_string("abc")).unwrap().path(),
            "/v1/projects/task-tracker-app/databases/(default)/documents/tasks/abc"
        );
    }

    #[test]
    fn test_document_url_rejects_impossible_ids() {
        let repo =
            FirestoreTaskRepository::new("http://localhost:8080", "p", "tasks", TokenSource::Emulator)
                .unwrap();
        for id in ["", ".", "..", "a/b"] {
            assert!(repo.document_url(&TaskId::from_string(id)).is_none(), "id {:?}", id);
        }

        let url = repo.document_url(&TaskId::from_string("a b")).unwrap();
        assert!(url.path().ends_with("/tasks/a%20b"));
        let url = repo.document_url(&TaskId::from_string("...")).unwrap();
        assert!(url.path().ends_with("/tasks/..."));
    }

    #[test]
    fn test_from_settings_requires_credentials() {
        let settings = FirestoreSettings::default();
        assert!(matches!(
            FirestoreTaskRepository::from_settings(&settings, None),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_from_settings_emulator_requires_project() {
        let settings = FirestoreSettings {
            emulator: true,
            ..Default::default()
        };
        assert!(FirestoreTaskRepository::from_settings(&settings, None).is_err());

        let settings = FirestoreSettings {
            emulator: true,
            project_id: Some("demo".to_string()),
            base_url: "http://127.0.0.1:8080".to_string(),
            ..Default::default()
        };
        assert!(FirestoreTaskRepository::from_settings(&settings, None).is_ok());
    }
}
