use serde::Deserialize;
use taskstreak_domain::shared::DomainError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The fields of a service-account key file this adapter needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_json(blob: &str) -> Result<Self, DomainError> {
        let key: ServiceAccountKey = serde_json::from_str(blob).map_err(|e| {
            DomainError::Deserialization(format!("Invalid service account credentials: {}", e))
        })?;

        if key.client_email.trim().is_empty() {
            return Err(DomainError::Validation(
                "Service account client_email is empty".to_string(),
            ));
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(DomainError::Validation(
                "Service account private_key is not a PEM key".to_string(),
            ));
        }

        Ok(key)
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}
