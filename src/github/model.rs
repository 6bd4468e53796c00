//! Repository metadata as returned by the provider's "get repository" endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public metadata for one repository.
///
/// Field names follow the provider's JSON. Counts and the update timestamp
/// are optional so a card can omit the matching chip when the provider does
/// not send them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub html_url: String,
}

/// Failure body sent with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderError {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_provider_payload_and_ignores_extra_fields() {
        let body = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "description": "This your first repo!",
            "stargazers_count": 80,
            "forks_count": 9,
            "language": "C",
            "updated_at": "2011-01-26T19:14:43Z",
            "html_url": "https://github.com/octocat/Hello-World",
            "owner": { "login": "octocat" }
        }"#;
        let meta: RepositoryMetadata = serde_json::from_str(body).unwrap();
        assert_eq!(meta.name, "Hello-World");
        assert_eq!(meta.stargazers_count, Some(80));
        assert_eq!(meta.forks_count, Some(9));
        assert_eq!(meta.language.as_deref(), Some("C"));
        assert_eq!(
            meta.updated_at.map(|t| t.to_rfc3339()),
            Some("2011-01-26T19:14:43+00:00".to_string())
        );
    }

    #[test]
    fn null_and_missing_optionals_are_none() {
        let body = r#"{
            "name": "x",
            "description": null,
            "language": null,
            "html_url": "https://github.com/a/x"
        }"#;
        let meta: RepositoryMetadata = serde_json::from_str(body).unwrap();
        assert!(meta.description.is_none());
        assert!(meta.language.is_none());
        assert!(meta.stargazers_count.is_none());
        assert!(meta.updated_at.is_none());
    }

    #[test]
    fn provider_error_message_is_optional() {
        let e: ProviderError = serde_json::from_str(r#"{"message":"Not Found"}"#).unwrap();
        assert_eq!(e.message.as_deref(), Some("Not Found"));
        let e: ProviderError = serde_json::from_str("{}").unwrap();
        assert!(e.message.is_none());
    }
}
