//! HTTP client for the provider's "get repository" endpoint.

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::header::ACCEPT;
use reqwest::Client;
use url::Url;

use super::model::{ProviderError, RepositoryMetadata};
use crate::reference::RepoRef;
use crate::{ClientConfig, Error, Result};

/// Anything that can turn an `(owner, repo)` pair into metadata.
///
/// `GithubClient` is the network implementation; tests and offline callers
/// can substitute their own.
#[allow(async_fn_in_trait)]
pub trait RepositoryLookup {
    /// Fetch metadata for one repository. A single attempt, no retries.
    async fn get_repository(&self, repo: &RepoRef) -> Result<RepositoryMetadata>;
}

/// Read-only client for `GET {api_base}/repos/{owner}/{repo}`.
pub struct GithubClient {
    client: Client,
    config: ClientConfig,
    api_base: Url,
}

impl GithubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_base = Url::parse(&config.api_base).map_err(|e| {
            Error::ConfigError(format!("invalid API base {:?}: {}", config.api_base, e))
        })?;
        if api_base.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "API base {:?} cannot carry a path",
                config.api_base
            )));
        }

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_base,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The exact URL a lookup for `repo` requests. Segments are percent-encoded.
    pub fn repository_url(&self, repo: &RepoRef) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::ConfigError("API base cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.repo.as_str()]);
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() && self.config.timeout_ms > 0 {
            Error::Timeout(self.config.timeout_ms)
        } else {
            Error::LookupError(err.to_string())
        }
    }
}

impl RepositoryLookup for GithubClient {
    async fn get_repository(&self, repo: &RepoRef) -> Result<RepositoryMetadata> {
        let url = self.repository_url(repo)?;
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/vnd.github+json");
        for (name, value) in &self.config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("GitHub API error: {}", status.as_u16()));
            warn!("lookup of {} failed with {}: {}", repo, status, message);
            return Err(Error::LookupError(message));
        }

        let metadata = response
            .json::<RepositoryMetadata>()
            .await
            .map_err(|e| self.transport_error(e))?;
        info!("fetched {} ({:?} stars)", repo, metadata.stargazers_count);
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GithubClient {
        GithubClient::new(ClientConfig {
            api_base: base.to_string(),
            ..Default::default()
        })
        .expect("client")
    }

    #[test]
    fn builds_canonical_repository_url() {
        let c = client("https://api.github.com");
        let r = RepoRef::new("octocat", "Hello-World").unwrap();
        assert_eq!(
            c.repository_url(&r).unwrap().as_str(),
            "https://api.github.com/repos/octocat/Hello-World"
        );
    }

    #[test]
    fn keeps_api_base_path_prefix() {
        let c = client("https://ghe.example.com/api/v3/");
        let r = RepoRef::new("team", "tool").unwrap();
        assert_eq!(
            c.repository_url(&r).unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/team/tool"
        );
    }

    #[test]
    fn encodes_unusual_segments() {
        let c = client("https://api.github.com");
        let r = RepoRef::new("we ird", "re%po").unwrap();
        assert_eq!(
            c.repository_url(&r).unwrap().as_str(),
            "https://api.github.com/repos/we%20ird/re%25po"
        );
    }

    #[test]
    fn rejects_invalid_api_base() {
        let err = GithubClient::new(ClientConfig {
            api_base: "not a base".into(),
            ..Default::default()
        })
        .err()
        .expect("should fail");
        assert!(matches!(err, Error::ConfigError(_)));

        let err = GithubClient::new(ClientConfig {
            api_base: "mailto:someone@example.com".into(),
            ..Default::default()
        })
        .err()
        .expect("should fail");
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
