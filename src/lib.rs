//! RepoCard
//!
//! Fetch public metadata for a GitHub repository and render it as a card that
//! can be printed, serialized, or exported as a PNG image.
//!
//! # Features
//!
//! - **Reference parsing**: `owner/repo`, `github.com/owner/repo` or a full URL
//! - **Lookup client**: one read-only request per search, provider messages
//!   surfaced verbatim on failure
//! - **Export**: deterministic PNG rendering at a supersampling scale
//! - **Session**: a serializable view state driven by pure transitions
//!
//! # Example
//!
//! ```no_run
//! use repocard::{ClientConfig, GithubClient, RepositoryLookup, RepositoryInput};
//!
//! # async fn run() -> repocard::Result<()> {
//! let client = GithubClient::new(ClientConfig::default())?;
//! let repo = RepositoryInput::reference("https://github.com/octocat/Hello-World").resolve()?;
//! let meta = client.get_repository(&repo).await?;
//! println!("{} has {:?} stars", meta.name, meta.stargazers_count);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

pub mod error;
pub use error::{Error, Result};

pub mod card;
pub mod export;
pub mod github;
pub mod notify;
pub mod reference;
pub mod rendering;
pub mod session;
pub mod state;

pub use card::{Card, ChipKind, Locale, StatChip};
pub use export::{ExportMode, ExportedImage, Exporter, Rasterizer};
pub use github::{GithubClient, RepositoryLookup, RepositoryMetadata};
pub use notify::{Notification, NotificationKind, NotificationQueue};
pub use reference::{parse_reference, RepoRef, RepositoryInput};
pub use session::Session;
pub use state::{ExportPhase, InputMode, LookupPhase, ViewState};

/// Configuration for the lookup client
///
/// The defaults target the public GitHub API. A timeout of zero disables
/// the client-side timeout entirely.
///
/// # Examples
///
/// ```
/// let cfg = repocard::ClientConfig::default();
/// assert_eq!(cfg.api_base, "https://api.github.com");
/// assert!(cfg.token.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the metadata API
    pub api_base: String,
    /// User agent string sent with every request
    pub user_agent: String,
    /// Request timeout in milliseconds (0 => no timeout)
    pub timeout_ms: u64,
    /// Optional bearer token for higher rate limits
    pub token: Option<String>,
    /// Extra HTTP headers
    pub headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            user_agent: concat!("repocard/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 30000,
            token: None,
            headers: HashMap::new(),
        }
    }
}

/// Configuration for card rendering and export
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub locale: Locale,
    /// Supersampling factor applied to every exported pixel
    pub scale: u32,
    /// Card width in the standard export
    pub card_width: u32,
    /// Margin around the card in the standard export
    pub outer_padding: u32,
    /// Card width as displayed, used by the simple export
    pub display_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            scale: 2,
            card_width: 400,
            outer_padding: 40,
            display_width: 448,
        }
    }
}

impl RenderConfig {
    pub const MAX_SCALE: u32 = 8;
    pub const MIN_WIDTH: u32 = 160;
    pub const MAX_WIDTH: u32 = 2048;
    pub const MAX_PADDING: u32 = 512;

    pub fn validate(&self) -> Result<()> {
        if self.scale == 0 || self.scale > Self::MAX_SCALE {
            return Err(Error::ConfigError(format!(
                "scale must be between 1 and {}, got {}",
                Self::MAX_SCALE,
                self.scale
            )));
        }
        let widths = [
            ("card_width", self.card_width),
            ("display_width", self.display_width),
        ];
        for (name, width) in widths {
            if !(Self::MIN_WIDTH..=Self::MAX_WIDTH).contains(&width) {
                return Err(Error::ConfigError(format!(
                    "{} must be between {} and {}, got {}",
                    name,
                    Self::MIN_WIDTH,
                    Self::MAX_WIDTH,
                    width
                )));
            }
        }
        if self.outer_padding > Self::MAX_PADDING {
            return Err(Error::ConfigError(format!(
                "outer_padding must be at most {}, got {}",
                Self::MAX_PADDING,
                self.outer_padding
            )));
        }
        Ok(())
    }
}
