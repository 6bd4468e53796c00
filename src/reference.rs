//! Owner/repository resolution from explicit fields or a free-text reference.
//!
//! A reference string is tried against three forms, first match wins:
//!
//! 1. `https://github.com/<owner>/<repo>` (or `http://`)
//! 2. `github.com/<owner>/<repo>`
//! 3. `<owner>/<repo>`
//!
//! Surrounding whitespace and a single trailing slash are removed first.
//! Anything else (sub-paths, query strings, fragments) is rejected.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// A path segment: no separators, no whitespace, no query/fragment markers.
const SEGMENT: &str = r"([^/\s?#]+)";

fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            format!(r"^https?://github\.com/{SEGMENT}/{SEGMENT}$"),
            format!(r"^github\.com/{SEGMENT}/{SEGMENT}$"),
            format!(r"^{SEGMENT}/{SEGMENT}$"),
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static reference pattern"))
        .collect()
    })
}

/// A resolved `(owner, repo)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Build a pair from explicit fields. Both must be non-empty after trimming.
    pub fn new(owner: impl AsRef<str>, repo: impl AsRef<str>) -> Result<Self> {
        let owner = owner.as_ref().trim();
        let repo = repo.as_ref().trim();
        if owner.is_empty() || repo.is_empty() {
            return Err(Error::ValidationError(
                "both a GitHub owner and a repository name are required".into(),
            ));
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// `<owner>-<repo>`, used to name exported files.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_reference(s)
    }
}

/// Parse a free-text repository reference.
pub fn parse_reference(input: &str) -> Result<RepoRef> {
    let trimmed = input.trim();
    let normalized = trimmed.strip_suffix('/').unwrap_or(trimmed);

    for pattern in patterns() {
        if let Some(caps) = pattern.captures(normalized) {
            return Ok(RepoRef {
                owner: caps[1].to_string(),
                repo: caps[2].to_string(),
            });
        }
    }

    Err(Error::FormatError(format!(
        "could not parse {:?}; expected https://github.com/owner/repo, github.com/owner/repo or owner/repo",
        input
    )))
}

/// The two ways a user can name a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RepositoryInput {
    Manual { owner: String, repo: String },
    Reference { reference: String },
}

impl RepositoryInput {
    pub fn manual(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepositoryInput::Manual {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn reference(reference: impl Into<String>) -> Self {
        RepositoryInput::Reference {
            reference: reference.into(),
        }
    }

    /// Resolve to an `(owner, repo)` pair.
    ///
    /// An empty reference is a `ValidationError`; a non-empty one that matches
    /// no accepted form is a `FormatError`.
    pub fn resolve(&self) -> Result<RepoRef> {
        match self {
            RepositoryInput::Manual { owner, repo } => RepoRef::new(owner, repo),
            RepositoryInput::Reference { reference } => {
                if reference.trim().is_empty() {
                    return Err(Error::ValidationError(
                        "a GitHub repository link is required".into(),
                    ));
                }
                parse_reference(reference)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(owner: &str, repo: &str) -> RepoRef {
        RepoRef::new(owner, repo).unwrap()
    }

    #[test]
    fn all_three_forms_resolve_to_the_explicit_pair() {
        let cases = [
            ("octocat", "Hello-World"),
            ("rust-lang", "rust"),
            ("a_b.c", "x.y-z_1"),
        ];
        for (owner, repo) in cases {
            let expected = pair(owner, repo);
            for form in [
                format!("https://github.com/{owner}/{repo}"),
                format!("http://github.com/{owner}/{repo}"),
                format!("github.com/{owner}/{repo}"),
                format!("{owner}/{repo}"),
            ] {
                assert_eq!(parse_reference(&form).unwrap(), expected, "form {form}");
            }
        }
    }

    #[test]
    fn trims_whitespace_and_one_trailing_slash() {
        assert_eq!(
            parse_reference("  https://github.com/octocat/Spoon-Knife/ ").unwrap(),
            pair("octocat", "Spoon-Knife")
        );
        assert!(parse_reference("octocat/Spoon-Knife//").is_err());
    }

    #[test]
    fn rejects_unparseable_text() {
        match parse_reference("not a url") {
            Err(Error::FormatError(_)) => {}
            other => panic!("expected FormatError, got {:?}", other),
        }
    }

    #[test]
    fn rejects_extra_structure() {
        for bad in [
            "https://github.com/octocat/Hello-World/tree/main",
            "github.com/octocat/Hello-World/issues",
            "octocat/Hello-World?tab=readme",
            "https://github.com/octocat/Hello-World#readme",
            "https://gitlab.com/octocat/Hello-World",
            "octocat",
            "",
        ] {
            assert!(
                matches!(parse_reference(bad), Err(Error::FormatError(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn manual_mode_requires_both_fields() {
        let err = RepositoryInput::manual("octocat", "  ").resolve().unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        let err = RepositoryInput::manual("", "repo").resolve().unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[test]
    fn empty_reference_is_a_validation_error() {
        let err = RepositoryInput::reference("   ").resolve().unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
    }

    #[test]
    fn display_and_file_stem() {
        let r = pair("octocat", "Hello-World");
        assert_eq!(r.to_string(), "octocat/Hello-World");
        assert_eq!(r.file_stem(), "octocat-Hello-World");
        let parsed: RepoRef = "octocat/Hello-World".parse().unwrap();
        assert_eq!(parsed, r);
    }
}
