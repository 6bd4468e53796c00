//! The card: a display-ready projection of `RepositoryMetadata`.
//!
//! A card is rebuilt from scratch on every successful lookup. It holds only
//! strings and flags so the terminal printer, the JSON output and the
//! rasterizer all draw from the same values.

pub mod locale;

pub use locale::Locale;

use serde::{Deserialize, Serialize};

use crate::github::RepositoryMetadata;

/// Which statistic a chip shows. Chips are always ordered as declared here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipKind {
    Stars,
    Forks,
    Language,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChip {
    pub kind: ChipKind,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Repository name, linked to `url`.
    pub title: String,
    pub url: String,
    /// The repository description, or the locale's placeholder.
    pub description: String,
    pub has_description: bool,
    /// Present-only statistics, in `ChipKind` order.
    pub chips: Vec<StatChip>,
    pub cta_label: String,
    pub cta_url: String,
    pub locale: Locale,
}

impl Card {
    pub fn from_metadata(meta: &RepositoryMetadata, locale: Locale) -> Self {
        let description = meta
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let mut chips = Vec::with_capacity(4);
        if let Some(stars) = meta.stargazers_count {
            chips.push(StatChip {
                kind: ChipKind::Stars,
                label: locale.stars(stars),
            });
        }
        if let Some(forks) = meta.forks_count {
            chips.push(StatChip {
                kind: ChipKind::Forks,
                label: locale.forks(forks),
            });
        }
        if let Some(language) = meta.language.as_deref().filter(|l| !l.trim().is_empty()) {
            chips.push(StatChip {
                kind: ChipKind::Language,
                label: language.to_string(),
            });
        }
        if let Some(updated) = &meta.updated_at {
            chips.push(StatChip {
                kind: ChipKind::Updated,
                label: locale.updated(updated),
            });
        }

        Card {
            title: meta.name.clone(),
            url: meta.html_url.clone(),
            description: description
                .unwrap_or(locale.description_placeholder())
                .to_string(),
            has_description: description.is_some(),
            chips,
            cta_label: locale.call_to_action().to_string(),
            cta_url: meta.html_url.clone(),
            locale,
        }
    }

    pub fn chip(&self, kind: ChipKind) -> Option<&StatChip> {
        self.chips.iter().find(|c| c.kind == kind)
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&self.url);
        out.push_str("\n\n");
        out.push_str(&self.description);
        out.push('\n');
        if !self.chips.is_empty() {
            out.push('\n');
            let labels: Vec<&str> = self.chips.iter().map(|c| c.label.as_str()).collect();
            out.push_str(&labels.join("  |  "));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&format!("{} -> {}\n", self.cta_label, self.cta_url));
        out
    }
}
