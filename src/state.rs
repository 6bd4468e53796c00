//! Serializable view state and the transitions user actions drive.
//!
//! Lookup: `Idle -> Loading -> Ready`, or back to `Idle` with `error` set.
//! Export, independently: `Idle -> Exporting -> Done | Failed`.
//!
//! Transitions take the current time explicitly so notification expiry is
//! reproducible in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::{Card, Locale};
use crate::export::ExportMode;
use crate::github::RepositoryMetadata;
use crate::notify::{NotificationKind, NotificationQueue};
use crate::reference::{RepoRef, RepositoryInput};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Separate owner and repository fields.
    #[default]
    Manual,
    /// One free-text reference.
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPhase {
    #[default]
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    #[default]
    Idle,
    Exporting,
    Done,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub mode: InputMode,
    pub owner: String,
    pub repo: String,
    pub reference: String,
    pub locale: Locale,
    pub lookup: LookupPhase,
    pub export: ExportPhase,
    /// The pair the current result was fetched for.
    pub resolved: Option<RepoRef>,
    pub result: Option<RepositoryMetadata>,
    pub card: Option<Card>,
    /// Inline error under the form.
    pub error: Option<String>,
    pub export_error: Option<String>,
    pub notifications: NotificationQueue,
}

impl ViewState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Default::default()
        }
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn set_manual(&mut self, owner: impl Into<String>, repo: impl Into<String>) {
        self.mode = InputMode::Manual;
        self.owner = owner.into();
        self.repo = repo.into();
    }

    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.mode = InputMode::Url;
        self.reference = reference.into();
    }

    /// The input the current mode reads from.
    pub fn input(&self) -> RepositoryInput {
        match self.mode {
            InputMode::Manual => RepositoryInput::manual(&self.owner, &self.repo),
            InputMode::Url => RepositoryInput::reference(&self.reference),
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.lookup != LookupPhase::Loading
    }

    /// Whether the export controls are enabled.
    pub fn can_export(&self) -> bool {
        self.card.is_some() && self.export != ExportPhase::Exporting
    }

    fn input_message(&self, err: &Error) -> String {
        match (err, self.mode) {
            (Error::FormatError(_), _) => self.locale.unparseable_reference().to_string(),
            (Error::ValidationError(_), InputMode::Manual) => {
                self.locale.missing_fields().to_string()
            }
            (Error::ValidationError(_), InputMode::Url) => {
                self.locale.missing_reference().to_string()
            }
            (other, _) => other.message(),
        }
    }

    /// Submit the form.
    ///
    /// Clears the previous result and error, resolves the input, and on
    /// success moves to `Loading` and returns the pair to fetch. In URL mode
    /// the manual fields are filled with the resolved pair.
    pub fn begin_lookup(&mut self, now: DateTime<Utc>) -> Result<RepoRef> {
        if !self.can_submit() {
            return Err(Error::ValidationError("a lookup is already in progress".into()));
        }

        self.error = None;
        self.export_error = None;
        self.result = None;
        self.card = None;
        self.resolved = None;
        self.export = ExportPhase::Idle;

        match self.input().resolve() {
            Ok(repo) => {
                if self.mode == InputMode::Url {
                    self.owner = repo.owner.clone();
                    self.repo = repo.repo.clone();
                }
                self.resolved = Some(repo.clone());
                self.lookup = LookupPhase::Loading;
                Ok(repo)
            }
            Err(err) => {
                let message = self.input_message(&err);
                self.notifications.push(NotificationKind::Error, message.clone(), now);
                self.error = Some(message);
                self.lookup = LookupPhase::Idle;
                Err(err)
            }
        }
    }

    /// The fetch finished. The metadata replaces any previous result.
    pub fn lookup_succeeded(&mut self, meta: RepositoryMetadata, now: DateTime<Utc>) {
        if self.lookup != LookupPhase::Loading {
            return;
        }
        self.card = Some(Card::from_metadata(&meta, self.locale));
        self.result = Some(meta);
        self.lookup = LookupPhase::Ready;
        self.notifications
            .push(NotificationKind::Success, self.locale.lookup_succeeded(), now);
    }

    pub fn lookup_failed(&mut self, err: &Error, now: DateTime<Utc>) {
        if self.lookup != LookupPhase::Loading {
            return;
        }
        let message = err.message();
        self.error = Some(self.locale.lookup_failed_inline(&message));
        self.notifications
            .push(NotificationKind::Error, self.locale.lookup_failed(&message), now);
        self.lookup = LookupPhase::Idle;
    }

    /// Press an export button.
    pub fn begin_export(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.export == ExportPhase::Exporting {
            return Err(Error::ExportError("an export is already in progress".into()));
        }
        if self.card.is_none() {
            let message = self.locale.nothing_to_export();
            self.notifications.push(NotificationKind::Error, message, now);
            self.export_error = Some(message.to_string());
            self.export = ExportPhase::Failed;
            return Err(Error::ExportError("no card to export".into()));
        }
        self.export_error = None;
        self.export = ExportPhase::Exporting;
        Ok(())
    }

    pub fn export_succeeded(&mut self, mode: ExportMode, now: DateTime<Utc>) {
        self.export = ExportPhase::Done;
        self.notifications
            .push(NotificationKind::Success, self.locale.export_succeeded(mode), now);
    }

    pub fn export_failed(&mut self, mode: ExportMode, err: &Error, now: DateTime<Utc>) {
        let message = self.locale.export_failed(mode, &err.message());
        self.notifications.push(NotificationKind::Error, message.clone(), now);
        self.export_error = Some(message);
        self.export = ExportPhase::Failed;
    }
}
