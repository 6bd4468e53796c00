//! The controller that owns the view state and runs user actions.
//!
//! Each action handler catches its own errors: they end up as the inline
//! error, a notification, and a log line, never as a returned `Err`.

use chrono::Utc;
use log::{info, warn};

use crate::card::Card;
use crate::export::{BitmapRasterizer, ExportMode, ExportedImage, Exporter, Rasterizer};
use crate::github::RepositoryLookup;
use crate::state::ViewState;
use crate::{Error, RenderConfig};

pub struct Session<L, R = BitmapRasterizer> {
    state: ViewState,
    lookup: L,
    exporter: Exporter<R>,
}

impl<L: RepositoryLookup> Session<L> {
    pub fn new(lookup: L, config: RenderConfig) -> Self {
        Self::with_exporter(lookup, Exporter::new(config))
    }
}

impl<L: RepositoryLookup, R: Rasterizer> Session<L, R> {
    pub fn with_exporter(lookup: L, exporter: Exporter<R>) -> Self {
        Self {
            state: ViewState::new(exporter.config().locale),
            lookup,
            exporter,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Edit the form fields.
    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// Submit the form and fetch the repository.
    ///
    /// Returns the new card on success; on failure the reason is in
    /// `state().error`.
    pub async fn search(&mut self) -> Option<&Card> {
        self.state.notifications.expire(Utc::now());

        let repo = match self.state.begin_lookup(Utc::now()) {
            Ok(repo) => repo,
            Err(e) => {
                warn!("search rejected: {}", e);
                return None;
            }
        };

        let fetched = self.lookup.get_repository(&repo).await;
        match fetched {
            Ok(meta) => {
                info!("loaded {}", repo);
                self.state.lookup_succeeded(meta, Utc::now());
                self.state.card.as_ref()
            }
            Err(e) => {
                warn!("lookup of {} failed: {}", repo, e);
                self.state.lookup_failed(&e, Utc::now());
                None
            }
        }
    }

    /// Export the current card. On failure the reason is in `state().export_error`.
    pub fn export(&mut self, mode: ExportMode) -> Option<ExportedImage> {
        let now = Utc::now();
        self.state.notifications.expire(now);

        if let Err(e) = self.state.begin_export(now) {
            warn!("{} export rejected: {}", mode, e);
            return None;
        }

        let result = match &self.state.resolved {
            Some(repo) => self.exporter.export(self.state.card.as_ref(), repo, mode),
            None => Err(Error::ExportError("no repository resolved".into())),
        };

        match result {
            Ok(image) => {
                self.state.export_succeeded(mode, Utc::now());
                Some(image)
            }
            Err(e) => {
                warn!("{} export failed: {}", mode, e);
                self.state.export_failed(mode, &e, Utc::now());
                None
            }
        }
    }
}
