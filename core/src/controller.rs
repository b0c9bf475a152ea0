//! The analysis form: three triggers (submit, clear, Enter) and a startup
//! health probe wired to one backend call.
//!
//! The controller never reaches for global UI state. Everything it shows goes
//! through the [`View`] handed to [`AnalysisController::new`], so a host can be
//! a terminal, a web page bridge, or a recording double in tests.

use crate::client::PoetryApi;
use crate::error::{AnalysisError, ClientError};
use crate::locale::Locale;
use crate::model::{AnalysisRequest, HealthStatus};
use crate::render::ResultView;
use crate::validate::validate_input;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::instrument;

/// How long an error banner stays up.
pub const ERROR_DISMISS_AFTER: Duration = Duration::from_secs(5);

/// Where the form currently is. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum UiState {
    Idle,
    Loading,
    ShowingResult,
    ShowingError,
}

/// Handles onto the page the controller drives.
///
/// Calls are made while the controller holds its internal lock, so an
/// implementation must not call back into the controller.
pub trait View: Send + Sync {
    fn input_text(&self) -> String;
    fn set_input_text(&self, text: &str);
    /// Spinner visibility.
    fn set_loading(&self, loading: bool);
    fn set_trigger_enabled(&self, enabled: bool);
    fn show_result(&self, result: &ResultView);
    fn hide_result(&self);
    fn show_error(&self, message: &str);
    fn hide_error(&self);
    fn scroll_result_into_view(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Rendered(ResultView),
    /// The form was cleared while the request was in flight.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub locale: Locale,
    pub error_dismiss_after: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            error_dismiss_after: ERROR_DISMISS_AFTER,
        }
    }
}

#[derive(Debug, Default)]
struct Panels {
    loading: bool,
    result: bool,
    error: bool,
}

struct Inner<A, V> {
    api: A,
    view: V,
    config: ControllerConfig,
    panels: Mutex<Panels>,
    /// Bumped on every submit and every clear. A response is rendered only if
    /// the counter still holds the value its submit produced.
    submission: AtomicU64,
    /// Bumped on every banner change. A dismiss timer only hides the banner
    /// it was started for.
    banner: AtomicU64,
}

pub struct AnalysisController<A, V> {
    inner: Arc<Inner<A, V>>,
}

impl<A, V> Clone for AnalysisController<A, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A, V> AnalysisController<A, V>
where
    A: PoetryApi + 'static,
    V: View + 'static,
{
    pub fn new(api: A, view: V, config: ControllerConfig) -> Self {
        view.set_loading(false);
        view.set_trigger_enabled(true);
        Self {
            inner: Arc::new(Inner {
                api,
                view,
                config,
                panels: Mutex::new(Panels::default()),
                submission: AtomicU64::new(0),
                banner: AtomicU64::new(0),
            }),
        }
    }

    pub fn view(&self) -> &V {
        &self.inner.view
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn locale(&self) -> Locale {
        self.inner.config.locale
    }

    fn panels(&self) -> MutexGuard<'_, Panels> {
        self.inner
            .panels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> UiState {
        let panels = self.panels();
        if panels.loading {
            UiState::Loading
        } else if panels.error {
            UiState::ShowingError
        } else if panels.result {
            UiState::ShowingResult
        } else {
            UiState::Idle
        }
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.panels().loading
    }

    /// Submit button.
    pub async fn on_submit_clicked(&self) -> Result<Submission, AnalysisError> {
        let raw = self.inner.view.input_text();
        self.submit_analysis(&raw).await
    }

    /// Enter submits, Shift+Enter does not. Returns `None` when the key was
    /// not a submit.
    pub async fn on_key_press(
        &self,
        key: Key,
        shift: bool,
    ) -> Option<Result<Submission, AnalysisError>> {
        if key != Key::Enter || shift {
            return None;
        }
        Some(self.on_submit_clicked().await)
    }

    /// Validate `raw`, post it to the backend and render the answer.
    ///
    /// Validation and network failures are shown to the user as transient
    /// banners before being returned; callers only need the `Err` for logging
    /// or tests. A submit while another is in flight is refused with
    /// [`AnalysisError::Busy`] and touches nothing.
    #[instrument(skip_all)]
    pub async fn submit_analysis(&self, raw: &str) -> Result<Submission, AnalysisError> {
        let catalog = self.inner.config.locale.catalog();
        let view = &self.inner.view;

        let (validated, token) = {
            let mut panels = self.panels();
            if panels.loading {
                tracing::debug!("submit ignored, request already in flight");
                return Err(AnalysisError::Busy);
            }
            panels.result = false;
            panels.error = false;
            view.hide_result();
            view.hide_error();

            match validate_input(raw) {
                Ok(text) => {
                    panels.loading = true;
                    view.set_loading(true);
                    view.set_trigger_enabled(false);
                    let token = self.inner.submission.fetch_add(1, Ordering::SeqCst) + 1;
                    (Ok(text.to_owned()), token)
                }
                Err(e) => (Err(e), 0),
            }
        };

        let text = match validated {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(reason = %e, "input rejected");
                self.show_transient_error(catalog.validation_message(e));
                return Err(e.into());
            }
        };

        tracing::info!(chars = text.chars().count(), "submitting text for analysis");
        let outcome = self.inner.api.get_poetry(&AnalysisRequest { text }).await;

        let mut panels = self.panels();
        panels.loading = false;
        view.set_loading(false);
        view.set_trigger_enabled(true);

        if self.inner.submission.load(Ordering::SeqCst) != token {
            tracing::info!("form was cleared while waiting, discarding response");
            return Ok(Submission::Discarded);
        }

        match outcome {
            Ok(response) => {
                let result = ResultView::from_response(&response, self.inner.config.locale);
                panels.result = true;
                view.show_result(&result);
                view.scroll_result_into_view();
                Ok(Submission::Rendered(result))
            }
            Err(e) => {
                drop(panels);
                tracing::error!(error = %e, "analysis request failed");
                self.show_transient_error(catalog.connectivity);
                Err(e.into())
            }
        }
    }

    /// Clear button: empty the field, hide both panels and orphan any
    /// request still in flight.
    pub fn clear(&self) {
        let mut panels = self.panels();
        self.inner.submission.fetch_add(1, Ordering::SeqCst);
        self.inner.banner.fetch_add(1, Ordering::SeqCst);
        panels.result = false;
        panels.error = false;

        let view = &self.inner.view;
        view.set_input_text("");
        view.hide_result();
        view.hide_error();
    }

    /// Show `message` now and hide it after the configured delay, unless a
    /// newer banner replaced it in the meantime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show_transient_error(&self, message: &str) {
        let generation = {
            let mut panels = self.panels();
            let generation = self.inner.banner.fetch_add(1, Ordering::SeqCst) + 1;
            panels.error = true;
            self.inner.view.show_error(message);
            generation
        };

        let controller = self.clone();
        let delay = self.inner.config.error_dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            controller.dismiss_error(generation);
        });
    }

    fn dismiss_error(&self, generation: u64) -> bool {
        let mut panels = self.panels();
        if self.inner.banner.load(Ordering::SeqCst) != generation {
            return false;
        }
        panels.error = false;
        self.inner.view.hide_error();
        true
    }

    /// Startup probe. Never gates the form; a failure only raises a warning
    /// banner.
    #[instrument(skip_all)]
    pub async fn check_backend_health(&self) -> Result<HealthStatus, ClientError> {
        let catalog = self.inner.config.locale.catalog();
        match self.inner.api.health().await {
            Ok(health) => {
                tracing::info!(status = ?health.status, "API connected");
                Ok(health)
            }
            Err(e @ ClientError::Status(_)) => {
                tracing::warn!(error = %e, "backend health check failed");
                self.show_transient_error(catalog.health_warning);
                Err(e)
            }
            Err(e) => {
                tracing::warn!(error = %e, "backend unreachable");
                self.show_transient_error(catalog.health_unreachable);
                Err(e)
            }
        }
    }
}
