//! Client side of the شِعرُك emotion-to-poetry service: validates free text,
//! asks the backend for an emotion and a matching poem, and renders the
//! answer through a host-provided [`controller::View`].

pub mod client;
pub mod controller;
pub mod error;
pub mod locale;
pub mod model;
pub mod render;
pub mod validate;

pub use client::{ClientConfig, DEFAULT_API_BASE, HttpPoetryClient, PoetryApi};
pub use controller::{
    AnalysisController, ControllerConfig, ERROR_DISMISS_AFTER, Key, Submission, UiState, View,
};
pub use error::{AnalysisError, ClientError, ValidationError};
pub use locale::Locale;
pub use model::{AnalysisRequest, AnalysisResponse, HealthStatus, Poem, Probabilities, ServiceInfo};
pub use render::ResultView;
