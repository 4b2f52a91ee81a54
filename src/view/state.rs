use std::sync::Arc;

use crate::models::ResolvedCatalog;
use crate::utils::error::ViewError;

/// Message shown to users whenever the catalog could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch product data. Please try again later.";

/// Lifecycle of the catalog as seen by the UI.
///
/// `Idle -> Loading -> Ready | Failed`. Both terminal states are final.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<ResolvedCatalog>),
    Failed(String),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Failed(_) => "failed",
        }
    }

    pub fn begin_loading(&mut self) -> Result<(), ViewError> {
        match self {
            ViewState::Idle => {
                *self = ViewState::Loading;
                Ok(())
            }
            other => Err(ViewError::InvalidTransition {
                from: other.name(),
                to: "loading",
            }),
        }
    }

    pub fn complete(&mut self, catalog: ResolvedCatalog) -> Result<(), ViewError> {
        match self {
            ViewState::Loading => {
                *self = ViewState::Ready(Arc::new(catalog));
                Ok(())
            }
            other => Err(ViewError::InvalidTransition {
                from: other.name(),
                to: "ready",
            }),
        }
    }

    pub fn fail(&mut self) -> Result<(), ViewError> {
        match self {
            ViewState::Loading => {
                *self = ViewState::Failed(LOAD_FAILED_MESSAGE.to_string());
                Ok(())
            }
            other => Err(ViewError::InvalidTransition {
                from: other.name(),
                to: "failed",
            }),
        }
    }

    pub fn catalog(&self) -> Option<&Arc<ResolvedCatalog>> {
        match self {
            ViewState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    /// `NotReady` error describing this state.
    pub fn not_ready(&self) -> ViewError {
        ViewError::NotReady {
            status: self.name(),
            message: self.error_message().map(str::to_string),
        }
    }
}
