use std::sync::Arc;

use clinic_client::{ClientError, ClinicApi, HttpApi};
use tracing::info;

use crate::config::{BackendMode, PortalConfig};

/// The backend as seen by the portal components. `Unavailable` means no
/// backend was configured for this deployment: loaders show a placeholder
/// and handlers refuse to submit, without touching the network.
pub enum BackendHandle<A> {
    Live(Arc<A>),
    Unavailable,
}

impl<A: ClinicApi> BackendHandle<A> {
    pub fn live(api: A) -> Self {
        Self::Live(Arc::new(api))
    }

    pub fn api(&self) -> Option<&A> {
        match self {
            Self::Live(api) => Some(api),
            Self::Unavailable => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

impl BackendHandle<HttpApi> {
    /// Build the HTTP backend the configuration resolved to.
    pub fn from_config(config: &PortalConfig) -> Result<Self, ClientError> {
        match &config.backend {
            BackendMode::Live { origin } => {
                let api = HttpApi::new(origin, config.request_timeout)?;
                info!("Using backend at {}", api.api_base());
                Ok(Self::live(api))
            }
            BackendMode::Unavailable => {
                info!("No backend configured; live loading disabled");
                Ok(Self::Unavailable)
            }
        }
    }
}

// Manual impl: a derive would require `A: Clone`.
impl<A> Clone for BackendHandle<A> {
    fn clone(&self) -> Self {
        match self {
            Self::Live(api) => Self::Live(api.clone()),
            Self::Unavailable => Self::Unavailable,
        }
    }
}
