//! Urban water-quality early warning: feature engineering for the Brisbane
//! buoy network and the NYC chlorine/turbidity sampling program, and the HTTP
//! service that scores the engineered features.

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod frame;
pub mod model;
pub mod pipeline;
pub mod types;

pub use api::{create_router, AppState};
pub use config::ServiceConfig;
pub use error::{ApiError, PipelineError};
pub use frame::{Cell, FeatureMatrix, Frame};
pub use model::{Classifier, ModelArtifact};
