//! End-to-end preprocessing for each monitoring domain.

pub mod brisbane;
pub mod nyc;

pub use brisbane::{preprocess_brisbane, preprocess_brisbane_batch, BrisbaneBatch, EngineeredFrame};
pub use nyc::preprocess_nyc;
