//! Feature engineering stages shared by the Brisbane and NYC pipelines.

pub mod assemble;
pub mod calendar;
pub mod censored;
pub mod indicators;
pub mod lag_roll;
pub mod stats;
pub mod temporal;

pub use assemble::{assemble, AssemblyPolicy, Imputation, MissingColumn, RowSelection};
pub use censored::{parse_censored, parse_censored_str, RawReading};
