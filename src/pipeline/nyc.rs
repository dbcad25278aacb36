//! Municipal chlorine/turbidity pipeline: censored readings, calendar
//! features, sample-class one-hot, then mean-only imputation.

use chrono::NaiveDateTime;

use crate::error::PipelineError;
use crate::features::calendar::{add_time_features, NYC_TIME_FEATURES};
use crate::features::indicators::{add_one_hot, reconcile_categories};
use crate::features::temporal::{chronological_order, combine_date_time, inverse_order};
use crate::features::{assemble, parse_censored, AssemblyPolicy, RowSelection};
use crate::frame::{FeatureMatrix, Frame};
use crate::types::{NycSample, NYC_CHLORINE_COLUMN, NYC_TURBIDITY_COLUMN};

/// Combined sample timestamps (null where the date or time does not parse)
/// and the chronological order of the samples.
pub fn normalize(samples: &[NycSample]) -> (Vec<Option<NaiveDateTime>>, Vec<usize>) {
    let timestamps: Vec<Option<NaiveDateTime>> = samples
        .iter()
        .map(|s| combine_date_time(&s.sample_date, &s.sample_time))
        .collect();
    let order = chronological_order(&timestamps);
    (timestamps, order)
}

/// Engineered frame with rows in chronological order.
pub fn engineer(samples: &[NycSample], feature_names: &[String]) -> Result<Frame, PipelineError> {
    if samples.is_empty() {
        return Err(PipelineError::EmptySequence);
    }
    let (timestamps, order) = normalize(samples);
    let unparsed = timestamps.iter().filter(|t| t.is_none()).count();
    if unparsed > 0 {
        tracing::debug!(unparsed, "samples with unparsable date/time");
    }

    let sorted: Vec<&NycSample> = order.iter().map(|&i| &samples[i]).collect();
    let sorted_ts: Vec<Option<NaiveDateTime>> = order.iter().map(|&i| timestamps[i]).collect();

    let mut frame = Frame::new(sorted.len());
    frame.insert(
        NYC_CHLORINE_COLUMN,
        sorted.iter().map(|s| Some(s.residual_free_chlorine)).collect(),
    );
    frame.insert(
        NYC_TURBIDITY_COLUMN,
        sorted.iter().map(|s| parse_censored(s.turbidity.as_ref())).collect(),
    );
    add_time_features(&mut frame, &sorted_ts, NYC_TIME_FEATURES);

    let labels: Vec<String> = sorted.iter().map(|s| s.sample_class.clone()).collect();
    let observed = add_one_hot(&mut frame, &labels);
    reconcile_categories(&mut frame, &observed, feature_names);

    Ok(frame)
}

/// One feature row per sample, in request order.
pub fn preprocess_nyc(
    samples: &[NycSample],
    feature_names: &[String],
) -> Result<FeatureMatrix, PipelineError> {
    let frame = engineer(samples, feature_names)?;
    let matrix = assemble(&frame, feature_names, AssemblyPolicy::NYC, RowSelection::All);
    // no feature depends on row order, so the sorted rows map straight back
    let (_, order) = normalize(samples);
    Ok(matrix.take_rows(&inverse_order(&order)))
}
