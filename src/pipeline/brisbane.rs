//! Estuarine buoy pipeline: sort, calendar features, lag/rolling windows,
//! pollution score, then assemble with the four-stage imputation cascade.

use chrono::NaiveDateTime;

use crate::error::PipelineError;
use crate::features::calendar::{add_time_features, BRISBANE_TIME_FEATURES};
use crate::features::indicators::add_pollution_score;
use crate::features::lag_roll::add_lag_roll_features;
use crate::features::temporal::{chronological_order, parse_timestamp};
use crate::features::{assemble, AssemblyPolicy, RowSelection};
use crate::frame::{FeatureMatrix, Frame};
use crate::types::{BrisbaneRecord, BRISBANE_READING_COLUMNS};

/// The engineered frame of one request, in chronological order, together with
/// the input records it was built from (same order).
#[derive(Debug, Clone)]
pub struct EngineeredFrame {
    pub records: Vec<BrisbaneRecord>,
    pub timestamps: Vec<NaiveDateTime>,
    pub frame: Frame,
}

#[derive(Debug, Clone)]
pub struct BrisbaneBatch {
    pub matrix: FeatureMatrix,
    pub engineered: EngineeredFrame,
}

/// Parses every timestamp (any failure rejects the request) and sorts the
/// records ascending, keeping input order for ties.
pub fn normalize(
    records: &[BrisbaneRecord],
) -> Result<(Vec<BrisbaneRecord>, Vec<NaiveDateTime>), PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::EmptySequence);
    }
    let parsed = records
        .iter()
        .enumerate()
        .map(|(index, r)| {
            parse_timestamp(&r.timestamp).ok_or_else(|| PipelineError::InvalidTimestamp {
                index,
                value: r.timestamp.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let keyed: Vec<Option<NaiveDateTime>> = parsed.iter().copied().map(Some).collect();
    let order = chronological_order(&keyed);
    Ok((
        order.iter().map(|&i| records[i].clone()).collect(),
        order.iter().map(|&i| parsed[i]).collect(),
    ))
}

/// Builds every engineered column for the request.
pub fn engineer(records: &[BrisbaneRecord]) -> Result<EngineeredFrame, PipelineError> {
    let (records, timestamps) = normalize(records)?;

    let mut frame = Frame::new(records.len());
    let readings: Vec<[Option<f64>; 10]> = records.iter().map(BrisbaneRecord::readings).collect();
    for (c, name) in BRISBANE_READING_COLUMNS.iter().enumerate() {
        frame.insert(*name, readings.iter().map(|r| r[c]).collect());
    }

    let keyed: Vec<Option<NaiveDateTime>> = timestamps.iter().copied().map(Some).collect();
    add_time_features(&mut frame, &keyed, BRISBANE_TIME_FEATURES);
    add_lag_roll_features(&mut frame);
    add_pollution_score(&mut frame);

    tracing::debug!(rows = frame.n_rows(), columns = frame.names().len(), "engineered brisbane frame");
    Ok(EngineeredFrame {
        records,
        timestamps,
        frame,
    })
}

/// Feature row for the most recent record; earlier records only supply
/// history for the lag and rolling columns.
pub fn preprocess_brisbane(
    records: &[BrisbaneRecord],
    feature_names: &[String],
) -> Result<FeatureMatrix, PipelineError> {
    let engineered = engineer(records)?;
    Ok(assemble(
        &engineered.frame,
        feature_names,
        AssemblyPolicy::BRISBANE,
        RowSelection::Latest,
    ))
}

/// Feature rows for every record, plus the engineered frame so the caller can
/// attach predictions to the sorted input rows.
pub fn preprocess_brisbane_batch(
    records: &[BrisbaneRecord],
    feature_names: &[String],
) -> Result<BrisbaneBatch, PipelineError> {
    let engineered = engineer(records)?;
    let matrix = assemble(
        &engineered.frame,
        feature_names,
        AssemblyPolicy::BRISBANE,
        RowSelection::All,
    );
    Ok(BrisbaneBatch { matrix, engineered })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str, turbidity: Option<f64>) -> BrisbaneRecord {
        BrisbaneRecord {
            timestamp: ts.to_string(),
            turbidity,
            ..Default::default()
        }
    }

    #[test]
    fn sorts_before_engineering() {
        let recs = vec![
            record("2023-05-01T02:00:00", Some(3.0)),
            record("2023-05-01T00:00:00", Some(1.0)),
            record("2023-05-01T01:00:00", Some(2.0)),
        ];
        let e = engineer(&recs).unwrap();
        assert_eq!(e.frame.column("Turbidity"), Some(&[Some(1.0), Some(2.0), Some(3.0)][..]));
        assert_eq!(e.frame.column("Turbidity_lag1"), Some(&[None, Some(1.0), Some(2.0)][..]));
        assert_eq!(e.frame.column("hour"), Some(&[Some(0.0), Some(1.0), Some(2.0)][..]));
        assert_eq!(e.records[0].timestamp, "2023-05-01T00:00:00");
    }

    #[test]
    fn every_key_variable_gets_seven_columns() {
        let e = engineer(&[record("2023-05-01T00:00:00", None)]).unwrap();
        // 10 readings + 5 time + 7 key variables x 7 + pollution score
        assert_eq!(e.frame.names().len(), 10 + 5 + 49 + 1);
    }

    #[test]
    fn bad_timestamp_is_fatal() {
        let recs = vec![record("2023-05-01T00:00:00", None), record("soon", None)];
        assert_eq!(
            engineer(&recs).unwrap_err(),
            PipelineError::InvalidTimestamp {
                index: 1,
                value: "soon".into()
            }
        );
        assert_eq!(engineer(&[]).unwrap_err(), PipelineError::EmptySequence);
    }
}
