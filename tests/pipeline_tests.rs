/// End-to-end checks of the Brisbane and NYC feature pipelines
///
/// Run with: cargo test --test pipeline_tests

use wq_predictor::features::censored::{parse_censored, parse_censored_str, RawReading};
use wq_predictor::features::temporal::{chronological_order, parse_timestamp};
use wq_predictor::pipeline::brisbane::engineer;
use wq_predictor::pipeline::{preprocess_brisbane, preprocess_brisbane_batch, preprocess_nyc};
use wq_predictor::types::{BrisbaneRecord, NycSample};

fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn buoy(ts: &str, value: f64) -> BrisbaneRecord {
    BrisbaneRecord {
        timestamp: ts.to_string(),
        dissolved_oxygen: Some(value),
        turbidity: Some(value / 10.0),
        salinity: Some(1.0),
        ..Default::default()
    }
}

fn five_hours() -> Vec<BrisbaneRecord> {
    // deliberately out of order
    vec![
        buoy("2023-06-01T03:00:00", 40.0),
        buoy("2023-06-01T00:00:00", 10.0),
        buoy("2023-06-01T04:00:00", 50.0),
        buoy("2023-06-01T01:00:00", 20.0),
        buoy("2023-06-01T02:00:00", 30.0),
    ]
}

fn sample(date: &str, time: &str, class: &str, turbidity: RawReading) -> NycSample {
    NycSample {
        sample_date: date.into(),
        sample_time: time.into(),
        sample_class: class.into(),
        residual_free_chlorine: 0.6,
        turbidity: Some(turbidity),
    }
}

#[test]
fn columns_follow_feature_list() {
    let features = names(&["pollution_score", "hour_cos", "Turbidity", "not_engineered", "dayofweek"]);
    let batch = preprocess_brisbane_batch(&five_hours(), &features).unwrap();
    assert_eq!(batch.matrix.columns(), features.as_slice());

    let mut reversed = features.clone();
    reversed.reverse();
    let batch = preprocess_brisbane_batch(&five_hours(), &reversed).unwrap();
    assert_eq!(batch.matrix.columns(), reversed.as_slice());
}

#[test]
fn brisbane_matrix_has_no_nulls() {
    let features = names(&[
        "Dissolved Oxygen_lag3",
        "Dissolved Oxygen_roll3_std",
        "Chlorophyll_roll6_mean",
        "Temperature",
        "missing_feature",
    ]);
    let batch = preprocess_brisbane_batch(&five_hours(), &features).unwrap();
    assert!(!batch.matrix.has_nulls());
    let single = preprocess_brisbane(&five_hours(), &features).unwrap();
    assert!(!single.has_nulls());
}

#[test]
fn sorting_is_stable_and_idempotent() {
    let ts: Vec<_> = ["2023-01-02", "2023-01-01", "2023-01-02", "bad", "2023-01-01"]
        .iter()
        .map(|s| parse_timestamp(s))
        .collect();
    let once = chronological_order(&ts);
    assert_eq!(once, vec![1, 4, 0, 2, 3]);

    let sorted: Vec<_> = once.iter().map(|&i| ts[i]).collect();
    let twice = chronological_order(&sorted);
    assert_eq!(twice, (0..5).collect::<Vec<_>>());
}

#[test]
fn lag_values_follow_sorted_order() {
    let e = engineer(&five_hours()).unwrap();
    let lag1 = e.frame.column("Dissolved Oxygen_lag1").unwrap();
    let lag2 = e.frame.column("Dissolved Oxygen_lag2").unwrap();
    let lag3 = e.frame.column("Dissolved Oxygen_lag3").unwrap();
    assert_eq!((lag1[3], lag2[3], lag3[3]), (Some(30.0), Some(20.0), Some(10.0)));
    assert_eq!((lag1[0], lag2[0], lag3[0]), (None, None, None));
    assert_eq!((lag1[1], lag2[1]), (Some(10.0), None));
}

#[test]
fn rolling_windows_use_partial_history() {
    let e = engineer(&five_hours()).unwrap();
    let mean3 = e.frame.column("Dissolved Oxygen_roll3_mean").unwrap();
    assert_eq!(mean3[2], Some(20.0));
    assert_eq!(mean3[0], Some(10.0));
    let std6 = e.frame.column("Dissolved Oxygen_roll6_std").unwrap();
    assert_eq!(std6[0], None);
    // sample std of 10, 20, 30, 40, 50
    let expected = 250f64.sqrt();
    assert!((std6[4].unwrap() - expected).abs() < 1e-9);
}

#[test]
fn censored_values() {
    assert_eq!(parse_censored_str("<4.0"), Some(2.0));
    assert_eq!(parse_censored_str(">10"), Some(10.0));
    assert_eq!(parse_censored_str("-"), None);
    assert_eq!(parse_censored_str("3.5"), Some(3.5));
    assert_eq!(parse_censored(Some(&RawReading::Number(2.5))), Some(2.5));
}

#[test]
fn pollution_score_combines_inputs() {
    let rec = BrisbaneRecord {
        timestamp: "2023-06-01T00:00:00".into(),
        dissolved_oxygen: Some(5.0),
        turbidity: Some(2.0),
        salinity: Some(1.0),
        ..Default::default()
    };
    let x = preprocess_brisbane(&[rec], &names(&["pollution_score"])).unwrap();
    assert_eq!(x.row(0), &[Some(-2.0)]);
}

#[test]
fn one_hot_columns_and_injected_categories() {
    let samples = vec![
        sample("2022-01-03", "08:00", "A", RawReading::Number(0.2)),
        sample("2022-01-04", "08:00", "A", RawReading::Number(0.3)),
        sample("2022-01-05", "08:00", "B", RawReading::Number(0.4)),
    ];
    let x = preprocess_nyc(&samples, &names(&["class_A", "class_B", "class_C"])).unwrap();
    assert_eq!(x.column("class_A"), Some(vec![Some(1.0), Some(1.0), Some(0.0)]));
    assert_eq!(x.column("class_B"), Some(vec![Some(0.0), Some(0.0), Some(1.0)]));
    assert_eq!(x.column("class_C"), Some(vec![Some(0.0); 3]));
}

#[test]
fn nyc_all_null_column_stays_null() {
    let samples = vec![
        sample("2022-01-03", "08:00", "A", RawReading::Text("-".into())),
        sample("2022-01-04", "09:00", "A", RawReading::Text("".into())),
    ];
    let x = preprocess_nyc(&samples, &names(&["Turbidity (NTU)", "month"])).unwrap();
    assert_eq!(x.column("Turbidity (NTU)"), Some(vec![None, None]));
    assert_eq!(x.column("month"), Some(vec![Some(1.0), Some(1.0)]));
    assert!(x.has_nulls());
}

#[test]
fn brisbane_fill_order_is_forward_then_back() {
    let recs = vec![
        BrisbaneRecord { timestamp: "2023-06-01T00:00:00".into(), ..Default::default() },
        BrisbaneRecord { timestamp: "2023-06-01T01:00:00".into(), temperature: Some(5.0), ..Default::default() },
        BrisbaneRecord { timestamp: "2023-06-01T02:00:00".into(), ..Default::default() },
        BrisbaneRecord { timestamp: "2023-06-01T03:00:00".into(), temperature: Some(10.0), ..Default::default() },
        BrisbaneRecord { timestamp: "2023-06-01T04:00:00".into(), ..Default::default() },
    ];
    let batch = preprocess_brisbane_batch(&recs, &names(&["Temperature"])).unwrap();
    assert_eq!(
        batch.matrix.column("Temperature"),
        Some(vec![Some(5.0), Some(5.0), Some(5.0), Some(10.0), Some(10.0)])
    );
}

#[test]
fn single_record_without_history_is_complete() {
    let features = names(&[
        "Dissolved Oxygen",
        "Dissolved Oxygen_lag1",
        "Dissolved Oxygen_lag3",
        "Dissolved Oxygen_roll3_std",
        "Turbidity_roll6_mean",
        "hour_sin",
        "pollution_score",
    ]);
    let x = preprocess_brisbane(&[buoy("2023-06-01T06:00:00", 8.0)], &features).unwrap();
    assert_eq!(x.n_rows(), 1);
    assert!(!x.has_nulls());
    assert_eq!(x.get(0, "Dissolved Oxygen_lag1"), Some(Some(0.0)));
    assert_eq!(x.get(0, "Dissolved Oxygen_roll3_std"), Some(Some(0.0)));
    assert_eq!(x.get(0, "Turbidity_roll6_mean"), Some(Some(0.8)));
    assert_eq!(x.get(0, "hour_sin"), Some(Some(1.0)));
}

#[test]
fn single_prediction_uses_latest_record() {
    let x = preprocess_brisbane(&five_hours(), &names(&["Dissolved Oxygen", "Dissolved Oxygen_lag1", "hour"])).unwrap();
    assert_eq!(x.row(0), &[Some(50.0), Some(40.0), Some(4.0)]);
}

#[test]
fn nan_turbidity_text_counts_as_missing() {
    let samples = vec![
        sample("2022-01-03", "08:00", "A", RawReading::Number(1.0)),
        sample("2022-01-04", "08:00", "A", RawReading::Text("NaN".into())),
        sample("2022-01-05", "08:00", "A", RawReading::Text("-".into())),
    ];
    let x = preprocess_nyc(&samples, &names(&["Turbidity (NTU)"])).unwrap();
    assert_eq!(x.column("Turbidity (NTU)"), Some(vec![Some(1.0); 3]));
    assert!(!x.has_nulls());
}
