use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::{ApiError, Result};
use crate::frame::FeatureMatrix;
use crate::model::ModelArtifact;
use crate::pipeline::{preprocess_brisbane, preprocess_brisbane_batch, preprocess_nyc};
use crate::types::{
    BrisbaneBatchOut, BrisbaneBatchQuery, BrisbanePayload, BrisbanePrediction,
    BrisbanePredictionRow, NycPayload, NycPrediction,
};

// ---------- Server state ----------

#[derive(Clone, Default)]
pub struct AppState {
    pub brisbane: Option<Arc<ModelArtifact>>,
    pub nyc: Option<Arc<ModelArtifact>>,
    pub log_pred: bool,
}

impl AppState {
    fn brisbane(&self) -> Result<&ModelArtifact> {
        self.brisbane
            .as_deref()
            .ok_or(ApiError::ModelUnavailable("Brisbane"))
    }

    fn nyc(&self) -> Result<&ModelArtifact> {
        self.nyc.as_deref().ok_or(ApiError::ModelUnavailable("NYC"))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict/brisbane", post(predict_brisbane))
        .route("/predict/brisbane/batch", post(predict_brisbane_batch))
        .route("/predict/nyc", post(predict_nyc))
        .with_state(state)
}

// ---------- Debug signal ----------

// Summary of the last feature row so we can confirm we're not sending all-zeros
fn log_features(domain: &str, x: &FeatureMatrix) {
    if x.n_rows() == 0 {
        return;
    }
    let row: Vec<f64> = x.row(x.n_rows() - 1).iter().map(|c| c.unwrap_or(f64::NAN)).collect();
    let nz = row.iter().filter(|v| **v != 0.0).count();
    let mean = if row.is_empty() { 0.0 } else { row.iter().sum::<f64>() / row.len() as f64 };
    let std = if row.len() < 2 {
        0.0
    } else {
        (row.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / row.len() as f64).sqrt()
    };
    let sample: Vec<String> = x
        .columns()
        .iter()
        .zip(&row)
        .take(6)
        .map(|(name, v)| format!("{}={:.3}", name, v))
        .collect();
    tracing::info!(
        "{} rows={} in_dim={} nonzero={} mean={:.3} std={:.3} sample=[{}]",
        domain,
        x.n_rows(),
        row.len(),
        nz,
        mean,
        std,
        sample.join(", ")
    );
}

fn score(state: &AppState, domain: &str, model: &ModelArtifact, x: &FeatureMatrix) -> Result<Vec<f64>> {
    if state.log_pred {
        log_features(domain, x);
    }
    model.score(x).map_err(ApiError::Scoring)
}

// ---------- Handlers ----------

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "Water quality early-warning API" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn predict_brisbane(
    State(state): State<AppState>,
    Json(payload): Json<BrisbanePayload>,
) -> Result<Json<BrisbanePrediction>> {
    let model = state.brisbane()?;
    let x = preprocess_brisbane(&payload.records, &model.feature_names)?;
    let proba = score(&state, "brisbane", model, &x)?[0];
    Ok(Json(BrisbanePrediction {
        probability_deterioration_soon: proba,
        risk_label: model.label(proba),
        threshold_used: model.threshold,
    }))
}

async fn predict_brisbane_batch(
    State(state): State<AppState>,
    Json(query): Json<BrisbaneBatchQuery>,
) -> Result<Response> {
    let model = state.brisbane()?;
    let format = query.output_format.as_deref().unwrap_or("json").to_ascii_lowercase();
    if format != "json" && format != "csv" {
        return Err(ApiError::UnsupportedFormat(format));
    }

    let batch = preprocess_brisbane_batch(&query.records, &model.feature_names)?;
    let probas = score(&state, "brisbane-batch", model, &batch.matrix)?;

    // rows follow the engineered (chronological) order
    let rows: Vec<BrisbanePredictionRow> = batch
        .engineered
        .records
        .iter()
        .zip(&batch.engineered.timestamps)
        .zip(&probas)
        .map(|((r, ts), &p)| BrisbanePredictionRow {
            timestamp: ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
            average_water_speed: r.average_water_speed,
            average_water_direction: r.average_water_direction,
            chlorophyll: r.chlorophyll,
            temperature: r.temperature,
            dissolved_oxygen: r.dissolved_oxygen,
            dissolved_oxygen_saturation: r.dissolved_oxygen_saturation,
            ph: r.ph,
            salinity: r.salinity,
            specific_conductance: r.specific_conductance,
            turbidity: r.turbidity,
            probability_deterioration_soon: p,
            risk_label: model.label(p),
            threshold_used: model.threshold,
        })
        .collect();

    if format == "csv" {
        let body = rows_to_csv(&rows)?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=brisbane_predictions.csv",
                ),
            ],
            body,
        )
            .into_response());
    }

    let count = rows.len();
    Ok(Json(BrisbaneBatchOut {
        predictions: rows,
        count,
    })
    .into_response())
}

pub fn rows_to_csv(rows: &[BrisbanePredictionRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ApiError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn predict_nyc(
    State(state): State<AppState>,
    Json(payload): Json<NycPayload>,
) -> Result<Json<NycPrediction>> {
    let model = state.nyc()?;
    let x = preprocess_nyc(&payload.samples, &model.feature_names)?;
    if x.has_nulls() {
        tracing::warn!("NYC feature matrix has all-null columns; classifier receives NaN");
    }
    let probas = score(&state, "nyc", model, &x)?;
    let labels = probas.iter().map(|&p| model.label(p)).collect();
    Ok(Json(NycPrediction {
        probability_failure: probas,
        risk_labels: labels,
        threshold_used: model.threshold,
    }))
}
