use serde::{Deserialize, Serialize};

use crate::features::RawReading;

// ---------- Brisbane ----------

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BrisbaneRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Average_Water_Speed", alias = "Average Water Speed", default)]
    pub average_water_speed: Option<f64>,
    #[serde(rename = "Average_Water_Direction", alias = "Average Water Direction", default)]
    pub average_water_direction: Option<f64>,
    #[serde(rename = "Chlorophyll", default)]
    pub chlorophyll: Option<f64>,
    #[serde(rename = "Temperature", default)]
    pub temperature: Option<f64>,
    #[serde(rename = "Dissolved_Oxygen", alias = "Dissolved Oxygen", default)]
    pub dissolved_oxygen: Option<f64>,
    #[serde(
        rename = "Dissolved_Oxygen_Saturation",
        alias = "Dissolved Oxygen (%Saturation)",
        default
    )]
    pub dissolved_oxygen_saturation: Option<f64>,
    #[serde(rename = "pH", default)]
    pub ph: Option<f64>,
    #[serde(rename = "Salinity", default)]
    pub salinity: Option<f64>,
    #[serde(rename = "Specific_Conductance", alias = "Specific Conductance", default)]
    pub specific_conductance: Option<f64>,
    #[serde(rename = "Turbidity", default)]
    pub turbidity: Option<f64>,
}

/// Frame column names of the numeric readings, in input order.
pub const BRISBANE_READING_COLUMNS: [&str; 10] = [
    "Average Water Speed",
    "Average Water Direction",
    "Chlorophyll",
    "Temperature",
    "Dissolved Oxygen",
    "Dissolved Oxygen (%Saturation)",
    "pH",
    "Salinity",
    "Specific Conductance",
    "Turbidity",
];

impl BrisbaneRecord {
    /// Readings aligned with `BRISBANE_READING_COLUMNS`.
    pub fn readings(&self) -> [Option<f64>; 10] {
        [
            self.average_water_speed,
            self.average_water_direction,
            self.chlorophyll,
            self.temperature,
            self.dissolved_oxygen,
            self.dissolved_oxygen_saturation,
            self.ph,
            self.salinity,
            self.specific_conductance,
            self.turbidity,
        ]
    }
}

#[derive(Debug, Deserialize)]
pub struct BrisbanePayload {
    pub records: Vec<BrisbaneRecord>,
}

#[derive(Debug, Deserialize)]
pub struct BrisbaneBatchQuery {
    pub records: Vec<BrisbaneRecord>,
    #[serde(default)]
    pub output_format: Option<String>, // "json" (default) or "csv"
}

#[derive(Debug, Serialize)]
pub struct BrisbanePrediction {
    pub probability_deterioration_soon: f64,
    pub risk_label: u8,
    pub threshold_used: f64,
}

/// One batch output row: the input columns followed by the prediction.
#[derive(Debug, Clone, Serialize)]
pub struct BrisbanePredictionRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Average Water Speed")]
    pub average_water_speed: Option<f64>,
    #[serde(rename = "Average Water Direction")]
    pub average_water_direction: Option<f64>,
    #[serde(rename = "Chlorophyll")]
    pub chlorophyll: Option<f64>,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "Dissolved Oxygen")]
    pub dissolved_oxygen: Option<f64>,
    #[serde(rename = "Dissolved Oxygen (%Saturation)")]
    pub dissolved_oxygen_saturation: Option<f64>,
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
    #[serde(rename = "Salinity")]
    pub salinity: Option<f64>,
    #[serde(rename = "Specific Conductance")]
    pub specific_conductance: Option<f64>,
    #[serde(rename = "Turbidity")]
    pub turbidity: Option<f64>,
    pub probability_deterioration_soon: f64,
    pub risk_label: u8,
    pub threshold_used: f64,
}

#[derive(Debug, Serialize)]
pub struct BrisbaneBatchOut {
    pub predictions: Vec<BrisbanePredictionRow>,
    pub count: usize,
}

// ---------- NYC ----------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NycSample {
    #[serde(rename = "Sample_Date", alias = "Sample Date")]
    pub sample_date: String,
    #[serde(rename = "Sample_Time", alias = "Sample Time")]
    pub sample_time: String,
    #[serde(rename = "Sample_class", alias = "Sample class")]
    pub sample_class: String,
    #[serde(rename = "Residual_Free_Chlorine_mg_L", alias = "Residual Free Chlorine (mg/L)")]
    pub residual_free_chlorine: f64,
    // number, lab notation ("<0.10") or null
    #[serde(rename = "Turbidity_NTU", alias = "Turbidity (NTU)", default)]
    pub turbidity: Option<RawReading>,
}

pub const NYC_CHLORINE_COLUMN: &str = "Residual Free Chlorine (mg/L)";
pub const NYC_TURBIDITY_COLUMN: &str = "Turbidity (NTU)";

#[derive(Debug, Deserialize)]
pub struct NycPayload {
    pub samples: Vec<NycSample>,
}

#[derive(Debug, Serialize)]
pub struct NycPrediction {
    pub probability_failure: Vec<f64>,
    pub risk_labels: Vec<u8>,
    pub threshold_used: f64,
}
