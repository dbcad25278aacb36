use chrono::{Datelike, NaiveDateTime, Timelike};
use std::f64::consts::PI;

use crate::frame::{Cell, Frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFeature {
    Hour,
    /// Monday = 0 .. Sunday = 6
    DayOfWeek,
    Month,
    Year,
    /// 1-based
    DayOfYear,
    HourSin,
    HourCos,
}

pub const BRISBANE_TIME_FEATURES: &[TimeFeature] = &[
    TimeFeature::Hour,
    TimeFeature::DayOfWeek,
    TimeFeature::Month,
    TimeFeature::HourSin,
    TimeFeature::HourCos,
];

pub const NYC_TIME_FEATURES: &[TimeFeature] = &[
    TimeFeature::Year,
    TimeFeature::Month,
    TimeFeature::DayOfWeek,
    TimeFeature::DayOfYear,
];

impl TimeFeature {
    pub fn name(self) -> &'static str {
        match self {
            TimeFeature::Hour => "hour",
            TimeFeature::DayOfWeek => "dayofweek",
            TimeFeature::Month => "month",
            TimeFeature::Year => "year",
            TimeFeature::DayOfYear => "dayofyear",
            TimeFeature::HourSin => "hour_sin",
            TimeFeature::HourCos => "hour_cos",
        }
    }

    pub fn value(self, ts: &NaiveDateTime) -> f64 {
        match self {
            TimeFeature::Hour => ts.hour() as f64,
            TimeFeature::DayOfWeek => ts.weekday().num_days_from_monday() as f64,
            TimeFeature::Month => ts.month() as f64,
            TimeFeature::Year => ts.year() as f64,
            TimeFeature::DayOfYear => ts.ordinal() as f64,
            TimeFeature::HourSin => (2.0 * PI * ts.hour() as f64 / 24.0).sin(),
            TimeFeature::HourCos => (2.0 * PI * ts.hour() as f64 / 24.0).cos(),
        }
    }
}

// a null timestamp gives a null cell in every derived column
pub fn add_time_features(
    frame: &mut Frame,
    timestamps: &[Option<NaiveDateTime>],
    features: &[TimeFeature],
) {
    for &feature in features {
        let col: Vec<Cell> = timestamps
            .iter()
            .map(|ts| ts.as_ref().map(|t| feature.value(t)))
            .collect();
        frame.insert(feature.name(), col);
    }
}
