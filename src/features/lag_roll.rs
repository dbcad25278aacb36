use crate::features::stats;
use crate::frame::{Cell, Frame};

pub const KEY_VARIABLES: &[&str] = &[
    "Dissolved Oxygen",
    "Turbidity",
    "pH",
    "Salinity",
    "Temperature",
    "Specific Conductance",
    "Chlorophyll",
];

pub const LAGS: &[usize] = &[1, 2, 3];
pub const WINDOWS: &[usize] = &[3, 6];

// non-null observations a window needs to produce a statistic
pub const MIN_PERIODS: usize = 1;

pub fn lag(values: &[Cell], n: usize) -> Vec<Cell> {
    (0..values.len())
        .map(|i| if i >= n { values[i - n] } else { None })
        .collect()
}

/// Trailing windows are shorter at the start of the series. A window with
/// fewer than `min_periods` non-null observations is null.
pub fn rolling(
    values: &[Cell],
    window: usize,
    min_periods: usize,
    stat: fn(&[Cell]) -> Cell,
) -> Vec<Cell> {
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            let observed = slice.iter().flatten().count();
            if observed >= min_periods.max(1) {
                stat(slice)
            } else {
                None
            }
        })
        .collect()
}

pub fn rolling_mean(values: &[Cell], window: usize) -> Vec<Cell> {
    rolling(values, window, MIN_PERIODS, stats::mean)
}

pub fn rolling_std(values: &[Cell], window: usize) -> Vec<Cell> {
    rolling(values, window, MIN_PERIODS, stats::sample_std)
}

/// Adds `<var>_lag{1,2,3}`, `<var>_roll{3,6}_mean` and `<var>_roll{3,6}_std`
/// for each key variable present in `frame`. Absent variables are skipped.
pub fn add_lag_roll_features(frame: &mut Frame) {
    for &var in KEY_VARIABLES {
        let Some(values) = frame.column(var).map(<[Cell]>::to_vec) else {
            tracing::debug!(variable = var, "key variable absent, skipping lag/rolling features");
            continue;
        };
        for &n in LAGS {
            frame.insert(format!("{var}_lag{n}"), lag(&values, n));
        }
        for &w in WINDOWS {
            frame.insert(format!("{var}_roll{w}_mean"), rolling_mean(&values, w));
            frame.insert(format!("{var}_roll{w}_std"), rolling_std(&values, w));
        }
    }
}
