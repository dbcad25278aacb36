use std::collections::BTreeSet;

use crate::features::stats;
use crate::frame::{Cell, Frame};

pub const POLLUTION_SCORE: &str = "pollution_score";
pub const CLASS_PREFIX: &str = "class_";

// ---------- Pollution score ----------

/// `-DO + Turbidity + Salinity`, each input median-filled first. An absent or
/// all-null input has no median and leaves those rows null.
pub fn add_pollution_score(frame: &mut Frame) {
    let n = frame.n_rows();
    let filled = |name: &str| -> Vec<Cell> {
        match frame.column(name) {
            Some(col) => {
                let med = stats::median(col);
                col.iter().map(|v| v.or(med)).collect()
            }
            None => vec![None; n],
        }
    };
    let dissolved_oxygen = filled("Dissolved Oxygen");
    let turbidity = filled("Turbidity");
    let salinity = filled("Salinity");

    let score = (0..n)
        .map(|i| Some(-dissolved_oxygen[i]? + turbidity[i]? + salinity[i]?))
        .collect();
    frame.insert(POLLUTION_SCORE, score);
}

pub fn class_column(value: &str) -> String {
    format!("{CLASS_PREFIX}{value}")
}

// ---------- Sample class one-hot ----------

pub fn add_one_hot(frame: &mut Frame, labels: &[String]) -> Vec<String> {
    let observed: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
    let mut added = Vec::with_capacity(observed.len());
    for category in observed {
        let col = labels
            .iter()
            .map(|l| Some(if l == category { 1.0 } else { 0.0 }))
            .collect();
        let name = class_column(category);
        frame.insert(name.clone(), col);
        added.push(name);
    }
    added
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryReconciliation {
    /// Expected by the model and observed in the request.
    pub matched: Vec<String>,
    /// Expected by the model but absent from the request; materialised as zeros.
    pub injected: Vec<String>,
    /// Observed in the request but unknown to the model; dropped.
    pub dropped: Vec<String>,
}

/// Missing categories become all-zero columns; unknown ones are reported as dropped.
pub fn reconcile_categories(
    frame: &mut Frame,
    observed: &[String],
    feature_names: &[String],
) -> CategoryReconciliation {
    let expected: Vec<&String> = feature_names
        .iter()
        .filter(|f| f.starts_with(CLASS_PREFIX))
        .collect();

    let mut out = CategoryReconciliation::default();
    for name in &expected {
        if observed.contains(*name) {
            out.matched.push((*name).clone());
        } else {
            frame.insert((*name).clone(), vec![Some(0.0); frame.n_rows()]);
            out.injected.push((*name).clone());
        }
    }
    out.dropped = observed
        .iter()
        .filter(|o| !expected.contains(o))
        .cloned()
        .collect();

    if !out.dropped.is_empty() {
        tracing::debug!(dropped = ?out.dropped, "sample classes unknown to the model");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pollution_score_is_linear() {
        let mut f = Frame::new(1);
        f.insert("Dissolved Oxygen", vec![Some(5.0)]);
        f.insert("Turbidity", vec![Some(2.0)]);
        f.insert("Salinity", vec![Some(1.0)]);
        add_pollution_score(&mut f);
        assert_eq!(f.column(POLLUTION_SCORE), Some(&[Some(-2.0)][..]));
    }

    #[test]
    fn pollution_score_fills_with_median() {
        let mut f = Frame::new(3);
        f.insert("Dissolved Oxygen", vec![Some(4.0), None, Some(6.0)]);
        f.insert("Turbidity", vec![Some(1.0), Some(1.0), Some(1.0)]);
        f.insert("Salinity", vec![None, None, None]);
        add_pollution_score(&mut f);
        assert_eq!(f.column(POLLUTION_SCORE), Some(&[None, None, None][..]));

        f.insert("Salinity", vec![Some(0.0), Some(0.0), Some(0.0)]);
        add_pollution_score(&mut f);
        assert_eq!(
            f.column(POLLUTION_SCORE),
            Some(&[Some(-3.0), Some(-4.0), Some(-5.0)][..])
        );
    }

    #[test]
    fn one_hot_and_reconcile() {
        let labels: Vec<String> = ["A", "A", "B"].iter().map(|s| s.to_string()).collect();
        let mut f = Frame::new(3);
        let observed = add_one_hot(&mut f, &labels);
        assert_eq!(observed, vec!["class_A", "class_B"]);
        assert_eq!(f.column("class_B"), Some(&[Some(0.0), Some(0.0), Some(1.0)][..]));

        let features: Vec<String> = ["class_A", "class_C", "month"].iter().map(|s| s.to_string()).collect();
        let r = reconcile_categories(&mut f, &observed, &features);
        assert_eq!(r.matched, vec!["class_A"]);
        assert_eq!(r.injected, vec!["class_C"]);
        assert_eq!(r.dropped, vec!["class_B"]);
        assert_eq!(f.column("class_C"), Some(&[Some(0.0); 3][..]));
    }
}
