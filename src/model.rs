use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::frame::FeatureMatrix;

#[derive(Deserialize)]
struct MetaJson {
    #[serde(alias = "feat_list")]
    feature_cols: Vec<String>,
    threshold: f64,
    in_dim: Option<usize>,
}

/// Anything that turns a feature matrix into positive-class probabilities,
/// one per row. Implementations must be safe to call from many requests at
/// once.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f64>>;
}

/// A trained model together with its column contract and decision threshold.
/// Built once at startup and never mutated.
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub threshold: f64,
    classifier: Box<dyn Classifier>,
}

impl ModelArtifact {
    pub fn new(
        feature_names: Vec<String>,
        threshold: f64,
        classifier: Box<dyn Classifier>,
    ) -> Self {
        Self {
            feature_names,
            threshold,
            classifier,
        }
    }

    /// Loads `meta.json` (feature order + threshold) and the TorchScript
    /// module next to it.
    pub fn load(model_path: &str, meta_path: &str) -> Result<Self> {
        let meta_txt = fs::read_to_string(Path::new(meta_path))
            .with_context(|| format!("failed to read meta at {}", meta_path))?;
        let meta: MetaJson = serde_json::from_str(&meta_txt)
            .with_context(|| format!("failed to parse {}", meta_path))?;

        if let Some(in_dim) = meta.in_dim {
            if in_dim != meta.feature_cols.len() {
                tracing::warn!(
                    "meta.in_dim ({}) != feature_cols.len() ({}); using feature_cols.len()",
                    in_dim,
                    meta.feature_cols.len()
                );
            }
        }

        let classifier = load_classifier(model_path)?;
        Ok(Self::new(meta.feature_cols, meta.threshold, classifier))
    }

    /// Probability of the positive class for every row of `x`.
    pub fn score(&self, x: &FeatureMatrix) -> Result<Vec<f64>> {
        if x.columns() != self.feature_names.as_slice() {
            bail!(
                "feature columns do not match the model contract: got {} columns, expected {}",
                x.n_cols(),
                self.feature_names.len()
            );
        }
        let probs = self.classifier.predict_proba(x)?;
        if probs.len() != x.n_rows() {
            bail!(
                "classifier returned {} probabilities for {} rows",
                probs.len(),
                x.n_rows()
            );
        }
        Ok(probs)
    }

    pub fn label(&self, probability: f64) -> u8 {
        u8::from(probability >= self.threshold)
    }

    /// Scores a single all-zero row so a broken module fails at startup
    /// rather than on the first request.
    pub fn warmup(&self) -> Result<f64> {
        let x = FeatureMatrix::zeros(self.feature_names.clone(), 1);
        let probs = self.score(&x)?;
        Ok(probs[0])
    }
}

#[cfg(feature = "torch")]
fn load_classifier(model_path: &str) -> Result<Box<dyn Classifier>> {
    Ok(Box::new(torch::TorchClassifier::load(model_path)?))
}

#[cfg(not(feature = "torch"))]
fn load_classifier(model_path: &str) -> Result<Box<dyn Classifier>> {
    bail!(
        "cannot load {}: built without the `torch` feature",
        model_path
    )
}

#[cfg(feature = "torch")]
mod torch {
    use anyhow::{bail, Context, Result};
    use tch::{kind::Kind, CModule, Device, IndexOp, Tensor};

    use super::Classifier;
    use crate::frame::FeatureMatrix;

    pub struct TorchClassifier {
        model: CModule,
        device: Device,
    }

    impl TorchClassifier {
        pub fn load(model_path: &str) -> Result<Self> {
            let device = Device::Cpu;
            let model = CModule::load_on_device(model_path, device)
                .with_context(|| format!("failed to load TorchScript {}", model_path))?;
            Ok(Self { model, device })
        }
    }

    impl Classifier for TorchClassifier {
        // Accepts [B, 2] (column 1 is the positive class), [B, 1] or [B].
        fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f64>> {
            let (rows, cols) = (x.n_rows() as i64, x.n_cols() as i64);
            let input = Tensor::from_slice(&x.to_dense_f32())
                .reshape([rows, cols])
                .to_device(self.device);

            let out = tch::no_grad(|| self.model.forward_ts(&[input]))?
                .to_device(Device::Cpu)
                .to_kind(Kind::Double);

            let sz = out.size();
            let positive = match sz.as_slice() {
                [b, 2] if *b == rows => out.i((.., 1)),
                [b, 1] if *b == rows => out.squeeze_dim(1),
                [b] if *b == rows => out,
                _ => bail!("unexpected model output size: {:?}", sz),
            };
            let probs = Vec::<f64>::try_from(positive.contiguous())?;
            Ok(probs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl Classifier for Constant {
        fn predict_proba(&self, x: &FeatureMatrix) -> Result<Vec<f64>> {
            Ok(vec![self.0; x.n_rows()])
        }
    }

    #[test]
    fn labels_at_threshold() {
        let m = ModelArtifact::new(vec!["a".into()], 0.4, Box::new(Constant(0.4)));
        assert_eq!(m.label(0.4), 1);
        assert_eq!(m.label(0.39), 0);
        assert_eq!(m.warmup().unwrap(), 0.4);
    }

    #[test]
    fn rejects_misordered_columns() {
        let m = ModelArtifact::new(vec!["a".into(), "b".into()], 0.5, Box::new(Constant(0.1)));
        let x = FeatureMatrix::zeros(vec!["b".into(), "a".into()], 1);
        assert!(m.score(&x).is_err());
    }

    #[test]
    fn meta_accepts_feat_list_alias() {
        let meta: MetaJson =
            serde_json::from_str(r#"{"feat_list": ["x", "y"], "threshold": 0.3}"#).unwrap();
        assert_eq!(meta.feature_cols, vec!["x", "y"]);
        assert_eq!(meta.in_dim, None);
    }
}
