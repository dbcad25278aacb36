use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Paths of one domain's model artifact.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model_path: String,
    pub meta_path: String,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub brisbane: ArtifactPaths,
    pub nyc: ArtifactPaths,
    /// Log a summary of every feature row sent to a model (`LOG_PRED=1`).
    pub log_pred: bool,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values fall
    /// back to defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());
        Self {
            host: get("HOST")
                .and_then(|s| s.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: get("PORT").and_then(|s| s.parse().ok()).unwrap_or(8080),
            brisbane: ArtifactPaths {
                model_path: or("BRISBANE_MODEL_PATH", "models/brisbane_model.pt"),
                meta_path: or("BRISBANE_META_PATH", "models/brisbane_meta.json"),
            },
            nyc: ArtifactPaths {
                model_path: or("NYC_MODEL_PATH", "models/nyc_model.pt"),
                meta_path: or("NYC_META_PATH", "models/nyc_meta.json"),
            },
            log_pred: get("LOG_PRED").as_deref() == Some("1"),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
