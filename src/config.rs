//! Runtime configuration from environment variables.
//!
//! Supported:
//! - `GLUCOSCREEN_PROCESSING_DELAY_MS`: simulated processing delay (default 3000)
//! - `GLUCOSCREEN_CONFIDENCE_SEED`: u64 seed for the confidence RNG (default: OS entropy)
//! - `GLUCOSCREEN_REPORT_DIR`: where exported reports are written (default `reports`)
//!
//! Invalid values are logged and ignored.

use std::path::PathBuf;
use std::time::Duration;

/// Reference processing delay for the generating stage.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(3000);

/// Upper bound accepted for the processing delay.
const MAX_PROCESSING_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub processing_delay: Duration,
    pub confidence_seed: Option<u64>,
    pub report_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            processing_delay: DEFAULT_PROCESSING_DELAY,
            confidence_seed: None,
            report_dir: PathBuf::from("reports"),
        }
    }
}

impl AppConfig {
    /// Load config overrides from the process environment (best-effort).
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("GLUCOSCREEN_PROCESSING_DELAY_MS") {
            match v.trim().parse::<u64>() {
                Ok(ms) if ms <= MAX_PROCESSING_DELAY_MS => {
                    cfg.processing_delay = Duration::from_millis(ms);
                }
                _ => tracing::warn!(
                    "Ignoring GLUCOSCREEN_PROCESSING_DELAY_MS='{}' (expected 0-{} ms)",
                    v,
                    MAX_PROCESSING_DELAY_MS
                ),
            }
        }

        if let Some(v) = lookup("GLUCOSCREEN_CONFIDENCE_SEED") {
            match v.trim().parse::<u64>() {
                Ok(seed) => cfg.confidence_seed = Some(seed),
                Err(e) => tracing::warn!("Ignoring GLUCOSCREEN_CONFIDENCE_SEED: {}", e),
            }
        }

        if let Some(v) = lookup("GLUCOSCREEN_REPORT_DIR") {
            if v.trim().is_empty() {
                tracing::warn!("Ignoring empty GLUCOSCREEN_REPORT_DIR");
            } else {
                cfg.report_dir = PathBuf::from(v.trim());
            }
        }

        tracing::debug!(
            "Configuration loaded: delay={}ms, seeded={}, report_dir={:?}",
            cfg.processing_delay.as_millis(),
            cfg.confidence_seed.is_some(),
            cfg.report_dir
        );

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.processing_delay, Duration::from_millis(3000));
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("GLUCOSCREEN_PROCESSING_DELAY_MS", "250"),
            ("GLUCOSCREEN_CONFIDENCE_SEED", " 99 "),
            ("GLUCOSCREEN_REPORT_DIR", "/tmp/out"),
        ]));
        assert_eq!(cfg.processing_delay, Duration::from_millis(250));
        assert_eq!(cfg.confidence_seed, Some(99));
        assert_eq!(cfg.report_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("GLUCOSCREEN_PROCESSING_DELAY_MS", "soon"),
            ("GLUCOSCREEN_CONFIDENCE_SEED", "-1"),
            ("GLUCOSCREEN_REPORT_DIR", "  "),
        ]));
        assert_eq!(cfg, AppConfig::default());

        let too_long = AppConfig::from_lookup(lookup_from(&[(
            "GLUCOSCREEN_PROCESSING_DELAY_MS",
            "600000",
        )]));
        assert_eq!(too_long.processing_delay, DEFAULT_PROCESSING_DELAY);
    }
}
