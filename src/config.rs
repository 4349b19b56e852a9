// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use dotenvy::dotenv;
use url::Url;

/// Problems found while reading the environment at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// Sessions idle for longer than this are pruned, unless an exam is running.
    pub session_idle_timeout: Duration,
    /// Upper bound on one camera frame posted to the identity check.
    pub max_frame_bytes: usize,
    pub rust_log: String,
    pub log_dir: PathBuf,
    pub question_bank_path: PathBuf,
    pub results_path: PathBuf,
    /// Endpoint of the face-presence classifier. `None` makes every check inconclusive.
    pub face_detector_url: Option<Url>,
    pub face_detector_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let bind_addr = parse_or("BIND_ADDR", "0.0.0.0:3000")?;
        let idle_secs: u64 = parse_or("SESSION_IDLE_SECS", "7200")?;
        let max_frame_bytes = parse_or("MAX_FRAME_BYTES", "10485760")?;
        let timeout_secs: u64 = parse_or("FACE_DETECTOR_TIMEOUT_SECS", "5")?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let face_detector_url = match env::var("FACE_DETECTOR_URL") {
            Ok(raw) if !raw.trim().is_empty() => {
                Some(Url::parse(raw.trim()).map_err(|e| ConfigError::Invalid {
                    key: "FACE_DETECTOR_URL",
                    reason: e.to_string(),
                })?)
            }
            _ => None,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            session_idle_timeout: Duration::from_secs(idle_secs),
            max_frame_bytes,
            rust_log,
            log_dir: path_or("LOG_DIR", "logs"),
            question_bank_path: path_or("QUESTION_BANK_PATH", "questions.json"),
            results_path: path_or("RESULTS_PATH", "exam_results.json"),
            face_detector_url,
            face_detector_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn path_or(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn parse_or<T>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}
