// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{
        face::{DetectorError, FaceDetector, HttpFaceDetector, UnavailableDetector},
        question_bank::QuestionBank,
        result_store::ResultStore,
        sessions::SessionStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub bank: Arc<QuestionBank>,
    pub results: Arc<ResultStore>,
    pub detector: Arc<dyn FaceDetector>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, bank: QuestionBank, detector: Arc<dyn FaceDetector>) -> Self {
        let results = ResultStore::new(config.results_path.clone());
        let sessions = SessionStore::new(config.session_idle_timeout);
        Self {
            config,
            bank: Arc::new(bank),
            results: Arc::new(results),
            detector,
            sessions,
        }
    }

    /// Wires stores and the face classifier from configuration.
    pub fn from_config(config: Config) -> Result<Self, DetectorError> {
        let detector: Arc<dyn FaceDetector> = match &config.face_detector_url {
            Some(url) => {
                tracing::info!("Face presence checks go to {}", url);
                Arc::new(HttpFaceDetector::new(url.clone(), config.face_detector_timeout)?)
            }
            None => {
                tracing::warn!("FACE_DETECTOR_URL not set, every face check will be inconclusive");
                Arc::new(UnavailableDetector)
            }
        };
        let bank = QuestionBank::new(config.question_bank_path.clone());
        Ok(Self::new(config, bank, detector))
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
