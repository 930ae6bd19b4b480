//! Loading of the classifier artifacts produced by the training pipeline.
//!
//! Both files are required: a missing, undecodable or inconsistent artifact
//! is an [`AppError::Artifact`] and must stop the process before it serves
//! any event.

use super::classifier::{is_channel_worthy, ChannelNet};
use super::vectorizer::Vectorizer;
use crate::error::{AppError, Result};
use crate::fs_manager::PortablePathManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Immutable vectorizer + model pair, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ClassifierArtifacts {
    vectorizer: Vectorizer,
    model: ChannelNet,
}

impl ClassifierArtifacts {
    pub fn new(vectorizer: Vectorizer, model: ChannelNet) -> Result<Self> {
        if model.input_size() != vectorizer.feature_count() {
            return Err(AppError::Artifact(format!(
                "Model expects {} features but the vectorizer produces {}",
                model.input_size(),
                vectorizer.feature_count()
            )));
        }
        Ok(Self { vectorizer, model })
    }

    pub fn load(vectorizer_path: &Path, model_path: &Path) -> Result<Self> {
        let vectorizer: Vectorizer = read_artifact(vectorizer_path, "Vectorizer")?;
        vectorizer.validate()?;

        let model: ChannelNet = read_artifact(model_path, "Model")?;
        model.validate()?;

        let artifacts = Self::new(vectorizer, model)?;
        info!(
            features = artifacts.feature_count(),
            hidden = artifacts.model.hidden_size(),
            "Classifier artifacts loaded"
        );
        Ok(artifacts)
    }

    pub fn save(&self, vectorizer_path: &Path, model_path: &Path) -> Result<()> {
        write_artifact(vectorizer_path, &self.vectorizer)?;
        write_artifact(model_path, &self.model)
    }

    pub fn feature_count(&self) -> usize {
        self.vectorizer.feature_count()
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    /// Encodes `text` and runs the model over it.
    pub fn score(&self, text: &str) -> f32 {
        self.model.predict(&self.vectorizer.encode(text))
    }

    pub fn should_create_channel(&self, text: &str) -> bool {
        !text.trim().is_empty() && is_channel_worthy(self.score(text))
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T> {
    if !path.exists() {
        return Err(AppError::Artifact(format!("{} file not found: {}", kind, path.display())));
    }
    let bytes = fs::read(path)
        .map_err(|e| AppError::Artifact(format!("Cannot read {} file {}: {}", kind, path.display(), e)))?;
    bincode::deserialize(&bytes)
        .map_err(|e| AppError::Artifact(format!("Corrupt {} file {}: {}", kind, path.display(), e)))
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    PortablePathManager::ensure_parent(path)?;
    let bytes = bincode::serialize(value)?;
    fs::write(path, bytes)?;
    Ok(())
}
