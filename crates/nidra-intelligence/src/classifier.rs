// ABOUTME: Classifier adapter owning the process-wide sleep model handle
// ABOUTME: Load-once-under-lock with double-checked lazy reload and native-output unwrapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Classifier Adapter
//!
//! [`ClassifierAdapter`] owns a single model slot. The slot starts empty
//! (`Unloaded`) and is filled by [`ClassifierAdapter::load`]. A successful load
//! replaces the slot atomically; a failed one leaves it untouched.
//!
//! [`ClassifierAdapter::classify`] clones the current handle out of the slot and
//! runs the model without holding any lock, so concurrent classifications run
//! in parallel. When the slot is empty, exactly one synchronous reload attempt
//! is made under the load guard; callers racing the same reload wait on the
//! guard and re-check the slot instead of loading again.

use nidra_core::constants::messages::MODEL_UNAVAILABLE;
use nidra_core::errors::AppError;
use nidra_core::models::{ClassId, FeatureVector};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::forest::DecisionForest;

/// Native output of a model's predict call
///
/// Models may return a plain label, a float-typed label, or a batch wrapping
/// either. The adapter unwraps all of them to a plain [`ClassId`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// Integer class label
    Label(i64),
    /// Float-typed class label (must be integral)
    Score(f64),
    /// Batch of outputs; the first element belongs to the single input row
    Batch(Vec<ModelOutput>),
}

impl ModelOutput {
    /// Unwrap to a plain class id
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::InvalidOutput`] for empty batches and for
    /// scores that are not finite integers.
    pub fn into_class_id(self) -> Result<ClassId, ClassifierError> {
        let mut current = self;
        loop {
            match current {
                Self::Label(label) => return Ok(ClassId(label)),
                Self::Score(score) => {
                    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
                    if score.is_finite() && score.fract() == 0.0 {
                        return Ok(ClassId(score as i64));
                    }
                    return Err(ClassifierError::InvalidOutput(format!(
                        "score {score} is not an integral class label"
                    )));
                }
                Self::Batch(items) => {
                    current = items.into_iter().next().ok_or_else(|| {
                        ClassifierError::InvalidOutput("model returned an empty batch".to_owned())
                    })?;
                }
            }
        }
    }
}

/// A loaded, read-only classification model
pub trait SleepClassifier: Send + Sync {
    /// Classify one feature vector, returning the model's native output
    fn predict(&self, features: &FeatureVector) -> ModelOutput;
}

/// Where a model comes from
pub trait ModelSource: Send + Sync {
    /// Load and deserialize the model
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError`] if the artifact is missing or corrupt.
    fn load(&self) -> Result<Arc<dyn SleepClassifier>, ModelLoadError>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Model artifact could not be loaded
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// Artifact does not exist
    #[error("model artifact not found at {}", .0.display())]
    NotFound(PathBuf),
    /// Artifact exists but could not be read
    #[error("failed to read model artifact at {}: {source}", path.display())]
    Io {
        /// Artifact path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// Artifact is not valid JSON for the expected schema
    #[error("failed to deserialize model artifact: {0}")]
    Parse(#[source] serde_json::Error),
    /// Artifact parsed but violates structural invariants
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

/// Classification failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// Model is unloaded and the lazy reload failed
    #[error("{}", MODEL_UNAVAILABLE)]
    ModelUnavailable,
    /// Model returned output that is not a class label
    #[error("Prediction failed: {0}")]
    InvalidOutput(String),
}

impl From<ClassifierError> for AppError {
    fn from(error: ClassifierError) -> Self {
        match error {
            ClassifierError::ModelUnavailable => Self::model_unavailable(error.to_string()),
            ClassifierError::InvalidOutput(_) => Self::prediction_failed(error.to_string()),
        }
    }
}

/// Reads a [`DecisionForest`] artifact from disk
#[derive(Debug, Clone)]
pub struct FileModelSource {
    path: PathBuf,
}

impl FileModelSource {
    /// Source for the artifact at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Artifact path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelSource for FileModelSource {
    fn load(&self) -> Result<Arc<dyn SleepClassifier>, ModelLoadError> {
        let bytes = std::fs::read(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ModelLoadError::NotFound(self.path.clone())
            } else {
                ModelLoadError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        let forest = DecisionForest::from_slice(&bytes)?;
        debug!(
            trees = forest.trees.len(),
            classes = ?forest.classes,
            "Decision forest deserialized"
        );
        Ok(Arc::new(forest))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Readiness of the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    /// No model in the slot
    Unloaded,
    /// A model is loaded and serving
    Loaded,
}

/// Owns the classifier lifecycle
pub struct ClassifierAdapter {
    source: Box<dyn ModelSource>,
    slot: RwLock<Option<Arc<dyn SleepClassifier>>>,
    load_guard: Mutex<()>,
}

impl ClassifierAdapter {
    /// Create an unloaded adapter backed by `source`
    #[must_use]
    pub fn new(source: Box<dyn ModelSource>) -> Self {
        Self {
            source,
            slot: RwLock::new(None),
            load_guard: Mutex::new(()),
        }
    }

    /// Create an unloaded adapter reading the artifact at `path`
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileModelSource::new(path)))
    }

    /// Load (or reload) the model, returning whether it succeeded
    ///
    /// Failures are logged and leave the current slot unchanged.
    pub fn load(&self) -> bool {
        let _guard = self
            .load_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.load_locked()
    }

    /// Current readiness
    #[must_use]
    pub fn state(&self) -> ModelState {
        if self.current().is_some() {
            ModelState::Loaded
        } else {
            ModelState::Unloaded
        }
    }

    /// Whether a model is loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state() == ModelState::Loaded
    }

    /// Location of the model artifact
    #[must_use]
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Classify a feature vector
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::ModelUnavailable`] if the model is unloaded
    /// and the lazy reload fails, or [`ClassifierError::InvalidOutput`] if the
    /// model's output cannot be unwrapped to a class id.
    pub fn classify(&self, features: &FeatureVector) -> Result<ClassId, ClassifierError> {
        let model = self.ensure_loaded()?;
        model.predict(features).into_class_id()
    }

    fn ensure_loaded(&self) -> Result<Arc<dyn SleepClassifier>, ClassifierError> {
        if let Some(model) = self.current() {
            return Ok(model);
        }

        warn!(
            source = %self.source.describe(),
            "Sleep classifier not loaded, attempting lazy reload"
        );
        let _guard = self
            .load_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished loading while we waited
        if let Some(model) = self.current() {
            return Ok(model);
        }

        if self.load_locked() {
            self.current().ok_or(ClassifierError::ModelUnavailable)
        } else {
            Err(ClassifierError::ModelUnavailable)
        }
    }

    /// Caller must hold `load_guard`
    fn load_locked(&self) -> bool {
        let source = self.source.describe();
        info!(source = %source, "Loading sleep classifier");

        match self.source.load() {
            Ok(model) => {
                *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(model);
                info!(source = %source, "Sleep classifier loaded");
                true
            }
            Err(e) => {
                error!(source = %source, error = %e, "Failed to load sleep classifier");
                false
            }
        }
    }

    fn current(&self) -> Option<Arc<dyn SleepClassifier>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("source", &self.source.describe())
            .field("state", &self.state())
            .finish()
    }
}
