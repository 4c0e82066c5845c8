//! Model registry
//!
//! An ordered, key-unique set of [`IModel`] implementations and the logic
//! that evaluates them for a tracked event. Evaluation is concurrent but
//! cooperative: every model's future runs on the calling task via `join_all`,
//! and the composed result waits for all of them. A model that fails (or
//! exceeds the configured per-model timeout) is logged, reported through the
//! diagnostics sink, and omitted from the composed tree; the event itself
//! always completes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures_util::future::join_all;
use serde_json::Value;

use crate::domain::errors::SstError;
use crate::domain::event::Event;
use crate::ports::model::{IModel, ModelContext};

/// Ordered, key-unique collection of models.
#[derive(Clone, Default)]
pub struct Models {
    entries: Vec<Arc<dyn IModel>>,
}

impl Models {
    /// Build a registry from an ordered list of models.
    ///
    /// Returns [`SstError::DuplicateModel`] when two entries share a key;
    /// constructing a whole set with colliding keys is a programming error
    /// worth surfacing. Use [`Models::add`] to deliberately replace one.
    pub fn new(models: Vec<Arc<dyn IModel>>) -> Result<Self, SstError> {
        let mut registry = Self::default();
        for model in models {
            if registry.contains(model.key()) {
                return Err(SstError::DuplicateModel(model.key().to_string()));
            }
            registry.entries.push(model);
        }
        Ok(registry)
    }

    /// Add a model, replacing any existing entry with the same key in place.
    ///
    /// Last registration wins. This is the customization path for swapping a
    /// built-in for a tailored variant, e.g. a device model with sections
    /// disabled.
    pub fn add(mut self, model: Arc<dyn IModel>) -> Self {
        match self.entries.iter().position(|m| m.key() == model.key()) {
            Some(idx) => self.entries[idx] = model,
            None => self.entries.push(model),
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|m| m.key() == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn IModel>> {
        self.entries.iter()
    }

    /// Key-to-version map for the library metadata section.
    ///
    /// Includes every registered model, whatever its evaluation outcome;
    /// callers decide what to do with empty versions.
    pub fn versions(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|m| (m.key().to_string(), m.version().to_string()))
            .collect()
    }

    /// Evaluate every model concurrently and compose the successful results.
    ///
    /// Failures and timeouts are absorbed: logged, best-effort reported via
    /// the context's diagnostics sink, and left out of the returned map.
    pub async fn evaluate(&self, event: &Event, ctx: &ModelContext) -> BTreeMap<String, Value> {
        let timeout = ctx.config().model_timeout;
        let futures = self.entries.iter().map(|model| {
            let key = model.key().to_string();
            async move {
                let outcome = match timeout {
                    Some(limit) => match tokio::time::timeout(limit, model.evaluate(event, ctx))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(anyhow::anyhow!(
                            "evaluation exceeded the {}ms model timeout",
                            limit.as_millis()
                        )),
                    },
                    None => model.evaluate(event, ctx).await,
                };
                (key, outcome)
            }
        });

        let mut composed = BTreeMap::new();
        for (key, outcome) in join_all(futures).await {
            match outcome {
                Ok(value) => {
                    composed.insert(key, value);
                }
                Err(e) => {
                    tracing::warn!(model = %key, error = %e, "model evaluation failed, omitting");
                    if let Some(sink) = ctx.diagnostics() {
                        sink.report(
                            &format!("model '{key}': {e}"),
                            "Models.evaluate",
                            "ModelEvaluationError",
                        );
                    }
                }
            }
        }
        composed
    }
}

impl fmt::Debug for Models {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.entries.iter().map(|m| m.key()).collect();
        f.debug_struct("Models").field("keys", &keys).finish()
    }
}
