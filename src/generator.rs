//! Pipeline that turns a shape into all of its distinct connection configurations.
//!
//! The entry point is [`ConnectionGenerator`]. Configure it with a
//! [`GeneratorConfig`], optionally attach a [`CancelFlag`], then call
//! [`ConnectionGenerator::generate`] with a [`Shape`].

use crate::adjacency::AdjacencyEncoder;
use crate::connection::ConnectionConfig;
use crate::error::{Error, Result};
use crate::pose::PoseEnumerator;
use crate::shape::Shape;
use crate::symmetry::SymmetryReducer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Configuration for connection generation.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Drop pose assignments that are symmetry images of earlier ones.
    pub exclude_symmetric: bool,
    /// Shapes with more cells than this log a warning before enumerating
    /// (`4^k` candidates are produced without any cap).
    pub warn_cells: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            exclude_symmetric: true,
            warn_cells: 10,
        }
    }
}

/// Cooperative cancellation shared between a running enumeration and its caller.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Enumerates poses for a shape, reduces them by symmetry and encodes each survivor.
#[derive(Clone, Debug, Default)]
pub struct ConnectionGenerator {
    config: GeneratorConfig,
    cancel: CancelFlag,
}

impl ConnectionGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Uses `cancel` to abort enumeration between candidates (builder pattern).
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn cancel_handle(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Every surviving connection configuration of `shape`, in enumeration order.
    ///
    /// Errors abort the whole pass; no partial result is returned.
    pub fn generate(&self, shape: &Shape) -> Result<Vec<ConnectionConfig>> {
        let configs = self.iter(shape)?.collect::<Result<Vec<_>>>()?;
        info!(
            cells = shape.len(),
            symmetry = shape.symmetry(),
            configs = configs.len(),
            "Generated connection configs"
        );
        Ok(configs)
    }

    /// Lazy form of [`generate`](Self::generate).
    ///
    /// Label and shape errors are reported up front. Cancellation surfaces as
    /// an `Err(Error::Cancelled)` item, after which the iterator ends.
    pub fn iter<'a>(&self, shape: &'a Shape) -> Result<Configs<'a>> {
        let candidates = PoseEnumerator::new(shape.len())?;
        if shape.len() > self.config.warn_cells {
            warn!(
                cells = shape.len(),
                candidates = ?candidates.total(),
                "Enumerating 4^k pose assignments without a cap"
            );
        }
        debug!(
            cells = shape.len(),
            candidates = ?candidates.total(),
            symmetry = shape.symmetry(),
            "Enumerating connection configs"
        );

        let reducer = if self.config.exclude_symmetric {
            Some(SymmetryReducer::new(shape)?)
        } else {
            None
        };
        Ok(Configs {
            candidates,
            reducer,
            encoder: AdjacencyEncoder::new(shape),
            cancel: self.cancel.clone(),
            finished: false,
        })
    }
}

/// Lazy stream of connection configurations for one shape.
///
/// Created by [`ConnectionGenerator::iter`].
#[derive(Debug)]
pub struct Configs<'a> {
    candidates: PoseEnumerator,
    reducer: Option<SymmetryReducer<'a>>,
    encoder: AdjacencyEncoder<'a>,
    cancel: CancelFlag,
    finished: bool,
}

impl Iterator for Configs<'_> {
    type Item = Result<ConnectionConfig>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            if self.cancel.is_cancelled() {
                self.finished = true;
                return Some(Err(Error::Cancelled));
            }
            let candidate = self.candidates.next()?;
            if let Some(reducer) = self.reducer.as_mut()
                && !reducer.admit(&candidate)
            {
                continue;
            }
            let encoded = self.encoder.encode(&candidate);
            self.finished = encoded.is_err();
            return Some(encoded);
        }
    }
}
