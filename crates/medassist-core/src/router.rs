//! Backend selection and fallback.
//!
//! The router holds one `Generator` per backend kind. A request names the
//! session's selected backend; the router tries it once, then the local
//! backend once, and reports every failure it skipped so the caller can
//! journal it.

use tracing::{debug, warn};

use medassist_contracts::{error::GenerationError, session::BackendKind};

use crate::traits::Generator;

/// The backend every request falls back to.
pub const FALLBACK_BACKEND: BackendKind = BackendKind::Local;

/// Result of one routed generation request.
#[derive(Debug)]
pub struct RouteOutcome {
    /// The backend that answered and its text, or the terminal error.
    pub result: Result<(BackendKind, String), GenerationError>,
    /// Backends that were tried and failed, in attempt order.
    pub failures: Vec<(BackendKind, GenerationError)>,
}

/// Registry of generation backends with an explicit fallback order.
#[derive(Default)]
pub struct BackendRouter {
    backends: Vec<Box<dyn Generator>>,
}

impl BackendRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend. A second backend of the same kind replaces the first
    /// but keeps its position.
    pub fn register(&mut self, generator: Box<dyn Generator>) {
        let kind = generator.kind();
        match self.backends.iter().position(|g| g.kind() == kind) {
            Some(idx) => self.backends[idx] = generator,
            None => self.backends.push(generator),
        }
    }

    /// Builder-style `register`.
    pub fn with(mut self, generator: Box<dyn Generator>) -> Self {
        self.register(generator);
        self
    }

    /// Registered backends in registration (priority) order.
    pub fn available(&self) -> Vec<BackendKind> {
        self.backends.iter().map(|g| g.kind()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// The highest-priority registered backend.
    pub fn default_backend(&self) -> Option<BackendKind> {
        self.backends.first().map(|g| g.kind())
    }

    /// The order backends are tried for a request selecting `selected`:
    /// the selection, then the fallback, never the same backend twice.
    pub fn attempt_order(selected: BackendKind) -> Vec<BackendKind> {
        let mut order = vec![selected];
        if selected != FALLBACK_BACKEND {
            order.push(FALLBACK_BACKEND);
        }
        order
    }

    fn get(&self, kind: BackendKind) -> Option<&dyn Generator> {
        self.backends.iter().find(|g| g.kind() == kind).map(|g| g.as_ref())
    }

    /// Generate with `selected` (or the default backend), falling back once.
    ///
    /// Returns `GenerationError::NoBackend` when nothing is registered and
    /// `GenerationError::Exhausted` when every attempted backend failed.
    pub fn generate(
        &self,
        selected: Option<BackendKind>,
        system_prompt: &str,
        user_prompt: &str,
    ) -> RouteOutcome {
        let mut failures = Vec::new();

        let Some(selected) = selected.or_else(|| self.default_backend()) else {
            return RouteOutcome { result: Err(GenerationError::NoBackend), failures };
        };

        let mut attempted = false;
        for kind in Self::attempt_order(selected) {
            let Some(generator) = self.get(kind) else {
                debug!(backend = %kind, "backend not registered, skipping");
                continue;
            };
            attempted = true;

            match generator.generate(system_prompt, user_prompt) {
                Ok(text) => {
                    debug!(backend = %kind, chars = text.len(), "generation succeeded");
                    return RouteOutcome { result: Ok((kind, text)), failures };
                }
                Err(e) => {
                    warn!(backend = %kind, error = %e, "generation failed");
                    failures.push((kind, e));
                }
            }
        }

        let result = if attempted {
            Err(GenerationError::Exhausted {
                attempts: failures.iter().map(|(k, e)| format!("{k}: {e}")).collect(),
            })
        } else {
            Err(GenerationError::NoBackend)
        };
        RouteOutcome { result, failures }
    }
}
