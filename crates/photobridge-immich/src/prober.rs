//! Endpoint probing.
//!
//! Deployments expose logically identical operations under different paths,
//! verbs and query styles. A logical operation therefore carries an ordered
//! list of [`Candidate`]s, and [`probe`] executes them in order until one
//! succeeds.
//!
//! Each failed attempt is classified when it happens:
//!
//! - [`Attempt::Retryable`]: the server answered 404 or 405, meaning this
//!   deployment does not expose that path or verb. The next candidate is
//!   tried immediately.
//! - [`Attempt::Fatal`]: anything else. Probing stops and the error is
//!   returned even if candidates remain.
//!
//! When every candidate is retryable-exhausted the error of the last attempt
//! is returned. Attempts are strictly sequential; dropping the returned
//! future cancels the in-flight request and no further candidate is tried.

use std::time::Instant;

use tracing::{debug, trace};

use photobridge_core::{Error, Result};

use crate::transport::{Candidate, Transport};

/// Classified outcome of one failed physical attempt.
#[derive(Debug)]
pub enum Attempt {
    /// Endpoint shape not supported by this deployment (404/405).
    Retryable(Error),
    /// Operation failed; stop probing.
    Fatal(Error),
}

impl Attempt {
    /// Classify a failed attempt.
    pub fn classify(error: Error) -> Self {
        if error.is_retryable() {
            Self::Retryable(error)
        } else {
            Self::Fatal(error)
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }

    pub fn into_error(self) -> Error {
        match self {
            Self::Retryable(e) | Self::Fatal(e) => e,
        }
    }
}

/// Execute `candidates` in order and return the first 2xx body.
///
/// `op` names the logical operation for logging.
pub async fn probe(
    transport: &dyn Transport,
    op: &str,
    candidates: &[Candidate],
) -> Result<Vec<u8>> {
    if candidates.is_empty() {
        return Err(Error::InvalidInput(format!(
            "{}: no candidate requests to probe",
            op
        )));
    }

    let start = Instant::now();
    let mut last_error = None;

    for (attempt, candidate) in candidates.iter().enumerate() {
        trace!(
            subsystem = "immich",
            component = "prober",
            op,
            attempt,
            candidate = %candidate,
            "Attempting candidate"
        );

        let error = match transport.execute(candidate).await {
            Ok(body) => {
                debug!(
                    subsystem = "immich",
                    component = "prober",
                    op,
                    attempt,
                    candidate = %candidate,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Candidate succeeded"
                );
                return Ok(body);
            }
            Err(e) => e,
        };

        match Attempt::classify(error) {
            Attempt::Retryable(e) => {
                trace!(
                    subsystem = "immich",
                    component = "prober",
                    op,
                    attempt,
                    candidate = %candidate,
                    status = e.status(),
                    "Candidate not supported by deployment"
                );
                last_error = Some(e);
            }
            Attempt::Fatal(e) => {
                debug!(
                    subsystem = "immich",
                    component = "prober",
                    op,
                    attempt,
                    candidate = %candidate,
                    error = %e,
                    "Candidate failed"
                );
                return Err(e);
            }
        }
    }

    debug!(
        subsystem = "immich",
        component = "prober",
        op,
        attempts = candidates.len(),
        "All candidates unsupported"
    );
    Err(last_error
        .unwrap_or_else(|| Error::InvalidInput(format!("{}: probing ended without result", op))))
}
