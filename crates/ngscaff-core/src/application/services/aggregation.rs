//! Aggregation Join - fan-out registry lookups, fan-in on completion.
//!
//! One lookup per requested name, all in flight at once on the current task.
//! The join returns only after every lookup has completed (or timed out);
//! the completed counter is checked against the request count before the
//! report is handed back.
//!
//! Failure policy is best-effort: a failed or timed-out lookup lands in
//! [`JoinReport::failures`] and the rest proceed.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::RegistryClient},
    domain::{ExtraComponentRequest, PackageInfo, ResolvedComponent},
    error::{ScaffoldError, ScaffoldResult},
};

/// A lookup that did not produce a component.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupFailure {
    pub name: String,
    pub error: ScaffoldError,
}

/// Outcome of a join.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinReport {
    /// Successful lookups in completion order.
    pub resolved: Vec<ResolvedComponent>,
    pub failures: Vec<LookupFailure>,
    pub requested: usize,
    pub completed: usize,
}

impl JoinReport {
    pub fn is_complete(&self) -> bool {
        self.completed == self.requested
    }
}

pub struct AggregationJoin {
    registry: Arc<dyn RegistryClient>,
    timeout: Option<Duration>,
}

impl AggregationJoin {
    /// A zero timeout means wait indefinitely.
    pub fn new(registry: Arc<dyn RegistryClient>, timeout: Option<Duration>) -> Self {
        Self {
            registry,
            timeout: timeout.filter(|t| !t.is_zero()),
        }
    }

    #[instrument(skip_all, fields(requested = request.len()))]
    pub async fn resolve_all(&self, request: &ExtraComponentRequest) -> JoinReport {
        let requested = request.len();
        if requested == 0 {
            debug!("no extra components requested");
            return JoinReport::default();
        }

        let mut pending: FuturesUnordered<_> =
            request.names().iter().map(|name| self.lookup(name)).collect();

        let mut report = JoinReport {
            requested,
            ..JoinReport::default()
        };

        while let Some((name, outcome)) = pending.next().await {
            report.completed += 1;
            match outcome {
                Ok(info) => {
                    let component = ResolvedComponent::from_info(name, &info);
                    debug!(
                        component = name,
                        version = component.version(),
                        completed = report.completed,
                        requested,
                        "lookup completed"
                    );
                    report.resolved.push(component);
                }
                Err(error) => {
                    warn!(component = name, error = %error, "lookup failed");
                    report.failures.push(LookupFailure {
                        name: name.to_string(),
                        error,
                    });
                }
            }
        }

        debug_assert!(report.is_complete());
        info!(
            resolved = report.resolved.len(),
            failed = report.failures.len(),
            "all lookups completed"
        );
        report
    }

    async fn lookup<'a>(&self, name: &'a str) -> (&'a str, ScaffoldResult<PackageInfo>) {
        debug!(component = name, "lookup started");
        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.registry.info(name))
                .await
                .unwrap_or_else(|_| {
                    Err(ApplicationError::RegistryTimeout {
                        package: name.to_string(),
                        seconds: limit.as_secs(),
                    }
                    .into())
                }),
            None => self.registry.info(name).await,
        };
        (name, outcome)
    }
}
