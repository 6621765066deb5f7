//! Two-phase assistant reconciliation.
//!
//! Turns a target account plus a candidate email list into symmetric
//! assistant relationships: every validated candidate becomes an assistant
//! of the target (Phase A) and the target becomes an assistant of every
//! validated candidate (Phase B). Individual failures are recorded, never
//! fatal to the run; the only fail-fast condition is a missing session.

use std::fmt;

use crate::api::{ApiClient, UserId};
use crate::auth::{AuthError, SessionManager};

/// Which step of the run produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Validation,
    GrantToTarget,
    GrantToAssistant,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Validation => "validation",
            Phase::GrantToTarget => "grant-to-target",
            Phase::GrantToAssistant => "grant-to-assistant",
        })
    }
}

/// Per-call outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    ApiError,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "ok",
            Status::NotFound => "not-found",
            Status::ApiError => "api-error",
        })
    }
}

/// One recorded outcome of a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileEntry {
    pub email: String,
    pub phase: Phase,
    pub status: Status,
    pub detail: Option<String>,
}

/// Ordered per-email outcomes of one run.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub entries: Vec<ReconcileEntry>,
}

impl ReconcileReport {
    fn record(&mut self, email: &str, phase: Phase, status: Status, detail: Option<String>) {
        self.entries.push(ReconcileEntry {
            email: email.to_string(),
            phase,
            status,
            detail,
        });
    }

    pub fn successes(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == Status::Ok)
            .count()
    }

    pub fn failures(&self) -> usize {
        self.entries.len() - self.successes()
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

/// Runs the two-phase batch against the directory and assistants API.
pub struct Reconciler {
    api: ApiClient,
}

impl Reconciler {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Reconcile `candidate_emails` into symmetric assistant relationships
    /// with `target_email`.
    ///
    /// Fails fast with [`AuthError::NotLoggedIn`] when no valid session is
    /// held, before any network call. Every other failure is recorded in the
    /// report and processing continues.
    pub async fn reconcile(
        &self,
        manager: &mut SessionManager,
        target_email: &str,
        candidate_emails: &[String],
    ) -> Result<ReconcileReport, AuthError> {
        if !manager.is_valid() {
            return Err(AuthError::NotLoggedIn);
        }
        let session = manager.session().cloned().ok_or(AuthError::NotLoggedIn)?;

        let mut report = ReconcileReport::default();

        let target_id = match self.api.resolve_user(target_email, &session).await {
            Ok(id) => id,
            Err(err) => {
                tracing::error!("target {target_email} did not resolve, aborting run: {err}");
                report.record(
                    target_email,
                    Phase::Validation,
                    Status::NotFound,
                    Some(err.to_string()),
                );
                return Ok(report);
            }
        };
        tracing::info!("target {target_email} resolved to {target_id}");

        // Candidates that fail to resolve are recorded and excluded from
        // both grant phases; they never abort the run.
        let mut validated: Vec<&str> = Vec::new();
        for email in candidate_emails {
            match self.api.resolve_user(email, &session).await {
                Ok(_) => {
                    tracing::info!("validated assistant candidate {email}");
                    report.record(email, Phase::Validation, Status::Ok, None);
                    validated.push(email.as_str());
                }
                Err(err) => {
                    // Transport failures skip the candidate the same way an
                    // unknown email does.
                    tracing::warn!("assistant candidate {email} skipped: {err}");
                    report.record(
                        email,
                        Phase::Validation,
                        Status::NotFound,
                        Some(err.to_string()),
                    );
                }
            }
        }
        if validated.is_empty() {
            tracing::warn!("no assistant candidates validated, nothing to grant");
            return Ok(report);
        }

        // Phase A: each validated candidate becomes an assistant of the target.
        for email in &validated {
            match self.api.add_assistant(&target_id, email, &session).await {
                Ok(()) => {
                    tracing::info!("added {email} as assistant to {target_email}");
                    report.record(email, Phase::GrantToTarget, Status::Ok, None);
                }
                Err(err) => {
                    tracing::warn!("failed to add {email} as assistant to {target_email}: {err}");
                    report.record(
                        email,
                        Phase::GrantToTarget,
                        Status::ApiError,
                        Some(err.to_string()),
                    );
                }
            }
        }

        // Phase B: the target becomes an assistant of each candidate. The
        // candidate id is resolved again; directory state may have changed
        // since validation.
        for email in &validated {
            let owner: UserId = match self.api.resolve_user(email, &session).await {
                Ok(id) => id,
                Err(err) => {
                    tracing::warn!("could not re-resolve {email} for reciprocal grant: {err}");
                    report.record(
                        email,
                        Phase::GrantToAssistant,
                        Status::NotFound,
                        Some(err.to_string()),
                    );
                    continue;
                }
            };
            match self.api.add_assistant(&owner, target_email, &session).await {
                Ok(()) => {
                    tracing::info!("added {target_email} as assistant to {email}");
                    report.record(email, Phase::GrantToAssistant, Status::Ok, None);
                }
                Err(err) => {
                    tracing::warn!("failed to add {target_email} as assistant to {email}: {err}");
                    report.record(
                        email,
                        Phase::GrantToAssistant,
                        Status::ApiError,
                        Some(err.to_string()),
                    );
                }
            }
        }

        tracing::info!(
            "reconciliation complete: {} ok, {} failed",
            report.successes(),
            report.failures()
        );
        Ok(report)
    }
}
