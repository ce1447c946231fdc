//! Polling strategy detection
//!
//! The initial response of a mutating call decides how (and whether) the
//! operation is polled. Header precedence follows the resource-management
//! convention: a status monitor header beats `Location`, which beats an
//! in-progress `provisioningState` on the resource itself.

use super::status::OperationStatus;
use crate::error::{CoreError, Result};
use crate::http::{Method, RawResponse, Request};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::warn;
use url::Url;

const AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";
const OPERATION_LOCATION: &str = "operation-location";
const LOCATION: &str = "location";
const RETRY_AFTER: &str = "retry-after";
const RETRY_AFTER_MS: &str = "retry-after-ms";
const X_MS_RETRY_AFTER_MS: &str = "x-ms-retry-after-ms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PollingStrategy {
    /// Poll a status monitor whose body carries `status`; fetch the result separately
    StatusMonitor { monitor: Url, final_get: Option<Url> },
    /// Poll the `Location` URL until it stops answering 202; its body is the result
    Location { url: Url },
    /// Re-read the resource until its `provisioningState` is terminal
    ResourceState { url: Url },
    /// Completed with the initial response
    Completed,
}

impl PollingStrategy {
    /// Pick a strategy and the starting status from the initial response
    pub(crate) fn detect(
        request: &Request,
        initial: &RawResponse,
    ) -> Result<(Self, OperationStatus)> {
        if !initial.is_success() {
            return Err(CoreError::from_response(initial));
        }

        let method = request.method();
        let resolve = |header: &str| -> Result<Option<Url>> {
            initial
                .header(header)
                .filter(|v| !v.trim().is_empty())
                .map(|v| {
                    request.url().join(v.trim()).map_err(|e| {
                        CoreError::InvalidInitialResponse {
                            status: initial.status(),
                            reason: format!("invalid {header} header '{v}': {e}"),
                        }
                    })
                })
                .transpose()
        };

        let monitor = match resolve(AZURE_ASYNC_OPERATION)? {
            Some(url) => Some(url),
            None => resolve(OPERATION_LOCATION)?,
        };
        let location = resolve(LOCATION)?;

        if let Some(monitor) = monitor {
            let final_get = if *method == Method::PUT || *method == Method::PATCH {
                Some(request.url().clone())
            } else {
                location
            };
            let status = body_status(initial, "status").unwrap_or(OperationStatus::Running);
            return Ok((PollingStrategy::StatusMonitor { monitor, final_get }, status));
        }

        if let Some(url) = location {
            let status = body_status(initial, "status").unwrap_or(OperationStatus::Running);
            return Ok((PollingStrategy::Location { url }, status));
        }

        if initial.status() == 202 {
            return Err(CoreError::InvalidInitialResponse {
                status: 202,
                reason: "202 Accepted without a polling header".to_string(),
            });
        }

        let provisioning = provisioning_state(initial);
        if (*method == Method::PUT || *method == Method::PATCH)
            && matches!(
                provisioning,
                Some(OperationStatus::Running | OperationStatus::NotStarted)
            )
        {
            return Ok((
                PollingStrategy::ResourceState {
                    url: request.url().clone(),
                },
                OperationStatus::Running,
            ));
        }

        Ok((
            PollingStrategy::Completed,
            provisioning
                .filter(|s| s.is_terminal())
                .unwrap_or(OperationStatus::Succeeded),
        ))
    }

    /// URL the next poll is sent to
    pub(crate) fn poll_url(&self) -> Option<&Url> {
        match self {
            PollingStrategy::StatusMonitor { monitor, .. } => Some(monitor),
            PollingStrategy::Location { url } | PollingStrategy::ResourceState { url } => {
                Some(url)
            }
            PollingStrategy::Completed => None,
        }
    }

    /// URL of the final resource GET, for strategies that need one
    pub(crate) fn final_url(&self) -> Option<&Url> {
        match self {
            PollingStrategy::StatusMonitor { final_get, .. } => final_get.as_ref(),
            _ => None,
        }
    }

    /// Status reported by one poll response
    ///
    /// A status embedded in the body wins over the HTTP status code.
    pub(crate) fn evaluate(&self, method: &Method, response: &RawResponse) -> OperationStatus {
        if !response.is_success() {
            if matches!(self, PollingStrategy::ResourceState { .. })
                && *method == Method::DELETE
                && response.status() == 404
            {
                return OperationStatus::Succeeded;
            }
            return OperationStatus::Failed;
        }

        let embedded = match self {
            PollingStrategy::ResourceState { .. } => provisioning_state(response),
            _ => body_status(response, "status"),
        };
        if let Some(status) = embedded {
            return status;
        }

        match (self, response.status()) {
            (PollingStrategy::ResourceState { .. }, _) => OperationStatus::Succeeded,
            (_, 202) => OperationStatus::Running,
            _ => OperationStatus::Succeeded,
        }
    }
}

fn body_status(response: &RawResponse, field: &str) -> Option<OperationStatus> {
    let body = response.json_value()?;
    body.get(field)
        .and_then(|v| v.as_str())
        .and_then(OperationStatus::parse)
}

fn provisioning_state(response: &RawResponse) -> Option<OperationStatus> {
    let body = response.json_value()?;
    body.get("properties")
        .and_then(|p| p.get("provisioningState"))
        .and_then(|v| v.as_str())
        .map(OperationStatus::from_provisioning_state)
}

/// Server-suggested delay before the next poll
///
/// Millisecond headers take precedence over `Retry-After`, which may be
/// either delta-seconds or an HTTP date.
pub(crate) fn retry_after(response: &RawResponse) -> Option<Duration> {
    for header in [RETRY_AFTER_MS, X_MS_RETRY_AFTER_MS] {
        if let Some(value) = response.header(header) {
            match value.trim().parse::<u64>() {
                Ok(ms) => return Some(Duration::from_millis(ms)),
                Err(_) => warn!(header, value, "Ignoring unparseable retry header"),
            }
        }
    }

    let value = response.header(RETRY_AFTER)?.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    match DateTime::parse_from_rfc2822(value) {
        Ok(at) => {
            let wait = at.with_timezone(&Utc) - Utc::now();
            Some(wait.to_std().unwrap_or(Duration::ZERO))
        }
        Err(_) => {
            warn!(value, "Ignoring unparseable Retry-After header");
            None
        }
    }
}
