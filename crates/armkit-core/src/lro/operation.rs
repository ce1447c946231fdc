use super::options::WaitOptions;
use super::status::OperationStatus;
use super::strategy::{PollingStrategy, retry_after};
use crate::blocking::block_on;
use crate::error::{CoreError, ErrorDetail, Result};
use crate::http::{Invoker, RawResponse, Request};
use crate::progress::{ProgressEvent, emit};
use reqwest::header::CONTENT_TYPE;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};
use url::Url;

/// Result type for operations whose final body carries nothing useful
///
/// Deserializes from any JSON value, so a delete that ends with `{}` or a
/// status document still completes cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoContent;

impl<'de> Deserialize<'de> for NoContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer).map(|_| NoContent)
    }
}

/// How a wait ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The operation reached `Succeeded`
    Succeeded,
    /// The caller's cancellation token fired; the operation is still running remotely
    CancelRequested,
}

/// One in-flight asynchronous mutation
///
/// Created from the response of the call that started it, mutated only by
/// [`poll`](Operation::poll), and never leaves a terminal status once it has
/// reached one.
pub struct Operation<T> {
    invoker: Arc<dyn Invoker>,
    request: Request,
    strategy: PollingStrategy,
    last_response: RawResponse,
    status: OperationStatus,
    value: Option<T>,
}

impl<T> std::fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("method", self.request.method())
            .field("url", &self.request.url().as_str())
            .field("strategy", &self.strategy)
            .field("status", &self.status)
            .field("has_value", &self.value.is_some())
            .finish()
    }
}

impl<T: DeserializeOwned + Send> Operation<T> {
    /// Wrap the initial response of a mutating call
    ///
    /// Makes no network calls. A response that already carries the final
    /// resource yields an operation that is `Succeeded` immediately.
    pub fn start(
        invoker: Arc<dyn Invoker>,
        request: Request,
        initial: RawResponse,
    ) -> Result<Self> {
        let (strategy, status) = PollingStrategy::detect(&request, &initial)?;

        let value = if strategy == PollingStrategy::Completed && status == OperationStatus::Succeeded
        {
            parse_value(&initial).map_err(|e| CoreError::InvalidInitialResponse {
                status: initial.status(),
                reason: e.to_string(),
            })?
        } else {
            None
        };

        debug!(
            method = %request.method(),
            url = %request.url(),
            ?strategy,
            %status,
            "Operation started"
        );

        Ok(Self {
            invoker,
            request,
            strategy,
            last_response: initial,
            status,
            value,
        })
    }

    pub fn status(&self) -> OperationStatus {
        self.status
    }

    pub fn is_done(&self) -> bool {
        self.status.is_terminal()
    }

    /// Final value; present only once the operation has succeeded with a body
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// The request that started the operation
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Most recent raw response (initial, poll, or final GET)
    pub fn last_response(&self) -> &RawResponse {
        &self.last_response
    }

    /// URL that `poll` queries, if the operation needs polling at all
    pub fn polling_url(&self) -> Option<&Url> {
        self.strategy.poll_url()
    }

    /// Error payload of a failed operation, as reported by the service
    pub fn failure(&self) -> Option<ErrorDetail> {
        match self.status {
            OperationStatus::Failed | OperationStatus::Canceled => {
                ErrorDetail::from_body(self.last_response.body())
            }
            _ => None,
        }
    }

    /// Issue one status request and fold the answer into the operation
    ///
    /// A no-op on terminal operations. On a transport error, or when the
    /// final resource GET fails, the operation is left exactly as it was.
    pub async fn poll(&mut self) -> Result<OperationStatus> {
        if self.status.is_terminal() {
            trace!(status = %self.status, "Poll on terminal operation ignored");
            return Ok(self.status);
        }
        let Some(url) = self.strategy.poll_url().cloned() else {
            return Ok(self.status);
        };

        let response = self.invoker.invoke(&self.follow_up(url.clone())).await?;
        let status = self.strategy.evaluate(self.request.method(), &response);
        debug!(url = %url, http_status = response.status(), %status, "Polled operation");

        if status != OperationStatus::Succeeded {
            self.last_response = response;
            self.status = status;
            return Ok(status);
        }

        let final_response = match self.strategy.final_url().cloned() {
            Some(final_url) => {
                debug!(url = %final_url, "Fetching final resource");
                self.invoker
                    .invoke(&self.follow_up(final_url))
                    .await?
                    .expect_status(&[200, 201, 204])?
            }
            None => response,
        };
        let value = parse_value(&final_response)?;

        self.last_response = final_response;
        self.value = value;
        self.status = OperationStatus::Succeeded;
        Ok(self.status)
    }

    /// Poll until the operation is terminal or `cancel` fires
    ///
    /// Sleeps between polls for `options.interval`, or for the server's
    /// `Retry-After` suggestion when there is one. Cancellation is local: it
    /// stops polling but does not ask the service to abort anything.
    ///
    /// A `Failed` or `Canceled` terminal state is returned as
    /// [`CoreError::OperationFailed`].
    pub async fn wait_for_completion(
        &mut self,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<WaitOutcome> {
        let start = Instant::now();
        let operation = self.describe();

        emit(
            &options.on_progress,
            ProgressEvent::Started {
                operation: operation.clone(),
            },
        );

        loop {
            if self.status.is_terminal() {
                return self.finish(options, &operation);
            }

            let elapsed = start.elapsed();
            let mut delay = self.next_delay(options);
            if let Some(timeout) = options.timeout {
                if elapsed >= timeout {
                    return Err(CoreError::WaitTimeout(timeout));
                }
                delay = delay.min(timeout - elapsed);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(operation = %operation, "Wait cancelled by caller");
                    return Ok(WaitOutcome::CancelRequested);
                }
                _ = tokio::time::sleep(delay) => {}
            }
            if cancel.is_cancelled() {
                info!(operation = %operation, "Wait cancelled by caller");
                return Ok(WaitOutcome::CancelRequested);
            }

            let status = self.poll().await?;
            emit(
                &options.on_progress,
                ProgressEvent::Polling {
                    operation: operation.clone(),
                    status,
                    elapsed: start.elapsed(),
                },
            );
        }
    }

    /// Wait without cancellation and hand back the final value
    pub async fn wait(mut self, options: &WaitOptions) -> Result<Option<T>> {
        let never = CancellationToken::new();
        self.wait_for_completion(options, &never).await?;
        Ok(self.value)
    }

    /// Blocking twin of [`poll`](Operation::poll)
    pub fn poll_blocking(&mut self) -> Result<OperationStatus> {
        block_on(self.poll())?
    }

    /// Blocking twin of [`wait_for_completion`](Operation::wait_for_completion)
    pub fn wait_for_completion_blocking(
        &mut self,
        options: &WaitOptions,
        cancel: &CancellationToken,
    ) -> Result<WaitOutcome> {
        block_on(self.wait_for_completion(options, cancel))?
    }

    /// Blocking twin of [`wait`](Operation::wait)
    pub fn wait_blocking(self, options: &WaitOptions) -> Result<Option<T>> {
        block_on(self.wait(options))?
    }

    fn next_delay(&self, options: &WaitOptions) -> Duration {
        if options.honor_retry_after
            && let Some(suggested) = retry_after(&self.last_response)
        {
            trace!(?suggested, "Using server-suggested poll delay");
            return suggested;
        }
        options.interval
    }

    fn finish(&self, options: &WaitOptions, operation: &str) -> Result<WaitOutcome> {
        match self.status {
            OperationStatus::Succeeded => {
                info!(operation = %operation, "Operation succeeded");
                emit(
                    &options.on_progress,
                    ProgressEvent::Completed {
                        operation: operation.to_string(),
                    },
                );
                Ok(WaitOutcome::Succeeded)
            }
            status => {
                let err = CoreError::operation_failed(&self.last_response);
                info!(operation = %operation, %status, "Operation did not succeed");
                emit(
                    &options.on_progress,
                    ProgressEvent::Failed {
                        operation: operation.to_string(),
                        error: err.to_string(),
                    },
                );
                Err(err)
            }
        }
    }

    /// GET on `url` carrying the starting request's headers, minus its body headers
    fn follow_up(&self, url: Url) -> Request {
        let mut headers = self.request.headers().clone();
        headers.remove(CONTENT_TYPE);
        Request::get(url).with_headers(headers)
    }

    fn describe(&self) -> String {
        format!("{} {}", self.request.method(), self.request.url().path())
    }
}

fn parse_value<T: DeserializeOwned>(response: &RawResponse) -> Result<Option<T>> {
    if response.is_body_empty() {
        return Ok(None);
    }
    response.json().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::header::{HeaderMap, HeaderValue};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays canned responses and counts calls
    struct Scripted {
        responses: Mutex<VecDeque<RawResponse>>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(responses: Vec<RawResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Invoker for Scripted {
        async fn invoke(&self, _request: &Request) -> Result<RawResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| CoreError::Transport {
                    message: "script exhausted".to_string(),
                    source: None,
                })
        }
    }

    fn response(status: u16, headers: &[(&'static str, &str)], body: &str) -> RawResponse {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        RawResponse::new(status, map, body.as_bytes().to_vec())
    }

    fn put_request() -> Request {
        Request::new(
            crate::http::Method::PUT,
            Url::parse("https://mgmt.example.com/disks/d1").unwrap(),
        )
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Disk {
        name: String,
    }

    #[tokio::test]
    async fn test_synchronous_completion_makes_no_calls() {
        let invoker = Scripted::new(vec![]);
        let mut op: Operation<Disk> = Operation::start(
            invoker.clone(),
            put_request(),
            response(200, &[], r#"{"name":"d1"}"#),
        )
        .unwrap();

        assert_eq!(op.status(), OperationStatus::Succeeded);
        assert_eq!(op.value(), Some(&Disk { name: "d1".to_string() }));
        assert_eq!(op.poll().await.unwrap(), OperationStatus::Succeeded);
        assert_eq!(invoker.calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_leaves_state_untouched() {
        let invoker = Scripted::new(vec![]);
        let mut op: Operation<Disk> = Operation::start(
            invoker.clone(),
            put_request(),
            response(202, &[("location", "https://mgmt.example.com/poll")], ""),
        )
        .unwrap();

        let err = op.poll().await.unwrap_err();
        assert!(matches!(err, CoreError::Transport { .. }));
        assert_eq!(op.status(), OperationStatus::Running);
        assert_eq!(op.last_response().status(), 202);
    }

    #[tokio::test]
    async fn test_failed_final_get_keeps_operation_running() {
        let invoker = Scripted::new(vec![
            response(200, &[], r#"{"status":"Succeeded"}"#),
            response(500, &[], ""),
        ]);
        let mut op: Operation<Disk> = Operation::start(
            invoker.clone(),
            put_request(),
            response(201, &[("azure-asyncoperation", "https://mgmt.example.com/ops/1")], ""),
        )
        .unwrap();

        let err = op.poll().await.unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(op.status(), OperationStatus::Running);
        assert!(op.value().is_none());
        assert_eq!(invoker.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_detail_is_exposed() {
        let invoker = Scripted::new(vec![response(
            200,
            &[],
            r#"{"status":"Failed","error":{"code":"QuotaExceeded","message":"no capacity"}}"#,
        )]);
        let mut op: Operation<Disk> = Operation::start(
            invoker,
            put_request(),
            response(201, &[("azure-asyncoperation", "https://mgmt.example.com/ops/1")], ""),
        )
        .unwrap();

        assert_eq!(op.poll().await.unwrap(), OperationStatus::Failed);
        assert_eq!(
            op.failure().and_then(|e| e.code),
            Some("QuotaExceeded".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_content_accepts_any_body() {
        let invoker = Scripted::new(vec![response(200, &[], r#"{"status":"Succeeded"}"#)]);
        let request = Request::new(
            crate::http::Method::DELETE,
            Url::parse("https://mgmt.example.com/disks/d1").unwrap(),
        );
        let mut op: Operation<NoContent> = Operation::start(
            invoker,
            request,
            response(202, &[("location", "https://mgmt.example.com/poll")], ""),
        )
        .unwrap();

        assert_eq!(op.poll().await.unwrap(), OperationStatus::Succeeded);
        assert_eq!(op.value(), Some(&NoContent));
    }

    #[tokio::test]
    async fn test_wait_times_out() {
        let invoker = Scripted::new(
            (0..100)
                .map(|_| response(202, &[], ""))
                .collect(),
        );
        let op: Operation<Disk> = Operation::start(
            invoker,
            put_request(),
            response(202, &[("location", "https://mgmt.example.com/poll")], ""),
        )
        .unwrap();

        let options = WaitOptions::new()
            .interval(Duration::from_millis(5))
            .timeout(Duration::from_millis(40));
        let err = op.wait(&options).await.unwrap_err();
        assert!(matches!(err, CoreError::WaitTimeout(_)));
    }

    #[tokio::test]
    async fn test_progress_events() {
        let invoker = Scripted::new(vec![
            response(202, &[], ""),
            response(200, &[], r#"{"name":"d1"}"#),
        ]);
        let op: Operation<Disk> = Operation::start(
            invoker,
            put_request(),
            response(202, &[("location", "https://mgmt.example.com/poll")], ""),
        )
        .unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let options = WaitOptions::new()
            .interval(Duration::from_millis(1))
            .on_progress(move |event| sink.lock().unwrap().push(event));

        let disk = op.wait(&options).await.unwrap();
        assert_eq!(disk, Some(Disk { name: "d1".to_string() }));

        let events = events.lock().unwrap();
        assert!(matches!(events.first(), Some(ProgressEvent::Started { .. })));
        let polls = events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Polling { .. }))
            .count();
        assert_eq!(polls, 2);
        assert!(matches!(events.last(), Some(ProgressEvent::Completed { .. })));
    }
}
