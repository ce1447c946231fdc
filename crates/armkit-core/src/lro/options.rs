use crate::config::PollingConfig;
use crate::progress::{ProgressCallback, ProgressEvent};
use std::fmt;
use std::time::Duration;

/// Default delay between polls when the service suggests none
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// How `wait_for_completion` paces itself
///
/// # Example
///
/// ```rust
/// use armkit_core::lro::WaitOptions;
/// use std::time::Duration;
///
/// let options = WaitOptions::new()
///     .interval(Duration::from_secs(5))
///     .timeout(Duration::from_secs(600))
///     .on_progress(|event| println!("{event:?}"));
/// assert_eq!(options.poll_interval(), Duration::from_secs(5));
/// ```
pub struct WaitOptions {
    pub(crate) interval: Duration,
    pub(crate) timeout: Option<Duration>,
    pub(crate) honor_retry_after: bool,
    pub(crate) on_progress: Option<ProgressCallback>,
}

impl WaitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay between polls
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Give up with `CoreError::WaitTimeout` after this long
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Let `Retry-After` style headers override the interval for one iteration
    pub fn honor_retry_after(mut self, honor: bool) -> Self {
        self.honor_retry_after = honor;
        self
    }

    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressEvent) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn poll_interval(&self) -> Duration {
        self.interval
    }

    pub fn wait_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            honor_retry_after: true,
            on_progress: None,
        }
    }
}

impl fmt::Debug for WaitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitOptions")
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .field("honor_retry_after", &self.honor_retry_after)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl From<&PollingConfig> for WaitOptions {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs),
            timeout: config.timeout_secs.map(Duration::from_secs),
            honor_retry_after: config.honor_retry_after,
            on_progress: None,
        }
    }
}
