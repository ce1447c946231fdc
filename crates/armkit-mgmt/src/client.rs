//! Shared client plumbing for every service module

use armkit_core::config::{Config, PollingConfig, Profile};
use armkit_core::http::{API_VERSION, path_param};
use armkit_core::{
    CoreError, HttpInvoker, Invoker, Operation, PageSequence, RawResponse, Request, Result,
    WaitOptions, next_link_pages,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Endpoint, subscription and transport shared by the service clients
///
/// Cheap to clone; every service client holds its own copy.
#[derive(Clone)]
pub struct ArmClient {
    endpoint: Url,
    subscription_id: String,
    invoker: Arc<dyn Invoker>,
    polling: PollingConfig,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("subscription_id", &self.subscription_id)
            .field("polling", &self.polling)
            .finish()
    }
}

impl ArmClient {
    /// Create a client against `endpoint` for one subscription
    pub fn new(endpoint: &str, subscription_id: &str, invoker: Arc<dyn Invoker>) -> Result<Self> {
        path_param("subscription_id", subscription_id)?;
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CoreError::invalid_argument("endpoint", e.to_string()))?;
        Ok(Self {
            endpoint,
            subscription_id: subscription_id.to_string(),
            invoker,
            polling: PollingConfig::default(),
        })
    }

    /// Build a client from a named profile, with an invoker from its `[http]` table
    pub fn from_profile(name: &str, profile: &Profile) -> Result<Self> {
        let endpoint = profile.endpoint_url(name)?;
        let invoker = Arc::new(HttpInvoker::from_config(&profile.http)?);
        debug!(profile = name, endpoint = %endpoint, "Creating client from profile");
        Ok(Self::new(endpoint.as_str(), &profile.subscription_id, invoker)?
            .with_polling(profile.polling.clone()))
    }

    /// Resolve a profile from `config` (explicit name, default, or first) and build a client
    pub fn from_config(config: &Config, profile: Option<&str>) -> Result<Self> {
        let (name, profile) = config.active_profile(profile)?;
        Self::from_profile(&name, profile)
    }

    /// Replace the polling settings used by the `*_and_wait` workflows
    pub fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.polling = polling;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn invoker(&self) -> Arc<dyn Invoker> {
        self.invoker.clone()
    }

    /// Wait options derived from this client's polling settings
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::from(&self.polling)
    }

    /// `/subscriptions/{id}` followed by `rest`, which must already be encoded
    pub(crate) fn subscription_path(&self, rest: &str) -> String {
        format!(
            "/subscriptions/{}{}",
            urlencoding::encode(&self.subscription_id),
            rest
        )
    }

    /// Absolute URL for an encoded `path` with `api-version` set
    pub(crate) fn url(&self, path: &str, api_version: &str) -> Result<Url> {
        resource_url(&self.endpoint, path, api_version)
    }

    /// Send `request` and require one of `expected`
    pub(crate) async fn send(&self, request: &Request, expected: &[u16]) -> Result<RawResponse> {
        self.invoker.invoke(request).await?.expect_status(expected)
    }

    /// Send `request`, require one of `expected` and parse the body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: &Request,
        expected: &[u16],
    ) -> Result<T> {
        self.send(request, expected).await?.json()
    }

    /// Send the request that starts a long-running operation
    pub(crate) async fn begin<T>(&self, request: Request) -> Result<Operation<T>>
    where
        T: DeserializeOwned + Send,
    {
        let initial = self.invoker.invoke(&request).await?;
        Operation::start(self.invoker.clone(), request, initial)
    }

    /// Lazy listing starting at `url`
    pub(crate) fn pages<T>(&self, url: Url, api_version: &str) -> PageSequence<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        next_link_pages(
            self.invoker.clone(),
            Request::get(url),
            Some(api_version.to_string()),
        )
    }
}

/// Append an encoded `path` to `base` and set `api-version`
///
/// Any path prefix on `base` (a gateway mounted under `/arm`, say) is kept.
pub(crate) fn resource_url(base: &Url, path: &str, api_version: &str) -> Result<Url> {
    if base.cannot_be_a_base() {
        return Err(CoreError::invalid_argument(
            "endpoint",
            format!("'{base}' cannot carry a resource path"),
        ));
    }
    let prefix = base.path().trim_end_matches('/');
    let path = path.trim_start_matches('/');

    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.set_path(&format!("{prefix}/{path}"));
    url.query_pairs_mut().append_pair(API_VERSION, api_version);
    Ok(url)
}
