//! # armkit-core
//!
//! Shared machinery for resource-management service clients:
//!
//! - **[`lro`]** - wrap the response of a mutating call, poll it to a
//!   terminal state, and surface the final resource or failure
//! - **[`paging`]** - present `nextLink`-style listings as one lazy sequence
//! - **[`config`]** - TOML profiles naming endpoint, subscription and
//!   polling settings
//! - **[`blocking`]** - synchronous twins of the async entry points
//!
//! Every network call goes through the [`Invoker`] trait, so both
//! algorithms can be tested against a mock server or a scripted invoker.
//!
//! ## Example
//!
//! ```rust,ignore
//! use armkit_core::{HttpInvoker, Operation, Request, WaitOptions};
//! use std::sync::Arc;
//!
//! let invoker = Arc::new(HttpInvoker::new()?);
//! let request = Request::new(Method::PUT, url).with_json(&disk)?;
//! let initial = invoker.invoke(&request).await?;
//!
//! let op: Operation<Disk> = Operation::start(invoker, request, initial)?;
//! let disk = op.wait(&WaitOptions::new()).await?;
//! ```

pub mod blocking;
pub mod config;
pub mod error;
pub mod http;
pub mod lro;
pub mod paging;
pub mod progress;

pub use blocking::block_on;
pub use error::{CoreError, ErrorDetail, Result};
pub use http::{HttpInvoker, Invoker, Method, RawResponse, Request};
pub use lro::{NoContent, Operation, OperationStatus, WaitOptions, WaitOutcome};
pub use paging::{Page, PageSequence, next_link_pages};
pub use progress::{ProgressCallback, ProgressEvent};

// Re-exported so callers can cancel waits without naming tokio-util themselves
pub use tokio_util::sync::CancellationToken;
