//! Long-running operation poller
//!
//! Mutating calls against a resource-management API often return before the
//! work is done. [`Operation`] wraps the initial response, works out how the
//! service wants to be polled, and exposes a single poll step plus a wait loop.
//!
//! # Example
//!
//! ```rust,ignore
//! use armkit_core::lro::{Operation, WaitOptions, WaitOutcome};
//! use tokio_util::sync::CancellationToken;
//!
//! let initial = invoker.invoke(&request).await?;
//! let mut op: Operation<Disk> = Operation::start(invoker.clone(), request, initial)?;
//!
//! let cancel = CancellationToken::new();
//! match op.wait_for_completion(&WaitOptions::new(), &cancel).await? {
//!     WaitOutcome::Succeeded => println!("created {:?}", op.value()),
//!     WaitOutcome::CancelRequested => println!("stopped waiting at {}", op.status()),
//! }
//! ```

mod operation;
mod options;
mod status;
mod strategy;

pub use operation::{NoContent, Operation, WaitOutcome};
pub use options::{DEFAULT_POLL_INTERVAL, WaitOptions};
pub use status::OperationStatus;
