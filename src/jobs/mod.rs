//! Background jobs.
//!
//! Services request jobs through their context; the executor hands them to
//! a [`JobQueue`] only after the run's transaction has committed.

#[cfg(feature = "apalis")]
mod apalis_queue;
mod queue;

#[cfg(feature = "apalis")]
pub use apalis_queue::ApalisJobQueue;
pub use queue::{JobBuffer, JobQueue, JobRequest, LogJobQueue, MemoryJobQueue};

#[cfg(test)]
pub use queue::MockJobQueue;
