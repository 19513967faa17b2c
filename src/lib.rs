//! This crate answers approximate quantile queries over a stream of
//! observations without keeping the stream around.
//!
//! Exact order statistics want every observation you ever saw kept in
//! memory. For telemetry work -- latency percentiles, size
//! distributions -- that is a non-starter, and an approximation with a
//! known error bound is just as useful. The estimator here implements
//! the targeted variant of the Cormode, Korn, Muthukrishnan, Srivastava
//! algorithm: the caller names the quantiles it will ask about, each
//! with its own error allowance, and the summary spends its memory
//! where those targets demand precision.
//!
//! Flushes and compression emit records through the `log` facade at
//! trace and debug level. No logger is ever installed by this crate and
//! none needs to be.
#![deny(missing_docs, missing_copy_implementations, missing_debug_implementations,
        unstable_features, unused_import_braces)]

pub mod error;
pub mod estimator;
pub mod quantile;
