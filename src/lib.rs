//! Batch-built, mergeable T-Digest in Rust
//!
//! A data structure for approximating the [quantile
//! function](https://en.wikipedia.org/wiki/Quantile_function) of a sample
//! distribution. A digest summarizes a sorted batch of samples as a bounded
//! number of (mean, weight) centroids, small near the tails and large near the
//! median, so extreme quantiles stay accurate while memory stays fixed.
//!
//! Digests are immutable. Two digests built over separate batches can be
//! merged into a new digest approximating one built over both, which makes
//! them suitable for distributed and incremental aggregation.
//!
//! [t-digest
//! paper](https://github.com/tdunning/t-digest/blob/main/docs/t-digest-paper/histo.pdf)
//!
//! ## Example
//!
//! ```rust
//! use tdigest_rs::TDigest;
//!
//! let values: Vec<f64> = (1..=1_000_000).map(f64::from).collect();
//! let t = TDigest::from_sorted(&values, 100.0).unwrap();
//!
//! let ans = t.quantile(0.99);
//! let expected: f64 = 990_000.0;
//!
//! let percentage: f64 = (expected - ans).abs() / expected;
//! assert!(percentage < 0.01);
//! ```
//!
//! ## Merging
//!
//! ```rust
//! use tdigest_rs::TDigest;
//!
//! let low: Vec<f64> = (1..=500).map(f64::from).collect();
//! let high: Vec<f64> = (501..=1000).map(f64::from).collect();
//!
//! let a = TDigest::from_sorted(&low, 10.0).unwrap();
//! let b = TDigest::from_sorted(&high, 10.0).unwrap();
//! let t = a.merge(&b);
//!
//! assert_eq!(t.total_weight(), 1000);
//! assert!((t.median() - 500.0).abs() < 5.0);
//! ```

mod build;
mod centroid;
mod config;
mod error;
mod merge;
mod quantile;
mod scale;
mod sort;
mod store;
mod t_digest;

pub mod batch;

pub use build::build;
pub use centroid::*;
pub use config::*;
pub use error::{Error, Result};
pub use sort::*;
pub use store::*;
pub use t_digest::*;
