#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/karma-attribution/karma/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod loader;

pub use error::{DataError, Result};
pub use event::{Dataset, TouchEvent};
pub use loader::{DatasetSchema, load_csv, read_events};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
