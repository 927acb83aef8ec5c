//! Timestamped run directories.
//!
//! ```no_run
//! use logdir::{LogDir, ReadmeOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let logdir = LogDir::new("My Experiment", "logs")?;
//! // logs/2020-10-31_06-20-45_my-experiment/metrics/loss.csv
//! let loss = logdir.file("metrics/loss.csv")?;
//! logdir.save_data(&[("lr", 0.1)], "hparams.json")?;
//! logdir.readme(&ReadmeOptions::default())?;
//! # let _ = loss;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod gitops;
pub mod logging;
mod logdir;
pub mod slug;
mod util;

pub use config::{LogDirConfig, load_from_path};
pub use error::SaveError;
pub use formats::DataFormat;
pub use logdir::{LogDir, ReadmeOptions, Resolve};
pub use slug::{SlugOptions, SlugStyle, slugify, slugify_simple};
