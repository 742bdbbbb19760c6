//! # Arealens Dataset
//!
//! Typed access to the real-estate snapshot: one CSV file of per-area,
//! per-year observations that is re-read on every request and never cached.
//! A missing or unusable snapshot degrades to `None` so request handling can
//! fall back to guidance text instead of failing.
//!
//! ```no_run
//! use arealens_dataset::DatasetStore;
//!
//! let store = DatasetStore::new("data/sample_data.csv");
//! if let Some(dataset) = store.load() {
//!     println!("{} rows across {} areas", dataset.len(), dataset.areas().len());
//! }
//! ```

mod error;
mod record;
mod store;

pub use error::DatasetError;
pub use error::Result;
pub use record::Columns;
pub use record::Dataset;
pub use record::Record;
pub use store::DatasetStore;
