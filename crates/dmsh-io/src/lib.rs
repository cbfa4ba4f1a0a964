//! Per-partition JSON output for the mesh converter.
//!
//! This crate renders the partition engine's results into one
//! self-contained JSON document per partition and drives the whole
//! parse → assemble → reconcile → extract → write pipeline.

mod convert;
mod document;
mod error;

pub use convert::{ConvertConfig, ConvertReport, convert, write_partition_file};
pub use document::{ElementGroupRecord, InterfaceRecord, NodeRecord, PartitionDocument};
pub use error::ConvertError;
