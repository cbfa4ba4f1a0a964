//! Error type for the conversion pipeline.

use thiserror::Error;

use dmsh_gmsh::GmshError;
use dmsh_part::PartitionError;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("mesh parse error: {0}")]
    Gmsh(#[from] GmshError),

    #[error("partition error: {0}")]
    Partition(#[from] PartitionError),
}
