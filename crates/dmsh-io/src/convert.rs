//! The full conversion pipeline: parse, assemble, reconcile, then write
//! one JSON document per partition.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use dmsh_part::{ExtractOptions, Interfaces, assemble, extract};

use crate::document::PartitionDocument;
use crate::error::ConvertError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub mesh_path: PathBuf,
    /// Where partition documents are written; defaults to the mesh file's
    /// directory.
    pub output_dir: Option<PathBuf>,
    pub options: ExtractOptions,
    /// Emit original node and element ids alongside the data.
    pub write_indices: bool,
    /// Opaque interface-coupling label for downstream consumers (e.g.
    /// "feti"); copied into every document, never interpreted here.
    pub method: Option<String>,
}

impl ConvertConfig {
    pub fn new(mesh_path: impl Into<PathBuf>) -> Self {
        Self {
            mesh_path: mesh_path.into(),
            output_dir: None,
            options: ExtractOptions::default(),
            write_indices: true,
            method: None,
        }
    }
}

/// What a conversion produced, in partition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub partitions: usize,
    pub total_interface_nodes: usize,
    pub files: Vec<PathBuf>,
}

/// Run the whole pipeline for one mesh file.
///
/// The assembled mesh and the reconciled interfaces are immutable once
/// built, so the per-partition extract-and-write stage fans out across a
/// thread pool.
pub fn convert(config: &ConvertConfig) -> Result<ConvertReport, ConvertError> {
    let raw = dmsh_gmsh::parse_file(&config.mesh_path)?;
    let assembled = assemble(raw)?;
    let interfaces = Interfaces::build(&assembled)?;
    let distributed = assembled.partition_count > 1;

    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)?;
    }

    let files = (1..=assembled.partition_count as i32)
        .into_par_iter()
        .map(|partition| {
            let local = extract(&assembled, partition, &config.options)?;
            let document = PartitionDocument::build(&local, &interfaces, distributed, config);
            let path = partition_path(config, partition);
            write_partition_file(&path, &document)?;
            Ok(path)
        })
        .collect::<Result<Vec<_>, ConvertError>>()?;

    Ok(ConvertReport {
        partitions: assembled.partition_count,
        total_interface_nodes: interfaces.total_nodes(),
        files,
    })
}

/// Serialize a document fully in memory, then write it out. A failed
/// write removes the file so no truncated document survives.
pub fn write_partition_file(
    path: &Path,
    document: &PartitionDocument,
) -> Result<(), ConvertError> {
    let bytes = serde_json::to_vec_pretty(document)?;
    if let Err(err) = fs::write(path, bytes) {
        let _ = fs::remove_file(path);
        return Err(err.into());
    }
    Ok(())
}

fn partition_path(config: &ConvertConfig, partition: i32) -> PathBuf {
    let stem = config
        .mesh_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());
    let dir = config
        .output_dir
        .clone()
        .or_else(|| config.mesh_path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!("{stem}.partition{}.json", partition - 1))
}
