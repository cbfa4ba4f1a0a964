use std::path::PathBuf;
use std::process::ExitCode;

use dmsh_io::{ConvertConfig, ConvertError, convert};
use dmsh_part::{
    ExtractOptions, IndexingBase, Interfaces, MeshSummary, NodalOrdering, assemble,
};

fn usage() {
    eprintln!(
        "usage: dmsh convert [--local] [--zero-based] [--no-indices] [--method NAME] [--out-dir DIR] <mesh.msh>"
    );
    eprintln!("       dmsh info <mesh.msh>");
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.split_first() {
        Some((command, rest)) if command == "convert" => run_convert(rest),
        Some((command, rest)) if command == "info" => run_info(rest),
        _ => {
            usage();
            ExitCode::from(2)
        }
    }
}

fn run_convert(args: &[String]) -> ExitCode {
    let mut ordering = NodalOrdering::Global;
    let mut base = IndexingBase::One;
    let mut write_indices = true;
    let mut method: Option<String> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut mesh_path: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--local" => ordering = NodalOrdering::Local,
            "--zero-based" => base = IndexingBase::Zero,
            "--no-indices" => write_indices = false,
            "--method" => {
                let Some(value) = iter.next() else {
                    usage();
                    return ExitCode::from(2);
                };
                method = Some(value.clone());
            }
            "--out-dir" => {
                let Some(value) = iter.next() else {
                    usage();
                    return ExitCode::from(2);
                };
                output_dir = Some(PathBuf::from(value));
            }
            _ if arg.starts_with("--") => {
                usage();
                return ExitCode::from(2);
            }
            _ => {
                if mesh_path.is_some() {
                    usage();
                    return ExitCode::from(2);
                }
                mesh_path = Some(PathBuf::from(arg));
            }
        }
    }

    let Some(mesh_path) = mesh_path else {
        usage();
        return ExitCode::from(2);
    };

    let mut config = ConvertConfig::new(mesh_path);
    config.options = ExtractOptions { ordering, base };
    config.write_indices = write_indices;
    config.method = method;
    config.output_dir = output_dir;

    match convert(&config) {
        Ok(report) => {
            println!("partitions: {}", report.partitions);
            println!("total_interface_nodes: {}", report.total_interface_nodes);
            for file in &report.files {
                println!("wrote {}", file.display());
            }
            println!(
                "finished at {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("convert error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run_info(args: &[String]) -> ExitCode {
    let [path] = args else {
        usage();
        return ExitCode::from(2);
    };
    match mesh_summary(path) {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("info error: {err}");
            ExitCode::from(1)
        }
    }
}

fn mesh_summary(path: &str) -> Result<MeshSummary, ConvertError> {
    let raw = dmsh_gmsh::parse_file(path)?;
    let assembled = assemble(raw)?;
    let interfaces = Interfaces::build(&assembled)?;
    Ok(MeshSummary::from_assembled(&assembled, &interfaces))
}

fn print_summary(summary: &MeshSummary) {
    println!("nodes: {}", summary.node_count);
    println!("elements: {}", summary.element_count);
    println!("physical_groups: {}", summary.group_count);
    for (name, count) in &summary.elements_per_group {
        println!("  {name}: {count}");
    }
    println!("partitions: {}", summary.partition_count);
    println!("interface_pairs: {}", summary.interface_pairs);
    println!("interface_nodes: {}", summary.interface_nodes);
}
