//! Integration tests over the shared mesh fixtures.

use std::path::PathBuf;

use dmsh_gmsh::parse_file;
use dmsh_part::{
    AssembledMesh, ExtractOptions, Interfaces, MeshSummary, PartitionPair, assemble, extract,
};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures/mesh");
    path.push(name);
    path
}

fn assembled_fixture(name: &str) -> AssembledMesh {
    let raw = parse_file(fixture_path(name)).expect("fixture should parse");
    assemble(raw).expect("fixture should assemble")
}

#[test]
fn bucket_totals_match_the_declared_element_count() {
    let assembled = assembled_fixture("two_triangles.msh");
    assert_eq!(assembled.mesh.total_elements(), 4);
    assert_eq!(assembled.mesh.groups.len(), 2);
}

#[test]
fn single_partition_fixture_has_no_interfaces() {
    let assembled = assembled_fixture("two_triangles.msh");
    assert_eq!(assembled.partition_count, 1);

    let interfaces = Interfaces::build(&assembled).expect("build should succeed");
    assert!(interfaces.is_empty());
    assert!(interfaces.views_for(1).is_empty());
}

#[test]
fn two_partition_fixture_reconciles_the_shared_column() {
    let assembled = assembled_fixture("four_quads_two_partitions.msh");
    assert_eq!(assembled.partition_count, 2);

    let interfaces = Interfaces::build(&assembled).expect("build should succeed");
    let pairs: Vec<_> = interfaces.pairs().collect();
    assert_eq!(pairs.len(), 1);
    assert_eq!(*pairs[0].0, PartitionPair::new(1, 2));
    assert_eq!(pairs[0].1.nodes, vec![2, 5, 8]);
    assert_eq!(pairs[0].1.start_index, 0);
    assert_eq!(interfaces.total_nodes(), 3);
}

#[test]
fn agreed_nodes_are_referenced_by_both_partitions() {
    let assembled = assembled_fixture("four_quads_two_partitions.msh");
    let interfaces = Interfaces::build(&assembled).expect("build should succeed");
    let options = ExtractOptions::default();

    let left = extract(&assembled, 1, &options).expect("extract should succeed");
    let right = extract(&assembled, 2, &options).expect("extract should succeed");
    assert_eq!(left.local_to_global, vec![1, 2, 4, 5, 7, 8]);
    assert_eq!(right.local_to_global, vec![2, 3, 5, 6, 8, 9]);

    let (_, interface) = interfaces.pairs().next().expect("one pair");
    for node in &interface.nodes {
        assert!(left.local_to_global.binary_search(node).is_ok());
        assert!(right.local_to_global.binary_search(node).is_ok());
    }
}

#[test]
fn summary_reports_the_partitioned_fixture() {
    let assembled = assembled_fixture("four_quads_two_partitions.msh");
    let interfaces = Interfaces::build(&assembled).expect("build should succeed");
    let summary = MeshSummary::from_assembled(&assembled, &interfaces);

    assert_eq!(summary.node_count, 9);
    assert_eq!(summary.element_count, 4);
    assert_eq!(summary.elements_per_group["domain"], 4);
    assert_eq!(summary.partition_count, 2);
    assert_eq!(summary.interface_pairs, 1);
    assert_eq!(summary.interface_nodes, 3);
}
