//! Mesh totals for reporting.

use std::collections::BTreeMap;

use crate::assemble::AssembledMesh;
use crate::interface::Interfaces;

/// Headline numbers of an assembled mesh, for the CLI `info` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSummary {
    pub node_count: usize,
    pub element_count: usize,
    pub group_count: usize,
    pub elements_per_group: BTreeMap<String, usize>,
    pub partition_count: usize,
    pub interface_pairs: usize,
    pub interface_nodes: usize,
}

impl MeshSummary {
    pub fn from_assembled(assembled: &AssembledMesh, interfaces: &Interfaces) -> Self {
        let mut elements_per_group = BTreeMap::<String, usize>::new();
        for (key, elements) in &assembled.mesh.groups {
            *elements_per_group.entry(key.name.clone()).or_insert(0) += elements.len();
        }

        Self {
            node_count: assembled.nodes.len(),
            element_count: assembled.mesh.total_elements(),
            group_count: elements_per_group.len(),
            elements_per_group,
            partition_count: assembled.partition_count,
            interface_pairs: interfaces.len(),
            interface_nodes: interfaces.total_nodes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use dmsh_gmsh::parse_str;

    #[test]
    fn totals_match_the_assembled_buckets() {
        let src = r#"
$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
2
2 1 "domain"
1 2 "wall"
$EndPhysicalNames
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
3
1 2 2 1 1 1 2 3
2 2 2 1 1 1 3 4
3 1 2 2 1 1 2
$EndElements
"#;
        let assembled = parse_str(src)
            .map_err(|e| e.to_string())
            .and_then(|raw| assemble(raw).map_err(|e| e.to_string()))
            .expect("pipeline should succeed");
        let interfaces = Interfaces::build(&assembled).expect("build should succeed");
        let summary = MeshSummary::from_assembled(&assembled, &interfaces);

        assert_eq!(summary.node_count, 4);
        assert_eq!(summary.element_count, 3);
        assert_eq!(summary.group_count, 2);
        assert_eq!(summary.elements_per_group["domain"], 2);
        assert_eq!(summary.elements_per_group["wall"], 1);
        assert_eq!(summary.partition_count, 1);
        assert_eq!(summary.interface_pairs, 0);
        assert_eq!(summary.interface_nodes, 0);
    }
}
