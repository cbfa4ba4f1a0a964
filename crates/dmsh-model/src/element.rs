//! Element types and raw element records.

/// Gmsh element type catalog.
///
/// Discriminants are the type ids used by the Gmsh 2.2 file format, so
/// `as i32` recovers the on-disk id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    /// 2-node line
    Line2 = 1,
    /// 3-node triangle
    Triangle3 = 2,
    /// 4-node quadrilateral
    Quadrilateral4 = 3,
    /// 4-node tetrahedron
    Tetrahedron4 = 4,
    /// 8-node hexahedron
    Hexahedron8 = 5,
    /// 6-node prism
    Prism6 = 6,
    /// 5-node pyramid
    Pyramid5 = 7,
    /// 3-node quadratic line
    Line3 = 8,
    /// 6-node quadratic triangle
    Triangle6 = 9,
    /// 9-node quadrilateral (4 vertex, 4 edge, 1 face node)
    Quadrilateral9 = 10,
    /// 10-node quadratic tetrahedron
    Tetrahedron10 = 11,
    /// 27-node quadratic hexahedron
    Hexahedron27 = 12,
    /// 18-node quadratic prism
    Prism18 = 13,
    /// 14-node quadratic pyramid
    Pyramid14 = 14,
    /// 1-node point
    Point = 15,
    /// 8-node serendipity quadrilateral
    Quadrilateral8 = 16,
    /// 20-node serendipity hexahedron
    Hexahedron20 = 17,
    /// 15-node prism
    Prism15 = 18,
    /// 13-node pyramid
    Pyramid13 = 19,
    /// 9-node cubic triangle
    Triangle9 = 20,
    /// 10-node cubic triangle
    Triangle10 = 21,
    /// 12-node quartic triangle
    Triangle12 = 22,
    /// 15-node quartic triangle
    Triangle15 = 23,
    /// Incomplete 15-node triangle
    Triangle15Incomplete = 24,
    /// 21-node quintic triangle
    Triangle21 = 25,
    /// 4-node cubic edge
    Edge4 = 26,
    /// 5-node quartic edge
    Edge5 = 27,
    /// 6-node quintic edge
    Edge6 = 28,
    /// 20-node cubic tetrahedron
    Tetrahedron20 = 29,
    /// 35-node quartic tetrahedron
    Tetrahedron35 = 30,
    /// 56-node quintic tetrahedron
    Tetrahedron56 = 31,
    /// 64-node cubic hexahedron
    Hexahedron64 = 92,
    /// 125-node quartic hexahedron
    Hexahedron125 = 93,
}

impl ElementType {
    /// Resolve a Gmsh type id against the catalog.
    pub fn from_gmsh_id(id: i32) -> Option<Self> {
        use ElementType::*;
        let element_type = match id {
            1 => Line2,
            2 => Triangle3,
            3 => Quadrilateral4,
            4 => Tetrahedron4,
            5 => Hexahedron8,
            6 => Prism6,
            7 => Pyramid5,
            8 => Line3,
            9 => Triangle6,
            10 => Quadrilateral9,
            11 => Tetrahedron10,
            12 => Hexahedron27,
            13 => Prism18,
            14 => Pyramid14,
            15 => Point,
            16 => Quadrilateral8,
            17 => Hexahedron20,
            18 => Prism15,
            19 => Pyramid13,
            20 => Triangle9,
            21 => Triangle10,
            22 => Triangle12,
            23 => Triangle15,
            24 => Triangle15Incomplete,
            25 => Triangle21,
            26 => Edge4,
            27 => Edge5,
            28 => Edge6,
            29 => Tetrahedron20,
            30 => Tetrahedron35,
            31 => Tetrahedron56,
            92 => Hexahedron64,
            93 => Hexahedron125,
            _ => return None,
        };
        Some(element_type)
    }

    /// The Gmsh file-format id of this type.
    pub fn gmsh_id(self) -> i32 {
        self as i32
    }

    /// Number of connectivity entries an element of this type carries.
    pub fn node_count(self) -> usize {
        use ElementType::*;
        match self {
            Line2 => 2,
            Triangle3 => 3,
            Quadrilateral4 => 4,
            Tetrahedron4 => 4,
            Hexahedron8 => 8,
            Prism6 => 6,
            Pyramid5 => 5,
            Line3 => 3,
            Triangle6 => 6,
            Quadrilateral9 => 9,
            Tetrahedron10 => 10,
            Hexahedron27 => 27,
            Prism18 => 18,
            Pyramid14 => 14,
            Point => 1,
            Quadrilateral8 => 8,
            Hexahedron20 => 20,
            Prism15 => 15,
            Pyramid13 => 13,
            Triangle9 => 9,
            Triangle10 => 10,
            Triangle12 => 12,
            Triangle15 => 15,
            Triangle15Incomplete => 15,
            Triangle21 => 21,
            Edge4 => 4,
            Edge5 => 5,
            Edge6 => 6,
            Tetrahedron20 => 20,
            Tetrahedron35 => 35,
            Tetrahedron56 => 56,
            Hexahedron64 => 64,
            Hexahedron125 => 125,
        }
    }
}

/// A raw element record from the `$Elements` section.
///
/// The tag list follows the Gmsh 2.2 convention:
/// - `tags[0]`: physical group id
/// - `tags[1]`: geometric entity id
/// - `tags[2]`: number of partition entries (absent or 0 when the mesh is
///   not partitioned)
/// - `tags[3]`: owning partition id
/// - `tags[4..3 + tags[2]]`: other partitions holding a ghost copy,
///   encoded as negative ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: i32,
    pub element_type: ElementType,
    pub tags: Vec<i32>,
    pub connectivity: Vec<i32>,
}

impl Element {
    /// Physical group id (`tags[0]`), if any tags are present.
    pub fn physical_id(&self) -> Option<i32> {
        self.tags.first().copied()
    }

    /// Geometric entity id (`tags[1]`).
    pub fn geometric_id(&self) -> Option<i32> {
        self.tags.get(1).copied()
    }

    /// Number of partition entries in the tag list (`tags[2]`), 0 when the
    /// element carries no partition information.
    pub fn partition_entries(&self) -> i32 {
        self.tags.get(2).copied().unwrap_or(0)
    }

    /// The partition that owns this element. Elements without partition
    /// tags belong to partition 1.
    pub fn owner_partition(&self) -> i32 {
        if self.partition_entries() > 0 {
            self.tags.get(3).copied().unwrap_or(1)
        } else {
            1
        }
    }

    /// Ghost-copy partition tags (negative ids). Empty for elements held
    /// by a single partition or with a malformed tag list.
    pub fn sharer_tags(&self) -> &[i32] {
        let entries = self.partition_entries();
        if entries > 1 {
            let end = 3 + entries as usize;
            if self.tags.len() >= end {
                return &self.tags[4..end];
            }
        }
        &[]
    }
}
