//! Mesh data model for the partitioned Gmsh converter.
//!
//! This crate provides the core types shared by the parser, the partition
//! engine and the writers:
//! - the Gmsh element-type catalog ([`ElementType`])
//! - raw elements with their tag convention ([`Element`])
//! - nodes, group keys and the assembled mesh container ([`Node`],
//!   [`GroupKey`], [`Mesh`])

pub mod element;
pub mod mesh;

pub use element::{Element, ElementType};
pub use mesh::{GroupKey, Mesh, Node, PhysicalGroupMap};
