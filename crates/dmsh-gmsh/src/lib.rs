//! Line-oriented parser for the Gmsh 2.2 ASCII mesh format.
//!
//! Produces the raw collections the partition engine works from: the
//! physical-name map, the node list and the flat element list. Sections
//! may appear in any order after `$MeshFormat`; unrecognized sections are
//! skipped through their `$End` line.

use std::fs;
use std::path::Path;

use thiserror::Error;

use dmsh_model::{Element, ElementType, Node, PhysicalGroupMap};

/// Oldest format revision the parser accepts.
pub const MINIMUM_SUPPORTED_VERSION: f64 = 2.2;

pub type Result<T> = std::result::Result<T, GmshError>;

#[derive(Error, Debug)]
pub enum GmshError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Gmsh format version {version} is not supported (minimum 2.2)")]
    UnsupportedVersion { version: f64 },

    #[error("line {line}: element type id {type_id} is not in the catalog")]
    UnsupportedElementType { line: usize, type_id: i32 },
}

/// Raw parse result, before assembly into grouped buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMesh {
    pub version: f64,
    pub physical_names: PhysicalGroupMap,
    pub nodes: Vec<Node>,
    pub elements: Vec<Element>,
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<RawMesh> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| GmshError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_str(&raw)
}

pub fn parse_str(raw: &str) -> Result<RawMesh> {
    let mut cursor = Cursor::new(raw);
    let mut version: Option<f64> = None;
    let mut physical_names = PhysicalGroupMap::new();
    let mut nodes = Vec::new();
    let mut elements = Vec::new();

    while let Some((line_no, header)) = cursor.next_line() {
        if !header.starts_with('$') {
            return Err(malformed(
                line_no,
                format!("expected a section header, found '{header}'"),
            ));
        }
        if version.is_none() && header != "$MeshFormat" {
            return Err(malformed(
                line_no,
                format!("first section must be $MeshFormat, found '{header}'"),
            ));
        }
        match header {
            "$MeshFormat" => {
                if version.is_some() {
                    return Err(malformed(line_no, "duplicate $MeshFormat section".into()));
                }
                version = Some(parse_mesh_format(&mut cursor)?);
            }
            "$PhysicalNames" => parse_physical_names(&mut cursor, &mut physical_names)?,
            "$Nodes" => parse_nodes(&mut cursor, &mut nodes)?,
            "$Elements" => parse_elements(&mut cursor, &mut elements)?,
            _ => skip_section(&mut cursor, line_no, header)?,
        }
    }

    let Some(version) = version else {
        return Err(malformed(0, "missing $MeshFormat section".into()));
    };

    Ok(RawMesh {
        version,
        physical_names,
        nodes,
        elements,
    })
}

/// Non-blank, trimmed lines with 1-based numbering.
struct Cursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            lines: raw.lines().enumerate(),
        }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        for (idx, line) in self.lines.by_ref() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Some((idx + 1, trimmed));
            }
        }
        None
    }

    fn expect_line(&mut self, what: &str) -> Result<(usize, &'a str)> {
        self.next_line()
            .ok_or_else(|| malformed(0, format!("unexpected end of file while reading {what}")))
    }
}

fn malformed(line: usize, message: String) -> GmshError {
    GmshError::Malformed { line, message }
}

fn parse_field<T: std::str::FromStr>(token: &str, line: usize, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| malformed(line, format!("invalid {what} '{token}'")))
}

fn expect_end(cursor: &mut Cursor, tag: &str) -> Result<()> {
    let (line_no, line) = cursor.expect_line(tag)?;
    if line != tag {
        return Err(malformed(line_no, format!("expected {tag}, found '{line}'")));
    }
    Ok(())
}

fn parse_count(cursor: &mut Cursor, what: &str) -> Result<usize> {
    let (line_no, line) = cursor.expect_line(what)?;
    parse_field(line, line_no, what)
}

fn parse_mesh_format(cursor: &mut Cursor) -> Result<f64> {
    let (line_no, line) = cursor.expect_line("the $MeshFormat record")?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(malformed(
            line_no,
            "expected 'version file-type data-size' in $MeshFormat".into(),
        ));
    }
    let version: f64 = parse_field(fields[0], line_no, "format version")?;
    let file_type: i32 = parse_field(fields[1], line_no, "file type")?;
    let _data_size: i32 = parse_field(fields[2], line_no, "data size")?;

    if version < MINIMUM_SUPPORTED_VERSION {
        return Err(GmshError::UnsupportedVersion { version });
    }
    if file_type != 0 {
        return Err(malformed(
            line_no,
            "binary Gmsh files are not supported".into(),
        ));
    }
    expect_end(cursor, "$EndMeshFormat")?;
    Ok(version)
}

fn parse_physical_names(cursor: &mut Cursor, names: &mut PhysicalGroupMap) -> Result<()> {
    let count = parse_count(cursor, "physical name count")?;
    for _ in 0..count {
        let (line_no, line) = cursor.expect_line("a physical name record")?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(malformed(
                line_no,
                "expected 'dimension id \"name\"' in $PhysicalNames".into(),
            ));
        }
        let _dimension: i32 = parse_field(fields[0], line_no, "physical dimension")?;
        let id: i32 = parse_field(fields[1], line_no, "physical id")?;
        // Names may contain spaces; strip the surrounding quotes only.
        let name = fields[2..].join(" ");
        names.insert(id, name.trim_matches('"').to_string());
    }
    expect_end(cursor, "$EndPhysicalNames")
}

fn parse_nodes(cursor: &mut Cursor, nodes: &mut Vec<Node>) -> Result<()> {
    let count = parse_count(cursor, "node count")?;
    nodes.reserve(count);
    for _ in 0..count {
        let (line_no, line) = cursor.expect_line("a node record")?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(malformed(
                line_no,
                format!("node record has {} fields, expected 4", fields.len()),
            ));
        }
        let id = parse_field(fields[0], line_no, "node id")?;
        let x = parse_field(fields[1], line_no, "x coordinate")?;
        let y = parse_field(fields[2], line_no, "y coordinate")?;
        let z = parse_field(fields[3], line_no, "z coordinate")?;
        nodes.push(Node::new(id, x, y, z));
    }
    expect_end(cursor, "$EndNodes")
}

fn parse_elements(cursor: &mut Cursor, elements: &mut Vec<Element>) -> Result<()> {
    let count = parse_count(cursor, "element count")?;
    elements.reserve(count);
    for _ in 0..count {
        let (line_no, line) = cursor.expect_line("an element record")?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(malformed(line_no, "truncated element record".into()));
        }
        let id: i32 = parse_field(fields[0], line_no, "element id")?;
        let type_id: i32 = parse_field(fields[1], line_no, "element type")?;
        let tag_count: usize = parse_field(fields[2], line_no, "tag count")?;

        let element_type = ElementType::from_gmsh_id(type_id)
            .ok_or(GmshError::UnsupportedElementType { line: line_no, type_id })?;

        let expected = 3 + tag_count + element_type.node_count();
        if fields.len() != expected {
            return Err(malformed(
                line_no,
                format!(
                    "element {id} has {} fields, expected {expected}",
                    fields.len()
                ),
            ));
        }

        let mut tags = Vec::with_capacity(tag_count);
        for token in &fields[3..3 + tag_count] {
            tags.push(parse_field(token, line_no, "element tag")?);
        }
        let mut connectivity = Vec::with_capacity(element_type.node_count());
        for token in &fields[3 + tag_count..] {
            connectivity.push(parse_field(token, line_no, "connectivity entry")?);
        }

        elements.push(Element {
            id,
            element_type,
            tags,
            connectivity,
        });
    }
    expect_end(cursor, "$EndElements")
}

fn skip_section(cursor: &mut Cursor, start_line: usize, header: &str) -> Result<()> {
    let end_tag = format!("$End{}", &header[1..]);
    loop {
        let Some((_, line)) = cursor.next_line() else {
            return Err(malformed(
                start_line,
                format!("section {header} is not closed by {end_tag}"),
            ));
        };
        if line == end_tag {
            return Ok(());
        }
    }
}
