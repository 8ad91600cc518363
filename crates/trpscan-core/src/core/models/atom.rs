use nalgebra::Point3;
use std::fmt;

/// A single coordinate record read from a structure file.
///
/// Records are immutable once parsed. An atom has no identity beyond its
/// position in the owning [`AtomTable`](super::table::AtomTable) and its
/// serial number, so two records with equal fields are indistinguishable.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The record type marker from columns 1-6 (always `"ATOM"` for retained records).
    pub record_type: String,
    /// The atom serial number from columns 7-11.
    pub serial: i64,
    /// The atom name from columns 13-16 (e.g., "NE1", "OG").
    pub name: String,
    /// The residue name from columns 18-20 (e.g., "TRP", "SER").
    pub residue_name: String,
    /// The chain identifier from column 22.
    pub chain: char,
    /// The residue sequence number from columns 23-26.
    pub residue_seq: isize,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl AtomRecord {
    /// Creates an `ATOM` record with the given identity and position.
    pub fn new(
        serial: i64,
        name: &str,
        residue_name: &str,
        chain: char,
        residue_seq: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            record_type: "ATOM".to_string(),
            serial,
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            chain,
            residue_seq,
            position,
        }
    }

    /// Returns the coordinates as a plain array, the layout used by the spatial index.
    pub fn coordinates(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.position.z]
    }
}

/// Names the individual fields of an [`AtomRecord`] for attribute lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomField {
    RecordType,
    Serial,
    Name,
    ResidueName,
    Chain,
    ResidueSeq,
    X,
    Y,
    Z,
}

/// A borrowed view of a single [`AtomRecord`] field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AtomAttribute<'a> {
    Text(&'a str),
    Integer(i64),
    Chain(char),
    Coordinate(f64),
}

impl fmt::Display for AtomAttribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomAttribute::Text(s) => write!(f, "{}", s),
            AtomAttribute::Integer(v) => write!(f, "{}", v),
            AtomAttribute::Chain(c) => write!(f, "{}", c),
            AtomAttribute::Coordinate(v) => write!(f, "{:.3}", v),
        }
    }
}

impl AtomRecord {
    /// Returns the value of a single field.
    pub fn attribute(&self, field: AtomField) -> AtomAttribute<'_> {
        match field {
            AtomField::RecordType => AtomAttribute::Text(&self.record_type),
            AtomField::Serial => AtomAttribute::Integer(self.serial),
            AtomField::Name => AtomAttribute::Text(&self.name),
            AtomField::ResidueName => AtomAttribute::Text(&self.residue_name),
            AtomField::Chain => AtomAttribute::Chain(self.chain),
            AtomField::ResidueSeq => AtomAttribute::Integer(self.residue_seq as i64),
            AtomField::X => AtomAttribute::Coordinate(self.position.x),
            AtomField::Y => AtomAttribute::Coordinate(self.position.y),
            AtomField::Z => AtomAttribute::Coordinate(self.position.z),
        }
    }
}
