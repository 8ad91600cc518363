use super::atom::{AtomAttribute, AtomField, AtomRecord};
use std::ops::Index;

/// An ordered collection of atom records.
///
/// The position of a record in the table is its identity for the lifetime of the
/// table. Positions are stable: records are only ever appended during construction
/// and never removed or reordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomTable {
    atoms: Vec<AtomRecord>,
}

impl AtomTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, atom: AtomRecord) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns the record at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&AtomRecord> {
        self.atoms.get(index)
    }

    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    /// Returns an iterator over `(index, record)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &AtomRecord)> {
        self.atoms.iter().enumerate()
    }

    /// Finds all positions whose residue name and atom name both match.
    ///
    /// Matching is exact and case-sensitive; surrounding whitespace of the
    /// arguments is ignored. Positions are returned in ascending order.
    pub fn find(&self, residue_name: &str, atom_name: &str) -> Vec<usize> {
        let residue_name = residue_name.trim();
        let atom_name = atom_name.trim();
        self.iter()
            .filter(|(_, atom)| atom.residue_name == residue_name && atom.name == atom_name)
            .map(|(index, _)| index)
            .collect()
    }

    /// Returns one field of the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Indices handed out by this table or by a
    /// spatial index built over it are always in range, so a failure here is a bug.
    pub fn attribute_at(&self, index: usize, field: AtomField) -> AtomAttribute<'_> {
        self.atoms[index].attribute(field)
    }

    /// Chain identifier of the record at `index`. Panics when out of range.
    pub fn chain_at(&self, index: usize) -> char {
        self.atoms[index].chain
    }

    /// Serial number of the record at `index`. Panics when out of range.
    pub fn serial_at(&self, index: usize) -> i64 {
        self.atoms[index].serial
    }

    /// Atom name of the record at `index`. Panics when out of range.
    pub fn name_at(&self, index: usize) -> &str {
        &self.atoms[index].name
    }

    /// Residue name of the record at `index`. Panics when out of range.
    pub fn residue_name_at(&self, index: usize) -> &str {
        &self.atoms[index].residue_name
    }

    /// Returns `(index, coordinates)` pairs in table order, the input of the spatial index.
    pub fn indexed_coordinates(&self) -> Vec<(usize, [f64; 3])> {
        self.iter()
            .map(|(index, atom)| (index, atom.coordinates()))
            .collect()
    }
}

impl Index<usize> for AtomTable {
    type Output = AtomRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}

impl FromIterator<AtomRecord> for AtomTable {
    fn from_iter<T: IntoIterator<Item = AtomRecord>>(iter: T) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}
