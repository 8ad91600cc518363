use super::table::AtomTable;
use serde::{Serialize, Serializer};
use std::fmt;

const STRUCTURE_CODE_LENGTH: usize = 4;

/// Identifies which model of an entry a [`Structure`] was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ModelId {
    /// A model extracted from a multi-model (NMR) entry, numbered from zero.
    Numbered(usize),
    /// A single-model entry.
    #[default]
    NotApplicable,
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelId::Numbered(n) => write!(f, "{}", n),
            ModelId::NotApplicable => write!(f, "NA"),
        }
    }
}

impl Serialize for ModelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One analysable set of atoms: a whole single-model file, or one model of a
/// multi-model file.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// The source identifier, normally the file name the atoms were read from.
    pub source: String,
    /// The model this structure represents.
    pub model: ModelId,
    /// The atoms, in file order.
    pub atoms: AtomTable,
}

impl Structure {
    pub fn new(source: impl Into<String>, model: ModelId, atoms: AtomTable) -> Self {
        Self {
            source: source.into(),
            model,
            atoms,
        }
    }

    /// The structure code: the first four characters of the source identifier.
    ///
    /// Shorter identifiers are returned whole.
    pub fn code(&self) -> &str {
        match self.source.char_indices().nth(STRUCTURE_CODE_LENGTH) {
            Some((end, _)) => &self.source[..end],
            None => &self.source,
        }
    }
}
