use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Residue codes that carry at least one side-chain hydrogen-bond donor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DonorResidue {
    Arginine,              // ARG
    Asparagine,            // ASN
    AsparagineOrAspartate, // ASX (ambiguous)
    Cysteine,              // CYS
    Glutamine,             // GLN
    GlutamineOrGlutamate,  // GLX (ambiguous)
    Histidine,             // HIS
    HistidineEpsilon,      // HSE
    HistidineProtonated,   // HSP
    Lysine,                // LYS
    Serine,                // SER
    Threonine,             // THR
    Tryptophan,            // TRP
    Tyrosine,              // TYR
}

/// Side-chain atom names that act as hydrogen-bond donors in some residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DonorAtom {
    NE,
    NH1,
    NH2,
    ND1,
    ND2,
    NE1,
    NE2,
    NZ,
    OG,
    OG1,
    OH,
    SG,
}

static DONOR_RESIDUE_CODES: Map<&'static str, DonorResidue> = phf_map! {
    "ARG" => DonorResidue::Arginine,
    "ASN" => DonorResidue::Asparagine,
    "ASX" => DonorResidue::AsparagineOrAspartate,
    "CYS" => DonorResidue::Cysteine,
    "GLN" => DonorResidue::Glutamine,
    "GLX" => DonorResidue::GlutamineOrGlutamate,
    "HIS" => DonorResidue::Histidine,
    "HSE" => DonorResidue::HistidineEpsilon,
    "HSP" => DonorResidue::HistidineProtonated,
    "LYS" => DonorResidue::Lysine,
    "SER" => DonorResidue::Serine,
    "THR" => DonorResidue::Threonine,
    "TRP" => DonorResidue::Tryptophan,
    "TYR" => DonorResidue::Tyrosine,
};

static DONOR_ATOM_NAMES: Map<&'static str, DonorAtom> = phf_map! {
    "NE" => DonorAtom::NE,
    "NH1" => DonorAtom::NH1,
    "NH2" => DonorAtom::NH2,
    "ND1" => DonorAtom::ND1,
    "ND2" => DonorAtom::ND2,
    "NE1" => DonorAtom::NE1,
    "NE2" => DonorAtom::NE2,
    "NZ" => DonorAtom::NZ,
    "OG" => DonorAtom::OG,
    "OG1" => DonorAtom::OG1,
    "OH" => DonorAtom::OH,
    "SG" => DonorAtom::SG,
};

/// Every donor pair, in the order residue codes sort alphabetically.
pub const DONOR_PAIRS: [(DonorResidue, DonorAtom); 17] = [
    (DonorResidue::Arginine, DonorAtom::NE),
    (DonorResidue::Arginine, DonorAtom::NH1),
    (DonorResidue::Arginine, DonorAtom::NH2),
    (DonorResidue::Asparagine, DonorAtom::ND2),
    (DonorResidue::AsparagineOrAspartate, DonorAtom::ND2),
    (DonorResidue::Cysteine, DonorAtom::SG),
    (DonorResidue::Glutamine, DonorAtom::NE2),
    (DonorResidue::GlutamineOrGlutamate, DonorAtom::NE2),
    (DonorResidue::Histidine, DonorAtom::ND1),
    (DonorResidue::HistidineEpsilon, DonorAtom::NE2),
    (DonorResidue::HistidineProtonated, DonorAtom::ND1),
    (DonorResidue::HistidineProtonated, DonorAtom::NE2),
    (DonorResidue::Lysine, DonorAtom::NZ),
    (DonorResidue::Serine, DonorAtom::OG),
    (DonorResidue::Threonine, DonorAtom::OG1),
    (DonorResidue::Tryptophan, DonorAtom::NE1),
    (DonorResidue::Tyrosine, DonorAtom::OH),
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a donor-bearing residue code")]
pub struct ParseDonorResidueError(String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a donor atom name")]
pub struct ParseDonorAtomError(String);

impl FromStr for DonorResidue {
    type Err = ParseDonorResidueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DONOR_RESIDUE_CODES
            .get(s.trim())
            .copied()
            .ok_or_else(|| ParseDonorResidueError(s.to_string()))
    }
}

impl FromStr for DonorAtom {
    type Err = ParseDonorAtomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DONOR_ATOM_NAMES
            .get(s.trim())
            .copied()
            .ok_or_else(|| ParseDonorAtomError(s.to_string()))
    }
}

impl DonorResidue {
    pub fn code(self) -> &'static str {
        match self {
            DonorResidue::Arginine => "ARG",
            DonorResidue::Asparagine => "ASN",
            DonorResidue::AsparagineOrAspartate => "ASX",
            DonorResidue::Cysteine => "CYS",
            DonorResidue::Glutamine => "GLN",
            DonorResidue::GlutamineOrGlutamate => "GLX",
            DonorResidue::Histidine => "HIS",
            DonorResidue::HistidineEpsilon => "HSE",
            DonorResidue::HistidineProtonated => "HSP",
            DonorResidue::Lysine => "LYS",
            DonorResidue::Serine => "SER",
            DonorResidue::Threonine => "THR",
            DonorResidue::Tryptophan => "TRP",
            DonorResidue::Tyrosine => "TYR",
        }
    }
}

impl fmt::Display for DonorResidue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for DonorAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Returns whether `atom` is a side-chain donor of `residue`.
pub const fn is_donor_pair(residue: DonorResidue, atom: DonorAtom) -> bool {
    use DonorAtom as A;
    use DonorResidue as R;
    matches!(
        (residue, atom),
        (R::Arginine, A::NE | A::NH1 | A::NH2)
            | (R::Asparagine | R::AsparagineOrAspartate, A::ND2)
            | (R::Cysteine, A::SG)
            | (R::Glutamine | R::GlutamineOrGlutamate, A::NE2)
            | (R::Histidine, A::ND1)
            | (R::HistidineEpsilon, A::NE2)
            | (R::HistidineProtonated, A::ND1 | A::NE2)
            | (R::Lysine, A::NZ)
            | (R::Serine, A::OG)
            | (R::Threonine, A::OG1)
            | (R::Tryptophan, A::NE1)
            | (R::Tyrosine, A::OH)
    )
}

/// Classifies `(residue name, atom name)` pairs read from a structure file.
///
/// Names that do not parse into a known donor residue or donor atom are never donors.
pub fn is_donor(residue_name: &str, atom_name: &str) -> bool {
    match (residue_name.parse(), atom_name.parse()) {
        (Ok(residue), Ok(atom)) => is_donor_pair(residue, atom),
        _ => false,
    }
}
