use super::config::ScanConfig;
use super::error::EngineError;
use crate::core::models::contact::ContactRecord;
use crate::core::models::structure::Structure;
use crate::core::models::table::AtomTable;
use crate::core::spatial::index::SpatialIndex;
use crate::core::topology::donors;
use tracing::{debug, trace};

// Serial offset of the atom looked up for each donor.
const SUCCESSOR_SERIAL_OFFSET: i64 = 2;

/// Finds donor atoms around every query atom of a structure.
///
/// The scanner holds no per-structure state; one instance can scan any number
/// of structures, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct ContactScanner<'a> {
    config: &'a ScanConfig,
}

impl<'a> ContactScanner<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        self.config
    }

    /// Scans one structure and returns its contact records.
    ///
    /// Records are ordered by query atom (in table order), then by ascending
    /// neighbour index. A structure without query atoms yields no records.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IndexInconsistency`] if a query atom's own
    /// coordinates do not resolve to exactly that atom in the spatial index.
    pub fn scan(&self, structure: &Structure) -> Result<Vec<ContactRecord>, EngineError> {
        let table = &structure.atoms;
        let queries = table.find(&self.config.query_residue, &self.config.query_atom);
        if queries.is_empty() {
            debug!(
                "No {}/{} atoms in {} (model {}).",
                self.config.query_residue, self.config.query_atom, structure.source, structure.model
            );
            return Ok(Vec::new());
        }

        let index = SpatialIndex::from_table(table);
        let mut records = Vec::new();

        for &query_index in &queries {
            let coords = table[query_index].coordinates();
            let candidates = index.query_ball(&coords, self.config.radius);

            let resolved = index.query_ball(&coords, 0.0);
            if resolved.as_slice() != [query_index] {
                return Err(EngineError::IndexInconsistency {
                    query_index,
                    resolved,
                });
            }

            let chain = table.chain_at(query_index);
            let neighbors: Vec<usize> = candidates
                .into_iter()
                .filter(|&n| n != query_index && table.chain_at(n) == chain)
                .collect();
            trace!(
                "Query atom {} (chain '{}'): {} same-chain neighbour(s).",
                query_index,
                chain,
                neighbors.len()
            );

            for &n in &neighbors {
                if !donors::is_donor(table.residue_name_at(n), table.name_at(n)) {
                    continue;
                }
                let neighbor_serial = table.serial_at(n);
                records.push(ContactRecord {
                    structure_id: structure.code().to_string(),
                    model_id: structure.model,
                    chain,
                    query_index,
                    neighbor_name: table.name_at(n).to_string(),
                    neighbor_serial,
                    successor_index: find_successor(table, &neighbors, neighbor_serial),
                });
            }
        }

        debug!(
            "{} (model {}): {} query atom(s), {} contact(s).",
            structure.source,
            structure.model,
            queries.len(),
            records.len()
        );
        Ok(records)
    }
}

/// Looks for the atom whose serial is `serial + 2` among `neighbors` only.
///
/// Atoms outside the filtered neighbour set are never found, so `None` does not
/// mean the structure lacks such an atom.
fn find_successor(table: &AtomTable, neighbors: &[usize], serial: i64) -> Option<usize> {
    let target = serial.checked_add(SUCCESSOR_SERIAL_OFFSET)?;
    neighbors
        .iter()
        .copied()
        .find(|&n| table.serial_at(n) == target)
}
