use super::structure::ModelId;
use serde::{Serialize, Serializer};

const NOT_FOUND: &str = "NA";

/// One donor atom found near a query atom.
///
/// Field order is the column order of the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    /// Four-character structure code.
    pub structure_id: String,
    pub model_id: ModelId,
    /// Chain shared by the query atom and the donor.
    pub chain: char,
    /// Table position of the query atom within its structure.
    pub query_index: usize,
    pub neighbor_name: String,
    pub neighbor_serial: i64,
    /// Table position of the atom whose serial is `neighbor_serial + 2`, searched
    /// only among the same-chain neighbours of the query atom.
    #[serde(serialize_with = "serialize_optional_index")]
    pub successor_index: Option<usize>,
}

fn serialize_optional_index<S: Serializer>(
    index: &Option<usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match index {
        Some(i) => serializer.serialize_u64(*i as u64),
        None => serializer.serialize_str(NOT_FOUND),
    }
}
