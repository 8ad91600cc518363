use trpscan::engine::config as core_config;

pub struct DefaultsConfig {
    pub radius: f64,
    pub query_residue: String,
    pub query_atom: String,
    pub extension: String,
    pub output: String,
    pub write_models: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius: core_config::DEFAULT_CONTACT_RADIUS,
            query_residue: core_config::DEFAULT_QUERY_RESIDUE.to_string(),
            query_atom: core_config::DEFAULT_QUERY_ATOM.to_string(),
            extension: core_config::DEFAULT_EXTENSION.to_string(),
            output: core_config::DEFAULT_OUTPUT_FILE.to_string(),
            write_models: false,
        }
    }
}
