pub mod defaults;

use crate::cli::{ScanArgs, ScanOverrides};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use trpscan::engine::config as core_config;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialScanConfig {
    radius: Option<f64>,
    query_residue: Option<String>,
    query_atom: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialBatchConfig {
    extension: Option<String>,
    output: Option<PathBuf>,
    write_models: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    scan: Option<PartialScanConfig>,
    batch: Option<PartialBatchConfig>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the scan parameters: CLI value, then file value, then default.
    pub fn scan_config(&self, args: &ScanOverrides) -> Result<core_config::ScanConfig> {
        let defaults = DefaultsConfig::default();
        let file = self.scan.clone().unwrap_or_default();

        core_config::ScanConfigBuilder::new()
            .radius(args.radius.or(file.radius).unwrap_or(defaults.radius))
            .query_residue(
                args.query_residue
                    .as_deref()
                    .or(file.query_residue.as_deref())
                    .unwrap_or(&defaults.query_residue),
            )
            .query_atom(
                args.query_atom
                    .as_deref()
                    .or(file.query_atom.as_deref())
                    .unwrap_or(&defaults.query_atom),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Whether split models should be written: CLI value, then file value, then default.
    pub fn write_models(&self, cli_value: Option<bool>) -> bool {
        cli_value
            .or(self.batch.as_ref().and_then(|b| b.write_models))
            .unwrap_or(DefaultsConfig::default().write_models)
    }

    pub fn merge_with_cli(self, args: &ScanArgs) -> Result<core_config::BatchConfig> {
        let defaults = DefaultsConfig::default();
        let scan = self.scan_config(&args.scan)?;
        let write_models = self.write_models(args.write_models);
        let file = self.batch.unwrap_or_default();

        let extension = args
            .extension
            .clone()
            .or(file.extension)
            .unwrap_or(defaults.extension);
        let output = args
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(defaults.output));

        core_config::BatchConfigBuilder::new()
            .input_dir(args.input_dir.clone())
            .extension(&extension)
            .output_path(output)
            .truncate_output(args.truncate)
            .write_model_files(write_models)
            .scan_config(scan)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn scan_args(extra: &[&str]) -> ScanArgs {
        let mut argv = vec!["trpscan", "scan", "data"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Scan(args) => args,
            other => panic!("Expected 'scan' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let config = PartialAppConfig::default()
            .merge_with_cli(&scan_args(&[]))
            .unwrap();
        assert_eq!(config.input_dir, PathBuf::from("data"));
        assert_eq!(config.extension, "pdb");
        assert_eq!(config.output_path, PathBuf::from("donor_residue_info.csv"));
        assert!(!config.write_model_files);
        assert!(!config.truncate_output);
        assert_eq!(config.scan, core_config::ScanConfig::default());
    }

    #[test]
    fn file_values_are_used_and_cli_overrides_them() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trpscan.toml");
        fs::write(
            &path,
            r#"
            [scan]
            radius = 4.0
            query-atom = "NE1"

            [batch]
            extension = "ent"
            output = "contacts.csv"
            write-models = true
            "#,
        )
        .unwrap();

        let partial = PartialAppConfig::from_file(&path).unwrap();
        let config = partial
            .clone()
            .merge_with_cli(&scan_args(&[]))
            .unwrap();
        assert_eq!(config.scan.radius, 4.0);
        assert_eq!(config.extension, "ent");
        assert_eq!(config.output_path, PathBuf::from("contacts.csv"));
        assert!(config.write_model_files);

        let config = partial
            .merge_with_cli(&scan_args(&[
                "--radius",
                "3.2",
                "-e",
                "pdb",
                "--truncate",
                "--write-models=false",
            ]))
            .unwrap();
        assert_eq!(config.scan.radius, 3.2);
        assert_eq!(config.extension, "pdb");
        assert!(config.truncate_output);
        assert!(!config.write_model_files);
    }

    #[test]
    fn write_models_prefers_cli_value_over_file() {
        let partial: PartialAppConfig = toml::from_str("[batch]\nwrite-models = true\n").unwrap();
        assert!(partial.write_models(None));
        assert!(!partial.write_models(Some(false)));
        assert!(PartialAppConfig::default().write_models(Some(true)));
        assert!(!PartialAppConfig::default().write_models(None));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[scan]\ncutoff = 4.0\n").unwrap();
        assert!(matches!(
            PartialAppConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn invalid_radius_is_a_config_error() {
        let result = PartialAppConfig::default().merge_with_cli(&scan_args(&["--radius=-1"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn load_without_path_is_empty() {
        let partial = PartialAppConfig::load(None).unwrap();
        assert!(partial.scan.is_none());
        assert!(partial.batch.is_none());
    }
}
