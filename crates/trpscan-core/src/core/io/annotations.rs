use phf::{Set, phf_set};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const HEADER_LINES: usize = 13;
const RESIDUE_COLUMN: usize = 2;

pub const SECONDARY_STRUCTURE_INPUT: &str = "ssm";
pub const ACCESSIBILITY_INPUT: &str = "psa";
pub const SECONDARY_STRUCTURE_OUTPUT: &str = "ss";
pub const ACCESSIBILITY_OUTPUT: &str = "sa";

// Standard amino acids plus the ambiguous and unknown codes the annotation tool emits.
static RESIDUE_CODES: Set<&'static str> = phf_set! {
    "GLY", "ALA", "VAL", "LEU", "ILE", "MET", "PRO", "PHE", "TRP", "TYR",
    "SER", "THR", "CYS", "ASN", "GLN", "LYS", "ARG", "HIS", "ASP", "GLU",
    "XLE", "GLX", "ASX", "UNK", "XAA",
};

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("Annotation file not found: {}", path.display())]
    MissingFile { path: PathBuf },
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Which column of an annotation row to keep, counted from the end of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationColumn {
    /// Secondary-structure assignment: the last column.
    SecondaryStructure,
    /// Solvent accessibility: the third column from the end.
    Accessibility,
}

impl AnnotationColumn {
    fn offset_from_end(self) -> usize {
        match self {
            AnnotationColumn::SecondaryStructure => 1,
            AnnotationColumn::Accessibility => 3,
        }
    }
}

/// The input and output paths for one annotated structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationPaths {
    pub secondary_structure_input: PathBuf,
    pub accessibility_input: PathBuf,
    pub secondary_structure_output: PathBuf,
    pub accessibility_output: PathBuf,
}

impl AnnotationPaths {
    /// Derives all four paths by appending extensions to `base` (`base.ssm`, `base.ss`, ...).
    pub fn for_base(base: &Path) -> Self {
        let with = |ext: &str| {
            let mut name = base.as_os_str().to_owned();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        };
        Self {
            secondary_structure_input: with(SECONDARY_STRUCTURE_INPUT),
            accessibility_input: with(ACCESSIBILITY_INPUT),
            secondary_structure_output: with(SECONDARY_STRUCTURE_OUTPUT),
            accessibility_output: with(ACCESSIBILITY_OUTPUT),
        }
    }

    /// Fails with [`AnnotationError::MissingFile`] for the first absent input.
    pub fn ensure_inputs_exist(&self) -> Result<(), AnnotationError> {
        for path in [&self.secondary_structure_input, &self.accessibility_input] {
            if !path.is_file() {
                return Err(AnnotationError::MissingFile { path: path.clone() });
            }
        }
        Ok(())
    }
}

/// Extracts one column from the residue rows of an annotation listing.
///
/// The first 13 lines are header. Remaining rows are kept when their third
/// whitespace-separated column is a recognised residue code; rows too short to
/// hold the requested column are skipped.
pub fn extract_column(
    reader: impl BufRead,
    column: AnnotationColumn,
) -> io::Result<Vec<String>> {
    let mut values = Vec::new();
    for line in reader.lines().skip(HEADER_LINES) {
        let line = line?;
        let cols: Vec<&str> = line.split_whitespace().collect();
        let Some(residue) = cols.get(RESIDUE_COLUMN) else {
            continue;
        };
        if !RESIDUE_CODES.contains(residue) {
            continue;
        }
        if let Some(value) = cols
            .len()
            .checked_sub(column.offset_from_end())
            .and_then(|i| cols.get(i))
        {
            values.push((*value).to_string());
        }
    }
    Ok(values)
}

fn extract_file(
    input: &Path,
    output: &Path,
    column: AnnotationColumn,
) -> Result<usize, AnnotationError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| AnnotationError::Io { path, source }
    };

    let reader = BufReader::new(File::open(input).map_err(io_err(input))?);
    let values = extract_column(reader, column).map_err(io_err(input))?;

    let mut writer = BufWriter::new(File::create(output).map_err(io_err(output))?);
    for value in &values {
        writeln!(writer, "{}", value).map_err(io_err(output))?;
    }
    writer.flush().map_err(io_err(output))?;

    debug!("Wrote {} value(s) to {:?}", values.len(), output);
    Ok(values.len())
}

/// Counts of values written for one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub secondary_structure_rows: usize,
    pub accessibility_rows: usize,
}

/// Re-formats the `.ssm` and `.psa` listings of `base` into `.ss` and `.sa` column files.
///
/// Both inputs are checked before anything is written.
pub fn extract_annotations(base: &Path) -> Result<AnnotationSummary, AnnotationError> {
    let paths = AnnotationPaths::for_base(base);
    paths.ensure_inputs_exist()?;
    extract_with_paths(&paths)
}

/// Same as [`extract_annotations`] for a pair of structures, checking all four
/// inputs before writing either structure's output.
pub fn extract_annotation_pair(
    first: &Path,
    second: &Path,
) -> Result<[AnnotationSummary; 2], AnnotationError> {
    let first_paths = AnnotationPaths::for_base(first);
    let second_paths = AnnotationPaths::for_base(second);
    first_paths.ensure_inputs_exist()?;
    second_paths.ensure_inputs_exist()?;
    Ok([
        extract_with_paths(&first_paths)?,
        extract_with_paths(&second_paths)?,
    ])
}

fn extract_with_paths(paths: &AnnotationPaths) -> Result<AnnotationSummary, AnnotationError> {
    let secondary_structure_rows = extract_file(
        &paths.secondary_structure_input,
        &paths.secondary_structure_output,
        AnnotationColumn::SecondaryStructure,
    )?;
    let accessibility_rows = extract_file(
        &paths.accessibility_input,
        &paths.accessibility_output,
        AnnotationColumn::Accessibility,
    )?;
    info!(
        "Extracted {} secondary-structure and {} accessibility value(s) for {:?}",
        secondary_structure_rows, accessibility_rows, paths.secondary_structure_input
    );
    Ok(AnnotationSummary {
        secondary_structure_rows,
        accessibility_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn listing(rows: &[&str]) -> String {
        let mut text = String::new();
        for i in 0..HEADER_LINES {
            text.push_str(&format!("header line {} A B C\n", i));
        }
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    const ROWS: &[&str] = &[
        "   1 A MET    0.0  12.5  45.1 C",
        "   2 A TRP   10.3  20.1  30.7 H",
        "   3 A HOH    1.0   2.0   3.0 X",
        "   4 A UNK    5.5  65.0  80.2 E",
        "   5 A",
    ];

    #[test]
    fn extract_column_keeps_last_column_of_residue_rows() {
        let values =
            extract_column(Cursor::new(listing(ROWS)), AnnotationColumn::SecondaryStructure)
                .unwrap();
        assert_eq!(values, vec!["C", "H", "E"]);
    }

    #[test]
    fn extract_column_keeps_third_from_last_column() {
        let values =
            extract_column(Cursor::new(listing(ROWS)), AnnotationColumn::Accessibility).unwrap();
        assert_eq!(values, vec!["12.5", "20.1", "65.0"]);
    }

    #[test]
    fn extract_column_skips_header_even_if_it_looks_like_data() {
        let mut text = String::from("   0 A ALA 1.0 2.0 3.0 H\n");
        text.push_str(&listing(&["   1 A GLY 1.0 2.0 3.0 E"]));
        let values =
            extract_column(Cursor::new(text), AnnotationColumn::SecondaryStructure).unwrap();
        assert_eq!(values, vec!["E"]);
    }

    #[test]
    fn for_base_appends_extensions() {
        let paths = AnnotationPaths::for_base(Path::new("/tmp/1abc.pdb"));
        assert_eq!(paths.secondary_structure_input, PathBuf::from("/tmp/1abc.pdb.ssm"));
        assert_eq!(paths.accessibility_output, PathBuf::from("/tmp/1abc.pdb.sa"));
    }

    #[test]
    fn extract_annotations_writes_both_outputs() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("1abc");
        fs::write(base.with_extension("ssm"), listing(ROWS)).unwrap();
        fs::write(base.with_extension("psa"), listing(ROWS)).unwrap();

        let summary = extract_annotations(&base).unwrap();
        assert_eq!(summary.secondary_structure_rows, 3);
        assert_eq!(summary.accessibility_rows, 3);
        assert_eq!(fs::read_to_string(base.with_extension("ss")).unwrap(), "C\nH\nE\n");
        assert_eq!(
            fs::read_to_string(base.with_extension("sa")).unwrap(),
            "12.5\n20.1\n65.0\n"
        );
    }

    #[test]
    fn missing_input_fails_without_writing() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("1abc");
        fs::write(base.with_extension("ssm"), listing(ROWS)).unwrap();

        let err = extract_annotations(&base).unwrap_err();
        assert!(matches!(err, AnnotationError::MissingFile { ref path } if path.ends_with("1abc.psa")));
        assert!(!base.with_extension("ss").exists());
    }

    #[test]
    fn pair_extraction_checks_all_inputs_first() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("1abc");
        let second = dir.path().join("2def");
        fs::write(first.with_extension("ssm"), listing(ROWS)).unwrap();
        fs::write(first.with_extension("psa"), listing(ROWS)).unwrap();
        fs::write(second.with_extension("ssm"), listing(ROWS)).unwrap();

        assert!(extract_annotation_pair(&first, &second).is_err());
        assert!(!first.with_extension("ss").exists());

        fs::write(second.with_extension("psa"), listing(ROWS)).unwrap();
        let [a, b] = extract_annotation_pair(&first, &second).unwrap();
        assert_eq!(a, b);
        assert!(second.with_extension("sa").exists());
    }
}
