use crate::core::io::traits::StructureFile;
use crate::core::models::atom::AtomRecord;
use crate::core::models::structure::{ModelId, Structure};
use crate::core::models::table::AtomTable;
use nalgebra::Point3;
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const ATOM_RECORD: &str = "ATOM";
const EXPERIMENT_RECORD: &str = "EXPDTA";
const MULTI_MODEL_METHOD: &str = "NMR";
const MODEL_END_MARKER: &str = "ENDMDL";
const MODEL_FILE_INFIX: &str = "_Model_";

// Last column (exclusive, zero-based) read from an ATOM record: the end of z.
const MIN_ATOM_LINE_LENGTH: usize = 54;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM record (must be at least 54 chars)")]
    LineTooShort,
}

/// One model's worth of raw file text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSegment<'a> {
    pub model: ModelId,
    /// The 1-based line number of the first line of `text` in the whole file.
    pub first_line: usize,
    pub text: &'a str,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

/// Returns whether the file declares a multi-model (NMR) experiment.
pub fn is_multi_model(text: &str) -> bool {
    text.lines()
        .any(|line| line.starts_with(EXPERIMENT_RECORD) && line.contains(MULTI_MODEL_METHOD))
}

/// Cuts multi-model text into per-model segments at every `ENDMDL` marker.
///
/// Text after the last marker is not a model and is dropped, as are empty
/// segments. Models are numbered from zero in file order.
pub fn split_models(text: &str) -> Vec<ModelSegment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut line = 1;

    for (pos, marker) in text.match_indices(MODEL_END_MARKER) {
        let piece = &text[start..pos];
        if !piece.is_empty() {
            segments.push(ModelSegment {
                model: ModelId::Numbered(segments.len()),
                first_line: line,
                text: piece,
            });
        }
        line += piece.matches('\n').count();
        start = pos + marker.len();
    }

    segments
}

/// Returns the segments to analyse: one per model for NMR entries, otherwise the
/// whole text as a single [`ModelId::NotApplicable`] segment.
pub fn model_segments(text: &str) -> Vec<ModelSegment<'_>> {
    if is_multi_model(text) {
        let segments = split_models(text);
        if segments.is_empty() {
            warn!("Multi-model entry contains no {} marker; no models extracted.", MODEL_END_MARKER);
        }
        segments
    } else {
        vec![ModelSegment {
            model: ModelId::NotApplicable,
            first_line: 1,
            text,
        }]
    }
}

/// Parses one `ATOM` line. Lines of any other record type yield `Ok(None)`.
pub fn parse_atom_line(line: &str, line_num: usize) -> Result<Option<AtomRecord>, PdbError> {
    let record_type = slice_and_trim(line, 0, 6);
    if record_type != ATOM_RECORD {
        return Ok(None);
    }
    if line.len() < MIN_ATOM_LINE_LENGTH {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let parse_error = |kind| PdbError::Parse {
        line: line_num,
        kind,
    };
    let required = |start: usize, end: usize, columns: &str| -> Result<&str, PdbError> {
        let value = slice_and_trim(line, start, end);
        if value.is_empty() {
            Err(parse_error(PdbParseErrorKind::MissingRequiredField {
                columns: columns.into(),
            }))
        } else {
            Ok(value)
        }
    };
    let float = |start: usize, end: usize, columns: &str| -> Result<f64, PdbError> {
        let value = required(start, end, columns)?;
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(parse_error(PdbParseErrorKind::InvalidFloat {
                columns: columns.into(),
                value: value.into(),
            })),
        }
    };

    let serial_str = required(6, 11, "7-11")?;
    let serial: i64 = serial_str.parse().map_err(|_| {
        parse_error(PdbParseErrorKind::InvalidInt {
            columns: "7-11".into(),
            value: serial_str.into(),
        })
    })?;
    let name = required(12, 16, "13-16")?;
    let residue_name = required(17, 20, "18-20")?;
    let chain = line.get(21..22).and_then(|c| c.chars().next()).unwrap_or(' ');
    let res_seq_str = required(22, 26, "23-26")?;
    let residue_seq: isize = res_seq_str.parse().map_err(|_| {
        parse_error(PdbParseErrorKind::InvalidInt {
            columns: "23-26".into(),
            value: res_seq_str.into(),
        })
    })?;
    let x = float(30, 38, "31-38")?;
    let y = float(38, 46, "39-46")?;
    let z = float(46, 54, "47-54")?;

    Ok(Some(AtomRecord::new(
        serial,
        name,
        residue_name,
        chain,
        residue_seq,
        Point3::new(x, y, z),
    )))
}

/// Parses every `ATOM` line of `text` into a table, in file order.
///
/// `first_line` is the line number of the first line of `text`, used in errors.
pub fn parse_atoms(text: &str, first_line: usize) -> Result<AtomTable, PdbError> {
    let mut table = AtomTable::new();
    for (offset, line) in text.lines().enumerate() {
        if let Some(atom) = parse_atom_line(line, first_line + offset)? {
            table.push(atom);
        }
    }
    Ok(table)
}

/// Returns the path a split model is written to: `<stem>_Model_<n>.<ext>` beside `path`.
pub fn model_file_path(path: &Path, model_index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut file_name = format!("{}{}{}", stem, MODEL_FILE_INFIX, model_index);
    if let Some(ext) = path.extension() {
        file_name.push('.');
        file_name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(file_name)
}

/// Returns whether a file name looks like one produced by [`write_model_files`].
pub fn is_model_file_name(file_name: &str) -> bool {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    stem.rsplit_once(MODEL_FILE_INFIX)
        .is_some_and(|(_, n)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Writes each numbered model segment of `text` to its own file beside `path`.
pub fn write_model_files(path: &Path, segments: &[ModelSegment<'_>]) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(segments.len());
    for segment in segments {
        let ModelId::Numbered(index) = segment.model else {
            continue;
        };
        let model_path = model_file_path(path, index);
        fs::write(&model_path, format!("{}\n", segment.text))?;
        debug!("Wrote model {} to {:?}", index, &model_path);
        written.push(model_path);
    }
    Ok(written)
}

/// Reader for fixed-column coordinate files.
pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead, source: &str) -> Result<Vec<Structure>, Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        model_segments(&text)
            .into_iter()
            .map(|segment| {
                let atoms = parse_atoms(segment.text, segment.first_line)?;
                Ok(Structure::new(source, segment.model, atoms))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn atom_line(serial: i64, name: &str, res: &str, chain: char, seq: isize, xyz: [f64; 3]) -> String {
        format!(
            "ATOM  {:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           N",
            serial, name, res, chain, seq, xyz[0], xyz[1], xyz[2]
        )
    }

    #[test]
    fn parse_atom_line_reads_fixed_columns() {
        let line = atom_line(123, "NE1", "TRP", 'B', 45, [1.5, -2.25, 10.0]);
        let atom = parse_atom_line(&line, 1).unwrap().unwrap();
        assert_eq!(atom.record_type, "ATOM");
        assert_eq!(atom.serial, 123);
        assert_eq!(atom.name, "NE1");
        assert_eq!(atom.residue_name, "TRP");
        assert_eq!(atom.chain, 'B');
        assert_eq!(atom.residue_seq, 45);
        assert_eq!(atom.position, Point3::new(1.5, -2.25, 10.0));
    }

    #[test]
    fn parse_atom_line_reads_standard_pdb_line() {
        let line = "ATOM    264  NE1 TRP A  33      12.207  20.512   5.998  1.00 15.32           N  ";
        let atom = parse_atom_line(line, 1).unwrap().unwrap();
        assert_eq!(atom.serial, 264);
        assert_eq!(atom.name, "NE1");
        assert_eq!(atom.chain, 'A');
        assert_eq!(atom.residue_seq, 33);
        assert_eq!(atom.position, Point3::new(12.207, 20.512, 5.998));
    }

    #[test]
    fn parse_atom_line_skips_other_records() {
        let hetatm = "HETATM 1001  O   HOH A 201      10.000  10.000  10.000  1.00  0.00           O";
        assert!(parse_atom_line(hetatm, 1).unwrap().is_none());
        assert!(parse_atom_line("REMARK   2 RESOLUTION.", 1).unwrap().is_none());
        assert!(parse_atom_line("", 1).unwrap().is_none());
    }

    #[test]
    fn parse_atom_line_rejects_truncated_line() {
        let result = parse_atom_line("ATOM      1  N   ALA A   1      11.104   6.134", 7);
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                line: 7,
                kind: PdbParseErrorKind::LineTooShort
            })
        ));
    }

    #[test]
    fn parse_atom_line_rejects_malformed_numbers() {
        let line = "ATOM      1  N   ALA A   1      11.1x4   6.134  -6.504  1.00  0.00           N";
        match parse_atom_line(line, 3) {
            Err(PdbError::Parse { line, kind }) => {
                assert_eq!(line, 3);
                assert_eq!(
                    kind,
                    PdbParseErrorKind::InvalidFloat {
                        columns: "31-38".into(),
                        value: "11.1x4".into()
                    }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let line = "ATOM    1a1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N";
        assert!(matches!(
            parse_atom_line(line, 1),
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::InvalidInt { .. },
                ..
            })
        ));
    }

    #[test]
    fn parse_atom_line_rejects_non_finite_coordinates() {
        let line = "ATOM      1  N   ALA A   1         nan   6.134  -6.504  1.00  0.00           N";
        match parse_atom_line(line, 5) {
            Err(PdbError::Parse { line, kind }) => {
                assert_eq!(line, 5);
                assert_eq!(
                    kind,
                    PdbParseErrorKind::InvalidFloat {
                        columns: "31-38".into(),
                        value: "nan".into()
                    }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let line = "ATOM      1  N   ALA A   1      11.104     inf  -6.504  1.00  0.00           N";
        assert!(matches!(
            parse_atom_line(line, 1),
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { .. },
                ..
            })
        ));
    }

    #[test]
    fn parse_atom_line_rejects_missing_fields() {
        let line = "ATOM      1      ALA A   1      11.104   6.134  -6.504  1.00  0.00           N";
        assert!(matches!(
            parse_atom_line(line, 1),
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::MissingRequiredField { .. },
                ..
            })
        ));
    }

    #[test]
    fn is_multi_model_detects_nmr_experiment_header() {
        assert!(is_multi_model("HEADER    X\nEXPDTA    SOLUTION NMR\nATOM"));
        assert!(!is_multi_model("EXPDTA    X-RAY DIFFRACTION\n"));
        assert!(!is_multi_model("REMARK NMR\n"));
    }

    #[test]
    fn split_models_cuts_at_each_marker_and_drops_trailer() {
        let text = "EXPDTA    SOLUTION NMR\nMODEL 1\nA\nENDMDL\nMODEL 2\nB\nENDMDL\nEND\n";
        let segments = split_models(text);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].model, ModelId::Numbered(0));
        assert_eq!(segments[1].model, ModelId::Numbered(1));
        assert!(segments[0].text.contains("MODEL 1"));
        assert!(segments[1].text.contains("MODEL 2"));
        assert!(!segments[1].text.contains("END\n"));
        assert_eq!(segments[0].first_line, 1);
        assert_eq!(segments[1].first_line, 4);
    }

    #[test]
    fn split_models_without_marker_yields_nothing() {
        assert!(split_models("EXPDTA    NMR\nATOM\n").is_empty());
    }

    #[test]
    fn model_segments_returns_whole_text_for_single_model_entry() {
        let text = "EXPDTA    X-RAY DIFFRACTION\nATOM\n";
        let segments = model_segments(text);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].model, ModelId::NotApplicable);
        assert_eq!(segments[0].text, text);
    }

    #[test]
    fn read_from_splits_nmr_entries_into_models() {
        let text = format!(
            "EXPDTA    SOLUTION NMR\nMODEL        1\n{}\nENDMDL\nMODEL        2\n{}\n{}\nENDMDL\nEND\n",
            atom_line(1, "N", "ALA", 'A', 1, [0.0, 0.0, 0.0]),
            atom_line(1, "N", "ALA", 'A', 1, [0.1, 0.0, 0.0]),
            atom_line(2, "CA", "ALA", 'A', 1, [1.5, 0.0, 0.0]),
        );
        let structures = PdbFile::read_from(&mut Cursor::new(text), "2abc.pdb").unwrap();
        assert_eq!(structures.len(), 2);
        assert_eq!(structures[0].model, ModelId::Numbered(0));
        assert_eq!(structures[0].atoms.len(), 1);
        assert_eq!(structures[1].model, ModelId::Numbered(1));
        assert_eq!(structures[1].atoms.len(), 2);
        assert_eq!(structures[1].code(), "2abc");
    }

    #[test]
    fn read_from_reports_absolute_line_numbers_inside_models() {
        let text = format!(
            "EXPDTA    SOLUTION NMR\n{}\nENDMDL\n{}\nENDMDL\n",
            atom_line(1, "N", "ALA", 'A', 1, [0.0, 0.0, 0.0]),
            "ATOM      2  CA  ALA A   1       1.x00   0.000   0.000  1.00  0.00           C",
        );
        let err = PdbFile::read_from(&mut Cursor::new(text), "2abc.pdb").unwrap_err();
        assert!(matches!(err, PdbError::Parse { line: 4, .. }));
    }

    #[test]
    fn read_from_keeps_only_atom_records() {
        let text = format!(
            "HEADER    TEST\n{}\nHETATM 1001  O   HOH A 201      10.000  10.000  10.000  1.00  0.00           O\n{}\nEND\n",
            atom_line(1, "N", "ALA", 'A', 1, [0.0, 0.0, 0.0]),
            atom_line(2, "CA", "ALA", 'A', 1, [1.5, 0.0, 0.0]),
        );
        let structures = PdbFile::read_from(&mut Cursor::new(text), "1abc.pdb").unwrap();
        assert_eq!(structures.len(), 1);
        assert_eq!(structures[0].model, ModelId::NotApplicable);
        assert_eq!(structures[0].atoms.len(), 2);
        assert_eq!(structures[0].atoms[1].name, "CA");
    }

    #[test]
    fn model_file_path_appends_model_suffix() {
        let path = Path::new("/data/2k3x.pdb");
        assert_eq!(model_file_path(path, 3), PathBuf::from("/data/2k3x_Model_3.pdb"));
        assert!(is_model_file_name("2k3x_Model_3.pdb"));
        assert!(!is_model_file_name("2k3x.pdb"));
        assert!(!is_model_file_name("2k3x_Model_.pdb"));
    }

    #[test]
    fn write_model_files_materializes_each_model() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2k3x.pdb");
        let text = "EXPDTA    NMR\nMODEL 1\nENDMDL\nMODEL 2\nENDMDL\n";
        let segments = split_models(text);
        let written = write_model_files(&path, &segments).unwrap();
        assert_eq!(written.len(), 2);
        let second = fs::read_to_string(dir.path().join("2k3x_Model_1.pdb")).unwrap();
        assert!(second.contains("MODEL 2"));
        assert!(second.ends_with('\n'));
    }
}
