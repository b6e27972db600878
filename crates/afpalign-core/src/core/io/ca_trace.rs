use crate::core::io::traits::CoordinateFile;
use crate::core::models::coords::CoordinateSet;
use crate::core::models::residue::{ResidueLabel, one_letter_code, three_letter_name};
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const CA_ATOM_NAME: &str = "CA";
const WRITTEN_CHAIN_ID: char = 'A';

#[derive(Debug, Error)]
pub enum CaTraceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: CaTraceParseErrorKind,
    },
    #[error("No CA atoms found (chain filter: {chain:?})")]
    NoResidues { chain: Option<char> },
    #[error("Invalid coordinate set: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Error)]
pub enum CaTraceParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Line is too short for an ATOM record (must be at least 54 chars)")]
    LineTooShort,
}

/// Which chain of a PDB file to read. Without a chain, the first chain holding CA atoms
/// is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceSelection {
    pub chain: Option<char>,
}

impl TraceSelection {
    pub fn chain(chain: char) -> Self {
        Self { chain: Some(chain) }
    }
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_coordinate(
    line: &str,
    line_num: usize,
    start: usize,
    columns: &'static str,
) -> Result<f64, CaTraceError> {
    let value = slice_and_trim(line, start, start + 8);
    value.parse().map_err(|_| CaTraceError::Parse {
        line: line_num,
        kind: CaTraceParseErrorKind::InvalidFloat {
            columns,
            value: value.into(),
        },
    })
}

/// Cα traces in PDB format: `ATOM` records named `CA` (and selenomethionine `HETATM`
/// records), first model only, first alternate location only.
pub struct CaTraceFile;

impl CoordinateFile for CaTraceFile {
    type Selection = TraceSelection;
    type Error = CaTraceError;

    fn read_from(
        reader: &mut impl BufRead,
        name: &str,
        selection: &Self::Selection,
    ) -> Result<CoordinateSet, Self::Error> {
        let mut points = Vec::new();
        let mut labels = Vec::new();
        let mut seen_residues = HashSet::new();
        let mut chain = selection.chain;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            if record_type == "ENDMDL" {
                break;
            }
            let res_name = slice_and_trim(&line, 17, 20);
            let is_trace_record =
                record_type == "ATOM" || (record_type == "HETATM" && res_name == "MSE");
            if !is_trace_record || slice_and_trim(&line, 12, 16) != CA_ATOM_NAME {
                continue;
            }
            if line.len() < 54 {
                return Err(CaTraceError::Parse {
                    line: line_num,
                    kind: CaTraceParseErrorKind::LineTooShort,
                });
            }

            let alt_loc = slice_and_trim(&line, 16, 17);
            if !(alt_loc.is_empty() || alt_loc == "A" || alt_loc == "1") {
                continue;
            }

            let chain_id = line.get(21..22).and_then(|c| c.chars().next()).unwrap_or(' ');
            match chain {
                Some(wanted) if wanted != chain_id => continue,
                Some(_) => {}
                None => chain = Some(chain_id),
            }

            let res_seq = slice_and_trim(&line, 22, 26);
            if res_seq.is_empty() {
                return Err(CaTraceError::Parse {
                    line: line_num,
                    kind: CaTraceParseErrorKind::MissingRequiredField { columns: "23-26" },
                });
            }
            let number = format!("{}{}", res_seq, slice_and_trim(&line, 26, 27));
            if !seen_residues.insert(number.clone()) {
                continue;
            }

            let x = parse_coordinate(&line, line_num, 30, "31-38")?;
            let y = parse_coordinate(&line, line_num, 38, "39-46")?;
            let z = parse_coordinate(&line, line_num, 46, "47-54")?;

            points.push(Point3::new(x, y, z));
            labels.push(ResidueLabel::new(one_letter_code(res_name), number));
        }

        if points.is_empty() {
            return Err(CaTraceError::NoResidues {
                chain: selection.chain,
            });
        }
        CoordinateSet::new(name, points, labels)
            .map_err(|e| CaTraceError::Inconsistency(e.to_string()))
    }

    fn write_to(set: &CoordinateSet, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "REMARK   1 {}", set.name())?;
        for (index, (point, label)) in set.points().iter().zip(set.labels()).enumerate() {
            let (res_seq, insertion) = split_insertion_code(&label.number);
            writeln!(
                writer,
                "ATOM  {:>5}  CA  {:>3} {}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}  1.00  0.00           C",
                index + 1,
                three_letter_name(label.code),
                WRITTEN_CHAIN_ID,
                res_seq,
                insertion,
                point.x,
                point.y,
                point.z,
            )?;
        }
        writeln!(writer, "TER")?;
        writeln!(writer, "END")?;
        Ok(())
    }
}

fn split_insertion_code(number: &str) -> (&str, &str) {
    match number.char_indices().last() {
        Some((i, c)) if c.is_ascii_alphabetic() => (&number[..i], &number[i..]),
        _ => (number, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
HEADER    TEST
ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  MET A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  CA  LYS A   2      12.000   8.000  -4.000  1.00  0.00           C
ATOM      4  CA ALEU A   3      13.000   9.000  -3.000  0.50  0.00           C
ATOM      5  CA BLEU A   3      13.500   9.500  -3.500  0.50  0.00           C
ATOM      6  CA  GLY A   3A     14.000  10.000  -2.000  1.00  0.00           C
HETATM    7  CA  MSE A   4      15.000  11.000  -1.000  1.00  0.00           C
HETATM    8  O   HOH A 101      20.000  20.000  20.000  1.00  0.00           O
ATOM      9  CA  ALA B   1       1.000   2.000   3.000  1.00  0.00           C
ENDMDL
ATOM     10  CA  ALA A   9       0.000   0.000   0.000  1.00  0.00           C
";

    fn read(selection: TraceSelection) -> Result<CoordinateSet, CaTraceError> {
        CaTraceFile::read_from(&mut Cursor::new(SAMPLE), "sample", &selection)
    }

    #[test]
    fn read_collects_first_chain_ca_atoms() {
        let set = read(TraceSelection::default()).unwrap();
        assert_eq!(set.name(), "sample");
        assert_eq!(set.len(), 5);
        let numbers: Vec<&str> = set.labels().iter().map(|l| l.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "3", "3A", "4"]);
        let codes: String = set.labels().iter().map(|l| l.code).collect();
        assert_eq!(codes, "MKLGM");
        assert_eq!(*set.point(2), Point3::new(13.0, 9.0, -3.0));
    }

    #[test]
    fn read_honors_chain_selection() {
        let set = read(TraceSelection::chain('B')).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.code(0), 'A');
    }

    #[test]
    fn read_fails_for_missing_chain() {
        let result = read(TraceSelection::chain('Z'));
        assert!(matches!(result, Err(CaTraceError::NoResidues { chain: Some('Z') })));
    }

    #[test]
    fn read_reports_bad_coordinates_with_line_number() {
        let text = "ATOM      2  CA  MET A   1      11.6x9   6.071  -5.147  1.00  0.00           C\n";
        let result =
            CaTraceFile::read_from(&mut Cursor::new(text), "bad", &TraceSelection::default());
        match result {
            Err(CaTraceError::Parse {
                line: 1,
                kind: CaTraceParseErrorKind::InvalidFloat { columns, .. },
            }) => assert_eq!(columns, "31-38"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn written_trace_reads_back_identically() {
        let set = read(TraceSelection::default()).unwrap();
        let file = NamedTempFile::new().unwrap();
        CaTraceFile::write_to_path(&set, file.path()).unwrap();

        let reread =
            CaTraceFile::read_from_path(file.path(), "sample", &TraceSelection::default()).unwrap();
        assert_eq!(reread, set);
    }

    #[test]
    fn split_insertion_code_separates_trailing_letter() {
        assert_eq!(split_insertion_code("57A"), ("57", "A"));
        assert_eq!(split_insertion_code("-3"), ("-3", ""));
    }
}
