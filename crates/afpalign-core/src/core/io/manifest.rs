use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Manifest '{path}' record {record}: missing {field}")]
    MissingField {
        path: String,
        record: usize,
        field: &'static str,
    },
    #[error("Manifest '{path}' record {record}: chain identifier must be one character (value: '{value}')")]
    InvalidChain {
        path: String,
        record: usize,
        value: String,
    },
}

/// One structure to search against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    pub name: String,
    pub path: PathBuf,
    pub chain: Option<char>,
}

/// Loads a tab-separated target list: `name<TAB>path[<TAB>chain]`, no header, `#` comments.
///
/// Relative structure paths are resolved against the manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Vec<SearchTarget>, ManifestError> {
    let display = path.to_string_lossy().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ManifestError::Csv {
            path: display.clone(),
            source: e,
        })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let mut targets = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ManifestError::Csv {
            path: display.clone(),
            source: e,
        })?;
        let record_num = index + 1;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let field = |i: usize, name: &'static str| {
            record
                .get(i)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ManifestError::MissingField {
                    path: display.clone(),
                    record: record_num,
                    field: name,
                })
        };
        let name = field(0, "name")?.to_string();
        let structure = PathBuf::from(field(1, "path")?);
        let chain = match record.get(2).filter(|v| !v.is_empty()) {
            None => None,
            Some(value) => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => {
                        return Err(ManifestError::InvalidChain {
                            path: display.clone(),
                            record: record_num,
                            value: value.to_string(),
                        });
                    }
                }
            }
        };

        let path = if structure.is_absolute() {
            structure
        } else {
            base.join(structure)
        };
        targets.push(SearchTarget { name, path, chain });
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_manifest_resolves_relative_paths_and_chains() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("targets.tsv");
        fs::write(
            &manifest,
            "# name\tpath\tchain\n1abc\tpdb/1abc.pdb\tA\n2xyz\t/data/2xyz.pdb\n",
        )
        .unwrap();

        let targets = load_manifest(&manifest).unwrap();
        assert_eq!(
            targets,
            vec![
                SearchTarget {
                    name: "1abc".to_string(),
                    path: dir.path().join("pdb/1abc.pdb"),
                    chain: Some('A'),
                },
                SearchTarget {
                    name: "2xyz".to_string(),
                    path: PathBuf::from("/data/2xyz.pdb"),
                    chain: None,
                },
            ]
        );
    }

    #[test]
    fn load_manifest_rejects_missing_path() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("targets.tsv");
        fs::write(&manifest, "1abc\n").unwrap();
        let result = load_manifest(&manifest);
        assert!(matches!(
            result,
            Err(ManifestError::MissingField { record: 1, field: "path", .. })
        ));
    }

    #[test]
    fn load_manifest_rejects_long_chain_identifier() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("targets.tsv");
        fs::write(&manifest, "1abc\t1abc.pdb\tAB\n").unwrap();
        assert!(matches!(
            load_manifest(&manifest),
            Err(ManifestError::InvalidChain { .. })
        ));
    }

    #[test]
    fn load_manifest_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_manifest(&dir.path().join("absent.tsv"));
        assert!(matches!(result, Err(ManifestError::Csv { .. })));
    }
}
