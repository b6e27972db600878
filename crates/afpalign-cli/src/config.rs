use crate::cli::AlignmentOptions;
use crate::error::{CliError, Result};
use afpalign::core::models::algorithm::Algorithm;
use afpalign::engine::config::AlignmentConfig;
use std::path::Path;
use toml::{Table, Value};
use tracing::debug;

/// Configuration values collected from a TOML file, before command-line overrides.
#[derive(Debug, Default, Clone)]
pub struct PartialAlignConfig {
    table: Table,
}

impl PartialAlignConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let table = content.parse::<Table>().map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Ok(Self { table })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Layers command-line flags, then `--set` values, over the file values and validates
    /// the result.
    pub fn merge_with_cli(mut self, options: &AlignmentOptions) -> Result<AlignmentConfig> {
        if let Some(name) = &options.algorithm {
            let algorithm: Algorithm = name
                .parse()
                .map_err(|e: afpalign::core::models::algorithm::ParseAlgorithmError| {
                    CliError::Argument(e.to_string())
                })?;
            self.insert("algorithm", Value::String(algorithm_key(algorithm).to_string()))?;
        }
        if let Some(length) = options.fragment_length {
            self.insert("fragment.length", integer(length)?)?;
        }
        if let Some(twists) = options.max_twists {
            self.insert("chaining.max-twists", integer(twists)?)?;
        }
        self.apply_set_values(&options.set_values)?;

        let config: AlignmentConfig = self
            .table
            .try_into()
            .map_err(|e: toml::de::Error| CliError::Config(e.message().to_string()))?;
        config
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        debug!("Final alignment configuration: {:?}", config);
        Ok(config)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();
            let value = parse_value(value_str);
            debug!("Applying --set override {} = {:?}", key, value);
            self.insert(key, value)?;
        }
        Ok(())
    }

    fn insert(&mut self, dotted_key: &str, value: Value) -> Result<()> {
        let mut parts: Vec<&str> = dotted_key.split('.').collect();
        let Some(leaf) = parts.pop().filter(|k| !k.is_empty()) else {
            return Err(CliError::Config(format!(
                "Unsupported configuration key for --set: '{}'",
                dotted_key
            )));
        };
        let mut table = &mut self.table;
        for part in parts {
            let entry = table
                .entry(part.to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            table = entry.as_table_mut().ok_or_else(|| {
                CliError::Config(format!(
                    "Configuration key '{}' is not a section (in '{}')",
                    part, dotted_key
                ))
            })?;
        }
        table.insert(leaf.to_string(), value);
        Ok(())
    }
}

/// Interprets a `--set` value as a TOML scalar, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    if let Ok(v) = raw.parse::<i64>() {
        return Value::Integer(v);
    }
    if let Ok(v) = raw.parse::<f64>() {
        return Value::Float(v);
    }
    if let Ok(v) = raw.parse::<bool>() {
        return Value::Boolean(v);
    }
    Value::String(raw.trim_matches('"').to_string())
}

fn integer(value: usize) -> Result<Value> {
    i64::try_from(value)
        .map(Value::Integer)
        .map_err(|_| CliError::Argument(format!("Value {} is too large", value)))
}

fn algorithm_key(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Ce => "ce",
        Algorithm::CeSideChain => "ce-sidechain",
        Algorithm::FatCatRigid => "fatcat-rigid",
        Algorithm::FatCatFlexible => "fatcat-flexible",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn options(set_values: &[&str]) -> AlignmentOptions {
        AlignmentOptions {
            set_values: set_values.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_apply_without_file() {
        let config = PartialAlignConfig::default()
            .merge_with_cli(&options(&[]))
            .unwrap();
        assert_eq!(config, AlignmentConfig::default());
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("align.toml");
        fs::write(
            &path,
            "algorithm = \"ce\"\n[fragment]\nlength = 6\n[scoring]\ntwist-penalty = 2.5\n",
        )
        .unwrap();

        let config = PartialAlignConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&options(&[]))
            .unwrap();
        assert_eq!(config.algorithm, Algorithm::Ce);
        assert_eq!(config.fragment.length, 6);
        assert_eq!(config.scoring.twist_penalty, 2.5);
        assert_eq!(config.chaining.max_twists, 5);
    }

    #[test]
    fn flags_override_file_and_set_overrides_flags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("align.toml");
        fs::write(&path, "[fragment]\nlength = 6\n").unwrap();

        let mut opts = options(&["fragment.length=10", "optimization.merge-angle-tolerance=12.5"]);
        opts.fragment_length = Some(7);
        opts.algorithm = Some("jFatCat_rigid".to_string());

        let config = PartialAlignConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&opts)
            .unwrap();
        assert_eq!(config.fragment.length, 10);
        assert_eq!(config.algorithm, Algorithm::FatCatRigid);
        assert_eq!(config.optimization.merge_angle_tolerance, 12.5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = PartialAlignConfig::default().merge_with_cli(&options(&["fragment.size=3"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let result = PartialAlignConfig::default().merge_with_cli(&options(&["fragment.length"]));
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("KEY=VALUE")));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let result = PartialAlignConfig::default().merge_with_cli(&options(&["fragment.step=0"]));
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("fragment.step")));
    }

    #[test]
    fn unknown_algorithm_flag_is_an_argument_error() {
        let mut opts = options(&[]);
        opts.algorithm = Some("dali".to_string());
        let result = PartialAlignConfig::default().merge_with_cli(&opts);
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn parse_value_recognizes_scalars() {
        assert_eq!(parse_value("3"), Value::Integer(3));
        assert_eq!(parse_value("2.5"), Value::Float(2.5));
        assert_eq!(parse_value("true"), Value::Boolean(true));
        assert_eq!(parse_value("ce"), Value::String("ce".to_string()));
    }
}
