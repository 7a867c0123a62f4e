use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::inflection::{install_inflections, VerbInflectionDictionary};
use crate::{PredicationError, PredicationResult};

/// Settings for phrase generation, usually read from a RON file:
///
/// ```ron
/// (
///     inflection_dictionary: Some("data/verb_inflections.tsv"),
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// A tab-separated inflection table used instead of the built-in one.
    pub inflection_dictionary: Option<PathBuf>,
}

impl GenerationConfig {
    pub fn from_ron_str(source: &str) -> PredicationResult<Self> {
        ron::from_str(source).map_err(|error| PredicationError::Config {
            path: None,
            message: error.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> PredicationResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        ron::from_str(&source).map_err(|error| PredicationError::Config {
            path: Some(path.to_path_buf()),
            message: error.to_string(),
        })
    }

    /// The configured dictionary, or the built-in English one.
    pub fn dictionary(&self) -> PredicationResult<VerbInflectionDictionary> {
        match &self.inflection_dictionary {
            Some(path) => VerbInflectionDictionary::load(path),
            None => Ok(VerbInflectionDictionary::english()),
        }
    }

    /// Installs the configured dictionary process-wide. Without one this
    /// does nothing. Fails once generation has already used a dictionary.
    pub fn apply(&self) -> PredicationResult<()> {
        if self.inflection_dictionary.is_none() {
            return Ok(());
        }
        install_inflections(self.dictionary()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::from_ron_str("()").unwrap();
        assert_eq!(config, GenerationConfig::default());
        assert!(config.apply().is_ok());
        assert!(config.dictionary().unwrap().len() > 300);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = GenerationConfig::from_ron_str("(verbosity: 3)").unwrap_err();
        assert!(matches!(err, PredicationError::Config { path: None, .. }));
    }

    #[test]
    fn test_load_dictionary_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = dir.path().join("verbs.tsv");
        let mut file = fs::File::create(&table).unwrap();
        writeln!(file, "# stem\t3sg\tprog\tpast\tpastpart").unwrap();
        writeln!(file, "glorp\tglorps\tglorping\tglarp\tglurpen").unwrap();

        let config_path = dir.path().join("generation.ron");
        fs::write(
            &config_path,
            format!("(inflection_dictionary: Some({:?}))", table.display().to_string()),
        )
        .unwrap();

        let config = GenerationConfig::load(&config_path).unwrap();
        assert_eq!(config.inflection_dictionary.as_deref(), Some(table.as_path()));
        let dictionary = config.dictionary().unwrap();
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.stem("glarp"), "glorp");
        assert_eq!(dictionary.past_participle("glorp"), "glurpen");
    }

    #[test]
    fn test_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            GenerationConfig::load(dir.path().join("absent.ron")),
            Err(PredicationError::Io(_))
        ));
        let config = GenerationConfig {
            inflection_dictionary: Some(dir.path().join("absent.tsv")),
        };
        assert!(config.dictionary().is_err());
        assert!(config.apply().is_err());
    }
}
