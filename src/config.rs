use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::boggle::{BoggleError, CaseMode, Pruning};
use crate::utils::serialization;

/// Settings that can live in a JSON file. Missing fields take their defaults
/// and command line flags override whatever the file says
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Word list, one word per line
    pub dictionary: PathBuf,
    /// Case policy applied to both the word list and the grid letters
    pub case: CaseMode,
    /// Search the starting cells on the rayon thread pool
    pub parallel: bool,
    pub pruning: Pruning,
    /// Report the path that spells each word
    pub paths: bool,
    /// Print a JSON report instead of plain text
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from("dict.txt"),
            case: CaseMode::Preserve,
            parallel: false,
            pruning: Pruning::Prefix,
            paths: false,
            json: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BoggleError> {
        serialization::load_json(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config: Config =
            serde_json::from_str(r#"{"case": "lower", "pruning": "exhaustive"}"#).unwrap();
        assert_eq!(config.case, CaseMode::Lower);
        assert_eq!(config.pruning, Pruning::Exhaustive);
        assert_eq!(config.dictionary, PathBuf::from("dict.txt"));
        assert!(!config.parallel);
    }

    #[test]
    fn test_load_round_trip() {
        let path = std::env::temp_dir().join(format!("boggle_config_{}.json", std::process::id()));
        let config = Config {
            dictionary: PathBuf::from("/usr/share/dict/words"),
            parallel: true,
            json: true,
            ..Config::default()
        };
        serialization::save_json(&config, &path).unwrap();
        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_case_rejected() {
        let result = serde_json::from_str::<Config>(r#"{"case": "upper"}"#);
        assert!(result.is_err());
    }
}
