use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use clap::ValueEnum;
use fst::Set;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::BoggleError;

/// How the loader normalizes letters before they reach the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Keep the text exactly as given
    #[default]
    Preserve,
    /// Lowercase every letter that has a single char lowercase form
    Lower,
}

impl CaseMode {
    /// Normalizes a whole word letter by letter, so it lines up with grid
    /// cells normalized through `apply_char`
    pub fn apply(&self, text: &str) -> String {
        text.chars().map(|c| self.apply_char(c)).collect()
    }

    pub fn apply_char(&self, c: char) -> char {
        match self {
            Self::Preserve => c,
            // Only single char lowercase mappings can live in a grid cell
            Self::Lower => {
                let mut lower = c.to_lowercase();
                match (lower.next(), lower.next()) {
                    (Some(l), None) => l,
                    _ => c,
                }
            }
        }
    }
}

/// Reads whitespace separated words, any number per line
fn read_word_file<P: AsRef<Path>>(path: P, case: CaseMode) -> Result<Vec<String>, BoggleError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        words.extend(line.split_whitespace().map(|word| case.apply(word)));
    }
    Ok(words)
}

/// Builds an fst set. The fst crate wants its keys sorted and unique, so
/// everything goes through a BTreeSet first
fn build_set<I>(keys: I) -> Result<Set<Vec<u8>>, BoggleError>
where
    I: IntoIterator<Item = String>,
{
    let entries = keys
        .into_iter()
        .filter(|k| !k.is_empty())
        .collect::<BTreeSet<_>>();
    Ok(Set::from_iter(entries)?)
}

/// Immutable set of words a path must spell to count
pub struct Dictionary {
    words: Set<Vec<u8>>,
}

impl Dictionary {
    pub fn new<I, S>(words: I) -> Result<Self, BoggleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = build_set(words.into_iter().map(|w| w.as_ref().to_string()))?;
        Ok(Self { words })
    }

    /// Loads the dictionary from a word list, normalizing case as requested
    pub fn from_file<P: AsRef<Path>>(path: P, case: CaseMode) -> Result<Self, BoggleError> {
        let path = path.as_ref();
        let dict = Self::new(read_word_file(path, case)?)?;
        info!(path = %path.display(), words = dict.len(), "loaded dictionary");
        Ok(dict)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// All words in sorted order
    pub fn words(&self) -> Result<Vec<String>, BoggleError> {
        Ok(self.words.stream().into_strs()?)
    }
}

/// Prefix closure of a dictionary: every non-empty prefix of every word.
/// Lets the search drop a path as soon as its letters cannot lead anywhere
pub struct PrefixIndex {
    prefixes: Set<Vec<u8>>,
}

impl PrefixIndex {
    pub fn build(dictionary: &Dictionary) -> Result<Self, BoggleError> {
        let mut prefixes = Vec::new();
        for word in dictionary.words()? {
            // Cut on char boundaries so every prefix stays valid UTF-8
            prefixes.extend(
                word.char_indices()
                    .skip(1)
                    .map(|(i, _)| word[..i].to_string()),
            );
            prefixes.push(word);
        }
        let index = Self {
            prefixes: build_set(prefixes)?,
        };
        info!(prefixes = index.len(), "built prefix index");
        Ok(index)
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_lookup() {
        let dict = Dictionary::new(["cat", "dog", "mouse", "moose", "dog", ""]).unwrap();
        assert_eq!(dict.len(), 4);
        assert!(dict.contains("mouse"));
        assert!(!dict.contains("mous"));
        assert!(!dict.contains(""));
        assert_eq!(dict.words().unwrap(), vec!["cat", "dog", "moose", "mouse"]);
    }

    #[test]
    fn test_prefix_index() {
        let dict = Dictionary::new(["cat", "mouse", "moose"]).unwrap();
        let index = PrefixIndex::build(&dict).unwrap();

        for prefix in ["c", "ca", "cat", "m", "mo", "mou", "mous", "mouse", "moo", "moos"] {
            assert!(index.contains_prefix(prefix), "missing {}", prefix);
        }
        for other in ["", "a", "cats", "mot", "ouse", "dog"] {
            assert!(!index.contains_prefix(other), "unexpected {}", other);
        }
        // c ca cat m mo mou mous mouse moo moos moose
        assert_eq!(index.len(), 11);
    }

    #[test]
    fn test_prefix_index_multibyte() {
        let dict = Dictionary::new(["até"]).unwrap();
        let index = PrefixIndex::build(&dict).unwrap();
        assert!(index.contains_prefix("at"));
        assert!(index.contains_prefix("até"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = Dictionary::new(Vec::<String>::new()).unwrap();
        assert!(dict.is_empty());
        let index = PrefixIndex::build(&dict).unwrap();
        assert!(index.is_empty());
        assert!(!index.contains_prefix("a"));
    }

    #[test]
    fn test_from_file_case() {
        let path = std::env::temp_dir().join(format!("boggle_dict_{}.txt", std::process::id()));
        std::fs::write(&path, "Tan\n  net \n\nTEN\n").unwrap();
        let preserved = Dictionary::from_file(&path, CaseMode::Preserve).unwrap();
        let lowered = Dictionary::from_file(&path, CaseMode::Lower).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(preserved.words().unwrap(), vec!["TEN", "Tan", "net"]);
        assert_eq!(lowered.words().unwrap(), vec!["net", "tan", "ten"]);
    }

    #[test]
    fn test_missing_file() {
        let result = Dictionary::from_file("/nonexistent/boggle/words.txt", CaseMode::Lower);
        assert!(matches!(result, Err(BoggleError::Io(_))));
    }

    #[test]
    fn test_case_mode_char() {
        assert_eq!(CaseMode::Lower.apply_char('Q'), 'q');
        assert_eq!(CaseMode::Preserve.apply_char('Q'), 'Q');
        // İ lowercases to two chars, so it stays put
        assert_eq!(CaseMode::Lower.apply_char('İ'), 'İ');
    }

    #[test]
    fn test_from_file_several_words_per_line() {
        let path = std::env::temp_dir().join(format!("boggle_tokens_{}.txt", std::process::id()));
        std::fs::write(&path, "ten net tan\n\tsir  tie\n").unwrap();
        let dict = Dictionary::from_file(&path, CaseMode::Preserve).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(dict.words().unwrap(), vec!["net", "sir", "tan", "ten", "tie"]);
    }

    #[test]
    fn test_word_and_cell_case_agree() {
        // İ has a two char lowercase form, so both sides keep it as is
        assert_eq!(CaseMode::Lower.apply("İSTANBUL"), "İstanbul");
        assert_eq!(CaseMode::Lower.apply("TAN"), "tan");
        assert_eq!(CaseMode::Preserve.apply("Tan"), "Tan");

        let word = CaseMode::Lower.apply("İT");
        let cells = "İT".chars().map(|c| CaseMode::Lower.apply_char(c)).collect::<String>();
        assert_eq!(word, cells);
    }
}
