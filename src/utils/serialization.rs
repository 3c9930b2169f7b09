use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::boggle::BoggleError;

pub fn to_json<T: Serialize>(data: &T) -> Result<String, BoggleError> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn save_json<T: Serialize, TPath: AsRef<Path>>(data: &T, path: TPath) -> Result<(), BoggleError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned, TPath: AsRef<Path>>(path: TPath) -> Result<T, BoggleError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("boggle_json_{}.json", std::process::id()));
        let mut data = BTreeMap::new();
        data.insert("tan".to_string(), vec![1usize, 2, 3]);

        save_json(&data, &path).unwrap();
        let loaded: BTreeMap<String, Vec<usize>> = load_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, data);
    }

    #[test]
    fn test_load_bad_json() {
        let path = std::env::temp_dir().join(format!("boggle_bad_{}.json", std::process::id()));
        std::fs::write(&path, "[[\"a\",").unwrap();
        let result: Result<Vec<Vec<String>>, _> = load_json(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(BoggleError::Json(_))));
    }
}
