//! Small filesystem helpers shared across the crate.

use anyhow::{Context as ResultExt, Error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub fn load_toml<T, P: AsRef<Path>>(path: P) -> Result<T, Error>
where
    for<'a> T: Deserialize<'a>,
{
    let text = fs::read_to_string(path.as_ref())
        .with_context(|| format!("can't read file {}", path.as_ref().display()))?;
    toml::from_str(&text)
        .with_context(|| format!("can't parse TOML content from {}", path.as_ref().display()))
}

pub fn save_toml<T, P: AsRef<Path>>(data: &T, path: P) -> Result<(), Error>
where
    T: Serialize,
{
    let text = toml::to_string(data).context("can't convert to TOML format")?;
    fs::write(path.as_ref(), text)
        .with_context(|| format!("can't write to file {}", path.as_ref().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: usize,
    }

    #[test]
    fn toml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sample.toml");

        let sample = Sample {
            name: "deck".to_string(),
            count: 3,
        };

        save_toml(&sample, &path).unwrap();
        let loaded: Sample = load_toml(&path).unwrap();
        assert_eq!(loaded, sample);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        assert!(load_toml::<Sample, _>(&path).is_err());
    }
}
