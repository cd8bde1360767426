use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::data::city::City;

/// Maps each supported city to the CSV file holding its trips.
///
/// Defaults to `<data_dir>/<city file>`. Individual entries can be overridden
/// from a plain JSON object on disk:
/// ```json
/// {
///   "Chicago": "archive/chicago_2017.csv",
///   "New York City": "/srv/bikeshare/nyc.csv"
/// }
/// ```
/// Relative paths resolve against the data directory.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    data_dir: PathBuf,
    overrides: HashMap<City, PathBuf>,
}

impl CityCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Loads overrides from a JSON file at `path`.
    pub fn load(data_dir: impl Into<PathBuf>, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading city catalog {}", path.display()))?;
        let entries: HashMap<String, PathBuf> = serde_json::from_str(&content)
            .with_context(|| format!("parsing city catalog {}", path.display()))?;

        let mut catalog = Self::new(data_dir);
        for (name, file) in entries {
            let city: City = name
                .parse()
                .with_context(|| format!("in city catalog {}", path.display()))?;
            catalog.overrides.insert(city, file);
        }
        Ok(catalog)
    }

    /// Resolved path of the trip file for `city`.
    pub fn path_for(&self, city: City) -> PathBuf {
        match self.overrides.get(&city) {
            Some(file) => self.data_dir.join(file),
            None => self.data_dir.join(city.default_file()),
        }
    }

    /// Iterates over all `(city, path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (City, PathBuf)> + '_ {
        City::ALL.into_iter().map(|city| (city, self.path_for(city)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidCityError;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_default_paths() {
        let catalog = CityCatalog::new("data");
        assert_eq!(
            catalog.path_for(City::NewYorkCity),
            Path::new("data").join("new_york_city.csv")
        );
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    fn test_load_overrides() {
        let path = temp_path("bikeshare_catalog_overrides.json");
        fs::write(&path, r#"{"chicago": "chi.csv", "Washington": "/abs/dc.csv"}"#).unwrap();

        let catalog = CityCatalog::load("data", &path).unwrap();
        assert_eq!(catalog.path_for(City::Chicago), Path::new("data").join("chi.csv"));
        // Path::join replaces the base with an absolute path
        assert_eq!(catalog.path_for(City::Washington), Path::new("/abs/dc.csv"));
        assert_eq!(
            catalog.path_for(City::NewYorkCity),
            Path::new("data").join("new_york_city.csv")
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_unknown_city() {
        let path = temp_path("bikeshare_catalog_unknown.json");
        fs::write(&path, r#"{"Gotham": "gotham.csv"}"#).unwrap();

        let err = CityCatalog::load(".", &path).unwrap_err();
        assert!(err.downcast_ref::<InvalidCityError>().is_some());

        fs::remove_file(&path).unwrap();
    }
}
