use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::EventRecord;
use crate::prelude::{PipelineError, PipelineResult};

/// A catalog file holds either a single event or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Many(Vec<EventRecord>),
    One(Box<EventRecord>),
}

/// `*.json` files directly inside `dir`, sorted by path. A directory with
/// no such file is an error.
pub fn list_catalog_files<P: AsRef<Path>>(dir: P) -> PipelineResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(PipelineError::MissingInput(dir.to_path_buf()));
    }
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*.json");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .map_err(|err| PipelineError::Io {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, err),
        })?
        .filter_map(Result::ok)
        .collect();
    if files.is_empty() {
        return Err(PipelineError::EmptyCatalog(dir.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

pub fn read_catalog_file<P: AsRef<Path>>(path: P) -> PipelineResult<Vec<EventRecord>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: CatalogFile =
        serde_json::from_str(&contents).map_err(|source| PipelineError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match parsed {
        CatalogFile::Many(events) => events,
        CatalogFile::One(event) => vec![*event],
    })
}

/// Loads every event in the catalog directory, in file then document order.
pub fn load_catalog<P: AsRef<Path>>(dir: P) -> PipelineResult<Vec<EventRecord>> {
    let mut events = Vec::new();
    for file in list_catalog_files(&dir)? {
        let batch = read_catalog_file(&file)?;
        debug!("{} events in {}", batch.len(), file.display());
        events.extend(batch);
    }
    info!("loaded {} events from {}", events.len(), dir.as_ref().display());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const EVENT: &str = r#"{
        "resource_id": "ev-a",
        "creation_time": "2016-01-01T00:00:00Z",
        "preferred_origin_id": "o",
        "origins": [{"resource_id": "o", "time": "2016-01-01T00:00:00Z", "latitude": 0.0, "longitude": 0.0}]
    }"#;

    #[test]
    fn catalog_files_load_in_path_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), EVENT.replace("ev-a", "ev-b")).unwrap();
        fs::write(
            dir.path().join("a.json"),
            format!("[{}, {}]", EVENT, EVENT.replace("ev-a", "ev-a2")),
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let events = load_catalog(dir.path()).unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.resource_id.as_str()).collect();
        assert_eq!(ids, vec!["ev-a", "ev-a2", "ev-b"]);
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let err = load_catalog(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput(_)));
    }

    #[test]
    fn directory_names_are_not_glob_patterns() {
        let dir = tempdir().unwrap();
        let catalog = dir.path().join("events[2019]");
        fs::create_dir(&catalog).unwrap();
        fs::write(catalog.join("a.json"), EVENT).unwrap();

        let events = load_catalog(&catalog).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].resource_id, "ev-a");
    }

    #[test]
    fn directory_without_catalog_files_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCatalog(_)));
    }

    #[test]
    fn malformed_file_names_its_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
