// src/config/loader.rs
//! Rhythm file loader
//!
//! Decodes rhythm specifications from `.json` or `.toml` files and resolves
//! rhythm ids against a list of search directories (first match wins).

use crate::config::RhythmSpec;
use crate::error::{EcgError, EcgResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported rhythm file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl SpecFormat {
    /// Formats in lookup order
    pub const ALL: [SpecFormat; 2] = [SpecFormat::Json, SpecFormat::Toml];

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            SpecFormat::Json => "json",
            SpecFormat::Toml => "toml",
        }
    }

    /// Format implied by a path's extension, case-insensitive
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|f| ext.eq_ignore_ascii_case(f.extension()))
    }
}

/// Loader over a set of rhythm directories
#[derive(Debug, Clone, Default)]
pub struct RhythmLoader {
    search_paths: Vec<PathBuf>,
}

impl RhythmLoader {
    /// Loader with no search directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Create loader with custom search directories
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { search_paths: paths }
    }

    /// Directories searched by [`find`](Self::find), in order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Decode a rhythm from JSON text
    pub fn from_json_str(content: &str) -> EcgResult<RhythmSpec> {
        serde_json::from_str(content).map_err(|e| EcgError::Parse {
            format: "json",
            reason: e.to_string(),
        })
    }

    /// Decode a rhythm from TOML text
    pub fn from_toml_str(content: &str) -> EcgResult<RhythmSpec> {
        toml::from_str(content).map_err(|e| EcgError::Parse {
            format: "toml",
            reason: e.to_string(),
        })
    }

    /// Decode a rhythm file, choosing the format by extension
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> EcgResult<RhythmSpec> {
        let path = path.as_ref();
        let format = SpecFormat::from_path(path).ok_or_else(|| EcgError::Parse {
            format: "unknown",
            reason: format!("unsupported rhythm file extension: {}", path.display()),
        })?;

        let content = std::fs::read_to_string(path).map_err(|source| EcgError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), ?format, "decoding rhythm file");
        match format {
            SpecFormat::Json => Self::from_json_str(&content),
            SpecFormat::Toml => Self::from_toml_str(&content),
        }
    }

    /// Locate `<id>.json` or `<id>.toml` in the search directories
    pub fn find(&self, id: &str) -> Option<PathBuf> {
        self.search_paths.iter().find_map(|dir| {
            SpecFormat::ALL
                .into_iter()
                .map(|f| dir.join(format!("{}.{}", id, f.extension())))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Load a rhythm by id
    pub fn load(&self, id: &str) -> EcgResult<RhythmSpec> {
        let path = self.find(id).ok_or_else(|| EcgError::Io {
            path: PathBuf::from(id),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "rhythm not found in any search path",
            ),
        })?;
        self.load_file(path)
    }

    /// Ids of every rhythm file in the search directories, sorted and deduplicated
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .search_paths
            .iter()
            .filter_map(|dir| std::fs::read_dir(dir).ok())
            .flat_map(|entries| entries.filter_map(Result::ok))
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && SpecFormat::from_path(path).is_some())
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Write a rhythm as TOML
    pub fn export_toml<P: AsRef<Path>>(spec: &RhythmSpec, path: P) -> EcgResult<()> {
        let content = toml::to_string_pretty(spec).map_err(|e| EcgError::Parse {
            format: "toml",
            reason: e.to_string(),
        })?;
        write_file(path.as_ref(), &content)
    }

    /// Write a rhythm as pretty-printed JSON
    pub fn export_json<P: AsRef<Path>>(spec: &RhythmSpec, path: P) -> EcgResult<()> {
        let content = serde_json::to_string_pretty(spec).map_err(|e| EcgError::Parse {
            format: "json",
            reason: e.to_string(),
        })?;
        write_file(path.as_ref(), &content)
    }
}

fn write_file(path: &Path, content: &str) -> EcgResult<()> {
    std::fs::write(path, content).map_err(|source| EcgError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RhythmMode;
    use crate::error::ErrorKind;

    const VT_JSON: &str = r#"{
        "id": "vt_160", "mode": "timeline",
        "generator": {
            "sampleRateHz": 250,
            "timeline": { "loopSec": 0.375, "events": [
                { "t": 0.1, "lead": "*", "type": "QRS", "amp": 1.8, "widthMs": 160 }
            ] }
        }
    }"#;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SpecFormat::from_path(Path::new("a/nsr.json")), Some(SpecFormat::Json));
        assert_eq!(SpecFormat::from_path(Path::new("nsr.TOML")), Some(SpecFormat::Toml));
        assert_eq!(SpecFormat::from_path(Path::new("nsr.yaml")), None);
        assert_eq!(SpecFormat::from_path(Path::new("nsr")), None);
    }

    #[test]
    fn test_parse_errors() {
        let err = RhythmLoader::from_json_str("{ \"mode\": ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        let err = RhythmLoader::from_toml_str("mode = 3").unwrap_err();
        assert!(err.to_string().contains("toml"));
    }

    #[test]
    fn test_load_find_and_list() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vt_160.json"), VT_JSON).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a rhythm").unwrap();

        let spec = RhythmLoader::from_json_str(VT_JSON).unwrap();
        RhythmLoader::export_toml(&spec, dir.path().join("vt_copy.toml")).unwrap();

        let loader = RhythmLoader::with_paths(vec![
            dir.path().join("missing"),
            dir.path().to_path_buf(),
        ]);
        assert_eq!(loader.list(), vec!["vt_160".to_string(), "vt_copy".to_string()]);

        let loaded = loader.load("vt_160").unwrap();
        assert_eq!(loaded.mode, RhythmMode::Timeline);
        assert_eq!(loader.load("vt_copy").unwrap(), loaded);

        let err = loader.load("asystole").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vt.yaml");
        std::fs::write(&path, VT_JSON).unwrap();
        let err = RhythmLoader::new().load_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
