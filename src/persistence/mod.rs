//! Level file persistence
//!
//! Features:
//! - Versioned JSON envelope around a `LevelSnapshot`
//! - Directory listing of level files
//! - Loads never touch a live level: a new one is returned only on success

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::{Level, LevelSnapshot};

/// Current level file format version
pub const FORMAT_VERSION: u32 = 1;

/// On-disk envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelFile {
    pub version: u32,
    pub level: LevelSnapshot,
}

impl LevelFile {
    pub fn new(level: LevelSnapshot) -> Self {
        Self {
            version: FORMAT_VERSION,
            level,
        }
    }
}

pub fn to_json(level: &Level) -> Result<String> {
    Ok(serde_json::to_string_pretty(&LevelFile::new(level.snapshot()))?)
}

/// Decode and validate a level file
pub fn snapshot_from_json(json: &str) -> Result<LevelSnapshot> {
    let file: LevelFile = serde_json::from_str(json)?;
    if file.version != FORMAT_VERSION {
        return Err(Error::UnsupportedVersion(file.version));
    }
    Ok(file.level)
}

pub fn from_json(json: &str) -> Result<Level> {
    snapshot_from_json(json)?.restore()
}

pub fn save_level(level: &Level, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json(level)?)?;
    log::info!(
        "Saved level {} ({} objects)",
        path.display(),
        level.objects().len()
    );
    Ok(())
}

pub fn load_level(path: impl AsRef<Path>) -> Result<Level> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let level = from_json(&json)?;
    log::info!(
        "Loaded level {} ({}x{}, {} objects)",
        path.display(),
        level.columns(),
        level.rows(),
        level.objects().len()
    );
    Ok(level)
}

/// File names in `dir` with the given extension, sorted
pub fn list_levels(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dye::Dye;
    use crate::geom::GridPoint;
    use crate::sim::LevelObject;

    #[test]
    fn test_json_round_trip() {
        let mut level = Level::new(4, 3, GridPoint::new(0, 0), GridPoint::new(3, 2)).unwrap();
        level.add_object(LevelObject::ball(GridPoint::new(1, 1), Dye::Yellow));
        let json = to_json(&level).unwrap();
        let loaded = from_json(&json).unwrap();
        assert_eq!(loaded.snapshot(), level.snapshot());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let level = Level::new(2, 1, GridPoint::new(0, 0), GridPoint::new(1, 0)).unwrap();
        let mut file = LevelFile::new(level.snapshot());
        file.version = 99;
        let json = serde_json::to_string(&file).unwrap();
        assert!(matches!(from_json(&json), Err(Error::UnsupportedVersion(99))));
        assert!(matches!(from_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_rejects_oversized_dimensions_without_mask() {
        let json = r#"{"version":1,"level":{"columns":2000000000,"rows":2000000000,
            "passable":[],"entry":{"column":0,"row":0},"exit":{"column":1,"row":0},
            "objects":[]}}"#;
        assert!(matches!(from_json(json), Err(Error::MaskMismatch { .. })));
    }
}
