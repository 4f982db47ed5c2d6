//! Writing speech assets to a directory.
//!
//! Layout:
//!
//! ```text
//! <dir>/intentSchema.json
//! <dir>/utterances.txt
//! <dir>/customSlots/<name>.txt   one value per line
//! ```

use std::path::{Path, PathBuf};

use tracing::info;
use vocalis_types::error::AssetError;

use super::SpeechAssets;
use crate::service::fs::FileSystem;

pub const DEFAULT_ASSETS_DIR: &str = "speechAssets";
pub const INTENT_SCHEMA_FILE: &str = "intentSchema.json";
pub const UTTERANCES_FILE: &str = "utterances.txt";
pub const CUSTOM_SLOTS_DIR: &str = "customSlots";

/// `{dir}/intentSchema.json`
pub fn intent_schema_path(dir: &Path) -> PathBuf {
    dir.join(INTENT_SCHEMA_FILE)
}

/// `{dir}/utterances.txt`
pub fn utterances_path(dir: &Path) -> PathBuf {
    dir.join(UTTERANCES_FILE)
}

/// `{dir}/customSlots`
pub fn custom_slots_dir(dir: &Path) -> PathBuf {
    dir.join(CUSTOM_SLOTS_DIR)
}

/// `{dir}/customSlots/{name}.txt`
pub fn custom_slot_path(dir: &Path, name: &str) -> PathBuf {
    custom_slots_dir(dir).join(format!("{name}.txt"))
}

/// Save `assets` under `dir` and return the files written, in write order.
///
/// Existing files are overwritten.
pub async fn save_speech_assets<F: FileSystem>(
    fs: &F,
    assets: &SpeechAssets,
    dir: &Path,
) -> Result<Vec<PathBuf>, AssetError> {
    fs.create_dir_all(&custom_slots_dir(dir)).await?;

    let mut written = Vec::with_capacity(2 + assets.custom_slots.len());

    let schema = serde_json::to_string_pretty(&assets.intent_schema)
        .map_err(|e| AssetError::Serialization(e.to_string()))?;
    let path = intent_schema_path(dir);
    fs.write_file(&path, &schema).await?;
    written.push(path);

    let path = utterances_path(dir);
    fs.write_file(&path, &assets.utterances_text()).await?;
    written.push(path);

    for slot in &assets.custom_slots {
        let path = custom_slot_path(dir, &slot.name);
        fs.write_file(&path, &slot.values.join("\n")).await?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "speech assets saved");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::io;
    use std::sync::Mutex;

    use vocalis_types::interaction::CustomSlot;

    use super::*;
    use crate::assets::{IntentSchema, IntentSchemaEntry};

    #[derive(Default)]
    struct MemoryFs {
        files: Mutex<BTreeMap<PathBuf, String>>,
        dirs: Mutex<BTreeSet<PathBuf>>,
        fail_writes: bool,
    }

    impl FileSystem for MemoryFs {
        async fn write_file(&self, path: &Path, content: &str) -> Result<(), io::Error> {
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        async fn read_file(&self, path: &Path) -> Result<String, io::Error> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        async fn create_dir_all(&self, path: &Path) -> Result<(), io::Error> {
            self.dirs.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }

        async fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
        }
    }

    fn assets() -> SpeechAssets {
        SpeechAssets {
            intent_schema: IntentSchema {
                intents: vec![IntentSchemaEntry {
                    intent: "FirstIntent".to_string(),
                    slots: Vec::new(),
                }],
            },
            utterances: vec![
                "FirstIntent utterance".to_string(),
                "FirstIntent another".to_string(),
            ],
            custom_slots: vec![CustomSlot {
                name: "Name".to_string(),
                values: vec!["Borimir".to_string(), "Vlasto".to_string()],
            }],
        }
    }

    #[tokio::test]
    async fn writes_the_three_artifacts() {
        let fs = MemoryFs::default();
        let dir = Path::new(DEFAULT_ASSETS_DIR);
        let assets = assets();

        let written = save_speech_assets(&fs, &assets, dir).await.unwrap();
        assert_eq!(
            written,
            vec![
                dir.join("intentSchema.json"),
                dir.join("utterances.txt"),
                dir.join("customSlots").join("Name.txt"),
            ]
        );

        assert!(fs.exists(&dir.join("customSlots")).await);
        assert_eq!(
            fs.read_file(&dir.join("intentSchema.json")).await.unwrap(),
            assets.intent_schema_json()
        );
        assert_eq!(
            fs.read_file(&dir.join("utterances.txt")).await.unwrap(),
            "FirstIntent utterance\nFirstIntent another"
        );
        assert_eq!(
            fs.read_file(&dir.join("customSlots/Name.txt")).await.unwrap(),
            "Borimir\nVlasto"
        );
    }

    #[test]
    fn layout_paths() {
        let dir = Path::new("/tmp/speechAssets");
        assert_eq!(
            intent_schema_path(dir),
            PathBuf::from("/tmp/speechAssets/intentSchema.json")
        );
        assert_eq!(utterances_path(dir), PathBuf::from("/tmp/speechAssets/utterances.txt"));
        assert_eq!(
            custom_slot_path(dir, "Name"),
            PathBuf::from("/tmp/speechAssets/customSlots/Name.txt")
        );
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let fs = MemoryFs {
            fail_writes: true,
            ..MemoryFs::default()
        };
        let err = save_speech_assets(&fs, &assets(), Path::new("out")).await.unwrap_err();
        assert!(matches!(err, AssetError::Io(e) if e.kind() == io::ErrorKind::PermissionDenied));
    }
}
