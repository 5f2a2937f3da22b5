//! The on-disk save port.
//!
//! `SaveStore` is the boundary the game layer is given; `FileSaveStore`
//! is the provided implementation, writing a checksummed binary file:
//!
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - bincode-serialized save data (variable)
//! - SHA-256 checksum over everything above (32 bytes)
//!
//! A truncated, tampered, or wrong-version file fails verification and is
//! reported as corrupt rather than deserialized.

use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::character::player::Player;
use crate::core::progression::RegionProgress;

/// Bumped whenever the serialized layout changes incompatibly.
const SAVE_MAGIC: u64 = 0x4D53_4147_4100_0001;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data is corrupt: {0}")]
    Corrupt(String),
    #[error("could not serialize save data: {0}")]
    Serialize(String),
    #[error("no usable save location on this system")]
    NoSaveLocation,
}

/// Everything that persists between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub player: Player,
    #[serde(default)]
    pub regions: RegionProgress,
    /// Unix timestamp of the save.
    #[serde(default)]
    pub saved_at: i64,
}

impl SaveData {
    pub fn now(player: Player, regions: RegionProgress) -> SaveData {
        SaveData {
            player,
            regions,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// The load/save/clear port handed to the orchestrating layer.
pub trait SaveStore {
    /// `Ok(None)` when no save exists yet.
    fn load(&self) -> Result<Option<SaveData>, SaveError>;
    fn save(&self, data: &SaveData) -> Result<(), SaveError>;
    fn clear(&self) -> Result<(), SaveError>;
}

pub struct FileSaveStore {
    save_path: PathBuf,
}

impl FileSaveStore {
    /// Store under the platform's config directory.
    pub fn new() -> Result<FileSaveStore, SaveError> {
        let dirs = ProjectDirs::from("", "", "minisaga").ok_or(SaveError::NoSaveLocation)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(FileSaveStore {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Store at an explicit path; used by tests.
    pub fn at_path(path: PathBuf) -> FileSaveStore {
        FileSaveStore { save_path: path }
    }

    pub fn exists(&self) -> bool {
        self.save_path.exists()
    }
}

impl SaveStore for FileSaveStore {
    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        let mut file = match fs::File::open(&self.save_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SAVE_MAGIC {
            return Err(SaveError::Corrupt(format!(
                "bad version magic 0x{:016X}",
                magic
            )));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(SaveError::Corrupt("checksum mismatch".to_string()));
        }

        let save =
            bincode::deserialize(&data).map_err(|e| SaveError::Corrupt(e.to_string()))?;
        tracing::debug!(path = %self.save_path.display(), "save loaded");
        Ok(Some(save))
    }

    fn save(&self, data: &SaveData) -> Result<(), SaveError> {
        let body = bincode::serialize(data).map_err(|e| SaveError::Serialize(e.to_string()))?;
        let data_len = body.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&body);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&body)?;
        file.write_all(&checksum)?;
        tracing::debug!(path = %self.save_path.display(), bytes = body.len(), "save written");
        Ok(())
    }

    fn clear(&self) -> Result<(), SaveError> {
        match fs::remove_file(&self.save_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
