use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::session::Angler;
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// On-disk payload: the angler plus when it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Unix timestamp (seconds) of the save.
    pub saved_at: i64,
    pub angler: Angler,
}

impl SaveData {
    pub fn new(angler: Angler) -> Self {
        Self {
            saved_at: chrono::Utc::now().timestamp(),
            angler,
        }
    }
}

/// Saves and loads angler progress in a checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager writing to the platform config directory
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "zen-fishing").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Creates a SaveManager for an explicit file path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Saves the angler to disk
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode-encoded `SaveData` (variable length)
    /// - SHA256 checksum of everything above (32 bytes)
    pub fn save(&self, angler: &Angler) -> io::Result<()> {
        let data = bincode::serialize(&SaveData::new(angler.clone()))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = u32::try_from(data.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "save data too large"))?;

        let magic = SAVE_VERSION_MAGIC.to_le_bytes();
        let length = data_len.to_le_bytes();
        let checksum = checksum(&magic, &length, &data);

        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&magic)?;
        file.write_all(&length)?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;
        file.flush()?;

        Ok(())
    }

    /// Loads the saved data from disk
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The version magic is incorrect
    /// - The checksum verification fails
    /// - The data cannot be deserialized
    pub fn load(&self) -> io::Result<SaveData> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut magic = [0u8; 8];
        file.read_exact(&mut magic)?;
        let version = u64::from_le_bytes(magic);
        if version != SAVE_VERSION_MAGIC {
            warn!("Rejected save {:?}: unknown version", self.save_path);
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length = [0u8; 4];
        file.read_exact(&mut length)?;
        let data_len = u32::from_le_bytes(length);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored = [0u8; 32];
        file.read_exact(&mut stored)?;

        if stored != checksum(&magic, &length, &data) {
            warn!("Rejected save {:?}: checksum mismatch", self.save_path);
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Loads the angler, or starts a fresh one when no save exists yet
    pub fn load_or_default(&self) -> io::Result<Angler> {
        if !self.save_exists() {
            return Ok(Angler::new());
        }
        self.load().map(|save| save.angler)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}

fn checksum(magic: &[u8], length: &[u8], data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(magic);
    hasher.update(length);
    hasher.update(data);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}
