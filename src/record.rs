//! Best-run records of game mode scenarios.
//!
//! One binary file per scenario at
//! `{game_dir}/{cmd}_records/{name}.{cmd}r`, holding three little-endian
//! `f32`: best time, best real time and best real-time-minus-time.
//! Map configs are not scenarios and have no record file.

use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::gamemode::{ConfigKind, Storage};

/// Real time stored for a scenario that was never finished.
pub const DEFAULT_TIME: f32 = 59999.0;

const RECORD_SIZE: usize = 3 * size_of::<f32>();

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{0} configs do not keep records")]
    NoStore(ConfigKind),

    #[error("IO error when writing record `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Best results of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BestRecord {
    /// Highest in-game time (time left on the clock for timed modes).
    pub time: f32,
    /// Lowest wall-clock time.
    pub real_time: f32,
    /// Lowest `real_time - time`, floored at zero.
    pub real_time_minus_time: f32,
}

impl Default for BestRecord {
    fn default() -> Self {
        Self {
            time: 0.0,
            real_time: DEFAULT_TIME,
            real_time_minus_time: DEFAULT_TIME,
        }
    }
}

impl BestRecord {
    /// Read the record, falling back to defaults when the file is absent,
    /// short or unreadable.
    pub fn load(storage: &Storage, kind: ConfigKind, name: &str) -> Self {
        record_path(storage, kind, name)
            .and_then(|path| fs::read(path).ok())
            .and_then(|bytes| Self::from_bytes(&bytes))
            .unwrap_or_default()
    }

    /// Overwrite the record file with all three values.
    pub fn save(&self, storage: &Storage, kind: ConfigKind, name: &str) -> Result<(), RecordError> {
        let path = record_path(storage, kind, name).ok_or(RecordError::NoStore(kind))?;
        let write = || -> io::Result<()> {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, self.to_bytes())
        };
        write().map_err(|source| RecordError::Io {
            path: path.clone(),
            source,
        })
    }

    /// Merge a finished run. Returns `true` if any value improved.
    pub fn submit(&mut self, time: f32, real_time: f32) -> bool {
        let before = *self;

        if time > self.time {
            self.time = time;
        }
        if real_time < self.real_time {
            self.real_time = real_time;
        }
        let real_time_minus_time = (real_time - time).max(0.0);
        if real_time_minus_time < self.real_time_minus_time {
            self.real_time_minus_time = real_time_minus_time;
        }

        *self != before
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; RECORD_SIZE] = bytes.get(..RECORD_SIZE)?.try_into().ok()?;
        let float = |i: usize| {
            let mut word = [0u8; 4];
            word.copy_from_slice(&bytes[i * 4..i * 4 + 4]);
            f32::from_le_bytes(word)
        };
        Some(Self {
            time: float(0),
            real_time: float(1),
            real_time_minus_time: float(2),
        })
    }

    fn to_bytes(self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        for (chunk, value) in bytes
            .chunks_exact_mut(4)
            .zip([self.time, self.real_time, self.real_time_minus_time])
        {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        bytes
    }
}

/// `{game_dir}/{cmd}_records/{name}.{cmd}r`, or `None` for map configs.
pub fn record_path(storage: &Storage, kind: ConfigKind, name: &str) -> Option<PathBuf> {
    let cmd = kind.command()?;
    Some(
        storage
            .game_dir()
            .join(format!("{cmd}_records"))
            .join(format!("{name}.{cmd}r")),
    )
}

/// Whether the scenario was finished at least once.
pub fn exists(storage: &Storage, kind: ConfigKind, name: &str) -> bool {
    record_path(storage, kind, name).is_some_and(|path| path.is_file())
}

/// `MM:SS.cc`, as shown in the launcher.
pub fn format_time(seconds: f32) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u32;
    let rest = seconds % 60.0;
    let whole = rest.trunc() as u32;
    let hundredths = (rest.fract() * 100.0) as u32;
    format!("{minutes:02}:{whole:02}.{hundredths:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_path() {
        let storage = Storage::new("/games/hp");
        assert_eq!(
            record_path(&storage, ConfigKind::Bmm, "x"),
            Some(PathBuf::from("/games/hp/bmm_records/x.bmmr"))
        );
        assert_eq!(record_path(&storage, ConfigKind::Map, "x"), None);
    }

    #[test]
    fn test_missing_record_has_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        let record = BestRecord::load(&storage, ConfigKind::Bmm, "c1a0");
        assert_eq!(record, BestRecord::default());
        assert_eq!(record.real_time, 59999.0);
        assert!(!exists(&storage, ConfigKind::Bmm, "c1a0"));
    }

    #[test]
    fn test_roundtrip_is_bit_exact() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        let record = BestRecord {
            time: 12.5,
            real_time: 9.0,
            real_time_minus_time: 3.5,
        };
        record.save(&storage, ConfigKind::Bmm, "c1a0").unwrap();

        let bytes = fs::read(dir.path().join("bmm_records").join("c1a0.bmmr")).unwrap();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[..4], &12.5f32.to_le_bytes());

        let loaded = BestRecord::load(&storage, ConfigKind::Bmm, "c1a0");
        assert_eq!(loaded.time.to_bits(), 12.5f32.to_bits());
        assert_eq!(loaded.real_time.to_bits(), 9.0f32.to_bits());
        assert_eq!(loaded.real_time_minus_time.to_bits(), 3.5f32.to_bits());
        assert!(exists(&storage, ConfigKind::Bmm, "c1a0"));
    }

    #[test]
    fn test_short_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        let path = record_path(&storage, ConfigKind::Cgm, "short").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0u8; 5]).unwrap();

        assert_eq!(BestRecord::load(&storage, ConfigKind::Cgm, "short"), BestRecord::default());
    }

    #[test]
    fn test_nested_name_creates_directories() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        BestRecord::default()
            .save(&storage, ConfigKind::Cgm, "Blue Shift/ba_yard")
            .unwrap();
        assert!(dir.path().join("cgm_records/Blue Shift/ba_yard.cgmr").is_file());
    }

    #[test]
    fn test_map_kind_cannot_save() {
        let dir = TempDir::new().unwrap();
        let err = BestRecord::default()
            .save(&Storage::new(dir.path()), ConfigKind::Map, "c1a0")
            .unwrap_err();
        assert!(matches!(err, RecordError::NoStore(ConfigKind::Map)));
    }

    #[test]
    fn test_submit_merges_best_values() {
        let mut record = BestRecord::default();
        assert!(record.submit(40.0, 75.0));
        assert_eq!(
            record,
            BestRecord {
                time: 40.0,
                real_time: 75.0,
                real_time_minus_time: 35.0
            }
        );

        // Worse in every way
        assert!(!record.submit(30.0, 90.0));

        // Better time only; real minus time never goes below zero
        assert!(record.submit(80.0, 76.0));
        assert_eq!(record.time, 80.0);
        assert_eq!(record.real_time, 75.0);
        assert_eq!(record.real_time_minus_time, 0.0);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00.00");
        assert_eq!(format_time(65.5), "01:05.50");
        assert_eq!(format_time(DEFAULT_TIME), "999:59.00");
    }
}
