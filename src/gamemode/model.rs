//! In-memory model of one descriptor file and its loader.

use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::line::{Line, classify};
use super::section::{Collected, Rejection, SectionKind, ValidateCx};
use super::{ConfigError, ConfigKind, ContentHash, Record, Storage};
use crate::debug;

/// One loaded descriptor file.
///
/// A model is either fully valid (`error()` is `None`) or carries the first
/// error found in the file. Consuming queries mutate the record lists in
/// place; everything else is read-only after [`ConfigModel::load`].
#[derive(Debug, Clone)]
pub struct ConfigModel {
    kind: ConfigKind,
    game_dir: PathBuf,
    name: String,
    path: PathBuf,
    hash: ContentHash,
    error: Option<ConfigError>,
    pub(super) sections: FxHashMap<SectionKind, Vec<Record>>,
    pub(super) collected: Collected,
}

impl ConfigModel {
    /// Empty model for `kind`, reading from `storage`.
    pub fn new(kind: ConfigKind, storage: &Storage) -> Self {
        Self {
            kind,
            game_dir: storage.game_dir().to_path_buf(),
            name: String::new(),
            path: PathBuf::new(),
            hash: ContentHash::empty(),
            error: None,
            sections: FxHashMap::default(),
            collected: Collected::default(),
        }
    }

    /// Construct and load in one step; the error (if any) stays on the model.
    pub fn open(kind: ConfigKind, storage: &Storage, name: &str) -> Self {
        let mut model = Self::new(kind, storage);
        // error is kept in the model
        let _ = model.load(name);
        model
    }

    /// Clear everything parsed by a previous load.
    pub fn reset(&mut self) {
        self.name.clear();
        self.path = PathBuf::new();
        self.hash = ContentHash::empty();
        self.error = None;
        self.sections.clear();
        self.collected.clear();
    }

    /// Load `{game_dir}/{kind_dir}/{name}.txt`, replacing any previous content.
    ///
    /// Parsing stops at the first error, which is both returned and kept
    /// in the model.
    pub fn load(&mut self, name: &str) -> Result<(), ConfigError> {
        self.reset();
        self.name = name.to_owned();
        self.path = self
            .game_dir
            .join(self.kind.dir_name())
            .join(format!("{name}.txt"));

        let result = self.read_and_parse();
        match &result {
            Ok(()) => debug!("load"; "{}\\{}.txt: ok ({})", self.kind.dir_name(), name, self.hash),
            Err(err) => {
                debug!("load"; "{}", err);
                self.error = Some(err.clone());
            }
        }
        result
    }

    fn read_and_parse(&mut self) -> Result<(), ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::FileNotFound {
                    dir: self.kind.dir_name(),
                    file: self.name.clone(),
                });
            }
            Err(err) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    message: err.to_string(),
                });
            }
        };

        self.parse(&String::from_utf8_lossy(&bytes))?;
        self.hash = ContentHash::of(&bytes);
        Ok(())
    }

    /// Feed file content through the line classifier and section validators.
    pub(super) fn parse(&mut self, content: &str) -> Result<(), ConfigError> {
        let dir = self.kind.dir_name();
        let mut current: Option<SectionKind> = None;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let Some(line) = classify(raw) else {
                continue;
            };

            match line {
                Line::Header(keyword) => {
                    let kind = SectionKind::from_keyword(keyword).ok_or_else(|| {
                        ConfigError::UnknownSection {
                            dir,
                            file: self.name.clone(),
                            line: line_no,
                            name: keyword.to_owned(),
                        }
                    })?;
                    current = Some(kind);
                }
                Line::Data(text) => {
                    let Some(section) = current else {
                        return Err(ConfigError::OrphanLine {
                            dir,
                            file: self.name.clone(),
                            line: line_no,
                        });
                    };
                    self.push_record(section, text, line_no)?;
                }
            }
        }

        Ok(())
    }

    fn push_record(&mut self, section: SectionKind, text: &str, line_no: usize) -> Result<(), ConfigError> {
        let spec = section.spec();
        let dir = self.kind.dir_name();

        if spec.single && self.sections.get(&section).is_some_and(|r| !r.is_empty()) {
            return Err(ConfigError::DuplicateSingleSection {
                dir,
                file: self.name.clone(),
                line: line_no,
                section: spec.keyword,
            });
        }

        let mut record = Record::parse(text);
        let mut cx = ValidateCx {
            game_dir: &self.game_dir,
            collected: &mut self.collected,
        };

        match (spec.validate)(&mut record, &mut cx) {
            Ok(()) => {
                self.sections.entry(section).or_default().push(record);
                Ok(())
            }
            Err(Rejection::Malformed(reason)) => Err(ConfigError::MalformedRecord {
                dir,
                file: self.name.clone(),
                line: line_no,
                section: spec.keyword,
                reason,
            }),
            Err(Rejection::UnknownModifier) => Err(ConfigError::UnknownModifier {
                dir,
                file: self.name.clone(),
                line: line_no,
                raw: text.to_owned(),
            }),
        }
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ConfigKind {
        self.kind
    }

    /// Logical name (path below the kind directory, without extension).
    #[inline]
    pub fn config_name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    /// Content hash of the raw file; empty unless the load succeeded.
    #[inline]
    pub fn hash(&self) -> ContentHash {
        self.hash
    }

    #[inline]
    pub fn error(&self) -> Option<&ConfigError> {
        self.error.as_ref()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.error.is_none() && !self.name.is_empty()
    }

    /// Records of `section`, in file order.
    pub fn records(&self, section: SectionKind) -> &[Record] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write `content` as `cgm_cfg/{name}.txt` and load it.
    pub(crate) fn load_str(dir: &TempDir, name: &str, content: &str) -> ConfigModel {
        let storage = Storage::new(dir.path());
        let path = storage.config_path(ConfigKind::Cgm, name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        ConfigModel::open(ConfigKind::Cgm, &storage, name)
    }

    const BASIC: &str = "\
// a basic scenario
[name]
Speedrun

[start_map]
c1a0   // first map

[start_position]
-10 20.5 64
";

    #[test]
    fn test_load_basic() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "basic", BASIC);

        assert!(model.is_valid(), "{:?}", model.error());
        assert_eq!(model.config_name(), "basic");
        assert_eq!(model.records(SectionKind::StartMap)[0].line, "c1a0");
        assert!(model.records(SectionKind::Loadout).is_empty());
        assert!(!model.hash().is_empty());
        assert_eq!(model.hash(), ContentHash::of(BASIC.as_bytes()));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        let mut model = ConfigModel::new(ConfigKind::Bmm, &storage);

        let err = model.load("nope").unwrap_err();
        assert_eq!(err.to_string(), "Config file bmm_cfg\\nope.txt doesn't exist");
        assert_eq!(model.error(), Some(&err));
        assert!(model.hash().is_empty());
    }

    #[test]
    fn test_unknown_section() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "bogus", "[start_map]\nc1a0\n\n[bogus]\nwhatever\n");

        let msg = model.error().unwrap().to_string();
        assert!(msg.contains("unknown section [bogus]"), "{msg}");
        assert!(msg.contains("line 4"), "{msg}");
        assert!(model.hash().is_empty());
    }

    #[test]
    fn test_duplicate_single_section() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "dup", "[start_map]\nc1a0\nc1a1\n");

        let err = model.error().unwrap();
        assert!(matches!(err, ConfigError::DuplicateSingleSection { line: 3, .. }));
        assert_eq!(
            err.to_string(),
            "Error parsing cgm_cfg\\dup.txt, line 3: [start_map] section can only have one line"
        );
    }

    #[test]
    fn test_malformed_record_stops_parsing() {
        let dir = TempDir::new().unwrap();
        let model = load_str(
            &dir,
            "bad",
            "[start_position]\n0 north 64\n[bogus]\n",
        );

        let err = model.error().unwrap();
        assert_eq!(err.line(), Some(2));
        assert_eq!(
            err.to_string(),
            "Error parsing cgm_cfg\\bad.txt, line 2, section [start_position]: invalid coordinate by index 2"
        );
    }

    #[test]
    fn test_unknown_modifier() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "mods", "[mods]\ninfinite_ammo\nmoon_gravity 0.5\n");

        let err = model.error().unwrap();
        assert!(matches!(err, ConfigError::UnknownModifier { line: 3, .. }));
        assert!(err.to_string().ends_with("incorrect mod specified: moon_gravity 0.5"));
    }

    #[test]
    fn test_orphan_line() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "orphan", "c1a0\n[start_map]\nc1a0\n");
        assert!(matches!(model.error(), Some(ConfigError::OrphanLine { line: 1, .. })));
    }

    #[test]
    fn test_reload_leaves_no_residue() {
        let dir = TempDir::new().unwrap();
        load_str(&dir, "second", "[start_map]\nc2a1\n");
        let mut model = load_str(
            &dir,
            "first",
            "[start_map]\nc1a0\n[loadout]\nmedkit 2\n[mods]\ninfinite_ammo\n[sound]\nc1a0 1 a.wav\n",
        );
        assert_eq!(model.records(SectionKind::Loadout).len(), 1);

        model.load("second").unwrap();
        assert_eq!(model.config_name(), "second");
        assert_eq!(model.records(SectionKind::StartMap)[0].line, "c2a1");
        assert!(model.records(SectionKind::Loadout).is_empty());
        assert!(model.records(SectionKind::Sound).is_empty());
        assert!(model.collected.mods.is_empty());
        assert!(model.collected.sounds_to_precache.is_empty());

        model.reset();
        assert!(model.sections.is_empty());
        assert!(model.error().is_none());
    }

    #[test]
    fn test_crlf_and_comments() {
        let dir = TempDir::new().unwrap();
        let model = load_str(&dir, "crlf", "[start_map]\r\nc1a0 // comment\r\n\r\n");
        assert!(model.is_valid());
        assert_eq!(model.records(SectionKind::StartMap)[0].line, "c1a0");
    }
}
