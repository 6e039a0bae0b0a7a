//! Launcher catalog: every descriptor of the requested kinds, grouped.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{ConfigKind, ConfigModel, ContentHash, Storage};
use crate::debug;
use crate::record;

/// One descriptor as the launcher lists it.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub kind: ConfigKind,
    /// Logical name, `/`-separated.
    pub name: String,
    /// `[name]` or the kind's default label.
    pub label: String,
    pub hash: ContentHash,
    /// Loader diagnostic, if the file is broken.
    pub error: Option<String>,
    /// A best-record file exists for this scenario.
    pub completed: bool,
}

impl CatalogEntry {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogGroup {
    pub entries: Vec<CatalogEntry>,
}

impl CatalogGroup {
    pub fn amount(&self) -> usize {
        self.entries.len()
    }

    pub fn completed(&self) -> usize {
        self.entries.iter().filter(|e| e.completed).count()
    }
}

/// All descriptors, keyed by group title.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub groups: BTreeMap<String, CatalogGroup>,
}

impl Catalog {
    /// List and load every descriptor of `kinds`.
    ///
    /// Files are independent, so they load in parallel; the resulting
    /// order only depends on the group title and the logical name.
    pub fn load(storage: &Storage, kinds: &[ConfigKind]) -> Self {
        let files: Vec<(ConfigKind, String)> = kinds
            .iter()
            .flat_map(|&kind| {
                storage
                    .list_config_files(kind)
                    .into_iter()
                    .map(move |name| (kind, name))
            })
            .collect();

        let entries: Vec<CatalogEntry> = files
            .par_iter()
            .map(|(kind, name)| load_entry(storage, *kind, name))
            .collect();

        let mut catalog = Self::default();
        for entry in entries {
            let title = group_title(entry.kind, &entry.name).to_owned();
            catalog.groups.entry(title).or_default().entries.push(entry);
        }
        for group in catalog.groups.values_mut() {
            group.entries.sort_by(|a, b| a.name.cmp(&b.name));
        }

        debug!("list"; "{} configs in {} groups", catalog.amount(), catalog.groups.len());
        catalog
    }

    pub fn amount(&self) -> usize {
        self.groups.values().map(CatalogGroup::amount).sum()
    }

    pub fn completed(&self) -> usize {
        self.groups.values().map(CatalogGroup::completed).sum()
    }

    /// Share of completed scenarios, `0.0` for an empty catalog.
    pub fn percent(&self) -> f32 {
        match self.amount() {
            0 => 0.0,
            amount => self.completed() as f32 / amount as f32 * 100.0,
        }
    }

    /// `Completed {n}/{total} ({pct:.1}%)`
    pub fn progress_label(&self) -> String {
        format!(
            "Completed {}/{} ({:.1}%)",
            self.completed(),
            self.amount(),
            self.percent()
        )
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.groups.values().flat_map(|g| g.entries.iter())
    }
}

fn load_entry(storage: &Storage, kind: ConfigKind, name: &str) -> CatalogEntry {
    let model = ConfigModel::open(kind, storage, name);
    CatalogEntry {
        kind,
        name: name.to_owned(),
        label: model.display_name().to_owned(),
        hash: model.hash(),
        error: model.error().map(ToString::to_string),
        completed: record::exists(storage, kind, name),
    }
}

/// First directory of the logical name, or the kind's default group.
fn group_title(kind: ConfigKind, name: &str) -> &str {
    match name.split_once('/') {
        Some((group, _)) => group,
        None => kind.default_group(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::BestRecord;
    use std::fs;
    use tempfile::TempDir;

    fn write(storage: &Storage, kind: ConfigKind, name: &str, content: &str) {
        let path = storage.config_path(kind, name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_group_title() {
        assert_eq!(group_title(ConfigKind::Cgm, "speedrun"), "Main Game - Variety");
        assert_eq!(group_title(ConfigKind::Cgm, "Blue Shift/ba_yard"), "Blue Shift");
        assert_eq!(group_title(ConfigKind::Bmm, "c1a0"), "Black Mesa Minute");
    }

    #[test]
    fn test_catalog_groups_and_progress() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path());
        write(&storage, ConfigKind::Cgm, "speedrun", "[name]\nSpeedrun\n[start_map]\nc1a0\n");
        write(&storage, ConfigKind::Cgm, "Blue Shift/ba_yard", "[start_map]\nba_yard1\n");
        write(&storage, ConfigKind::Cgm, "broken", "[bogus]\n");
        write(&storage, ConfigKind::Bmm, "c1a0", "[start_map]\nc1a0\n");

        let mut best = BestRecord::default();
        best.submit(10.0, 12.0);
        best.save(&storage, ConfigKind::Cgm, "speedrun").unwrap();

        let catalog = Catalog::load(&storage, &[ConfigKind::Cgm, ConfigKind::Bmm]);
        assert_eq!(catalog.amount(), 4);
        assert_eq!(catalog.completed(), 1);
        assert_eq!(catalog.progress_label(), "Completed 1/4 (25.0%)");

        let titles: Vec<_> = catalog.groups.keys().map(String::as_str).collect();
        assert_eq!(titles, vec!["Black Mesa Minute", "Blue Shift", "Main Game - Variety"]);

        let variety = &catalog.groups["Main Game - Variety"];
        assert_eq!(variety.amount(), 2);
        assert_eq!(variety.entries[0].name, "broken");
        assert!(!variety.entries[0].is_valid());
        assert_eq!(variety.entries[1].label, "Speedrun");
        assert!(variety.entries[1].completed);

        assert_eq!(catalog.groups["Blue Shift"].entries[0].label, "Custom game mode");
    }

    #[test]
    fn test_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::load(&Storage::new(dir.path()), &ConfigKind::ALL);
        assert_eq!(catalog.amount(), 0);
        assert_eq!(catalog.progress_label(), "Completed 0/0 (0.0%)");
    }
}
