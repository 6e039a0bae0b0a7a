//! Game mode descriptor files.
//!
//! # Module Structure
//!
//! ```text
//! gamemode/
//! ├── section/   # Section registry, validators and allow-lists
//! ├── catalog    # Parallel scan of all descriptors, grouped for the launcher
//! ├── error      # ConfigError, LaunchError
//! ├── hash       # ContentHash of the raw file
//! ├── kind       # ConfigKind (map / cgm / bmm / sagm)
//! ├── line       # Header / data line classification
//! ├── model      # ConfigModel and the loader
//! ├── query      # Accessors and consume-once matching
//! ├── record     # Tokenized data line
//! └── storage    # Directory layout and file listing
//! ```
//!
//! A file is read line by line: `//` starts a comment, `[keyword]` opens a
//! section and every other non-empty line is a record of the current
//! section. Loading stops at the first error.

mod catalog;
mod error;
mod hash;
mod kind;
mod line;
mod model;
mod query;
mod record;
pub mod section;
mod storage;

pub use catalog::{Catalog, CatalogEntry, CatalogGroup};
pub use error::{ConfigError, LaunchError};
pub use hash::ContentHash;
pub use kind::ConfigKind;
pub use model::ConfigModel;
pub use query::{
    CHANGE_LEVEL_MODEL_INDEX, EntitySpawn, Intermission, MusicCue, SoundCue, StartPosition,
};
pub use record::Record;
pub use section::SectionKind;
pub use storage::Storage;
