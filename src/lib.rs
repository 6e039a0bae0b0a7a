//! Game mode descriptor engine.
//!
//! Loads the line-oriented `[section]` files that describe custom game
//! modes, validates every record against its section grammar, and answers
//! the queries the game makes while a scenario runs.
//!
//! ```ignore
//! let storage = Storage::new("/games/half_payne");
//! let mut model = ConfigModel::new(ConfigKind::Bmm, &storage);
//! model.load("c1a0")?;
//! if model.mark_model_index(SectionKind::EndTrigger, "c1a0", 42, "") {
//!     // scenario finished
//! }
//! ```

pub mod cli;
pub mod gamemode;
pub mod logger;
pub mod modifier;
pub mod record;
pub mod settings;
pub mod utils;

pub use gamemode::{ConfigError, ConfigKind, ConfigModel, SectionKind, Storage};
