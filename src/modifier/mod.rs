//! Gameplay modifiers listed in `[mods]`.
//!
//! # Module Structure
//!
//! ```text
//! modifier/
//! ├── catalog   # Static descriptor table, keyword lookup
//! ├── param     # Parameter defaults, clamping and labels
//! ├── player    # PlayerState and the effect of each modifier
//! └── mod.rs    # ModifierId, ActiveModifier (this file)
//! ```
//!
//! A `[mods]` line is `keyword [p1] [p2] ...`. The keyword selects a
//! descriptor; each positional number is resolved against the matching
//! [`ParamSpec`] (non-numeric or missing tokens take the default).

mod catalog;
mod param;
mod player;

use serde::Serialize;
use std::fmt;

pub use catalog::{CATALOG, ModifierDescriptor, lookup};
pub use param::{ParamRule, ParamSpec, UNLIMITED};
pub use player::{Bleeding, BulletPhysicsMode, Bullets, FadeOut, Painkillers, PlayerState, Rules, Slowmotion, Snarks};

use crate::gamemode::Record;

/// Stable identifier of every known modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierId {
    Bleeding,
    BulletPhysicsDisabled,
    BulletPhysicsConstant,
    BulletPhysicsEnemiesAndPlayerOnSlowmotion,
    BulletRicochet,
    ConstantSlowmotion,
    CrossbowExplosiveBolts,
    DivingAllowedWithoutSlowmotion,
    DivingOnly,
    Drunk,
    Easy,
    EdibleGibs,
    EmptySlowmotion,
    FadingOut,
    Hard,
    Headshots,
    GarbageGibs,
    InfiniteAmmo,
    InfiniteAmmoClip,
    InfinitePainkillers,
    InfiniteSlowmotion,
    Instagib,
    NoFallDamage,
    NoMapMusic,
    NoHealing,
    NoPills,
    NoSaving,
    NoSecondaryAttack,
    NoSlowmotion,
    NoSmgGrenadePickup,
    OneHitKo,
    OneHitKoFromPlayer,
    PreventMonsterSpawn,
    SlowmotionOnDamage,
    SlowPainkillers,
    SnarkFriendlyToAllies,
    SnarkFriendlyToPlayer,
    SnarkFromExplosion,
    SnarkInception,
    SnarkInfestation,
    SnarkNuclear,
    SnarkParanoia,
    SnarkPenguins,
    SnarkStayAlive,
    StartingHealth,
    Superhot,
    SwearOnKill,
    UpsideDown,
    TotallySpies,
    Vvvvvv,
    WeaponRestricted,
}

impl ModifierId {
    pub const COUNT: usize = Self::WeaponRestricted as usize + 1;

    #[inline]
    pub fn descriptor(self) -> &'static ModifierDescriptor {
        &CATALOG[self as usize]
    }

    #[inline]
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }
}

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A modifier enabled by a loaded file, with its parameters resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveModifier {
    #[serde(rename = "id")]
    descriptor: &'static ModifierDescriptor,
    /// One value per descriptor parameter, already clamped.
    params: Vec<f32>,
    /// UI lines for the shown parameters, in parameter order.
    param_descriptions: Vec<String>,
}

impl ActiveModifier {
    /// Resolve `record` (a `[mods]` line) against `descriptor`.
    pub fn new(descriptor: &'static ModifierDescriptor, record: &Record) -> Self {
        let params: Vec<f32> = descriptor
            .params
            .iter()
            .enumerate()
            .map(|(i, spec)| spec.resolve(record.num(i + 1)))
            .collect();
        let param_descriptions = descriptor
            .params
            .iter()
            .zip(&params)
            .filter_map(|(spec, &value)| spec.describe(value))
            .collect();

        Self {
            descriptor,
            params,
            param_descriptions,
        }
    }

    #[inline]
    pub fn id(&self) -> ModifierId {
        self.descriptor.id
    }

    #[inline]
    pub fn descriptor(&self) -> &'static ModifierDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    #[inline]
    pub fn description(&self) -> &'static str {
        self.descriptor.description
    }

    #[inline]
    pub fn params(&self) -> &[f32] {
        &self.params
    }

    /// Resolved parameter `index`, or its default if the descriptor has fewer.
    pub fn param(&self, index: usize) -> f32 {
        self.params.get(index).copied().unwrap_or_default()
    }

    #[inline]
    pub fn param_descriptions(&self) -> &[String] {
        &self.param_descriptions
    }

    /// Apply the effect to `player`. Called once at scenario start.
    pub fn apply(&self, player: &mut PlayerState) {
        player::apply(self, player);
    }
}

impl PartialEq for ModifierDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Serialize for ModifierDescriptor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key)
    }
}

/// Build the active modifier for a `[mods]` line; `None` for unknown keywords.
pub fn build(record: &Record) -> Option<ActiveModifier> {
    let descriptor = lookup(record.arg(0))?;
    Some(ActiveModifier::new(descriptor, record))
}
