//! The modifier table.
//!
//! Entries are in [`ModifierId`] declaration order, so an id indexes its
//! own descriptor.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

use super::ModifierId;
use super::ModifierId as Id;
use super::param::ParamRule::{AtLeast, Any, Clamp, Positive, Unlimited};
use super::param::ParamSpec;

/// Static description of one modifier.
#[derive(Debug)]
pub struct ModifierDescriptor {
    pub id: ModifierId,
    /// Keyword used in `[mods]`.
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Positional parameters following the keyword.
    pub params: &'static [ParamSpec],
}

const fn entry(
    id: ModifierId,
    key: &'static str,
    name: &'static str,
    description: &'static str,
    params: &'static [ParamSpec],
) -> ModifierDescriptor {
    ModifierDescriptor {
        id,
        key,
        name,
        description,
        params,
    }
}

/// Look up a descriptor by its `[mods]` keyword.
pub fn lookup(key: &str) -> Option<&'static ModifierDescriptor> {
    static BY_KEY: LazyLock<FxHashMap<&'static str, &'static ModifierDescriptor>> =
        LazyLock::new(|| CATALOG.iter().map(|d| (d.key, d)).collect());
    BY_KEY.get(key).copied()
}

pub static CATALOG: [ModifierDescriptor; ModifierId::COUNT] = [
    entry(
        Id::Bleeding,
        "bleeding",
        "Bleeding",
        "After your last painkiller take, you start to lose health.\n\
         Health regeneration is turned off.",
        &[
            ParamSpec::int(20.0, Clamp(0.0, 99.0), "Bleeding until {}% health left"),
            ParamSpec::float(1.0, Any, "Bleed update period: {} sec"),
            ParamSpec::float(10.0, AtLeast(0.05), "Bleed again after healing in: {} sec"),
        ],
    ),
    entry(
        Id::BulletPhysicsDisabled,
        "bullet_physics_disabled",
        "Bullet physics disabled",
        "Self explanatory.",
        &[],
    ),
    entry(
        Id::BulletPhysicsConstant,
        "bullet_physics_constant",
        "Bullet physics constant",
        "Bullet physics is always present, even when slowmotion is NOT present.",
        &[],
    ),
    entry(
        Id::BulletPhysicsEnemiesAndPlayerOnSlowmotion,
        "bullet_physics_enemies_and_player_on_slowmotion",
        "Bullet physics for enemies and player on slowmotion",
        "Bullet physics will be active for both enemies and player only when slowmotion is present.",
        &[],
    ),
    entry(
        Id::BulletRicochet,
        "bullet_ricochet",
        "Bullet ricochet",
        "Physical bullets ricochet off the walls.",
        &[
            ParamSpec::int(2.0, Unlimited, "Max ricochets: {}"),
            ParamSpec::float(45.0, Clamp(1.0, 90.0), "Max angle for ricochet: {} deg"),
            ParamSpec::int(5.0, Any, "Ricochet error: {}%").hidden(),
        ],
    ),
    entry(
        Id::ConstantSlowmotion,
        "constant_slowmotion",
        "Constant slowmotion",
        "You start in slowmotion, it's infinite and you can't turn it off.",
        &[],
    ),
    entry(
        Id::CrossbowExplosiveBolts,
        "crossbow_explosive_bolts",
        "Crossbow explosive bolts",
        "Crossbow bolts explode when then hit the wall.",
        &[],
    ),
    entry(
        Id::DivingAllowedWithoutSlowmotion,
        "diving_allowed_without_slowmotion",
        "Diving allowed without slowmotion",
        "You're still allowed to dive even if you have no slowmotion charge.\n\
         In that case you will dive without going into slowmotion.",
        &[],
    ),
    entry(
        Id::DivingOnly,
        "diving_only",
        "Diving only",
        "The only way to move around is by diving.\n\
         This enables Infinite slowmotion by default.\n\
         You can dive even when in crouch-like position, like when being in vents etc.",
        &[],
    ),
    entry(
        Id::Drunk,
        "drunk",
        "Drunk",
        "Self explanatory. The camera view becomes wobbly and makes aim harder.\n\
         Wobble doesn't get slower when slowmotion is present.",
        &[ParamSpec::int(25.0, Clamp(0.0, 100.0), "Drunkiness: {}%")],
    ),
    entry(
        Id::Easy,
        "easy",
        "Easy difficulty",
        "Sets up easy level of difficulty.",
        &[],
    ),
    entry(
        Id::EdibleGibs,
        "edible_gibs",
        "Edible gibs",
        "Allows you to eat gibs by pressing USE when aiming at the gib, which restore your health by 5.",
        &[],
    ),
    entry(
        Id::EmptySlowmotion,
        "empty_slowmotion",
        "Empty slowmotion",
        "Start with no slowmotion charge.",
        &[],
    ),
    entry(
        Id::FadingOut,
        "fading_out",
        "Fading out",
        "View is fading out, or in other words it's blacking out until you can't see almost anything.\n\
         Take painkillers to restore the vision.\n\
         Allows to take painkillers even when you have 100 health and enough time have passed since the last take.",
        &[
            ParamSpec::int(90.0, Clamp(0.0, 100.0), "Fade out intensity: {}%"),
            ParamSpec::float(0.5, Any, "Fade out update period: {} sec"),
        ],
    ),
    entry(
        Id::Hard,
        "hard",
        "Hard difficulty",
        "Sets up hard level of difficulty.",
        &[],
    ),
    entry(
        Id::Headshots,
        "headshots",
        "Headshots",
        "Headshots dealt to enemies become much more deadly.",
        &[],
    ),
    entry(
        Id::GarbageGibs,
        "garbage_gibs",
        "Garbage gibs",
        "Replaces all gibs with garbage.",
        &[],
    ),
    entry(
        Id::InfiniteAmmo,
        "infinite_ammo",
        "Infinite ammo",
        "All weapons get infinite ammo.",
        &[],
    ),
    entry(
        Id::InfiniteAmmoClip,
        "infinite_ammo_clip",
        "Infinite ammo clip",
        "Most weapons get an infinite ammo clip and need no reloading.",
        &[],
    ),
    entry(
        Id::InfinitePainkillers,
        "infinite_painkillers",
        "Infinite painkillers",
        "Self explanatory.",
        &[],
    ),
    entry(
        Id::InfiniteSlowmotion,
        "infinite_slowmotion",
        "Infinite slowmotion",
        "You have infinite slowmotion charge and it's not considered as cheat.",
        &[],
    ),
    entry(
        Id::Instagib,
        "instagib",
        "Instagib",
        "Gauss Gun becomes much more deadly with 9999 damage, also gets red beam and slower rate of fire.\n\
         More gibs come out.",
        &[],
    ),
    entry(
        Id::NoFallDamage,
        "no_fall_damage",
        "No fall damage",
        "Self explanatory.",
        &[],
    ),
    entry(
        Id::NoMapMusic,
        "no_map_music",
        "No map music",
        "Music which is defined by map will not be played.\n\
         Only the music defined in map and gameplay config files will play.",
        &[],
    ),
    entry(
        Id::NoHealing,
        "no_healing",
        "No healing",
        "Don't allow to heal in any way, including Xen healing pools.",
        &[],
    ),
    entry(
        Id::NoPills,
        "no_pills",
        "No pills",
        "Don't allow to take painkillers.",
        &[],
    ),
    entry(
        Id::NoSaving,
        "no_saving",
        "No saving",
        "Don't allow to load saved files.",
        &[],
    ),
    entry(
        Id::NoSecondaryAttack,
        "no_secondary_attack",
        "No secondary attack",
        "Disables the secondary attack on all weapons.",
        &[],
    ),
    entry(
        Id::NoSlowmotion,
        "no_slowmotion",
        "No slowmotion",
        "You're not allowed to use slowmotion.",
        &[],
    ),
    entry(
        Id::NoSmgGrenadePickup,
        "no_smg_grenade_pickup",
        "No SMG grenade pickup",
        "You're not allowed to pickup and use SMG (MP5) grenades.",
        &[],
    ),
    entry(
        Id::OneHitKo,
        "one_hit_ko",
        "One hit KO",
        "Any hit from an enemy will kill you instantly.\n\
         You still get proper damage from falling and environment.",
        &[],
    ),
    entry(
        Id::OneHitKoFromPlayer,
        "one_hit_ko_from_player",
        "One hit KO from player",
        "All enemies die in one hit.",
        &[],
    ),
    entry(
        Id::PreventMonsterSpawn,
        "prevent_monster_spawn",
        "Prevent monster spawn",
        "Don't spawn predefined monsters (NPCs) when visiting a new map.\n\
         This doesn't affect dynamic monster_spawners.",
        &[],
    ),
    entry(
        Id::SlowmotionOnDamage,
        "slowmotion_on_damage",
        "Slowmotion on damage",
        "You get slowmotion charge when receiving damage.",
        &[],
    ),
    entry(
        Id::SlowPainkillers,
        "slow_painkillers",
        "Slow painkillers",
        "Painkillers take time to have an effect, like in original Max Payne.",
        &[ParamSpec::float(0.2, AtLeast(0.0), "Healing period {} sec")],
    ),
    entry(
        Id::SnarkFriendlyToAllies,
        "snark_friendly_to_allies",
        "Snarks friendly to allies",
        "Snarks won't attack player's allies.",
        &[],
    ),
    entry(
        Id::SnarkFriendlyToPlayer,
        "snark_friendly_to_player",
        "Snarks friendly to player",
        "Snarks won't attack player.",
        &[],
    ),
    entry(
        Id::SnarkFromExplosion,
        "snark_from_explosion",
        "Snark from explosion",
        "Snarks will spawn in the place of explosion.",
        &[],
    ),
    entry(
        Id::SnarkInception,
        "snark_inception",
        "Snark inception",
        "Killing snark splits it into two snarks.\n\
         Snarks are immune to explosions.",
        &[],
    ),
    entry(
        Id::SnarkInfestation,
        "snark_infestation",
        "Snark infestation",
        "Snark will spawn in the body of killed monster (NPC).\n\
         Even more snarks spawn if monster's corpse has been gibbed.",
        &[],
    ),
    entry(
        Id::SnarkNuclear,
        "snark_nuclear",
        "Snark nuclear",
        "Killing snark produces a grenade-like explosion.",
        &[],
    ),
    entry(
        Id::SnarkParanoia,
        "snark_paranoia",
        "Snark paranoia",
        "Snarks spawn randomly around the map, mostly out of your sight.\n\
         Spawn positions are determined by world graph.",
        &[ParamSpec::float(1.0, Any, "Snark spawning period: {} sec")],
    ),
    entry(
        Id::SnarkPenguins,
        "snark_penguins",
        "Snark penguins",
        "Replaces snarks with penguins from Opposing Force.",
        &[],
    ),
    entry(
        Id::SnarkStayAlive,
        "snark_stay_alive",
        "Snark stay alive",
        "Snarks will never die on their own, they must be shot.",
        &[],
    ),
    entry(
        Id::StartingHealth,
        "starting_health",
        "Starting Health",
        "Start with specified health amount.",
        &[ParamSpec::int(100.0, Positive, "Health amount: {}")],
    ),
    entry(
        Id::Superhot,
        "superhot",
        "SUPERHOT",
        "Time moves forward only when you move around.\n\
         Inspired by the game SUPERHOT.",
        &[],
    ),
    entry(
        Id::SwearOnKill,
        "swear_on_kill",
        "Swear on kill",
        "Max will swear when killing an enemy. He will still swear even if Max's commentary is turned off.",
        &[],
    ),
    entry(
        Id::UpsideDown,
        "upside_down",
        "Upside down",
        "View becomes turned on upside down.",
        &[],
    ),
    entry(
        Id::TotallySpies,
        "totally_spies",
        "Totally spies",
        "Replaces all HGrunts with Black Ops.",
        &[],
    ),
    entry(
        Id::Vvvvvv,
        "vvvvvv",
        "VVVVVV",
        "Pressing jump reverses gravity for player.\n\
         Inspired by the game VVVVVV.",
        &[],
    ),
    entry(
        Id::WeaponRestricted,
        "weapon_restricted",
        "Weapon restricted",
        "If you have no weapons - you can only have one.\n\
         You can have several weapons at once if they are specified in [loadout] section.\n\
         Weapon stripping doesn't affect you.",
        &[],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_catalog_order_matches_ids() {
        for (i, descriptor) in CATALOG.iter().enumerate() {
            assert_eq!(descriptor.id as usize, i, "{} out of order", descriptor.key);
            assert_eq!(descriptor.id.descriptor().key, descriptor.key);
        }
    }

    #[test]
    fn test_keys_are_unique_lowercase() {
        let mut seen = FxHashSet::default();
        for descriptor in &CATALOG {
            assert!(seen.insert(descriptor.key), "duplicate {}", descriptor.key);
            assert_eq!(descriptor.key, descriptor.key.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("snark_paranoia").map(|d| d.id), Some(ModifierId::SnarkParanoia));
        assert_eq!(lookup("Superhot").map(|d| d.id), None);
        assert!(lookup("flying_pigs").is_none());
    }

    #[test]
    fn test_labels_have_one_placeholder() {
        for descriptor in &CATALOG {
            for param in descriptor.params {
                if let Some(label) = param.label {
                    assert_eq!(label.matches("{}").count(), 1, "{}", descriptor.key);
                }
            }
        }
    }
}
