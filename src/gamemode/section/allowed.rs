//! Allow-lists for `[loadout]` items and `[entity_spawn]` entities.

/// Items a `[loadout]` line may give to the player.
pub const ALLOWED_ITEMS: &[&str] = &[
    "all",
    "medkit",
    "slowmotion",
    "painkiller",
    "item_suit",
    "item_longjump",
    "item_battery",
    "item_healthkit",
    "weapon_crowbar",
    "weapon_9mmhandgun",
    "weapon_glock_twin",
    "weapon_357",
    "weapon_9mmAR",
    "weapon_ingram",
    "weapon_ingram_twin",
    "weapon_shotgun",
    "weapon_crossbow",
    "weapon_rpg",
    "weapon_gauss",
    "weapon_egon",
    "weapon_hornetgun",
    "weapon_handgrenade",
    "weapon_satchel",
    "weapon_tripmine",
    "weapon_snark",
    "ammo_9mmclip",
    "ammo_9mmAR",
    "ammo_ARgrenades",
    "ammo_357",
    "ammo_buckshot",
    "ammo_crossbow",
    "ammo_rpgclip",
    "ammo_gaussclip",
];

/// Entities an `[entity_spawn]` line may create.
pub const ALLOWED_ENTITIES: &[&str] = &[
    "item_healthkit",
    "item_battery",
    "item_longjump",
    "item_slowmotion",
    "item_painkiller",
    "monster_alien_controller",
    "monster_alien_grunt",
    "monster_alien_slave",
    "monster_apache",
    "monster_babycrab",
    "monster_barnacle",
    "monster_barney",
    "monster_bigmomma",
    "monster_bullchicken",
    "monster_gargantua",
    "monster_headcrab",
    "monster_houndeye",
    "monster_human_assassin",
    "monster_human_grunt",
    "monster_ichthyosaur",
    "monster_miniturret",
    "monster_scientist",
    "monster_sentry",
    "monster_snark",
    "monster_turret",
    "monster_zombie",
    "weapon_crowbar",
    "weapon_9mmhandgun",
    "weapon_357",
    "weapon_9mmAR",
    "weapon_ingram",
    "weapon_shotgun",
    "weapon_crossbow",
    "weapon_rpg",
    "weapon_gauss",
    "weapon_egon",
    "weapon_hornetgun",
    "weapon_handgrenade",
    "weapon_satchel",
    "weapon_tripmine",
    "weapon_snark",
];

#[inline]
pub fn is_allowed_item(name: &str) -> bool {
    ALLOWED_ITEMS.contains(&name)
}

#[inline]
pub fn is_allowed_entity(name: &str) -> bool {
    ALLOWED_ENTITIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        assert!(is_allowed_item("medkit"));
        assert!(!is_allowed_item("Medkit"));
        assert!(is_allowed_entity("monster_human_grunt"));
        assert!(!is_allowed_entity("monster_human_grunt "));
    }
}
