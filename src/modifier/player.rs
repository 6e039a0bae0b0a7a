//! Player state touched by modifiers, and the effect of each modifier.

use serde::Serialize;

use super::{ActiveModifier, ModifierId};

const DEFAULT_HEALTH: f32 = 100.0;
const FULL_SLOWMOTION_CHARGE: f32 = 100.0;
/// Screen effects use a 0-255 intensity scale.
const INTENSITY_MAX: f32 = 255.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletPhysicsMode {
    /// Physical bullets for enemies, only while in slowmotion.
    #[default]
    ForEnemiesOnSlowmotion,
    Disabled,
    Constant,
    EnemiesAndPlayerOnSlowmotion,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bleeding {
    pub active: bool,
    /// Health percentage bleeding stops at.
    pub handicap: i32,
    pub update_period: f32,
    pub immunity_period: f32,
    pub last_healing_time: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bullets {
    pub physics: BulletPhysicsMode,
    /// `-1` for unlimited.
    pub ricochet_count: i32,
    pub ricochet_error: i32,
    pub ricochet_max_dot_product: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Slowmotion {
    pub charge: f32,
    pub active: bool,
    pub infinite: bool,
    pub constant: bool,
    pub disabled: bool,
    pub on_damage: bool,
    pub diving_allowed_without: bool,
    pub diving_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FadeOut {
    pub active: bool,
    /// Darkest allowed screen, 0 (black) to 255.
    pub threshold: f32,
    pub update_period: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Painkillers {
    pub infinite: bool,
    pub disabled: bool,
    pub slow: bool,
    pub next_effect_period: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snarks {
    pub friendly_to_allies: bool,
    pub friendly_to_player: bool,
    pub from_explosion: bool,
    pub inception: bool,
    pub infestation: bool,
    pub nuclear: bool,
    pub paranoia: bool,
    pub spawn_period: f32,
    pub penguins: bool,
    pub stay_alive: bool,
}

/// Plain on/off rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rules {
    pub crossbow_explosive_bolts: bool,
    pub edible_gibs: bool,
    pub garbage_gibs: bool,
    pub infinite_ammo: bool,
    pub infinite_ammo_clip: bool,
    pub instagib: bool,
    pub no_fall_damage: bool,
    pub no_map_music: bool,
    pub no_healing: bool,
    pub no_saving: bool,
    pub no_secondary_attack: bool,
    pub no_smg_grenade_pickup: bool,
    pub one_hit_ko: bool,
    pub one_hit_ko_from_player: bool,
    pub superhot: bool,
    pub swear_on_kill: bool,
    pub upside_down: bool,
    pub vvvvvv: bool,
    pub weapon_restricted: bool,
}

/// The part of a player that modifiers write to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    /// Game time at which modifiers are applied.
    pub time: f32,
    pub health: f32,
    /// Camera wobble, 0-255.
    pub drunkiness: f32,
    pub bleeding: Bleeding,
    pub bullets: Bullets,
    pub slowmotion: Slowmotion,
    pub fade_out: FadeOut,
    pub painkillers: Painkillers,
    pub snarks: Snarks,
    pub rules: Rules,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            time: 0.0,
            health: DEFAULT_HEALTH,
            drunkiness: 0.0,
            bleeding: Bleeding::default(),
            bullets: Bullets::default(),
            slowmotion: Slowmotion::default(),
            fade_out: FadeOut::default(),
            painkillers: Painkillers::default(),
            snarks: Snarks::default(),
            rules: Rules::default(),
        }
    }
}

impl PlayerState {
    /// Fresh player at game time `time`.
    pub fn at(time: f32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }
}

pub(super) fn apply(modifier: &ActiveModifier, player: &mut PlayerState) {
    use ModifierId as Id;

    let p = |i| modifier.param(i);

    match modifier.id() {
        Id::Bleeding => {
            let bleeding = &mut player.bleeding;
            bleeding.active = true;
            bleeding.handicap = p(0) as i32;
            bleeding.update_period = p(1);
            bleeding.immunity_period = p(2);
            bleeding.last_healing_time = player.time + p(2);
        }

        Id::BulletPhysicsDisabled => player.bullets.physics = BulletPhysicsMode::Disabled,
        Id::BulletPhysicsConstant => player.bullets.physics = BulletPhysicsMode::Constant,
        Id::BulletPhysicsEnemiesAndPlayerOnSlowmotion => {
            player.bullets.physics = BulletPhysicsMode::EnemiesAndPlayerOnSlowmotion;
        }
        Id::BulletRicochet => {
            player.bullets.ricochet_count = p(0) as i32;
            player.bullets.ricochet_max_dot_product = p(1) / 90.0;
            player.bullets.ricochet_error = p(2) as i32;
        }

        Id::ConstantSlowmotion => {
            let slowmotion = &mut player.slowmotion;
            slowmotion.charge = FULL_SLOWMOTION_CHARGE;
            slowmotion.active = true;
            slowmotion.infinite = true;
            slowmotion.constant = true;
        }
        Id::InfiniteSlowmotion => {
            player.slowmotion.charge = FULL_SLOWMOTION_CHARGE;
            player.slowmotion.infinite = true;
        }
        Id::EmptySlowmotion => player.slowmotion.charge = 0.0,
        Id::NoSlowmotion => player.slowmotion.disabled = true,
        Id::SlowmotionOnDamage => player.slowmotion.on_damage = true,
        Id::DivingAllowedWithoutSlowmotion => player.slowmotion.diving_allowed_without = true,
        Id::DivingOnly => {
            player.slowmotion.diving_only = true;
            player.slowmotion.infinite = true;
        }

        Id::Drunk => player.drunkiness = p(0) / 100.0 * INTENSITY_MAX,
        Id::FadingOut => {
            player.fade_out.active = true;
            player.fade_out.threshold = INTENSITY_MAX - p(0) / 100.0 * INTENSITY_MAX;
            player.fade_out.update_period = p(1);
        }

        Id::InfinitePainkillers => player.painkillers.infinite = true,
        Id::NoPills => player.painkillers.disabled = true,
        Id::SlowPainkillers => {
            player.painkillers.slow = true;
            player.painkillers.next_effect_period = p(0);
        }

        Id::SnarkFriendlyToAllies => player.snarks.friendly_to_allies = true,
        Id::SnarkFriendlyToPlayer => player.snarks.friendly_to_player = true,
        Id::SnarkFromExplosion => player.snarks.from_explosion = true,
        Id::SnarkInception => player.snarks.inception = true,
        Id::SnarkInfestation => player.snarks.infestation = true,
        Id::SnarkNuclear => player.snarks.nuclear = true,
        Id::SnarkParanoia => {
            player.snarks.paranoia = true;
            player.snarks.spawn_period = p(0);
        }
        Id::SnarkPenguins => player.snarks.penguins = true,
        Id::SnarkStayAlive => player.snarks.stay_alive = true,

        Id::StartingHealth => player.health = p(0),

        Id::CrossbowExplosiveBolts => player.rules.crossbow_explosive_bolts = true,
        Id::EdibleGibs => player.rules.edible_gibs = true,
        Id::GarbageGibs => player.rules.garbage_gibs = true,
        Id::InfiniteAmmo => player.rules.infinite_ammo = true,
        Id::InfiniteAmmoClip => player.rules.infinite_ammo_clip = true,
        Id::Instagib => player.rules.instagib = true,
        Id::NoFallDamage => player.rules.no_fall_damage = true,
        Id::NoMapMusic => player.rules.no_map_music = true,
        Id::NoHealing => player.rules.no_healing = true,
        Id::NoSaving => player.rules.no_saving = true,
        Id::NoSecondaryAttack => player.rules.no_secondary_attack = true,
        Id::NoSmgGrenadePickup => player.rules.no_smg_grenade_pickup = true,
        Id::OneHitKo => player.rules.one_hit_ko = true,
        Id::OneHitKoFromPlayer => player.rules.one_hit_ko_from_player = true,
        Id::Superhot => player.rules.superhot = true,
        Id::SwearOnKill => player.rules.swear_on_kill = true,
        Id::UpsideDown => player.rules.upside_down = true,
        Id::Vvvvvv => player.rules.vvvvvv = true,
        Id::WeaponRestricted => player.rules.weapon_restricted = true,

        // Handled by the game rules, not the player
        Id::Easy | Id::Hard | Id::Headshots | Id::PreventMonsterSpawn | Id::TotallySpies => {}
    }
}
