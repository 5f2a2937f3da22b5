//! Tuning constants for combat, growth, and encounter pacing.

use crate::character::stats::StatBlock;

/// Critical hits multiply raw damage before the final floor.
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// A connecting hit never deals less than this.
pub const MINIMUM_DAMAGE: i32 = 1;

/// Player magic: damage = power + floor(attack / this).
pub const MAGIC_ATTACK_DIVISOR: i32 = 4;
/// Enemy magic uses a harsher divisor than the player's.
pub const ENEMY_MAGIC_ATTACK_DIVISOR: i32 = 3;

/// Elemental multiplier against a weak target.
pub const ELEMENT_WEAK_MULTIPLIER: f64 = 1.5;
/// Elemental multiplier against a resistant target.
pub const ELEMENT_RESIST_MULTIPLIER: f64 = 0.5;

/// Chance an enemy with an affordable skill uses one instead of attacking.
/// Deliberately independent of the enemy's ai_behavior tag.
pub const ENEMY_SKILL_CHANCE: f64 = 0.5;

/// Chance a scripted non-boss encounter is replaced by the novelty enemy.
pub const NOVELTY_ENCOUNTER_CHANCE: f64 = 0.01;

/// Weapons that resolve two independent hits per basic attack.
pub const TWIN_STRIKE_WEAPON_IDS: &[&str] = &["hero_brand", "dawn_piercer"];

/// Equipment enhancement caps at this level.
pub const MAX_ENHANCEMENT_LEVEL: u8 = 10;
/// Flat attack added per weapon enhancement level.
pub const WEAPON_ENHANCEMENT_ATTACK_PER_LEVEL: f64 = 2.0;
/// Flat defense added per armor enhancement level.
pub const ARMOR_ENHANCEMENT_DEFENSE_PER_LEVEL: f64 = 1.0;
/// Flat defense added per shield enhancement level.
pub const SHIELD_ENHANCEMENT_DEFENSE_PER_LEVEL: f64 = 1.0;

/// Chance a designated region boss yields its key fragment on clear.
pub const KEY_FRAGMENT_DROP_CHANCE: f64 = 0.5;

/// Cumulative XP required to *reach* each level; index 0 is level 1.
pub const XP_FOR_LEVEL: &[u64] = &[
    0, 15, 40, 80, 150, 280, 450, 700, 1_000, 1_400, 2_000, 2_800, 3_800, 5_000, 6_500, 8_300,
    10_300, 12_600, 15_200, 18_200, 21_600, 25_400, 29_600, 34_200, 39_200,
];

/// Base-stat growth applied on every level gained.
pub const STAT_GROWTH_PER_LEVEL: StatBlock = StatBlock {
    max_hp: 4.0,
    max_mp: 2.0,
    attack: 1.5,
    defense: 1.0,
    speed: 1.0,
    crit_rate: 0.0,
};

/// A fresh hero's base stats.
pub const STARTING_STATS: StatBlock = StatBlock {
    max_hp: 28.0,
    max_mp: 15.0,
    attack: 7.0,
    defense: 5.0,
    speed: 5.0,
    crit_rate: 0.03,
};

pub const STARTING_GOLD: u32 = 50;
pub const STARTING_SKILL_IDS: &[&str] = &["power_strike", "ember", "heal"];
