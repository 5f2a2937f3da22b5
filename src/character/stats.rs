//! The effective-stat pipeline.
//!
//! Base stats, equipment, run-scoped boosts, and active status effects all
//! fold into one `EffectiveStats` snapshot. The snapshot is recomputed at
//! every decision point and never stored; after any mutation (MP spend,
//! buff application, level-up) the previous snapshot is stale.

use serde::{Deserialize, Serialize};

use crate::character::player::Player;
use crate::combat::types::{DebuffKind, Enemy};
use crate::content::ItemKind;
use crate::core::balance::{
    ARMOR_ENHANCEMENT_DEFENSE_PER_LEVEL, SHIELD_ENHANCEMENT_DEFENSE_PER_LEVEL,
    WEAPON_ENHANCEMENT_ATTACK_PER_LEVEL,
};

/// The shared six-field stat block.
///
/// Serves as a player's base stats, as a run-scoped boost delta, and as a
/// skill's stat-boost payload. Fields are fractional because level growth
/// is (attack rises 1.5 per level); flooring happens only when an
/// `EffectiveStats` snapshot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default)]
    pub max_hp: f64,
    #[serde(default)]
    pub max_mp: f64,
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub crit_rate: f64,
}

/// Skills and reward cards express boosts with the same shape.
pub type StatBoost = StatBlock;

impl StatBlock {
    pub const ZERO: StatBlock = StatBlock {
        max_hp: 0.0,
        max_mp: 0.0,
        attack: 0.0,
        defense: 0.0,
        speed: 0.0,
        crit_rate: 0.0,
    };

    /// Field-by-field sum.
    pub fn plus(&self, other: &StatBlock) -> StatBlock {
        StatBlock {
            max_hp: self.max_hp + other.max_hp,
            max_mp: self.max_mp + other.max_mp,
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            speed: self.speed + other.speed,
            crit_rate: self.crit_rate + other.crit_rate,
        }
    }
}

/// Fully-resolved stats for one decision point. Integer everywhere except
/// the crit fraction; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveStats {
    pub max_hp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub crit_rate: f64,
}

impl EffectiveStats {
    fn floored(block: &StatBlock) -> EffectiveStats {
        EffectiveStats {
            max_hp: block.max_hp.floor() as i32,
            max_mp: block.max_mp.floor() as i32,
            attack: block.attack.floor() as i32,
            defense: block.defense.floor() as i32,
            speed: block.speed.floor() as i32,
            crit_rate: block.crit_rate,
        }
    }
}

/// Computes the player's effective stats from base + equipment (boosts and
/// enhancement levels) + run boosts + active buff stat boosts.
///
/// The guard skill's defense entry is a multiplier (floored on
/// application); every other buff boost is an additive delta. Buffs whose
/// effect is behavioral (evasion, stun, regen) carry no stat boost and
/// change nothing here.
pub fn effective_stats(player: &Player) -> EffectiveStats {
    let mut block = player.base_stats;

    for instance in player.equipment.equipped() {
        let Some(def) = instance.def() else { continue };
        block.attack += def.attack_boost as f64;
        block.defense += def.defense_boost as f64;
        if instance.enhancement_level > 0 {
            let levels = instance.enhancement_level as f64;
            match def.kind {
                ItemKind::Weapon => block.attack += levels * WEAPON_ENHANCEMENT_ATTACK_PER_LEVEL,
                ItemKind::Armor => block.defense += levels * ARMOR_ENHANCEMENT_DEFENSE_PER_LEVEL,
                ItemKind::Shield => block.defense += levels * SHIELD_ENHANCEMENT_DEFENSE_PER_LEVEL,
                _ => {}
            }
        }
    }

    block = block.plus(&player.temporary_boosts);

    for buff in &player.active_buffs {
        let Some(skill) = crate::content::skill(&buff.skill_id) else {
            continue;
        };
        let Some(boost) = skill.stat_boost else { continue };
        if skill.defense_is_multiplier {
            block.defense = (block.defense * boost.defense).floor();
        } else {
            block.defense += boost.defense;
        }
        block.max_hp += boost.max_hp;
        block.max_mp += boost.max_mp;
        block.attack += boost.attack;
        block.speed += boost.speed;
        block.crit_rate += boost.crit_rate;
    }

    EffectiveStats::floored(&block)
}

/// Computes an enemy's effective stats: its stat block with its own
/// DEFENSE_DOWN debuff subtracted, floored at zero.
pub fn enemy_effective_stats(enemy: &Enemy) -> EffectiveStats {
    let mut defense = enemy.defense;
    for debuff in &enemy.active_debuffs {
        if debuff.kind == DebuffKind::DefenseDown {
            defense -= debuff.value.floor() as i32;
        }
    }
    EffectiveStats {
        max_hp: enemy.max_hp,
        max_mp: enemy.max_mp,
        attack: enemy.attack,
        defense: defense.max(0),
        speed: enemy.speed,
        crit_rate: 0.0,
    }
}
