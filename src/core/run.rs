//! Region runs.
//!
//! Entering a region forks the persistent player into a run-scoped copy;
//! the fork fights the region's scripted encounters in order, picks a
//! reward card between battles, and meets the boss last. The run carries
//! its accumulated XP/gold until the whole thing merges back exactly once
//! (see `core::progression::finish_run`).

use rand::Rng;

use crate::character::player::Player;
use crate::character::stats::{effective_stats, StatBoost};
use crate::combat::types::Enemy;
use crate::content::{self, Region};
use crate::core::balance::NOVELTY_ENCOUNTER_CHANCE;

#[derive(Debug, Clone)]
pub struct RegionRun {
    /// The forked, run-scoped player. The persistent record is untouched
    /// until the run ends.
    pub player: Player,
    pub region_id: String,
    pub encounter_index: usize,
    pub xp_gained: u32,
    pub gold_gained: u32,
}

/// One choice offered between encounters.
#[derive(Debug, Clone, PartialEq)]
pub enum RewardCard {
    StatBoost { boost: StatBoost, description: String },
    NewSkill { skill_id: String },
}

impl RegionRun {
    /// Forks the persistent player at region entry: run-scoped state is
    /// cleared and HP/MP snap to the fork's effective maxima.
    pub fn begin(persistent: &Player, region_id: &str) -> Option<RegionRun> {
        content::region(region_id)?;

        let mut fork = persistent.clone();
        fork.temporary_skills.clear();
        fork.temporary_boosts = StatBoost::ZERO;
        fork.active_buffs.clear();
        fork.used_once_per_battle.clear();
        let eff = effective_stats(&fork);
        fork.current_hp = eff.max_hp;
        fork.current_mp = eff.max_mp;

        tracing::info!(region = region_id, "run started");
        Some(RegionRun {
            player: fork,
            region_id: region_id.to_string(),
            encounter_index: 0,
            xp_gained: 0,
            gold_gained: 0,
        })
    }

    pub fn region(&self) -> &'static Region {
        content::region(&self.region_id).expect("run region exists by construction")
    }

    /// The boss comes right after the last scripted encounter.
    pub fn is_boss_next(&self) -> bool {
        self.encounter_index == self.region().encounters.len()
    }

    /// All encounters (boss included) cleared.
    pub fn is_cleared(&self) -> bool {
        self.encounter_index > self.region().encounters.len()
    }

    /// The boss fight is level-gated; returns the required level while the
    /// run player is below it.
    pub fn boss_gate(&self) -> Option<u32> {
        let region = self.region();
        if self.is_boss_next() && self.player.level < region.boss_unlock_level {
            Some(region.boss_unlock_level)
        } else {
            None
        }
    }

    /// Spawns the roster for the current encounter, or `None` once the
    /// region is cleared.
    ///
    /// A scripted (non-boss) encounter outside the final region has a
    /// small chance of being replaced by the lone novelty enemy.
    pub fn next_encounter(&self, rng: &mut impl Rng) -> Option<Vec<Enemy>> {
        let region = self.region();

        let roster: Vec<&str> = if self.is_boss_next() {
            vec![region.boss_id]
        } else if self.encounter_index < region.encounters.len() {
            if !region.is_final && rng.gen::<f64>() < NOVELTY_ENCOUNTER_CHANCE {
                tracing::debug!(region = %self.region_id, "novelty encounter substituted");
                vec![content::NOVELTY_ENEMY_ID]
            } else {
                region.encounters[self.encounter_index].to_vec()
            }
        } else {
            return None;
        };

        let enemies: Vec<Enemy> = roster
            .iter()
            .filter_map(|id| {
                let def = content::enemy(id);
                if def.is_none() {
                    tracing::warn!(enemy = %id, "encounter references unknown enemy");
                }
                def.map(Enemy::spawn)
            })
            .collect();
        Some(enemies)
    }

    /// Records a won battle: yields accumulate and the run advances to the
    /// next encounter.
    pub fn record_victory(&mut self, exp: u32, gold: u32) {
        self.xp_gained += exp;
        self.gold_gained += gold;
        self.encounter_index += 1;
    }

    /// Applies one reward card to the fork and readies it for the next
    /// battle (the once-per-battle list resets between fights).
    pub fn apply_reward_card(&mut self, card: &RewardCard) {
        self.player.used_once_per_battle.clear();

        match card {
            RewardCard::StatBoost { boost, .. } => {
                self.player.temporary_boosts = self.player.temporary_boosts.plus(boost);
                // Raising a maximum also grants the difference right away.
                self.player.current_hp += boost.max_hp.floor() as i32;
                self.player.current_mp += boost.max_mp.floor() as i32;
            }
            RewardCard::NewSkill { skill_id } => {
                if !self.player.knows_skill(skill_id) {
                    self.player.temporary_skills.push(skill_id.clone());
                }
            }
        }
        self.player.clamp_to_effective();
    }
}

/// Skills that can appear on reward cards.
pub static REWARD_SKILL_IDS: &[&str] = &[
    "cleave",
    "frost_lance",
    "war_cry",
    "iron_bulwark",
    "greater_heal",
    "flame_wave",
    "blizzard",
    "drain_slash",
    "piercing_shout",
    "blinding_flash",
    "vanish_step",
    "fortune_prayer",
    "plunder_rush",
    "reckless_rush",
    "second_wind",
    "mending_song",
    "soul_reap",
    "last_stand",
];

/// The full reward-card pool: flat run boosts plus every listed skill the
/// player does not already know.
pub fn draw_reward_cards(player: &Player, count: usize, rng: &mut impl Rng) -> Vec<RewardCard> {
    let mut pool: Vec<RewardCard> = vec![
        RewardCard::StatBoost {
            boost: StatBoost { max_hp: 10.0, ..StatBoost::ZERO },
            description: "Max HP +10 for this run".to_string(),
        },
        RewardCard::StatBoost {
            boost: StatBoost { max_mp: 5.0, ..StatBoost::ZERO },
            description: "Max MP +5 for this run".to_string(),
        },
        RewardCard::StatBoost {
            boost: StatBoost { attack: 3.0, ..StatBoost::ZERO },
            description: "Attack +3 for this run".to_string(),
        },
        RewardCard::StatBoost {
            boost: StatBoost { defense: 3.0, ..StatBoost::ZERO },
            description: "Defense +3 for this run".to_string(),
        },
        RewardCard::StatBoost {
            boost: StatBoost { speed: 2.0, ..StatBoost::ZERO },
            description: "Speed +2 for this run".to_string(),
        },
    ];

    for skill_id in REWARD_SKILL_IDS {
        if !player.knows_skill(skill_id) {
            pool.push(RewardCard::NewSkill {
                skill_id: skill_id.to_string(),
            });
        }
    }

    let mut cards = Vec::with_capacity(count);
    for _ in 0..count.min(pool.len()) {
        let index = rng.gen_range(0..pool.len());
        cards.push(pool.swap_remove(index));
    }
    cards
}
