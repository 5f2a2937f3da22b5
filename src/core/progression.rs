//! Meta-progression: XP and level-ups, region unlock state, the atomic
//! run merge, key fragments, and wisdom collection.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::character::player::Player;
use crate::character::stats::effective_stats;
use crate::content::{self, Skill, WisdomFragment};
use crate::content::regions::ALL_REGIONS;
use crate::content::wisdom::WISDOM_REWARDS;
use crate::core::balance::{KEY_FRAGMENT_DROP_CHANCE, STAT_GROWTH_PER_LEVEL, XP_FOR_LEVEL};
use crate::core::run::RegionRun;
use crate::items::types::ItemInstance;

/// Per-save unlocked/cleared flags for one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionState {
    pub unlocked: bool,
    pub cleared: bool,
}

/// Unlock/cleared flags for the whole map, keyed by region id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProgress {
    pub states: BTreeMap<String, RegionState>,
}

impl Default for RegionProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionProgress {
    /// Fresh map: only the starting region is open.
    pub fn new() -> RegionProgress {
        let states = ALL_REGIONS
            .iter()
            .map(|r| {
                (
                    r.id.to_string(),
                    RegionState {
                        unlocked: r.starts_unlocked,
                        cleared: false,
                    },
                )
            })
            .collect();
        RegionProgress { states }
    }

    pub fn is_unlocked(&self, region_id: &str) -> bool {
        self.states.get(region_id).map(|s| s.unlocked).unwrap_or(false)
    }

    pub fn is_cleared(&self, region_id: &str) -> bool {
        self.states.get(region_id).map(|s| s.cleared).unwrap_or(false)
    }

    fn state_mut(&mut self, region_id: &str) -> &mut RegionState {
        self.states.entry(region_id.to_string()).or_default()
    }
}

/// Why entry to a region is currently refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryRefusal {
    Locked,
    LevelTooLow { required: u32 },
    MissingKeyFragments { missing: Vec<String> },
}

/// Checks whether the player may start a run in `region_id` right now.
pub fn can_enter_region(
    player: &Player,
    progress: &RegionProgress,
    region_id: &str,
) -> Result<(), EntryRefusal> {
    let Some(region) = content::region(region_id) else {
        return Err(EntryRefusal::Locked);
    };
    if !progress.is_unlocked(region_id) {
        return Err(EntryRefusal::Locked);
    }
    if region.unlock_player_level > 0 && player.level < region.unlock_player_level {
        return Err(EntryRefusal::LevelTooLow {
            required: region.unlock_player_level,
        });
    }
    if region.requires_key_fragments {
        let missing: Vec<String> = content::KEY_FRAGMENT_IDS
            .iter()
            .filter(|id| !player.has_item(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(EntryRefusal::MissingKeyFragments { missing });
        }
    }
    Ok(())
}

/// Applies pending level-ups from accumulated experience.
///
/// Growth per level follows the fixed table; max HP rounds no lower than 1
/// and max MP no lower than 0. Newly reached unlock levels teach their
/// skills, and any level gained fully restores HP/MP.
pub fn check_level_up(player: &mut Player) -> (bool, Vec<&'static Skill>) {
    let mut leveled = false;
    let mut new_skills = Vec::new();

    while (player.level as usize) < XP_FOR_LEVEL.len()
        && player.experience >= XP_FOR_LEVEL[player.level as usize]
    {
        player.level += 1;
        leveled = true;
        player.base_stats = player.base_stats.plus(&STAT_GROWTH_PER_LEVEL);
        player.base_stats.max_hp = player.base_stats.max_hp.round().max(1.0);
        player.base_stats.max_mp = player.base_stats.max_mp.round().max(0.0);

        for skill in content::skills::ALL_SKILLS {
            if skill.unlock_level == player.level && !player.knows_skill(skill.id) {
                player.persistent_skills.push(skill.id.to_string());
                new_skills.push(skill);
            }
        }
    }

    if leveled {
        let eff = effective_stats(player);
        player.current_hp = eff.max_hp;
        player.current_mp = eff.max_mp;
        tracing::info!(level = player.level, "level up");
    }
    (leveled, new_skills)
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Region fully cleared (boss down).
    Cleared,
    /// Player fell mid-run.
    Defeated,
    /// Player walked away mid-run.
    Fled,
}

/// Everything the presentation layer needs to narrate a run's end.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub leveled_up: bool,
    pub new_skill_names: Vec<String>,
    pub key_fragment: Option<String>,
    pub unlocked_region: Option<String>,
    pub game_completed: bool,
}

/// Merges a finished run back into the persistent player: once,
/// atomically, whatever the ending.
///
/// XP and gold always land. On a cleared region the fork's surviving
/// HP/MP carry over (clamped to the persistent maxima), the region is
/// marked cleared, its key fragment may drop, and the next region may
/// unlock. Level-ups happen here and only here.
pub fn finish_run(
    persistent: &mut Player,
    progress: &mut RegionProgress,
    run: &RegionRun,
    end: RunEnd,
    rng: &mut impl Rng,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let region = run.region();

    persistent.experience += run.xp_gained as u64;
    persistent.gold += run.gold_gained;

    if end == RunEnd::Cleared && run.player.current_hp > 0 {
        let eff = effective_stats(persistent);
        persistent.current_hp = run.player.current_hp.min(eff.max_hp);
        persistent.current_mp = run.player.current_mp.min(eff.max_mp);
    }

    let (leveled_up, new_skills) = check_level_up(persistent);
    summary.leveled_up = leveled_up;
    summary.new_skill_names = new_skills.iter().map(|s| s.name.to_string()).collect();

    if end == RunEnd::Cleared {
        progress.state_mut(&run.region_id).cleared = true;

        if let Some(fragment_id) = region.key_fragment_drop {
            if !persistent.has_item(fragment_id) && rng.gen::<f64>() < KEY_FRAGMENT_DROP_CHANCE {
                if let Some(instance) = ItemInstance::create(fragment_id) {
                    summary.key_fragment = Some(instance.display_name());
                    persistent.inventory.push(instance);
                }
            }
        }

        if region.is_final {
            summary.game_completed = true;
        } else if let Some(next) = content::next_region(&run.region_id) {
            if !progress.is_unlocked(next.id) && may_unlock(persistent, next) {
                progress.state_mut(next.id).unlocked = true;
                summary.unlocked_region = Some(next.name.to_string());
            }
        }
    }

    tracing::info!(
        region = %run.region_id,
        ?end,
        xp = run.xp_gained,
        gold = run.gold_gained,
        "run merged"
    );
    summary
}

fn may_unlock(player: &Player, region: &content::Region) -> bool {
    if region.unlock_player_level > 0 && player.level < region.unlock_player_level {
        return false;
    }
    if region.requires_key_fragments {
        return content::KEY_FRAGMENT_IDS.iter().all(|id| player.has_item(id));
    }
    true
}

/// Restores a defeated player for the continue flow: full HP/MP, battle
/// leftovers cleared.
pub fn revive(player: &mut Player) {
    player.active_buffs.clear();
    player.used_once_per_battle.clear();
    let eff = effective_stats(player);
    player.current_hp = eff.max_hp;
    player.current_mp = eff.max_mp;
}

/// Adds an uncollected wisdom fragment, granting any collection-count
/// rewards that just became due. Returns the fragment when newly
/// collected.
pub fn collect_wisdom(player: &mut Player, fragment_id: &str) -> Option<&'static WisdomFragment> {
    if player.collected_wisdom_ids.iter().any(|id| id == fragment_id) {
        return None;
    }
    let fragment = content::wisdom(fragment_id)?;
    player.collected_wisdom_ids.push(fragment_id.to_string());

    let collected = player
        .collected_wisdom_ids
        .iter()
        .filter(|id| content::wisdom(id).is_some())
        .count();
    for reward in WISDOM_REWARDS {
        if collected >= reward.count
            && !player
                .collected_wisdom_ids
                .iter()
                .any(|id| id == reward.claim_flag)
        {
            player.collected_wisdom_ids.push(reward.claim_flag.to_string());
            for _ in 0..reward.quantity {
                if let Some(instance) = ItemInstance::create(reward.item_id) {
                    player.inventory.push(instance);
                }
            }
        }
    }

    Some(fragment)
}
