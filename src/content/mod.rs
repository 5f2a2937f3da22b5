//! Static content tables: skills, items, enemies, regions, wisdom.
//!
//! Content is data, never mutated; everything else refers to it by id
//! through the lookup functions re-exported here. `validate()` checks the
//! cross-references so a dangling id is a test failure, not a silent
//! mid-battle no-op.

pub mod enemies;
pub mod items;
pub mod regions;
pub mod skills;
pub mod wisdom;

pub use enemies::{enemy, Affinity, EnemyDef, NOVELTY_ENEMY_ID};
pub use items::{item, sell_price, ItemDef, ItemKind};
pub use regions::{next_region, region, Region, KEY_FRAGMENT_IDS};
pub use skills::{skill, Element, Skill, SkillKind, TargetKind};
pub use wisdom::{wisdom, WisdomFragment};

/// Verifies every id referenced anywhere in the tables resolves.
///
/// Returns the list of dangling references; empty means the tables are
/// consistent. Run from tests; content bugs should never survive to a
/// battle.
pub fn validate() -> Vec<String> {
    let mut problems = Vec::new();

    for def in enemies::ALL_ENEMIES {
        for skill_id in def.skills {
            if skill(skill_id).is_none() {
                problems.push(format!("enemy {} references skill {}", def.id, skill_id));
            }
        }
    }

    for s in skills::ALL_SKILLS {
        if let Some(find) = s.item_find {
            if item(find.item_id).is_none() {
                problems.push(format!("skill {} finds unknown item {}", s.id, find.item_id));
            }
        }
        if let Some(steal) = s.item_steal {
            for id in steal.pool {
                if item(id).is_none() {
                    problems.push(format!("skill {} steals unknown item {}", s.id, id));
                }
            }
        }
    }

    for r in regions::ALL_REGIONS {
        if enemy(r.boss_id).is_none() {
            problems.push(format!("region {} has unknown boss {}", r.id, r.boss_id));
        }
        for roster in r.encounters {
            for id in *roster {
                if enemy(id).is_none() {
                    problems.push(format!("region {} encounter references enemy {}", r.id, id));
                }
            }
        }
        for id in r.shop_inventory.iter().chain(r.gacha_prizes.iter()) {
            if item(id).is_none() {
                problems.push(format!("region {} lists unknown item {}", r.id, id));
            }
        }
        if let Some(id) = r.key_fragment_drop {
            if item(id).is_none() {
                problems.push(format!("region {} drops unknown item {}", r.id, id));
            }
        }
    }

    for id in KEY_FRAGMENT_IDS {
        if item(id).is_none() {
            problems.push(format!("key fragment list references unknown item {}", id));
        }
    }

    for reward in wisdom::WISDOM_REWARDS {
        if item(reward.item_id).is_none() {
            problems.push(format!("wisdom reward grants unknown item {}", reward.item_id));
        }
    }

    problems
}
