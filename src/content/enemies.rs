//! Enemy definitions.
//!
//! Each entry is a template; live `Enemy` combatants are spawned from these
//! at encounter start with full HP/MP and an empty debuff list.

use crate::combat::types::{AiBehavior, Resistances};
use crate::content::skills::Element;

/// Elemental relation of an enemy to one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Affinity {
    Weak,
    Resist,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyStatBlock {
    pub max_hp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub gold_yield: u32,
    pub exp_yield: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct EnemyDef {
    pub id: &'static str,
    pub name: &'static str,
    pub stats: EnemyStatBlock,
    pub skills: &'static [&'static str],
    pub ai_behavior: AiBehavior,
    pub resistances: Resistances,
}

const NO_RESIST: Resistances = Resistances {
    fire: None,
    ice: None,
    dark: None,
};

/// Id of the rare novelty enemy that can replace a scripted encounter.
pub const NOVELTY_ENEMY_ID: &str = "gilded_mimic";

pub static ALL_ENEMIES: &[EnemyDef] = &[
    EnemyDef {
        id: "slime",
        name: "Slime",
        stats: EnemyStatBlock {
            max_hp: 3,
            max_mp: 0,
            attack: 1,
            defense: 0,
            speed: 3,
            gold_yield: 3,
            exp_yield: 1,
        },
        skills: &[],
        ai_behavior: AiBehavior::Aggressive,
        resistances: Resistances {
            fire: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "giant_bat",
        name: "Giant Bat",
        stats: EnemyStatBlock {
            max_hp: 2,
            max_mp: 0,
            attack: 1,
            defense: 0,
            speed: 6,
            gold_yield: 4,
            exp_yield: 2,
        },
        skills: &[],
        ai_behavior: AiBehavior::Aggressive,
        resistances: Resistances {
            ice: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "goblin",
        name: "Goblin",
        stats: EnemyStatBlock {
            max_hp: 7,
            max_mp: 4,
            attack: 2,
            defense: 1,
            speed: 4,
            gold_yield: 8,
            exp_yield: 5,
        },
        skills: &["power_strike"],
        ai_behavior: AiBehavior::Mixed,
        resistances: NO_RESIST,
    },
    EnemyDef {
        id: "orc_warlord",
        name: "Orc Warlord",
        stats: EnemyStatBlock {
            max_hp: 32,
            max_mp: 10,
            attack: 4,
            defense: 3,
            speed: 5,
            gold_yield: 50,
            exp_yield: 25,
        },
        skills: &["power_strike"],
        ai_behavior: AiBehavior::Aggressive,
        resistances: Resistances {
            fire: Some(Affinity::Weak),
            ice: Some(Affinity::Resist),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "shade_panther",
        name: "Shade Panther",
        stats: EnemyStatBlock {
            max_hp: 120,
            max_mp: 0,
            attack: 16,
            defense: 6,
            speed: 13,
            gold_yield: 45,
            exp_yield: 35,
        },
        skills: &["jab"],
        ai_behavior: AiBehavior::Aggressive,
        resistances: Resistances {
            dark: Some(Affinity::Resist),
            ice: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "rock_golem",
        name: "Rock Golem",
        stats: EnemyStatBlock {
            max_hp: 75,
            max_mp: 6,
            attack: 13,
            defense: 13,
            speed: 2,
            gold_yield: 40,
            exp_yield: 30,
        },
        skills: &["power_strike"],
        ai_behavior: AiBehavior::Defensive,
        resistances: Resistances {
            ice: Some(Affinity::Weak),
            fire: Some(Affinity::Resist),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "cave_troll",
        name: "Cave Troll",
        stats: EnemyStatBlock {
            max_hp: 150,
            max_mp: 10,
            attack: 20,
            defense: 13,
            speed: 6,
            gold_yield: 70,
            exp_yield: 55,
        },
        skills: &["power_strike", "jab"],
        ai_behavior: AiBehavior::Mixed,
        resistances: Resistances {
            fire: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "gloom_knight",
        name: "Gloom Knight",
        stats: EnemyStatBlock {
            max_hp: 260,
            max_mp: 25,
            attack: 30,
            defense: 16,
            speed: 11,
            gold_yield: 220,
            exp_yield: 130,
        },
        skills: &["cleave", "power_strike"],
        ai_behavior: AiBehavior::Mixed,
        resistances: Resistances {
            fire: Some(Affinity::Weak),
            dark: Some(Affinity::Resist),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "deep_warden",
        name: "Deep Warden",
        stats: EnemyStatBlock {
            max_hp: 357,
            max_mp: 30,
            attack: 37,
            defense: 20,
            speed: 8,
            gold_yield: 350,
            exp_yield: 180,
        },
        skills: &["power_strike", "jab", "ember"],
        ai_behavior: AiBehavior::Mixed,
        resistances: Resistances {
            ice: Some(Affinity::Weak),
            dark: Some(Affinity::Resist),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "gale_reaver",
        name: "Gale Reaver",
        stats: EnemyStatBlock {
            max_hp: 129,
            max_mp: 0,
            attack: 24,
            defense: 13,
            speed: 9,
            gold_yield: 80,
            exp_yield: 60,
        },
        skills: &["jab"],
        ai_behavior: AiBehavior::Aggressive,
        resistances: NO_RESIST,
    },
    EnemyDef {
        id: "spire_sentinel",
        name: "Spire Sentinel",
        stats: EnemyStatBlock {
            max_hp: 158,
            max_mp: 10,
            attack: 29,
            defense: 16,
            speed: 7,
            gold_yield: 95,
            exp_yield: 70,
        },
        skills: &["power_strike"],
        ai_behavior: AiBehavior::Mixed,
        resistances: Resistances {
            fire: Some(Affinity::Resist),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "storm_harpy",
        name: "Storm Harpy",
        stats: EnemyStatBlock {
            max_hp: 122,
            max_mp: 0,
            attack: 21,
            defense: 11,
            speed: 12,
            gold_yield: 75,
            exp_yield: 58,
        },
        skills: &["jab"],
        ai_behavior: AiBehavior::Aggressive,
        resistances: Resistances {
            ice: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "iron_watcher",
        name: "Iron Watcher",
        stats: EnemyStatBlock {
            max_hp: 144,
            max_mp: 15,
            attack: 22,
            defense: 21,
            speed: 6,
            gold_yield: 85,
            exp_yield: 65,
        },
        skills: &["guard"],
        ai_behavior: AiBehavior::Defensive,
        resistances: NO_RESIST,
    },
    EnemyDef {
        id: "night_prowler",
        name: "Night Prowler",
        stats: EnemyStatBlock {
            max_hp: 137,
            max_mp: 5,
            attack: 25,
            defense: 12,
            speed: 10,
            gold_yield: 82,
            exp_yield: 62,
        },
        skills: &["jab"],
        ai_behavior: AiBehavior::Mixed,
        resistances: Resistances {
            dark: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "crag_ogre",
        name: "Crag Ogre",
        stats: EnemyStatBlock {
            max_hp: 172,
            max_mp: 12,
            attack: 31,
            defense: 15,
            speed: 5,
            gold_yield: 100,
            exp_yield: 75,
        },
        skills: &["power_strike"],
        ai_behavior: AiBehavior::Aggressive,
        resistances: Resistances {
            fire: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "hedge_witch",
        name: "Hedge Witch",
        stats: EnemyStatBlock {
            max_hp: 115,
            max_mp: 20,
            attack: 19,
            defense: 11,
            speed: 8,
            gold_yield: 70,
            exp_yield: 55,
        },
        skills: &["heal", "jab"],
        ai_behavior: AiBehavior::Mixed,
        resistances: NO_RESIST,
    },
    EnemyDef {
        id: "ember_wisp",
        name: "Ember Wisp",
        stats: EnemyStatBlock {
            max_hp: 115,
            max_mp: 25,
            attack: 22,
            defense: 9,
            speed: 10,
            gold_yield: 78,
            exp_yield: 59,
        },
        skills: &["ember"],
        ai_behavior: AiBehavior::Mixed,
        resistances: Resistances {
            fire: Some(Affinity::Resist),
            ice: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    EnemyDef {
        id: "storm_rider",
        name: "Storm Rider",
        stats: EnemyStatBlock {
            max_hp: 506,
            max_mp: 40,
            attack: 46,
            defense: 25,
            speed: 10,
            gold_yield: 500,
            exp_yield: 250,
        },
        skills: &["power_strike", "cleave"],
        ai_behavior: AiBehavior::Mixed,
        resistances: Resistances {
            ice: Some(Affinity::Weak),
            ..NO_RESIST
        },
    },
    // Ultra-evasive, absurdly rewarding, tries to leave. Defense so high
    // that basic hits land for the 1-damage floor.
    EnemyDef {
        id: "gilded_mimic",
        name: "Gilded Mimic",
        stats: EnemyStatBlock {
            max_hp: 35,
            max_mp: 50,
            attack: 10,
            defense: 999,
            speed: 200,
            gold_yield: 1050,
            exp_yield: 10_050,
        },
        skills: &["slip_away", "blizzard"],
        ai_behavior: AiBehavior::Defensive,
        resistances: Resistances {
            fire: Some(Affinity::Resist),
            ice: Some(Affinity::Resist),
            dark: Some(Affinity::Resist),
        },
    },
    EnemyDef {
        id: "demon_king",
        name: "Demon King",
        stats: EnemyStatBlock {
            max_hp: 843,
            max_mp: 100,
            attack: 54,
            defense: 34,
            speed: 15,
            gold_yield: 1000,
            exp_yield: 500,
        },
        skills: &["shadow_burst", "flame_wave", "blizzard", "cleave", "cataclysm"],
        ai_behavior: AiBehavior::Mixed,
        resistances: Resistances {
            fire: Some(Affinity::Resist),
            ice: Some(Affinity::Resist),
            dark: Some(Affinity::Resist),
        },
    },
];

/// Looks up an enemy definition by id.
pub fn enemy(id: &str) -> Option<&'static EnemyDef> {
    ALL_ENEMIES.iter().find(|e| e.id == id)
}

/// Whether one element lands weak, resisted, or neutral on this enemy.
pub fn affinity_for(resistances: &Resistances, element: Element) -> Option<Affinity> {
    match element {
        Element::Fire => resistances.fire,
        Element::Ice => resistances.ice,
        Element::Dark => resistances.dark,
    }
}
