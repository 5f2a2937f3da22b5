//! Combat-facing types: live enemies, status effect records, actions, and
//! the result records every resolution returns.

use serde::{Deserialize, Serialize};

use crate::content::enemies::{Affinity, EnemyDef};
use crate::items::types::ItemInstance;

/// Timed effects on the player. At most one of each kind is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    AttackUp,
    DefenseUp,
    EvadeAll,
    SelfStun,
    HpRegeneration,
}

impl BuffKind {
    /// Reader-facing label used in expiry messages where the skill name is
    /// not the natural one.
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            BuffKind::HpRegeneration => Some("Regeneration"),
            BuffKind::SelfStun => Some("Fatigue"),
            BuffKind::EvadeAll => Some("Evasion"),
            _ => None,
        }
    }
}

/// Timed effects on enemies. Same single-instance-per-kind rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebuffKind {
    AccuracyDown,
    DefenseDown,
    Stun,
}

impl DebuffKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DebuffKind::AccuracyDown => "Blind",
            DebuffKind::DefenseDown => "Armor Break",
            DebuffKind::Stun => "Stun",
        }
    }
}

/// One active buff on the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedBuff {
    pub skill_id: String,
    pub kind: BuffKind,
    pub remaining_turns: u32,
    /// Boost amount or multiplier, by kind; informational for stat boosts
    /// (the stat model reads the source skill's definition).
    #[serde(default)]
    pub value: f64,
    /// Regeneration: flat HP per turn, precomputed at cast time...
    #[serde(default)]
    pub hp_per_turn: i32,
    /// ...unless this flag is set, in which case `value` holds a fraction
    /// of effective max HP evaluated on each tick.
    #[serde(default)]
    pub regen_is_percent: bool,
}

/// One active debuff on an enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDebuff {
    pub skill_id: String,
    pub kind: DebuffKind,
    pub remaining_turns: u32,
    /// Miss probability (AccuracyDown) or flat defense loss (DefenseDown).
    #[serde(default)]
    pub value: f64,
}

/// Action-selection flavor declared per enemy. Carried as data; turn logic
/// deliberately does not read it (the skill/attack split stays fixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiBehavior {
    Aggressive,
    Defensive,
    Mixed,
}

/// Elemental weak/resist marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resistances {
    #[serde(default)]
    pub fire: Option<Affinity>,
    #[serde(default)]
    pub ice: Option<Affinity>,
    #[serde(default)]
    pub dark: Option<Affinity>,
}

/// A live enemy in one encounter. The stat fields double as base and
/// current values; only HP and MP move during battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub max_hp: i32,
    pub current_hp: i32,
    pub max_mp: i32,
    pub current_mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub gold_yield: u32,
    pub exp_yield: u32,
    pub skills: Vec<String>,
    pub ai_behavior: AiBehavior,
    #[serde(default)]
    pub resistances: Resistances,
    #[serde(default)]
    pub active_debuffs: Vec<AppliedDebuff>,
}

impl Enemy {
    /// Spawns a live combatant from a content template, at full HP/MP with
    /// no debuffs.
    pub fn spawn(def: &EnemyDef) -> Enemy {
        Enemy {
            id: def.id.to_string(),
            name: def.name.to_string(),
            max_hp: def.stats.max_hp,
            current_hp: def.stats.max_hp,
            max_mp: def.stats.max_mp,
            current_mp: def.stats.max_mp,
            attack: def.stats.attack,
            defense: def.stats.defense,
            speed: def.stats.speed,
            gold_yield: def.stats.gold_yield,
            exp_yield: def.stats.exp_yield,
            skills: def.skills.iter().map(|s| s.to_string()).collect(),
            ai_behavior: def.ai_behavior,
            resistances: def.resistances,
            active_debuffs: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Applies damage, flooring HP at zero. Returns the amount applied.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        self.current_hp = (self.current_hp - amount).max(0);
        amount
    }

    pub fn debuff(&self, kind: DebuffKind) -> Option<&AppliedDebuff> {
        self.active_debuffs.iter().find(|d| d.kind == kind)
    }
}

/// What the player is trying to do this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Skill(String),
    Item(String),
}

/// One discrete thing that happened during resolution. A single action can
/// produce several of these (multi-hit attacks, all-enemy spells, drains).
#[derive(Debug, Clone, Default)]
pub struct ActionResult {
    pub message: String,
    pub damage_dealt: Option<i32>,
    pub health_restored: Option<i32>,
    /// MP spent; negative values are MP restored.
    pub mp_used: Option<i32>,
    pub crit: bool,
    pub buff_applied: Option<AppliedBuff>,
    pub debuff_applied: Option<AppliedDebuff>,
    pub item_found: Option<ItemInstance>,
    pub item_stolen: Option<ItemInstance>,
}

impl ActionResult {
    /// A log-only result; the usual shape for guard-clause outcomes.
    pub fn note(message: impl Into<String>) -> ActionResult {
        ActionResult {
            message: message.into(),
            ..ActionResult::default()
        }
    }
}
