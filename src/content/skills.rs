//! Skill definitions.
//!
//! Skills are immutable content, referenced everywhere by id. The battle
//! resolver reads these definitions to decide what an action does; nothing
//! in here is ever mutated at runtime.

use crate::character::stats::StatBoost;
use crate::combat::types::DebuffKind;

/// Broad category driving the resolver's damage/heal/buff branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    Attack,
    Magic,
    Heal,
    Buff,
    Defend,
}

/// Who a skill can be aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    SelfOnly,
    SingleEnemy,
    AllEnemies,
}

/// Elemental damage types for the weak/resist table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Element {
    Fire,
    Ice,
    Dark,
}

impl Element {
    pub fn display_name(&self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Ice => "ice",
            Element::Dark => "dark",
        }
    }
}

/// A debuff a skill may inflict on its target, rolled independently.
#[derive(Debug, Clone, Copy)]
pub struct SkillDebuff {
    pub kind: DebuffKind,
    pub chance: f64,
    pub duration: u32,
    /// Accuracy reduction fraction or flat defense reduction, by kind.
    pub value: f64,
}

/// A chance to conjure a specific item on cast.
#[derive(Debug, Clone, Copy)]
pub struct ItemFind {
    pub item_id: &'static str,
    pub chance: f64,
}

/// A chance to steal one item out of a pool on cast.
#[derive(Debug, Clone, Copy)]
pub struct ItemSteal {
    pub pool: &'static [&'static str],
    pub chance: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Skill {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: SkillKind,
    pub description: &'static str,
    pub mp_cost: i32,
    /// Attack skills: multiplier on effective attack. Magic skills: base damage.
    pub power: f64,
    pub heal_amount: i32,
    pub stat_boost: Option<StatBoost>,
    /// The guard skill stores its defense entry as a multiplier rather than
    /// an additive amount; the stat model must honor this flag.
    pub defense_is_multiplier: bool,
    pub target: TargetKind,
    pub duration: u32,
    /// Level at which the player learns this skill automatically (0 = never).
    pub unlock_level: u32,
    pub element: Option<Element>,
    /// Fraction of damage dealt returned as healing (0.0 = no drain).
    pub drain_factor: f64,
    pub debuffs_to_target: &'static [SkillDebuff],
    /// Turns of self-stun after use (felt starting the following turn).
    pub self_stun_turns: u32,
    /// Turns of full evasion granted to the caster.
    pub self_evade_turns: u32,
    pub item_find: Option<ItemFind>,
    pub item_steal: Option<ItemSteal>,
    /// HP fraction at or below which the conditional restore triggers.
    pub conditional_hp_threshold: f64,
    /// Fraction of max HP restored when the condition triggers.
    pub target_hp_percentage_restore: f64,
    /// Fraction of max HP regenerated per turn while the regen buff holds.
    pub hp_regen_per_turn_percent: f64,
    pub regen_duration: u32,
    pub full_hp_restore: bool,
    pub full_mp_restore: bool,
    pub once_per_battle: bool,
}

const BASE: Skill = Skill {
    id: "",
    name: "",
    kind: SkillKind::Attack,
    description: "",
    mp_cost: 0,
    power: 0.0,
    heal_amount: 0,
    stat_boost: None,
    defense_is_multiplier: false,
    target: TargetKind::SingleEnemy,
    duration: 0,
    unlock_level: 0,
    element: None,
    drain_factor: 0.0,
    debuffs_to_target: &[],
    self_stun_turns: 0,
    self_evade_turns: 0,
    item_find: None,
    item_steal: None,
    conditional_hp_threshold: 0.0,
    target_hp_percentage_restore: 0.0,
    hp_regen_per_turn_percent: 0.0,
    regen_duration: 0,
    full_hp_restore: false,
    full_mp_restore: false,
    once_per_battle: false,
};

pub static ALL_SKILLS: &[Skill] = &[
    Skill {
        id: "power_strike",
        name: "Power Strike",
        kind: SkillKind::Attack,
        description: "A heavy physical blow.",
        mp_cost: 2,
        power: 1.5,
        unlock_level: 1,
        ..BASE
    },
    Skill {
        id: "guard",
        name: "Guard",
        kind: SkillKind::Defend,
        description: "Brace for one turn, greatly raising defense.",
        mp_cost: 1,
        stat_boost: Some(StatBoost {
            defense: 1.5,
            ..StatBoost::ZERO
        }),
        defense_is_multiplier: true,
        duration: 1,
        target: TargetKind::SelfOnly,
        unlock_level: 2,
        ..BASE
    },
    Skill {
        id: "cleave",
        name: "Cleave",
        kind: SkillKind::Attack,
        description: "A sweeping blow that strikes every foe.",
        mp_cost: 4,
        power: 0.8,
        target: TargetKind::AllEnemies,
        unlock_level: 5,
        ..BASE
    },
    Skill {
        id: "ember",
        name: "Ember",
        kind: SkillKind::Magic,
        description: "Hurls a small ball of flame.",
        mp_cost: 3,
        power: 18.0,
        element: Some(Element::Fire),
        unlock_level: 1,
        ..BASE
    },
    Skill {
        id: "frost_lance",
        name: "Frost Lance",
        kind: SkillKind::Magic,
        description: "Impales a foe on a spike of ice.",
        mp_cost: 5,
        power: 28.0,
        element: Some(Element::Ice),
        unlock_level: 4,
        ..BASE
    },
    Skill {
        id: "flame_wave",
        name: "Flame Wave",
        kind: SkillKind::Magic,
        description: "A rolling wave of fire.",
        mp_cost: 6,
        power: 35.0,
        element: Some(Element::Fire),
        unlock_level: 7,
        ..BASE
    },
    Skill {
        id: "blizzard",
        name: "Blizzard",
        kind: SkillKind::Magic,
        description: "A storm of ice that batters every foe.",
        mp_cost: 9,
        power: 25.0,
        element: Some(Element::Ice),
        target: TargetKind::AllEnemies,
        unlock_level: 10,
        ..BASE
    },
    Skill {
        id: "shadow_burst",
        name: "Shadow Burst",
        kind: SkillKind::Magic,
        description: "A violent eruption of darkness.",
        mp_cost: 10,
        power: 60.0,
        element: Some(Element::Dark),
        unlock_level: 12,
        ..BASE
    },
    Skill {
        id: "inferno",
        name: "Inferno",
        kind: SkillKind::Magic,
        description: "Engulfs a foe in a towering blaze.",
        mp_cost: 12,
        power: 80.0,
        element: Some(Element::Fire),
        unlock_level: 14,
        ..BASE
    },
    Skill {
        id: "drain_slash",
        name: "Drain Slash",
        kind: SkillKind::Attack,
        description: "A cut that siphons part of the damage dealt as HP.",
        mp_cost: 6,
        power: 1.3,
        drain_factor: 0.5,
        unlock_level: 9,
        ..BASE
    },
    Skill {
        id: "heal",
        name: "Heal",
        kind: SkillKind::Heal,
        description: "Restores a little HP.",
        mp_cost: 4,
        heal_amount: 25,
        target: TargetKind::SelfOnly,
        unlock_level: 1,
        ..BASE
    },
    Skill {
        id: "greater_heal",
        name: "Greater Heal",
        kind: SkillKind::Heal,
        description: "Restores a fair amount of HP.",
        mp_cost: 7,
        heal_amount: 60,
        target: TargetKind::SelfOnly,
        unlock_level: 5,
        ..BASE
    },
    Skill {
        id: "jab",
        name: "Jab",
        kind: SkillKind::Attack,
        description: "A weak physical poke.",
        mp_cost: 0,
        power: 0.8,
        unlock_level: 1,
        ..BASE
    },
    Skill {
        id: "war_cry",
        name: "War Cry",
        kind: SkillKind::Buff,
        description: "A rallying shout that raises attack.",
        mp_cost: 3,
        stat_boost: Some(StatBoost {
            attack: 5.0,
            ..StatBoost::ZERO
        }),
        duration: 3,
        target: TargetKind::SelfOnly,
        unlock_level: 3,
        ..BASE
    },
    // Enemy-only: too expensive for the player to ever unlock.
    Skill {
        id: "cataclysm",
        name: "Cataclysm",
        kind: SkillKind::Magic,
        description: "An annihilating blast of darkness.",
        mp_cost: 20,
        power: 45.0,
        element: Some(Element::Dark),
        target: TargetKind::AllEnemies,
        unlock_level: 99,
        ..BASE
    },
    // The gilded mimic's signature move. Resolves as a wasted turn.
    Skill {
        id: "slip_away",
        name: "Slip Away",
        kind: SkillKind::Defend,
        description: "Tries to wriggle out of the fight.",
        mp_cost: 0,
        target: TargetKind::SelfOnly,
        unlock_level: 1,
        ..BASE
    },
    Skill {
        id: "piercing_shout",
        name: "Piercing Shout",
        kind: SkillKind::Magic,
        description: "A clear, ringing shout; may leave the target reeling.",
        mp_cost: 6,
        power: 20.0,
        unlock_level: 4,
        debuffs_to_target: &[SkillDebuff {
            kind: DebuffKind::Stun,
            chance: 0.3,
            duration: 1,
            value: 0.0,
        }],
        ..BASE
    },
    Skill {
        id: "blinding_flash",
        name: "Blinding Flash",
        kind: SkillKind::Magic,
        description: "A burst of light that can leave every foe half-blind.",
        mp_cost: 8,
        power: 10.0,
        target: TargetKind::AllEnemies,
        unlock_level: 7,
        debuffs_to_target: &[SkillDebuff {
            kind: DebuffKind::AccuracyDown,
            chance: 0.4,
            duration: 2,
            value: 0.25,
        }],
        ..BASE
    },
    Skill {
        id: "iron_bulwark",
        name: "Iron Bulwark",
        kind: SkillKind::Buff,
        description: "Raises a steady guard for several turns.",
        mp_cost: 4,
        stat_boost: Some(StatBoost {
            defense: 8.0,
            ..StatBoost::ZERO
        }),
        duration: 3,
        target: TargetKind::SelfOnly,
        unlock_level: 6,
        ..BASE
    },
    Skill {
        id: "vanish_step",
        name: "Vanish Step",
        kind: SkillKind::Buff,
        description: "Sidesteps every enemy action for one turn.",
        mp_cost: 5,
        target: TargetKind::SelfOnly,
        unlock_level: 9,
        self_evade_turns: 1,
        ..BASE
    },
    Skill {
        id: "mending_song",
        name: "Mending Song",
        kind: SkillKind::Buff,
        description: "A soothing melody; HP trickles back for three turns.",
        mp_cost: 7,
        target: TargetKind::SelfOnly,
        unlock_level: 8,
        hp_regen_per_turn_percent: 0.08,
        regen_duration: 3,
        ..BASE
    },
    Skill {
        id: "fortune_prayer",
        name: "Fortune Prayer",
        kind: SkillKind::Heal,
        description: "A hopeful prayer; restores HP and sometimes turns up a lottery ticket.",
        mp_cost: 12,
        heal_amount: 30,
        target: TargetKind::SelfOnly,
        unlock_level: 11,
        item_find: Some(ItemFind {
            item_id: "lottery_ticket",
            chance: 0.1,
        }),
        ..BASE
    },
    Skill {
        id: "second_wind",
        name: "Second Wind",
        kind: SkillKind::Heal,
        description: "At 25% HP or less, restores 70% of max HP; otherwise barely helps.",
        mp_cost: 10,
        heal_amount: 10,
        target: TargetKind::SelfOnly,
        unlock_level: 13,
        conditional_hp_threshold: 0.25,
        target_hp_percentage_restore: 0.70,
        ..BASE
    },
    Skill {
        id: "plunder_rush",
        name: "Plunder Rush",
        kind: SkillKind::Attack,
        description: "Rips at a foe's gear; may weaken its guard or pocket something.",
        mp_cost: 7,
        power: 0.5,
        unlock_level: 14,
        debuffs_to_target: &[SkillDebuff {
            kind: DebuffKind::DefenseDown,
            chance: 0.5,
            duration: 3,
            value: 5.0,
        }],
        item_steal: Some(ItemSteal {
            pool: &["tonic", "ether"],
            chance: 0.2,
        }),
        ..BASE
    },
    Skill {
        id: "reckless_rush",
        name: "Reckless Rush",
        kind: SkillKind::Attack,
        description: "An all-out assault at 2.5x power; the next turn is lost to exhaustion.",
        mp_cost: 15,
        power: 2.5,
        unlock_level: 18,
        self_stun_turns: 1,
        ..BASE
    },
    Skill {
        id: "soul_reap",
        name: "Soul Reap",
        kind: SkillKind::Magic,
        description: "A scythe of darkness over every foe; half the harm returns as HP.",
        mp_cost: 14,
        power: 10.0,
        element: Some(Element::Dark),
        target: TargetKind::AllEnemies,
        unlock_level: 16,
        drain_factor: 0.5,
        ..BASE
    },
    Skill {
        id: "last_stand",
        name: "Last Stand",
        kind: SkillKind::Heal,
        description: "Fully restores HP and MP. Once per battle.",
        mp_cost: 25,
        target: TargetKind::SelfOnly,
        unlock_level: 18,
        full_hp_restore: true,
        full_mp_restore: true,
        once_per_battle: true,
        ..BASE
    },
];

/// Looks up a skill by id.
pub fn skill(id: &str) -> Option<&'static Skill> {
    ALL_SKILLS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_lookup() {
        assert_eq!(skill("power_strike").unwrap().name, "Power Strike");
        assert!(skill("no_such_skill").is_none());
    }

    #[test]
    fn test_skill_ids_unique() {
        for (i, a) in ALL_SKILLS.iter().enumerate() {
            for b in &ALL_SKILLS[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate skill id {}", a.id);
            }
        }
    }

    #[test]
    fn test_guard_is_defense_multiplier() {
        let guard = skill("guard").unwrap();
        assert!(guard.defense_is_multiplier);
        assert_eq!(guard.stat_boost.unwrap().defense, 1.5);
        assert_eq!(guard.duration, 1);
    }

    #[test]
    fn test_last_stand_shape() {
        let s = skill("last_stand").unwrap();
        assert!(s.full_hp_restore && s.full_mp_restore && s.once_per_battle);
    }
}
