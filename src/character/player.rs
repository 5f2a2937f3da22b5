//! The player: persistent progression plus the run-scoped, battle-visible
//! pieces (temporary skills/boosts, active buffs, once-per-battle list).
//!
//! Collections carry `#[serde(default)]` so a save written by an older
//! build (or a hand-rolled password) always hydrates them as empty rather
//! than failing.

use serde::{Deserialize, Serialize};

use uuid::Uuid;

use crate::combat::types::{AppliedBuff, BuffKind};
use crate::content::{self, ItemKind, Skill};
use crate::core::balance::{STARTING_GOLD, STARTING_SKILL_IDS, STARTING_STATS};
use crate::character::stats::{effective_stats, StatBlock};
use crate::items::types::{Equipment, EquipmentSlot, ItemInstance};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub gold: u32,

    pub base_stats: StatBlock,
    pub current_hp: i32,
    pub current_mp: i32,

    pub equipment: Equipment,
    pub inventory: Vec<ItemInstance>,
    pub persistent_skills: Vec<String>,

    #[serde(default)]
    pub collected_wisdom_ids: Vec<String>,
    #[serde(default)]
    pub temporary_skills: Vec<String>,
    #[serde(default)]
    pub temporary_boosts: StatBlock,
    #[serde(default)]
    pub active_buffs: Vec<AppliedBuff>,
    #[serde(default)]
    pub used_once_per_battle: Vec<String>,
}

impl Player {
    /// A fresh level-1 hero with starter gear and two tonics.
    pub fn new(name: &str) -> Player {
        let mut inventory = Vec::new();
        for _ in 0..2 {
            if let Some(tonic) = ItemInstance::create("tonic") {
                inventory.push(tonic);
            }
        }
        let equipment = Equipment {
            weapon: ItemInstance::create("oak_sword"),
            armor: ItemInstance::create("leather_armor"),
            shield: ItemInstance::create("buckler"),
        };

        let mut player = Player {
            name: name.to_string(),
            level: 1,
            experience: 0,
            gold: STARTING_GOLD,
            base_stats: STARTING_STATS,
            current_hp: 0,
            current_mp: 0,
            equipment,
            inventory,
            persistent_skills: STARTING_SKILL_IDS.iter().map(|s| s.to_string()).collect(),
            collected_wisdom_ids: Vec::new(),
            temporary_skills: Vec::new(),
            temporary_boosts: StatBlock::ZERO,
            active_buffs: Vec::new(),
            used_once_per_battle: Vec::new(),
        };
        let eff = effective_stats(&player);
        player.current_hp = eff.max_hp;
        player.current_mp = eff.max_mp;
        player
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Every skill the player can currently use: learned plus run-scoped.
    pub fn known_skills(&self) -> Vec<&'static Skill> {
        self.persistent_skills
            .iter()
            .chain(self.temporary_skills.iter())
            .filter_map(|id| content::skill(id))
            .collect()
    }

    pub fn knows_skill(&self, id: &str) -> bool {
        self.persistent_skills.iter().any(|s| s == id)
            || self.temporary_skills.iter().any(|s| s == id)
    }

    pub fn buff(&self, kind: BuffKind) -> Option<&AppliedBuff> {
        self.active_buffs.iter().find(|b| b.kind == kind)
    }

    /// Replaces any active buff of the same kind. Effects never stack.
    pub fn apply_buff(&mut self, buff: AppliedBuff) {
        self.active_buffs.retain(|b| b.kind != buff.kind);
        self.active_buffs.push(buff);
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|i| i.item_id == item_id)
    }

    /// Clamps current HP/MP into the effective maxima. Called after
    /// anything that can shrink the maxima (unequip, boost expiry).
    pub fn clamp_to_effective(&mut self) {
        let eff = effective_stats(self);
        self.current_hp = self.current_hp.clamp(0, eff.max_hp);
        self.current_mp = self.current_mp.clamp(0, eff.max_mp);
    }

    /// Moves an equippable inventory item into its slot, returning any
    /// displaced piece to the inventory. A raised maximum grants the
    /// difference immediately; a lowered one clamps.
    pub fn equip_from_inventory(&mut self, instance_id: Uuid) -> bool {
        let Some(index) = self
            .inventory
            .iter()
            .position(|i| i.instance_id == instance_id)
        else {
            return false;
        };
        let slot = match self.inventory[index].def().map(|d| d.kind) {
            Some(ItemKind::Weapon) => EquipmentSlot::Weapon,
            Some(ItemKind::Armor) => EquipmentSlot::Armor,
            Some(ItemKind::Shield) => EquipmentSlot::Shield,
            _ => return false,
        };

        let old_eff = effective_stats(self);
        let item = self.inventory.remove(index);
        if let Some(displaced) = self.equipment.set(slot, Some(item)) {
            self.inventory.push(displaced);
        }
        let new_eff = effective_stats(self);
        if new_eff.max_hp > old_eff.max_hp {
            self.current_hp += new_eff.max_hp - old_eff.max_hp;
        }
        if new_eff.max_mp > old_eff.max_mp {
            self.current_mp += new_eff.max_mp - old_eff.max_mp;
        }
        self.clamp_to_effective();
        true
    }

    /// Empties a slot back into the inventory.
    pub fn unequip(&mut self, slot: EquipmentSlot) {
        if let Some(item) = self.equipment.set(slot, None) {
            self.inventory.push(item);
            self.clamp_to_effective();
        }
    }
}
