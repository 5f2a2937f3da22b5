//! Owned item instances and the player's equipment slots.
//!
//! Content definitions stay in `content::items`; an `ItemInstance` is one
//! owned copy with its own identity and enhancement level. Two instances
//! of the same base item are distinct objects (only one gets forged).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{self, ItemDef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub item_id: String,
    pub instance_id: Uuid,
    #[serde(default)]
    pub enhancement_level: u8,
}

impl ItemInstance {
    /// Creates a fresh instance of a content item. Returns `None` for an
    /// unknown id; content-integrity errors never panic.
    pub fn create(item_id: &str) -> Option<ItemInstance> {
        content::item(item_id)?;
        Some(ItemInstance {
            item_id: item_id.to_string(),
            instance_id: Uuid::new_v4(),
            enhancement_level: 0,
        })
    }

    pub fn def(&self) -> Option<&'static ItemDef> {
        content::item(&self.item_id)
    }

    pub fn is_equippable(&self) -> bool {
        self.def().map(|d| d.kind.is_equippable()).unwrap_or(false)
    }

    /// Display name with the enhancement suffix ("Oak Sword+3").
    pub fn display_name(&self) -> String {
        let base = self.def().map(|d| d.name).unwrap_or("???");
        if self.enhancement_level > 0 {
            format!("{}+{}", base, self.enhancement_level)
        } else {
            base.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Shield,
}

/// The three equipment slots. Empty slots are simply `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<ItemInstance>,
    #[serde(default)]
    pub armor: Option<ItemInstance>,
    #[serde(default)]
    pub shield: Option<ItemInstance>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&ItemInstance> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
            EquipmentSlot::Shield => self.shield.as_ref(),
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<ItemInstance>) -> Option<ItemInstance> {
        let slot_ref = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Shield => &mut self.shield,
        };
        std::mem::replace(slot_ref, item)
    }

    /// Iterates whatever is currently equipped.
    pub fn equipped(&self) -> impl Iterator<Item = &ItemInstance> {
        self.weapon
            .iter()
            .chain(self.armor.iter())
            .chain(self.shield.iter())
    }

    pub fn clear(&mut self) {
        self.weapon = None;
        self.armor = None;
        self.shield = None;
    }
}
