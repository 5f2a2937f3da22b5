//! Equipment forging: merge two copies of the same equipment to raise one
//! of them a level. The material copy is consumed. Levels cap at +10; the
//! per-level stat contribution lives in the stat pipeline.

use uuid::Uuid;

use crate::character::player::Player;
use crate::core::balance::MAX_ENHANCEMENT_LEVEL;
use crate::items::types::ItemInstance;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnhanceError {
    #[error("base or material equipment not found")]
    NotFound,
    #[error("both pieces must be the same equipment")]
    Mismatched,
    #[error("this kind of item cannot be enhanced")]
    NotEquipment,
    #[error("already enhanced to the maximum")]
    AtMaximum,
}

/// Where the base piece was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseLocation {
    Equipped,
    Inventory(usize),
}

/// Raises `base` one enhancement level by consuming `material` from the
/// inventory. The base may be equipped or in the inventory; the material
/// must be a distinct inventory instance with the same item id.
pub fn enhance(
    player: &mut Player,
    base: Uuid,
    material: Uuid,
) -> Result<u8, EnhanceError> {
    if base == material {
        return Err(EnhanceError::Mismatched);
    }
    let material_index = player
        .inventory
        .iter()
        .position(|i| i.instance_id == material)
        .ok_or(EnhanceError::NotFound)?;
    let material_item = player.inventory[material_index].clone();

    let (location, base_item) = find_base(player, base).ok_or(EnhanceError::NotFound)?;

    if base_item.item_id != material_item.item_id {
        return Err(EnhanceError::Mismatched);
    }
    if !base_item.is_equippable() {
        return Err(EnhanceError::NotEquipment);
    }
    if base_item.enhancement_level >= MAX_ENHANCEMENT_LEVEL {
        return Err(EnhanceError::AtMaximum);
    }

    let new_level = base_item.enhancement_level + 1;
    match location {
        BaseLocation::Equipped => {
            for slot in [
                &mut player.equipment.weapon,
                &mut player.equipment.armor,
                &mut player.equipment.shield,
            ] {
                if let Some(item) = slot {
                    if item.instance_id == base {
                        item.enhancement_level = new_level;
                    }
                }
            }
        }
        BaseLocation::Inventory(index) => {
            player.inventory[index].enhancement_level = new_level;
        }
    }
    player.inventory.remove(material_index);
    Ok(new_level)
}

fn find_base(player: &Player, base: Uuid) -> Option<(BaseLocation, ItemInstance)> {
    for slot in [
        player.equipment.weapon.as_ref(),
        player.equipment.armor.as_ref(),
        player.equipment.shield.as_ref(),
    ]
    .into_iter()
    .flatten()
    {
        if slot.instance_id == base {
            return Some((BaseLocation::Equipped, slot.clone()));
        }
    }
    player
        .inventory
        .iter()
        .position(|i| i.instance_id == base)
        .map(|index| (BaseLocation::Inventory(index), player.inventory[index].clone()))
}
