//! Item instances, equipment slots, and forging.

pub mod enhancement;
pub mod types;

pub use enhancement::{enhance, EnhanceError};
pub use types::{Equipment, EquipmentSlot, ItemInstance};
