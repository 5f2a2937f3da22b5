//! Battle-time machinery: live combatant types, the action resolver, and
//! the status effect tracker.

pub mod effects;
pub mod resolver;
pub mod types;

pub use effects::{tick_enemy_effects, tick_player_effects};
pub use resolver::{resolve_enemy_action, resolve_player_action};
pub use types::{
    ActionResult, AiBehavior, AppliedBuff, AppliedDebuff, BuffKind, DebuffKind, Enemy,
    PlayerAction, Resistances,
};
