//! Minisaga - turn-based JRPG combat core.
//!
//! The battle resolution engine of a narrative JRPG: the effective-stat
//! pipeline, the status effect tracker, the action resolver, and the
//! battle/run state machines, plus the persistence ports (checksummed
//! save file and portable "password" blobs). Presentation, audio, and
//! pacing are deliberately not here; they consume the result records
//! these modules return.

pub mod character;
pub mod combat;
pub mod content;
pub mod core;
pub mod items;
pub mod save;
pub mod simulator;

pub use crate::character::{
    effective_stats, enemy_effective_stats, EffectiveStats, Player, StatBlock,
};
pub use crate::combat::{ActionResult, Enemy, PlayerAction};
pub use crate::core::{Battle, BattleOutcome, RegionProgress, RegionRun, RunEnd};
pub use crate::save::{DeflatePasswordCodec, FileSaveStore, PasswordCodec, SaveData, SaveStore};
