//! Battle orchestration, region runs, progression, and tuning constants.

pub mod balance;
pub mod battle;
pub mod progression;
pub mod run;

pub use battle::{Battle, BattleOutcome, BattlePhase};
pub use progression::{
    can_enter_region, check_level_up, collect_wisdom, finish_run, revive, EntryRefusal,
    RegionProgress, RegionState, RunEnd, RunSummary,
};
pub use run::{draw_reward_cards, RegionRun, RewardCard};
