//! The battle state machine.
//!
//! One `Battle` owns one encounter's enemy line-up and sequences
//! player turn → enemy turns (array order, halting the instant the player
//! falls) → effect ticks → outcome check. The caller owns the player and
//! submits actions; everything that happened comes back as result records.

use rand::Rng;

use crate::character::player::Player;
use crate::combat::effects::{tick_enemy_effects, tick_player_effects};
use crate::combat::resolver::{resolve_enemy_action, resolve_player_action};
use crate::combat::types::{ActionResult, Enemy, PlayerAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    EnemyTurn,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// All enemies down, player standing. Carries the summed yields.
    Victory { exp: u32, gold: u32 },
    Defeat,
}

#[derive(Debug, Clone)]
pub struct Battle {
    pub enemies: Vec<Enemy>,
    phase: BattlePhase,
    outcome: Option<BattleOutcome>,
}

impl Battle {
    pub fn new(enemies: Vec<Enemy>) -> Battle {
        Battle {
            enemies,
            phase: BattlePhase::PlayerTurn,
            outcome: None,
        }
    }

    /// Opening line for the log: "A Slime and a Giant Bat appear!"
    pub fn opening_message(&self) -> String {
        let names: Vec<&str> = self.enemies.iter().map(|e| e.name.as_str()).collect();
        format!("{} appear!", names.join(" and "))
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == BattlePhase::PlayerTurn
    }

    pub fn living_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// Resolves the player's action for this turn.
    ///
    /// If every enemy falls, the battle finishes in victory immediately;
    /// no enemy phase and no effect tick for that round. Otherwise the
    /// battle moves to the enemy phase; call `advance_enemy_phase` next.
    pub fn submit_player_action(
        &mut self,
        player: &mut Player,
        target_index: Option<usize>,
        action: &PlayerAction,
        rng: &mut impl Rng,
    ) -> Vec<ActionResult> {
        if self.phase != BattlePhase::PlayerTurn {
            return vec![ActionResult::note("It is not your turn.")];
        }

        let results = resolve_player_action(player, &mut self.enemies, target_index, action, rng);

        if self.living_enemies() == 0 && player.is_alive() {
            self.finish_with_victory();
        } else {
            self.phase = BattlePhase::EnemyTurn;
        }
        results
    }

    /// Runs every living enemy's turn in array order, then the effect
    /// ticks, then the outcome check.
    ///
    /// The loss check fires after each individual enemy action: if an
    /// enemy brings the player to 0 HP, the rest of the line never acts.
    pub fn advance_enemy_phase(
        &mut self,
        player: &mut Player,
        rng: &mut impl Rng,
    ) -> Vec<ActionResult> {
        if self.phase != BattlePhase::EnemyTurn {
            return Vec::new();
        }

        let mut results = Vec::new();
        for i in 0..self.enemies.len() {
            if !self.enemies[i].is_alive() {
                continue;
            }
            results.extend(resolve_enemy_action(&mut self.enemies[i], player, rng));
            if !player.is_alive() {
                break;
            }
        }

        // Effects tick once per full round: the player's buffs first, then
        // each living enemy's debuffs.
        for message in tick_player_effects(player) {
            results.push(ActionResult::note(message));
        }
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            for message in tick_enemy_effects(enemy) {
                results.push(ActionResult::note(message));
            }
        }

        if !player.is_alive() {
            self.phase = BattlePhase::Finished;
            self.outcome = Some(BattleOutcome::Defeat);
            results.push(ActionResult::note(format!(
                "{} has fallen...",
                player.name
            )));
            tracing::debug!("battle lost");
        } else if self.living_enemies() == 0 {
            self.finish_with_victory();
        } else {
            self.phase = BattlePhase::PlayerTurn;
        }

        results
    }

    fn finish_with_victory(&mut self) {
        let exp = self.enemies.iter().map(|e| e.exp_yield).sum();
        let gold = self.enemies.iter().map(|e| e.gold_yield).sum();
        self.phase = BattlePhase::Finished;
        self.outcome = Some(BattleOutcome::Victory { exp, gold });
        tracing::debug!(exp, gold, "battle won");
    }
}
