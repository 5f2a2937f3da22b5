//! Headless game driver.
//!
//! Plays whole games through the real battle machinery with a simple
//! policy: heal when hurt, otherwise hit hard. Used for balance checks;
//! no rendering, no pacing delays.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::SimConfig;
use super::report::{GameStats, SimReport};
use crate::character::player::Player;
use crate::character::stats::effective_stats;
use crate::combat::types::PlayerAction;
use crate::content;
use crate::content::regions::ALL_REGIONS;
use crate::core::battle::{Battle, BattleOutcome};
use crate::core::progression::{can_enter_region, finish_run, RegionProgress, RunEnd};
use crate::core::run::{draw_reward_cards, RegionRun};

/// Runs the full simulation and aggregates a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut games = Vec::with_capacity(config.num_games as usize);
    for game_idx in 0..config.num_games {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(game_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };
        let stats = simulate_game(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Game {}/{} - completed: {}, level {}, runs {}, battles {}W/{}L",
                game_idx + 1,
                config.num_games,
                stats.completed,
                stats.final_level,
                stats.runs_attempted,
                stats.battles_won,
                stats.battles_lost,
            );
        }
        games.push(stats);
    }
    SimReport::from_games(games)
}

fn simulate_game(config: &SimConfig, rng: &mut impl Rng) -> GameStats {
    let mut player = Player::new("Sim Hero");
    let mut progress = RegionProgress::new();
    let mut stats = GameStats::default();

    for _ in 0..config.max_runs_per_game {
        let Some(region_id) = pick_region(&player, &progress) else {
            break;
        };
        stats.runs_attempted += 1;

        let Some(mut run) = RegionRun::begin(&player, region_id) else {
            break;
        };

        let end = play_run(config, &mut run, rng, &mut stats);
        let summary = finish_run(&mut player, &mut progress, &run, end, rng);
        if summary.game_completed {
            stats.completed = true;
            break;
        }
        if end == RunEnd::Defeated {
            crate::core::progression::revive(&mut player);
        }
    }

    stats.final_level = player.level;
    stats.final_gold = player.gold;
    stats
}

/// The furthest open region that is not yet cleared; falls back to the
/// last cleared region to grind when everything ahead is gated.
fn pick_region(player: &Player, progress: &RegionProgress) -> Option<&'static str> {
    let mut grind_fallback = None;
    for region in ALL_REGIONS.iter().rev() {
        if can_enter_region(player, progress, region.id).is_ok() {
            if !progress.is_cleared(region.id) {
                return Some(region.id);
            }
            if grind_fallback.is_none() {
                grind_fallback = Some(region.id);
            }
        }
    }
    grind_fallback
}

fn play_run(
    config: &SimConfig,
    run: &mut RegionRun,
    rng: &mut impl Rng,
    stats: &mut GameStats,
) -> RunEnd {
    loop {
        if run.is_cleared() {
            return RunEnd::Cleared;
        }
        if run.boss_gate().is_some() {
            // Underleveled for the boss: bank what we have and grind.
            return RunEnd::Fled;
        }
        let Some(enemies) = run.next_encounter(rng) else {
            return RunEnd::Cleared;
        };
        if enemies.is_empty() {
            return RunEnd::Fled;
        }

        let mut battle = Battle::new(enemies);
        let mut rounds = 0;
        let outcome = loop {
            if let Some(outcome) = battle.outcome() {
                break outcome;
            }
            rounds += 1;
            if rounds > config.max_rounds_per_battle {
                stats.stalled_battles += 1;
                return RunEnd::Fled;
            }

            let (target, action) = choose_action(&run.player, &battle);
            battle.submit_player_action(&mut run.player, target, &action, rng);
            if battle.outcome().is_none() {
                battle.advance_enemy_phase(&mut run.player, rng);
            }
        };

        match outcome {
            BattleOutcome::Victory { exp, gold } => {
                stats.battles_won += 1;
                run.record_victory(exp, gold);
                if !run.is_cleared() {
                    // Take whatever card comes up first.
                    if let Some(card) = draw_reward_cards(&run.player, 3, rng).into_iter().next() {
                        run.apply_reward_card(&card);
                    }
                }
            }
            BattleOutcome::Defeat => {
                stats.battles_lost += 1;
                return RunEnd::Defeated;
            }
        }
    }
}

/// Heal when below 35% HP, otherwise the strongest affordable offensive
/// skill, otherwise a plain attack on the first living enemy.
fn choose_action(player: &Player, battle: &Battle) -> (Option<usize>, PlayerAction) {
    let eff = effective_stats(player);
    let first_living = battle.enemies.iter().position(|e| e.is_alive());

    if (player.current_hp as f64) < eff.max_hp as f64 * 0.35 {
        let heal = player
            .known_skills()
            .into_iter()
            .filter(|s| s.kind == content::SkillKind::Heal && s.mp_cost <= player.current_mp)
            .filter(|s| {
                !s.once_per_battle || !player.used_once_per_battle.iter().any(|u| u == s.id)
            })
            .max_by_key(|s| s.heal_amount + if s.full_hp_restore { 1000 } else { 0 });
        if let Some(skill) = heal {
            return (None, PlayerAction::Skill(skill.id.to_string()));
        }
        if player.has_item("tonic") {
            return (None, PlayerAction::Item("tonic".to_string()));
        }
    }

    let best_offensive = player
        .known_skills()
        .into_iter()
        .filter(|s| {
            matches!(
                s.kind,
                content::SkillKind::Attack | content::SkillKind::Magic
            ) && s.mp_cost <= player.current_mp
        })
        .filter(|s| s.self_stun_turns == 0)
        .max_by(|a, b| {
            a.power
                .partial_cmp(&b.power)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    if let Some(skill) = best_offensive {
        let target = match skill.target {
            content::TargetKind::SingleEnemy => first_living,
            _ => None,
        };
        return (target, PlayerAction::Skill(skill.id.to_string()));
    }

    (first_living, PlayerAction::Attack)
}
