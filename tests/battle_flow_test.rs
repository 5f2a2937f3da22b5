//! Integration test: battle state machine flow.
//!
//! Drives whole battles through the public API and checks the invariants
//! the resolver and orchestrator promise: damage floors, HP/MP clamping,
//! phase sequencing, and mid-phase loss checks.

use minisaga::character::{effective_stats, Player};
use minisaga::combat::types::{AppliedBuff, BuffKind, Enemy};
use minisaga::content;
use minisaga::core::{Battle, BattleOutcome, BattlePhase};
use minisaga::PlayerAction;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn spawn(id: &str) -> Enemy {
    Enemy::spawn(content::enemy(id).unwrap())
}

/// Plays a battle to its end with plain attacks on the first living enemy.
fn play_out(battle: &mut Battle, player: &mut Player, rng: &mut ChaCha8Rng) -> BattleOutcome {
    for _ in 0..500 {
        if let Some(outcome) = battle.outcome() {
            return outcome;
        }
        let target = battle.enemies.iter().position(|e| e.is_alive());
        battle.submit_player_action(player, target, &PlayerAction::Attack, rng);
        if battle.outcome().is_none() {
            battle.advance_enemy_phase(player, rng);
        }
    }
    panic!("battle did not finish in 500 rounds");
}

#[test]
fn test_full_battle_ends_in_victory_with_yields() {
    let mut player = Player::new("Hero");
    player.base_stats.attack = 50.0;
    player.base_stats.max_hp = 300.0;
    player.current_hp = 300;
    let mut battle = Battle::new(vec![spawn("slime"), spawn("giant_bat"), spawn("goblin")]);
    let mut rng = rng(1);

    let outcome = play_out(&mut battle, &mut player, &mut rng);
    match outcome {
        BattleOutcome::Victory { exp, gold } => {
            assert_eq!(exp, 1 + 2 + 5);
            assert_eq!(gold, 3 + 4 + 8);
        }
        BattleOutcome::Defeat => panic!("strong player should win"),
    }
    assert!(battle.enemies.iter().all(|e| !e.is_alive()));
}

#[test]
fn test_hopeless_battle_ends_in_defeat() {
    let mut player = Player::new("Hero");
    player.base_stats.max_hp = 10.0;
    player.base_stats.attack = 1.0;
    player.base_stats.defense = 0.0;
    player.equipment.clear();
    player.current_hp = 10;
    let mut battle = Battle::new(vec![spawn("demon_king")]);
    let mut rng = rng(2);

    let outcome = play_out(&mut battle, &mut player, &mut rng);
    assert_eq!(outcome, BattleOutcome::Defeat);
    assert_eq!(player.current_hp, 0);
}

#[test]
fn test_hp_and_mp_stay_in_bounds_all_battle() {
    // Random-ish slugfest: after every single step, HP/MP must sit inside
    // [0, effective max] for the player and every enemy.
    let mut player = Player::new("Hero");
    player.persistent_skills.push("cleave".to_string());
    player.persistent_skills.push("drain_slash".to_string());
    let mut battle = Battle::new(vec![spawn("goblin"), spawn("cave_troll"), spawn("rock_golem")]);
    let mut rng = rng(3);

    let actions = [
        PlayerAction::Attack,
        PlayerAction::Skill("cleave".to_string()),
        PlayerAction::Skill("drain_slash".to_string()),
        PlayerAction::Skill("heal".to_string()),
    ];
    let mut step = 0;
    while battle.outcome().is_none() && step < 200 {
        let target = battle.enemies.iter().position(|e| e.is_alive());
        let action = &actions[step % actions.len()];
        battle.submit_player_action(&mut player, target, action, &mut rng);

        let eff = effective_stats(&player);
        assert!(player.current_hp >= 0 && player.current_hp <= eff.max_hp);
        assert!(player.current_mp >= 0 && player.current_mp <= eff.max_mp);
        for enemy in &battle.enemies {
            assert!(enemy.current_hp >= 0 && enemy.current_hp <= enemy.max_hp);
            assert!(enemy.current_mp >= 0 && enemy.current_mp <= enemy.max_mp);
        }

        if battle.outcome().is_none() {
            battle.advance_enemy_phase(&mut player, &mut rng);
            let eff = effective_stats(&player);
            assert!(player.current_hp >= 0 && player.current_hp <= eff.max_hp);
            assert!(player.current_mp >= 0 && player.current_mp <= eff.max_mp);
        }
        step += 1;
    }
}

#[test]
fn test_connecting_hits_always_deal_at_least_one() {
    // Even a feeble attacker against absurd defense lands for 1.
    let mut player = Player::new("Hero");
    player.equipment.clear();
    player.base_stats.attack = 1.0;
    player.base_stats.crit_rate = 0.0;
    let mut battle = Battle::new(vec![spawn("gilded_mimic")]);
    let mut rng = rng(4);

    let results = battle.submit_player_action(&mut player, Some(0), &PlayerAction::Attack, &mut rng);
    let damage = results.iter().find_map(|r| r.damage_dealt).unwrap();
    assert_eq!(damage, 1);
    assert_eq!(battle.enemies[0].current_hp, battle.enemies[0].max_hp - 1);
}

#[test]
fn test_evade_buff_blanks_the_enemy_phase() {
    let mut player = Player::new("Hero");
    let hp_before = player.current_hp;
    player.apply_buff(AppliedBuff {
        skill_id: "vanish_step".to_string(),
        kind: BuffKind::EvadeAll,
        remaining_turns: 1,
        value: 0.0,
        hp_per_turn: 0,
        regen_is_percent: false,
    });
    let mut battle = Battle::new(vec![spawn("cave_troll"), spawn("cave_troll")]);
    let mut rng = rng(5);

    battle.submit_player_action(&mut player, None, &PlayerAction::Item("tonic".to_string()), &mut rng);
    let results = battle.advance_enemy_phase(&mut player, &mut rng);

    assert_eq!(player.current_hp, hp_before);
    let evasions = results
        .iter()
        .filter(|r| r.message.contains("slips away"))
        .count();
    assert_eq!(evasions, 2);
    // The evade lasted one turn and expired in the same round's tick.
    assert!(player.buff(BuffKind::EvadeAll).is_none());
}

#[test]
fn test_once_per_battle_resets_between_battles_via_run() {
    use minisaga::core::{RegionRun, RewardCard};
    use minisaga::StatBlock;

    let mut persistent = Player::new("Hero");
    persistent.persistent_skills.push("last_stand".to_string());
    persistent.base_stats.max_mp = 100.0;
    let mut run = RegionRun::begin(&persistent, "verdant_plains").unwrap();
    run.player.current_hp = 1;
    let mut rng = rng(6);

    // Use the once-per-battle skill in battle one.
    let mut battle = Battle::new(run.next_encounter(&mut rng).unwrap());
    battle.submit_player_action(
        &mut run.player,
        None,
        &PlayerAction::Skill("last_stand".to_string()),
        &mut rng,
    );
    assert_eq!(run.player.used_once_per_battle, vec!["last_stand".to_string()]);

    // The between-battle reward step clears the used list.
    run.record_victory(1, 1);
    run.apply_reward_card(&RewardCard::StatBoost {
        boost: StatBlock::ZERO,
        description: String::new(),
    });
    assert!(run.player.used_once_per_battle.is_empty());
}

#[test]
fn test_phase_sequencing() {
    let mut player = Player::new("Hero");
    let mut battle = Battle::new(vec![spawn("cave_troll")]);
    let mut rng = rng(7);

    assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
    battle.submit_player_action(&mut player, Some(0), &PlayerAction::Attack, &mut rng);
    assert_eq!(battle.phase(), BattlePhase::EnemyTurn);
    // Submitting again mid-enemy-phase changes nothing.
    let hp = battle.enemies[0].current_hp;
    battle.submit_player_action(&mut player, Some(0), &PlayerAction::Attack, &mut rng);
    assert_eq!(battle.enemies[0].current_hp, hp);
    battle.advance_enemy_phase(&mut player, &mut rng);
    assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
}
