//! Status effect ticking.
//!
//! Invoked once per combatant at the boundary between "actions resolved"
//! and the next turn. Regeneration heals *before* its duration decrements,
//! so the effect still fires on its final turn. Expired effects are
//! dropped and reported as messages; ticking a combatant with no effects
//! is a no-op returning an empty list.

use crate::character::player::Player;
use crate::character::stats::effective_stats;
use crate::combat::types::{BuffKind, Enemy};
use crate::content;

/// Advances the player's buffs by one turn. Returns regen and expiry
/// messages in the order they occurred.
pub fn tick_player_effects(player: &mut Player) -> Vec<String> {
    let mut messages = Vec::new();
    let eff = effective_stats(player);

    let mut regen_total = 0;
    let mut kept = Vec::with_capacity(player.active_buffs.len());
    for mut buff in player.active_buffs.drain(..) {
        if buff.kind == BuffKind::HpRegeneration {
            let amount = if buff.regen_is_percent {
                (eff.max_hp as f64 * buff.value).floor() as i32
            } else {
                buff.hp_per_turn
            };
            if amount > 0 && player.current_hp > 0 && player.current_hp < eff.max_hp {
                let healed = amount.min(eff.max_hp - player.current_hp - regen_total).max(0);
                if healed > 0 {
                    regen_total += healed;
                    messages.push(format!(
                        "{} recovers {} HP from regeneration.",
                        player.name, healed
                    ));
                }
            }
        }

        buff.remaining_turns = buff.remaining_turns.saturating_sub(1);
        if buff.remaining_turns > 0 {
            kept.push(buff);
        } else {
            messages.push(format!(
                "{}'s {} wore off.",
                player.name,
                buff_label(&buff.skill_id, buff.kind)
            ));
        }
    }
    player.active_buffs = kept;
    player.current_hp += regen_total;

    messages
}

/// Advances one enemy's debuffs by one turn.
pub fn tick_enemy_effects(enemy: &mut Enemy) -> Vec<String> {
    let mut messages = Vec::new();
    let mut kept = Vec::with_capacity(enemy.active_debuffs.len());
    for mut debuff in enemy.active_debuffs.drain(..) {
        debuff.remaining_turns = debuff.remaining_turns.saturating_sub(1);
        if debuff.remaining_turns > 0 {
            kept.push(debuff);
        } else {
            messages.push(format!(
                "{}'s {} wore off.",
                enemy.name,
                debuff.kind.display_name()
            ));
        }
    }
    enemy.active_debuffs = kept;
    messages
}

/// Effect kinds with a natural label use it; otherwise the source skill's
/// name stands in.
fn buff_label(skill_id: &str, kind: BuffKind) -> String {
    if let Some(label) = kind.display_name() {
        return label.to_string();
    }
    content::skill(skill_id)
        .map(|s| s.name.to_string())
        .unwrap_or_else(|| "effect".to_string())
}
