//! Wisdom fragments: collectible flavor text unlocked by in-game events.
//!
//! The core only stores collected ids and hands out fragment text; which
//! event fires which fragment is the presentation layer's business.

#[derive(Debug, Clone, Copy)]
pub struct WisdomFragment {
    pub id: &'static str,
    pub text: &'static str,
    pub category: &'static str,
    pub hint: &'static str,
}

pub static ALL_WISDOM_FRAGMENTS: &[WisdomFragment] = &[
    WisdomFragment {
        id: "wf_first_boss_down",
        text: "\"Beaten... by a rookie? Remember this: my cousin hits twice as hard. Probably.\"",
        category: "Bosses",
        hint: "Defeat the warlord of the Verdant Plains.",
    },
    WisdomFragment {
        id: "wf_elixir_first_buy",
        text: "\"An Elixir! The stuff of legends. No expiry date printed anywhere, though. Drink responsibly.\"",
        category: "Items",
        hint: "Someone had doubts about the ultimate restorative.",
    },
    WisdomFragment {
        id: "wf_first_flee",
        text: "\"Running away is a strategy too. A loud, undignified strategy.\"",
        category: "Actions",
        hint: "Sometimes the better part of valor doesn't go smoothly.",
    },
    WisdomFragment {
        id: "wf_legend_weapon_equip",
        text: "\"The Hero's Brand hums in your grip, eager to strike twice. Try not to cut yourself.\"",
        category: "Items",
        hint: "Equip a legendary weapon for the first time.",
    },
    WisdomFragment {
        id: "wf_level_5",
        text: "\"Level five already? Enjoy it. The real grind starts now.\"",
        category: "Growth",
        hint: "Take the first real step toward mastery.",
    },
];

/// Looks up a wisdom fragment by id.
pub fn wisdom(id: &str) -> Option<&'static WisdomFragment> {
    ALL_WISDOM_FRAGMENTS.iter().find(|w| w.id == id)
}

/// Reward granted once the collection reaches a count.
#[derive(Debug, Clone, Copy)]
pub struct WisdomReward {
    pub count: usize,
    pub message: &'static str,
    pub item_id: &'static str,
    pub quantity: u32,
    /// Flag id recorded so the reward is only granted once.
    pub claim_flag: &'static str,
}

pub static WISDOM_REWARDS: &[WisdomReward] = &[WisdomReward {
    count: 3,
    message: "Three fragments of wisdom gathered! Here, have a Lottery Ticket.",
    item_id: "lottery_ticket",
    quantity: 1,
    claim_flag: "wisdom_reward_3_claimed",
}];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wisdom_lookup() {
        assert!(wisdom("wf_level_5").is_some());
        assert!(wisdom("wf_unwritten").is_none());
    }
}
