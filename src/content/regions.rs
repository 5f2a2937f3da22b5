//! Region definitions: the world map's encounter scripts.
//!
//! Regions are played in the order listed here; clearing one unlocks the
//! next (subject to level and key-fragment gates).

#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Scripted encounter rosters, in order. The boss comes after the last.
    pub encounters: &'static [&'static [&'static str]],
    pub boss_id: &'static str,
    /// Minimum player level to start the boss encounter.
    pub boss_unlock_level: u32,
    /// Minimum player level to enter the region at all (0 = none).
    pub unlock_player_level: u32,
    pub shop_inventory: &'static [&'static str],
    pub gacha_prizes: &'static [&'static str],
    pub starts_unlocked: bool,
    /// The final region also requires all three key fragments to enter.
    pub requires_key_fragments: bool,
    pub is_final: bool,
    /// Region bosses that drop a key fragment do so at 50% until owned.
    pub key_fragment_drop: Option<&'static str>,
}

pub static ALL_REGIONS: &[Region] = &[
    Region {
        id: "verdant_plains",
        name: "Verdant Plains",
        description: "Rolling grassland where every journey begins.",
        encounters: &[&["slime"], &["slime", "giant_bat"], &["goblin"]],
        boss_id: "orc_warlord",
        boss_unlock_level: 5,
        unlock_player_level: 0,
        shop_inventory: &[
            "tonic",
            "ether",
            "oak_sword",
            "leather_armor",
            "buckler",
            "lottery_ticket",
        ],
        gacha_prizes: &["tonic", "ether", "oak_sword"],
        starts_unlocked: true,
        requires_key_fragments: false,
        is_final: false,
        key_fragment_drop: None,
    },
    Region {
        id: "gloomwood",
        name: "Gloomwood",
        description: "An unquiet forest where stronger creatures prowl.",
        encounters: &[
            &["goblin", "giant_bat"],
            &["goblin", "shade_panther"],
            &["giant_bat", "giant_bat", "giant_bat"],
        ],
        boss_id: "gloom_knight",
        boss_unlock_level: 10,
        unlock_player_level: 5,
        shop_inventory: &["tonic", "ether", "bronze_sword", "chain_mail", "lottery_ticket"],
        gacha_prizes: &["tonic", "ether", "bronze_sword", "chain_mail"],
        starts_unlocked: false,
        requires_key_fragments: false,
        is_final: false,
        key_fragment_drop: Some("key_fragment_forest"),
    },
    Region {
        id: "stone_hollow",
        name: "Stone Hollow",
        description: "A cavern bored into the mountains, home to hardened beasts.",
        encounters: &[
            &["rock_golem"],
            &["goblin", "cave_troll"],
            &["giant_bat", "rock_golem", "giant_bat"],
        ],
        boss_id: "deep_warden",
        boss_unlock_level: 15,
        unlock_player_level: 10,
        shop_inventory: &[
            "ether",
            "steel_sword",
            "plate_armor",
            "knight_shield",
            "lottery_ticket",
            "high_ether",
        ],
        gacha_prizes: &["ether", "steel_sword", "plate_armor", "knight_shield"],
        starts_unlocked: false,
        requires_key_fragments: false,
        is_final: false,
        key_fragment_drop: Some("key_fragment_hollow"),
    },
    Region {
        id: "storm_spire",
        name: "Storm Spire",
        description: "A tower that scrapes the clouds, crawling with strange foes.",
        encounters: &[
            &["gale_reaver", "storm_harpy"],
            &["spire_sentinel", "night_prowler"],
            &["crag_ogre", "hedge_witch", "ember_wisp"],
            &["iron_watcher", "night_prowler", "ember_wisp"],
        ],
        boss_id: "storm_rider",
        boss_unlock_level: 20,
        unlock_player_level: 15,
        shop_inventory: &[
            "ether",
            "high_ether",
            "steel_sword",
            "knight_sword",
            "plate_armor",
            "knight_armor",
            "knight_shield",
            "sacred_shield",
            "lottery_ticket",
            "elixir",
        ],
        gacha_prizes: &[
            "knight_sword",
            "knight_armor",
            "sacred_shield",
            "steel_sword",
            "plate_armor",
            "knight_shield",
            "elixir",
        ],
        starts_unlocked: false,
        requires_key_fragments: false,
        is_final: false,
        key_fragment_drop: Some("key_fragment_spire"),
    },
    Region {
        id: "demon_keep",
        name: "Demon King's Keep",
        description: "The dread hall where the Demon King holds court.",
        encounters: &[],
        boss_id: "demon_king",
        boss_unlock_level: 25,
        unlock_player_level: 20,
        shop_inventory: &[
            "ether",
            "high_ether",
            "steel_sword",
            "knight_sword",
            "plate_armor",
            "knight_armor",
            "knight_shield",
            "sacred_shield",
            "lottery_ticket",
            "elixir",
        ],
        gacha_prizes: &[
            "hero_brand",
            "dawn_piercer",
            "aegis_guard",
            "dragon_mail",
            "knight_sword",
            "knight_armor",
            "sacred_shield",
            "elixir",
        ],
        starts_unlocked: false,
        requires_key_fragments: true,
        is_final: true,
        key_fragment_drop: None,
    },
];

/// Every key fragment needed to enter the final region.
pub static KEY_FRAGMENT_IDS: &[&str] = &[
    "key_fragment_forest",
    "key_fragment_hollow",
    "key_fragment_spire",
];

/// Looks up a region by id.
pub fn region(id: &str) -> Option<&'static Region> {
    ALL_REGIONS.iter().find(|r| r.id == id)
}

/// The region unlocked after clearing `id`, if any.
pub fn next_region(id: &str) -> Option<&'static Region> {
    let idx = ALL_REGIONS.iter().position(|r| r.id == id)?;
    ALL_REGIONS.get(idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup_and_order() {
        assert!(region("verdant_plains").unwrap().starts_unlocked);
        assert_eq!(next_region("verdant_plains").unwrap().id, "gloomwood");
        assert!(next_region("demon_keep").is_none());
    }

    #[test]
    fn test_final_region_is_boss_only() {
        let keep = region("demon_keep").unwrap();
        assert!(keep.is_final);
        assert!(keep.requires_key_fragments);
        assert!(keep.encounters.is_empty());
    }

    #[test]
    fn test_exactly_three_key_fragment_droppers() {
        let droppers: Vec<_> = ALL_REGIONS
            .iter()
            .filter_map(|r| r.key_fragment_drop)
            .collect();
        assert_eq!(droppers.len(), KEY_FRAGMENT_IDS.len());
        for id in KEY_FRAGMENT_IDS {
            assert!(droppers.contains(id), "no region drops {}", id);
        }
    }
}
