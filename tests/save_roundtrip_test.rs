//! Integration test: persistence round trips.
//!
//! The save/load port and the password codec must both return a player
//! whose progression-relevant state is identical: level, experience,
//! gold, equipment ids, inventory ids + enhancement levels, persistent
//! skill ids, and collected wisdom ids.

use minisaga::character::Player;
use minisaga::core::progression::RegionProgress;
use minisaga::items::ItemInstance;
use minisaga::save::{
    DeflatePasswordCodec, FileSaveStore, PasswordCodec, SaveData, SaveStore,
};
use std::collections::BTreeSet;

fn veteran_save() -> SaveData {
    let mut player = Player::new("Veteran");
    player.level = 14;
    player.experience = 5_200;
    player.gold = 4_321;
    player.persistent_skills.push("blizzard".to_string());
    player.persistent_skills.push("drain_slash".to_string());
    player
        .collected_wisdom_ids
        .push("wf_first_boss_down".to_string());
    player.collected_wisdom_ids.push("wf_level_5".to_string());

    let mut sword = ItemInstance::create("knight_sword").unwrap();
    sword.enhancement_level = 7;
    player.equipment.weapon = Some(sword);
    let mut shield = ItemInstance::create("sacred_shield").unwrap();
    shield.enhancement_level = 2;
    player.equipment.shield = Some(shield);

    player.inventory.push(ItemInstance::create("elixir").unwrap());
    let mut spare = ItemInstance::create("steel_sword").unwrap();
    spare.enhancement_level = 5;
    player.inventory.push(spare);
    player
        .inventory
        .push(ItemInstance::create("key_fragment_forest").unwrap());

    let mut regions = RegionProgress::new();
    regions.states.get_mut("verdant_plains").unwrap().cleared = true;
    regions.states.get_mut("gloomwood").unwrap().unlocked = true;
    regions.states.get_mut("gloomwood").unwrap().cleared = true;
    regions.states.get_mut("stone_hollow").unwrap().unlocked = true;

    SaveData {
        player,
        regions,
        saved_at: 1_750_000_000,
    }
}

fn assert_progression_identical(a: &Player, b: &Player) {
    assert_eq!(a.level, b.level);
    assert_eq!(a.experience, b.experience);
    assert_eq!(a.gold, b.gold);

    assert_eq!(
        a.equipment.weapon.as_ref().map(|i| &i.item_id),
        b.equipment.weapon.as_ref().map(|i| &i.item_id)
    );
    assert_eq!(
        a.equipment.armor.as_ref().map(|i| &i.item_id),
        b.equipment.armor.as_ref().map(|i| &i.item_id)
    );
    assert_eq!(
        a.equipment.shield.as_ref().map(|i| &i.item_id),
        b.equipment.shield.as_ref().map(|i| &i.item_id)
    );
    assert_eq!(
        a.equipment.weapon.as_ref().map(|i| i.enhancement_level),
        b.equipment.weapon.as_ref().map(|i| i.enhancement_level)
    );

    // Inventory and skill/wisdom sets are order-insensitive.
    let inv = |p: &Player| -> BTreeSet<(String, u8)> {
        p.inventory
            .iter()
            .map(|i| (i.item_id.clone(), i.enhancement_level))
            .collect()
    };
    assert_eq!(inv(a), inv(b));

    let set = |v: &[String]| -> BTreeSet<String> { v.iter().cloned().collect() };
    assert_eq!(set(&a.persistent_skills), set(&b.persistent_skills));
    assert_eq!(set(&a.collected_wisdom_ids), set(&b.collected_wisdom_ids));
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSaveStore::at_path(dir.path().join("save.dat"));
    let save = veteran_save();

    store.save(&save).unwrap();
    let loaded = store.load().unwrap().unwrap();

    assert_progression_identical(&save.player, &loaded.player);
    assert_eq!(save.regions, loaded.regions);
    assert_eq!(save.saved_at, loaded.saved_at);
}

#[test]
fn test_password_round_trip() {
    let codec = DeflatePasswordCodec;
    let save = veteran_save();

    let password = codec.encode(&save).unwrap();
    let decoded = codec.decode(&password).unwrap();

    assert_progression_identical(&save.player, &decoded.player);
    assert_eq!(save.regions, decoded.regions);
}

#[test]
fn test_password_survives_store_and_back() {
    // Export a password, wipe the disk save, reimport, save again.
    let dir = tempfile::tempdir().unwrap();
    let store = FileSaveStore::at_path(dir.path().join("save.dat"));
    let codec = DeflatePasswordCodec;
    let save = veteran_save();

    store.save(&save).unwrap();
    let password = codec.encode(&store.load().unwrap().unwrap()).unwrap();
    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());

    let imported = codec.decode(&password).unwrap();
    store.save(&imported).unwrap();
    let reloaded = store.load().unwrap().unwrap();
    assert_progression_identical(&save.player, &reloaded.player);
}

#[test]
fn test_minimal_password_hydrates_optional_collections() {
    // A hand-rolled payload without the optional collections must decode
    // with them empty, never missing.
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let json = r#"{
        "player": {
            "name": "Sparse",
            "level": 2,
            "experience": 20,
            "gold": 5,
            "base_stats": {"max_hp": 30.0, "max_mp": 10.0, "attack": 8.0, "defense": 5.0, "speed": 5.0, "crit_rate": 0.03},
            "current_hp": 30,
            "current_mp": 10,
            "equipment": {},
            "inventory": [],
            "persistent_skills": ["power_strike"]
        }
    }"#;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();
    use base64::Engine as _;
    let password = base64::engine::general_purpose::STANDARD.encode(compressed);

    let decoded = DeflatePasswordCodec.decode(&password).unwrap();
    assert_eq!(decoded.player.name, "Sparse");
    assert!(decoded.player.active_buffs.is_empty());
    assert!(decoded.player.used_once_per_battle.is_empty());
    assert!(decoded.player.collected_wisdom_ids.is_empty());
    assert!(decoded.player.temporary_skills.is_empty());
    // Missing region map defaults to a fresh one.
    assert!(decoded.regions.is_unlocked("verdant_plains"));
}
