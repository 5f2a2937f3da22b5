//! Item definitions: equipment, consumables, tickets, key items.

/// Equipment slot / item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ItemKind {
    Weapon,
    Armor,
    Shield,
    Consumable,
    Ticket,
}

impl ItemKind {
    /// Whether items of this kind go into an equipment slot.
    pub fn is_equippable(&self) -> bool {
        matches!(self, ItemKind::Weapon | ItemKind::Armor | ItemKind::Shield)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    pub description: &'static str,
    pub price: u32,
    pub attack_boost: i32,
    pub defense_boost: i32,
    pub hp_recovery: i32,
    pub mp_recovery: i32,
    pub full_hp_recovery: bool,
    pub full_mp_recovery: bool,
    pub key_item: bool,
}

const BASE: ItemDef = ItemDef {
    id: "",
    name: "",
    kind: ItemKind::Consumable,
    description: "",
    price: 0,
    attack_boost: 0,
    defense_boost: 0,
    hp_recovery: 0,
    mp_recovery: 0,
    full_hp_recovery: false,
    full_mp_recovery: false,
    key_item: false,
};

pub static ALL_ITEMS: &[ItemDef] = &[
    ItemDef {
        id: "tonic",
        name: "Tonic",
        description: "Restores 20 HP.",
        price: 10,
        hp_recovery: 20,
        ..BASE
    },
    ItemDef {
        id: "ether",
        name: "Ether",
        description: "Restores 10 MP.",
        price: 25,
        mp_recovery: 10,
        ..BASE
    },
    ItemDef {
        id: "high_ether",
        name: "High Ether",
        description: "A refined draught that restores 30 MP.",
        price: 150,
        mp_recovery: 30,
        ..BASE
    },
    ItemDef {
        id: "elixir",
        name: "Elixir",
        description: "A priceless draught that fully restores HP and MP.",
        price: 10_000,
        full_hp_recovery: true,
        full_mp_recovery: true,
        ..BASE
    },
    ItemDef {
        id: "oak_sword",
        name: "Oak Sword",
        kind: ItemKind::Weapon,
        description: "A plain training sword.",
        price: 50,
        attack_boost: 2,
        ..BASE
    },
    ItemDef {
        id: "leather_armor",
        name: "Leather Armor",
        kind: ItemKind::Armor,
        description: "Simple hide armor.",
        price: 70,
        defense_boost: 2,
        ..BASE
    },
    ItemDef {
        id: "buckler",
        name: "Buckler",
        kind: ItemKind::Shield,
        description: "A light round shield.",
        price: 40,
        defense_boost: 1,
        ..BASE
    },
    ItemDef {
        id: "bronze_sword",
        name: "Bronze Sword",
        kind: ItemKind::Weapon,
        description: "A bronze blade, a clear step up from oak.",
        price: 120,
        attack_boost: 5,
        ..BASE
    },
    ItemDef {
        id: "chain_mail",
        name: "Chain Mail",
        kind: ItemKind::Armor,
        description: "Woven rings, sturdier than leather.",
        price: 150,
        defense_boost: 4,
        ..BASE
    },
    ItemDef {
        id: "steel_sword",
        name: "Steel Sword",
        kind: ItemKind::Weapon,
        description: "A dependable steel blade.",
        price: 500,
        attack_boost: 10,
        ..BASE
    },
    ItemDef {
        id: "plate_armor",
        name: "Plate Armor",
        kind: ItemKind::Armor,
        description: "Heavy iron plates.",
        price: 650,
        defense_boost: 8,
        ..BASE
    },
    ItemDef {
        id: "knight_shield",
        name: "Knight Shield",
        kind: ItemKind::Shield,
        description: "A shield fit for a knight.",
        price: 380,
        defense_boost: 5,
        ..BASE
    },
    ItemDef {
        id: "knight_sword",
        name: "Knight Sword",
        kind: ItemKind::Weapon,
        description: "A fine blade favored by knights.",
        price: 1200,
        attack_boost: 18,
        ..BASE
    },
    ItemDef {
        id: "knight_armor",
        name: "Knight Armor",
        kind: ItemKind::Armor,
        description: "Quality armor forged for knights.",
        price: 1500,
        defense_boost: 15,
        ..BASE
    },
    ItemDef {
        id: "sacred_shield",
        name: "Sacred Shield",
        kind: ItemKind::Shield,
        description: "A shield warded by holy power.",
        price: 900,
        defense_boost: 10,
        ..BASE
    },
    // The two legendary weapons that strike twice per basic attack.
    ItemDef {
        id: "hero_brand",
        name: "Hero's Brand",
        kind: ItemKind::Weapon,
        description: "A legendary sword that strikes twice in one motion.",
        price: 60_000,
        attack_boost: 55,
        ..BASE
    },
    ItemDef {
        id: "dawn_piercer",
        name: "Dawn Piercer",
        kind: ItemKind::Weapon,
        description: "A radiant lance said to strike twice in a heartbeat.",
        price: 55_000,
        attack_boost: 45,
        ..BASE
    },
    ItemDef {
        id: "aegis_guard",
        name: "Aegis Guard",
        kind: ItemKind::Shield,
        description: "A legendary shield said to turn aside any blow.",
        price: 45_000,
        defense_boost: 30,
        ..BASE
    },
    ItemDef {
        id: "dragon_mail",
        name: "Dragon Mail",
        kind: ItemKind::Armor,
        description: "Armor tempered in dragonfire.",
        price: 50_000,
        defense_boost: 35,
        ..BASE
    },
    ItemDef {
        id: "lottery_ticket",
        name: "Lottery Ticket",
        kind: ItemKind::Ticket,
        description: "Good for one spin at the prize wheel.",
        price: 100,
        ..BASE
    },
    ItemDef {
        id: "key_fragment_forest",
        name: "Gloomwood Key Fragment",
        description: "A shard of the key to the Demon King's keep, hidden deep in the woods.",
        key_item: true,
        ..BASE
    },
    ItemDef {
        id: "key_fragment_hollow",
        name: "Stone Hollow Key Fragment",
        description: "A shard of the key to the Demon King's keep, guarded below the mountains.",
        key_item: true,
        ..BASE
    },
    ItemDef {
        id: "key_fragment_spire",
        name: "Storm Spire Key Fragment",
        description: "A shard of the key to the Demon King's keep, kept at the spire's peak.",
        key_item: true,
        ..BASE
    },
];

/// Looks up an item definition by id.
pub fn item(id: &str) -> Option<&'static ItemDef> {
    ALL_ITEMS.iter().find(|i| i.id == id)
}

/// Resale value at the shop.
pub fn sell_price(def: &ItemDef) -> u32 {
    def.price / 2
}
