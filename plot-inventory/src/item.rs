use std::{collections::HashMap, fmt};

use log::warn;
use serde::{Deserialize, Serialize};

/// Host independent description of an item stack. Name and lore are markup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortableItem {
    pub type_id: String,
    pub amount: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lore: Option<Vec<String>>,
}

impl PortableItem {
    pub fn new(type_id: impl Into<String>, amount: u32) -> Self {
        Self {
            type_id: type_id.into(),
            amount,
            display_name: None,
            lore: None,
        }
    }

    pub fn with_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_lore<I, S>(mut self, lore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lore = Some(lore.into_iter().map(Into::into).collect());
        self
    }
}

/// An entry of the host's item type table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Material {
    pub id: u16,
    /// Registry key without namespace as it was registered, e.g. `diamond_sword`.
    pub key: &'static str,
}

impl Material {
    /// Upper case name the host reports for the material, e.g. `DIAMOND_SWORD`.
    pub fn canonical_name(&self) -> String {
        self.key.to_ascii_uppercase()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "minecraft:{}", self.key.to_ascii_lowercase())
    }
}

/// Display metadata of a native stack. Strings are already in legacy format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemMeta {
    pub display_name: Option<String>,
    pub lore: Option<Vec<String>>,
}

impl ItemMeta {
    pub fn has_display_name(&self) -> bool {
        self.display_name.is_some()
    }

    pub fn has_lore(&self) -> bool {
        self.lore.is_some()
    }
}

/// The host's representation of a stack of items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub material: Material,
    pub amount: u32,
    pub meta: Option<ItemMeta>,
}

impl ItemStack {
    pub fn new(amount: u32, material: Material) -> Self {
        Self {
            material,
            amount,
            meta: None,
        }
    }

    pub fn has_item_meta(&self) -> bool {
        self.meta.is_some()
    }

    /// Returns the metadata, attaching an empty one first if there is none.
    pub fn item_meta_mut(&mut self) -> &mut ItemMeta {
        self.meta.get_or_insert_with(ItemMeta::default)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.meta.as_ref()?.display_name.as_deref()
    }

    pub fn lore(&self) -> Option<&[String]> {
        self.meta.as_ref()?.lore.as_deref()
    }
}

const VANILLA_MATERIALS: &[&str] = &[
    "air",
    "stone",
    "grass_block",
    "dirt",
    "cobblestone",
    "oak_planks",
    "oak_sapling",
    "bedrock",
    "sand",
    "gravel",
    "oak_log",
    "glass",
    "white_wool",
    "tnt",
    "bookshelf",
    "obsidian",
    "torch",
    "chest",
    "crafting_table",
    "furnace",
    "ladder",
    "lever",
    "oak_sign",
    "oak_door",
    "hopper",
    "beacon",
    "barrier",
    "diamond_ore",
    "diamond_block",
    "emerald_block",
    "green_concrete",
    "red_concrete",
    "white_stained_glass_pane",
    "gray_stained_glass_pane",
    "black_stained_glass_pane",
    "red_stained_glass_pane",
    "lime_stained_glass_pane",
    "diamond",
    "emerald",
    "iron_ingot",
    "gold_ingot",
    "redstone",
    "repeater",
    "comparator",
    "stick",
    "string",
    "feather",
    "bone",
    "apple",
    "bread",
    "paper",
    "book",
    "writable_book",
    "name_tag",
    "compass",
    "clock",
    "map",
    "filled_map",
    "player_head",
    "arrow",
    "bow",
    "diamond_sword",
    "diamond_pickaxe",
    "bucket",
    "water_bucket",
    "lava_bucket",
    "ender_pearl",
    "nether_star",
];

/// The host's item type table keyed by string identifier.
#[derive(Clone, Debug)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    /// Lower case keys without namespace.
    by_key: HashMap<String, u16>,
}

fn strip_namespace(key: &'static str) -> &'static str {
    match key.split_once(':') {
        Some((namespace, path)) if namespace.eq_ignore_ascii_case("minecraft") => path,
        _ => key,
    }
}

impl MaterialRegistry {
    /// Builds a registry; the position of a key becomes its numeric id.
    /// Keys match regardless of case and of a `minecraft:` namespace. Keys past
    /// the range of `u16` ids are dropped.
    pub fn new(keys: &[&'static str]) -> Self {
        let mut materials = Vec::with_capacity(keys.len());
        let mut by_key = HashMap::with_capacity(keys.len());
        for (index, &key) in keys.iter().enumerate() {
            let Ok(id) = u16::try_from(index) else {
                warn!(
                    "Material table has {} keys, ignoring all after id {}",
                    keys.len(),
                    u16::MAX
                );
                break;
            };
            let key = strip_namespace(key.trim());
            by_key.insert(key.to_ascii_lowercase(), id);
            materials.push(Material { id, key });
        }
        Self { materials, by_key }
    }

    /// The materials plot menus commonly use.
    pub fn vanilla() -> Self {
        Self::new(VANILLA_MATERIALS)
    }

    /// Resolves `DIAMOND`, `diamond` and `minecraft:diamond` alike.
    pub fn get(&self, type_id: &str) -> Option<Material> {
        let type_id = type_id.trim().to_ascii_lowercase();
        let key = type_id.strip_prefix("minecraft:").unwrap_or(&type_id);
        let id = *self.by_key.get(key)?;
        self.by_id(id)
    }

    pub fn by_id(&self, id: u16) -> Option<Material> {
        self.materials.get(usize::from(id)).copied()
    }

    /// Every material in id order.
    pub fn iter(&self) -> impl Iterator<Item = Material> + '_ {
        self.materials.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::vanilla()
    }
}
