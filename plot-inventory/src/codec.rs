use plot_config::TextConfig;
use plot_util::text::{legacy::LegacySerializer, markup};

use crate::{
    item::{ItemStack, MaterialRegistry, PortableItem},
    InventoryError,
};

/// Converts between [`PortableItem`]s and the host's [`ItemStack`]s.
///
/// Name and lore are rendered from markup to legacy strings on the way in and
/// copied verbatim on the way out, so `decode(encode(item))` only keeps the
/// type and amount of `item` intact.
#[derive(Clone, Debug)]
pub struct ItemCodec {
    registry: MaterialRegistry,
    serializer: LegacySerializer,
}

impl ItemCodec {
    pub fn new(registry: MaterialRegistry, serializer: LegacySerializer) -> Self {
        Self {
            registry,
            serializer,
        }
    }

    pub fn from_config(registry: MaterialRegistry, config: &TextConfig) -> Self {
        Self::new(registry, config.serializer())
    }

    /// Parses `markup` and renders it in the legacy format.
    pub fn render(&self, markup: &str) -> String {
        self.serializer.serialize(&markup::parse(markup))
    }

    pub fn encode(&self, item: Option<&PortableItem>) -> Result<Option<ItemStack>, InventoryError> {
        let Some(item) = item else {
            return Ok(None);
        };
        let material = self
            .registry
            .get(&item.type_id)
            .ok_or_else(|| InventoryError::UnknownType(item.type_id.clone()))?;

        let mut stack = ItemStack::new(item.amount, material);
        if let Some(name) = &item.display_name {
            stack.item_meta_mut().display_name = Some(self.render(name));
        }
        if let Some(lore) = &item.lore {
            stack.item_meta_mut().lore = Some(lore.iter().map(|line| self.render(line)).collect());
        }
        Ok(Some(stack))
    }

    pub fn decode(&self, native: Option<&ItemStack>) -> Option<PortableItem> {
        let native = native?;
        let mut item = PortableItem::new(native.material.canonical_name(), native.amount);
        if let Some(meta) = &native.meta {
            if meta.has_display_name() {
                item.display_name.clone_from(&meta.display_name);
            }
            if meta.has_lore() {
                item.lore.clone_from(&meta.lore);
            }
        }
        Some(item)
    }
}

impl Default for ItemCodec {
    fn default() -> Self {
        Self::new(MaterialRegistry::vanilla(), LegacySerializer::section())
    }
}

#[cfg(test)]
mod test {
    use super::ItemCodec;
    use crate::{
        item::{MaterialRegistry, PortableItem},
        InventoryError,
    };

    #[test]
    fn absent_stays_absent() {
        let codec = ItemCodec::default();
        assert_eq!(codec.encode(None), Ok(None));
        assert_eq!(codec.decode(None), None);
    }

    #[test]
    fn plain_items_round_trip() {
        let codec = ItemCodec::default();
        for material in MaterialRegistry::vanilla().iter() {
            for amount in [0, 1, 64, u32::MAX] {
                let item = PortableItem::new(material.canonical_name(), amount);
                let stack = codec.encode(Some(&item)).unwrap().unwrap();
                assert!(!stack.has_item_meta());
                assert_eq!(stack.material, material);
                assert_eq!(codec.decode(Some(&stack)), Some(item));
            }
        }
    }

    #[test]
    fn namespaced_type_decodes_to_canonical_name() {
        let codec = ItemCodec::default();
        let stack = codec
            .encode(Some(&PortableItem::new("minecraft:oak_log", 2)))
            .unwrap()
            .unwrap();
        assert_eq!(codec.decode(Some(&stack)).unwrap().type_id, "OAK_LOG");
    }

    #[test]
    fn unknown_type_is_an_error() {
        let codec = ItemCodec::default();
        assert_eq!(
            codec.encode(Some(&PortableItem::new("RUBY", 1))),
            Err(InventoryError::UnknownType("RUBY".to_string()))
        );
    }

    #[test]
    fn name_and_lore_are_rendered() {
        let codec = ItemCodec::default();
        let item = PortableItem::new("PAPER", 1)
            .with_name("<gold>Plot <bold>info")
            .with_lore(["<gray>Owner: <white>Steve", "", "plain"]);
        let stack = codec.encode(Some(&item)).unwrap().unwrap();

        assert_eq!(stack.display_name(), Some("§6Plot §linfo"));
        assert_eq!(
            stack.lore(),
            Some(
                &[
                    "§7Owner: §fSteve".to_string(),
                    String::new(),
                    "plain".to_string()
                ][..]
            )
        );
    }

    #[test]
    fn lore_without_name_attaches_meta() {
        let codec = ItemCodec::default();
        let stack = codec
            .encode(Some(&PortableItem::new("BOOK", 1).with_lore(["<red>x"])))
            .unwrap()
            .unwrap();
        assert!(stack.has_item_meta());
        assert_eq!(stack.display_name(), None);
    }

    #[test]
    fn round_trip_is_lossy_for_markup() {
        let codec = ItemCodec::default();
        let item = PortableItem::new("DIAMOND", 1).with_name("<bold><red>Hello");
        let decoded = codec
            .decode(codec.encode(Some(&item)).unwrap().as_ref())
            .unwrap();

        assert_eq!(decoded.display_name.as_deref(), Some("§c§lHello"));
        assert_ne!(decoded.display_name, item.display_name);
        assert_eq!(decoded.type_id, item.type_id);
        assert_eq!(decoded.amount, item.amount);
    }
}
