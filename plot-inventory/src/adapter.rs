use log::debug;
use plot_config::{InventoryConfig, PlotConfiguration};
use plot_util::{
    text::legacy::{to_console, translate_alternate_color_codes},
    LEGACY_AMPERSAND_CHAR,
};

use crate::{
    codec::ItemCodec,
    host::{InventoryHost, PlayerId, ViewId, PERSONAL_INVENTORY_SIZE},
    item::{MaterialRegistry, PortableItem},
    plot_inventory::{PlotInventory, ViewState, ViewStatus},
    InventoryError,
};

/// Shows [`PlotInventory`] handles to players through an [`InventoryHost`].
pub struct InventoryAdapter<H> {
    codec: ItemCodec,
    host: H,
    config: InventoryConfig,
    alternate_color_char: char,
}

impl<H: InventoryHost> InventoryAdapter<H> {
    pub fn new(codec: ItemCodec, host: H) -> Self {
        Self {
            codec,
            host,
            config: InventoryConfig::default(),
            alternate_color_char: LEGACY_AMPERSAND_CHAR,
        }
    }

    pub fn from_config(config: &PlotConfiguration, registry: MaterialRegistry, host: H) -> Self {
        Self {
            codec: ItemCodec::from_config(registry, &config.text),
            host,
            config: config.inventory.clone(),
            alternate_color_char: config.text.alternate_color_char,
        }
    }

    pub fn codec(&self) -> &ItemCodec {
        &self.codec
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Creates a native inventory for the handle, fills it and shows it to the
    /// owning player. Every call creates a new view.
    ///
    /// Items are encoded before anything reaches the host, so an unknown type
    /// leaves the player's screen untouched.
    pub fn open(&mut self, inventory: &mut PlotInventory) -> Result<ViewId, InventoryError> {
        let stacks = inventory
            .items()
            .iter()
            .map(|item| self.codec.encode(item.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let title = translate_alternate_color_codes(self.alternate_color_char, inventory.title());
        let view = self.host.create_inventory(inventory.size(), &title);
        for (slot, stack) in stacks.into_iter().enumerate() {
            if stack.is_some() {
                self.host.set_view_slot(view, slot, stack);
            }
        }
        self.host.open_view(inventory.player(), view);
        inventory.mark_open(view);

        debug!(
            "Opened {view} '{}' ({} rows) for {}",
            to_console(&title),
            inventory.rows(),
            inventory.player()
        );
        Ok(view)
    }

    /// Closes the player's current view if the handle is open. The host closes
    /// whatever the player has open, not necessarily the handle's own view.
    pub fn close(&mut self, inventory: &mut PlotInventory) {
        if !inventory.is_marked_open() {
            return;
        }
        self.host.close_view(inventory.player());
        inventory.mark_closed();
        debug!("Closed inventory of {}", inventory.player());
    }

    /// Writes one slot of the view the handle opened and resends the player's
    /// inventory. `index` is not bounds checked; the host decides what an out of
    /// range slot means.
    ///
    /// The write is dropped unless the player is still looking at this handle's
    /// view ([`ViewStatus::OpenByThisHandle`]). That includes a handle that was
    /// never opened, one whose view another `open` replaced, and one whose
    /// player closed the screen themselves. Other views are never written.
    pub fn set_item(
        &mut self,
        inventory: &PlotInventory,
        index: usize,
        item: Option<&PortableItem>,
    ) -> Result<(), InventoryError> {
        let ViewState::Open(view) = inventory.view_state() else {
            return Ok(());
        };
        if self.view_status(inventory) != ViewStatus::OpenByThisHandle {
            debug!(
                "Dropping write to slot {index}: {view} is no longer shown to {}",
                inventory.player()
            );
            return Ok(());
        }

        let stack = self.codec.encode(item)?;
        self.host.set_view_slot(view, index, stack);
        if self.config.refresh_on_set {
            self.host.update_inventory(inventory.player());
        }
        Ok(())
    }

    /// The main storage of a player, hotbar first, empty slots as `None`.
    pub fn get_items(&self, player: PlayerId) -> [Option<PortableItem>; PERSONAL_INVENTORY_SIZE] {
        std::array::from_fn(|slot| {
            self.codec
                .decode(self.host.personal_slot(player, slot).as_ref())
        })
    }

    /// True only if the player is currently looking at the view this handle
    /// opened.
    pub fn is_open(&self, inventory: &PlotInventory) -> bool {
        self.view_status(inventory) == ViewStatus::OpenByThisHandle
    }

    pub fn view_status(&self, inventory: &PlotInventory) -> ViewStatus {
        match inventory.view_state() {
            ViewState::Closed => ViewStatus::Closed,
            ViewState::Open(view) => {
                if self.host.open_view_of(inventory.player()) == Some(view) {
                    ViewStatus::OpenByThisHandle
                } else {
                    ViewStatus::OpenByOther
                }
            }
        }
    }
}
