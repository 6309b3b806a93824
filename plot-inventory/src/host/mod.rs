use std::fmt;

use uuid::Uuid;

use crate::item::ItemStack;

pub mod memory;

pub use memory::MemoryHost;

/// Slots in a player's main storage, hotbar included.
pub const PERSONAL_INVENTORY_SIZE: usize = 36;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identity of an inventory the host created; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// The inventory API of the game server.
///
/// Every call happens on the server's game thread, so the trait is neither
/// `Send` nor async.
#[cfg_attr(test, mockall::automock)]
pub trait InventoryHost {
    /// Allocates an inventory with `size` empty slots. `title` is a legacy string.
    fn create_inventory(&mut self, size: usize, title: &str) -> ViewId;

    /// Writes a slot of a view; `None` clears it. Out of range slots are up to the host.
    fn set_view_slot(&mut self, view: ViewId, slot: usize, item: Option<ItemStack>);

    /// Shows `view` to the player, replacing whatever they had open.
    fn open_view(&mut self, player: PlayerId, view: ViewId);

    /// Closes the player's current view, whichever it is. The host may free a
    /// view once nobody has it open.
    fn close_view(&mut self, player: PlayerId);

    fn open_view_of(&self, player: PlayerId) -> Option<ViewId>;

    /// Resends the player's inventory contents to their client.
    fn update_inventory(&mut self, player: PlayerId);

    /// Reads a slot of the player's own storage.
    fn personal_slot(&self, player: PlayerId, slot: usize) -> Option<ItemStack>;
}

impl<H: InventoryHost + ?Sized> InventoryHost for &mut H {
    fn create_inventory(&mut self, size: usize, title: &str) -> ViewId {
        (**self).create_inventory(size, title)
    }

    fn set_view_slot(&mut self, view: ViewId, slot: usize, item: Option<ItemStack>) {
        (**self).set_view_slot(view, slot, item);
    }

    fn open_view(&mut self, player: PlayerId, view: ViewId) {
        (**self).open_view(player, view);
    }

    fn close_view(&mut self, player: PlayerId) {
        (**self).close_view(player);
    }

    fn open_view_of(&self, player: PlayerId) -> Option<ViewId> {
        (**self).open_view_of(player)
    }

    fn update_inventory(&mut self, player: PlayerId) {
        (**self).update_inventory(player);
    }

    fn personal_slot(&self, player: PlayerId, slot: usize) -> Option<ItemStack> {
        (**self).personal_slot(player, slot)
    }
}
