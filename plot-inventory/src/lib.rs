//! Shows plot menus to players as native inventories of the game server and
//! reads items back out of player inventories.
//!
//! The server is reached through [`host::InventoryHost`]; [`host::MemoryHost`]
//! implements it without a server.

pub mod adapter;
pub mod codec;
mod error;
pub mod host;
pub mod item;
pub mod plot_inventory;

pub use adapter::InventoryAdapter;
pub use codec::ItemCodec;
pub use error::InventoryError;
pub use host::{InventoryHost, MemoryHost, PlayerId, ViewId, PERSONAL_INVENTORY_SIZE};
pub use item::{ItemMeta, ItemStack, Material, MaterialRegistry, PortableItem};
pub use plot_inventory::{PlotInventory, ViewState, ViewStatus};
