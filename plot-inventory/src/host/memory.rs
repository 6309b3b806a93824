use std::collections::HashMap;

use log::warn;

use super::{InventoryHost, PlayerId, ViewId, PERSONAL_INVENTORY_SIZE};
use crate::item::ItemStack;

/// Main storage plus four armor slots and the off hand.
pub const PERSONAL_STORAGE_SIZE: usize = PERSONAL_INVENTORY_SIZE + 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryView {
    title: String,
    slots: Vec<Option<ItemStack>>,
}

impl MemoryView {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot)?.as_ref()
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }
}

#[derive(Debug, Default)]
struct MemoryPlayer {
    storage: Vec<Option<ItemStack>>,
    open_view: Option<ViewId>,
    refreshes: usize,
}

/// Keeps every view and player in memory. Useful for embedding the adapter
/// without a server and for tests.
///
/// A view is dropped as soon as no player has it open any more. Views that
/// were created but never opened stay until someone opens and leaves them.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next_view: u64,
    views: HashMap<ViewId, MemoryView>,
    players: HashMap<PlayerId, MemoryPlayer>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connected player with empty storage.
    pub fn join(&mut self, player: PlayerId) {
        self.players.entry(player).or_insert_with(|| MemoryPlayer {
            storage: vec![None; PERSONAL_STORAGE_SIZE],
            ..MemoryPlayer::default()
        });
    }

    pub fn set_personal_slot(&mut self, player: PlayerId, slot: usize, item: Option<ItemStack>) {
        self.join(player);
        let Some(entry) = self
            .players
            .get_mut(&player)
            .and_then(|state| state.storage.get_mut(slot))
        else {
            warn!("Ignoring write to personal slot {slot} of {player}");
            return;
        };
        *entry = item;
    }

    pub fn view(&self, view: ViewId) -> Option<&MemoryView> {
        self.views.get(&view)
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    fn release_if_unshown(&mut self, view: ViewId) {
        if self
            .players
            .values()
            .all(|state| state.open_view != Some(view))
        {
            self.views.remove(&view);
        }
    }

    /// How often the player's inventory was resent.
    pub fn refresh_count(&self, player: PlayerId) -> usize {
        self.players
            .get(&player)
            .map_or(0, |state| state.refreshes)
    }
}

impl InventoryHost for MemoryHost {
    fn create_inventory(&mut self, size: usize, title: &str) -> ViewId {
        let view = ViewId(self.next_view);
        self.next_view += 1;
        self.views.insert(
            view,
            MemoryView {
                title: title.to_string(),
                slots: vec![None; size],
            },
        );
        view
    }

    fn set_view_slot(&mut self, view: ViewId, slot: usize, item: Option<ItemStack>) {
        let Some(target) = self.views.get_mut(&view) else {
            warn!("Ignoring write to unknown {view}");
            return;
        };
        match target.slots.get_mut(slot) {
            Some(entry) => *entry = item,
            None => warn!(
                "Ignoring write to slot {slot} of {view} which has {} slots",
                target.slots.len()
            ),
        }
    }

    fn open_view(&mut self, player: PlayerId, view: ViewId) {
        self.join(player);
        let previous = self
            .players
            .get_mut(&player)
            .and_then(|state| state.open_view.replace(view));
        if let Some(previous) = previous.filter(|previous| *previous != view) {
            self.release_if_unshown(previous);
        }
    }

    fn close_view(&mut self, player: PlayerId) {
        let previous = self
            .players
            .get_mut(&player)
            .and_then(|state| state.open_view.take());
        if let Some(previous) = previous {
            self.release_if_unshown(previous);
        }
    }

    fn open_view_of(&self, player: PlayerId) -> Option<ViewId> {
        self.players.get(&player)?.open_view
    }

    fn update_inventory(&mut self, player: PlayerId) {
        if let Some(state) = self.players.get_mut(&player) {
            state.refreshes += 1;
        }
    }

    fn personal_slot(&self, player: PlayerId, slot: usize) -> Option<ItemStack> {
        self.players.get(&player)?.storage.get(slot)?.clone()
    }
}

#[cfg(test)]
mod test {
    use super::{MemoryHost, PERSONAL_STORAGE_SIZE};
    use crate::{
        host::{InventoryHost, PlayerId},
        item::{ItemStack, MaterialRegistry},
    };

    #[test]
    fn views_get_fresh_ids() {
        let mut host = MemoryHost::new();
        let first = host.create_inventory(9, "a");
        let second = host.create_inventory(18, "b");

        assert_ne!(first, second);
        assert_eq!(host.view(second).unwrap().size(), 18);
        assert_eq!(host.view(first).unwrap().title(), "a");
        assert_eq!(host.view_count(), 2);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut host = MemoryHost::new();
        let view = host.create_inventory(9, "menu");
        let stone = ItemStack::new(1, MaterialRegistry::vanilla().get("stone").unwrap());

        host.set_view_slot(view, 9, Some(stone.clone()));
        host.set_view_slot(view, 8, Some(stone.clone()));

        let contents = host.view(view).unwrap();
        assert_eq!(contents.size(), 9);
        assert_eq!(contents.slot(8), Some(&stone));
        assert_eq!(contents.slots().iter().flatten().count(), 1);
    }

    #[test]
    fn open_and_close_track_current_view() {
        let mut host = MemoryHost::new();
        let player = PlayerId::new_random();
        let view = host.create_inventory(9, "menu");

        assert_eq!(host.open_view_of(player), None);
        host.open_view(player, view);
        assert_eq!(host.open_view_of(player), Some(view));
        host.close_view(player);
        assert_eq!(host.open_view_of(player), None);
    }

    #[test]
    fn views_are_released_once_nobody_shows_them() {
        let mut host = MemoryHost::new();
        let player = PlayerId::new_random();

        for _ in 0..100 {
            let view = host.create_inventory(54, "menu");
            host.open_view(player, view);
            host.close_view(player);
        }
        assert_eq!(host.view_count(), 0);

        let first = host.create_inventory(9, "first");
        host.open_view(player, first);
        let second = host.create_inventory(9, "second");
        host.open_view(player, second);
        assert!(host.view(first).is_none());
        assert_eq!(host.view_count(), 1);

        // Reopening the same view keeps it.
        host.open_view(player, second);
        assert!(host.view(second).is_some());
    }

    #[test]
    fn shared_view_outlives_one_viewer() {
        let mut host = MemoryHost::new();
        let (alice, bob) = (PlayerId::new_random(), PlayerId::new_random());
        let view = host.create_inventory(27, "shared");
        host.open_view(alice, view);
        host.open_view(bob, view);

        host.close_view(alice);
        assert!(host.view(view).is_some());
        host.close_view(bob);
        assert!(host.view(view).is_none());
    }

    #[test]
    fn personal_storage() {
        let mut host = MemoryHost::new();
        let player = PlayerId::new_random();
        let apple = ItemStack::new(5, MaterialRegistry::vanilla().get("apple").unwrap());

        assert_eq!(host.personal_slot(player, 0), None);
        host.set_personal_slot(player, 40, Some(apple.clone()));
        host.set_personal_slot(player, PERSONAL_STORAGE_SIZE, Some(apple.clone()));
        assert_eq!(host.personal_slot(player, 40), Some(apple));
        assert_eq!(host.personal_slot(player, PERSONAL_STORAGE_SIZE), None);
    }
}
