use crate::{
    host::{PlayerId, ViewId},
    item::PortableItem,
    InventoryError,
};

/// What a handle remembers about the view it opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    #[default]
    Closed,
    Open(ViewId),
}

/// A handle's bookkeeping compared with what the player actually sees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewStatus {
    Closed,
    OpenByThisHandle,
    /// The handle opened a view, but the player now has another one open or
    /// none at all.
    OpenByOther,
}

/// A chest-like menu of `rows` × 9 slots shown to one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotInventory {
    player: PlayerId,
    rows: u8,
    title: String,
    items: Vec<Option<PortableItem>>,
    view: ViewState,
}

impl PlotInventory {
    pub const COLUMNS: usize = 9;
    pub const MAX_ROWS: u8 = 6;

    pub fn new(
        player: PlayerId,
        rows: u8,
        title: impl Into<String>,
    ) -> Result<Self, InventoryError> {
        if !(1..=Self::MAX_ROWS).contains(&rows) {
            return Err(InventoryError::InvalidRows(rows));
        }
        Ok(Self {
            player,
            rows,
            title: title.into(),
            items: vec![None; usize::from(rows) * Self::COLUMNS],
            view: ViewState::Closed,
        })
    }

    pub fn slot_index(row: usize, column: usize) -> usize {
        row * Self::COLUMNS + column
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[Option<PortableItem>] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&PortableItem> {
        self.items.get(index)?.as_ref()
    }

    /// Replaces a slot of the handle, returning the previous item. Changes only
    /// reach an open view through the adapter.
    pub fn set_slot(
        &mut self,
        index: usize,
        item: Option<PortableItem>,
    ) -> Result<Option<PortableItem>, InventoryError> {
        let size = self.size();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(InventoryError::InvalidSlot { index, size })?;
        Ok(std::mem::replace(slot, item))
    }

    pub fn clear(&mut self) {
        self.items.fill(None);
    }

    pub fn view_state(&self) -> ViewState {
        self.view
    }

    /// Whether this handle believes it is open. See `InventoryAdapter::is_open`
    /// for what the player actually sees.
    pub fn is_marked_open(&self) -> bool {
        matches!(self.view, ViewState::Open(_))
    }

    pub(crate) fn mark_open(&mut self, view: ViewId) {
        self.view = ViewState::Open(view);
    }

    pub(crate) fn mark_closed(&mut self) {
        self.view = ViewState::Closed;
    }
}

#[cfg(test)]
mod test {
    use super::{PlotInventory, ViewState};
    use crate::{host::PlayerId, item::PortableItem, InventoryError};

    #[test]
    fn rows_are_bounded() {
        let player = PlayerId::new_random();
        assert_eq!(
            PlotInventory::new(player, 0, "x"),
            Err(InventoryError::InvalidRows(0))
        );
        assert_eq!(
            PlotInventory::new(player, 7, "x"),
            Err(InventoryError::InvalidRows(7))
        );
        for rows in 1..=6 {
            let inventory = PlotInventory::new(player, rows, "x").unwrap();
            assert_eq!(inventory.size(), usize::from(rows) * 9);
            assert_eq!(inventory.view_state(), ViewState::Closed);
        }
    }

    #[test]
    fn slots_are_row_major() {
        let mut inventory = PlotInventory::new(PlayerId::new_random(), 2, "x").unwrap();
        let index = PlotInventory::slot_index(1, 4);
        assert_eq!(index, 13);

        let previous = inventory
            .set_slot(index, Some(PortableItem::new("STONE", 1)))
            .unwrap();
        assert_eq!(previous, None);
        assert_eq!(inventory.item(13).map(|item| item.amount), Some(1));
        assert_eq!(
            inventory.set_slot(18, None),
            Err(InventoryError::InvalidSlot {
                index: 18,
                size: 18
            })
        );

        inventory.clear();
        assert!(inventory.items().iter().all(Option::is_none));
    }
}
