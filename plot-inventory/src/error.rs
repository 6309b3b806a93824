use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Unknown item type `{0}`")]
    UnknownType(String),
    #[error("An inventory has between 1 and 6 rows, got {0}")]
    InvalidRows(u8),
    #[error("Slot {index} is outside of the {size} slot inventory")]
    InvalidSlot { index: usize, size: usize },
}
