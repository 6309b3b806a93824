use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct InventoryConfig {
    /// Resend the player's inventory after every slot write into an open view.
    pub refresh_on_set: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            refresh_on_set: true,
        }
    }
}
