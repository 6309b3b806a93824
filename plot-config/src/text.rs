use plot_util::{text::legacy::LegacySerializer, LEGACY_AMPERSAND_CHAR};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TextConfig {
    /// Marker users type instead of the section sign in inventory titles.
    pub alternate_color_char: char,
    /// Keep RGB colors as `§x` sequences instead of picking the nearest legacy color.
    /// Only clients newer than 1.16 understand them.
    pub hex_colors: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            alternate_color_char: LEGACY_AMPERSAND_CHAR,
            hex_colors: false,
        }
    }
}

impl TextConfig {
    pub fn serializer(&self) -> LegacySerializer {
        LegacySerializer::section().hex_colors(self.hex_colors)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.alternate_color_char.is_whitespace() {
            return Err(ConfigError::Invalid(
                "text.alternate_color_char must not be whitespace".to_string(),
            ));
        }
        Ok(())
    }
}
