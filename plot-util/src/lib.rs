pub mod text;

/// Section sign used as the marker of the legacy color format.
pub const LEGACY_SECTION_CHAR: char = '§';

/// Marker most plugins let users type instead of the section sign.
pub const LEGACY_AMPERSAND_CHAR: char = '&';
