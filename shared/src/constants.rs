// Overlay appearance

/// Text opacity of an overlay in its normal state (fully opaque)
pub const TEXT_OPACITY_FULL: u8 = 255;

/// Text opacity of an overlay while its owner is sneaking, roughly 25%
pub const TEXT_OPACITY_SNEAKING: u8 = 64;

/// Wide enough that a rank prefix plus name plus ping never wraps
pub const DEFAULT_LINE_WIDTH: u32 = 200;

/// 1.0 corresponds to the host's normal entity view distance
pub const DEFAULT_VIEW_RANGE: f32 = 1.0;

// Vanish detection

/// Agent flag key consulted by the fallback vanish source
pub const VANISHED_FLAG_KEY: &str = "vanished";
