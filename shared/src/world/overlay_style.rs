use crate::{DEFAULT_LINE_WIDTH, DEFAULT_VIEW_RANGE, TEXT_OPACITY_FULL};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Billboard {
    Fixed,
    Vertical,
    Horizontal,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

// Argb
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Argb {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Argb {
    pub fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Black with the given opacity, where `opacity` is clamped to `0.0..=1.0`
    pub fn black_with_opacity(opacity: f32) -> Self {
        if !(opacity > 0.0) {
            return Self::default();
        }
        let alpha = (opacity.min(1.0) * 255.0) as u8;
        Self::new(alpha, 0, 0, 0)
    }
}

// OverlayStyle
/// Everything the host needs to configure a freshly spawned overlay entity
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayStyle {
    pub billboard: Billboard,
    /// Whether the label renders through solid blocks
    pub see_through: bool,
    pub view_range: f32,
    pub shadowed: bool,
    pub background: Argb,
    pub scale: f32,
    /// Vertical translation above the owner's head
    pub translation_y: f32,
    pub alignment: TextAlignment,
    pub line_width: u32,
    pub text_opacity: u8,
    /// Always false: overlays never survive a restart
    pub persistent: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            billboard: Billboard::Center,
            see_through: true,
            view_range: DEFAULT_VIEW_RANGE,
            shadowed: true,
            background: Argb::default(),
            scale: 1.0,
            translation_y: 0.3,
            alignment: TextAlignment::Center,
            line_width: DEFAULT_LINE_WIDTH,
            text_opacity: TEXT_OPACITY_FULL,
            persistent: false,
        }
    }
}
