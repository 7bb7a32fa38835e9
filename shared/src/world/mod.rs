pub mod error;
pub mod overlay_style;
pub mod overlay_tag;
pub mod world_type;
