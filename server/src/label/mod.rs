mod composer;
mod legacy;

pub use composer::{ping_color, LabelComposer};
pub use legacy::{last_color, parse_legacy};

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use nametag_shared::LabelText;

/// Change-detection key for rendered content
pub fn label_hash(text: &LabelText) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}
