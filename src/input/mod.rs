mod keymap;

pub use keymap::{HostAction, KeyContext, KeymapPreset, map_key_with_preset};
