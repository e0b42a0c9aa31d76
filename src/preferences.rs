//! User preferences owned by the presentation layer.

use crate::store::KeyValueStore;

/// Store key for keypad visibility.
pub const SHOW_KEYPAD_KEY: &str = "show_keypad_setting";
/// Store key for drawing key outlines.
pub const OUTLINE_KEYS_KEY: &str = "outline_keys_setting";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    /// Show the on-screen keypad.
    pub show_keypad: bool,
    /// Draw an outline around each key.
    pub outline_keys: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_keypad: true,
            outline_keys: true,
        }
    }
}

impl Preferences {
    /// Read preferences, falling back to the defaults for missing keys.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let defaults = Self::default();

        Self {
            show_keypad: store
                .get_bool(SHOW_KEYPAD_KEY)
                .unwrap_or(defaults.show_keypad),
            outline_keys: store
                .get_bool(OUTLINE_KEYS_KEY)
                .unwrap_or(defaults.outline_keys),
        }
    }

    /// Write preferences. The caller commits the store.
    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.put_bool(SHOW_KEYPAD_KEY, self.show_keypad);
        store.put_bool(OUTLINE_KEYS_KEY, self.outline_keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::load(&MemoryStore::new());
        assert!(prefs.show_keypad);
        assert!(prefs.outline_keys);
    }

    #[test]
    fn test_save_load() {
        let mut store = MemoryStore::new();
        let prefs = Preferences {
            show_keypad: false,
            outline_keys: true,
        };
        prefs.save(&mut store);

        assert_eq!(store.get_bool(SHOW_KEYPAD_KEY), Some(false));
        assert_eq!(Preferences::load(&store), prefs);
    }
}
