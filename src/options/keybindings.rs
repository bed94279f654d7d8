use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::input::MoveAction;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Configurable keyboard bindings mapping movement actions to key codes.
///
/// Key strings use winit's `KeyCode` debug names (`"KeyW"`, `"ArrowUp"`).
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `Forward` → `"KeyW"`).
    pub bindings: HashMap<MoveAction, String>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, MoveAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        Self::from_bindings(HashMap::from([
            (MoveAction::Forward, "KeyW".into()),
            (MoveAction::Back, "KeyS".into()),
            (MoveAction::Left, "KeyA".into()),
            (MoveAction::Right, "KeyD".into()),
        ]))
    }
}

impl<'de> Deserialize<'de> for KeybindingOptions {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(default)]
        struct Raw {
            bindings: HashMap<MoveAction, String>,
        }

        impl Default for Raw {
            fn default() -> Self {
                Self {
                    bindings: KeybindingOptions::default().bindings,
                }
            }
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::from_bindings(raw.bindings))
    }
}

impl KeybindingOptions {
    /// Bindings with the reverse map built.
    #[must_use]
    pub fn from_bindings(bindings: HashMap<MoveAction, String>) -> Self {
        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }

    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<MoveAction> {
        self.key_to_action.get(key).copied()
    }
}
