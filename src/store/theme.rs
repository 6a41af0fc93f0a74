use tracing::warn;

use super::action::ThemeAction;
use crate::error::StorageError;
use crate::storage::{PreferenceStore, system_prefers_dark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    pub dark_mode: bool,
}

/// 初始主题：已保存的偏好优先，否则取终端配色提示
///
/// 无法识别的保存值按浅色处理（只有 `dark` 是深色）
pub fn initialize(prefs: &dyn PreferenceStore) -> ThemeState {
    let saved = match prefs.load_dark_mode() {
        Ok(saved) => saved,
        Err(StorageError::InvalidTheme(value)) => {
            warn!(value = %value, "unrecognized theme preference, using light");
            Some(false)
        }
        Err(e) => {
            warn!(error = %e, "ignoring unreadable theme preference");
            None
        }
    };

    ThemeState {
        dark_mode: saved.unwrap_or_else(system_prefers_dark),
    }
}

pub fn reduce(state: &ThemeState, action: &ThemeAction) -> ThemeState {
    match action {
        ThemeAction::Toggle => ThemeState {
            dark_mode: !state.dark_mode,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPreferenceStore;

    #[test]
    fn test_initialize_from_saved() {
        let prefs = MemoryPreferenceStore::with_value("dark");
        assert!(initialize(&prefs).dark_mode);

        let prefs = MemoryPreferenceStore::with_value("light");
        assert!(!initialize(&prefs).dark_mode);
    }

    #[test]
    fn test_initialize_without_saved_uses_hint() {
        let prefs = MemoryPreferenceStore::default();
        assert_eq!(initialize(&prefs).dark_mode, system_prefers_dark());
    }

    #[test]
    fn test_initialize_unrecognized_is_light() {
        let prefs = MemoryPreferenceStore::with_value("purple");
        assert!(!initialize(&prefs).dark_mode);

        let prefs = MemoryPreferenceStore::with_value("Dark");
        assert!(!initialize(&prefs).dark_mode);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let state = ThemeState { dark_mode: true };
        let once = reduce(&state, &ThemeAction::Toggle);
        assert!(!once.dark_mode);
        assert_eq!(reduce(&once, &ThemeAction::Toggle), state);
    }
}
