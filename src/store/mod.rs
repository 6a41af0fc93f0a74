//! 全局状态容器
//!
//! 由三个 slice 组成：
//! - theme (theme.rs): 深色模式开关，切换时写入偏好存储
//! - auth (auth.rs): 登录状态与当前用户
//! - notes (notes.rs): 笔记列表及其派生过滤视图
//!
//! 所有修改都通过 `Store::dispatch` 同步完成。每个 Action 只作用于其命名空间
//! 对应的 slice；若新 slice 与旧值相等则视为无变化，不通知订阅者。

pub mod action;
pub mod auth;
pub mod notes;
pub mod theme;

use tracing::{debug, warn};

use crate::models::{Category, Note};
use crate::storage::PreferenceStore;
pub use action::{Action, AuthAction, NotesAction, ThemeAction};
pub use auth::{AuthPhase, AuthState};
pub use notes::{NotesState, filter_notes};
pub use theme::ThemeState;

/// 完整状态树
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub theme: ThemeState,
    pub auth: AuthState,
    pub notes: NotesState,
}

/// 订阅句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState)>;

pub struct Store {
    state: AppState,
    prefs: Box<dyn PreferenceStore>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Store {
    /// 以种子笔记创建，主题从偏好存储初始化
    pub fn new(prefs: Box<dyn PreferenceStore>) -> Self {
        Self::with_notes(prefs, NotesState::default())
    }

    pub fn with_notes(prefs: Box<dyn PreferenceStore>, notes: NotesState) -> Self {
        let theme = theme::initialize(&*prefs);
        Self {
            state: AppState {
                theme,
                auth: AuthState::default(),
                notes,
            },
            prefs,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get_state(&self) -> &AppState {
        &self.state
    }

    /// 分发 Action，返回最新状态
    pub fn dispatch(&mut self, action: impl Into<Action>) -> &AppState {
        let action = action.into();
        let changed = match &action {
            Action::Theme(a) => {
                let next = theme::reduce(&self.state.theme, a);
                let changed = replace_if_changed(&mut self.state.theme, next);
                if changed {
                    if let Err(e) = self.prefs.save_dark_mode(self.state.theme.dark_mode) {
                        warn!(error = %e, "failed to persist theme preference");
                    }
                }
                changed
            }
            Action::Auth(a) => {
                let next = auth::reduce(&self.state.auth, a);
                replace_if_changed(&mut self.state.auth, next)
            }
            Action::Notes(a) => {
                let next = notes::reduce(&self.state.notes, a);
                replace_if_changed(&mut self.state.notes, next)
            }
        };

        debug!(action = action.name(), changed, "dispatch");

        if changed {
            for (_, listener) in &mut self.listeners {
                listener(&self.state);
            }
        }
        &self.state
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// 取消订阅，返回是否确实移除了监听器
    #[allow(dead_code)]
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// 某分类下匹配搜索词的笔记
    pub fn visible_notes(&self, category: Category, search: &str) -> Vec<&Note> {
        filter_notes(&self.state.notes.notes, category, search)
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, next: T) -> bool {
    if *slot == next {
        false
    } else {
        *slot = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::path::PathBuf;
    use std::rc::Rc;

    use super::*;
    use crate::error::StorageError;
    use crate::models::User;
    use crate::storage::MemoryPreferenceStore;

    fn store() -> Store {
        Store::new(Box::new(MemoryPreferenceStore::with_value("light")))
    }

    fn note(id: &str, category: Category) -> Note {
        Note {
            id: id.to_string(),
            question: "Q".to_string(),
            answer: "A".to_string(),
            category,
            code: None,
            created_at: "t".to_string(),
        }
    }

    #[test]
    fn test_end_to_end_add_then_filter() {
        let mut store = store();
        assert_eq!(store.get_state().notes.notes.len(), 6);

        store.dispatch(NotesAction::AddNote(note("7", Category::React)));

        let react = store.visible_notes(Category::React, "");
        assert_eq!(react.len(), 3);
        assert_eq!(react[0].id, "7");
    }

    #[test]
    fn test_dispatch_touches_only_target_slice() {
        let mut store = store();
        let before = store.get_state().clone();

        let after = store.dispatch(ThemeAction::Toggle).clone();
        assert_ne!(after.theme, before.theme);
        assert_eq!(after.auth, before.auth);
        assert_eq!(after.notes, before.notes);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let prefs = Rc::new(MemoryPreferenceStore::with_value("dark"));
        let mut store = Store::new(Box::new(prefs.clone()));
        assert!(store.get_state().theme.dark_mode);

        store.dispatch(ThemeAction::Toggle);
        assert_eq!(prefs.raw().as_deref(), Some("light"));

        store.dispatch(ThemeAction::Toggle);
        assert!(store.get_state().theme.dark_mode);
        assert_eq!(prefs.raw().as_deref(), Some("dark"));
    }

    struct ReadOnlyPreferences;

    impl PreferenceStore for ReadOnlyPreferences {
        fn load_dark_mode(&self) -> Result<Option<bool>, StorageError> {
            Ok(Some(false))
        }

        fn save_dark_mode(&self, _dark_mode: bool) -> Result<(), StorageError> {
            Err(StorageError::Io {
                path: PathBuf::from("/read-only/theme"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }
    }

    #[test]
    fn test_toggle_survives_persist_failure() {
        let mut store = Store::new(Box::new(ReadOnlyPreferences));
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        store.subscribe(move |_| seen.set(seen.get() + 1));

        assert!(store.dispatch(ThemeAction::Toggle).theme.dark_mode);
        assert_eq!(calls.get(), 1);

        assert!(!store.dispatch(ThemeAction::Toggle).theme.dark_mode);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_subscribers_notified_on_change_only() {
        let mut store = store();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store.dispatch(NotesAction::UpdateNote(note("missing", Category::Code)));
        store.dispatch(NotesAction::DeleteNote("missing".to_string()));
        store.dispatch(AuthAction::Logout);
        assert_eq!(calls.get(), 0);

        store.dispatch(NotesAction::AddNote(note("7", Category::Code)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_listener_sees_new_state() {
        let mut store = store();
        let last = Rc::new(RefCell::new(None));
        let sink = last.clone();
        store.subscribe(move |state: &AppState| {
            *sink.borrow_mut() = state.auth.user.as_ref().map(|u| u.username.clone());
        });

        store.dispatch(AuthAction::LoginSuccess(User::new("admin", true)));
        assert_eq!(last.borrow().as_deref(), Some("admin"));
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = store();
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let id = store.subscribe(move |_| seen.set(seen.get() + 1));

        store.dispatch(ThemeAction::Toggle);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(ThemeAction::Toggle);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_dispatch_order_is_preserved() {
        let mut store = store();
        store.dispatch(AuthAction::LoginFailure("first".to_string()));
        store.dispatch(AuthAction::SignupFailure("second".to_string()));
        assert_eq!(store.get_state().auth.error.as_deref(), Some("second"));
        assert_eq!(store.get_state().auth.phase(), AuthPhase::AuthError);
    }
}
