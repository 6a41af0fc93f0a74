//! Store Action 定义
//!
//! 按 slice 分命名空间的封闭命令集合，每个变体携带自己的类型化载荷。

use crate::models::{Note, User};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Theme(ThemeAction),
    Auth(AuthAction),
    Notes(NotesAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginSuccess(User),
    SignupSuccess(User),
    LoginFailure(String),
    SignupFailure(String),
    Logout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotesAction {
    AddNote(Note),
    UpdateNote(Note),
    // 视图层不使用删除
    #[allow(dead_code)]
    DeleteNote(String),
}

impl Action {
    /// `slice/command` 形式的名称，用于日志
    pub fn name(&self) -> &'static str {
        match self {
            Action::Theme(ThemeAction::Toggle) => "theme/toggle",
            Action::Auth(AuthAction::LoginSuccess(_)) => "auth/loginSuccess",
            Action::Auth(AuthAction::SignupSuccess(_)) => "auth/signupSuccess",
            Action::Auth(AuthAction::LoginFailure(_)) => "auth/loginFailure",
            Action::Auth(AuthAction::SignupFailure(_)) => "auth/signupFailure",
            Action::Auth(AuthAction::Logout) => "auth/logout",
            Action::Notes(NotesAction::AddNote(_)) => "notes/addNote",
            Action::Notes(NotesAction::UpdateNote(_)) => "notes/updateNote",
            Action::Notes(NotesAction::DeleteNote(_)) => "notes/deleteNote",
        }
    }
}

impl From<ThemeAction> for Action {
    fn from(action: ThemeAction) -> Self {
        Action::Theme(action)
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<NotesAction> for Action {
    fn from(action: NotesAction) -> Self {
        Action::Notes(action)
    }
}
