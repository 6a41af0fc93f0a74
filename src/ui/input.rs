//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: &AppMode, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(Action::NextCategory),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Some(Action::PrevCategory),
            KeyCode::Char('/') => Some(Action::StartSearch),
            KeyCode::Char('x') => Some(Action::ClearSearch),
            KeyCode::Char('i') => Some(Action::StartLogin),
            KeyCode::Char('u') => Some(Action::StartSignup),
            KeyCode::Char('o') => Some(Action::Logout),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('a') => Some(Action::StartAddNote),
            KeyCode::Char('e') => Some(Action::StartEditNote),
            KeyCode::Char('f') => Some(Action::StartFeedback),
            _ => None,
        },
        AppMode::Searching => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Auth(_) | AppMode::AddingNote(_) => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::Left | KeyCode::Right => Some(Action::CycleOption),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::EditingNote(_) | AppMode::Feedback(_) => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Tab => Some(Action::NextField),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
    }
}

/// 处理按键事件，返回是否退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, key) {
        Some(action) => {
            app.request_redraw();
            app.dispatch(action)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::AuthMode;
    use crate::ui::state::AuthForm;

    #[test]
    fn test_normal_mode_bindings() {
        assert_eq!(get_action(&AppMode::Normal, KeyCode::Char('t')), Some(Action::ToggleTheme));
        assert_eq!(get_action(&AppMode::Normal, KeyCode::Tab), Some(Action::NextCategory));
        assert_eq!(get_action(&AppMode::Normal, KeyCode::Char('z')), None);
    }

    #[test]
    fn test_form_mode_captures_letters() {
        let mode = AppMode::Auth(AuthForm::new(AuthMode::Login));
        assert_eq!(get_action(&mode, KeyCode::Char('q')), Some(Action::Input('q')));
        assert_eq!(get_action(&mode, KeyCode::Esc), Some(Action::Cancel));
        assert_eq!(get_action(&AppMode::Searching, KeyCode::Char('t')), Some(Action::Input('t')));
    }
}
