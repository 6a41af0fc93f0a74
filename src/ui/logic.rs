//! 业务逻辑处理 (Update/Dispatch)
//!
//! 将界面 Action 转换为 Store Action，并维护视图本地的编辑状态

use std::sync::mpsc::TryRecvError;

use tracing::{debug, info, warn};

use super::actions::Action;
use super::state::{App, AppMode, AuthForm, EditForm, FeedbackForm, NoteForm, PendingAuth};
use crate::authenticator::{AuthMode, AuthOutcome};
use crate::models::{Category, FeedbackData, Note};
use crate::store::{AuthAction, NotesAction, ThemeAction};

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),
            Action::NextCategory => self.switch_category(self.category.next()),
            Action::PrevCategory => self.switch_category(self.category.prev()),

            Action::StartSearch => self.mode = AppMode::Searching,
            Action::ClearSearch => self.set_search(String::new()),
            Action::StartLogin => self.start_auth(AuthMode::Login),
            Action::StartSignup => self.start_auth(AuthMode::Signup),
            Action::Logout => self.logout(),
            Action::ToggleTheme => {
                self.store.dispatch(ThemeAction::Toggle);
            }
            Action::StartAddNote => self.start_add_note(),
            Action::StartEditNote => self.start_edit_note(),
            Action::StartFeedback => self.mode = AppMode::Feedback(FeedbackForm::default()),

            Action::NextField => self.mode.next_field(),
            Action::CycleOption => self.cycle_option(),
            Action::Cancel => self.cancel(),
            Action::Submit => self.submit(),

            Action::Input(c) => {
                if self.pending_auth.is_some() {
                    return false;
                }
                if self.mode == AppMode::Searching {
                    let mut search = self.search.clone();
                    search.push(c);
                    self.set_search(search);
                } else if let Some(buffer) = self.mode.input_buffer() {
                    buffer.push(c);
                }
            }

            Action::DeleteChar => {
                if self.pending_auth.is_some() {
                    return false;
                }
                if self.mode == AppMode::Searching {
                    let mut search = self.search.clone();
                    search.pop();
                    self.set_search(search);
                } else if let Some(buffer) = self.mode.input_buffer() {
                    buffer.pop();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.visible_notes().len() {
            self.selected_index += 1;
        }
    }

    fn switch_category(&mut self, category: Category) {
        self.category = category;
        self.selected_index = 0;
    }

    fn set_search(&mut self, search: String) {
        self.search = search;
        self.selected_index = 0;
    }

    // ============ 认证相关 ============

    fn start_auth(&mut self, mode: AuthMode) {
        if self.store.get_state().auth.is_authenticated {
            self.message = Some("Already logged in".to_string());
            return;
        }
        self.mode = AppMode::Auth(AuthForm::new(mode));
    }

    fn logout(&mut self) {
        if !self.store.get_state().auth.is_authenticated {
            return;
        }
        self.store.dispatch(AuthAction::Logout);
        self.message = Some("Logged out".to_string());
        info!("user logged out");
    }

    fn submit_auth(&mut self, form: &AuthForm) {
        if self.pending_auth.is_some() {
            return;
        }
        if let Err(e) = form.creds.validate(form.mode) {
            if let AppMode::Auth(f) = &mut self.mode {
                f.error = Some(e.to_string());
            }
            return;
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        let rx = self
            .authenticator
            .spawn(request_id, form.mode, form.creds.clone());
        self.pending_auth = Some(PendingAuth { request_id, rx });
        if let AppMode::Auth(f) = &mut self.mode {
            f.error = None;
        }
    }

    /// 检查后台认证是否完成，返回是否有更新
    pub fn poll_auth(&mut self) -> bool {
        let Some(pending) = &self.pending_auth else {
            return false;
        };

        match pending.rx.try_recv() {
            Ok(outcome) => {
                self.pending_auth = None;
                self.apply_auth_outcome(outcome);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                warn!("auth worker exited without a result");
                self.pending_auth = None;
                self.message = Some("An unknown error occurred".to_string());
                true
            }
        }
    }

    /// 每个请求独占一个通道，取消即丢弃接收端，所以这里收到的总是当前请求的结果
    fn apply_auth_outcome(&mut self, outcome: AuthOutcome) {
        debug!(request_id = outcome.request_id, mode = ?outcome.mode, "auth response");
        let action = outcome.into_action();
        match &action {
            AuthAction::LoginSuccess(user) => {
                self.message = Some(format!("Welcome back, {}!", user.username));
                self.mode = AppMode::Normal;
                info!(username = %user.username, admin = user.is_admin, "login succeeded");
            }
            AuthAction::SignupSuccess(user) => {
                self.message = Some("Account created successfully!".to_string());
                self.mode = AppMode::Normal;
                info!(username = %user.username, admin = user.is_admin, "signup succeeded");
            }
            AuthAction::LoginFailure(msg) | AuthAction::SignupFailure(msg) => {
                self.message = Some(msg.clone());
                if let AppMode::Auth(f) = &mut self.mode {
                    f.error = Some(msg.clone());
                }
                info!(error = %msg, "authentication failed");
            }
            AuthAction::Logout => {}
        }
        self.store.dispatch(action);
    }

    // ============ 笔记相关 ============

    fn start_add_note(&mut self) {
        if !self.is_admin() {
            self.message = Some("Admin access required".to_string());
            return;
        }
        self.mode = AppMode::AddingNote(NoteForm {
            category: self.category,
            field: 1,
            ..NoteForm::default()
        });
    }

    fn submit_note(&mut self, form: &NoteForm) {
        let error = if form.question.trim().is_empty() {
            Some("Question is required")
        } else if form.answer.trim().is_empty() {
            Some("Answer is required")
        } else {
            None
        };
        if let Some(e) = error {
            if let AppMode::AddingNote(f) = &mut self.mode {
                f.error = Some(e.to_string());
            }
            return;
        }

        let code = Some(form.code.clone()).filter(|c| !c.is_empty());
        let note = Note::new(
            form.question.clone(),
            form.answer.clone(),
            form.category,
            code,
        );
        self.store.dispatch(NotesAction::AddNote(note));

        // 跳转到新笔记所在分类，新笔记位于列表最前
        self.category = form.category;
        self.search.clear();
        self.selected_index = 0;
        self.mode = AppMode::Normal;
        self.message = Some("Note added".to_string());
    }

    fn start_edit_note(&mut self) {
        if !self.is_admin() {
            self.message = Some("Admin access required".to_string());
            return;
        }
        if let Some(form) = self.selected_note().map(EditForm::new) {
            self.mode = AppMode::EditingNote(form);
        }
    }

    fn submit_edit(&mut self, form: &EditForm) {
        self.store.dispatch(NotesAction::UpdateNote(form.to_note()));
        self.mode = AppMode::Normal;
        self.message = Some("Note updated".to_string());
    }

    // ============ 反馈 ============

    fn submit_feedback(&mut self, form: &FeedbackForm) {
        let feedback = FeedbackData::new(form.name.clone(), form.email.clone(), form.message.clone());
        match feedback.validate() {
            Ok(()) => {
                info!(id = %feedback.id, "feedback received");
                self.mode = AppMode::Normal;
                self.message = Some("Thank you for your feedback! We'll review it shortly.".to_string());
            }
            Err(e) => {
                if let AppMode::Feedback(f) = &mut self.mode {
                    f.error = Some(e.to_string());
                }
            }
        }
    }

    // ============ 通用操作 ============

    fn cycle_option(&mut self) {
        if self.pending_auth.is_some() {
            return;
        }
        match &mut self.mode {
            AppMode::Auth(form) => {
                let mode = match form.mode {
                    AuthMode::Login => AuthMode::Signup,
                    AuthMode::Signup => AuthMode::Login,
                };
                *form = AuthForm::new(mode);
            }
            AppMode::AddingNote(form) if form.field == 0 => {
                form.category = form.category.next();
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        match self.mode.clone() {
            AppMode::Searching => self.mode = AppMode::Normal,
            AppMode::Auth(form) => self.submit_auth(&form),
            AppMode::AddingNote(form) => self.submit_note(&form),
            AppMode::EditingNote(form) => self.submit_edit(&form),
            AppMode::Feedback(form) => self.submit_feedback(&form),
            AppMode::Normal => {}
        }
    }

    /// 取消当前操作；进行中的认证请求被放弃，其结果将被忽略
    pub fn cancel(&mut self) {
        if self.mode == AppMode::Searching {
            self.set_search(String::new());
        }
        if let Some(pending) = self.pending_auth.take() {
            info!(request_id = pending.request_id, "auth request abandoned");
        }
        self.mode = AppMode::Normal;
        self.message = None;
    }
}
