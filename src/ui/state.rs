//! App 状态定义 (Model)
//!
//! 共享状态全部在 Store 中；这里只保存视图本地的编辑缓冲区和导航位置。

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

use crate::authenticator::{AuthMode, AuthOutcome, Credentials, MockAuthenticator};
use crate::models::{Category, Note};
use crate::store::Store;

/// 应用状态
pub struct App {
    pub store: Store,
    pub authenticator: MockAuthenticator,
    pub category: Category,
    pub selected_index: usize,
    pub search: String,
    pub mode: AppMode,
    pub message: Option<String>,
    pub pending_auth: Option<PendingAuth>,
    pub(super) next_request_id: u64,
    redraw: Rc<Cell<bool>>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Searching,
    Auth(AuthForm),
    AddingNote(NoteForm),
    EditingNote(EditForm),
    Feedback(FeedbackForm),
}

/// 进行中的模拟登录
pub struct PendingAuth {
    pub request_id: u64,
    pub rx: Receiver<AuthOutcome>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub creds: Credentials,
    pub field: usize,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            creds: Credentials::default(),
            field: 0,
            error: None,
        }
    }

    pub fn field_count(&self) -> usize {
        match self.mode {
            AuthMode::Login => 2,
            AuthMode::Signup => 4,
        }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.field {
            0 => Some(&mut self.creds.username),
            1 => Some(&mut self.creds.password),
            2 => Some(&mut self.creds.confirm_password),
            3 => Some(&mut self.creds.special_code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteForm {
    pub category: Category,
    pub question: String,
    pub answer: String,
    pub code: String,
    pub field: usize, // 0 分类, 1 问题, 2 答案, 3 代码
    pub error: Option<String>,
}

impl NoteForm {
    pub fn field_count(&self) -> usize {
        if self.category == Category::Code { 4 } else { 3 }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.field {
            1 => Some(&mut self.question),
            2 => Some(&mut self.answer),
            3 => Some(&mut self.code),
            _ => None,
        }
    }
}

/// 编辑已有笔记的答案（代码分类可编辑代码）
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub original: Note,
    pub answer: String,
    pub code: String,
    pub field: usize,
}

impl EditForm {
    pub fn new(note: &Note) -> Self {
        Self {
            original: note.clone(),
            answer: note.answer.clone(),
            code: note.code.clone().unwrap_or_default(),
            field: 0,
        }
    }

    pub fn field_count(&self) -> usize {
        if self.original.category == Category::Code { 2 } else { 1 }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.field {
            0 => Some(&mut self.answer),
            1 => Some(&mut self.code),
            _ => None,
        }
    }

    /// 提交时的完整替换记录
    pub fn to_note(&self) -> Note {
        let code = if self.original.category == Category::Code {
            Some(self.code.clone())
        } else {
            self.original.code.clone()
        };
        Note {
            answer: self.answer.clone(),
            code,
            ..self.original.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedbackForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub field: usize,
    pub error: Option<String>,
}

impl FeedbackForm {
    pub const FIELD_COUNT: usize = 3;

    pub fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.field {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.message),
            _ => None,
        }
    }
}

impl AppMode {
    /// 当前聚焦的输入缓冲区
    pub fn input_buffer(&mut self) -> Option<&mut String> {
        match self {
            AppMode::Auth(form) => form.buffer_mut(),
            AppMode::AddingNote(form) => form.buffer_mut(),
            AppMode::EditingNote(form) => form.buffer_mut(),
            AppMode::Feedback(form) => form.buffer_mut(),
            AppMode::Normal | AppMode::Searching => None,
        }
    }

    /// 焦点移到下一个字段（循环）
    pub fn next_field(&mut self) {
        fn step(field: &mut usize, count: usize) {
            *field = (*field + 1) % count.max(1);
        }
        match self {
            AppMode::Auth(form) => {
                let count = form.field_count();
                step(&mut form.field, count);
            }
            AppMode::AddingNote(form) => {
                let count = form.field_count();
                step(&mut form.field, count);
            }
            AppMode::EditingNote(form) => {
                let count = form.field_count();
                step(&mut form.field, count);
            }
            AppMode::Feedback(form) => step(&mut form.field, FeedbackForm::FIELD_COUNT),
            AppMode::Normal | AppMode::Searching => {}
        }
    }
}

impl App {
    /// 创建新的应用实例，并订阅 Store 的变化以触发重绘
    pub fn new(mut store: Store, authenticator: MockAuthenticator) -> Self {
        let redraw = Rc::new(Cell::new(true));
        let flag = redraw.clone();
        store.subscribe(move |_| flag.set(true));

        Self {
            store,
            authenticator,
            category: Category::React,
            selected_index: 0,
            search: String::new(),
            mode: AppMode::Normal,
            message: None,
            pending_auth: None,
            next_request_id: 0,
            redraw,
        }
    }

    /// 当前分类下的可见笔记
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.store.visible_notes(self.category, &self.search)
    }

    /// 确保选中索引有效
    pub fn refresh_selection(&mut self) {
        let len = self.visible_notes().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// 获取当前选中的笔记
    pub fn selected_note(&self) -> Option<&Note> {
        self.visible_notes().get(self.selected_index).copied()
    }

    pub fn is_admin(&self) -> bool {
        self.store.get_state().auth.is_admin()
    }

    pub fn request_redraw(&self) {
        self.redraw.set(true);
    }

    /// 读取并清除重绘标记
    pub fn take_redraw(&self) -> bool {
        self.redraw.replace(false)
    }
}
