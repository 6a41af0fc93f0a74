//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件。配色随 theme slice 切换。

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::state::{App, AppMode, AuthForm, EditForm, FeedbackForm, NoteForm};
use crate::authenticator::AuthMode;
use crate::models::Category;
use crate::store::AuthPhase;
use components::{Palette, render_dialog_framework, render_hint, render_input_widget};
use layouts::{centered_rect, form_rows};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_mode(app.store.get_state().theme.dark_mode);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题栏
            Constraint::Length(3), // 分类
            Constraint::Length(3), // 搜索
            Constraint::Min(6),    // 列表
            Constraint::Length(10), // 详情
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    app.refresh_selection();

    render_navbar(frame, app, chunks[0], &palette);
    render_tabs(frame, app, chunks[1], &palette);
    render_search(frame, app, chunks[2], &palette);
    render_notes(frame, app, chunks[3], &palette);
    render_details(frame, app, chunks[4], &palette);
    render_help(frame, app, chunks[5], &palette);

    // 渲染弹窗
    match &app.mode {
        AppMode::Auth(form) => render_auth_dialog(frame, form, app.pending_auth.is_some(), &palette),
        AppMode::AddingNote(form) => render_add_dialog(frame, form, &palette),
        AppMode::EditingNote(form) => render_edit_dialog(frame, form, &palette),
        AppMode::Feedback(form) => render_feedback_dialog(frame, form, &palette),
        AppMode::Normal | AppMode::Searching => {}
    }
}

fn render_navbar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let state = app.store.get_state();
    let user = match (state.auth.phase(), &state.auth.user) {
        (AuthPhase::Authenticated, Some(user)) if user.is_admin => format!("{} (admin)", user.username),
        (AuthPhase::Authenticated, Some(user)) => user.username.clone(),
        (AuthPhase::AuthError, _) => "guest (login failed)".to_string(),
        _ => "guest".to_string(),
    };
    let theme = if state.theme.dark_mode { "dark" } else { "light" };

    let line = Line::from(vec![
        Span::styled(
            "Study Notes",
            palette.base().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   user: {user}   theme: {theme}"), palette.base().fg(palette.muted)),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).style(palette.base())),
        area,
    );
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let notes = &app.store.get_state().notes;
    let titles: Vec<String> = Category::ALL
        .iter()
        .map(|c| format!("{} ({})", c.label(), notes.count(*c)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.category.index())
        .style(palette.base().fg(palette.muted))
        .highlight_style(palette.base().fg(palette.accent).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, area);
}

fn render_search(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let focused = app.mode == AppMode::Searching;
    let title = format!("Search {} notes", app.category.label());
    render_input_widget(frame, area, &title, &app.search, focused, false, palette);
}

fn render_notes(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let notes = app.visible_notes();

    if notes.is_empty() {
        let text = if app.search.is_empty() {
            format!("No {} notes found.", app.category.label())
        } else {
            format!("No {} notes match your search.", app.category.label())
        };
        let empty = Paragraph::new(text)
            .style(palette.base().fg(palette.muted))
            .block(Block::default().title("Notes").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            let style = if i == app.selected_index {
                palette
                    .base()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                palette.base()
            };
            ListItem::new(Line::from(Span::styled(note.question.clone(), style)))
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Notes").borders(Borders::ALL));

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let mut lines = Vec::new();
    match app.selected_note() {
        Some(note) => {
            lines.push(Line::from(Span::styled(
                note.question.clone(),
                palette.base().fg(palette.accent).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(note.answer.clone()));
            if let (Category::Code, Some(code)) = (note.category, &note.code) {
                lines.push(Line::from(""));
                lines.extend(
                    code.lines()
                        .map(|l| Line::from(Span::styled(l.to_string(), palette.base().fg(palette.success)))),
                );
            }
        }
        None => lines.push(Line::from("Nothing selected")),
    }

    let details = Paragraph::new(lines)
        .style(palette.base())
        .block(Block::default().title("Answer").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(details, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let help_text = match &app.mode {
        AppMode::Normal => {
            let auth = if app.store.get_state().auth.is_authenticated {
                "[o] logout"
            } else {
                "[i] login  [u] sign up"
            };
            let admin = if app.is_admin() { "  [a] add  [e] edit" } else { "" };
            format!("[h/l] category  [j/k] move  [/] search  [x] clear  {auth}{admin}  [t] theme  [f] feedback  [q] quit")
        }
        AppMode::Searching => "type to filter  [Enter] done  [Esc] clear".to_string(),
        AppMode::Auth(_) if app.pending_auth.is_some() => "[Esc] cancel".to_string(),
        AppMode::Auth(_) => "[Tab] next field  [←/→] login/sign up  [Enter] submit  [Esc] cancel".to_string(),
        AppMode::AddingNote(_) => "[Tab] next field  [←/→] category  [Enter] save  [Esc] cancel".to_string(),
        AppMode::EditingNote(_) | AppMode::Feedback(_) => {
            "[Tab] next field  [Enter] submit  [Esc] cancel".to_string()
        }
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{help_text}  |  {message}"),
        _ => help_text,
    };

    let help = Paragraph::new(text)
        .style(palette.base().fg(palette.muted))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn render_auth_dialog(frame: &mut Frame, form: &AuthForm, pending: bool, palette: &Palette) {
    let area = centered_rect(50, 60, frame.area());
    let title = match form.mode {
        AuthMode::Login => "Login to Your Account",
        AuthMode::Signup => "Create New Account",
    };
    let inner = render_dialog_framework(frame, area, title, palette);

    let fields = [
        ("Username", form.creds.username.as_str(), false),
        ("Password", form.creds.password.as_str(), true),
        ("Confirm Password", form.creds.confirm_password.as_str(), true),
        ("Special Code (Optional)", form.creds.special_code.as_str(), false),
    ];
    let labels = &fields[..form.field_count()];
    let rows = form_rows(inner, &[3; 4][..labels.len()]);

    for (i, (label, value, masked)) in labels.iter().enumerate() {
        render_input_widget(frame, rows[i], label, value, i == form.field, *masked, palette);
    }

    let hint = match (pending, form.mode) {
        (true, AuthMode::Login) => "Logging in...",
        (true, AuthMode::Signup) => "Signing up...",
        (false, AuthMode::Login) => "Try \"admin\" for admin access or \"fail\" to test error handling",
        (false, AuthMode::Signup) => "Use \"ADMIN123\" as special code for admin access",
    };
    render_hint(frame, rows[labels.len()], form.error.as_deref(), hint, palette);
}

fn render_add_dialog(frame: &mut Frame, form: &NoteForm, palette: &Palette) {
    let area = centered_rect(70, 70, frame.area());
    let inner = render_dialog_framework(frame, area, "Add New Note", palette);

    let mut heights = vec![3, 3, 5];
    if form.category == Category::Code {
        heights.push(6);
    }
    let rows = form_rows(inner, &heights);

    render_input_widget(frame, rows[0], "Category", form.category.label(), form.field == 0, false, palette);
    render_input_widget(frame, rows[1], "Question", &form.question, form.field == 1, false, palette);
    render_input_widget(frame, rows[2], "Answer", &form.answer, form.field == 2, false, palette);
    if form.category == Category::Code {
        render_input_widget(frame, rows[3], "Code", &form.code, form.field == 3, false, palette);
    }

    render_hint(frame, rows[heights.len()], form.error.as_deref(), "Enter to save", palette);
}

fn render_edit_dialog(frame: &mut Frame, form: &EditForm, palette: &Palette) {
    let area = centered_rect(70, 60, frame.area());
    let inner = render_dialog_framework(frame, area, &form.original.question, palette);

    let has_code = form.field_count() > 1;
    let heights: Vec<u16> = if has_code { vec![6, 8] } else { vec![6] };
    let rows = form_rows(inner, &heights);

    render_input_widget(frame, rows[0], "Answer", &form.answer, form.field == 0, false, palette);
    if has_code {
        render_input_widget(frame, rows[1], "Code", &form.code, form.field == 1, false, palette);
    }
    render_hint(frame, rows[heights.len()], None, "Enter to update", palette);
}

fn render_feedback_dialog(frame: &mut Frame, form: &FeedbackForm, palette: &Palette) {
    let area = centered_rect(60, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "Feedback", palette);
    let rows = form_rows(inner, &[3, 3, 6]);

    render_input_widget(frame, rows[0], "Name", &form.name, form.field == 0, false, palette);
    render_input_widget(frame, rows[1], "Email", &form.email, form.field == 1, false, palette);
    render_input_widget(frame, rows[2], "Message", &form.message, form.field == 2, false, palette);
    render_hint(
        frame,
        rows[3],
        form.error.as_deref(),
        "We value your feedback!",
        palette,
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::authenticator::MockAuthenticator;
    use crate::storage::MemoryPreferenceStore;
    use crate::store::Store;
    use crate::ui::actions::Action;

    fn app() -> App {
        let store = Store::new(Box::new(MemoryPreferenceStore::with_value("dark")));
        App::new(store, MockAuthenticator::new(Duration::ZERO))
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_seed_notes() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("React (2)"));
        assert!(text.contains("What is React?"));
        assert!(text.contains("theme: dark"));
    }

    #[test]
    fn test_renders_empty_search() {
        let mut app = app();
        app.dispatch(Action::StartSearch);
        for c in "zzz".chars() {
            app.dispatch(Action::Input(c));
        }
        assert!(screen(&mut app).contains("No React notes match your search."));
    }

    #[test]
    fn test_renders_login_dialog() {
        let mut app = app();
        app.dispatch(Action::StartLogin);
        assert!(screen(&mut app).contains("Login to Your Account"));
    }
}
