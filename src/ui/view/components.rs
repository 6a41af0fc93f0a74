//! 通用 UI 组件
//!
//! 配色、对话框、输入框等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// 深色 / 浅色配色
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
}

impl Palette {
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::LightBlue,
                muted: Color::Gray,
                error: Color::LightRed,
                success: Color::LightGreen,
            }
        } else {
            Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::DarkGray,
                error: Color::Red,
                success: Color::Green,
            }
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(palette.base().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带有标题和样式的输入框，`masked` 时以 * 显示
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    masked: bool,
    palette: &Palette,
) {
    let style = if is_focused {
        palette
            .base()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        palette.base().fg(palette.muted)
    };

    let shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let input = Paragraph::new(shown)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// [组件] 表单底部的错误或提示行
pub fn render_hint(frame: &mut Frame, area: Rect, error: Option<&str>, hint: &str, palette: &Palette) {
    let (text, style) = match error {
        Some(e) => (e, palette.base().fg(palette.error)),
        None => (hint, palette.base().fg(palette.muted)),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}
