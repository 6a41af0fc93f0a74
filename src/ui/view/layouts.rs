use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 在 area 中居中，宽高按百分比
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// 表单布局：每个字段 3 行，末尾留 1 行提示
pub fn form_rows(area: Rect, fields: &[u16]) -> Vec<Rect> {
    let mut constraints: Vec<Constraint> = fields.iter().map(|h| Constraint::Length(*h)).collect();
    constraints.push(Constraint::Min(1));
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 40, area);
        assert_eq!(r.width, 60);
        assert_eq!(r.height, 20);
        assert_eq!(r.x, 20);
        assert_eq!(r.y, 15);
    }

    #[test]
    fn test_form_rows_count() {
        let rows = form_rows(Rect::new(0, 0, 40, 20), &[3, 3, 5]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].height, 5);
    }
}
