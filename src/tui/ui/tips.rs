//! Health tips: static education content with scrolling.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::health_tips::{QUICK_TIPS, TIP_SECTIONS};
use crate::tui::styles::MedicalTheme;

#[derive(Debug, Default)]
pub struct TipsState {
    pub scroll: u16,
}

impl TipsState {
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1).min(max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

fn content_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in TIP_SECTIONS {
        lines.push(Line::from(Span::styled(section.title, MedicalTheme::subtitle())));
        for item in section.items {
            lines.push(Line::from(vec![
                Span::styled("  • ", MedicalTheme::info()),
                Span::styled(item.title, MedicalTheme::title()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", item.description),
                MedicalTheme::text_secondary(),
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn max_scroll() -> u16 {
    u16::try_from(content_lines().len()).unwrap_or(u16::MAX)
}

pub fn render_tips(f: &mut Frame, area: Rect, state: &TipsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[0]);

    let sections = Paragraph::new(content_lines())
        .block(
            Block::default()
                .title(Span::styled(" Health Tips ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(sections, columns[0]);

    let quick: Vec<Line> = QUICK_TIPS
        .iter()
        .map(|tip| {
            Line::from(vec![
                Span::styled("✓ ", MedicalTheme::success()),
                Span::styled(*tip, MedicalTheme::text()),
            ])
        })
        .collect();
    let quick = Paragraph::new(quick)
        .block(
            Block::default()
                .title(Span::styled(" Quick Tips ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(quick, columns[1]);

    super::render_key_hints(f, chunks[1], &[("↑↓", "Scroll"), ("Esc", "Home")]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_bounded() {
        let mut state = TipsState::default();
        state.scroll_up();
        assert_eq!(state.scroll, 0);
        for _ in 0..1000 {
            state.scroll_down();
        }
        assert_eq!(state.scroll, max_scroll());
    }
}
