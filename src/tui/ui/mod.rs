//! UI module: View components for the TUI.

pub mod assessment;
pub mod form;
pub mod home;
pub mod measurement;
pub mod patient;
pub mod tips;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::Stage;
use crate::tui::styles::MedicalTheme;

/// One-line notice shown under the navigation bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Navigation bar: one tab per navigable stage with its function key.
pub fn render_nav(f: &mut Frame, area: Rect, current: Stage, notice: Option<&Notice>) {
    // Generating is shown on the Results tab
    let active = if current == Stage::Generating {
        Stage::Result
    } else {
        current
    };

    let mut tabs = vec![Span::styled(" Glucoscreen ", MedicalTheme::header()), Span::raw(" ")];
    for (i, stage) in Stage::NAVIGABLE.iter().enumerate() {
        let style = if *stage == active {
            MedicalTheme::tab_active()
        } else {
            MedicalTheme::tab()
        };
        tabs.push(Span::styled(format!(" F{} {} ", i + 1, stage.label()), style));
        tabs.push(Span::raw(" "));
    }

    let notice_line = match notice {
        Some(Notice::Info(msg)) => Line::from(Span::styled(format!(" {msg}"), MedicalTheme::info())),
        Some(Notice::Error(msg)) => {
            Line::from(Span::styled(format!(" ! {msg}"), MedicalTheme::danger()))
        }
        None => Line::from(""),
    };

    let nav = Paragraph::new(vec![Line::from(tabs), notice_line]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(nav, area);
}

/// Footer of `[key] description` pairs.
pub fn render_key_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
                Span::styled(format!("{desc}  "), MedicalTheme::key_desc()),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "DISCLAIMER: This prediction is for informational purposes only and does not replace professional medical evaluation.",
            MedicalTheme::text_muted(),
        )),
        Line::from(Span::styled(
            "[Ctrl+R] Reset session  [Ctrl+L] Log out  [Ctrl+Q] Quit",
            MedicalTheme::text_muted(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
