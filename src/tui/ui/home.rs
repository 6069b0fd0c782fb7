//! Home screen: banner, session status and quick actions.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::Session;
use crate::tui::styles::{MedicalTheme, LOGO};

/// Render the home view.
pub fn render_home(f: &mut Frame, area: Rect, session: &Session, generating: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Banner
            Constraint::Min(0),    // Panels
        ])
        .split(area);

    let mut banner: Vec<Line> = LOGO
        .lines()
        .skip(1)
        .map(|l| Line::from(Span::styled(l.to_string(), MedicalTheme::subtitle())))
        .collect();
    banner.push(Line::from(Span::styled(
        "  Diabetes risk self-assessment from five routine measurements",
        MedicalTheme::text_secondary(),
    )));
    f.render_widget(Paragraph::new(banner), chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(chunks[1]);

    render_session_status(f, panels[0], session, generating);
    render_actions(f, panels[1]);
}

fn render_session_status(f: &mut Frame, area: Rect, session: &Session, generating: bool) {
    let assessment_status = match session.assessment() {
        Some(a) => (format!("{} ({}/100)", a.risk, a.risk_score), MedicalTheme::risk_level(a.risk)),
        None if generating => ("generating...".to_string(), MedicalTheme::info()),
        None => ("not started".to_string(), MedicalTheme::text_muted()),
    };

    let items = vec![
        status_item("Patient information", session.profile().is_some()),
        status_item("Medical test", session.measurements().is_some()),
        Line::from(vec![
            Span::styled("  Assessment: ", MedicalTheme::text_secondary()),
            Span::styled(assessment_status.0, assessment_status.1),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" Current Session ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(items).block(block), area);
}

fn status_item(label: &str, done: bool) -> Line<'static> {
    let (icon, style) = if done {
        ("done", MedicalTheme::success())
    } else {
        ("----", MedicalTheme::text_muted())
    };

    Line::from(vec![
        Span::styled(format!("  {icon} "), style),
        Span::styled(label.to_string(), MedicalTheme::text()),
    ])
}

fn render_actions(f: &mut Frame, area: Rect) {
    let action = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
            Span::styled(desc, MedicalTheme::key_desc()),
        ])
    };

    let actions = vec![
        action("Enter", "Start Assessment"),
        action("R", "View Results"),
        action("T", "Health Tips"),
        action("Q", "Quit"),
    ];

    let block = Block::default()
        .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(actions).block(block), area);
}
