//! Generating gauge and prediction result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{MeasurementRecord, PatientProfile, RiskAssessment, RiskLevel};
use crate::tui::styles::MedicalTheme;

/// Render the simulated processing delay.
pub fn render_generating(f: &mut Frame, area: Rect, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .margin(2)
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Analyzing your medical data",
        MedicalTheme::title(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let progress = progress.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::info())
        .ratio(progress)
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, chunks[1]);

    let desc = Paragraph::new(Line::from(Span::styled(
        "Evaluating glucose, blood pressure, BMI, insulin and HbA1c...",
        MedicalTheme::text_muted(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(desc, chunks[2]);

    super::render_key_hints(f, chunks[4], &[("F1", "Home"), ("F5", "Health Tips")]);
}

/// Render a completed assessment.
pub fn render_result(
    f: &mut Frame,
    area: Rect,
    profile: &PatientProfile,
    measurements: &MeasurementRecord,
    assessment: &RiskAssessment,
) {
    let risk_style = MedicalTheme::risk_level(assessment.risk);

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    let block = Block::default()
        .title(Span::styled(
            format!(" Diabetes Prediction Result │ {} ", profile.name),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(risk_style);
    let inner = block.inner(outer[0]);
    f.render_widget(block, outer[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(inner);

    render_verdict(f, columns[0], assessment);
    render_details(f, columns[1], measurements, assessment);

    super::render_key_hints(
        f,
        outer[1],
        &[
            ("E", "Export Report"),
            ("N", "New Assessment"),
            ("F5", "Health Tips"),
            ("Esc", "Home"),
        ],
    );
}

fn render_verdict(f: &mut Frame, area: Rect, assessment: &RiskAssessment) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Risk level
            Constraint::Length(3), // Score gauge
            Constraint::Length(2), // Confidence
            Constraint::Min(0),    // Contributing factors
        ])
        .split(area);

    let risk_style = MedicalTheme::risk_level(assessment.risk);
    let icon = match assessment.risk {
        RiskLevel::Low => "OK",
        RiskLevel::High => "!",
    };
    let verdict = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{icon} {} RISK", assessment.risk),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            assessment.risk.description(),
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(verdict, chunks[0]);

    let score_gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Score ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::score_band(assessment.score_band()))
        .percent(u16::from(assessment.risk_score.min(100)))
        .label(format!("{}/100", assessment.risk_score));
    f.render_widget(score_gauge, chunks[1]);

    let confidence = Paragraph::new(Line::from(vec![
        Span::styled("Confidence: ", MedicalTheme::text_secondary()),
        Span::styled(format!("{:.1}%", assessment.confidence), MedicalTheme::text()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(confidence, chunks[2]);

    let mut lines = vec![Line::from(Span::styled(
        "Contributing factors",
        MedicalTheme::subtitle(),
    ))];
    let fired: Vec<_> = assessment
        .contributions
        .iter()
        .filter(|c| c.points > 0)
        .collect();
    if fired.is_empty() {
        lines.push(Line::from(Span::styled(
            "  None above threshold",
            MedicalTheme::text_muted(),
        )));
    }
    for c in fired {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", c.rule), MedicalTheme::text()),
            Span::styled(format!("+{}", c.points), MedicalTheme::warning()),
        ]));
    }
    f.render_widget(Paragraph::new(lines), chunks[3]);
}

fn render_details(
    f: &mut Frame,
    area: Rect,
    measurements: &MeasurementRecord,
    assessment: &RiskAssessment,
) {
    let mut lines = vec![Line::from(Span::styled("Test Summary", MedicalTheme::subtitle()))];
    for finding in measurements.findings() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", finding.label), MedicalTheme::text_secondary()),
            Span::styled(
                format!("{:>7} {:<8}", finding.value, finding.unit),
                MedicalTheme::text(),
            ),
            Span::styled(finding.status, MedicalTheme::finding(finding.elevated)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Recommendations",
        MedicalTheme::subtitle(),
    )));
    for rec in &assessment.recommendations {
        lines.push(Line::from(vec![
            Span::styled("  • ", MedicalTheme::info()),
            Span::styled(rec.clone(), MedicalTheme::text()),
        ]));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
