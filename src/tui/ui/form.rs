//! Shared form widget: field buffers, focus movement and two-column rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::MedicalTheme;

const TOGGLE_ON: &str = "Yes";
const TOGGLE_OFF: &str = "No";

/// What a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    /// Cycles through fixed options
    Choice(&'static [&'static str]),
    /// Yes/No
    Toggle,
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: String,
    pub value: String,
    pub kind: FieldKind,
}

impl FormField {
    pub fn new(label: &'static str, hint: impl Into<String>, kind: FieldKind) -> Self {
        let value = match kind {
            FieldKind::Toggle => TOGGLE_OFF.to_string(),
            _ => String::new(),
        };
        Self {
            label,
            hint: hint.into(),
            value,
            kind,
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.value == TOGGLE_ON
    }

    pub fn set_on(&mut self, on: bool) {
        self.value = if on { TOGGLE_ON } else { TOGGLE_OFF }.to_string();
    }

    fn accepts(&self, c: char) -> bool {
        match self.kind {
            FieldKind::Text => !c.is_control(),
            FieldKind::Integer => c.is_ascii_digit(),
            FieldKind::Decimal => c.is_ascii_digit() || (c == '.' && !self.value.contains('.')),
            FieldKind::Choice(_) | FieldKind::Toggle => false,
        }
    }

    fn cycle(&mut self, forward: bool) {
        match self.kind {
            FieldKind::Toggle => self.set_on(!self.is_on()),
            FieldKind::Choice(options) if !options.is_empty() => {
                let next = match options.iter().position(|o| *o == self.value) {
                    None if forward => 0,
                    None => options.len() - 1,
                    Some(i) if forward => (i + 1) % options.len(),
                    Some(0) => options.len() - 1,
                    Some(i) => i - 1,
                };
                self.value = options[next].to_string();
            }
            _ => {}
        }
    }

    fn is_selector(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_) | FieldKind::Toggle)
    }
}

/// Field list with focus and the last validation error.
#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl FormState {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            selected_field: 0,
            error_message: None,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Type into the focused field. Space flips selectors.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        if field.is_selector() {
            if c == ' ' {
                field.cycle(true);
                self.error_message = None;
            }
        } else if field.accepts(c) {
            field.value.push(c);
            self.error_message = None;
        }
    }

    /// Left/Right on a selector
    pub fn cycle(&mut self, forward: bool) {
        self.fields[self.selected_field].cycle(forward);
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let field = &mut self.fields[self.selected_field];
        if !field.is_selector() {
            field.value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        let field = &mut self.fields[self.selected_field];
        match field.kind {
            FieldKind::Toggle => field.set_on(false),
            _ => field.value.clear(),
        }
    }

    /// Wipe all field buffers and reset focus.
    pub fn clear_sensitive(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
            if field.kind == FieldKind::Toggle {
                field.set_on(false);
            }
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.fields
            .iter()
            .all(|f| f.value.is_empty() || f.kind == FieldKind::Toggle)
    }

    pub fn set_values(&mut self, values: &[&str]) {
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.value = (*value).to_string();
        }
    }
}

/// Render a form: header, two field columns, footer hints or the error.
pub fn render_form(
    f: &mut Frame,
    area: Rect,
    title: &str,
    subtitle: &str,
    state: &FormState,
    hints: &[(&str, &str)],
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(2), // Footer/error
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title.to_string(), MedicalTheme::title()),
        Span::styled(format!(" │ {subtitle}"), MedicalTheme::text_secondary()),
    ]));
    f.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .horizontal_margin(1)
        .split(chunks[1]);

    let mid = state.fields.len().div_ceil(2);
    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(f, columns[1], &state.fields[mid..], mid, state.selected_field);

    if let Some(err) = &state.error_message {
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ]))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );
        f.render_widget(footer, chunks[2]);
    } else {
        super::render_key_hints(f, chunks[2], hints);
    }
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = match field.kind {
            FieldKind::Toggle => {
                let mark = if field.is_on() { "[x] " } else { "[ ] " };
                Span::styled(format!("{mark}{}", field.value), MedicalTheme::text())
            }
            FieldKind::Choice(_) if !field.value.is_empty() => {
                Span::styled(format!("< {} >", field.value), MedicalTheme::text())
            }
            _ if field.value.is_empty() => Span::styled(field.hint.clone(), MedicalTheme::text_muted()),
            _ => Span::styled(field.value.clone(), MedicalTheme::text()),
        };

        let cursor = if is_selected && !field.is_selector() {
            Span::styled("▌", MedicalTheme::cursor())
        } else {
            Span::raw("")
        };

        let content = Paragraph::new(Line::from(vec![Span::raw(" "), value, cursor])).block(block);
        if let Some(slot) = chunks.get(i) {
            f.render_widget(content, *slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[&str] = &["male", "female", "other"];

    fn form() -> FormState {
        FormState::new(vec![
            FormField::new("Name", "full name", FieldKind::Text),
            FormField::new("Age", "years", FieldKind::Integer),
            FormField::new("Glucose", "mg/dL", FieldKind::Decimal),
            FormField::new("Gender", "space to choose", FieldKind::Choice(OPTIONS)),
            FormField::new("Smoker", "", FieldKind::Toggle),
        ])
    }

    #[test]
    fn test_input_filters_by_kind() {
        let mut state = form();
        for c in "Jo Li".chars() {
            state.input_char(c);
        }
        assert_eq!(state.fields[0].value, "Jo Li");

        state.next_field();
        for c in "4x2".chars() {
            state.input_char(c);
        }
        assert_eq!(state.fields[1].value, "42");

        state.next_field();
        for c in "1.2.5-".chars() {
            state.input_char(c);
        }
        assert_eq!(state.fields[2].value, "1.25");
    }

    #[test]
    fn test_selectors_cycle() {
        let mut state = form();
        state.selected_field = 3;
        state.input_char(' ');
        assert_eq!(state.fields[3].value, "male");
        state.cycle(false);
        assert_eq!(state.fields[3].value, "other");
        state.cycle(true);
        assert_eq!(state.fields[3].value, "male");

        state.next_field();
        assert!(!state.fields[4].is_on());
        state.input_char(' ');
        assert!(state.fields[4].is_on());
        state.delete_char();
        assert!(state.fields[4].is_on());
        state.clear_field();
        assert!(!state.fields[4].is_on());
    }

    #[test]
    fn test_focus_wraps() {
        let mut state = form();
        state.prev_field();
        assert_eq!(state.selected_field, 4);
        state.next_field();
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_clear_sensitive() {
        let mut state = form();
        state.set_values(&["Jo", "42", "150", "female", "Yes"]);
        state.selected_field = 2;
        state.error_message = Some("bad".to_string());
        assert!(!state.is_blank());

        state.clear_sensitive();
        assert!(state.is_blank());
        assert_eq!(state.selected_field, 0);
        assert!(state.error_message.is_none());
        assert_eq!(state.fields[4].value, "No");
    }
}
