//! Main TUI application.
//!
//! Handles:
//! - Terminal setup and the draw/input loop
//! - Mapping keys to workflow transitions
//! - Polling the workflow so scoring results land on the UI thread

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::RuleBasedEngine;
use crate::application::{report, AssessmentWorkflow, Stage};
use crate::config::AppConfig;

use super::ui::{
    assessment::{render_generating, render_result},
    home::render_home,
    measurement::{render_measurement_form, MeasurementFormState},
    patient::{render_patient_form, PatientFormState},
    render_disclaimer, render_nav,
    tips::{render_tips, TipsState},
    Notice,
};

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    config: AppConfig,

    /// Owns the session; every mutation goes through it
    workflow: AssessmentWorkflow<RuleBasedEngine>,

    patient_form: PatientFormState,

    measurement_form: MeasurementFormState,

    tips: TipsState,

    /// Last action feedback shown under the navigation bar
    notice: Option<Notice>,
}

impl App {
    /// Create a new application from environment configuration.
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn new() -> Result<Self> {
        let config = AppConfig::from_env_or_default();
        let engine = Arc::new(RuleBasedEngine::from_optional_seed(config.confidence_seed));
        Self::with_dependencies(engine, config)
    }

    /// Create application with an injected engine and configuration.
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn with_dependencies(engine: Arc<RuleBasedEngine>, config: AppConfig) -> Result<Self> {
        let workflow = AssessmentWorkflow::new(engine, config.processing_delay);
        Ok(Self {
            should_quit: false,
            config,
            workflow,
            patient_form: PatientFormState::default(),
            measurement_form: MeasurementFormState::default(),
            tips: TipsState::default(),
            notice: None,
        })
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        // Nothing outlives the process
        self.workflow.logout();
        self.wipe_forms();

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            if self.workflow.poll() && self.workflow.stage() == Stage::Result {
                self.notice = None;
            }

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(0),
                        Constraint::Length(3),
                    ])
                    .split(f.area());

                let stage = self.workflow.stage();
                render_nav(f, chunks[0], stage, self.notice.as_ref());

                let content = chunks[1];
                match stage {
                    Stage::Home => render_home(
                        f,
                        content,
                        self.workflow.session(),
                        self.workflow.is_generating(),
                    ),
                    Stage::PatientForm => render_patient_form(f, content, &self.patient_form),
                    Stage::MedicalTest => {
                        render_measurement_form(f, content, &self.measurement_form);
                    }
                    Stage::Generating => {
                        let progress = self
                            .workflow
                            .generating_progress(Instant::now())
                            .unwrap_or(0.0);
                        render_generating(f, content, progress);
                    }
                    Stage::Result => {
                        if let (Some(profile), Some(measurements), Some(assessment)) = (
                            self.workflow.profile(),
                            self.workflow.measurements(),
                            self.workflow.assessment(),
                        ) {
                            render_result(f, content, profile, measurements, assessment);
                        }
                    }
                    Stage::HealthTips => render_tips(f, content, &self.tips),
                }

                render_disclaimer(f, chunks[2]);
            })?;

            // Short poll keeps the gauge moving
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('l') => {
                    self.workflow.logout();
                    self.wipe_forms();
                    self.notice = Some(Notice::Info("Logged out; session cleared".to_string()));
                    return;
                }
                KeyCode::Char('r') => {
                    self.workflow.reset();
                    self.wipe_forms();
                    self.notice = Some(Notice::Info("Session reset".to_string()));
                    return;
                }
                _ => {}
            }
        }

        if let KeyCode::F(n) = key {
            if let Some(target) = usize::from(n)
                .checked_sub(1)
                .and_then(|i| Stage::NAVIGABLE.get(i).copied())
            {
                self.navigate(target);
            }
            return;
        }

        match self.workflow.stage() {
            Stage::Home => self.handle_home_key(key),
            Stage::PatientForm => self.handle_patient_form_key(key, modifiers),
            Stage::MedicalTest => self.handle_measurement_key(key, modifiers),
            Stage::Generating => {}
            Stage::Result => self.handle_result_key(key),
            Stage::HealthTips => self.handle_tips_key(key),
        }
    }

    fn navigate(&mut self, target: Stage) {
        match self.workflow.navigate(target) {
            Ok(()) => {
                self.notice = None;
                self.refill_forms();
            }
            Err(e) => {
                tracing::debug!("Navigation to {} refused: {}", target, e);
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    /// Forms are wiped after submission; show stored values again when revisited.
    fn refill_forms(&mut self) {
        match self.workflow.stage() {
            Stage::PatientForm if self.patient_form.form.is_blank() => {
                if let Some(profile) = self.workflow.profile() {
                    self.patient_form.load_profile(profile);
                }
            }
            Stage::MedicalTest if self.measurement_form.form.is_blank() => {
                if let Some(record) = self.workflow.measurements() {
                    self.measurement_form.load_record(record);
                }
            }
            _ => {}
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('n' | 'N') => self.navigate(Stage::PatientForm),
            KeyCode::Char('r' | 'R') => self.navigate(Stage::Result),
            KeyCode::Char('t' | 'T') => self.navigate(Stage::HealthTips),
            KeyCode::Char('q' | 'Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let form = &mut self.patient_form.form;
        match key {
            KeyCode::Esc => self.navigate(Stage::Home),
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.patient_form.load_sample_data();
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Enter => self.submit_patient_form(),
            _ => {}
        }
    }

    fn handle_measurement_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let form = &mut self.measurement_form.form;
        match key {
            KeyCode::Esc => self.navigate(Stage::PatientForm),
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.measurement_form.load_sample_data();
            }
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Enter => self.submit_measurement_form(),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('e' | 'E') => self.export_report(),
            KeyCode::Char('n' | 'N') => {
                self.workflow.reset();
                self.wipe_forms();
                self.navigate(Stage::PatientForm);
            }
            KeyCode::Esc => self.navigate(Stage::Home),
            _ => {}
        }
    }

    fn handle_tips_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.tips.scroll_up(),
            KeyCode::Down => self.tips.scroll_down(),
            KeyCode::Esc => self.navigate(Stage::Home),
            _ => {}
        }
    }

    fn submit_patient_form(&mut self) {
        let profile = match self.patient_form.to_profile() {
            Ok(p) => p,
            Err(e) => {
                self.patient_form.form.error_message = Some(e.to_string());
                return;
            }
        };

        match self.workflow.submit_profile(profile) {
            Ok(()) => {
                self.patient_form.form.clear_sensitive();
                self.notice = None;
                self.refill_forms();
            }
            Err(e) => self.patient_form.form.error_message = Some(e.to_string()),
        }
    }

    fn submit_measurement_form(&mut self) {
        let record = match self.measurement_form.to_record() {
            Ok(r) => r,
            Err(e) => {
                self.measurement_form.form.error_message = Some(e.to_string());
                return;
            }
        };

        match self.workflow.submit_measurements(record) {
            Ok(()) => {
                self.measurement_form.form.clear_sensitive();
                self.notice = None;
            }
            Err(e) => self.measurement_form.form.error_message = Some(e.to_string()),
        }
    }

    fn export_report(&mut self) {
        let (Some(profile), Some(measurements), Some(assessment)) = (
            self.workflow.profile(),
            self.workflow.measurements(),
            self.workflow.assessment(),
        ) else {
            self.notice = Some(Notice::Error("No assessment to export".to_string()));
            return;
        };

        let today = chrono::Local::now().date_naive();
        self.notice = Some(
            match report::export_report(
                &self.config.report_dir,
                profile,
                measurements,
                assessment,
                today,
            ) {
                Ok(path) => Notice::Info(format!("Report saved to {}", path.display())),
                Err(e) => {
                    tracing::error!("Report export failed: {}", e);
                    Notice::Error(format!("Export failed: {e}"))
                }
            },
        );
    }

    fn wipe_forms(&mut self) {
        self.patient_form.form.clear_sensitive();
        self.measurement_form.form.clear_sensitive();
        self.tips = TipsState::default();
    }
}
