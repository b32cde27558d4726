use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEventKind};
use engine::{
    Currency, EngineError, FileStorage, LedgerView, Storage, Tracker, TransactionForm,
    TransactionKind,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

/// How long the submit control shows its "reset" look after an add.
const SUBMIT_FLASH: Duration = Duration::from_millis(400);
const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Description,
    Amount,
    Kind,
    Submit,
    Table,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Description => Self::Amount,
            Self::Amount => Self::Kind,
            Self::Kind => Self::Submit,
            Self::Submit => Self::Table,
            Self::Table => Self::Description,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Description => Self::Table,
            Self::Amount => Self::Description,
            Self::Kind => Self::Amount,
            Self::Submit => Self::Kind,
            Self::Table => Self::Submit,
        }
    }
}

/// Look of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitLook {
    Neutral,
    Income,
    Expense,
    Resetting,
}

#[derive(Debug)]
pub struct AppState {
    pub view: LedgerView,
    pub form: TransactionForm,
    pub focus: Focus,
    pub selected: usize,
    pub alert: Option<String>,
    pub currency: Currency,
    pub storage_label: String,
    pub last_saved: Option<DateTime<Local>>,
    pub flash_until: Option<Instant>,
}

impl AppState {
    pub fn submit_look(&self) -> SubmitLook {
        if self.flash_until.is_some() {
            return SubmitLook::Resetting;
        }
        match self.form.kind {
            Some(TransactionKind::Income) => SubmitLook::Income,
            Some(TransactionKind::Expense) => SubmitLook::Expense,
            None => SubmitLook::Neutral,
        }
    }

    fn select_next(&mut self) {
        if self.view.rows.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.view.rows.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.view.rows.len().saturating_sub(1));
    }

    fn cycle_kind(&mut self, forward: bool) {
        self.form.kind = Some(match self.form.kind {
            Some(kind) => kind.toggled(),
            None if forward => TransactionKind::Income,
            None => TransactionKind::Expense,
        });
    }
}

pub struct App<S = FileStorage> {
    tracker: Tracker<S>,
    pub state: AppState,
    should_quit: bool,
}

impl App<FileStorage> {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let currency = config.currency()?;
        let storage = FileStorage::new(&config.storage_path);
        let tracker = Tracker::load(storage, config.storage_key.as_str(), currency)?;
        tracing::info!(
            storage = %config.storage_path,
            transactions = tracker.ledger().len(),
            "tracker ready"
        );
        Ok(Self::with_tracker(tracker, config.storage_path.clone()))
    }

    pub fn run(&mut self) -> Result<()> {
        let mut session = ui::TerminalSession::enter()?;
        let result = self.event_loop(session.terminal());
        session.leave()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        while !self.should_quit() {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()?
                    && key.kind == KeyEventKind::Press
                {
                    self.handle_action(map_key(key))?;
                }
            }
            self.tick(Instant::now());
        }

        Ok(())
    }
}

impl<S: Storage> App<S> {
    pub fn with_tracker(tracker: Tracker<S>, storage_label: String) -> Self {
        let state = AppState {
            view: tracker.view(),
            form: TransactionForm::default(),
            focus: Focus::Description,
            selected: 0,
            alert: None,
            currency: tracker.currency(),
            storage_label,
            last_saved: None,
            flash_until: None,
        };

        Self {
            tracker,
            state,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &Tracker<S> {
        &self.tracker
    }

    /// Expires the submit flash.
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.state.flash_until
            && now >= until
        {
            self.state.flash_until = None;
        }
    }

    pub fn handle_action(&mut self, action: AppAction) -> Result<()> {
        // The alert is modal: it swallows everything until dismissed.
        if self.state.alert.is_some() {
            match action {
                AppAction::Submit | AppAction::Cancel => self.state.alert = None,
                AppAction::Quit => self.should_quit = true,
                _ => {}
            }
            return Ok(());
        }

        match action {
            AppAction::Quit | AppAction::Cancel => self.should_quit = true,
            AppAction::NextField => self.state.focus = self.state.focus.next(),
            AppAction::PrevField => self.state.focus = self.state.focus.prev(),
            AppAction::Submit => {
                if self.state.focus != Focus::Table {
                    self.submit()?;
                }
            }
            AppAction::Backspace => match self.state.focus {
                Focus::Description => {
                    self.state.form.description.pop();
                }
                Focus::Amount => self.state.form.amount.pop(),
                Focus::Kind => self.state.form.kind = None,
                Focus::Submit | Focus::Table => {}
            },
            AppAction::Delete => {
                if self.state.focus == Focus::Table {
                    self.remove_selected()?;
                }
            }
            AppAction::Up => self.state.select_prev(),
            AppAction::Down => self.state.select_next(),
            AppAction::Left => {
                if self.state.focus == Focus::Kind {
                    self.state.cycle_kind(false);
                }
            }
            AppAction::Right => {
                if self.state.focus == Focus::Kind {
                    self.state.cycle_kind(true);
                }
            }
            AppAction::Input(ch) => self.handle_input(ch)?,
            AppAction::None => {}
        }

        Ok(())
    }

    fn handle_input(&mut self, ch: char) -> Result<()> {
        match self.state.focus {
            Focus::Description => self.state.form.description.push(ch),
            Focus::Amount => self.state.form.amount.push(ch),
            Focus::Kind => match ch {
                ' ' => self.state.cycle_kind(true),
                'i' | 'I' => self.state.form.kind = Some(TransactionKind::Income),
                'e' | 'E' => self.state.form.kind = Some(TransactionKind::Expense),
                _ => {}
            },
            Focus::Submit => {
                if ch == ' ' {
                    self.submit()?;
                }
            }
            Focus::Table => match ch {
                'q' | 'Q' => self.should_quit = true,
                'd' | 'D' => self.remove_selected()?,
                'j' => self.state.select_next(),
                'k' => self.state.select_prev(),
                _ => {}
            },
        }
        Ok(())
    }

    fn submit(&mut self) -> Result<()> {
        match self.tracker.submit(&mut self.state.form) {
            Ok(()) => {
                self.refresh();
                self.state.selected = self.state.view.rows.len().saturating_sub(1);
                self.state.focus = Focus::Description;
                self.state.flash_until = Some(Instant::now() + SUBMIT_FLASH);
                Ok(())
            }
            Err(err) => self.report(err),
        }
    }

    fn remove_selected(&mut self) -> Result<()> {
        if self.state.view.rows.is_empty() {
            return Ok(());
        }
        let position = self.state.view.rows[self.state.selected].position;
        match self.tracker.remove(position) {
            Ok(_) => {
                self.refresh();
                Ok(())
            }
            Err(err) => self.report(err),
        }
    }

    fn refresh(&mut self) {
        self.state.view = self.tracker.view();
        self.state.last_saved = Some(Local::now());
        self.state.clamp_selection();
    }

    /// Turns an engine error into the modal alert. Nothing was changed by
    /// the failed operation, so the UI keeps running.
    fn report(&mut self, err: EngineError) -> Result<()> {
        if !matches!(err, EngineError::Validation(_)) {
            tracing::warn!("operation failed: {err}");
        }
        self.state.alert = Some(match err {
            EngineError::Validation(reason) => reason.to_string(),
            other => format!("Could not save: {other}"),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{MemoryStorage, Money};

    fn app() -> App<MemoryStorage> {
        let tracker = Tracker::load(MemoryStorage::new(), "test", Currency::Brl).unwrap();
        App::with_tracker(tracker, "memory".to_string())
    }

    fn type_text(app: &mut App<MemoryStorage>, text: &str) {
        for ch in text.chars() {
            app.handle_action(AppAction::Input(ch)).unwrap();
        }
    }

    fn add(app: &mut App<MemoryStorage>, description: &str, amount: &str, kind: TransactionKind) {
        app.state.focus = Focus::Description;
        type_text(app, description);
        app.handle_action(AppAction::NextField).unwrap();
        type_text(app, amount);
        app.handle_action(AppAction::NextField).unwrap();
        type_text(app, if kind == TransactionKind::Income { "i" } else { "e" });
        app.handle_action(AppAction::Submit).unwrap();
    }

    #[test]
    fn typed_amount_is_read_as_cents() {
        let mut app = app();
        app.state.focus = Focus::Amount;
        type_text(&mut app, "1000");
        assert_eq!(app.state.form.amount.display(Currency::Brl), "R$ 10,00");
        assert_eq!(app.state.form.amount.amount(), Some(Money::new(1000)));
    }

    #[test]
    fn submit_adds_row_clears_form_and_flashes() {
        let mut app = app();
        add(&mut app, "Salary", "350000", TransactionKind::Income);

        assert!(app.state.alert.is_none());
        assert_eq!(app.state.view.rows.len(), 1);
        assert_eq!(app.state.view.rows[0].amount, "R$ 3.500,00");
        assert_eq!(app.state.view.totals.income, "R$ 3.500,00");
        assert_eq!(app.state.form, TransactionForm::default());
        assert_eq!(app.state.focus, Focus::Description);
        assert_eq!(app.state.submit_look(), SubmitLook::Resetting);
        assert!(app.state.last_saved.is_some());

        app.tick(Instant::now() + SUBMIT_FLASH);
        assert_eq!(app.state.submit_look(), SubmitLook::Neutral);
    }

    #[test]
    fn invalid_submit_opens_alert_and_keeps_form() {
        let mut app = app();
        type_text(&mut app, "Lunch");
        app.handle_action(AppAction::Submit).unwrap();

        assert_eq!(app.state.alert.as_deref(), Some("Fill in all fields!"));
        assert!(app.state.view.rows.is_empty());
        assert_eq!(app.state.form.description, "Lunch");

        // Typing is swallowed while the alert is open.
        type_text(&mut app, "xyz");
        assert_eq!(app.state.form.description, "Lunch");

        app.handle_action(AppAction::Submit).unwrap();
        assert!(app.state.alert.is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn zero_amount_alerts() {
        let mut app = app();
        add(&mut app, "Gift", "0", TransactionKind::Income);
        assert_eq!(
            app.state.alert.as_deref(),
            Some("Enter an amount greater than zero!")
        );
        assert!(app.state.view.rows.is_empty());
    }

    #[test]
    fn delete_on_table_removes_selected_row() {
        let mut app = app();
        add(&mut app, "Salary", "500000", TransactionKind::Income);
        add(&mut app, "Rent", "200000", TransactionKind::Expense);
        add(&mut app, "Bus", "440", TransactionKind::Expense);

        app.state.focus = Focus::Table;
        app.handle_action(AppAction::Up).unwrap();
        assert_eq!(app.state.selected, 1);
        app.handle_action(AppAction::Input('d')).unwrap();

        let descriptions: Vec<&str> = app
            .state
            .view
            .rows
            .iter()
            .map(|row| row.description.as_str())
            .collect();
        assert_eq!(descriptions, ["Salary", "Bus"]);
        assert_eq!(app.state.view.totals.expense, "R$ 4,40");
        assert_eq!(app.tracker().ledger().len(), 2);

        app.handle_action(AppAction::Down).unwrap();
        app.handle_action(AppAction::Delete).unwrap();
        assert_eq!(app.state.selected, 0);
        assert_eq!(app.state.view.rows.len(), 1);
    }

    #[test]
    fn delete_outside_table_does_nothing() {
        let mut app = app();
        add(&mut app, "Salary", "500000", TransactionKind::Income);
        app.handle_action(AppAction::Delete).unwrap();
        assert_eq!(app.state.view.rows.len(), 1);
    }

    #[test]
    fn kind_selector_cycles_and_colours_submit() {
        let mut app = app();
        app.state.focus = Focus::Kind;
        assert_eq!(app.state.submit_look(), SubmitLook::Neutral);

        app.handle_action(AppAction::Right).unwrap();
        assert_eq!(app.state.form.kind, Some(TransactionKind::Income));
        assert_eq!(app.state.submit_look(), SubmitLook::Income);

        app.handle_action(AppAction::Input(' ')).unwrap();
        assert_eq!(app.state.submit_look(), SubmitLook::Expense);

        app.handle_action(AppAction::Backspace).unwrap();
        assert_eq!(app.state.form.kind, None);
    }

    #[test]
    fn q_only_quits_from_table() {
        let mut app = app();
        type_text(&mut app, "q");
        assert!(!app.should_quit());
        assert_eq!(app.state.form.description, "q");

        app.handle_action(AppAction::PrevField).unwrap();
        assert_eq!(app.state.focus, Focus::Table);
        type_text(&mut app, "q");
        assert!(app.should_quit());
    }
}
