mod edit;
mod tags;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event};
use engine::{
    Action, DateGroups, Outcome, Screen, Session, TagRegistry, Transaction, TransactionId,
    TransactionStore, WeekStart, YearMonth, group_by_date, sort_newest_first,
};
use suggest::{
    AnySuggester, Suggestion, SuggestionDispatcher, SuggestionEvent, places_or_placeholder,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, InputMode},
    },
};

pub use edit::{EditField, EditState};
pub use tags::{TagsFocus, TagsMode, TagsState};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

impl ToastState {
    fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        }
    }

    fn expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct HomeState {
    pub selected: usize,
}

#[derive(Debug)]
pub struct HistoryState {
    pub month: YearMonth,
}

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub edit: EditState,
    pub tags: TagsState,
    pub home: HomeState,
    pub history: HistoryState,
    pub today: NaiveDate,
    pub week_start: WeekStart,
    pub toast: Option<ToastState>,
}

impl AppState {
    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn input_mode(&self) -> InputMode {
        match self.screen() {
            Screen::Edit | Screen::Tags => InputMode::Text,
            _ => InputMode::Navigate,
        }
    }
}

/// Entries grouped the way the home screen lists them: most recent day
/// first, latest time first within a day.
pub fn home_listing(transactions: &[Transaction]) -> DateGroups {
    let mut ordered = transactions.to_vec();
    sort_newest_first(&mut ordered);
    group_by_date(&ordered)
}

/// Ids in home screen order.
pub fn home_rows(transactions: &[Transaction]) -> Vec<TransactionId> {
    home_listing(transactions)
        .days_desc()
        .flat_map(|(_, entries)| entries.iter().map(|t| t.id.clone()))
        .collect()
}

pub struct App {
    config: AppConfig,
    tz: Tz,
    pub state: AppState,
    dispatcher: SuggestionDispatcher<AnySuggester>,
    suggestions: UnboundedReceiver<SuggestionEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, suggester: AnySuggester) -> Result<Self> {
        let tz = config.tz()?;
        let today = Utc::now().with_timezone(&tz).date_naive();
        let store = if config.seed_mock_data {
            TransactionStore::with_mock_data()
        } else {
            TransactionStore::new()
        };

        let (tx, suggestions) = mpsc::unbounded_channel();
        let dispatcher = SuggestionDispatcher::new(
            Arc::new(suggester),
            Duration::from_millis(config.suggest_delay_ms),
            config.min_note_chars,
            tx,
        );

        let state = AppState {
            session: Session::new(store),
            edit: EditState::open(None),
            tags: TagsState::new(TagRegistry::initial()),
            home: HomeState::default(),
            history: HistoryState {
                month: YearMonth::from_date(today),
            },
            today,
            week_start: config.week_start,
            toast: None,
        };
        tracing::info!(timezone = %tz, entries = state.session.store().len(), "starting");

        Ok(Self {
            config,
            tz,
            state,
            dispatcher,
            suggestions,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.state.today = self.now().date();
            if self.state.toast.as_ref().is_some_and(ToastState::expired) {
                self.state.toast = None;
            }
            while let Ok(event) = self.suggestions.try_recv() {
                self.apply_suggestion(event);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    let action = ui::keymap::map_key(key, self.state.input_mode());
                    self.handle_action(action);
                }
            }
        }

        Ok(())
    }

    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Quit => {
                self.should_quit = true;
                return;
            }
            AppAction::Navigate(tab) => {
                self.dispatch(Action::Navigate(tab));
                return;
            }
            AppAction::None => return,
            _ => {}
        }

        match self.state.screen() {
            Screen::Home => self.handle_home(action),
            Screen::Edit => self.handle_edit(action),
            Screen::Tags => self.handle_tags(action),
            Screen::History => self.handle_history(action),
            Screen::Analytics | Screen::Settings => {
                if action == AppAction::Input('a') {
                    self.dispatch(Action::Add);
                }
            }
        }
    }

    /// Runs `action` through the session and keeps screen-local state in step.
    fn dispatch(&mut self, action: Action) -> Outcome {
        let from = self.state.screen();
        let session = std::mem::take(&mut self.state.session);
        let (session, outcome) = session.apply(action);
        self.state.session = session;
        let to = self.state.screen();

        if from.is_tab() && to == Screen::Edit {
            self.state.edit = EditState::open(self.state.session.editing_target());
            self.dispatcher.reset();
        } else if !from.is_tab() && to.is_tab() {
            self.dispatcher.reset();
        }
        outcome
    }

    fn handle_home(&mut self, action: AppAction) {
        let rows = home_rows(self.state.session.transactions());
        let home = &mut self.state.home;
        match action {
            AppAction::Down if !rows.is_empty() => {
                home.selected = (home.selected + 1).min(rows.len() - 1);
            }
            AppAction::Up => home.selected = home.selected.saturating_sub(1),
            AppAction::Submit => {
                if let Some(id) = rows.get(home.selected).cloned() {
                    self.dispatch(Action::Select(id));
                }
            }
            AppAction::Input('a') => {
                self.dispatch(Action::Add);
            }
            _ => {}
        }
    }

    fn handle_edit(&mut self, action: AppAction) {
        match action {
            AppAction::Save => self.save(),
            AppAction::Cancel => {
                self.dispatch(Action::Cancel);
            }
            AppAction::ManageTags => {
                self.dispatch(Action::ManageTags);
            }
            AppAction::NextField | AppAction::Down => {
                self.focus_edit(self.state.edit.focus.next());
            }
            AppAction::PrevField | AppAction::Up => {
                self.focus_edit(self.state.edit.focus.prev());
            }
            AppAction::Left | AppAction::Right => {
                let forward = action == AppAction::Right;
                let transactions = self.state.session.transactions();
                let edit = &mut self.state.edit;
                match edit.focus {
                    EditField::Kind if forward => edit.draft.kind = edit.draft.kind.cycle(),
                    EditField::Kind => edit.draft.kind = edit.draft.kind.cycle_back(),
                    EditField::Tags => edit.move_tag_cursor(forward),
                    EditField::Location => edit.move_place_cursor(forward, transactions),
                    EditField::Payment => edit.cycle_payment(forward),
                    EditField::Amount | EditField::Note => {}
                }
            }
            AppAction::Submit => match self.state.edit.focus {
                EditField::Tags => self.state.edit.toggle_tag_at_cursor(),
                EditField::Location => {
                    let transactions = self.state.session.transactions();
                    self.state.edit.choose_place_at_cursor(transactions);
                }
                field => self.focus_edit(field.next()),
            },
            AppAction::Input(ch) => {
                let edit = &mut self.state.edit;
                match edit.focus {
                    EditField::Kind if ch == ' ' => edit.draft.kind = edit.draft.kind.cycle(),
                    EditField::Amount => edit.push_amount_char(ch),
                    EditField::Note => {
                        edit.draft.note.push(ch);
                        self.dispatcher.note_changed(&self.state.edit.draft.note);
                    }
                    EditField::Tags if ch == ' ' => edit.toggle_tag_at_cursor(),
                    EditField::Location => {
                        edit.draft.location.push(ch);
                        edit.place_cursor = 0;
                    }
                    _ => {}
                }
            }
            AppAction::Backspace => {
                let edit = &mut self.state.edit;
                match edit.focus {
                    EditField::Amount => {
                        edit.draft.amount.pop();
                    }
                    EditField::Note => {
                        edit.draft.note.pop();
                        self.dispatcher.note_changed(&self.state.edit.draft.note);
                    }
                    EditField::Location => {
                        edit.draft.location.pop();
                        edit.place_cursor = 0;
                    }
                    EditField::Payment => edit.draft.payment_method.clear(),
                    EditField::Kind | EditField::Tags => {}
                }
            }
            _ => {}
        }
    }

    fn focus_edit(&mut self, field: EditField) {
        self.state.edit.focus = field;
        if field != EditField::Location || self.state.edit.places_requested {
            return;
        }
        if let Some((latitude, longitude)) = self.config.coordinates() {
            self.state.edit.places_requested = true;
            self.dispatcher
                .request_places(latitude, longitude, &self.state.edit.draft.note);
        }
    }

    fn save(&mut self) {
        let draft = self.state.edit.draft.clone();
        let now = self.now();
        match self.dispatch(Action::Save { draft, now }) {
            Outcome::Inserted(id) => {
                tracing::info!(%id, "entry added");
                self.state.home.selected = 0;
                self.state.toast = Some(ToastState::new("已保存", ToastLevel::Success));
            }
            Outcome::Replaced(id) => {
                tracing::info!(%id, "entry updated");
                self.state.toast = Some(ToastState::new("已更新", ToastLevel::Success));
            }
            Outcome::Rejected(err) => {
                self.state.edit.error = Some(err.to_string());
                self.state.toast = Some(ToastState::new("保存失败", ToastLevel::Error));
            }
            Outcome::Moved | Outcome::Ignored => {}
        }
    }

    fn handle_tags(&mut self, action: AppAction) {
        let tags = &mut self.state.tags;
        if tags.mode != TagsMode::Browse {
            match action {
                AppAction::Input(ch) => tags.input.push(ch),
                AppAction::Backspace => {
                    tags.input.pop();
                }
                AppAction::Submit => tags.commit_input(),
                AppAction::Cancel => tags.cancel_input(),
                _ => {}
            }
            return;
        }

        match (tags.focus, action) {
            (_, AppAction::Cancel) => {
                self.dispatch(Action::Back);
            }
            (TagsFocus::List, AppAction::NextField | AppAction::PrevField) => {
                tags.focus = TagsFocus::Recommended;
            }
            (TagsFocus::Recommended, AppAction::NextField | AppAction::PrevField) => {
                tags.focus = TagsFocus::List;
            }
            (TagsFocus::Recommended, AppAction::Left) => tags.move_recommended(false),
            (TagsFocus::Recommended, AppAction::Right) => tags.move_recommended(true),
            (TagsFocus::Recommended, AppAction::Submit) => tags.add_recommended(),
            (TagsFocus::List, AppAction::Input(ch)) => {
                let mut query = std::mem::take(&mut tags.query);
                query.push(ch);
                tags.set_query(query);
            }
            (TagsFocus::List, AppAction::Backspace) => {
                let mut query = std::mem::take(&mut tags.query);
                query.pop();
                tags.set_query(query);
            }
            (TagsFocus::List, AppAction::Down) => tags.select_next(),
            (TagsFocus::List, AppAction::Up) => tags.select_prev(),
            (TagsFocus::List, AppAction::Submit) => {
                if let Some(name) = tags.selected_tag().map(|t| t.name.clone()) {
                    self.state.edit.draft.toggle_tag(&name);
                    let verb = if self.state.edit.draft.has_tag(&name) {
                        "已选择"
                    } else {
                        "已取消"
                    };
                    self.state.tags.message = Some(format!("{verb} #{name}"));
                }
            }
            (TagsFocus::List, AppAction::New) => tags.start_create(),
            (TagsFocus::List, AppAction::Rename) => tags.start_rename(),
            (TagsFocus::List, AppAction::Delete) => tags.delete_selected(),
            _ => {}
        }
    }

    fn handle_history(&mut self, action: AppAction) {
        let history = &mut self.state.history;
        match action {
            AppAction::Left => history.month = history.month.prev(),
            AppAction::Right => history.month = history.month.next(),
            AppAction::Input('t') => history.month = YearMonth::from_date(self.state.today),
            AppAction::Input('a') => {
                self.dispatch(Action::Add);
            }
            _ => {}
        }
    }

    fn apply_suggestion(&mut self, event: SuggestionEvent) {
        if !self.dispatcher.accept(&event) {
            tracing::debug!(generation = event.generation, "stale suggestion dropped");
            return;
        }
        let edit = &mut self.state.edit;
        match event.suggestion {
            Suggestion::TagsPending => edit.tags_loading = true,
            Suggestion::Tags(tags) => {
                edit.tags_loading = false;
                edit.suggested_tags = tags;
                edit.tag_cursor = edit.tag_cursor.min(edit.tag_options().len().saturating_sub(1));
            }
            Suggestion::Places(places) => {
                edit.suggested_places = places_or_placeholder(places);
            }
        }
    }
}
