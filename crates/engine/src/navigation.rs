//! Screen navigation as a reducer over an explicit session value.
//!
//! [`Session::apply`] takes the session by value together with an
//! [`Action`] and hands back the next session plus an [`Outcome`] describing
//! what happened. Anything the table below does not list leaves the session
//! as it was and reports [`Outcome::Ignored`].
//!
//! | From | Action | To |
//! |---|---|---|
//! | Home, History, Analytics, Settings | `Add` | Edit (no target) |
//! | Home | `Select` | Edit (target = entry) |
//! | Edit | `Save` | Home, commit to the store |
//! | Edit | `Cancel` | Home |
//! | Edit | `ManageTags` | Tags |
//! | Tags | `Back` | Edit |
//! | any | `Navigate` | Home / History / Analytics / Settings |

use chrono::NaiveDateTime;

use crate::{EngineError, Transaction, TransactionDraft, TransactionId, TransactionStore};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Home,
    Edit,
    Tags,
    History,
    Analytics,
    Settings,
}

impl Screen {
    /// Screens that show the bottom navigation.
    pub fn is_tab(self) -> bool {
        matches!(
            self,
            Self::Home | Self::History | Self::Analytics | Self::Settings
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "首页",
            Self::Edit => "记一笔",
            Self::Tags => "管理标签",
            Self::History => "历史",
            Self::Analytics => "分析",
            Self::Settings => "设置",
        }
    }
}

/// Destinations reachable from the bottom navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    History,
    Analytics,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::History, Tab::Analytics, Tab::Settings];

    pub fn screen(self) -> Screen {
        match self {
            Self::Home => Screen::Home,
            Self::History => Screen::History,
            Self::Analytics => Screen::Analytics,
            Self::Settings => Screen::Settings,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Start a new entry.
    Add,
    /// Open an existing entry for editing.
    Select(TransactionId),
    /// Commit the draft; `now` stamps entries created by this save.
    Save {
        draft: TransactionDraft,
        now: NaiveDateTime,
    },
    Cancel,
    ManageTags,
    Back,
    Navigate(Tab),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Moved to another screen with no store change.
    Moved,
    Inserted(TransactionId),
    Replaced(TransactionId),
    /// Save failed; the session stays on the edit screen.
    Rejected(EngineError),
    Ignored,
}

/// Application state owned by the event loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    screen: Screen,
    editing_target: Option<Transaction>,
    store: TransactionStore,
}

impl Session {
    /// Session on the home screen over `store`.
    pub fn new(store: TransactionStore) -> Self {
        Self {
            screen: Screen::Home,
            editing_target: None,
            store,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Entry being edited; `None` means a new entry is being created.
    pub fn editing_target(&self) -> Option<&Transaction> {
        self.editing_target.as_ref()
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.transactions()
    }

    pub fn apply(mut self, action: Action) -> (Session, Outcome) {
        let from = self.screen;
        let outcome = match (from, action) {
            (screen, Action::Add) if screen.is_tab() => {
                self.editing_target = None;
                self.screen = Screen::Edit;
                Outcome::Moved
            }
            (Screen::Home, Action::Select(id)) => match self.store.get(&id) {
                Some(entry) => {
                    self.editing_target = Some(entry.clone());
                    self.screen = Screen::Edit;
                    Outcome::Moved
                }
                None => Outcome::Ignored,
            },
            (Screen::Edit, Action::Save { draft, now }) => self.commit(draft, now),
            (Screen::Edit, Action::Cancel) => {
                self.screen = Screen::Home;
                Outcome::Moved
            }
            (Screen::Edit, Action::ManageTags) => {
                self.screen = Screen::Tags;
                Outcome::Moved
            }
            (Screen::Tags, Action::Back) => {
                self.screen = Screen::Edit;
                Outcome::Moved
            }
            (_, Action::Navigate(tab)) => {
                self.screen = tab.screen();
                Outcome::Moved
            }
            _ => Outcome::Ignored,
        };
        if outcome != Outcome::Ignored {
            tracing::debug!(?from, to = ?self.screen, ?outcome, "navigation");
        }
        (self, outcome)
    }

    fn commit(&mut self, draft: TransactionDraft, now: NaiveDateTime) -> Outcome {
        let saved = draft.into_transaction(self.editing_target.as_ref(), now);
        let id = saved.id.clone();
        let outcome = if self.editing_target.is_some() {
            match self.store.replace(saved) {
                Ok(()) => Outcome::Replaced(id),
                Err(err) => {
                    tracing::warn!(%id, "edited entry is gone from the store");
                    return Outcome::Rejected(err);
                }
            }
        } else {
            self.store.insert(saved);
            Outcome::Inserted(id)
        };
        self.editing_target = None;
        self.screen = Screen::Home;
        outcome
    }
}
