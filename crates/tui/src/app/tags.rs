use engine::{EngineError, RECOMMENDED_TAGS, Tag, TagRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagsMode {
    Browse,
    Create,
    Rename,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagsFocus {
    List,
    Recommended,
}

/// Tag management screen: a search box over the registry, an input line
/// for create and rename, and the recommended row.
#[derive(Debug, Clone)]
pub struct TagsState {
    pub registry: TagRegistry,
    pub query: String,
    pub input: String,
    pub mode: TagsMode,
    pub focus: TagsFocus,
    pub selected: usize,
    pub recommended_cursor: usize,
    pub message: Option<String>,
}

impl TagsState {
    pub fn new(registry: TagRegistry) -> Self {
        Self {
            registry,
            query: String::new(),
            input: String::new(),
            mode: TagsMode::Browse,
            focus: TagsFocus::List,
            selected: 0,
            recommended_cursor: 0,
            message: None,
        }
    }

    pub fn visible(&self) -> Vec<&Tag> {
        self.registry.search(&self.query)
    }

    pub fn selected_tag(&self) -> Option<&Tag> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.selected = 0;
    }

    pub fn start_create(&mut self) {
        self.input = self.query.trim().to_string();
        self.mode = TagsMode::Create;
        self.message = None;
    }

    pub fn start_rename(&mut self) {
        if let Some(name) = self.selected_tag().map(|t| t.name.clone()) {
            self.input = name;
            self.mode = TagsMode::Rename;
            self.message = None;
        }
    }

    pub fn cancel_input(&mut self) {
        self.input.clear();
        self.mode = TagsMode::Browse;
    }

    /// Applies the input line. Failures stay in the current mode with a message.
    pub fn commit_input(&mut self) {
        let result = match self.mode {
            TagsMode::Browse => return,
            TagsMode::Create => self.registry.create(&self.input).map(|_| ()),
            TagsMode::Rename => match self.selected_tag().map(|t| t.id.clone()) {
                Some(id) => self.registry.rename(&id, &self.input),
                None => Err(EngineError::KeyNotFound("selected tag".to_string())),
            },
        };
        match result {
            Ok(()) => {
                self.cancel_input();
                self.query.clear();
                self.message = None;
            }
            Err(err) => self.message = Some(describe(&err)),
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_tag().map(|t| t.id.clone()) else {
            return;
        };
        match self.registry.delete(&id) {
            Ok(tag) => {
                self.message = Some(format!("已删除 #{}", tag.name));
                let len = self.visible().len();
                self.selected = self.selected.min(len.saturating_sub(1));
            }
            Err(err) => self.message = Some(describe(&err)),
        }
    }

    pub fn add_recommended(&mut self) {
        let Some(name) = RECOMMENDED_TAGS.get(self.recommended_cursor) else {
            return;
        };
        self.message = Some(match self.registry.create(name) {
            Ok(tag) => format!("已添加 #{}", tag.name),
            Err(err) => describe(&err),
        });
    }

    pub fn move_recommended(&mut self, forward: bool) {
        let len = RECOMMENDED_TAGS.len();
        self.recommended_cursor = if forward {
            (self.recommended_cursor + 1) % len
        } else {
            (self.recommended_cursor + len - 1) % len
        };
    }
}

fn describe(err: &EngineError) -> String {
    match err {
        EngineError::ExistingKey(name) => format!("标签已存在: {name}"),
        EngineError::InvalidTag(_) => "标签名不能为空".to_string(),
        other => other.to_string(),
    }
}
