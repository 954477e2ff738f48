//! Application state for the terminal form backend.
//!
//! The state is rebuilt from the build spec at the start of every render
//! session; nothing survives between sessions. Key events are mapped to
//! [`Msg`]s, [`App::update`] folds them into the state, and the event loop
//! reacts to the occasional [`AppEvent`] (submit, quit).

use argform_engine::{RunValues, WidgetKind, encode_key};
use argform_types::{BuildSpec, Group, Item, ParamKind, RawValue};
use argform_util::{read_file, title_case};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::theme::Theme;

/// Lines a menu document popup keeps at most.
const MENU_DOC_MAX_LINES: usize = 200;

/// This backend's kind → widget archetype dispatch.
///
/// Every backend owns its mapping; this one renders floats as a numeric
/// line rather than a stepper. `RadioGroup` is the only kind without an
/// archetype; its children render in its place.
pub fn widget_for(kind: ParamKind) -> Option<WidgetKind> {
    match kind {
        ParamKind::Bool => Some(WidgetKind::Flag),
        ParamKind::Text | ParamKind::List | ParamKind::Tuple | ParamKind::DateTime => {
            Some(WidgetKind::TextInput)
        }
        ParamKind::Int => Some(WidgetKind::IntCounter),
        ParamKind::Float => Some(WidgetKind::FloatInput),
        ParamKind::FileRead | ParamKind::FileWrite => Some(WidgetKind::FilePicker),
        ParamKind::Path => Some(WidgetKind::PathPicker),
        ParamKind::Choice => Some(WidgetKind::Dropdown),
        ParamKind::RadioGroup => None,
    }
}

/// Editable state for one rendered parameter.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub item: Item,
    /// Current text for text-ish widgets
    pub value: String,
    /// Checkbox state for flags
    pub toggled: bool,
    /// Current selection for dropdowns
    pub choice_idx: Option<usize>,
}

impl FieldState {
    pub(crate) fn new(item: &Item) -> Self {
        let default = item.default.clone().unwrap_or_default();
        let choice_idx = item
            .props
            .choices
            .iter()
            .position(|choice| *choice == default);
        let toggled = !default.is_empty() && default != "false" && default != "0";
        FieldState {
            item: item.clone(),
            value: default.clone(),
            toggled,
            choice_idx,
        }
    }

    /// The archetype this field renders as.
    pub fn widget(&self) -> WidgetKind {
        // Flattening guarantees no RadioGroup ever becomes a field.
        widget_for(self.item.kind).unwrap_or(WidgetKind::TextInput)
    }

    /// The raw value handed back across the flat map boundary.
    pub fn raw_value(&self) -> RawValue {
        match self.widget() {
            WidgetKind::Flag => RawValue::Toggle(self.toggled),
            WidgetKind::Dropdown => RawValue::Text(
                self.choice_idx
                    .and_then(|idx| self.item.props.choices.get(idx).cloned())
                    .unwrap_or_default(),
            ),
            _ => RawValue::Text(self.value.clone()),
        }
    }

    /// Label shown next to the widget.
    pub fn label(&self) -> String {
        if self.item.display_name.is_empty() {
            title_case(&self.item.dest)
        } else {
            title_case(&self.item.display_name)
        }
    }

    fn accepts_text(&self) -> bool {
        !matches!(self.widget(), WidgetKind::Flag | WidgetKind::Dropdown)
    }

    fn step_int(&mut self, delta: i64) {
        let current = self.value.trim().parse::<i64>().unwrap_or(0);
        self.value = current.saturating_add(delta).to_string();
    }

    fn cycle_choice(&mut self, delta: isize) {
        let len = self.item.props.choices.len();
        if len == 0 {
            return;
        }
        let next = match self.choice_idx {
            None => 0,
            Some(idx) => (idx as isize + delta).rem_euclid(len as isize) as usize,
        };
        self.choice_idx = Some(next);
    }
}

/// One visual row of the form: a section heading or an editable field.
#[derive(Debug, Clone)]
pub enum FormRow {
    Section(String),
    Field(FieldState),
}

/// Modal overlay atop the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    /// Menu entry list
    Menu { selected: usize },
    /// Contents of a menu entry's file
    Document {
        title: String,
        body: String,
        scroll: u16,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line feedback under the form (submit results, decode errors).
#[derive(Debug, Clone)]
pub struct Status {
    pub text: String,
    pub level: StatusLevel,
}

/// Messages folded into the state by [`App::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    FieldUp,
    FieldDown,
    Char(char),
    Backspace,
    ToggleSpace,
    CycleLeft,
    CycleRight,
    Run,
    Quit,
    OpenMenu,
    MenuUp,
    MenuDown,
    MenuSelect,
    DocScroll(i16),
    CloseOverlay,
}

/// Events the surrounding loop must act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Submit,
    Quit,
}

/// Per-session form state.
pub struct App {
    pub title: String,
    pub description: String,
    pub rows: Vec<FormRow>,
    /// Index into `rows`; always a `Field` row when any field exists
    pub selected: usize,
    pub scroll: u16,
    pub menu: Vec<(String, String)>,
    pub overlay: Overlay,
    pub status: Option<Status>,
    pub theme: Theme,
    /// Soft cap on simultaneously visible fields, from the build spec
    pub max_args_shown: usize,
    pub runs_completed: usize,
}

impl App {
    pub fn new(spec: &BuildSpec, theme: Theme) -> Self {
        let mut rows = Vec::new();
        for group in &spec.widgets {
            flatten_group(group, &mut rows);
        }
        let selected = rows
            .iter()
            .position(|row| matches!(row, FormRow::Field(_)))
            .unwrap_or(0);

        App {
            title: spec.program_name.clone(),
            description: spec.description().to_string(),
            rows,
            selected,
            scroll: 0,
            menu: spec
                .menu
                .iter()
                .map(|(name, path)| (name.clone(), path.clone()))
                .collect(),
            overlay: Overlay::None,
            status: None,
            theme,
            max_args_shown: spec.max_args_shown,
            runs_completed: 0,
        }
    }

    pub fn current_field(&self) -> Option<&FieldState> {
        match self.rows.get(self.selected) {
            Some(FormRow::Field(field)) => Some(field),
            _ => None,
        }
    }

    fn current_field_mut(&mut self) -> Option<&mut FieldState> {
        match self.rows.get_mut(self.selected) {
            Some(FormRow::Field(field)) => Some(field),
            _ => None,
        }
    }

    /// Maps a key press to a message, honouring the active overlay.
    pub fn msg_for_key(&self, key: KeyEvent) -> Option<Msg> {
        match &self.overlay {
            Overlay::Document { .. } => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(Msg::CloseOverlay),
                KeyCode::Up => Some(Msg::DocScroll(-1)),
                KeyCode::Down => Some(Msg::DocScroll(1)),
                KeyCode::PageUp => Some(Msg::DocScroll(-10)),
                KeyCode::PageDown => Some(Msg::DocScroll(10)),
                _ => None,
            },
            Overlay::Menu { .. } => match key.code {
                KeyCode::Esc => Some(Msg::CloseOverlay),
                KeyCode::Up => Some(Msg::MenuUp),
                KeyCode::Down => Some(Msg::MenuDown),
                KeyCode::Enter => Some(Msg::MenuSelect),
                _ => None,
            },
            Overlay::None => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return match key.code {
                        KeyCode::Char('c') => Some(Msg::Quit),
                        KeyCode::Char('o') if !self.menu.is_empty() => Some(Msg::OpenMenu),
                        _ => None,
                    };
                }
                match key.code {
                    KeyCode::Esc => Some(Msg::Quit),
                    KeyCode::Enter => Some(Msg::Run),
                    KeyCode::Up | KeyCode::BackTab => Some(Msg::FieldUp),
                    KeyCode::Down | KeyCode::Tab => Some(Msg::FieldDown),
                    KeyCode::Left => Some(Msg::CycleLeft),
                    KeyCode::Right => Some(Msg::CycleRight),
                    KeyCode::Backspace => Some(Msg::Backspace),
                    KeyCode::Char(' ') => {
                        let on_flag = self
                            .current_field()
                            .map(|f| f.widget() == WidgetKind::Flag)
                            .unwrap_or(false);
                        if on_flag {
                            Some(Msg::ToggleSpace)
                        } else {
                            Some(Msg::Char(' '))
                        }
                    }
                    KeyCode::Char(c) => Some(Msg::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Folds one message into the state; returns an event when the loop
    /// has to act.
    pub fn update(&mut self, msg: Msg) -> Option<AppEvent> {
        match msg {
            Msg::FieldUp => self.move_selection(-1),
            Msg::FieldDown => self.move_selection(1),
            Msg::Char(c) => {
                if let Some(field) = self.current_field_mut() {
                    if field.accepts_text() {
                        field.value.push(c);
                    }
                }
            }
            Msg::Backspace => {
                if let Some(field) = self.current_field_mut() {
                    if field.accepts_text() {
                        field.value.pop();
                    }
                }
            }
            Msg::ToggleSpace => {
                if let Some(field) = self.current_field_mut() {
                    if field.widget() == WidgetKind::Flag {
                        field.toggled = !field.toggled;
                    }
                }
            }
            Msg::CycleLeft => self.cycle_current(-1),
            Msg::CycleRight => self.cycle_current(1),
            Msg::Run => return Some(AppEvent::Submit),
            Msg::Quit => return Some(AppEvent::Quit),
            Msg::OpenMenu => {
                if !self.menu.is_empty() {
                    self.overlay = Overlay::Menu { selected: 0 };
                }
            }
            Msg::MenuUp => {
                if let Overlay::Menu { selected } = &mut self.overlay {
                    *selected = selected.saturating_sub(1);
                }
            }
            Msg::MenuDown => {
                let last = self.menu.len().saturating_sub(1);
                if let Overlay::Menu { selected } = &mut self.overlay {
                    *selected = (*selected + 1).min(last);
                }
            }
            Msg::MenuSelect => {
                if let Overlay::Menu { selected } = self.overlay {
                    if let Some((name, path)) = self.menu.get(selected) {
                        self.overlay = Overlay::Document {
                            title: name.clone(),
                            body: read_file(path, MENU_DOC_MAX_LINES),
                            scroll: 0,
                        };
                    }
                }
            }
            Msg::DocScroll(delta) => {
                if let Overlay::Document { scroll, .. } = &mut self.overlay {
                    *scroll = scroll.saturating_add_signed(delta);
                }
            }
            Msg::CloseOverlay => self.overlay = Overlay::None,
        }
        None
    }

    fn move_selection(&mut self, delta: isize) {
        let mut idx = self.selected as isize;
        loop {
            idx += delta;
            if idx < 0 || idx as usize >= self.rows.len() {
                return;
            }
            if matches!(self.rows[idx as usize], FormRow::Field(_)) {
                self.selected = idx as usize;
                return;
            }
        }
    }

    fn cycle_current(&mut self, delta: isize) {
        if let Some(field) = self.current_field_mut() {
            match field.widget() {
                WidgetKind::Dropdown => field.cycle_choice(delta),
                WidgetKind::IntCounter => field.step_int(delta as i64),
                WidgetKind::Flag => field.toggled = !field.toggled,
                _ => {}
            }
        }
    }

    /// Collects the flat encoded-key → raw-value map for one submission.
    pub fn collect_values(&self) -> RunValues {
        self.rows
            .iter()
            .filter_map(|row| match row {
                FormRow::Field(field) => Some((encode_key(&field.item), field.raw_value())),
                FormRow::Section(_) => None,
            })
            .collect()
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            level: StatusLevel::Info,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            level: StatusLevel::Error,
        });
    }
}

/// Flattens a group tree into form rows, preserving display order.
///
/// A RadioGroup item is never rendered itself; its children take its
/// place, in order, in the same flat key namespace.
fn flatten_group(group: &Group, rows: &mut Vec<FormRow>) {
    if !group.name.is_empty() {
        rows.push(FormRow::Section(title_case(&group.name)));
    }
    for item in &group.arg_items {
        if item.kind == ParamKind::RadioGroup {
            for child in &item.props.radio {
                rows.push(FormRow::Field(FieldState::new(child)));
            }
        } else {
            rows.push(FormRow::Field(FieldState::new(item)));
        }
    }
    for sub in &group.groups {
        flatten_group(sub, rows);
    }
}
