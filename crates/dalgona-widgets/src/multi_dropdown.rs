//! Multi-select dropdown with select-all, deselect-all and an "add new" footer.

use crate::command_menu::{self, CommandMenu, Mark, MenuItem};
use crate::dropdown::{
    paint_trigger, panel_look, status_of, trigger_look, DropdownItem, DropdownSize,
    TriggerRenderer,
};
use crate::palette::{tone, Hue, Shade};
use crate::popover::{Align, Popover};
use crate::text_edit::{EditOutcome, TextEditState};
use crate::variant::Look;
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const SELECT_ALL: &str = "Select all";
pub const DESELECT_ALL: &str = "Deselect all";
pub const ADD_NEW: &str = "Add new";

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Toggle,
    SetOpen(bool),
    Menu(command_menu::Message),
    /// Select every item that passes the current filter.
    SelectAll,
    DeselectAll,
    /// Flip one value in or out of the selection.
    ToggleItem(String),
    /// Pointer activation of the footer.
    PressAddNew,
    /// Emitted with the full selection, in selection order.
    Changed(Vec<String>),
    /// Emitted when the footer is activated.
    AddNew,
    OpenChanged(bool),
}

pub struct MultiDropdown {
    items: Vec<DropdownItem>,
    values: Vec<String>,
    placeholder: String,
    label: Option<String>,
    size: DropdownSize,
    error: bool,
    disabled: bool,
    add_new: bool,
    search: TextEditState,
    popover: Popover,
    menu: CommandMenu,
    trigger: Option<TriggerRenderer>,
    focus: bool,
    look: Look,
}

impl MultiDropdown {
    pub fn new(items: Vec<DropdownItem>, placeholder: impl Into<String>) -> Self {
        let size = DropdownSize::default();
        let mut dropdown = Self {
            menu: CommandMenu::new(Vec::new()).with_max_visible(size.max_visible()),
            items,
            values: Vec::new(),
            placeholder: placeholder.into(),
            label: None,
            size,
            error: false,
            disabled: false,
            add_new: false,
            search: TextEditState::new(),
            popover: Popover::new(),
            trigger: None,
            focus: false,
            look: Look::new(),
        };
        dropdown.rebuild_menu();
        dropdown
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.set_values(values);
        self
    }

    /// Noun used in the trigger text, e.g. "Teams".
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_size(mut self, size: DropdownSize) -> Self {
        self.size = size;
        self.menu = std::mem::take(&mut self.menu).with_max_visible(size.max_visible());
        self
    }

    pub fn with_error(mut self, error: bool) -> Self {
        self.error = error;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Show the "add new" footer.
    pub fn with_add_new(mut self, show: bool) -> Self {
        self.add_new = show;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.popover = self.popover.with_align(align);
        self
    }

    pub fn with_trigger(mut self, render: TriggerRenderer) -> Self {
        self.trigger = Some(render);
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Unknown values and duplicates are dropped.
    pub fn set_values(&mut self, values: Vec<String>) {
        self.values.clear();
        for value in values {
            if !self.items.iter().any(|item| item.value == value) {
                tracing::warn!(value = %value, "multi dropdown value is not among the items");
            } else if !self.values.contains(&value) {
                self.values.push(value);
            }
        }
        self.refresh_marks();
    }

    pub fn is_open(&self) -> bool {
        self.popover.is_open()
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Trigger text for the current selection.
    pub fn display_text(&self) -> String {
        let n = self.values.len();
        if n == 0 {
            return self.placeholder.clone();
        }
        let all = n == self.items.len();
        match &self.label {
            Some(label) if all => format!("All {label}"),
            Some(label) => format!("{label} ({n} selected)"),
            None => format!("{n} selected"),
        }
    }

    fn rebuild_menu(&mut self) {
        self.menu.set_items(
            self.items
                .iter()
                .map(|item| MenuItem::new(&item.label).disabled(item.disabled))
                .collect(),
        );
        self.refresh_marks();
    }

    fn refresh_marks(&mut self) {
        let marks: Vec<Mark> = self
            .items
            .iter()
            .map(|item| Mark::Box(self.values.contains(&item.value)))
            .collect();
        self.menu.set_marks(marks);
    }

    fn changed(&mut self) -> Command<Message> {
        self.refresh_marks();
        Command::message(Message::Changed(self.values.clone()))
    }

    fn set_open(&mut self, open: bool) -> Command<Message> {
        if open && self.disabled {
            tracing::debug!("multi dropdown is disabled");
            return Command::none();
        }
        if !self.popover.set_open(open) {
            return Command::none();
        }
        if open {
            self.search.clear();
            self.menu.set_query("");
        }
        Command::message(Message::OpenChanged(open))
    }

    fn toggle_value(&mut self, value: &str) -> Command<Message> {
        match self.items.iter().find(|item| item.value == value) {
            Some(item) if item.disabled => {
                tracing::debug!(value, "disabled multi dropdown item");
                return Command::none();
            }
            Some(_) => {}
            None => {
                tracing::warn!(value, "toggled value is not among the items");
                return Command::none();
            }
        }
        match self.values.iter().position(|v| v == value) {
            Some(at) => {
                self.values.remove(at);
            }
            None => self.values.push(value.to_string()),
        }
        self.changed()
    }

    fn select_all(&mut self) -> Command<Message> {
        self.values = self
            .menu
            .filtered()
            .iter()
            .map(|&i| &self.items[i])
            .filter(|item| !item.disabled)
            .map(|item| item.value.clone())
            .collect();
        self.changed()
    }

    fn route_menu(&mut self, msg: command_menu::Message) -> Command<Message> {
        let out = self.menu.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            command_menu::Message::Chosen(index) => match self.items.get(index) {
                Some(item) => {
                    let value = item.value.clone();
                    self.toggle_value(&value)
                }
                None => Command::none(),
            },
            _ => Command::none(),
        }))
    }

    fn panel_rows(&self) -> u16 {
        // search, rule, header, list, then rule and footer
        let footer = if self.add_new { 2 } else { 0 };
        3 + self.menu.height() + footer
    }
}

impl Component for MultiDropdown {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => {
                if !self.popover.is_open() {
                    return match key.code {
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.set_open(true),
                        _ => Command::none(),
                    };
                }
                match key.code {
                    KeyCode::Esc => self.set_open(false),
                    KeyCode::Up
                    | KeyCode::Down
                    | KeyCode::PageUp
                    | KeyCode::PageDown
                    | KeyCode::Enter => self.route_menu(command_menu::Message::KeyPress(key)),
                    _ => match self.search.handle_key(key) {
                        EditOutcome::Changed => {
                            self.menu.set_query(&self.search.value());
                            Command::none()
                        }
                        EditOutcome::Moved | EditOutcome::Ignored => Command::none(),
                    },
                }
            }
            Message::Toggle => self.set_open(!self.popover.is_open()),
            Message::SetOpen(open) => self.set_open(open),
            Message::Menu(msg) if self.popover.is_open() => self.route_menu(msg),
            Message::SelectAll if !self.disabled => self.select_all(),
            Message::DeselectAll if !self.disabled => {
                self.values.clear();
                self.changed()
            }
            Message::ToggleItem(value) if !self.disabled => self.toggle_value(&value),
            Message::PressAddNew if self.add_new => {
                Command::batch([Command::message(Message::AddNew), self.set_open(false)])
            }
            Message::SelectAll | Message::DeselectAll | Message::ToggleItem(_) => {
                tracing::debug!("multi dropdown is disabled");
                Command::none()
            }
            Message::KeyPress(_)
            | Message::Menu(_)
            | Message::PressAddNew
            | Message::Changed(_)
            | Message::AddNew
            | Message::OpenChanged(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let open = self.popover.is_open();
        let status = status_of(self.error, self.disabled);
        let look = trigger_look(self.size, status, open, self.focus).merge(self.look);
        let trigger = match &self.trigger {
            Some(render) => {
                render(frame, area, open);
                area
            }
            None => paint_trigger(
                frame,
                area,
                &look,
                &self.display_text(),
                self.values.is_empty(),
                open,
            ),
        };
        if !open {
            return;
        }

        let panel_look = panel_look(self.error);
        let height = self.panel_rows() + panel_look.chrome_rows();
        let (panel, _) = self.popover.place(trigger, trigger.width, height, frame.area());
        let inner = Popover::paint_surface(frame, panel, &panel_look);
        let base = panel_look.style();
        let muted = base.fg(tone(Hue::Gray, Shade::S500));
        let rule = Line::styled(
            "─".repeat(inner.width as usize),
            Style::default().fg(tone(Hue::Gray, Shade::S200)),
        );
        let query = self.search.value();
        let search = if query.is_empty() {
            Span::styled(command_menu::DEFAULT_SEARCH_PLACEHOLDER, muted)
        } else {
            Span::styled(query, base)
        };
        let gap = (inner.width as usize).saturating_sub(SELECT_ALL.len() + DESELECT_ALL.len());
        let head = vec![
            Line::from(vec![Span::styled("⌕ ", muted), search]),
            rule.clone(),
            Line::from(vec![
                Span::styled(SELECT_ALL, base.fg(tone(Hue::Blue, Shade::S400))),
                Span::raw(" ".repeat(gap)),
                Span::styled(DESELECT_ALL, base.fg(tone(Hue::Red, Shade::S400))),
            ]),
        ];
        frame.render_widget(Paragraph::new(head), Rect { height: 3, ..inner });

        let list = Rect {
            y: inner.y + 3,
            height: self.menu.height().min(inner.height.saturating_sub(3)),
            ..inner
        };
        self.menu.view(frame, list);

        if self.add_new {
            let footer = Rect {
                y: list.bottom(),
                height: inner.bottom().saturating_sub(list.bottom()),
                ..inner
            };
            let lines = vec![
                rule,
                Line::styled(format!("+ {ADD_NEW}"), base.fg(tone(Hue::Blue, Shade::S500))),
            ];
            frame.render_widget(Paragraph::new(lines), footer);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }

    fn unmount(&mut self) -> Command<Message> {
        self.popover.set_open(false);
        Command::none()
    }
}

impl Accessible for MultiDropdown {
    fn access_node(&self) -> AccessNode {
        let node = AccessNode::new(Role::Combobox)
            .label(self.display_text())
            .expanded(self.popover.is_open())
            .disabled(self.disabled)
            .invalid(self.error);
        if !self.popover.is_open() {
            return node;
        }
        let mut node = node
            .child(AccessNode::new(Role::Button).label(SELECT_ALL))
            .child(AccessNode::new(Role::Button).label(DESELECT_ALL))
            .child(self.menu.access_node());
        if self.add_new {
            node = node.child(AccessNode::new(Role::Button).label(ADD_NEW));
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use dalgona_core::testing::ComponentHarness;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn teams() -> MultiDropdown {
        MultiDropdown::new(
            vec![
                DropdownItem::new("eng", "Engineering"),
                DropdownItem::new("des", "Design"),
                DropdownItem::new("ops", "Operations"),
            ],
            "Select teams",
        )
    }

    fn values(out: &[Message]) -> Option<Vec<String>> {
        out.iter().find_map(|m| match m {
            Message::Changed(v) => Some(v.clone()),
            _ => None,
        })
    }

    #[test]
    fn display_text_rules() {
        let d = teams();
        assert_eq!(d.display_text(), "Select teams");
        let d = teams().with_values(vec!["eng".into()]);
        assert_eq!(d.display_text(), "1 selected");
        let d = teams().with_label("Teams").with_values(vec!["eng".into(), "ops".into()]);
        assert_eq!(d.display_text(), "Teams (2 selected)");
        let d = teams()
            .with_label("Teams")
            .with_values(vec!["eng".into(), "des".into(), "ops".into()]);
        assert_eq!(d.display_text(), "All Teams");
        let d = teams().with_values(vec!["eng".into(), "des".into(), "ops".into()]);
        assert_eq!(d.display_text(), "3 selected");
    }

    #[test]
    fn toggle_keeps_selection_order() {
        let mut h = ComponentHarness::new(teams());
        h.send(Message::ToggleItem("ops".into()));
        let out = h.send(Message::ToggleItem("eng".into()));
        assert_eq!(values(&out), Some(vec!["ops".to_string(), "eng".to_string()]));
        let out = h.send(Message::ToggleItem("ops".into()));
        assert_eq!(values(&out), Some(vec!["eng".to_string()]));
    }

    #[test]
    fn select_all_respects_filter() {
        let mut d = teams();
        d.focus();
        d.update(Message::Toggle);
        d.update(Message::KeyPress(key(KeyCode::Char('o'))));
        d.update(Message::KeyPress(key(KeyCode::Char('n'))));
        let out = d.update(Message::SelectAll).messages();
        // "on" matches Operations only; "Design" has no "on".
        assert_eq!(values(&out), Some(vec!["ops".to_string()]));
    }

    #[test]
    fn deselect_all_clears() {
        let mut d = teams().with_values(vec!["eng".into(), "des".into()]);
        let out = d.update(Message::DeselectAll).messages();
        assert_eq!(values(&out), Some(Vec::new()));
        assert!(d.values().is_empty());
    }

    #[test]
    fn enter_toggles_highlighted() {
        let mut d = teams();
        d.focus();
        d.update(Message::KeyPress(key(KeyCode::Enter)));
        d.update(Message::KeyPress(key(KeyCode::Down)));
        let out = d.update(Message::KeyPress(key(KeyCode::Enter))).messages();
        assert_eq!(values(&out), Some(vec!["des".to_string()]));
        assert!(d.is_open());
    }

    #[test]
    fn add_new_only_when_enabled() {
        let mut d = teams();
        assert!(d.update(Message::PressAddNew).is_none());

        let mut h = ComponentHarness::new(teams().with_add_new(true));
        h.send(Message::Toggle);
        let out = h.send(Message::PressAddNew);
        assert!(out.iter().any(|m| matches!(m, Message::AddNew)));
        assert!(!h.component().is_open());
    }

    #[test]
    fn disabled_never_changes() {
        let mut d = teams().with_disabled(true);
        assert!(d.update(Message::Toggle).is_none());
        assert!(d.update(Message::ToggleItem("eng".into())).is_none());
        assert!(d.update(Message::SelectAll).is_none());
        assert!(d.values().is_empty());
    }

    #[test]
    fn unknown_values_are_dropped() {
        let d = teams().with_values(vec!["eng".into(), "xyz".into(), "eng".into()]);
        assert_eq!(d.values(), &["eng".to_string()]);
    }

    #[test]
    fn renders_panel_sections() {
        let mut d = teams().with_add_new(true).with_values(vec!["des".into()]);
        d.update(Message::Toggle);
        let out = ComponentHarness::new(d).render_string(30, 14);
        assert!(out.contains(SELECT_ALL));
        assert!(out.contains(DESELECT_ALL));
        assert!(out.contains("[✓] Design"));
        assert!(out.contains("[ ] Engineering"));
        assert!(out.contains("+ Add new"));
    }
}
