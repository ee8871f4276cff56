//! Single-select dropdown and action menu.
//!
//! Both are a trigger plus a [`Popover`] panel holding a [`CommandMenu`].
//! [`Dropdown`] keeps a selected value; [`OptionDropdown`] fires an action
//! id per entry and keeps nothing. The trigger pieces here are shared with
//! [`MultiDropdown`](crate::multi_dropdown::MultiDropdown) and
//! [`InputDropdown`](crate::input_dropdown::InputDropdown).

use crate::command_menu::{self, CommandMenu, Mark, MenuItem};
use crate::palette::{tone, Hue, Shade, WHITE};
use crate::popover::{Align, Popover};
use crate::text;
use crate::variant::{resolve, Edge, FieldStatus, Look, Variant};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, FrameId, Role};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Custom trigger drawing. Receives the trigger area and the open flag.
pub type TriggerRenderer = Box<dyn Fn(&mut Frame, Rect, bool) + Send>;

#[derive(Debug, Clone)]
pub struct DropdownItem {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl DropdownItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownSize {
    #[default]
    Sm,
    Base,
    Md,
}

impl Variant for DropdownSize {
    fn look(self) -> Look {
        let look = Look::new().height(3).edge(Edge::Rounded);
        match self {
            DropdownSize::Sm => look.width(24).pad_x(1),
            DropdownSize::Base => look.width(26).pad_x(1),
            DropdownSize::Md => look.width(28).pad_x(2),
        }
    }
}

impl DropdownSize {
    /// Panel rows shown before the list scrolls.
    pub fn max_visible(self) -> usize {
        match self {
            DropdownSize::Sm => 6,
            DropdownSize::Base => 7,
            DropdownSize::Md => 8,
        }
    }
}

pub(crate) fn status_of(error: bool, disabled: bool) -> FieldStatus {
    if error {
        FieldStatus::Error
    } else if disabled {
        FieldStatus::Disabled
    } else {
        FieldStatus::Default
    }
}

/// Look of a field-style trigger in the given state.
pub(crate) fn trigger_look(
    size: DropdownSize,
    status: FieldStatus,
    open: bool,
    focus: bool,
) -> Look {
    let mut look = resolve([
        Look::new().bg(WHITE).fg(tone(Hue::Gray, Shade::S600)),
        size.look(),
        status.look(),
    ]);
    if open {
        look.bg = Some(tone(Hue::Gray, Shade::S50));
    }
    if (open || focus) && status == FieldStatus::Default {
        look.border = Some(tone(Hue::Blue, Shade::S400));
    }
    look
}

pub(crate) fn panel_look(error: bool) -> Look {
    let border = if error {
        tone(Hue::Red, Shade::S500)
    } else {
        tone(Hue::Gray, Shade::S300)
    };
    Look::new().bg(WHITE).border(border).edge(Edge::Rounded)
}

/// Draw the standard trigger: text on the left, open/closed arrow on the right.
pub(crate) fn paint_trigger(
    frame: &mut Frame,
    area: Rect,
    look: &Look,
    label: &str,
    muted: bool,
    open: bool,
) -> Rect {
    let area = look.fit(area);
    let inner = look.paint(frame, area);
    if inner.width == 0 || inner.height == 0 {
        return area;
    }
    let arrow = if open { "▴" } else { "▾" };
    let room = (inner.width as usize).saturating_sub(2);
    let shown = text::truncate(label, room);
    let pad = room.saturating_sub(text::width(&shown));
    let mut text_style = look.style();
    if muted {
        text_style = text_style.fg(tone(Hue::Gray, Shade::S400));
    }
    let line = Line::from(vec![
        Span::styled(shown, text_style),
        Span::styled(" ".repeat(pad + 1), look.style()),
        Span::styled(arrow, look.style().fg(tone(Hue::Gray, Shade::S500))),
    ]);
    frame.render_widget(Paragraph::new(line), Rect { height: 1, ..inner });
    area
}

/// Place and draw the menu panel under `trigger`.
pub(crate) fn paint_panel(
    frame: &mut Frame,
    popover: &Popover,
    trigger: Rect,
    menu: &CommandMenu,
    look: &Look,
    extra_rows: u16,
) -> Rect {
    let height = menu.height() + extra_rows + look.chrome_rows();
    let (panel, _) = popover.place(trigger, trigger.width, height, frame.area());
    let inner = Popover::paint_surface(frame, panel, look);
    let menu_area = Rect {
        height: inner.height.saturating_sub(extra_rows),
        ..inner
    };
    menu.view(frame, menu_area);
    inner
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation of the trigger.
    Toggle,
    SetOpen(bool),
    /// Select by value, as a click on that option would.
    Pick(String),
    Menu(command_menu::Message),
    /// Deferred until the panel has been drawn once.
    ScrollToSelected,
    /// Emitted once per selection.
    Changed(String),
    OpenChanged(bool),
}

pub struct Dropdown {
    items: Vec<DropdownItem>,
    value: Option<String>,
    placeholder: String,
    size: DropdownSize,
    error: bool,
    disabled: bool,
    popover: Popover,
    menu: CommandMenu,
    scroll: FrameId,
    trigger: Option<TriggerRenderer>,
    focus: bool,
    look: Look,
}

impl Dropdown {
    pub fn new(items: Vec<DropdownItem>, placeholder: impl Into<String>) -> Self {
        let size = DropdownSize::default();
        let mut dropdown = Self {
            menu: CommandMenu::new(Vec::new()).with_max_visible(size.max_visible()),
            items,
            value: None,
            placeholder: placeholder.into(),
            size,
            error: false,
            disabled: false,
            popover: Popover::new(),
            scroll: FrameId::next(),
            trigger: None,
            focus: false,
            look: Look::new(),
        };
        dropdown.rebuild_menu();
        dropdown
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(Some(value.into()));
        self
    }

    pub fn with_size(mut self, size: DropdownSize) -> Self {
        self.size = size;
        self.menu = std::mem::take(&mut self.menu).with_max_visible(size.max_visible());
        self
    }

    pub fn with_search(mut self, searchable: bool) -> Self {
        self.menu = std::mem::take(&mut self.menu).with_search(searchable);
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

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Values outside the item set leave the selection empty.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = match value {
            Some(v) if self.items.iter().any(|item| item.value == v) => Some(v),
            Some(v) => {
                tracing::warn!(value = %v, "dropdown value is not among the items");
                None
            }
            None => None,
        };
        self.refresh_marks();
    }

    pub fn set_items(&mut self, items: Vec<DropdownItem>) {
        self.items = items;
        if let Some(v) = self.value.take() {
            self.set_value(Some(v));
        }
        self.rebuild_menu();
    }

    pub fn is_open(&self) -> bool {
        self.popover.is_open()
    }

    pub fn scroll_frame(&self) -> FrameId {
        self.scroll
    }

    pub fn menu(&self) -> &CommandMenu {
        &self.menu
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Text shown on the trigger.
    pub fn display_text(&self) -> &str {
        self.selected_index()
            .map(|i| self.items[i].label.as_str())
            .unwrap_or(&self.placeholder)
    }

    fn selected_index(&self) -> Option<usize> {
        let value = self.value.as_deref()?;
        self.items.iter().position(|item| item.value == value)
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
        let value = self.value.as_deref();
        let marks: Vec<Mark> = self
            .items
            .iter()
            .map(|item| Mark::Tick(Some(item.value.as_str()) == value))
            .collect();
        self.menu.set_marks(marks);
    }

    fn set_open(&mut self, open: bool) -> Command<Message> {
        if open && self.disabled {
            tracing::debug!("dropdown is disabled");
            return Command::none();
        }
        if !self.popover.set_open(open) {
            return Command::none();
        }
        if open {
            self.menu.set_query("");
            Command::batch([
                Command::message(Message::OpenChanged(true)),
                Command::next_frame(self.scroll, Message::ScrollToSelected),
            ])
        } else {
            Command::batch([
                Command::message(Message::OpenChanged(false)),
                Command::cancel_frame(self.scroll),
            ])
        }
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        if self.disabled {
            tracing::debug!(index, "pick ignored on disabled dropdown");
            return Command::none();
        }
        let Some(item) = self.items.get(index) else {
            return Command::none();
        };
        if item.disabled {
            tracing::debug!(value = %item.value, "disabled dropdown item");
            return Command::none();
        }
        let value = item.value.clone();
        self.value = Some(value.clone());
        self.refresh_marks();
        Command::batch([Command::message(Message::Changed(value)), self.set_open(false)])
    }

    fn route_menu(&mut self, msg: command_menu::Message) -> Command<Message> {
        let out = self.menu.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            command_menu::Message::Chosen(index) => self.choose(index),
            _ => Command::none(),
        }))
    }
}

impl Component for Dropdown {
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
                    _ => self.route_menu(command_menu::Message::KeyPress(key)),
                }
            }
            Message::Toggle => self.set_open(!self.popover.is_open()),
            Message::SetOpen(open) => self.set_open(open),
            Message::Pick(value) => match self.items.iter().position(|item| item.value == value) {
                Some(index) => self.choose(index),
                None => {
                    tracing::warn!(value = %value, "picked value is not among the items");
                    Command::none()
                }
            },
            Message::Menu(msg) if self.popover.is_open() => self.route_menu(msg),
            Message::ScrollToSelected => {
                if let Some(index) = self.selected_index() {
                    self.menu.highlight(index);
                    self.menu.scroll_to_item(index, 0);
                }
                Command::none()
            }
            Message::KeyPress(_) | Message::Menu(_) | Message::Changed(_) | Message::OpenChanged(_) => {
                Command::none()
            }
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
                self.display_text(),
                self.selected_index().is_none(),
                open,
            ),
        };
        if open {
            paint_panel(frame, &self.popover, trigger, &self.menu, &panel_look(self.error), 0);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }

    fn unmount(&mut self) -> Command<Message> {
        self.popover.set_open(false);
        Command::cancel_frame(self.scroll)
    }
}

impl Accessible for Dropdown {
    fn access_node(&self) -> AccessNode {
        let node = AccessNode::new(Role::Combobox)
            .label(self.display_text())
            .expanded(self.popover.is_open())
            .disabled(self.disabled)
            .invalid(self.error);
        if self.popover.is_open() {
            node.child(self.menu.access_node())
        } else {
            node
        }
    }
}

/// One entry of an [`OptionDropdown`].
#[derive(Debug, Clone)]
pub struct OptionItem {
    pub label: String,
    /// Emitted on choice. Entries without one are inert.
    pub action: Option<String>,
    pub icon: Option<String>,
}

impl OptionItem {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: Some(action.into()),
            icon: None,
        }
    }

    /// An entry that does nothing when chosen.
    pub fn inert(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
            icon: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone)]
pub enum OptionMessage {
    KeyPress(KeyEvent),
    Toggle,
    SetOpen(bool),
    Menu(command_menu::Message),
    /// Emitted with the chosen entry's action id.
    Action(String),
    OpenChanged(bool),
}

/// Menu of actions behind a caller-drawn trigger.
pub struct OptionDropdown {
    items: Vec<OptionItem>,
    label: String,
    size: DropdownSize,
    popover: Popover,
    menu: CommandMenu,
    trigger: Option<TriggerRenderer>,
    focus: bool,
}

impl OptionDropdown {
    /// `label` is drawn on the default trigger and used as the accessible name.
    pub fn new(label: impl Into<String>, items: Vec<OptionItem>) -> Self {
        let size = DropdownSize::default();
        let menu = CommandMenu::new(
            items
                .iter()
                .map(|item| {
                    let entry = MenuItem::new(&item.label);
                    match &item.icon {
                        Some(icon) => entry.icon(icon),
                        None => entry,
                    }
                })
                .collect(),
        )
        .with_max_visible(size.max_visible());
        Self {
            items,
            label: label.into(),
            size,
            popover: Popover::new().with_align(Align::End),
            menu,
            trigger: None,
            focus: false,
        }
    }

    pub fn with_size(mut self, size: DropdownSize) -> Self {
        self.size = size;
        self.menu = std::mem::take(&mut self.menu).with_max_visible(size.max_visible());
        self
    }

    pub fn with_search(mut self, searchable: bool) -> Self {
        self.menu = std::mem::take(&mut self.menu).with_search(searchable);
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

    pub fn is_open(&self) -> bool {
        self.popover.is_open()
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn set_open(&mut self, open: bool) -> Command<OptionMessage> {
        if !self.popover.set_open(open) {
            return Command::none();
        }
        if open {
            self.menu.set_query("");
        }
        Command::message(OptionMessage::OpenChanged(open))
    }

    fn route_menu(&mut self, msg: command_menu::Message) -> Command<OptionMessage> {
        let out = self.menu.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            command_menu::Message::Chosen(index) => {
                let action = self.items.get(index).and_then(|item| item.action.clone());
                match action {
                    Some(id) => Command::batch([
                        Command::message(OptionMessage::Action(id)),
                        self.set_open(false),
                    ]),
                    None => {
                        tracing::debug!(index, "option entry has no action");
                        self.set_open(false)
                    }
                }
            }
            _ => Command::none(),
        }))
    }
}

impl Component for OptionDropdown {
    type Message = OptionMessage;

    fn update(&mut self, msg: OptionMessage) -> Command<OptionMessage> {
        match msg {
            OptionMessage::KeyPress(key) if self.focus => {
                if !self.popover.is_open() {
                    return match key.code {
                        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.set_open(true),
                        _ => Command::none(),
                    };
                }
                match key.code {
                    KeyCode::Esc => self.set_open(false),
                    _ => self.route_menu(command_menu::Message::KeyPress(key)),
                }
            }
            OptionMessage::Toggle => self.set_open(!self.popover.is_open()),
            OptionMessage::SetOpen(open) => self.set_open(open),
            OptionMessage::Menu(msg) if self.popover.is_open() => self.route_menu(msg),
            OptionMessage::KeyPress(_)
            | OptionMessage::Menu(_)
            | OptionMessage::Action(_)
            | OptionMessage::OpenChanged(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let open = self.popover.is_open();
        let trigger = match &self.trigger {
            Some(render) => {
                render(frame, area, open);
                area
            }
            None => {
                let look = trigger_look(self.size, FieldStatus::Default, open, self.focus);
                paint_trigger(frame, area, &look, &self.label, false, open)
            }
        };
        if open {
            let panel_trigger = Rect {
                width: trigger.width.max(self.menu.content_width() + 2),
                ..trigger
            };
            paint_panel(frame, &self.popover, panel_trigger, &self.menu, &panel_look(false), 0);
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }

    fn unmount(&mut self) -> Command<OptionMessage> {
        self.popover.set_open(false);
        Command::none()
    }
}

impl Accessible for OptionDropdown {
    fn access_node(&self) -> AccessNode {
        let node = AccessNode::new(Role::Button)
            .label(&self.label)
            .expanded(self.popover.is_open());
        if !self.popover.is_open() {
            return node;
        }
        node.child(AccessNode::new(Role::Menu).children(
            self.items.iter().map(|item| {
                AccessNode::new(Role::MenuItem)
                    .label(&item.label)
                    .disabled(item.action.is_none())
            }),
        ))
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

    fn fruit() -> Dropdown {
        Dropdown::new(
            vec![
                DropdownItem::new("apple", "Apple"),
                DropdownItem::new("banana", "Banana").disabled(true),
                DropdownItem::new("cherry", "Cherry"),
            ],
            "Pick a fruit",
        )
    }

    #[test]
    fn pick_emits_changed_once_and_closes() {
        let mut h = ComponentHarness::new(fruit());
        h.send(Message::Toggle);
        assert!(h.component().is_open());
        let out = h.send(Message::Pick("cherry".into()));
        let changed: Vec<_> = out
            .iter()
            .filter(|m| matches!(m, Message::Changed(_)))
            .collect();
        assert_eq!(changed.len(), 1);
        assert!(matches!(changed[0], Message::Changed(v) if v == "cherry"));
        assert!(!h.component().is_open());
        assert_eq!(h.component().display_text(), "Cherry");
    }

    #[test]
    fn unknown_value_shows_placeholder() {
        let d = fruit().with_value("durian");
        assert_eq!(d.value(), None);
        assert_eq!(d.display_text(), "Pick a fruit");
    }

    #[test]
    fn disabled_dropdown_never_opens() {
        let mut h = ComponentHarness::new(fruit().with_disabled(true));
        assert!(h.send(Message::Toggle).is_empty());
        assert!(!h.component().is_open());
    }

    #[test]
    fn disabled_dropdown_pick_is_inert() {
        let mut h = ComponentHarness::new(fruit().with_disabled(true));
        assert!(h.send(Message::Pick("cherry".into())).is_empty());
        assert_eq!(h.component().value(), None);
    }

    #[test]
    fn disabled_item_is_not_selectable() {
        let mut d = fruit();
        assert!(d.update(Message::Pick("banana".into())).is_none());
        assert_eq!(d.value(), None);
    }

    #[test]
    fn opening_defers_scroll_to_next_frame() {
        let items = (0..30)
            .map(|i| DropdownItem::new(format!("v{i}"), format!("Item {i}")))
            .collect();
        let mut h = ComponentHarness::new(Dropdown::new(items, "Pick").with_value("v20"));
        let id = h.component().scroll_frame();
        let out = h.send(Message::Toggle);
        assert!(matches!(out.as_slice(), [Message::OpenChanged(true)]));
        assert!(h.frame_pending(id));
        assert_eq!(h.component().menu().scroll_offset(), 0);
        h.advance_frame();
        assert_eq!(h.component().menu().scroll_offset(), 20);
        assert_eq!(h.component().menu().highlighted(), Some(20));
    }

    #[test]
    fn closing_and_unmount_cancel_pending_scroll() {
        let mut h = ComponentHarness::new(fruit());
        let id = h.component().scroll_frame();
        h.send(Message::Toggle);
        h.send(Message::Toggle);
        assert!(!h.frame_pending(id));

        h.send(Message::Toggle);
        assert!(h.frame_pending(id));
        h.unmount();
        assert!(!h.frame_pending(id));
    }

    #[test]
    fn keyboard_opens_navigates_and_chooses() {
        let mut d = fruit().with_search(true);
        d.focus();
        d.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(d.is_open());
        d.update(Message::KeyPress(key(KeyCode::Char('h'))));
        let cmd = d.update(Message::KeyPress(key(KeyCode::Enter)));
        let msgs = cmd.messages();
        assert!(msgs.iter().any(|m| matches!(m, Message::Changed(v) if v == "cherry")));
        assert!(!d.is_open());
    }

    #[test]
    fn escape_closes() {
        let mut d = fruit();
        d.focus();
        d.update(Message::Toggle);
        let cmd = d.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(cmd.cancels_frame(d.scroll_frame()));
        assert!(!d.is_open());
    }

    #[test]
    fn sizes_and_status_resolve() {
        for size in [DropdownSize::Sm, DropdownSize::Base, DropdownSize::Md] {
            let look = trigger_look(size, FieldStatus::Default, false, false);
            assert_eq!(look.width, size.look().width);
        }
        let error = trigger_look(DropdownSize::Sm, status_of(true, true), false, false);
        assert_eq!(error.border, Some(tone(Hue::Red, Shade::S500)));
        let disabled = trigger_look(DropdownSize::Sm, status_of(false, true), false, false);
        assert!(disabled.modifiers.contains(ratatui::style::Modifier::DIM));
    }

    #[test]
    fn renders_trigger_and_open_panel() {
        let mut d = fruit().with_value("apple");
        let closed = ComponentHarness::new(fruit()).render_string(30, 8);
        assert!(closed.contains("Pick a fruit"));
        assert!(closed.contains('▾'));

        d.update(Message::Toggle);
        let out = ComponentHarness::new(d).render_string(30, 8);
        assert!(out.contains('▴'));
        assert!(out.contains("Banana"));
        assert!(out.contains('✓'));
    }

    #[test]
    fn custom_trigger_receives_open_flag() {
        let d = fruit().with_trigger(Box::new(|frame: &mut Frame, area: Rect, open: bool| {
            let text = if open { "OPEN" } else { "SHUT" };
            frame.render_widget(Paragraph::new(text), area);
        }));
        let out = ComponentHarness::new(d).render_string(10, 1);
        assert!(out.starts_with("SHUT"));
    }

    #[test]
    fn access_node_reports_expanded() {
        let mut d = fruit();
        assert_eq!(d.access_node().expanded, Some(false));
        d.update(Message::Toggle);
        let node = d.access_node();
        assert_eq!(node.expanded, Some(true));
        assert_eq!(node.find_all(Role::Option).len(), 3);
    }

    fn actions() -> OptionDropdown {
        OptionDropdown::new(
            "More",
            vec![
                OptionItem::new("Edit", "edit"),
                OptionItem::inert("Archived"),
                OptionItem::new("Delete", "delete"),
            ],
        )
    }

    #[test]
    fn option_dropdown_emits_action_and_closes() {
        let mut h = ComponentHarness::new(actions());
        h.send(OptionMessage::Toggle);
        let out = h.send(OptionMessage::Menu(command_menu::Message::Choose(2)));
        assert!(out
            .iter()
            .any(|m| matches!(m, OptionMessage::Action(id) if id == "delete")));
        assert!(!h.component().is_open());
    }

    #[test]
    fn option_without_action_is_inert() {
        let mut h = ComponentHarness::new(actions());
        h.send(OptionMessage::Toggle);
        let out = h.send(OptionMessage::Menu(command_menu::Message::Choose(1)));
        assert!(!out.iter().any(|m| matches!(m, OptionMessage::Action(_))));
    }

    #[test]
    fn option_menu_ignores_choices_while_closed() {
        let mut o = actions();
        assert!(o
            .update(OptionMessage::Menu(command_menu::Message::Choose(0)))
            .is_none());
    }
}
