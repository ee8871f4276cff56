//! Tab navigation for switching between views.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::text;
use crate::variant::{Look, Variant};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

#[derive(Debug, Clone)]
pub struct TabItem {
    pub value: String,
    pub label: String,
    pub disabled: bool,
    pub icon: Option<String>,
    pub badge: Option<String>,
    /// Body shown below the list while the tab is active.
    pub content: Option<String>,
}

impl TabItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            icon: None,
            badge: None,
            content: None,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    fn width(&self) -> u16 {
        let icon = self.icon.as_ref().map_or(0, |i| text::width(i) + 1);
        let badge = self.badge.as_ref().map_or(0, |b| text::width(b) + 3);
        (icon + text::width(&self.label) + badge) as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabsVariant {
    #[default]
    Underline,
    Pill,
    Bar,
}

impl Variant for TabsVariant {
    /// `pad_x` is the padding inside each tab; the gap between tabs comes
    /// from [`TabsVariant::gap`].
    fn look(self) -> Look {
        let look = Look::new().fg(tone(Hue::Gray, Shade::S500));
        match self {
            TabsVariant::Underline => look.pad_x(1).height(2),
            TabsVariant::Pill => look.pad_x(2).height(1).bg(tone(Hue::Gray, Shade::S100)),
            TabsVariant::Bar => look.pad_x(3).height(2),
        }
    }
}

impl TabsVariant {
    pub fn gap(self) -> u16 {
        match self {
            TabsVariant::Underline => 4,
            TabsVariant::Pill => 1,
            TabsVariant::Bar => 0,
        }
    }

    fn underlined(self) -> bool {
        !matches!(self, TabsVariant::Pill)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation of a tab, by value.
    Select(String),
    /// Emitted when a different tab is activated.
    ValueChanged(String),
}

pub struct Tabs {
    tabs: Vec<TabItem>,
    active: Option<usize>,
    variant: TabsVariant,
    full_width: bool,
    controlled: bool,
    focus: bool,
    look: Look,
}

impl Tabs {
    /// The first tab starts active.
    pub fn new(tabs: Vec<TabItem>) -> Self {
        let active = if tabs.is_empty() { None } else { Some(0) };
        Self {
            tabs,
            active,
            variant: TabsVariant::default(),
            full_width: false,
            controlled: false,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_default_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_variant(mut self, variant: TabsVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Stretch tabs to share the full width.
    pub fn with_full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    /// The active tab changes only through [`set_value`](Self::set_value);
    /// interaction just emits [`Message::ValueChanged`].
    pub fn with_controlled(mut self, controlled: bool) -> Self {
        self.controlled = controlled;
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn tabs(&self) -> &[TabItem] {
        &self.tabs
    }

    pub fn value(&self) -> Option<&str> {
        self.active.map(|i| self.tabs[i].value.as_str())
    }

    pub fn set_value(&mut self, value: &str) {
        match self.tabs.iter().position(|t| t.value == value) {
            Some(index) => self.active = Some(index),
            None => tracing::warn!(value, "tab value is not among the tabs"),
        }
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Next enabled tab after the active one, wrapping.
    fn seek(&self, forward: bool) -> Option<usize> {
        let n = self.tabs.len();
        let from = self.active?;
        (1..n)
            .map(|step| if forward { (from + step) % n } else { (from + n - step) % n })
            .find(|&i| !self.tabs[i].disabled)
    }

    fn activate(&mut self, index: usize) -> Command<Message> {
        let Some(tab) = self.tabs.get(index) else {
            return Command::none();
        };
        if tab.disabled {
            tracing::debug!(value = %tab.value, "disabled tab");
            return Command::none();
        }
        if self.active == Some(index) {
            return Command::none();
        }
        let value = tab.value.clone();
        if !self.controlled {
            self.active = Some(index);
        }
        Command::message(Message::ValueChanged(value))
    }

    /// Column offset and width of every tab when drawn `width` columns wide.
    pub fn layout(&self, width: u16) -> Vec<(u16, u16)> {
        let pad = self.variant.look().pad_x.unwrap_or(0);
        let gap = self.variant.gap();
        let n = self.tabs.len() as u16;
        if n == 0 {
            return Vec::new();
        }
        if self.full_width {
            let each = width.saturating_sub(gap * (n - 1)) / n;
            return (0..n).map(|i| (i * (each + gap), each)).collect();
        }
        let mut x = 0;
        self.tabs
            .iter()
            .map(|tab| {
                let w = tab.width() + pad * 2;
                let cell = (x, w);
                x += w + gap;
                cell
            })
            .collect()
    }

    fn tab_spans(&self, tab: &TabItem, active: bool, width: u16) -> Vec<Span<'static>> {
        let mut style = Style::default().fg(tone(Hue::Gray, Shade::S500));
        if let Some(bg) = self.variant.look().merge(self.look).bg {
            style = style.bg(bg);
        }
        if active {
            style = style.fg(tone(Hue::Gray, Shade::S700)).add_modifier(Modifier::BOLD);
            if self.variant == TabsVariant::Pill {
                style = style.bg(WHITE);
            }
        }
        if tab.disabled {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.focus && active {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let mut body = vec![];
        if let Some(icon) = &tab.icon {
            body.push(Span::styled(format!("{icon} "), style));
        }
        body.push(Span::styled(tab.label.clone(), style));
        if let Some(badge) = &tab.badge {
            body.push(Span::styled(" ", style));
            body.push(Span::styled(
                format!(" {badge} "),
                Style::default()
                    .fg(tone(Hue::Blue, Shade::S700))
                    .bg(tone(Hue::Blue, Shade::S50)),
            ));
        }
        let left = text::center_offset(tab.width() as usize, width as usize);
        let right = width.saturating_sub(left + tab.width());
        let mut spans = vec![Span::styled(" ".repeat(left as usize), style)];
        spans.extend(body);
        spans.push(Span::styled(" ".repeat(right as usize), style));
        spans
    }
}

impl Component for Tabs {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Left | KeyCode::Char('h') => match self.seek(false) {
                    Some(i) => self.activate(i),
                    None => Command::none(),
                },
                KeyCode::Right | KeyCode::Char('l') => match self.seek(true) {
                    Some(i) => self.activate(i),
                    None => Command::none(),
                },
                KeyCode::Home => match self.tabs.iter().position(|t| !t.disabled) {
                    Some(i) => self.activate(i),
                    None => Command::none(),
                },
                KeyCode::End => match self.tabs.iter().rposition(|t| !t.disabled) {
                    Some(i) => self.activate(i),
                    None => Command::none(),
                },
                KeyCode::Char(c) => match c.to_digit(10) {
                    Some(n) if n > 0 => self.activate(n as usize - 1),
                    _ => Command::none(),
                },
                _ => Command::none(),
            },
            Message::Select(value) => match self.tabs.iter().position(|t| t.value == value) {
                Some(index) => self.activate(index),
                None => {
                    tracing::warn!(value = %value, "selected tab is not among the tabs");
                    Command::none()
                }
            },
            Message::KeyPress(_) | Message::ValueChanged(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.variant.look().merge(self.look);
        let list_height = look.height.unwrap_or(1).min(area.height);
        if list_height == 0 || area.width == 0 {
            return;
        }
        let base = look.style();
        let mut row: Vec<Span> = Vec::new();
        let mut rule: Vec<Span> = Vec::new();
        let rule_style = Style::default().fg(tone(Hue::Gray, Shade::S200));
        let mut x = 0;
        for (i, (offset, w)) in self.layout(area.width).into_iter().enumerate() {
            if offset >= area.width {
                break;
            }
            let w = w.min(area.width - offset);
            if offset > x {
                row.push(Span::styled(" ".repeat((offset - x) as usize), base));
                rule.push(Span::styled("─".repeat((offset - x) as usize), rule_style));
            }
            let active = self.active == Some(i);
            row.extend(self.tab_spans(&self.tabs[i], active, w));
            let mark = if active {
                Span::styled("━".repeat(w as usize), Style::default().fg(tone(Hue::Gray, Shade::S700)))
            } else {
                Span::styled("─".repeat(w as usize), rule_style)
            };
            rule.push(mark);
            x = offset + w;
        }
        if x < area.width {
            row.push(Span::styled(" ".repeat((area.width - x) as usize), base));
            rule.push(Span::styled("─".repeat((area.width - x) as usize), rule_style));
        }
        let mut lines = vec![Line::from(row)];
        if self.variant.underlined() && list_height > 1 {
            lines.push(Line::from(rule));
        }
        let list = Rect {
            height: list_height,
            ..area
        };
        frame.render_widget(Paragraph::new(lines), list);

        let content = self.active.and_then(|i| self.tabs[i].content.as_deref());
        if let Some(content) = content {
            let body = Rect {
                y: list.bottom() + 1,
                height: area.height.saturating_sub(list_height + 1),
                ..area
            };
            if body.height > 0 {
                frame.render_widget(
                    Paragraph::new(content.to_string())
                        .style(Style::default().fg(tone(Hue::Gray, Shade::S800)))
                        .wrap(Wrap { trim: true }),
                    body,
                );
            }
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Tabs {
    fn access_node(&self) -> AccessNode {
        let list = AccessNode::new(Role::TabList).children(self.tabs.iter().enumerate().map(|(i, tab)| {
            AccessNode::new(Role::Tab)
                .label(&tab.label)
                .selected(self.active == Some(i))
                .disabled(tab.disabled)
        }));
        match self.active.and_then(|i| self.tabs[i].content.as_ref().map(|c| (i, c))) {
            Some((i, content)) => list.child(
                AccessNode::new(Role::TabPanel)
                    .label(&self.tabs[i].label)
                    .child(AccessNode::new(Role::Presentation).label(content)),
            ),
            None => list,
        }
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

    fn sample() -> Tabs {
        Tabs::new(vec![
            TabItem::new("all", "All").content("Everything"),
            TabItem::new("open", "Open").badge("3"),
            TabItem::new("archived", "Archived").disabled(true),
            TabItem::new("closed", "Closed"),
        ])
    }

    fn focused(mut tabs: Tabs) -> Tabs {
        tabs.focus();
        tabs
    }

    #[test]
    fn first_tab_is_default() {
        assert_eq!(sample().value(), Some("all"));
        assert_eq!(sample().with_default_value("closed").value(), Some("closed"));
        assert_eq!(Tabs::new(vec![]).value(), None);
    }

    #[test]
    fn arrows_skip_disabled_and_wrap() {
        let mut tabs = focused(sample().with_default_value("open"));
        let cmd = tabs.update(Message::KeyPress(key(KeyCode::Right)));
        assert!(matches!(cmd.into_message(), Some(Message::ValueChanged(v)) if v == "closed"));
        tabs.update(Message::KeyPress(key(KeyCode::Right)));
        assert_eq!(tabs.value(), Some("all"));
        tabs.update(Message::KeyPress(key(KeyCode::Left)));
        assert_eq!(tabs.value(), Some("closed"));
    }

    #[test]
    fn digits_select_and_disabled_is_inert() {
        let mut tabs = focused(sample());
        assert!(tabs.update(Message::KeyPress(key(KeyCode::Char('3')))).is_none());
        assert_eq!(tabs.value(), Some("all"));
        tabs.update(Message::KeyPress(key(KeyCode::Char('2'))));
        assert_eq!(tabs.value(), Some("open"));
        assert!(tabs.update(Message::KeyPress(key(KeyCode::Char('9')))).is_none());
    }

    #[test]
    fn reselecting_active_tab_emits_nothing() {
        let mut h = ComponentHarness::new(sample());
        assert!(h.send(Message::Select("all".into())).is_empty());
        let out = h.send(Message::Select("open".into()));
        assert!(matches!(out.as_slice(), [Message::ValueChanged(v)] if v == "open"));
    }

    #[test]
    fn controlled_tabs_wait_for_set_value() {
        let mut h = ComponentHarness::new(sample().with_controlled(true));
        let out = h.send(Message::Select("closed".into()));
        assert!(matches!(out.as_slice(), [Message::ValueChanged(v)] if v == "closed"));
        assert_eq!(h.component().value(), Some("all"));
        h.component_mut().set_value("closed");
        assert_eq!(h.component().value(), Some("closed"));
    }

    #[test]
    fn keys_need_focus() {
        let mut tabs = sample();
        assert!(tabs.update(Message::KeyPress(key(KeyCode::Right))).is_none());
    }

    #[test]
    fn full_width_splits_evenly() {
        let tabs = sample().with_variant(TabsVariant::Bar).with_full_width(true);
        let layout = tabs.layout(40);
        assert_eq!(layout, vec![(0, 10), (10, 10), (20, 10), (30, 10)]);
    }

    #[test]
    fn layout_uses_variant_padding_and_gap() {
        let tabs = Tabs::new(vec![TabItem::new("a", "One"), TabItem::new("b", "Two")]);
        assert_eq!(tabs.layout(40), vec![(0, 5), (9, 5)]);
        let pill = Tabs::new(vec![TabItem::new("a", "One"), TabItem::new("b", "Two")])
            .with_variant(TabsVariant::Pill);
        assert_eq!(pill.layout(40), vec![(0, 7), (8, 7)]);
    }

    #[test]
    fn renders_labels_underline_and_content() {
        let out = ComponentHarness::new(sample()).render_string(48, 4);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("All"));
        assert!(lines[0].contains("Open  3"));
        assert!(lines[1].starts_with("━━━━━"));
        assert!(lines[3].contains("Everything"));
    }

    #[test]
    fn accessibility_tree() {
        let node = sample().access_node();
        assert_eq!(node.role, Role::TabList);
        let tabs = node.find_all(Role::Tab);
        assert_eq!(tabs.len(), 4);
        assert_eq!(tabs[0].selected, Some(true));
        assert!(tabs[2].disabled);
        assert!(node.find(Role::TabPanel).is_some());
    }
}
