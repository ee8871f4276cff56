//! Page header: breadcrumb, badge row, title or heading tabs, actions and
//! a line of bottom text, stacked top to bottom.
//!
//! Every slot except the title is optional. The breadcrumb, badges and
//! action buttons are ordinary components; their messages are routed
//! through [`Message`] and the interesting ones surface as
//! [`Message::Navigate`] and [`Message::ActionPressed`].

use crate::badge::Badge;
use crate::breadcrumb::{self, Breadcrumb};
use crate::button::{self, Button};
use crate::palette::{tone, Hue, Shade};
use crate::text;
use crate::variant::{Look, Variant};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const TAB_GAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingTabState {
    Active,
    #[default]
    Inactive,
    /// Plain text that never reacts.
    Static,
}

impl Variant for HeadingTabState {
    fn look(self) -> Look {
        match self {
            HeadingTabState::Active => Look::new()
                .fg(tone(Hue::Gray, Shade::S900))
                .add(Modifier::BOLD),
            HeadingTabState::Inactive => Look::new().fg(tone(Hue::Gray, Shade::S400)),
            HeadingTabState::Static => Look::new().fg(tone(Hue::Gray, Shade::S900)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingTab {
    pub label: String,
    pub state: HeadingTabState,
}

impl HeadingTab {
    pub fn new(label: impl Into<String>, state: HeadingTabState) -> Self {
        Self {
            label: label.into(),
            state,
        }
    }
}

enum Title {
    Plain(String),
    Tabs(Vec<HeadingTab>),
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    Breadcrumb(breadcrumb::Message),
    Action(usize, button::Message),
    /// Pointer activation of a heading tab.
    SelectTab(usize),
    /// Emitted for non-static heading tabs.
    TabSelected(usize),
    /// Re-emitted from the breadcrumb.
    Navigate(usize),
    ActionPressed(usize),
}

pub struct Heading {
    title: Title,
    breadcrumb: Option<Breadcrumb>,
    badges: Vec<Badge>,
    actions: Vec<Button>,
    bottom_text: Option<String>,
    focus: bool,
    look: Look,
}

impl Heading {
    pub fn titled(title: impl Into<String>) -> Self {
        Self::with_title(Title::Plain(title.into()))
    }

    pub fn tabbed(tabs: impl IntoIterator<Item = HeadingTab>) -> Self {
        Self::with_title(Title::Tabs(tabs.into_iter().collect()))
    }

    fn with_title(title: Title) -> Self {
        Self {
            title,
            breadcrumb: None,
            badges: Vec::new(),
            actions: Vec::new(),
            bottom_text: None,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_breadcrumb(mut self, breadcrumb: Breadcrumb) -> Self {
        self.breadcrumb = Some(breadcrumb);
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badges.push(badge);
        self
    }

    pub fn with_action(mut self, action: Button) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_bottom_text(mut self, text: impl Into<String>) -> Self {
        self.bottom_text = Some(text.into());
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn tabs(&self) -> &[HeadingTab] {
        match &self.title {
            Title::Tabs(tabs) => tabs,
            Title::Plain(_) => &[],
        }
    }

    pub fn active_tab(&self) -> Option<usize> {
        self.tabs()
            .iter()
            .position(|t| t.state == HeadingTabState::Active)
    }

    /// Marks `index` active and every other non-static tab inactive.
    pub fn set_active_tab(&mut self, index: usize) {
        let Title::Tabs(tabs) = &mut self.title else {
            tracing::warn!(index, "heading has no tabs");
            return;
        };
        if !matches!(tabs.get(index), Some(t) if t.state != HeadingTabState::Static) {
            tracing::warn!(index, "not a selectable heading tab");
            return;
        }
        for (i, tab) in tabs.iter_mut().enumerate() {
            if tab.state == HeadingTabState::Static {
                continue;
            }
            tab.state = if i == index {
                HeadingTabState::Active
            } else {
                HeadingTabState::Inactive
            };
        }
    }

    pub fn breadcrumb_mut(&mut self) -> Option<&mut Breadcrumb> {
        self.breadcrumb.as_mut()
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Rows needed to draw every slot that is present.
    pub fn height(&self) -> u16 {
        let mut rows = self.content_rows();
        if self.breadcrumb.is_some() {
            rows += 1;
        }
        if !self.badges.is_empty() {
            rows += 1;
        }
        if self.bottom_text.is_some() {
            rows += 1;
        }
        rows
    }

    fn content_rows(&self) -> u16 {
        self.actions
            .iter()
            .map(|a| a.resolved_look().height.unwrap_or(1))
            .max()
            .unwrap_or(1)
    }

    fn select_tab(&self, index: usize) -> Command<Message> {
        match self.tabs().get(index) {
            Some(tab) if tab.state != HeadingTabState::Static => {
                Command::message(Message::TabSelected(index))
            }
            Some(_) => {
                tracing::debug!(index, "static heading tab ignores selection");
                Command::none()
            }
            None => {
                tracing::warn!(index, "heading tab out of range");
                Command::none()
            }
        }
    }

    /// Next selectable tab after the active one, wrapping.
    fn seek_tab(&self, forward: bool) -> Option<usize> {
        let tabs = self.tabs();
        let n = tabs.len();
        if n == 0 {
            return None;
        }
        let start = self.active_tab().unwrap_or(if forward { n - 1 } else { 0 });
        (1..=n)
            .map(|step| {
                if forward {
                    (start + step) % n
                } else {
                    (start + n - step % n) % n
                }
            })
            .find(|&i| tabs[i].state != HeadingTabState::Static)
    }

    fn route_breadcrumb(&mut self, msg: breadcrumb::Message) -> Command<Message> {
        let Some(crumbs) = self.breadcrumb.as_mut() else {
            return Command::none();
        };
        let out = crumbs.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            breadcrumb::Message::Navigate(index) => Command::message(Message::Navigate(index)),
            _ => Command::none(),
        }))
    }

    fn route_action(&mut self, index: usize, msg: button::Message) -> Command<Message> {
        let Some(action) = self.actions.get_mut(index) else {
            tracing::warn!(index, "heading action out of range");
            return Command::none();
        };
        let out = action.update(msg).messages();
        Command::batch(out.into_iter().map(|m| match m {
            button::Message::Pressed => Command::message(Message::ActionPressed(index)),
            _ => Command::none(),
        }))
    }

    fn title_line(&self) -> Line<'static> {
        let base = self.look.style().add_modifier(Modifier::BOLD);
        match &self.title {
            Title::Plain(title) => Line::from(Span::styled(
                title.clone(),
                base.fg(tone(Hue::Gray, Shade::S900)),
            )),
            Title::Tabs(tabs) => {
                let mut spans = Vec::new();
                for (i, tab) in tabs.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::raw(" ".repeat(TAB_GAP)));
                    }
                    let mut style = tab.state.look().merge(self.look).style();
                    if self.focus && tab.state == HeadingTabState::Active {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    spans.push(Span::styled(tab.label.clone(), style));
                }
                Line::from(spans)
            }
        }
    }
}

impl Component for Heading {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Left | KeyCode::Char('h') => match self.seek_tab(false) {
                    Some(i) => self.select_tab(i),
                    None => Command::none(),
                },
                KeyCode::Right | KeyCode::Char('l') => match self.seek_tab(true) {
                    Some(i) => self.select_tab(i),
                    None => Command::none(),
                },
                _ => Command::none(),
            },
            Message::Breadcrumb(msg) => self.route_breadcrumb(msg),
            Message::Action(index, msg) => self.route_action(index, msg),
            Message::SelectTab(index) => self.select_tab(index),
            Message::KeyPress(_)
            | Message::TabSelected(_)
            | Message::Navigate(_)
            | Message::ActionPressed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let inner = self.look.paint(frame, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let bottom = inner.y + inner.height;
        let mut y = inner.y;
        let row = |y: u16, height: u16| Rect {
            y,
            height: height.min(bottom.saturating_sub(y)),
            ..inner
        };

        if let Some(crumbs) = &self.breadcrumb {
            crumbs.view(frame, row(y, 1));
            y += 1;
        }

        if !self.badges.is_empty() && y < bottom {
            let mut x = inner.x;
            for badge in &self.badges {
                let w = badge.width().min((inner.x + inner.width).saturating_sub(x));
                if w == 0 {
                    break;
                }
                badge.view(frame, Rect { x, width: w, ..row(y, 1) });
                x += w + 1;
            }
            y += 1;
        }

        if y < bottom {
            let content = row(y, self.content_rows());
            let widths: Vec<u16> = self.actions.iter().map(Button::preferred_width).collect();
            let actions_width =
                widths.iter().sum::<u16>() + widths.len().saturating_sub(1) as u16;
            let mut x = (content.x + content.width).saturating_sub(actions_width).max(content.x);
            for (action, w) in self.actions.iter().zip(widths) {
                action.view(frame, Rect { x, width: w.min(content.width), ..content });
                x += w + 1;
            }
            let title_width = content.width.saturating_sub(actions_width + 1);
            let title_row = Rect {
                y: content.y + (content.height.saturating_sub(1)) / 2,
                width: title_width,
                height: content.height.min(1),
                ..content
            };
            frame.render_widget(Paragraph::new(self.title_line()), title_row);
            y += content.height;
        }

        if let Some(bottom_text) = &self.bottom_text {
            if y < bottom {
                let shown = text::truncate(bottom_text, inner.width as usize);
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        shown,
                        Style::default().fg(tone(Hue::Gray, Shade::S500)),
                    )),
                    row(y, 1),
                );
            }
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Heading {
    fn access_node(&self) -> AccessNode {
        let mut node = AccessNode::new(Role::Group);
        if let Some(crumbs) = &self.breadcrumb {
            node = node.child(crumbs.access_node());
        }
        node = node.children(self.badges.iter().map(Badge::access_node));
        node = match &self.title {
            Title::Plain(title) => {
                node.child(AccessNode::new(Role::Heading).label(title))
            }
            Title::Tabs(tabs) => node.child(AccessNode::new(Role::TabList).children(
                tabs.iter().map(|tab| match tab.state {
                    HeadingTabState::Static => AccessNode::new(Role::Heading).label(&tab.label),
                    state => AccessNode::new(Role::Tab)
                        .label(&tab.label)
                        .selected(state == HeadingTabState::Active),
                }),
            )),
        };
        node = node.children(self.actions.iter().map(Button::access_node));
        if let Some(bottom_text) = &self.bottom_text {
            node = node.child(AccessNode::new(Role::Presentation).label(bottom_text));
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breadcrumb::Crumb;
    use crate::button::ButtonSize;
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

    fn tabbed() -> Heading {
        Heading::tabbed([
            HeadingTab::new("Orders", HeadingTabState::Active),
            HeadingTab::new("Returns", HeadingTabState::Inactive),
            HeadingTab::new("|", HeadingTabState::Static),
            HeadingTab::new("Archive", HeadingTabState::Inactive),
        ])
    }

    #[test]
    fn static_tabs_do_not_select() {
        let mut h = ComponentHarness::new(tabbed());
        assert!(matches!(h.send(Message::SelectTab(1)).as_slice(), [Message::TabSelected(1)]));
        assert!(h.send(Message::SelectTab(2)).is_empty());
        assert!(h.send(Message::SelectTab(7)).is_empty());
    }

    #[test]
    fn set_active_tab_keeps_static_tabs() {
        let mut heading = tabbed();
        heading.set_active_tab(3);
        assert_eq!(heading.active_tab(), Some(3));
        assert_eq!(heading.tabs()[0].state, HeadingTabState::Inactive);
        assert_eq!(heading.tabs()[2].state, HeadingTabState::Static);
        heading.set_active_tab(2);
        assert_eq!(heading.active_tab(), Some(3));
    }

    #[test]
    fn arrows_skip_static_tabs() {
        let mut heading = tabbed();
        heading.focus();
        heading.set_active_tab(1);
        let cmd = heading.update(Message::KeyPress(key(KeyCode::Right)));
        assert!(matches!(cmd.into_message(), Some(Message::TabSelected(3))));
        let cmd = heading.update(Message::KeyPress(key(KeyCode::Left)));
        assert!(matches!(cmd.into_message(), Some(Message::TabSelected(0))));
    }

    #[test]
    fn breadcrumb_and_action_messages_surface() {
        let heading = Heading::titled("Settings")
            .with_breadcrumb(Breadcrumb::new([Crumb::link("Home"), Crumb::page("Settings")]))
            .with_action(Button::new("Save").with_size(ButtonSize::Sm));
        let mut h = ComponentHarness::new(heading);
        let out = h.send(Message::Breadcrumb(breadcrumb::Message::Activate(0)));
        assert!(matches!(out.as_slice(), [Message::Navigate(0)]));
        let out = h.send(Message::Action(0, button::Message::Press));
        assert!(matches!(out.as_slice(), [Message::ActionPressed(0)]));
        assert!(h.send(Message::Action(4, button::Message::Press)).is_empty());
    }

    #[test]
    fn renders_every_slot() {
        let heading = Heading::titled("Members")
            .with_breadcrumb(Breadcrumb::new([Crumb::link("Team"), Crumb::page("Members")]))
            .with_badge(Badge::new("Beta"))
            .with_action(Button::new("Invite").with_size(ButtonSize::Sm))
            .with_bottom_text("12 people");
        assert_eq!(heading.height(), 4);
        let out = ComponentHarness::new(heading).render_string(40, 4);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("Team › Members"));
        assert!(lines[1].contains("Beta"));
        assert!(lines[2].starts_with("Members"));
        assert!(lines[2].trim_end().ends_with("Invite"));
        assert!(lines[3].contains("12 people"));
    }

    #[test]
    fn access_tree_lists_tabs() {
        let node = tabbed().access_node();
        let list = node.find(Role::TabList).unwrap();
        assert_eq!(list.find_all(Role::Tab).len(), 3);
        assert_eq!(node.find_labeled("Orders").unwrap().selected, Some(true));
        assert_eq!(node.find_labeled("|").unwrap().role, Role::Heading);

        let node = Heading::titled("Members").access_node();
        assert_eq!(node.find(Role::Heading).unwrap().label.as_deref(), Some("Members"));
    }
}
