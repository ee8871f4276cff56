//! Horizontal progress indicator for multi-step flows.
//!
//! `current_step` is 1-based. Steps before it are complete, the step at it
//! is current, and the rest are incomplete. A value past the last step marks
//! every step complete.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::variant::{Look, Variant};
use dalgona_core::{AccessNode, Accessible, Command, Component, Current, Role};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepStatus {
    #[default]
    Incomplete,
    Current,
    Complete,
}

impl StepStatus {
    /// Status of the step at 0-based `index`.
    pub fn of(index: usize, current_step: usize) -> StepStatus {
        let step = index + 1;
        if step < current_step {
            StepStatus::Complete
        } else if step == current_step {
            StepStatus::Current
        } else {
            StepStatus::Incomplete
        }
    }

    /// The connector after step `index` fills once that step is complete.
    pub fn connector(index: usize, current_step: usize) -> StepStatus {
        if index + 1 < current_step {
            StepStatus::Complete
        } else {
            StepStatus::Incomplete
        }
    }

    fn label_color(self) -> ratatui::style::Color {
        match self {
            StepStatus::Incomplete => tone(Hue::Gray, Shade::S400),
            StepStatus::Current => tone(Hue::Blue, Shade::S500),
            StepStatus::Complete => tone(Hue::Blue, Shade::S400),
        }
    }
}

/// Look of the numbered circle.
impl Variant for StepStatus {
    fn look(self) -> Look {
        let look = Look::new().add(Modifier::BOLD);
        match self {
            StepStatus::Incomplete => look
                .bg(tone(Hue::Gray, Shade::S200))
                .fg(tone(Hue::Gray, Shade::S400)),
            StepStatus::Current => look.bg(tone(Hue::Blue, Shade::S500)).fg(WHITE),
            StepStatus::Complete => look.bg(tone(Hue::Blue, Shade::S400)).fg(WHITE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepsSize {
    Sm,
    #[default]
    Md,
}

impl Variant for StepsSize {
    fn look(self) -> Look {
        match self {
            StepsSize::Sm => Look::new().height(1).pad_x(0).width(3),
            StepsSize::Md => Look::new().height(1).pad_x(1).width(6),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Host request to move the indicator.
    Goto(usize),
    Next,
    Prev,
    /// Emitted with the new 1-based step.
    StepChanged(usize),
}

pub struct Steps {
    labels: Vec<String>,
    current: usize,
    size: StepsSize,
    show_numbers: bool,
    show_icon: bool,
    look: Look,
}

impl Steps {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            current: 1,
            size: StepsSize::default(),
            show_numbers: true,
            show_icon: true,
            look: Look::new(),
        }
    }

    pub fn with_current_step(mut self, step: usize) -> Self {
        self.set_current_step(step);
        self
    }

    pub fn with_size(mut self, size: StepsSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_show_numbers(mut self, show: bool) -> Self {
        self.show_numbers = show;
        self
    }

    /// Draw a check mark in complete steps instead of the number.
    pub fn with_show_icon(mut self, show: bool) -> Self {
        self.show_icon = show;
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    /// Clamped to `0..=len + 1`.
    pub fn set_current_step(&mut self, step: usize) {
        self.current = step.min(self.labels.len() + 1);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn status(&self, index: usize) -> StepStatus {
        StepStatus::of(index, self.current)
    }

    fn goto(&mut self, step: usize) -> Command<Message> {
        let before = self.current;
        self.set_current_step(step);
        if self.current == before {
            return Command::none();
        }
        tracing::debug!(from = before, to = self.current, "step changed");
        Command::message(Message::StepChanged(self.current))
    }

    fn circle_text(&self, index: usize, status: StepStatus) -> String {
        if status == StepStatus::Complete && self.show_icon {
            "✓".to_string()
        } else if self.show_numbers {
            (index + 1).to_string()
        } else {
            " ".to_string()
        }
    }
}

impl Component for Steps {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Goto(step) => self.goto(step),
            Message::Next => self.goto(self.current + 1),
            Message::Prev => self.goto(self.current.saturating_sub(1)),
            Message::StepChanged(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let size = self.size.look().merge(self.look);
        let pad = " ".repeat(size.pad_x.unwrap_or(0) as usize);
        let connector_width = size.width.unwrap_or(3) as usize;
        let bold = if self.size == StepsSize::Md {
            Modifier::BOLD
        } else {
            Modifier::empty()
        };

        let mut spans = Vec::new();
        for (index, label) in self.labels.iter().enumerate() {
            let status = self.status(index);
            let circle = status.look().merge(self.look).style();
            spans.push(Span::styled(
                format!("{pad}{}{pad}", self.circle_text(index, status)),
                circle,
            ));
            if !label.is_empty() {
                spans.push(Span::styled(
                    format!(" {label}"),
                    Style::default().fg(status.label_color()).add_modifier(bold),
                ));
            }
            if index + 1 < self.labels.len() {
                let color = StepStatus::connector(index, self.current).look().bg;
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    "─".repeat(connector_width),
                    Style::default().fg(color.unwrap_or(ratatui::style::Color::Reset)),
                ));
                spans.push(Span::raw(" "));
            }
        }
        let row = Rect { height: 1, ..area };
        frame.render_widget(Paragraph::new(Line::from(spans)), row);
    }
}

impl Accessible for Steps {
    fn access_node(&self) -> AccessNode {
        AccessNode::new(Role::List)
            .label("steps")
            .children(self.labels.iter().enumerate().map(|(index, label)| {
                let status = self.status(index);
                AccessNode::new(Role::ListItem)
                    .label(label)
                    .checked(status == StepStatus::Complete)
                    .current((status == StepStatus::Current).then_some(Current::Step))
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dalgona_core::testing::ComponentHarness;

    fn four() -> Steps {
        Steps::new(["Account", "Profile", "Review", "Done"])
    }

    #[test]
    fn statuses_around_current() {
        let steps = four().with_current_step(3);
        let statuses: Vec<_> = (0..4).map(|i| steps.status(i)).collect();
        assert_eq!(
            statuses,
            [
                StepStatus::Complete,
                StepStatus::Complete,
                StepStatus::Current,
                StepStatus::Incomplete
            ]
        );
    }

    #[test]
    fn connector_fills_after_complete_step() {
        assert_eq!(StepStatus::connector(0, 3), StepStatus::Complete);
        assert_eq!(StepStatus::connector(1, 3), StepStatus::Complete);
        assert_eq!(StepStatus::connector(2, 3), StepStatus::Incomplete);
        assert_eq!(StepStatus::connector(0, 1), StepStatus::Incomplete);
    }

    #[test]
    fn past_the_end_completes_everything() {
        let steps = four().with_current_step(99);
        assert_eq!(steps.current_step(), 5);
        assert!((0..4).all(|i| steps.status(i) == StepStatus::Complete));
    }

    #[test]
    fn current_step_is_marked() {
        let node = four().with_current_step(2).access_node();
        assert_eq!(node.role, Role::List);
        assert_eq!(node.find_labeled("Profile").unwrap().current, Some(Current::Step));
        assert_eq!(node.find_labeled("Account").unwrap().current, None);
        assert_eq!(node.find_all(Role::ListItem).len(), 4);
    }

    #[test]
    fn check_icon_replaces_number_when_complete() {
        let out = ComponentHarness::new(four().with_current_step(2)).render_string(80, 1);
        assert!(out.contains(" ✓  Account"));
        assert!(out.contains(" 2  Profile"));
        assert!(out.contains(" 3  Review"));

        let plain = four().with_current_step(2).with_show_icon(false);
        let out = ComponentHarness::new(plain).render_string(80, 1);
        assert!(out.contains(" 1  Account"));
    }

    #[test]
    fn numbers_can_be_hidden() {
        let steps = four().with_show_numbers(false).with_size(StepsSize::Sm);
        let out = ComponentHarness::new(steps).render_string(80, 1);
        assert!(!out.contains('1'));
        assert!(out.contains("Account"));
    }

    #[test]
    fn navigation_emits_changes() {
        let mut h = ComponentHarness::new(four());
        assert!(matches!(h.send(Message::Next).as_slice(), [Message::StepChanged(2)]));
        assert!(matches!(h.send(Message::Goto(4)).as_slice(), [Message::StepChanged(4)]));
        assert!(h.send(Message::Goto(4)).is_empty());
        assert!(matches!(h.send(Message::Prev).as_slice(), [Message::StepChanged(3)]));
    }

    #[test]
    fn circle_colors_follow_status() {
        assert_eq!(StepStatus::Current.look().bg, Some(tone(Hue::Blue, Shade::S500)));
        assert_eq!(StepStatus::Complete.look().bg, Some(tone(Hue::Blue, Shade::S400)));
        assert_eq!(StepStatus::Incomplete.look().bg, Some(tone(Hue::Gray, Shade::S200)));
    }
}
