//! Small status label with an optional dot and remove button.

use crate::palette::{tone, Hue, Shade};
use crate::variant::{resolve, Look, Variant};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Basic,
    /// Pill-shaped with rounded caps.
    Rounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeSize {
    #[default]
    Sm,
    Lg,
}

impl BadgeSize {
    /// Padding shrinks by one column when a dot or remove button takes space.
    fn look(self, tight: bool) -> Look {
        let pad = match self {
            BadgeSize::Sm => 2,
            BadgeSize::Lg => 3,
        };
        let look = Look::new().height(1).pad_x(if tight { pad - 1 } else { pad });
        match self {
            BadgeSize::Sm => look,
            BadgeSize::Lg => look.add(Modifier::BOLD),
        }
    }
}

/// Badge color theme: one of the palette hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeTheme(pub Hue);

impl Default for BadgeTheme {
    fn default() -> Self {
        BadgeTheme(Hue::Gray)
    }
}

impl Variant for BadgeTheme {
    fn look(self) -> Look {
        Look::new()
            .bg(tone(self.0, Shade::S100))
            .fg(tone(self.0, Shade::S800))
    }
}

impl BadgeTheme {
    pub fn dot_color(self) -> ratatui::style::Color {
        tone(self.0, Shade::S400)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer activation of the remove button.
    Remove,
    /// Emitted when the remove button is activated.
    Removed,
}

pub struct Badge {
    label: String,
    variant: BadgeVariant,
    size: BadgeSize,
    theme: BadgeTheme,
    dot: bool,
    remove_button: bool,
    look: Look,
}

impl Badge {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: BadgeVariant::default(),
            size: BadgeSize::default(),
            theme: BadgeTheme::default(),
            dot: false,
            remove_button: false,
            look: Look::new(),
        }
    }

    pub fn with_variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: BadgeSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_theme(mut self, hue: Hue) -> Self {
        self.theme = BadgeTheme(hue);
        self
    }

    pub fn with_dot(mut self, dot: bool) -> Self {
        self.dot = dot;
        self
    }

    pub fn with_remove_button(mut self, remove_button: bool) -> Self {
        self.remove_button = remove_button;
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn resolved_look(&self) -> Look {
        let tight = self.dot || self.remove_button;
        resolve([self.theme.look(), self.size.look(tight), self.look])
    }

    /// Columns the badge occupies.
    pub fn width(&self) -> u16 {
        let look = self.resolved_look();
        let mut w = crate::text::width(&self.label) as u16 + look.chrome_cols();
        if self.dot {
            w += 2;
        }
        if self.remove_button {
            w += 2;
        }
        if self.variant == BadgeVariant::Rounded {
            w += 2;
        }
        w
    }
}

impl Component for Badge {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Remove if self.remove_button => Command::message(Message::Removed),
            Message::Remove => {
                tracing::debug!(label = %self.label, "badge has no remove button");
                Command::none()
            }
            Message::Removed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.resolved_look();
        let style = look.style();
        let pad = " ".repeat(look.pad_x.unwrap_or(0) as usize);

        let mut spans = Vec::new();
        let cap = Style::default().fg(look.bg.unwrap_or(ratatui::style::Color::Reset));
        if self.variant == BadgeVariant::Rounded {
            spans.push(Span::styled("◖", cap));
        }
        spans.push(Span::styled(pad.clone(), style));
        if self.dot {
            spans.push(Span::styled("● ", style.fg(self.theme.dot_color())));
        }
        spans.push(Span::styled(self.label.clone(), style));
        if self.remove_button {
            spans.push(Span::styled(" ×", style));
        }
        spans.push(Span::styled(pad, style));
        if self.variant == BadgeVariant::Rounded {
            spans.push(Span::styled("◗", cap));
        }

        let area = Rect {
            height: area.height.min(1),
            width: area.width.min(self.width()),
            ..area
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Accessible for Badge {
    fn access_node(&self) -> AccessNode {
        let node = AccessNode::new(Role::Status).label(&self.label);
        if self.remove_button {
            node.child(AccessNode::new(Role::Button).label(format!("Remove {}", self.label)))
        } else {
            node
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dalgona_core::testing::ComponentHarness;

    #[test]
    fn defaults_are_basic_sm_gray() {
        let b = Badge::new("New");
        assert_eq!(b.variant, BadgeVariant::Basic);
        assert_eq!(b.size, BadgeSize::Sm);
        assert_eq!(b.resolved_look().bg, Some(tone(Hue::Gray, Shade::S100)));
    }

    #[test]
    fn every_theme_uses_its_hue() {
        for hue in Hue::ALL {
            for size in [BadgeSize::Sm, BadgeSize::Lg] {
                let look = Badge::new("x").with_theme(hue).with_size(size).resolved_look();
                assert_eq!(look.bg, Some(tone(hue, Shade::S100)));
                assert_eq!(look.fg, Some(tone(hue, Shade::S800)));
                assert_eq!(look.height, Some(1));
            }
        }
    }

    #[test]
    fn padding_tightens_with_dot_or_remove() {
        let plain = Badge::new("x").with_size(BadgeSize::Lg).resolved_look();
        let dotted = Badge::new("x")
            .with_size(BadgeSize::Lg)
            .with_dot(true)
            .resolved_look();
        assert_eq!(plain.pad_x, Some(3));
        assert_eq!(dotted.pad_x, Some(2));
    }

    #[test]
    fn remove_only_with_button() {
        let mut h = ComponentHarness::new(Badge::new("Tag").with_remove_button(true));
        assert!(matches!(h.send(Message::Remove).as_slice(), [Message::Removed]));

        let mut plain = Badge::new("Tag");
        assert!(plain.update(Message::Remove).is_none());
    }

    #[test]
    fn renders_dot_label_and_remove() {
        let badge = Badge::new("Live").with_dot(true).with_remove_button(true);
        let out = ComponentHarness::new(badge).render_string(20, 1);
        assert!(out.contains("● Live ×"));
    }

    #[test]
    fn access_node_exposes_remove_button() {
        let node = Badge::new("Tag").with_remove_button(true).access_node();
        assert_eq!(node.role, Role::Status);
        assert!(node.find_labeled("Remove Tag").is_some());
    }
}
