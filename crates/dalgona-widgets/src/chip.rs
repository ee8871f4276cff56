//! Compact bordered token, optionally dashed, that can be pressed.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::text;
use crate::variant::{resolve, Edge, Look, Variant};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipSize {
    #[default]
    Sm,
    Md,
}

impl Variant for ChipSize {
    fn look(self) -> Look {
        match self {
            ChipSize::Sm => Look::new().height(3).pad_x(1),
            ChipSize::Md => Look::new().height(3).pad_x(2).add(Modifier::BOLD),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipTheme {
    #[default]
    Default,
    Orange,
    Indigo,
    Blue,
    Green,
}

impl Variant for ChipTheme {
    fn look(self) -> Look {
        let tinted = |hue: Hue| {
            Look::new()
                .bg(tone(hue, Shade::S50))
                .fg(tone(hue, Shade::S700))
                .border(tone(hue, Shade::S200))
        };
        match self {
            ChipTheme::Default => Look::new()
                .bg(WHITE)
                .fg(tone(Hue::Gray, Shade::S700))
                .border(tone(Hue::Gray, Shade::S300)),
            ChipTheme::Orange => tinted(Hue::Orange),
            ChipTheme::Indigo => tinted(Hue::Indigo),
            ChipTheme::Blue => tinted(Hue::Blue),
            ChipTheme::Green => tinted(Hue::Green),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Press,
    /// Emitted when an enabled chip is pressed.
    Pressed,
}

pub struct Chip {
    label: String,
    size: ChipSize,
    theme: ChipTheme,
    dashed: bool,
    disabled: bool,
    look: Look,
}

impl Chip {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            size: ChipSize::default(),
            theme: ChipTheme::default(),
            dashed: false,
            disabled: false,
            look: Look::new(),
        }
    }

    pub fn with_size(mut self, size: ChipSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_theme(mut self, theme: ChipTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn resolved_look(&self) -> Look {
        let edge = if self.dashed { Edge::Dashed } else { Edge::Rounded };
        let look = resolve([
            self.theme.look(),
            self.size.look(),
            Look::new().edge(edge),
            self.look,
        ]);
        if self.disabled {
            look.dimmed()
        } else {
            look
        }
    }

    pub fn width(&self) -> u16 {
        text::width(&self.label) as u16 + self.resolved_look().chrome_cols()
    }
}

impl Component for Chip {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Press if self.disabled => {
                tracing::debug!(label = %self.label, "press ignored on disabled chip");
                Command::none()
            }
            Message::Press => Command::message(Message::Pressed),
            Message::Pressed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.resolved_look();
        let mut area = look.fit(area);
        area.width = area.width.min(self.width());
        let inner = look.paint(frame, area);
        frame.render_widget(
            Paragraph::new(text::truncate(&self.label, inner.width as usize))
                .style(look.style())
                .alignment(Alignment::Center),
            inner,
        );
    }
}

impl Accessible for Chip {
    fn access_node(&self) -> AccessNode {
        AccessNode::new(Role::Button)
            .label(&self.label)
            .disabled(self.disabled)
    }
}
