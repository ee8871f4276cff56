//! Push button with color variants and sizes.

use crate::palette::{tone, Hue, Shade, WHITE};
use crate::text;
use crate::variant::{resolve, Edge, Look, Variant};
use crossterm::event::{KeyCode, KeyEvent};
use dalgona_core::{AccessNode, Accessible, Command, Component, Role};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    SecondaryBlue,
    SecondaryGray,
    SecondaryRed,
    Neutral,
    Accent,
    Warning,
    Error,
    GhostBlue,
    GhostGray,
    GhostRed,
    Green,
}

impl ButtonVariant {
    pub const ALL: [ButtonVariant; 12] = [
        ButtonVariant::Primary,
        ButtonVariant::SecondaryBlue,
        ButtonVariant::SecondaryGray,
        ButtonVariant::SecondaryRed,
        ButtonVariant::Neutral,
        ButtonVariant::Accent,
        ButtonVariant::Warning,
        ButtonVariant::Error,
        ButtonVariant::GhostBlue,
        ButtonVariant::GhostGray,
        ButtonVariant::GhostRed,
        ButtonVariant::Green,
    ];
}

impl Variant for ButtonVariant {
    fn look(self) -> Look {
        let solid = |hue: Hue| Look::new().bg(tone(hue, Shade::S500)).fg(WHITE);
        let soft = |hue: Hue| {
            Look::new()
                .bg(tone(hue, Shade::S50))
                .fg(tone(hue, Shade::S600))
                .border(tone(hue, Shade::S200))
        };
        let ghost = |hue: Hue| Look::new().fg(tone(hue, Shade::S600));
        match self {
            ButtonVariant::Primary => solid(Hue::Blue),
            ButtonVariant::SecondaryBlue => soft(Hue::Blue),
            ButtonVariant::SecondaryGray => Look::new()
                .bg(WHITE)
                .fg(tone(Hue::Gray, Shade::S700))
                .border(tone(Hue::Gray, Shade::S300)),
            ButtonVariant::SecondaryRed => soft(Hue::Red),
            ButtonVariant::Neutral => Look::new().bg(tone(Hue::Gray, Shade::S800)).fg(WHITE),
            ButtonVariant::Accent => solid(Hue::Indigo),
            ButtonVariant::Warning => Look::new()
                .bg(tone(Hue::Yellow, Shade::S400))
                .fg(tone(Hue::Gray, Shade::S900)),
            ButtonVariant::Error => solid(Hue::Red),
            ButtonVariant::GhostBlue => ghost(Hue::Blue),
            ButtonVariant::GhostGray => ghost(Hue::Gray),
            ButtonVariant::GhostRed => ghost(Hue::Red),
            ButtonVariant::Green => solid(Hue::Green),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    Base,
    #[default]
    Md,
    Lg,
    /// Square, icon only.
    Icon,
}

impl ButtonSize {
    pub const ALL: [ButtonSize; 5] = [
        ButtonSize::Sm,
        ButtonSize::Base,
        ButtonSize::Md,
        ButtonSize::Lg,
        ButtonSize::Icon,
    ];
}

impl Variant for ButtonSize {
    fn look(self) -> Look {
        match self {
            ButtonSize::Sm => Look::new().height(1).pad_x(1),
            ButtonSize::Base => Look::new().height(1).pad_x(2),
            ButtonSize::Md => Look::new().height(3).pad_x(2).edge(Edge::Rounded),
            ButtonSize::Lg => Look::new()
                .height(3)
                .pad_x(3)
                .edge(Edge::Rounded)
                .add(Modifier::BOLD),
            ButtonSize::Icon => Look::new().height(1).width(3).pad_x(0),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pointer activation.
    Press,
    /// Emitted when an enabled button is activated.
    Pressed,
}

pub struct Button {
    label: String,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    focus: bool,
    look: Look,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            focus: false,
            look: Look::new(),
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Caller override, merged last.
    pub fn with_look(mut self, look: Look) -> Self {
        self.look = look;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn resolved_look(&self) -> Look {
        let mut look = resolve([self.variant.look(), self.size.look(), self.look]);
        if self.focus {
            look = look.add(Modifier::BOLD);
            if look.has_border() {
                look.border = Some(tone(Hue::Blue, Shade::S400));
            }
        }
        if self.disabled {
            look = look.dimmed();
        }
        look
    }

    /// Columns needed to show the whole label.
    pub fn preferred_width(&self) -> u16 {
        let look = self.resolved_look();
        look.width
            .unwrap_or(text::width(&self.label) as u16 + look.chrome_cols())
    }

    fn activate(&self) -> Command<Message> {
        if self.disabled {
            tracing::debug!(label = %self.label, "press ignored on disabled button");
            return Command::none();
        }
        Command::message(Message::Pressed)
    }
}

impl Component for Button {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
                _ => Command::none(),
            },
            Message::Press => self.activate(),
            Message::KeyPress(_) | Message::Pressed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let look = self.resolved_look();
        let mut area = look.fit(area);
        area.width = area.width.min(self.preferred_width());
        let inner = look.paint(frame, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let label = text::truncate(&self.label, inner.width as usize);
        frame.render_widget(
            Paragraph::new(label)
                .style(look.style())
                .alignment(Alignment::Center),
            inner,
        );
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl Accessible for Button {
    fn access_node(&self) -> AccessNode {
        AccessNode::new(Role::Button)
            .label(&self.label)
            .disabled(self.disabled)
    }
}
