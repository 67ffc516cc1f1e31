//! On-screen button layout and hit testing.

use crate::command::Command;
use crate::constants::buttons;
use crate::geometry::{Point, Rect};
use crate::model::Label;

/// A clickable button that triggers a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub caption: String,
    pub command: Command,
    /// Hit area in screen coordinates
    pub rect: Rect,
}

impl Button {
    fn at(command: Command, (x, y): (f64, f64)) -> Self {
        Self {
            caption: command.name(),
            command,
            rect: Rect::new(x, y, buttons::SIZE.0, buttons::SIZE.1),
        }
    }
}

/// Fixed button layout: Clear and Done&Next on top, then one Assign button
/// per label in rows below.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonLayout {
    buttons: Vec<Button>,
}

impl ButtonLayout {
    /// Lay out buttons for `label_count` labels.
    pub fn new(label_count: Label) -> Self {
        let mut layout = vec![
            Button::at(Command::Clear, buttons::CLEAR),
            Button::at(Command::Advance, buttons::ADVANCE),
        ];

        let (origin_x, mut y) = buttons::ASSIGN_ORIGIN;
        let mut x = origin_x;
        for label in 0..label_count {
            if x > buttons::ASSIGN_WRAP_X {
                x = origin_x;
                y += buttons::ASSIGN_STEP_Y;
            }
            layout.push(Button::at(Command::AssignLabel(label), (x, y)));
            x += buttons::ASSIGN_STEP_X;
        }

        Self { buttons: layout }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Command of the button under `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<Command> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(point))
            .map(|button| button.command)
    }
}
