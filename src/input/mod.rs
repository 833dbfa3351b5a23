use egui::{Context, PointerButton, Pos2};

use crate::gizmo::HandleId;

mod coordinates;
pub use coordinates::CoordinateMapper;

/// What the pointer was over when the event started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTarget {
    /// Bare canvas (or anything that is not a handle)
    #[default]
    Canvas,
    /// One of the on-canvas handles
    Handle(HandleId),
}

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy)]
pub struct InputLocation {
    /// The position in client (screen) coordinates
    pub position: Pos2,
    /// The element the event originated on
    pub target: EventTarget,
}

impl InputLocation {
    pub fn on_canvas(position: Pos2) -> Self {
        Self {
            position,
            target: EventTarget::Canvas,
        }
    }

    pub fn on_handle(position: Pos2, handle: HandleId) -> Self {
        Self {
            position,
            target: EventTarget::Handle(handle),
        }
    }
}

/// Pointer events the editor understands
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Mouse button was pressed
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse button was released
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Mouse left the application window
    PointerLeave {
        last_known_location: InputLocation,
    },
}

impl InputEvent {
    pub fn location(&self) -> InputLocation {
        match self {
            Self::PointerDown { location, .. }
            | Self::PointerUp { location, .. }
            | Self::PointerMove { location, .. } => *location,
            Self::PointerLeave { last_known_location } => *last_known_location,
        }
    }

    /// True for a move made while at least one button is held
    pub fn is_drag(&self) -> bool {
        matches!(self, Self::PointerMove { held_buttons, .. } if !held_buttons.is_empty())
    }
}

const TRACKED_BUTTONS: [PointerButton; 2] = [PointerButton::Primary, PointerButton::Secondary];

/// Turns egui's per-frame pointer state into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects this frame's events. `hit_test` resolves which handle, if
    /// any, lies under a client position; it is consulted for presses.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        hit_test: impl Fn(Pos2) -> EventTarget,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hovering = input.pointer.hover_pos().is_some();
            if !hovering
                && self.last_pointer_pos.is_none()
                && !input.pointer.any_down()
                && !input.pointer.any_released()
            {
                return;
            }
            let pos = input.pointer.interact_pos().or(self.last_pointer_pos);
            let Some(pos) = pos else {
                return;
            };

            // Presses first so a drag in the same frame belongs to the new gesture
            let mut pressed = false;
            for button in TRACKED_BUTTONS {
                if input.pointer.button_pressed(button) {
                    pressed = true;
                    events.push(InputEvent::PointerDown {
                        location: InputLocation {
                            position: pos,
                            target: hit_test(pos),
                        },
                        button,
                    });
                }
            }

            if !pressed && Some(pos) != self.last_pointer_pos {
                let held_buttons = TRACKED_BUTTONS
                    .into_iter()
                    .filter(|button| input.pointer.button_down(*button))
                    .collect();
                events.push(InputEvent::PointerMove {
                    location: InputLocation::on_canvas(pos),
                    held_buttons,
                });
            }

            for button in TRACKED_BUTTONS {
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp {
                        location: InputLocation::on_canvas(pos),
                        button,
                    });
                }
            }

            if !hovering && !input.pointer.any_down() {
                if self.last_pointer_pos.is_some() {
                    events.push(InputEvent::PointerLeave {
                        last_known_location: InputLocation::on_canvas(pos),
                    });
                }
                self.last_pointer_pos = None;
            } else {
                self.last_pointer_pos = Some(pos);
            }
        });

        events
    }
}
