use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect, Vec2};

/// Where an input event happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas' top-left corner
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Domain-level input, already translated into canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        held_buttons: Vec<PointerButton>,
    },
    /// The pointer left the window, possibly mid-gesture
    PointerLeave {
        last_known_location: InputLocation,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

/// Converts raw egui input into [`InputEvent`]s relative to the canvas
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if the window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Translate a screen position into canvas coordinates
    pub fn make_location(&self, screen_pos: Pos2) -> InputLocation {
        InputLocation {
            position: screen_pos - self.canvas_origin(),
            is_in_canvas: self.canvas_rect.contains(screen_pos),
        }
    }

    fn canvas_origin(&self) -> Vec2 {
        self.canvas_rect.min.to_vec2()
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();

            match (hover, self.last_pointer_pos) {
                (Some(pos), last) if Some(pos) != last => {
                    let held_buttons = [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle]
                        .into_iter()
                        .filter(|button| input.pointer.button_down(*button))
                        .collect();
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        held_buttons,
                    });
                }
                (None, Some(last)) => {
                    events.push(InputEvent::PointerLeave {
                        last_known_location: self.make_location(last),
                    });
                }
                _ => {}
            }
            self.last_pointer_pos = hover;

            // Presses and releases use the interaction position, which egui keeps
            // even when the release happens outside the window
            let press_pos = input.pointer.interact_pos().or(hover);
            for button in [PointerButton::Primary, PointerButton::Secondary, PointerButton::Middle] {
                let Some(pos) = press_pos else {
                    break;
                };
                if input.pointer.button_pressed(button) {
                    events.push(InputEvent::PointerDown {
                        location: self.make_location(pos),
                        button,
                    });
                }
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp {
                        location: self.make_location(pos),
                        button,
                    });
                }
            }

            for event in &input.raw.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } = event
                {
                    events.push(InputEvent::KeyDown {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(Pos2::new(200.0, 40.0), Vec2::new(1080.0, 500.0)))
    }

    #[test]
    fn locations_are_canvas_local() {
        let location = handler().make_location(Pos2::new(250.0, 90.0));
        assert_eq!(location.position, Pos2::new(50.0, 50.0));
        assert!(location.is_in_canvas);
    }

    #[test]
    fn outside_positions_are_flagged() {
        let location = handler().make_location(Pos2::new(10.0, 10.0));
        assert_eq!(location.position, Pos2::new(-190.0, -30.0));
        assert!(!location.is_in_canvas);
    }

    #[test]
    fn press_and_move_become_events() {
        let ctx = Context::default();
        let mut input = handler();
        let pos = Pos2::new(300.0, 140.0);

        let raw = egui::RawInput {
            events: vec![
                egui::Event::PointerMoved(pos),
                egui::Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
            ],
            ..Default::default()
        };

        let mut events = Vec::new();
        let _ = ctx.run(raw, |ctx| events = input.process_input(ctx));

        assert!(events.iter().any(|event| matches!(
            event,
            InputEvent::PointerDown { location, button: PointerButton::Primary }
                if location.position == Pos2::new(100.0, 100.0)
        )));
        assert!(events.iter().all(InputEvent::is_in_canvas));
    }
}
