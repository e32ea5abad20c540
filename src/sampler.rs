use input::{Button, Scancode};

/// immutable per-frame snapshot of everything the update policy needs. recomputed from
/// scratch every frame; never stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputSample {
    /// R/G/B key press or platform key-repeat; drives manual channel steps
    pub adjust_red: bool,
    pub adjust_green: bool,
    pub adjust_blue: bool,
    /// `0` key press or repeat; resets rgb unconditionally
    pub reset: bool,
    /// rising edge of Space (repeats are ignored so a held key flips at most once)
    pub toggle_animate: bool,
    /// rising edge of F12
    pub toggle_vsync: bool,
    /// rising edge of Escape
    pub close: bool,
    /// right mouse button currently held and the cursor position is known
    pub mouse_override: bool,
    /// cursor position in physical window pixels
    pub cursor: (f64, f64),
    /// physical window size
    pub window_size: (u32, u32),
}

#[derive(Debug, Default)]
pub struct InputSampler {
    state: input::State,
}

impl InputSampler {
    /// folds this frame's window events into the tracked device state and takes a snapshot.
    /// non-blocking: it only looks at what already arrived.
    pub fn sample(
        &mut self,
        events: impl Iterator<Item = window::Event>,
        window_size: (u32, u32),
    ) -> InputSample {
        self.state.handle_events(events.filter_map(|event| match event {
            window::Event::Pointer(ev) => Some(input::Event::Pointer(ev)),
            window::Event::Keyboard(ev) => Some(input::Event::Keyboard(ev)),
            window::Event::Window(_) => None,
        }));

        let keys = &self.state.keyboard.scancodes;
        let press_or_repeat = |scancode: Scancode| keys.just_pressed(scancode);
        let edge = |scancode: Scancode| keys.just_pressed(scancode) && !keys.repeated(scancode);

        // no cursor position arrives until the pointer first moves over the window; the
        // override must not kick in with a made-up corner position until then
        let cursor = self.state.pointer.position;

        InputSample {
            adjust_red: press_or_repeat(Scancode::R),
            adjust_green: press_or_repeat(Scancode::G),
            adjust_blue: press_or_repeat(Scancode::B),
            reset: press_or_repeat(Scancode::Num0),
            toggle_animate: edge(Scancode::Space),
            toggle_vsync: edge(Scancode::F12),
            close: edge(Scancode::Esc),
            mouse_override: cursor.is_some() && self.state.pointer.buttons.down(Button::Secondary),
            cursor: cursor.unwrap_or_default(),
            window_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use input::{ButtonState, KeyState, KeyboardEvent, PointerEvent};

    use super::*;

    const SIZE: (u32, u32) = (800, 600);

    fn key(scancode: Scancode, state: KeyState, repeat: bool) -> window::Event {
        window::Event::Keyboard(KeyboardEvent {
            state,
            scancode,
            repeat,
        })
    }

    #[test]
    fn test_toggle_flips_once_per_physical_press() {
        let mut sampler = InputSampler::default();

        let sample = sampler.sample(
            [key(Scancode::Space, KeyState::Pressed, false)].into_iter(),
            SIZE,
        );
        assert!(sample.toggle_animate);

        // held: the platform synthesizes repeat presses, none of which may re-trigger
        for _ in 0..5 {
            let sample = sampler.sample(
                [key(Scancode::Space, KeyState::Pressed, true)].into_iter(),
                SIZE,
            );
            assert!(!sample.toggle_animate);
        }

        // frames with no keyboard events at all
        let sample = sampler.sample([].into_iter(), SIZE);
        assert!(!sample.toggle_animate);

        // release then press again: a new rising edge
        let sample = sampler.sample(
            [key(Scancode::Space, KeyState::Released, false)].into_iter(),
            SIZE,
        );
        assert!(!sample.toggle_animate);
        let sample = sampler.sample(
            [key(Scancode::Space, KeyState::Pressed, false)].into_iter(),
            SIZE,
        );
        assert!(sample.toggle_animate);
    }

    #[test]
    fn test_manual_adjust_follows_key_repeat() {
        let mut sampler = InputSampler::default();

        let sample = sampler.sample(
            [key(Scancode::G, KeyState::Pressed, false)].into_iter(),
            SIZE,
        );
        assert!(sample.adjust_green);

        // unlike toggles, channel steps do apply on platform repeats
        let sample = sampler.sample(
            [key(Scancode::G, KeyState::Pressed, true)].into_iter(),
            SIZE,
        );
        assert!(sample.adjust_green);

        // held without a repeat event this frame: no step
        let sample = sampler.sample([].into_iter(), SIZE);
        assert!(!sample.adjust_green);
    }

    #[test]
    fn test_mouse_override_is_level_triggered() {
        let mut sampler = InputSampler::default();

        let sample = sampler.sample(
            [
                window::Event::Pointer(PointerEvent::Move {
                    position: (400.0, 300.0),
                }),
                window::Event::Pointer(PointerEvent::Button {
                    state: ButtonState::Pressed,
                    button: Button::Secondary,
                }),
            ]
            .into_iter(),
            SIZE,
        );
        assert!(sample.mouse_override);
        assert_eq!(sample.cursor, (400.0, 300.0));

        // stays active while held, across frames without new events
        let sample = sampler.sample([].into_iter(), SIZE);
        assert!(sample.mouse_override);

        let sample = sampler.sample(
            [window::Event::Pointer(PointerEvent::Button {
                state: ButtonState::Released,
                button: Button::Secondary,
            })]
            .into_iter(),
            SIZE,
        );
        assert!(!sample.mouse_override);
    }

    #[test]
    fn test_mouse_override_waits_for_a_known_cursor_position() {
        let mut sampler = InputSampler::default();

        // button held before the cursor ever moved over the window
        let sample = sampler.sample(
            [window::Event::Pointer(PointerEvent::Button {
                state: ButtonState::Pressed,
                button: Button::Secondary,
            })]
            .into_iter(),
            SIZE,
        );
        assert!(!sample.mouse_override);

        // first move arrives while the button is still down: override engages
        let sample = sampler.sample(
            [window::Event::Pointer(PointerEvent::Move {
                position: (100.0, 200.0),
            })]
            .into_iter(),
            SIZE,
        );
        assert!(sample.mouse_override);
        assert_eq!(sample.cursor, (100.0, 200.0));
    }

    #[test]
    fn test_window_events_are_ignored() {
        let mut sampler = InputSampler::default();
        let sample = sampler.sample(
            [window::Event::Window(window::WindowEvent::CloseRequested)].into_iter(),
            SIZE,
        );
        assert!(!sample.close);
    }
}
