use std::collections::HashMap;
use std::hash::Hash;

// pointer
// ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// equivalent to left mouse button
    Primary,
    /// equivalent to right mouse button
    Secondary,
    /// equivalent to middle mouse button
    Tertiary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub enum PointerEvent {
    Move {
        /// position in physical surface pixels
        position: (f64, f64),
    },
    Button {
        state: ButtonState,
        button: Button,
    },
}

// keyboard
// ----

/// physical key positions, restricted to the set the application reacts to. backends drop
/// everything else before it ever reaches here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scancode {
    Esc,
    Num0,
    R,
    G,
    B,
    Space,
    F12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    pub state: KeyState,
    pub scancode: Scancode,
    /// true if this press was synthesized by the platform's key-repeat
    pub repeat: bool,
}

// states
// ----

// NOTE: a button may have multiple states at the same time (down + just pressed, etc).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StateFlags(u8);

impl StateFlags {
    pub const JUST_PRESSED: u8 = 1 << 0;
    pub const JUST_RELEASED: u8 = 1 << 1;
    pub const DOWN: u8 = 1 << 2;
    pub const REPEAT: u8 = 1 << 3;
}

#[derive(Debug)]
pub struct StateTracker<B>
where
    B: Copy + Eq + Hash,
{
    map: HashMap<B, StateFlags>,
}

// @BlindDerive
impl<B> Default for StateTracker<B>
where
    B: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self {
            map: HashMap::default(),
        }
    }
}

impl<B> StateTracker<B>
where
    B: Copy + Eq + Hash,
{
    /// clears everything but DOWN. must run once per iteration, before new events are folded
    /// in, so that JUST_PRESSED/JUST_RELEASED/REPEAT describe this iteration only.
    pub fn clear_transient_flags(&mut self) {
        self.map.values_mut().for_each(|state| {
            state.0 &= !StateFlags::JUST_PRESSED;
            state.0 &= !StateFlags::JUST_RELEASED;
            state.0 &= !StateFlags::REPEAT;
        });
    }

    pub fn press(&mut self, button: B, repeat: bool) {
        let state = self.map.entry(button).or_insert(StateFlags(0));
        state.0 = StateFlags::JUST_PRESSED | StateFlags::DOWN;
        if repeat {
            state.0 |= StateFlags::REPEAT;
        }
    }

    pub fn release(&mut self, button: B) {
        let state = self.map.entry(button).or_insert(StateFlags(0));
        state.0 = StateFlags::JUST_RELEASED;
    }

    pub fn just_pressed(&self, button: B) -> bool {
        self.map
            .get(&button)
            .is_some_and(|state| state.0 & StateFlags::JUST_PRESSED != 0)
    }

    pub fn just_released(&self, button: B) -> bool {
        self.map
            .get(&button)
            .is_some_and(|state| state.0 & StateFlags::JUST_RELEASED != 0)
    }

    pub fn down(&self, button: B) -> bool {
        self.map
            .get(&button)
            .is_some_and(|state| state.0 & StateFlags::DOWN != 0)
    }

    pub fn repeated(&self, button: B) -> bool {
        self.map
            .get(&button)
            .is_some_and(|state| state.0 & StateFlags::REPEAT != 0)
    }
}

#[derive(Debug, Default)]
pub struct PointerState {
    pub position: Option<(f64, f64)>,
    pub buttons: StateTracker<Button>,
}

impl PointerState {
    #[inline]
    pub fn clear_transient_flags(&mut self) {
        self.buttons.clear_transient_flags();
    }

    #[inline]
    pub fn handle_event(&mut self, ev: PointerEvent) {
        match ev {
            PointerEvent::Move { position } => {
                self.position = Some(position);
            }
            PointerEvent::Button {
                state: ButtonState::Pressed,
                button,
            } => {
                self.buttons.press(button, false);
            }
            PointerEvent::Button {
                state: ButtonState::Released,
                button,
            } => {
                self.buttons.release(button);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct KeyboardState {
    pub scancodes: StateTracker<Scancode>,
}

impl KeyboardState {
    #[inline]
    pub fn clear_transient_flags(&mut self) {
        self.scancodes.clear_transient_flags();
    }

    #[inline]
    pub fn handle_event(&mut self, ev: KeyboardEvent) {
        match ev.state {
            KeyState::Pressed => self.scancodes.press(ev.scancode, ev.repeat),
            KeyState::Released => self.scancodes.release(ev.scancode),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Pointer(PointerEvent),
    Keyboard(KeyboardEvent),
}

#[derive(Debug, Default)]
pub struct State {
    pub pointer: PointerState,
    pub keyboard: KeyboardState,
}

impl State {
    pub fn handle_events(&mut self, events: impl Iterator<Item = Event>) {
        self.pointer.clear_transient_flags();
        self.keyboard.clear_transient_flags();

        for event in events {
            match event {
                Event::Pointer(ev) => self.pointer.handle_event(ev),
                Event::Keyboard(ev) => self.keyboard.handle_event(ev),
            }
        }
    }
}

#[test]
fn test_state_tracker_press_release() {
    let mut tracker = StateTracker::<Scancode>::default();

    tracker.press(Scancode::Space, false);
    assert!(tracker.just_pressed(Scancode::Space));
    assert!(tracker.down(Scancode::Space));
    assert!(!tracker.repeated(Scancode::Space));

    tracker.clear_transient_flags();
    assert!(!tracker.just_pressed(Scancode::Space));
    assert!(tracker.down(Scancode::Space));

    tracker.release(Scancode::Space);
    assert!(tracker.just_released(Scancode::Space));
    assert!(!tracker.down(Scancode::Space));
}

#[test]
fn test_state_tracker_repeat() {
    let mut tracker = StateTracker::<Scancode>::default();

    tracker.press(Scancode::R, false);
    tracker.clear_transient_flags();

    // platform key-repeat shows up as another press with the repeat flag
    tracker.press(Scancode::R, true);
    assert!(tracker.just_pressed(Scancode::R));
    assert!(tracker.repeated(Scancode::R));
    assert!(tracker.down(Scancode::R));
}

#[test]
fn test_pointer_state_buttons() {
    let mut pointer = PointerState::default();

    pointer.handle_event(PointerEvent::Move {
        position: (320.0, 240.0),
    });
    assert_eq!(pointer.position, Some((320.0, 240.0)));

    pointer.handle_event(PointerEvent::Button {
        state: ButtonState::Pressed,
        button: Button::Secondary,
    });
    assert!(pointer.buttons.down(Button::Secondary));
    assert!(!pointer.buttons.down(Button::Primary));

    pointer.handle_event(PointerEvent::Button {
        state: ButtonState::Released,
        button: Button::Secondary,
    });
    assert!(!pointer.buttons.down(Button::Secondary));
}

#[test]
fn test_state_handle_events_clears_transients() {
    let mut state = State::default();

    state.handle_events(
        [Event::Keyboard(KeyboardEvent {
            state: KeyState::Pressed,
            scancode: Scancode::G,
            repeat: false,
        })]
        .into_iter(),
    );
    assert!(state.keyboard.scancodes.just_pressed(Scancode::G));

    // no new events: the press edge must not survive into the next iteration
    state.handle_events([].into_iter());
    assert!(!state.keyboard.scancodes.just_pressed(Scancode::G));
    assert!(state.keyboard.scancodes.down(Scancode::G));
}
