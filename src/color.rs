/// the four shader channels. `a` stays at 1.0 for the whole run; update policies only ever
/// touch rgb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorState {
    pub const INITIAL: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    #[inline]
    pub fn as_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// both toggles flip only on a rising key edge, never on key-repeat.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToggleState {
    pub animate_color: bool,
    pub vsync_enabled: bool,
}

#[test]
fn test_initial_color() {
    let color = ColorState::INITIAL;
    assert_eq!(color.as_array(), [1.0, 0.0, 0.0, 1.0]);
}
