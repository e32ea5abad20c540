use std::f32::consts::PI;

use crate::color::ColorState;
use crate::sampler::InputSample;

/// manual-mode increment per key press or repeat
const CHANNEL_STEP: f32 = 0.1;

#[inline]
fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// modular wrap into [0, 1): a channel at 0.95 steps to 0.05 instead of saturating.
#[inline]
fn step_channel(value: f32) -> f32 {
    let next = value + CHANNEL_STEP;
    if next >= 1.0 { next - 1.0 } else { next }
}

/// which of the three mutually exclusive update modes drives this frame. resolving this up
/// front (instead of three independent if-blocks) makes the precedence explicit: mouse wins
/// over animation wins over manual keys.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    MouseOverride,
    Animated,
    Manual,
}

fn resolve_mode(sample: &InputSample, animate_color: bool) -> Mode {
    if sample.mouse_override && sample.window_size.0 > 0 && sample.window_size.1 > 0 {
        Mode::MouseOverride
    } else if animate_color {
        Mode::Animated
    } else {
        Mode::Manual
    }
}

/// deterministically computes the next color from the previous one, this frame's input
/// snapshot and the time since run start. alpha passes through untouched.
pub fn next_color(
    prev: ColorState,
    sample: &InputSample,
    animate_color: bool,
    elapsed: f32,
) -> ColorState {
    match resolve_mode(sample, animate_color) {
        Mode::MouseOverride => {
            let (width, height) = sample.window_size;
            let r = clamp01((sample.cursor.0 / width as f64) as f32);
            let g = clamp01((sample.cursor.1 / height as f64) as f32);
            // r and g are already in [0, 1], so b lands in [0, 1] as well
            let b = 1.0 - (r + g) / 2.0;
            ColorState { r, g, b, a: prev.a }
        }
        Mode::Animated => {
            // 120 degree phase offsets between channels, period 2*pi seconds
            let t = elapsed;
            ColorState {
                r: (t.sin() + 1.0) / 2.0,
                g: ((t + 2.0 * PI / 3.0).sin() + 1.0) / 2.0,
                b: ((t + 4.0 * PI / 3.0).sin() + 1.0) / 2.0,
                a: prev.a,
            }
        }
        Mode::Manual => {
            let mut next = prev;
            if sample.adjust_red {
                next.r = step_channel(next.r);
            }
            if sample.adjust_green {
                next.g = step_channel(next.g);
            }
            if sample.adjust_blue {
                next.b = step_channel(next.b);
            }
            // reset wins over any channel step applied in the same frame
            if sample.reset {
                next.r = 1.0;
                next.g = 0.0;
                next.b = 0.0;
            }
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sized(sample: InputSample) -> InputSample {
        InputSample {
            window_size: (800, 600),
            ..sample
        }
    }

    #[test]
    fn test_animated_channels_stay_in_range() {
        let sample = sized(InputSample::default());
        for i in 0..1000 {
            let t = i as f32 * 0.037;
            let color = next_color(ColorState::INITIAL, &sample, true, t);
            for channel in [color.r, color.g, color.b] {
                assert!((0.0..=1.0).contains(&channel), "t={t} channel={channel}");
            }
            assert_eq!(color.a, 1.0);
        }
    }

    #[test]
    fn test_animated_at_t_zero() {
        let sample = sized(InputSample::default());
        let color = next_color(ColorState::INITIAL, &sample, true, 0.0);
        assert_close(color.r, 0.5);
        assert_close(color.g, 0.933_012_7);
        assert_close(color.b, 0.066_987_3);
    }

    #[test]
    fn test_manual_step_wraps_through_zero() {
        let prev = ColorState {
            r: 0.95,
            ..ColorState::INITIAL
        };
        let sample = sized(InputSample {
            adjust_red: true,
            ..InputSample::default()
        });
        let color = next_color(prev, &sample, false, 0.0);
        assert_close(color.r, 0.05);
    }

    #[test]
    fn test_manual_step_increments() {
        let sample = sized(InputSample {
            adjust_green: true,
            ..InputSample::default()
        });
        let color = next_color(ColorState::INITIAL, &sample, false, 0.0);
        assert_close(color.g, 0.1);
        assert_close(color.r, 1.0);
        assert_close(color.b, 0.0);
    }

    #[test]
    fn test_reset_overrides_prior_state_and_same_frame_steps() {
        let prev = ColorState {
            r: 0.3,
            g: 0.7,
            b: 0.2,
            a: 1.0,
        };
        let sample = sized(InputSample {
            adjust_red: true,
            adjust_blue: true,
            reset: true,
            ..InputSample::default()
        });
        let color = next_color(prev, &sample, false, 0.0);
        assert_eq!((color.r, color.g, color.b), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_mouse_override_formula() {
        let sample = sized(InputSample {
            mouse_override: true,
            cursor: (200.0, 450.0),
            ..InputSample::default()
        });
        let color = next_color(ColorState::INITIAL, &sample, false, 0.0);
        assert_close(color.r, 0.25);
        assert_close(color.g, 0.75);
        assert_close(color.b, 1.0 - (0.25 + 0.75) / 2.0);
        assert!((0.0..=1.0).contains(&color.b));
    }

    #[test]
    fn test_mouse_override_clamps_cursor_outside_window() {
        let sample = sized(InputSample {
            mouse_override: true,
            cursor: (-40.0, 10_000.0),
            ..InputSample::default()
        });
        let color = next_color(ColorState::INITIAL, &sample, false, 0.0);
        assert_eq!(color.r, 0.0);
        assert_eq!(color.g, 1.0);
        assert_close(color.b, 0.5);
    }

    #[test]
    fn test_mouse_wins_over_animation_and_manual() {
        let sample = sized(InputSample {
            mouse_override: true,
            cursor: (400.0, 300.0),
            adjust_red: true,
            adjust_green: true,
            adjust_blue: true,
            reset: true,
            ..InputSample::default()
        });
        // animate flag on as well: every mode triggers at once, mouse must win
        let color = next_color(ColorState::INITIAL, &sample, true, 123.0);
        assert_close(color.r, 0.5);
        assert_close(color.g, 0.5);
        assert_close(color.b, 0.5);
    }

    #[test]
    fn test_animation_wins_over_manual() {
        let sample = sized(InputSample {
            adjust_red: true,
            ..InputSample::default()
        });
        let color = next_color(ColorState::INITIAL, &sample, true, 0.0);
        assert_close(color.r, 0.5);
    }

    #[test]
    fn test_mouse_override_ignored_for_degenerate_window() {
        let sample = InputSample {
            mouse_override: true,
            cursor: (10.0, 10.0),
            window_size: (0, 0),
            ..InputSample::default()
        };
        let color = next_color(ColorState::INITIAL, &sample, false, 0.0);
        assert_eq!(color, ColorState::INITIAL);
    }

    #[test]
    fn test_alpha_never_changes() {
        let mouse = sized(InputSample {
            mouse_override: true,
            cursor: (1.0, 1.0),
            ..InputSample::default()
        });
        let manual = sized(InputSample {
            adjust_red: true,
            ..InputSample::default()
        });
        for (sample, animate) in [(mouse, false), (manual, false), (manual, true)] {
            let color = next_color(ColorState::INITIAL, &sample, animate, 7.0);
            assert_eq!(color.a, 1.0);
        }
    }

    #[test]
    fn test_key_sequence_end_to_end() {
        let mut color = ColorState::INITIAL;

        // frame: G pressed
        let sample = sized(InputSample {
            adjust_green: true,
            ..InputSample::default()
        });
        color = next_color(color, &sample, false, 0.1);
        assert_close(color.g, 0.1);

        // frame: 0 pressed
        let sample = sized(InputSample {
            reset: true,
            ..InputSample::default()
        });
        color = next_color(color, &sample, false, 0.2);
        assert_eq!((color.r, color.g, color.b), (1.0, 0.0, 0.0));

        // frame: animation enabled, evaluated at t = 0
        let sample = sized(InputSample::default());
        color = next_color(color, &sample, true, 0.0);
        assert_close(color.r, 0.5);
        assert_close(color.g, 0.933_012_7);
        assert_close(color.b, 0.066_987_3);
    }
}
