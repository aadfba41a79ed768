use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumString};

/// Easing curves available to the transition config.
///
/// `FastOutSlowIn` is the material standard curve, cubic-bezier(0.4, 0.0,
/// 0.2, 1.0), and the default for every channel on this screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, SerializeDisplay, DeserializeFromStr, EnumString,
    StrumDisplay,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Ease {
    Linear,
    InOutCubic,
    #[default]
    FastOutSlowIn,
}

impl Ease {
    /// Maps a time fraction to an eased fraction. Input outside [0, 1] is
    /// clamped.
    pub fn map(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::InOutCubic => {
                let t = t * 2.0;
                if t < 1.0 {
                    0.5 * t * t * t
                } else {
                    let t = t - 2.0;
                    0.5 * (t * t * t + 2.0)
                }
            }
            Ease::FastOutSlowIn => bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// y of a unit cubic bezier (endpoints (0,0) and (1,1)) at horizontal
/// position `x`, solved by bisection. The curve's x component is monotonic
/// for control points inside the unit square, which both callers guarantee.
fn bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    fn axis(c1: f64, c2: f64, s: f64) -> f64 {
        let r = 1.0 - s;
        3.0 * r * r * s * c1 + 3.0 * r * s * s * c2 + s * s * s
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..32 {
        let mid = (lo + hi) / 2.0;
        if axis(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    axis(y1, y2, (lo + hi) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact_enough() {
        for ease in [Ease::Linear, Ease::InOutCubic, Ease::FastOutSlowIn] {
            assert!(ease.map(0.0).abs() < 1e-6, "{ease} at 0");
            assert!((ease.map(1.0) - 1.0).abs() < 1e-6, "{ease} at 1");
        }
    }

    #[test]
    fn clamps_out_of_range_input() {
        assert_eq!(Ease::FastOutSlowIn.map(-0.5), Ease::FastOutSlowIn.map(0.0));
        assert_eq!(Ease::FastOutSlowIn.map(1.5), Ease::FastOutSlowIn.map(1.0));
    }

    #[test]
    fn curves_are_monotonic() {
        for ease in [Ease::Linear, Ease::InOutCubic, Ease::FastOutSlowIn] {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = ease.map(i as f64 / 100.0);
                assert!(v >= prev - 1e-9, "{ease} dips at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn fast_out_slow_in_front_loads_motion() {
        // More than half the distance is covered by the half-time mark.
        assert!(Ease::FastOutSlowIn.map(0.5) > 0.5);
    }

    #[test]
    fn parses_kebab_case_names() {
        let cases = vec![
            ("\"linear\"", Ease::Linear),
            ("\"Linear\"", Ease::Linear),
            ("\"in-out-cubic\"", Ease::InOutCubic),
            ("\"fast-out-slow-in\"", Ease::FastOutSlowIn),
            ("\"FAST-OUT-SLOW-IN\"", Ease::FastOutSlowIn),
        ];

        for (json, expected) in cases {
            let deserialized: Ease = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
