/// Easing curves for the marker entrance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    #[default]
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::InOutQuad if t < 0.5 => 2.0 * t * t,
            Self::InOutQuad => 1.0 - (2.0 - 2.0 * t).powi(2) / 2.0,
            Self::InCubic => t.powi(3),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic if t < 0.5 => 4.0 * t.powi(3),
            Self::InOutCubic => 1.0 - (2.0 - 2.0 * t).powi(3) / 2.0,
        }
    }

    /// SMIL `keySplines` control points approximating the curve.
    pub fn key_splines(self) -> &'static str {
        match self {
            Self::Linear => "0 0 1 1",
            Self::InQuad => "0.11 0 0.5 0",
            Self::OutQuad => "0.5 1 0.89 1",
            Self::InOutQuad => "0.45 0 0.55 1",
            Self::InCubic => "0.32 0 0.67 0",
            Self::OutCubic => "0.33 1 0.68 1",
            Self::InOutCubic => "0.65 0 0.35 1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_stable() {
        for ease in Ease::ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in Ease::ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b, "{ease:?}");
            assert!(b < c, "{ease:?}");
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
        assert_eq!(Ease::InQuad.apply(7.0), 1.0);
    }

    #[test]
    fn names_deserialize_snake_case() {
        let e: Ease = serde_json::from_str("\"in_out_cubic\"").unwrap();
        assert_eq!(e, Ease::InOutCubic);
    }
}
