use crate::{anim_ease::Ease, core::Point};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(f64::lerp(&a.x, &b.x, t), f64::lerp(&a.y, &b.y, t))
    }
}

/// Staggered marker entrance: marker `i` waits `i * stagger_ms`, then eases
/// from its start point to its final point over `duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Entrance {
    pub duration_ms: f64,
    pub stagger_ms: f64,
    pub ease: Ease,
}

impl Default for Entrance {
    fn default() -> Self {
        Self {
            duration_ms: 1_000.0,
            stagger_ms: 20.0,
            ease: Ease::OutCubic,
        }
    }
}

impl Entrance {
    pub fn delay_ms(&self, index: usize) -> f64 {
        index as f64 * self.stagger_ms.max(0.0)
    }

    /// Time at which every marker has arrived.
    pub fn total_ms(&self, count: usize) -> f64 {
        match count {
            0 => 0.0,
            n => self.delay_ms(n - 1) + self.duration_ms.max(0.0),
        }
    }

    /// Eased progress in `0..=1` of marker `index` at time `t_ms`.
    /// A NaN time counts as settled.
    pub fn progress(&self, index: usize, t_ms: f64) -> f64 {
        if t_ms.is_nan() {
            return 1.0;
        }
        let local = t_ms - self.delay_ms(index);
        if local <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 || local >= self.duration_ms {
            return 1.0;
        }
        self.ease.apply(local / self.duration_ms)
    }

    pub fn sample<T: Lerp>(&self, index: usize, from: &T, to: &T, t_ms: f64) -> T {
        T::lerp(from, to, self.progress(index, t_ms))
    }
}
