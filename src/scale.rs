use crate::{core::PlotArea, model::Dataset};

/// Continuous linear map from a data domain to a pixel range.
///
/// Inputs outside the domain extrapolate instead of clamping, so every finite
/// value has a pixel. A degenerate domain (both ends equal) maps everything to
/// the range start.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub round: bool, // round output to whole pixels
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let px = if self.is_degenerate() {
            r0
        } else {
            r0 + (v - d0) / (d1 - d0) * (r1 - r0)
        };
        if self.round { px.round() } else { px }
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` round values (1, 2 or 5 times a power of ten) inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.sorted_domain();
        if !(lo.is_finite() && hi.is_finite()) || count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }
        let step = tick_step(lo, hi, count);
        ticks_with_step(lo, hi, step)
    }

    /// Ticks on the standard clock intervals for a millisecond domain.
    pub fn time_ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = self.sorted_domain();
        if !(lo.is_finite() && hi.is_finite()) || count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }
        ticks_with_step(lo, hi, time_tick_step(lo, hi, count))
    }

    fn sorted_domain(&self) -> (f64, f64) {
        let (a, b) = self.domain;
        (a.min(b), a.max(b))
    }
}

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;

const TIME_INTERVALS: [f64; 12] = [
    SECOND,
    5.0 * SECOND,
    15.0 * SECOND,
    30.0 * SECOND,
    MINUTE,
    5.0 * MINUTE,
    15.0 * MINUTE,
    30.0 * MINUTE,
    HOUR,
    3.0 * HOUR,
    6.0 * HOUR,
    12.0 * HOUR,
];

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

fn time_tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let target = (hi - lo) / count as f64;
    let i = TIME_INTERVALS.partition_point(|&d| d <= target);
    if i == 0 {
        return tick_step(lo, hi, count).max(1.0);
    }
    if i == TIME_INTERVALS.len() {
        return tick_step(lo / HOUR, hi / HOUR, count).max(1.0) * HOUR;
    }
    let below = TIME_INTERVALS[i - 1];
    let above = TIME_INTERVALS[i];
    if target / below < above / target {
        below
    } else {
        above
    }
}

fn ticks_with_step(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// How the scale domains are derived from the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// `[0, max + padding]` on both axes.
    #[default]
    Padded,
    /// Observed `[min, max]`, padding ignored.
    Extent,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleParams {
    pub policy: DomainPolicy,
    pub padding_x_ms: f64,
    pub padding_y: f64,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            policy: DomainPolicy::Padded,
            padding_x_ms: 5_000.0,
            padding_y: 1.0,
        }
    }
}

/// Elapsed-time (x) and place (y) transforms for one chart.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub time_offset: f64, // seconds of the reference record
}

impl Scales {
    pub fn build(dataset: &Dataset, area: PlotArea, params: ScaleParams) -> Self {
        let (x_domain, y_domain) = match params.policy {
            DomainPolicy::Padded => (
                (0.0, dataset.max_elapsed_ms() + params.padding_x_ms),
                (0.0, f64::from(dataset.max_place()) + params.padding_y),
            ),
            DomainPolicy::Extent => (
                dataset.elapsed_extent_ms().unwrap_or((0.0, 0.0)),
                dataset
                    .place_extent()
                    .map_or((0.0, 0.0), |(lo, hi)| (f64::from(lo), f64::from(hi))),
            ),
        };

        // Faster riders sit further right; higher place numbers sit higher up.
        let x = LinearScale::new(x_domain, (area.width, 0.0)).rounded();
        let y = LinearScale::new(y_domain, (area.height, 0.0));
        tracing::debug!(?x_domain, ?y_domain, policy = ?params.policy, "scales built");

        Self {
            x,
            y,
            time_offset: dataset.time_offset(),
        }
    }

    pub fn x_for_ms(&self, elapsed_ms: f64) -> f64 {
        self.x.map(elapsed_ms)
    }

    pub fn y_for_place(&self, place: u32) -> f64 {
        self.y.map(f64::from(place))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{Layout, Margins},
        model::tests::{five_riders, rider},
    };

    fn area() -> PlotArea {
        PlotArea::new(Layout::SMALL.canvas().unwrap(), Margins::default()).unwrap()
    }

    #[test]
    fn linear_map_and_invert() {
        let s = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.map(5.0), 50.0);
        assert_eq!(s.invert(25.0), 7.5);
        // extrapolates instead of failing
        assert_eq!(s.map(20.0), -100.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let s = LinearScale::new((3.0, 3.0), (370.0, 0.0));
        assert_eq!(s.map(3.0), 370.0);
        assert_eq!(s.map(-9.0), 370.0);
        assert_eq!(s.ticks(10), vec![3.0]);
        let flat = LinearScale::new((0.0, 5.0), (7.0, 7.0));
        assert_eq!(flat.invert(7.0), 0.0);
    }

    #[test]
    fn rounded_scale_emits_whole_pixels() {
        let s = LinearScale::new((0.0, 3.0), (0.0, 10.0)).rounded();
        assert_eq!(s.map(1.0), 3.0);
    }

    #[test]
    fn linear_ticks_use_nice_steps() {
        let s = LinearScale::new((0.0, 36.0), (0.0, 1.0));
        assert_eq!(
            s.ticks(10),
            vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]
        );
        let s = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(s.ticks(5).len(), 6);
    }

    #[test]
    fn ticks_ignore_domain_direction() {
        let a = LinearScale::new((0.0, 36.0), (0.0, 1.0)).ticks(10);
        let b = LinearScale::new((36.0, 0.0), (0.0, 1.0)).ticks(10);
        assert_eq!(a, b);
    }

    #[test]
    fn time_ticks_pick_clock_intervals() {
        // 185 s over 12 ticks → 15 s steps
        let s = LinearScale::new((0.0, 185_000.0), (685.0, 0.0));
        let ticks = s.time_ticks(12);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks[1], 15_000.0);
        assert_eq!(ticks.last(), Some(&180_000.0));
    }

    #[test]
    fn time_ticks_small_domain_falls_back_to_ms_steps() {
        let s = LinearScale::new((0.0, 600.0), (1.0, 0.0));
        let ticks = s.time_ticks(12);
        assert_eq!(ticks[1], 50.0);
    }

    #[test]
    fn x_is_inverted_with_padding() {
        let ds = five_riders();
        let scales = Scales::build(&ds, area(), ScaleParams::default());
        assert_eq!(scales.x.domain, (0.0, 85_000.0));
        // fastest rider sits at the right edge
        assert_eq!(scales.x_for_ms(0.0), 685.0);
        assert_eq!(scales.x_for_ms(85_000.0), 0.0);
        for r in ds.records() {
            let px = scales.x_for_ms(ds.elapsed_ms(r));
            assert!((0.0..=685.0).contains(&px));
        }
    }

    #[test]
    fn y_strictly_decreases_with_place() {
        let ds = five_riders();
        let scales = Scales::build(&ds, area(), ScaleParams::default());
        assert_eq!(scales.y.domain, (0.0, 6.0));
        let ys: Vec<f64> = (1..=5).map(|p| scales.y_for_place(p)).collect();
        assert!(ys.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn extent_policy_uses_observed_range() {
        let ds = five_riders();
        let params = ScaleParams {
            policy: DomainPolicy::Extent,
            ..ScaleParams::default()
        };
        let scales = Scales::build(&ds, area(), params);
        assert_eq!(scales.x.domain, (0.0, 80_000.0));
        assert_eq!(scales.y.domain, (1.0, 5.0));
        assert_eq!(scales.y_for_place(1), 370.0);
        assert_eq!(scales.y_for_place(5), 0.0);
    }

    #[test]
    fn single_record_extent_is_total() {
        let ds = Dataset::new(vec![rider("Solo", 1, 2210.0, "")], "test").unwrap();
        let params = ScaleParams {
            policy: DomainPolicy::Extent,
            ..ScaleParams::default()
        };
        let scales = Scales::build(&ds, area(), params);
        assert_eq!(scales.x_for_ms(0.0), 685.0);
        assert_eq!(scales.y_for_place(1), 370.0);
    }
}
