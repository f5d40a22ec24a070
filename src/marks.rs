use crate::{
    core::{PlotArea, Point, Vec2},
    model::Dataset,
    scale::Scales,
    tooltip::{HoverRegistry, MarkId, TooltipContent},
};

pub const LABEL_OFFSET: Vec2 = Vec2::new(7.0, 4.0);

/// One record placed on the plot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Mark {
    pub id: MarkId,
    pub center: Point,
    pub baseline: Point, // where the entrance starts
    pub radius: f64,
    pub label: String,
    pub doped: bool,
    pub tooltip: TooltipContent,
}

impl Mark {
    pub fn class(&self) -> &'static str {
        if self.doped {
            "graph__dot graph__dot--doping"
        } else {
            "graph__dot graph__dot--clean"
        }
    }

    pub fn label_at(&self) -> Point {
        label_for(self.center)
    }
}

/// Label anchor for a marker drawn at `center`.
pub fn label_for(center: Point) -> Point {
    center + LABEL_OFFSET
}

/// Lays out one marker per record, in dataset order, and registers its hover binding.
pub fn layout_marks(
    dataset: &Dataset,
    scales: &Scales,
    area: PlotArea,
    radius: f64,
    hover: &mut HoverRegistry,
) -> Vec<Mark> {
    dataset
        .records()
        .iter()
        .map(|r| {
            let center = Point::new(
                scales.x_for_ms(dataset.elapsed_ms(r)),
                scales.y_for_place(r.place),
            );
            let tooltip = TooltipContent::for_record(r);
            let id = hover.register(center, radius, tooltip.clone());
            Mark {
                id,
                center,
                baseline: Point::new(center.x, area.height),
                radius,
                label: r.name.clone(),
                doped: r.is_doped(),
                tooltip,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{Layout, Margins},
        model::tests::five_riders,
        scale::ScaleParams,
    };

    #[test]
    fn one_mark_per_record_at_scaled_position() {
        let ds = five_riders();
        let area = PlotArea::new(Layout::SMALL.canvas().unwrap(), Margins::default()).unwrap();
        let scales = Scales::build(&ds, area, ScaleParams::default());
        let mut hover = HoverRegistry::default();
        let marks = layout_marks(&ds, &scales, area, 5.0, &mut hover);

        assert_eq!(marks.len(), 5);
        assert_eq!(hover.len(), 5);
        for (m, r) in marks.iter().zip(ds.records()) {
            assert_eq!(m.center.x, scales.x_for_ms(ds.elapsed_ms(r)));
            assert_eq!(m.center.y, scales.y_for_place(r.place));
            assert_eq!(m.baseline.y, area.height);
            assert_eq!(m.label_at(), m.center + LABEL_OFFSET);
            assert_eq!(hover.hit_test(m.center), Some(m.id));
        }
        assert_eq!(marks[0].center.x, 685.0);
    }

    #[test]
    fn doped_marks_get_doping_class() {
        let ds = five_riders();
        let area = PlotArea::new(Layout::SMALL.canvas().unwrap(), Margins::default()).unwrap();
        let scales = Scales::build(&ds, area, ScaleParams::default());
        let marks = layout_marks(&ds, &scales, area, 5.0, &mut HoverRegistry::default());
        let doped: Vec<&str> = marks
            .iter()
            .filter(|m| m.class().contains("--doping"))
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(doped, ["A", "D"]);
    }
}
