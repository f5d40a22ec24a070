//! Hover overlay for markers.
//!
//! Each marker registers an enter/leave binding with a [`HoverRegistry`]. Pointer
//! events are dispatched against the registry and toggle a single [`Overlay`].

use crate::{
    core::{Point, Vec2},
    model::Record,
};

pub const VISIBLE_OPACITY: f64 = 0.9;
pub const OVERLAY_OFFSET: Vec2 = Vec2::new(10.0, -28.0);

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TooltipContent {
    pub name: String,
    pub nationality: String,
    pub year: i32,
    pub time: String,
    pub doping: String, // "None" when clean
}

impl TooltipContent {
    pub fn for_record(r: &Record) -> Self {
        Self {
            name: r.name.clone(),
            nationality: r.nationality.clone(),
            year: r.year,
            time: r.time.clone(),
            doping: r.doping_note().to_string(),
        }
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("{}: {}", self.name, self.nationality),
            format!("Year: {}, Time: {}", self.year, self.time),
            format!("Doping: {}", self.doping),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct MarkId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter(MarkId),
    Leave(MarkId),
}

/// The floating tooltip. Starts hidden.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Overlay {
    pub opacity: f64,
    pub at: Option<Point>,
    pub content: Option<TooltipContent>,
    pub focus: Option<MarkId>,
}

impl Overlay {
    pub fn is_visible(&self) -> bool {
        self.focus.is_some() && self.opacity > 0.0
    }
}

#[derive(Clone, Debug)]
struct HoverBinding {
    center: Point,
    radius: f64,
    content: TooltipContent,
}

#[derive(Clone, Debug, Default)]
pub struct HoverRegistry {
    bindings: Vec<HoverBinding>,
}

impl HoverRegistry {
    pub fn register(&mut self, center: Point, radius: f64, content: TooltipContent) -> MarkId {
        self.bindings.push(HoverBinding {
            center,
            radius,
            content,
        });
        MarkId(self.bindings.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Topmost (last registered) marker under `p`.
    pub fn hit_test(&self, p: Point) -> Option<MarkId> {
        self.bindings
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| (p - b.center).hypot() <= b.radius)
            .map(|(i, _)| MarkId(i))
    }

    pub fn dispatch(&self, overlay: &mut Overlay, event: PointerEvent) {
        match event {
            PointerEvent::Enter(id) => {
                let Some(binding) = self.bindings.get(id.0) else {
                    return;
                };
                *overlay = Overlay {
                    opacity: VISIBLE_OPACITY,
                    at: Some(binding.center + OVERLAY_OFFSET),
                    content: Some(binding.content.clone()),
                    focus: Some(id),
                };
            }
            // leaving a marker that doesn't own the overlay changes nothing
            PointerEvent::Leave(id) if overlay.focus == Some(id) => *overlay = Overlay::default(),
            PointerEvent::Leave(_) => {}
        }
    }

    /// Turns a pointer position into the enter/leave events it implies.
    pub fn pointer_moved(&self, overlay: &mut Overlay, p: Point) {
        let hit = self.hit_test(p);
        if hit == overlay.focus {
            return;
        }
        if let Some(prev) = overlay.focus {
            self.dispatch(overlay, PointerEvent::Leave(prev));
        }
        if let Some(id) = hit {
            self.dispatch(overlay, PointerEvent::Enter(id));
        }
    }
}
