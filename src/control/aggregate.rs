//! Touch Aggregator: many fingers in, one location and one state out.

use crate::control::touch::{Bounds, Point, TouchPoint};

/*
Centroid
========

    ┌─────────────────────┐
    │   ●a                │      location = mean(a, b, c), normalised by
    │          ✚          │      the surface bounds into [0,1]²
    │   ●b          ●c    │
    └─────────────────────┘

Float addition is not associative, so a naive running sum can differ in the
last bit depending on the order the gesture layer lists the touches. Each
axis is therefore summed in ascending `total_cmp` order: the same touch set
always produces the same bits, whatever order it arrives in.

Touches slightly outside the surface (a finger sliding off the edge) would
give a location outside the unit square; the result is clamped so the
phoneme tables are only ever asked about in-range locations.
*/

/// Centroid of a touch set in the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub x: f32,
    pub y: f32,
}

impl Location {
    pub const CENTER: Location = Location { x: 0.5, y: 0.5 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Presentation state of the whole touch set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionState {
    /// No touches
    #[default]
    Idle,
    /// At least one live touch
    Highlighted,
    /// Touches present, all of them retiring
    Selected,
}

impl InteractionState {
    pub fn classify(touches: &[TouchPoint]) -> Self {
        if touches.is_empty() {
            InteractionState::Idle
        } else if touches.iter().any(|touch| touch.phase.is_live()) {
            InteractionState::Highlighted
        } else {
            InteractionState::Selected
        }
    }
}

/// Unweighted centroid of `touches`, normalised by `bounds`.
///
/// `None` when there are no touches with a finite position, or when the
/// bounds have no usable extent.
pub fn centroid(touches: &[TouchPoint], bounds: &Bounds) -> Option<Location> {
    let (mut xs, mut ys): (Vec<f32>, Vec<f32>) = touches
        .iter()
        .map(|touch| touch.position)
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| (p.x, p.y))
        .unzip();

    if xs.is_empty() {
        return None;
    }

    let mean = bounds.normalize(Point::new(ordered_mean(&mut xs), ordered_mean(&mut ys)))?;

    Some(Location::new(mean.x.clamp(0.0, 1.0), mean.y.clamp(0.0, 1.0)))
}

fn ordered_mean(values: &mut [f32]) -> f32 {
    values.sort_unstable_by(f32::total_cmp);
    values.iter().sum::<f32>() / values.len() as f32
}
