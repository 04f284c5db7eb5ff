//! Polar Control Mapper: a location becomes a (hue, saturation) pair.

use std::f32::consts::{PI, TAU};

use crate::control::aggregate::Location;

/*
Angle and Radius around the Centre
==================================

              y = 1
         ┌──────────────┐
         │      hue 0.5 │   offset = (x - 0.5, y - 0.5)
         │        ▲     │
  hue    │        │     │   angle  = atan2(offset.x, offset.y)
  0.25 ◄─┼────── ✚ ─────┼─► hue 0.75
         │        │     │   hue    = (angle + π) / 2π
         │        ▼     │
         │      hue 0.0 │   saturation = 2 · |offset|
         └──────────────┘
              y = 0

Note the argument order: `atan2(x, y)`, not the textbook `atan2(y, x)`.
The zero angle points along +y instead of +x, which rotates the whole hue
wheel by a quarter turn. Phoneme layouts and colour schemes are drawn
against this orientation.

Degenerate and edge cases
-------------------------

  centre (0.5, 0.5):  atan2(0, 0) = 0  →  hue 0.5, saturation 0.0
  straight down (y < 0.5, x = 0.5) gives angle +π, which would be hue 1.0;
  it is folded onto 0.0 so the hue range is exactly [0, 1).
  corners: |offset| = √0.5, so saturation reaches √2 ≈ 1.414. It is not
  clamped here; use `display_saturation` where a strict [0,1] is needed.
*/

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlPair {
    /// Angle around the centre, in [0, 1)
    pub hue: f32,
    /// Twice the distance from the centre, in [0, √2]
    pub saturation: f32,
}

impl ControlPair {
    pub fn from_location(location: Location) -> Self {
        let dx = location.x - 0.5;
        let dy = location.y - 0.5;

        // x before y on purpose, see above
        let angle = dx.atan2(dy);
        let hue = (angle + PI) / TAU;
        let hue = if hue >= 1.0 { 0.0 } else { hue };

        Self {
            hue,
            saturation: dx.hypot(dy) * 2.0,
        }
    }

    /// Saturation clamped into [0, 1] for display.
    pub fn display_saturation(&self) -> f32 {
        self.saturation.clamp(0.0, 1.0)
    }
}

impl From<Location> for ControlPair {
    fn from(location: Location) -> Self {
        Self::from_location(location)
    }
}
