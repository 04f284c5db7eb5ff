//! Touch snapshots as delivered by the gesture layer.

/// A position in view-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Opaque identity of one finger, stable for the lifetime of the touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Began,
    Moved,
    Stationary,
    Cancelled,
    Ended,
}

impl TouchPhase {
    /// Began, Moved and Stationary touches are live; Cancelled and Ended
    /// touches are retiring.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            TouchPhase::Began | TouchPhase::Moved | TouchPhase::Stationary
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    pub position: Point,
    pub phase: TouchPhase,
}

impl TouchPoint {
    pub fn new(id: u64, x: f32, y: f32, phase: TouchPhase) -> Self {
        Self {
            id: TouchId(id),
            position: Point::new(x, y),
            phase,
        }
    }
}

/// The surface touches are measured against, in view-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// The unit square itself.
    pub fn unit() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }

    /// True when the surface has a positive, finite extent on both axes.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Map a view point into the unit square (translate by the origin,
    /// scale each axis by the extent). Points outside the surface map
    /// outside [0,1]. `None` for an unusable surface.
    pub fn normalize(&self, point: Point) -> Option<Point> {
        if !self.is_usable() {
            return None;
        }

        Some(Point::new(
            (point.x - self.origin.x) / self.width,
            (point.y - self.origin.y) / self.height,
        ))
    }
}
