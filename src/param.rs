//! Bounded, lock-free control parameters.
//!
//! A [`Param`] is the only surface realtime control code writes to. Every
//! write is clamped into the parameter's range, so the render thread never
//! sees an out-of-domain modulation value no matter what the control side
//! computed.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/*
Sharing a Float Between Threads
===============================

The interaction thread writes a parameter whenever a touch moves, and the
render thread reads it once per block. A mutex would be overkill (and could
block the audio callback), so the value lives in an `AtomicU32` holding the
bit pattern of the `f32`:

    write:  bits = clamp(v).to_bits()   ──store──►  AtomicU32
    read:   AtomicU32  ──load──►  f32::from_bits(bits)

A single 32-bit store is indivisible, so a reader sees either the old or the
new value, never a torn mix of both. `Relaxed` ordering is enough: there is no
other memory the reader needs to see "together with" the value.

    interaction thread                     render thread
    ──────────────────                     ─────────────
    amplitude.set(1.0)  ────────────────►  amplitude.get()   (next block)

Range and Clamping
------------------

  min ≤ value ≤ max   at all times.

    set(-0.5)  on [0, 1]  →  0.0
    set( 0.3)  on [0, 1]  →  0.3   (stored unchanged)
    set( 7.0)  on [0, 1]  →  1.0
    set( NaN)  on [0, 1]  →  0.0   (NaN clamps to min)
*/

struct Cell {
    bits: AtomicU32,
    min: f32,
    max: f32,
}

/// A scalar clamped to a fixed `[min, max]` range, shared between threads.
///
/// Cloning a `Param` yields another handle to the same value.
#[derive(Clone)]
pub struct Param {
    cell: Arc<Cell>,
}

impl Param {
    pub fn new(value: f32, min: f32, max: f32) -> Self {
        debug_assert!(min <= max, "parameter range is inverted: {min} > {max}");

        let value = clamp_to(value, min, max);
        Self {
            cell: Arc::new(Cell {
                bits: AtomicU32::new(value.to_bits()),
                min,
                max,
            }),
        }
    }

    /// A parameter ranging over `[0, 1]`, the range of every mix ratio.
    pub fn unit(value: f32) -> Self {
        Self::new(value, 0.0, 1.0)
    }

    /// Store `value` clamped into range. Never fails.
    #[inline]
    pub fn set(&self, value: f32) {
        let value = clamp_to(value, self.cell.min, self.cell.max);
        self.cell.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.cell.bits.load(Ordering::Relaxed))
    }

    pub fn min(&self) -> f32 {
        self.cell.min
    }

    pub fn max(&self) -> f32 {
        self.cell.max
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Param")
            .field("value", &self.get())
            .field("min", &self.cell.min)
            .field("max", &self.cell.max)
            .finish()
    }
}

#[inline]
fn clamp_to(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
