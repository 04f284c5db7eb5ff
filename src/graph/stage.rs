//! Stage arena storage and per-block processing.
//!
//! A graph is a `Vec<Stage>`. Every stage owns its output buffers and reads
//! its inputs through [`Port`]s that point at stages earlier in the vector,
//! so iterating the vector in order is a valid topological order and a
//! stage can borrow its inputs with `split_at_mut`.

use crate::dsp::balance::Balancer;
use crate::dsp::decimator::Decimator;
use crate::dsp::mix;
use crate::dsp::reverb::StereoReverb;
use crate::graph::node::{GraphNode, RenderCtx};
use crate::param::Param;
use crate::MAX_BLOCK_SIZE;

/// Handle to one output channel of a stage.
///
/// Only meaningful to the builder (and graph) that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Port {
    pub(crate) graph: u64,
    pub(crate) stage: usize,
    pub(crate) channel: usize,
}

impl Port {
    /// Id of the builder/graph that owns this port.
    pub fn graph_id(&self) -> u64 {
        self.graph
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn channel(&self) -> usize {
        self.channel
    }
}

pub(crate) enum StageKind {
    /// An external signal, rendered by its node
    Source(Box<dyn GraphNode>),
    Sum(Vec<Port>),
    /// input × param × factor
    Scale {
        input: Port,
        param: Param,
        factor: f32,
    },
    Balance {
        input: Port,
        comparator: Port,
        balancer: Balancer,
    },
    Decimate {
        input: Port,
        decimator: Decimator,
    },
    /// Linear crossfade, ratio read from `ratio` once per block
    Mix {
        dry: Port,
        wet: Port,
        ratio: Param,
    },
    /// Mono in, left on channel 0, right on channel 1
    Reverb {
        input: Port,
        reverb: StereoReverb,
    },
}

impl StageKind {
    pub(crate) fn channels(&self) -> usize {
        match self {
            StageKind::Reverb { .. } => 2,
            _ => 1,
        }
    }

    pub(crate) fn inputs(&self) -> Vec<Port> {
        match self {
            StageKind::Source(_) => Vec::new(),
            StageKind::Sum(inputs) => inputs.clone(),
            StageKind::Scale { input, .. }
            | StageKind::Decimate { input, .. }
            | StageKind::Reverb { input, .. } => vec![*input],
            StageKind::Balance {
                input, comparator, ..
            } => vec![*input, *comparator],
            StageKind::Mix { dry, wet, .. } => vec![*dry, *wet],
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            StageKind::Source(_) => "source",
            StageKind::Sum(_) => "sum",
            StageKind::Scale { .. } => "scale",
            StageKind::Balance { .. } => "balance",
            StageKind::Decimate { .. } => "decimate",
            StageKind::Mix { .. } => "mix",
            StageKind::Reverb { .. } => "reverb",
        }
    }
}

pub(crate) struct Stage {
    pub(crate) kind: StageKind,
    /// One buffer of MAX_BLOCK_SIZE per output channel, allocated up front
    pub(crate) outputs: Vec<Vec<f32>>,
}

impl Stage {
    pub(crate) fn new(kind: StageKind) -> Self {
        let outputs = vec![vec![0.0; MAX_BLOCK_SIZE]; kind.channels()];
        Self { kind, outputs }
    }

    pub(crate) fn reset(&mut self) {
        match &mut self.kind {
            StageKind::Source(node) => node.reset(),
            StageKind::Balance { balancer, .. } => balancer.reset(),
            StageKind::Decimate { decimator, .. } => decimator.reset(),
            StageKind::Reverb { reverb, .. } => reverb.reset(),
            StageKind::Sum(_) | StageKind::Scale { .. } | StageKind::Mix { .. } => {}
        }
        for buffer in self.outputs.iter_mut() {
            buffer.fill(0.0);
        }
    }
}

#[inline]
fn read(earlier: &[Stage], port: Port, frames: usize) -> &[f32] {
    &earlier[port.stage].outputs[port.channel][..frames]
}

/// Render `frames` samples through every stage in insertion order.
///
/// Ports must already be validated: each one points at an earlier stage.
pub(crate) fn process(stages: &mut [Stage], frames: usize, ctx: &RenderCtx) {
    debug_assert!(frames <= MAX_BLOCK_SIZE);

    for index in 0..stages.len() {
        let (earlier, rest) = stages.split_at_mut(index);
        let Stage { kind, outputs } = &mut rest[0];

        match kind {
            StageKind::Source(node) => {
                node.render_block(&mut outputs[0][..frames], ctx);
            }
            StageKind::Sum(inputs) => {
                let out = &mut outputs[0][..frames];
                out.fill(0.0);
                for port in inputs.iter() {
                    mix::sum_in_place(out, read(earlier, *port, frames));
                }
            }
            StageKind::Scale {
                input,
                param,
                factor,
            } => {
                let gain = param.get() * *factor;
                mix::scale(read(earlier, *input, frames), gain, &mut outputs[0][..frames]);
            }
            StageKind::Balance {
                input,
                comparator,
                balancer,
            } => {
                balancer.process(
                    read(earlier, *input, frames),
                    read(earlier, *comparator, frames),
                    &mut outputs[0][..frames],
                );
            }
            StageKind::Decimate { input, decimator } => {
                decimator.process_buffer(read(earlier, *input, frames), &mut outputs[0][..frames]);
            }
            StageKind::Mix { dry, wet, ratio } => {
                mix::mix(
                    read(earlier, *dry, frames),
                    read(earlier, *wet, frames),
                    ratio.get(),
                    &mut outputs[0][..frames],
                );
            }
            StageKind::Reverb { input, reverb } => {
                let (left, right) = outputs.split_at_mut(1);
                reverb.process_buffer(
                    read(earlier, *input, frames),
                    &mut left[0][..frames],
                    &mut right[0][..frames],
                );
            }
        }
    }
}
