//! Construction API for stage graphs.
//!
//! ```text
//! let mut b = GraphBuilder::new(48_000.0);
//! let osc   = b.input(OscNode::sine(220.0));        // Port
//! let quiet = b.scale(osc, gain.clone(), 0.5)?;      // Port, checked
//! let (l, r) = b.reverb(quiet, 0.75, 16_000.0)?;
//! let graph = b.build(l, r)?;                         // sources reset here
//! ```
//!
//! A port can only name a stage that already exists, so the result is
//! acyclic without any further checks. Ports carry the id of the builder
//! that minted them; handing a port to a different builder is an error
//! rather than a silent read of an unrelated buffer.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::dsp::balance::Balancer;
use crate::dsp::decimator::Decimator;
use crate::dsp::reverb::StereoReverb;
use crate::error::GraphError;
use crate::graph::node::{GraphNode, RenderCtx};
use crate::graph::stage::{self, Port, Stage, StageKind};
use crate::param::Param;
use crate::MAX_BLOCK_SIZE;

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

pub struct GraphBuilder {
    id: u64,
    sample_rate: f32,
    stages: Vec<Stage>,
}

impl GraphBuilder {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            id: NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed),
            sample_rate: sample_rate.max(1.0),
            stages: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Bind an external signal as a graph input.
    pub fn input<N>(&mut self, node: N) -> Port
    where
        N: GraphNode + 'static,
    {
        self.push(StageKind::Source(Box::new(node)))
    }

    /// Linear sum of `inputs`. An empty list renders silence.
    pub fn sum(&mut self, inputs: &[Port]) -> Result<Port, GraphError> {
        for port in inputs {
            self.check(*port)?;
        }
        Ok(self.push(StageKind::Sum(inputs.to_vec())))
    }

    /// `input × param × factor`, with `param` read once per block.
    pub fn scale(&mut self, input: Port, param: Param, factor: f32) -> Result<Port, GraphError> {
        self.check(input)?;
        Ok(self.push(StageKind::Scale {
            input,
            param,
            factor,
        }))
    }

    /// Rescale `input` to the RMS level of `comparator`.
    pub fn balance(
        &mut self,
        input: Port,
        comparator: Port,
        half_power_hz: f32,
    ) -> Result<Port, GraphError> {
        self.check(input)?;
        self.check(comparator)?;
        let balancer = Balancer::new(self.sample_rate, half_power_hz);
        Ok(self.push(StageKind::Balance {
            input,
            comparator,
            balancer,
        }))
    }

    pub fn decimate(
        &mut self,
        input: Port,
        bit_depth: u32,
        target_rate: f32,
    ) -> Result<Port, GraphError> {
        self.check(input)?;
        let decimator = Decimator::new(self.sample_rate, bit_depth, target_rate);
        Ok(self.push(StageKind::Decimate { input, decimator }))
    }

    /// Crossfade from `dry` (ratio 0) to `wet` (ratio 1).
    pub fn mix(&mut self, dry: Port, wet: Port, ratio: Param) -> Result<Port, GraphError> {
        self.check(dry)?;
        self.check(wet)?;
        Ok(self.push(StageKind::Mix { dry, wet, ratio }))
    }

    /// Stereo reverb; returns the (left, right) ports.
    pub fn reverb(
        &mut self,
        input: Port,
        feedback: f32,
        cutoff_hz: f32,
    ) -> Result<(Port, Port), GraphError> {
        self.check(input)?;
        let reverb = StereoReverb::new(self.sample_rate, feedback, cutoff_hz);
        let left = self.push(StageKind::Reverb { input, reverb });
        let right = Port {
            channel: 1,
            ..left
        };
        Ok((left, right))
    }

    /// Finish the graph with `left`/`right` as the stereo output.
    ///
    /// Every port in the graph is validated again and every stage, sources
    /// included, is reset so nothing rendered before this point leaks in.
    pub fn build(mut self, left: Port, right: Port) -> Result<Graph, GraphError> {
        self.check(left)?;
        self.check(right)?;

        for (index, stage) in self.stages.iter().enumerate() {
            for port in stage.kind.inputs() {
                if port.graph != self.id {
                    return Err(GraphError::ForeignPort {
                        expected: self.id,
                        found: port.graph,
                    });
                }
                if port.stage >= index {
                    return Err(GraphError::UnknownPort {
                        stage: port.stage,
                        channel: port.channel,
                    });
                }
            }
        }

        let mut sources = 0;
        for stage in self.stages.iter_mut() {
            if matches!(stage.kind, StageKind::Source(_)) {
                sources += 1;
            }
            stage.reset();
        }

        log::debug!(
            "graph {}: built {} stages ({} sources) at {} Hz",
            self.id,
            self.stages.len(),
            sources,
            self.sample_rate
        );
        for (index, stage) in self.stages.iter().enumerate() {
            log::trace!("graph {}: stage {} = {}", self.id, index, stage.kind.name());
        }

        Ok(Graph {
            id: self.id,
            ctx: RenderCtx::new(self.sample_rate),
            stages: self.stages,
            left,
            right,
        })
    }

    fn push(&mut self, kind: StageKind) -> Port {
        let stage = self.stages.len();
        self.stages.push(Stage::new(kind));
        Port {
            graph: self.id,
            stage,
            channel: 0,
        }
    }

    fn check(&self, port: Port) -> Result<(), GraphError> {
        if port.graph != self.id {
            return Err(GraphError::ForeignPort {
                expected: self.id,
                found: port.graph,
            });
        }

        match self.stages.get(port.stage) {
            Some(stage) if port.channel < stage.outputs.len() => Ok(()),
            _ => Err(GraphError::UnknownPort {
                stage: port.stage,
                channel: port.channel,
            }),
        }
    }
}

/// A built, fixed-topology stage graph with one stereo output.
pub struct Graph {
    id: u64,
    ctx: RenderCtx,
    stages: Vec<Stage>,
    left: Port,
    right: Port,
}

impl Graph {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate
    }

    /// Frames rendered since the graph was built (or last reset).
    pub fn frames_rendered(&self) -> u64 {
        self.ctx.frame
    }

    /// Render into separate left/right buffers. Any length is accepted; long
    /// buffers are processed in chunks of at most `MAX_BLOCK_SIZE`.
    ///
    /// The buffers may differ in length: the graph runs for the longer one
    /// and each buffer is filled to its own length.
    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        let frames = left.len().max(right.len());

        let mut offset = 0;
        while offset < frames {
            let chunk = (frames - offset).min(MAX_BLOCK_SIZE);
            self.render_chunk(chunk);

            copy_at(left, offset, self.output(self.left, chunk));
            copy_at(right, offset, self.output(self.right, chunk));
            offset += chunk;
        }
    }

    /// Render into an interleaved device buffer. The stereo pair goes to
    /// the first two channels; any further channels are silenced. A mono
    /// device receives the left channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }

        let frames = data.len() / channels;
        let mut offset = 0;
        while offset < frames {
            let chunk = (frames - offset).min(MAX_BLOCK_SIZE);
            self.render_chunk(chunk);

            let left = self.output(self.left, chunk);
            let right = self.output(self.right, chunk);
            let block = &mut data[offset * channels..(offset + chunk) * channels];
            for (i, frame) in block.chunks_exact_mut(channels).enumerate() {
                frame[0] = left[i];
                if channels > 1 {
                    frame[1] = right[i];
                }
                for sample in frame.iter_mut().skip(2) {
                    *sample = 0.0;
                }
            }
            offset += chunk;
        }
    }

    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.reset();
        }
        self.ctx.frame = 0;
    }

    fn render_chunk(&mut self, frames: usize) {
        stage::process(&mut self.stages, frames, &self.ctx);
        self.ctx.frame += frames as u64;
    }

    fn output(&self, port: Port, frames: usize) -> &[f32] {
        &self.stages[port.stage].outputs[port.channel][..frames]
    }
}

/// Copy as much of `src` as fits into `dest` starting at `offset`.
fn copy_at(dest: &mut [f32], offset: usize, src: &[f32]) {
    if let Some(dest) = dest.get_mut(offset..) {
        let n = dest.len().min(src.len());
        dest[..n].copy_from_slice(&src[..n]);
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stages: Vec<&str> = self.stages.iter().map(|s| s.kind.name()).collect();
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("sample_rate", &self.ctx.sample_rate)
            .field("stages", &stages)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}
