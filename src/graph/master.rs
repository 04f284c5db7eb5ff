use crate::config::MasterConfig;
use crate::error::GraphError;
use crate::graph::builder::{Graph, GraphBuilder};
use crate::graph::node::GraphNode;
use crate::param::Param;

/*
Master Signal Chain
===================

    voice 1 ─┐
    voice 2 ─┼─► [sum] ───────────────► [balance] ─┬──────────────┐
    voice N ─┘                              ▲      │              │ dry
                                            │      └─► [crush] ──►(mix: bitcrushMix)
    driver ───► (× amplitude × 0.125) ──────┘         24 bit          │
                  comparator                          4000 Hz         │
                                                                      ▼
                                            ┌───────────── bitcrushOutput
                                            │                   │
                                            ▼                   │ dry
                                        [reverb] ── L ──►(mix: reverbMix)──► left
                                        fb 0.75   ── R ──►(mix: reverbMix)──► right
                                        16 kHz

`amplitude` is not a plain output gain. It scales the balance stage's
reference signal: the summed voices are continuously re-levelled to the
driver's loudness times `amplitude`, so amplitude 0 fades the whole voice
mix out through the balance followers (no click) and amplitude 1 brings
it back.

All three live parameters start at 0.0: silent and dry.
*/

/// Control-side view of the master chain's live parameters.
#[derive(Debug, Clone)]
pub struct MasterParams {
    pub amplitude: Param,
    pub bitcrush_mix: Param,
    pub reverb_mix: Param,
}

impl MasterParams {
    fn new() -> Self {
        Self {
            amplitude: Param::unit(0.0),
            bitcrush_mix: Param::unit(0.0),
            reverb_mix: Param::unit(0.0),
        }
    }

    pub fn mute(&self) {
        self.amplitude.set(0.0);
    }

    pub fn unmute(&self) {
        self.amplitude.set(1.0);
    }

    pub fn is_muted(&self) -> bool {
        self.amplitude.get() == 0.0
    }
}

/// The fixed master topology: N voices and a driver in, stereo out.
#[derive(Debug)]
pub struct SignalGraph {
    graph: Graph,
    params: MasterParams,
}

impl SignalGraph {
    pub fn new<D, V>(
        driver: D,
        voices: Vec<V>,
        config: &MasterConfig,
        sample_rate: f32,
    ) -> Result<Self, GraphError>
    where
        D: GraphNode + 'static,
        V: GraphNode + 'static,
    {
        if voices.is_empty() {
            return Err(GraphError::NoVoices);
        }

        let params = MasterParams::new();
        let voice_count = voices.len();
        let mut b = GraphBuilder::new(sample_rate);

        let driver = b.input(driver);
        let voices: Vec<_> = voices.into_iter().map(|voice| b.input(voice)).collect();

        let sum = b.sum(&voices)?;
        let comparator = b.scale(driver, params.amplitude.clone(), config.comparator_scale)?;
        let balance = b.balance(sum, comparator, config.balance_half_power_hz)?;

        let bitcrushed = b.decimate(balance, config.bit_depth, config.crush_sample_rate)?;
        let bitcrush_output = b.mix(balance, bitcrushed, params.bitcrush_mix.clone())?;

        let (reverb_left, reverb_right) = b.reverb(
            bitcrush_output,
            config.reverb_feedback,
            config.reverb_cutoff_hz,
        )?;
        let left = b.mix(bitcrush_output, reverb_left, params.reverb_mix.clone())?;
        let right = b.mix(bitcrush_output, reverb_right, params.reverb_mix.clone())?;

        let graph = b.build(left, right)?;
        log::debug!(
            "master chain ready: {} voices, {} bit @ {} Hz crush, reverb fb {} / {} Hz",
            voice_count,
            config.bit_depth,
            config.crush_sample_rate,
            config.reverb_feedback,
            config.reverb_cutoff_hz
        );

        Ok(Self { graph, params })
    }

    /// A clonable handle to the live parameters, for the interaction thread.
    pub fn params(&self) -> MasterParams {
        self.params.clone()
    }

    pub fn mute(&self) {
        self.params.mute();
    }

    pub fn unmute(&self) {
        self.params.unmute();
    }

    pub fn sample_rate(&self) -> f32 {
        self.graph.sample_rate()
    }

    pub fn render(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.graph.render(left, right);
    }

    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        self.graph.render_interleaved(data, channels);
    }

    pub fn reset(&mut self) {
        self.graph.reset();
    }
}
