use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

An oscillator is the raw sound source of the instrument. It repeats a
waveform at a fixed frequency; filters and the master chain shape it later.

Sine: a single frequency with no harmonics.
  - Sound: smooth, hollow, flute-like

Sawtooth: the richest waveform, it contains all harmonics.
  - Sound: bright, buzzy, brassy
  - Harmonics: 1st, 2nd, 3rd, 4th, ... with amplitude falling off as 1/n

The sawtooth is what a vocal tract gets from the vocal folds (a buzzy pulse
train full of harmonics), which is why both the choir's driver and its
formant voices start from one:

  let driver = OscNode::sawtooth(110.0);
  let voice  = FormantVoice::new(220.0, Phoneme::neutral(), 48_000.0);
*/

pub struct OscNode {
    osc: OscillatorBlock,
    /// Fixed frequency (Hz)
    frequency: f32,
}

impl OscNode {
    fn new(osc: OscillatorBlock, frequency: f32) -> Self {
        Self { osc, frequency }
    }

    pub fn sine(frequency: f32) -> Self {
        Self::new(OscillatorBlock::sine(), frequency)
    }

    pub fn sawtooth(frequency: f32) -> Self {
        Self::new(OscillatorBlock::sawtooth(), frequency)
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.osc.render(out, self.frequency, ctx.sample_rate);
    }

    fn reset(&mut self) {
        self.osc.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc_node_renders_signal() {
        let mut osc = OscNode::sawtooth(110.0);
        let mut out = vec![0.0; 1024];

        osc.render_block(&mut out, &RenderCtx::new(48_000.0));

        let peak = out.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak > 0.9 && peak <= 1.0 + 1e-3, "unexpected peak {}", peak);
        assert_eq!(osc.frequency(), 110.0);
    }

    #[test]
    fn test_reset_restarts_waveform() {
        let mut osc = OscNode::sine(440.0);
        let ctx = RenderCtx::new(48_000.0);
        let mut first = vec![0.0; 32];
        let mut second = vec![0.0; 32];

        osc.render_block(&mut first, &ctx);
        osc.reset();
        osc.render_block(&mut second, &ctx);

        assert_eq!(first, second);
    }
}
