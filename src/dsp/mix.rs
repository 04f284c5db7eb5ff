//! Summing, scaling and dry/wet crossfading.

/*
Dry/Wet Mixing
==============

Every effect in the master chain is blended back against its own input:

    bitcrushOutput = mix(balance,        bitcrushed,  bitcrushMix)
    leftOut        = mix(bitcrushOutput, reverbLeft,  reverbMix)
    rightOut       = mix(bitcrushOutput, reverbRight, reverbMix)

  dry     the unprocessed signal (signal A)
  wet     the processed signal   (signal B)
  ratio   0.0 → all dry, 1.0 → all wet


The Math: Linear Interpolation
------------------------------

    output = dry × (1 - ratio) + wet × ratio

    ratio = 0.0:   dry × 1 + wet × 0   =  dry   (exactly)
    ratio = 1.0:   dry × 0 + wet × 1   =  wet   (exactly)

The end points are exact in IEEE-754 arithmetic as long as both inputs are
finite, because multiplying by 1.0 and adding ±0.0 are both lossless. That
matters: with a mix parameter parked at 0.0 the effect is truly bypassed,
not "almost" bypassed.

      level
      1.0 ──────╲      ╱──────  wet
                 ╲    ╱
      0.5         ╲  ╱
                   ╲╱
      0.0 ─────────────────────
          0.0     0.5     1.0
                  ratio

Linear mixing dips in perceived loudness around 0.5. For wet/dry effect
blending that is fine (and it keeps the boundaries exact, which an
equal-power curve built on sin/cos would not).


Summing
-------

The voice bus is a plain sum of N voices:

    sum = voice_1 + voice_2 + ... + voice_N

No normalisation is applied here; the balance stage that follows rescales
the sum to the level of its reference signal anyway.
*/

/// Linear crossfade from `dry` (ratio 0.0) to `wet` (ratio 1.0).
///
/// output = (dry × (1-ratio)) + (wet × ratio)
#[inline]
pub fn mix(dry: &[f32], wet: &[f32], ratio: f32, out: &mut [f32]) {
    debug_assert_eq!(dry.len(), wet.len());
    debug_assert_eq!(dry.len(), out.len());

    let ratio = ratio.clamp(0.0, 1.0);
    let weight_dry = 1.0 - ratio;
    let weight_wet = ratio;

    for ((&d, &w), o) in dry.iter().zip(wet.iter()).zip(out.iter_mut()) {
        *o = (d * weight_dry) + (w * weight_wet);
    }
}

/// Add `input` into `acc` in place.
///
/// ⚠️ Can exceed [-1.0, +1.0].
#[inline]
pub fn sum_in_place(acc: &mut [f32], input: &[f32]) {
    debug_assert_eq!(acc.len(), input.len());

    for (a, &s) in acc.iter_mut().zip(input.iter()) {
        *a += s;
    }
}

/// out = input × gain
#[inline]
pub fn scale(input: &[f32], gain: f32, out: &mut [f32]) {
    debug_assert_eq!(input.len(), out.len());

    for (o, &s) in out.iter_mut().zip(input.iter()) {
        *o = s * gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_zero_is_exactly_dry() {
        let dry = [0.123_456_7, -0.987_654_3, 1.0e-7, -1.0];
        let wet = [0.9, 0.1, -0.5, 0.333];
        let mut out = [0.0; 4];

        mix(&dry, &wet, 0.0, &mut out);

        assert_eq!(out, dry);
    }

    #[test]
    fn test_mix_one_is_exactly_wet() {
        let dry = [0.9, 0.1, -0.5, 0.333];
        let wet = [0.123_456_7, -0.987_654_3, 1.0e-7, -1.0];
        let mut out = [0.0; 4];

        mix(&dry, &wet, 1.0, &mut out);

        assert_eq!(out, wet);
    }

    #[test]
    fn test_mix_half() {
        let dry = [1.0, 1.0];
        let wet = [0.0, 0.5];
        let mut out = [0.0; 2];

        mix(&dry, &wet, 0.5, &mut out);

        assert_eq!(out, [0.5, 0.75]);
    }

    #[test]
    fn test_mix_ratio_clamped() {
        let dry = [1.0];
        let wet = [0.0];
        let mut out = [0.0; 1];

        mix(&dry, &wet, 2.0, &mut out);
        assert_eq!(out[0], 0.0); // all wet

        mix(&dry, &wet, -1.0, &mut out);
        assert_eq!(out[0], 1.0); // all dry
    }

    #[test]
    fn test_sum_can_exceed_one() {
        let mut acc = [1.0, 0.5];
        sum_in_place(&mut acc, &[1.0, 0.25]);

        assert_eq!(acc[0], 2.0);
        assert_eq!(acc[1], 0.75);
    }

    #[test]
    fn test_scale() {
        let mut out = [0.0; 3];
        scale(&[1.0, -0.5, 0.25], 0.125, &mut out);
        assert_eq!(out, [0.125, -0.0625, 0.031_25]);
    }
}
