//! Standard normal quantiles for approximate credible intervals.
//!
//! Only the upper half of the quantile function is needed: a central interval
//! with coverage `c` uses `z = Φ⁻¹(0.5 + c/2)`. Values come from Acklam's
//! rational approximation (relative error below 1.2e-9).

#![allow(clippy::excessive_precision)]

// Central region, numerator and denominator in r = (p - 1/2)².
const CENTRAL_NUM: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const CENTRAL_DEN: [f64; 6] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
    1.0,
];

// Upper tail, in q = sqrt(-2 ln(1 - p)).
const TAIL_NUM: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const TAIL_DEN: [f64; 5] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
    1.0,
];

const TAIL_START: f64 = 1.0 - 0.02425;

fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// `Φ⁻¹(p)` for `p` in `[0.5, 1)`; inputs are clamped into that range.
fn upper_quantile(p: f64) -> f64 {
    let p = p.clamp(0.5, 1.0 - 1e-15);
    if p <= TAIL_START {
        let q = p - 0.5;
        let r = q * q;
        q * horner(&CENTRAL_NUM, r) / horner(&CENTRAL_DEN, r)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -horner(&TAIL_NUM, q) / horner(&TAIL_DEN, q)
    }
}

/// Two-sided z multiplier for a central interval with the given coverage.
pub(crate) fn two_sided_z(confidence: f64) -> f64 {
    upper_quantile(0.5 + confidence / 2.0)
}
