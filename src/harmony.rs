//! Color harmony relationship detection
//!
//! Classifies a set of hue angles against the canonical harmony patterns
//! using tolerance-based matching. A pattern is only reported when its
//! angular deviation from the ideal geometry stays inside
//! [`constants::harmony::TOLERANCE_DEG`]; confidence decreases linearly
//! with deviation and reaches zero at the tolerance boundary.

use serde::{Deserialize, Serialize};

use crate::color::{classify_temperature, hue_distance};
use crate::constants::harmony::{
    ANALOGOUS_STEP_DEG, COMPLEMENTARY_DEG, SPLIT_COMPLEMENTARY_DEG,
    SPLIT_PARTNER_SEPARATION_DEG, TOLERANCE_DEG, TRIADIC_DEG,
};
use crate::constants::temperature::Temperature;

/// One hue under classification, tagged with where it came from
/// (a scope name, a color key, or a bare hex string)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HueSample {
    pub label: String,
    pub degrees: f64,
}

impl HueSample {
    pub fn new(label: impl Into<String>, degrees: f64) -> Self {
        Self {
            label: label.into(),
            degrees,
        }
    }
}

/// The canonical harmony patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmonyKind {
    Complementary,
    Triadic,
    SplitComplementary,
    Analogous,
    Monochromatic,
}

impl HarmonyKind {
    /// Tie-break rank: lower wins when confidences are equal
    fn priority(self) -> u8 {
        match self {
            Self::Complementary => 0,
            Self::Triadic => 1,
            Self::SplitComplementary => 2,
            Self::Analogous => 3,
            Self::Monochromatic => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::SplitComplementary => "split-complementary",
            Self::Analogous => "analogous",
            Self::Monochromatic => "monochromatic",
        }
    }
}

/// A detected harmony pattern
///
/// `deviation` is the worst pairwise angular error from the pattern's ideal
/// geometry; `confidence` is `1 - deviation / TOLERANCE_DEG`, clamped to
/// [0, 1], and is therefore non-increasing as deviation grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyMatch {
    pub kind: HarmonyKind,
    pub samples: Vec<HueSample>,
    pub deviation: f64,
    pub confidence: f64,
}

impl HarmonyMatch {
    fn new(kind: HarmonyKind, samples: Vec<HueSample>, deviation: f64) -> Self {
        let confidence = (1.0 - deviation / TOLERANCE_DEG).clamp(0.0, 1.0);
        Self {
            kind,
            samples,
            deviation,
            confidence,
        }
    }
}

/// Warm/cool distribution of a hue set, per the fixed hue-range table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureBalance {
    pub warm: usize,
    pub cool: usize,
    pub transitional: usize,
}

/// Detect every harmony pattern the hue set exhibits
///
/// Matches are ranked by confidence descending; ties are broken by the
/// canonical pattern priority (complementary > triadic > split-complementary
/// > analogous > monochromatic). Only matches with confidence above zero are
/// returned. Duplicate hues are allowed; input order is the palette order.
pub fn classify(samples: &[HueSample]) -> Vec<HarmonyMatch> {
    let mut matches = Vec::new();
    let n = samples.len();

    // Complementary: pairs within tolerance of 180° separation
    for i in 0..n {
        for j in (i + 1)..n {
            let d = hue_distance(samples[i].degrees, samples[j].degrees);
            let deviation = (d - COMPLEMENTARY_DEG).abs();
            if deviation < TOLERANCE_DEG {
                matches.push(HarmonyMatch::new(
                    HarmonyKind::Complementary,
                    vec![samples[i].clone(), samples[j].clone()],
                    deviation,
                ));
            }
        }
    }

    // Triadic: mutually consistent triples, each pair near 120°
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let d_ij = hue_distance(samples[i].degrees, samples[j].degrees);
                let d_ik = hue_distance(samples[i].degrees, samples[k].degrees);
                let d_jk = hue_distance(samples[j].degrees, samples[k].degrees);
                let deviation = (d_ij - TRIADIC_DEG)
                    .abs()
                    .max((d_ik - TRIADIC_DEG).abs())
                    .max((d_jk - TRIADIC_DEG).abs());
                if deviation < TOLERANCE_DEG {
                    matches.push(HarmonyMatch::new(
                        HarmonyKind::Triadic,
                        vec![samples[i].clone(), samples[j].clone(), samples[k].clone()],
                        deviation,
                    ));
                }
            }
        }
    }

    // Split-complementary: a pivot with two hues near 150° from it, sitting
    // on either side of the complement (so near 60° from each other). Each
    // index triple is reported once, with the pivot that minimizes deviation.
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let mut best: Option<(f64, [usize; 3])> = None;
                for (pivot, left, right) in [(i, j, k), (j, i, k), (k, i, j)] {
                    let d_pl = hue_distance(samples[pivot].degrees, samples[left].degrees);
                    let d_pr = hue_distance(samples[pivot].degrees, samples[right].degrees);
                    let d_lr = hue_distance(samples[left].degrees, samples[right].degrees);
                    let deviation = (d_pl - SPLIT_COMPLEMENTARY_DEG)
                        .abs()
                        .max((d_pr - SPLIT_COMPLEMENTARY_DEG).abs())
                        .max((d_lr - SPLIT_PARTNER_SEPARATION_DEG).abs());
                    if deviation < TOLERANCE_DEG
                        && best.map_or(true, |(d, _)| deviation < d)
                    {
                        best = Some((deviation, [pivot, left, right]));
                    }
                }
                if let Some((deviation, [pivot, left, right])) = best {
                    matches.push(HarmonyMatch::new(
                        HarmonyKind::SplitComplementary,
                        vec![
                            samples[pivot].clone(),
                            samples[left].clone(),
                            samples[right].clone(),
                        ],
                        deviation,
                    ));
                }
            }
        }
    }

    // Analogous: contiguous runs after sorting, consecutive gaps within
    // 2×tolerance and full span within 3×tolerance. The ideal consecutive
    // step is 30°; deviation is the worst gap error against it.
    matches.extend(analogous_runs(samples));

    // Monochromatic: every hue within tolerance of every other
    if n >= 1 {
        let mut max_dist: f64 = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                max_dist = max_dist.max(hue_distance(samples[i].degrees, samples[j].degrees));
            }
        }
        if max_dist < TOLERANCE_DEG {
            matches.push(HarmonyMatch::new(
                HarmonyKind::Monochromatic,
                samples.to_vec(),
                max_dist,
            ));
        }
    }

    matches.retain(|m| m.confidence > 0.0);
    matches.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.kind.priority().cmp(&b.kind.priority()))
    });
    matches
}

/// Maximal sorted runs of nearby hues that qualify as analogous
fn analogous_runs(samples: &[HueSample]) -> Vec<HarmonyMatch> {
    if samples.len() < 2 {
        return Vec::new();
    }

    let mut sorted: Vec<HueSample> = samples.to_vec();
    sorted.sort_by(|a, b| {
        a.degrees
            .partial_cmp(&b.degrees)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let max_gap = TOLERANCE_DEG * 2.0;
    let max_span = TOLERANCE_DEG * 3.0;

    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=sorted.len() {
        let broken = i == sorted.len()
            || hue_distance(sorted[i].degrees, sorted[i - 1].degrees) > max_gap;
        if broken {
            if i - start >= 2 {
                runs.push(&sorted[start..i]);
            }
            start = i;
        }
    }

    let mut matches = Vec::new();
    for run in runs {
        let span = hue_distance(run[0].degrees, run[run.len() - 1].degrees);
        if span > max_span {
            continue;
        }
        let deviation = run
            .windows(2)
            .map(|w| (hue_distance(w[0].degrees, w[1].degrees) - ANALOGOUS_STEP_DEG).abs())
            .fold(0.0_f64, f64::max);
        if deviation < TOLERANCE_DEG {
            matches.push(HarmonyMatch::new(
                HarmonyKind::Analogous,
                run.to_vec(),
                deviation,
            ));
        }
    }
    matches
}

/// Tally the warm/cool distribution of a chromatic hue set
///
/// Callers are expected to have filtered out near-neutral colors already;
/// the lookup uses the hue-range table directly.
pub fn temperature_balance(samples: &[HueSample]) -> TemperatureBalance {
    let mut balance = TemperatureBalance::default();
    for sample in samples {
        // Saturation 100 bypasses the neutral floor; chromaticity was
        // decided upstream.
        match classify_temperature(sample.degrees, 100.0) {
            Temperature::Warm => balance.warm += 1,
            Temperature::Cool => balance.cool += 1,
            _ => balance.transitional += 1,
        }
    }
    balance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hues(degrees: &[f64]) -> Vec<HueSample> {
        degrees
            .iter()
            .enumerate()
            .map(|(i, &d)| HueSample::new(format!("h{i}"), d))
            .collect()
    }

    fn find(matches: &[HarmonyMatch], kind: HarmonyKind) -> Option<&HarmonyMatch> {
        matches.iter().find(|m| m.kind == kind)
    }

    #[test]
    fn test_exact_complementary_full_confidence() {
        let matches = classify(&hues(&[0.0, 180.0]));
        let m = find(&matches, HarmonyKind::Complementary).expect("complementary");
        assert_eq!(m.deviation, 0.0);
        assert_eq!(m.confidence, 1.0);
        assert_eq!(m.samples.len(), 2);
    }

    #[test]
    fn test_near_complementary_reduced_confidence() {
        // Distance 175° → deviation 5° → confidence 2/3
        let matches = classify(&hues(&[10.0, 195.0]));
        let m = find(&matches, HarmonyKind::Complementary).expect("complementary");
        assert!((m.deviation - 5.0).abs() < 1e-9);
        assert!(m.confidence < 1.0);
        assert!(m.confidence > 0.0);
    }

    #[test]
    fn test_out_of_tolerance_not_reported() {
        // Distance 160° → deviation 20° > tolerance
        let matches = classify(&hues(&[0.0, 160.0]));
        assert!(find(&matches, HarmonyKind::Complementary).is_none());
    }

    #[test]
    fn test_exact_triadic_full_confidence() {
        let matches = classify(&hues(&[0.0, 120.0, 240.0]));
        let m = find(&matches, HarmonyKind::Triadic).expect("triadic");
        assert_eq!(m.confidence, 1.0);
        assert_eq!(m.samples.len(), 3);
        // The 120° pairs are not complementary
        assert!(find(&matches, HarmonyKind::Complementary).is_none());
    }

    #[test]
    fn test_triadic_requires_mutual_consistency() {
        // 0/120 is an exact triadic pair, but the 0/190 and 120/190 legs
        // are far off 120°, so no mutually consistent triple exists
        let matches = classify(&hues(&[0.0, 120.0, 190.0]));
        assert!(find(&matches, HarmonyKind::Triadic).is_none());
    }

    #[test]
    fn test_split_complementary() {
        // Pivot 0°, partners at 150° and 210° (30° apart)
        let matches = classify(&hues(&[0.0, 150.0, 210.0]));
        let m = find(&matches, HarmonyKind::SplitComplementary).expect("split");
        assert_eq!(m.confidence, 1.0);
        assert_eq!(m.samples[0].degrees, 0.0); // pivot first
    }

    #[test]
    fn test_analogous_pair_near_ideal_step() {
        let matches = classify(&hues(&[100.0, 128.0]));
        let m = find(&matches, HarmonyKind::Analogous).expect("analogous");
        assert!((m.deviation - 2.0).abs() < 1e-9); // gap 28° vs ideal 30°
        assert!(m.confidence > 0.8);
    }

    #[test]
    fn test_analogous_run_of_three_bounded_by_span() {
        // Gaps of 20° keep the span at 40°, inside the 3×tolerance limit
        let matches = classify(&hues(&[100.0, 120.0, 140.0]));
        let m = find(&matches, HarmonyKind::Analogous).expect("analogous");
        assert_eq!(m.samples.len(), 3);
        assert!((m.deviation - 10.0).abs() < 1e-9);

        // Exact 30° steps over three hues span 60°, which exceeds the limit
        let matches = classify(&hues(&[100.0, 130.0, 160.0]));
        let wide = find(&matches, HarmonyKind::Analogous);
        assert!(wide.is_none() || wide.unwrap().samples.len() == 2);
    }

    #[test]
    fn test_monochromatic() {
        let matches = classify(&hues(&[100.0, 104.0, 110.0]));
        let m = find(&matches, HarmonyKind::Monochromatic).expect("monochromatic");
        assert!((m.deviation - 10.0).abs() < 1e-9);
        assert!(m.confidence > 0.0);
    }

    #[test]
    fn test_single_hue_is_monochromatic() {
        let matches = classify(&hues(&[42.0]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, HarmonyKind::Monochromatic);
        assert_eq!(matches[0].confidence, 1.0);
    }

    #[test]
    fn test_empty_input_yields_no_matches() {
        assert!(classify(&[]).is_empty());
    }

    #[test]
    fn test_ranking_confidence_then_priority() {
        // 0/180 complementary (conf 1.0) and 0/5/180 has no other exact match;
        // add a monochromatic pair at equal confidence to test the tie-break.
        let matches = classify(&hues(&[0.0, 180.0]));
        assert_eq!(matches[0].kind, HarmonyKind::Complementary);

        for pair in matches.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
            if (pair[0].confidence - pair[1].confidence).abs() < 1e-12 {
                assert!(pair[0].kind.priority() <= pair[1].kind.priority());
            }
        }
    }

    #[test]
    fn test_wraparound_complementary() {
        // 350° and 170° are 180° apart across the wrap
        let matches = classify(&hues(&[350.0, 170.0]));
        let m = find(&matches, HarmonyKind::Complementary).expect("complementary");
        assert_eq!(m.confidence, 1.0);
    }

    #[test]
    fn test_temperature_balance_counts() {
        let balance = temperature_balance(&hues(&[10.0, 30.0, 200.0, 80.0, 350.0]));
        assert_eq!(balance.warm, 3);
        assert_eq!(balance.cool, 1);
        assert_eq!(balance.transitional, 1);
    }
}
