//! Palette generation: mode-specific hue selection over configured HSL ranges.
//!
//! [`generate`] builds a palette position by position. Locked positions that
//! exist in the previous palette are copied unchanged; every other position
//! gets a fresh color whose hue depends on the [`GenerationMode`] and whose
//! saturation and lightness are uniform draws from their ranges.

use crate::color::Color;
use crate::error::PaletteError;
use crate::palette::{LockSet, Palette};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All recognized mode names, in display order.
const MODE_NAMES: &[&str] = &["random", "harmonious", "analogous", "gradient"];

/// Complementary, triadic and hexadic offsets used by harmonious mode.
const HARMONY_OFFSETS: [i32; 6] = [0, 180, 120, 240, 60, 300];

/// Maximum hue drift either side of the base hue in analogous mode.
const ANALOGOUS_SPREAD: i32 = 30;

/// How a fresh hue is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Uniform over the hue range.
    #[default]
    Random,
    /// Base hue plus a complementary/triadic/hexadic offset.
    Harmonious,
    /// Base hue plus up to ±30°.
    Analogous,
    /// Steps a tenth of the hue range past the previous color.
    Gradient,
}

impl GenerationMode {
    /// Looks a mode up by its lowercase name.
    pub fn from_name(name: &str) -> Result<Self, PaletteError> {
        match name {
            "random" => Ok(GenerationMode::Random),
            "harmonious" => Ok(GenerationMode::Harmonious),
            "analogous" => Ok(GenerationMode::Analogous),
            "gradient" => Ok(GenerationMode::Gradient),
            _ => Err(PaletteError::UnknownMode(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GenerationMode::Random => "random",
            GenerationMode::Harmonious => "harmonious",
            GenerationMode::Analogous => "analogous",
            GenerationMode::Gradient => "gradient",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        MODE_NAMES
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GenerationMode {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Inclusive HSL bounds for generated colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HslRanges {
    pub hue_min: u16,
    pub hue_max: u16,
    pub sat_min: u8,
    pub sat_max: u8,
    pub light_min: u8,
    pub light_max: u8,
}

impl Default for HslRanges {
    fn default() -> Self {
        Self {
            hue_min: 0,
            hue_max: 360,
            sat_min: 30,
            sat_max: 90,
            light_min: 40,
            light_max: 80,
        }
    }
}

impl HslRanges {
    pub const MAX_HUE: u16 = 360;
    pub const MAX_PERCENT: u8 = 100;

    /// Checks every `min <= max` and every bound against its channel limit.
    pub fn validate(&self) -> Result<(), PaletteError> {
        let channels = [
            ("hue", self.hue_min, self.hue_max, Self::MAX_HUE),
            (
                "saturation",
                self.sat_min.into(),
                self.sat_max.into(),
                Self::MAX_PERCENT.into(),
            ),
            (
                "lightness",
                self.light_min.into(),
                self.light_max.into(),
                Self::MAX_PERCENT.into(),
            ),
        ];
        for (channel, min, max, limit) in channels {
            if min > max || max > limit {
                return Err(PaletteError::InvalidRange { channel, min, max });
            }
        }
        Ok(())
    }

    /// Raises each max to its min where the two are inverted.
    pub fn normalized(self) -> Self {
        Self {
            hue_max: self.hue_max.max(self.hue_min),
            sat_max: self.sat_max.max(self.sat_min),
            light_max: self.light_max.max(self.light_min),
            ..self
        }
    }
}

/// Generates a palette of exactly `count` colors.
///
/// Position `i` is copied from `previous` when `i` is locked and `previous`
/// has a color there. Gradient mode steps every new color from the hue of
/// the last color of `previous`, and draws a random hue when there is none.
///
/// Fails with `InvalidCount` for `count == 0` and `InvalidRange` when
/// `ranges` does not validate.
pub fn generate<R: RandomSource + ?Sized>(
    count: usize,
    mode: GenerationMode,
    ranges: &HslRanges,
    previous: Option<&Palette>,
    locked: &LockSet,
    rng: &mut R,
) -> Result<Palette, PaletteError> {
    if count == 0 {
        return Err(PaletteError::InvalidCount(count));
    }
    ranges.validate()?;

    let mut colors: Vec<Color> = Vec::with_capacity(count);
    for i in 0..count {
        let kept = previous
            .filter(|_| locked.contains(i))
            .and_then(|p| p.get(i))
            .cloned();
        let color = match kept {
            Some(color) => color,
            None => {
                synthesize(mode, ranges, previous.and_then(Palette::last), rng)
            }
        };
        colors.push(color);
    }

    log::debug!(
        "generated {count} colors in {mode} mode ({} locked)",
        locked.iter().filter(|&i| i < count).count()
    );
    Ok(Palette::new(colors))
}

fn synthesize<R: RandomSource + ?Sized>(
    mode: GenerationMode,
    ranges: &HslRanges,
    anchor: Option<&Color>,
    rng: &mut R,
) -> Color {
    let hue = match (mode, anchor) {
        (GenerationMode::Random, _) | (GenerationMode::Gradient, None) => random_hue(ranges, rng),
        (GenerationMode::Harmonious, _) => {
            let base = random_hue(ranges, rng);
            let pick = rng.between(0, HARMONY_OFFSETS.len() as i32 - 1);
            let offset = HARMONY_OFFSETS[pick.rem_euclid(HARMONY_OFFSETS.len() as i32) as usize];
            (base + offset).rem_euclid(360)
        }
        (GenerationMode::Analogous, _) => {
            let base = random_hue(ranges, rng);
            (base + rng.between(-ANALOGOUS_SPREAD, ANALOGOUS_SPREAD)).rem_euclid(360)
        }
        (GenerationMode::Gradient, Some(last)) => gradient_hue(last.hue(), ranges),
    };
    let saturation = rng.between(ranges.sat_min.into(), ranges.sat_max.into());
    let lightness = rng.between(ranges.light_min.into(), ranges.light_max.into());

    Color::from_hsl(
        hue.clamp(0, i32::from(HslRanges::MAX_HUE)) as u16,
        saturation.clamp(0, i32::from(HslRanges::MAX_PERCENT)) as u8,
        lightness.clamp(0, i32::from(HslRanges::MAX_PERCENT)) as u8,
    )
}

fn random_hue<R: RandomSource + ?Sized>(ranges: &HslRanges, rng: &mut R) -> i32 {
    rng.between(ranges.hue_min.into(), ranges.hue_max.into())
}

/// Advances `last` by a tenth of the hue span, wrapping inside
/// `[hue_min, hue_max)`. A zero-width range pins the hue to `hue_min`.
fn gradient_hue(last: u16, ranges: &HslRanges) -> i32 {
    let min = f64::from(ranges.hue_min);
    let span = f64::from(ranges.hue_max) - min;
    if span <= 0.0 {
        return ranges.hue_min.into();
    }
    let step = span / 10.0;
    let offset = (f64::from(last) - min + step).rem_euclid(span);
    (min + offset).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Xorshift64;
    use std::collections::VecDeque;

    /// Replays queued values, clamped into the requested range; an empty
    /// queue answers `min`.
    struct Scripted(VecDeque<i32>);

    impl Scripted {
        fn new(values: &[i32]) -> Self {
            Self(values.iter().copied().collect())
        }
    }

    impl RandomSource for Scripted {
        fn between(&mut self, min: i32, max: i32) -> i32 {
            self.0.pop_front().map_or(min, |v| v.clamp(min, max))
        }
    }

    fn hues(p: &Palette) -> Vec<u16> {
        p.iter().map(Color::hue).collect()
    }

    fn no_locks() -> LockSet {
        LockSet::new()
    }

    // -- GenerationMode --

    #[test]
    fn mode_names_round_trip() {
        for name in GenerationMode::list_names() {
            assert_eq!(GenerationMode::from_name(name).unwrap().name(), *name);
        }
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(matches!(
            GenerationMode::from_name("spiral"),
            Err(PaletteError::UnknownMode(_))
        ));
    }

    #[test]
    fn mode_serializes_lowercase() {
        let json = serde_json::to_string(&GenerationMode::Harmonious).unwrap();
        assert_eq!(json, "\"harmonious\"");
    }

    // -- HslRanges --

    #[test]
    fn default_ranges_validate() {
        assert!(HslRanges::default().validate().is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let ranges = HslRanges {
            sat_min: 90,
            sat_max: 30,
            ..HslRanges::default()
        };
        assert!(matches!(
            ranges.validate(),
            Err(PaletteError::InvalidRange {
                channel: "saturation",
                ..
            })
        ));
    }

    #[test]
    fn bounds_past_channel_limit_are_rejected() {
        let hue = HslRanges {
            hue_max: 361,
            ..HslRanges::default()
        };
        let light = HslRanges {
            light_max: 101,
            ..HslRanges::default()
        };
        assert!(hue.validate().is_err());
        assert!(light.validate().is_err());
    }

    #[test]
    fn normalized_raises_max_to_min() {
        let ranges = HslRanges {
            hue_min: 200,
            hue_max: 100,
            sat_min: 50,
            sat_max: 40,
            light_min: 10,
            light_max: 90,
        }
        .normalized();
        assert_eq!(ranges.hue_max, 200);
        assert_eq!(ranges.sat_max, 50);
        assert_eq!(ranges.light_max, 90);
        assert!(ranges.validate().is_ok());
    }

    #[test]
    fn ranges_deserialize_camel_case_with_defaults() {
        let ranges: HslRanges = serde_json::from_str(r#"{"hueMin": 90, "hueMax": 180}"#).unwrap();
        assert_eq!(ranges.hue_min, 90);
        assert_eq!(ranges.hue_max, 180);
        assert_eq!(ranges.sat_min, 30);
        assert_eq!(ranges.light_max, 80);
    }

    // -- generate --

    #[test]
    fn random_scenario_five_colors_within_ranges() {
        let ranges = HslRanges::default();
        let mut rng = Xorshift64::new(42);
        let p = generate(5, GenerationMode::Random, &ranges, None, &no_locks(), &mut rng).unwrap();
        assert_eq!(p.len(), 5);
        for c in &p {
            assert!(c.hue() <= 360);
            assert!((30..=90).contains(&c.saturation()), "sat {}", c.saturation());
            assert!((40..=80).contains(&c.lightness()), "light {}", c.lightness());
            let digits = c.hex().digits();
            assert_eq!(digits.len(), 6);
            assert!(digits.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut rng = Xorshift64::new(1);
        let result = generate(0, GenerationMode::Random, &HslRanges::default(), None, &no_locks(), &mut rng);
        assert!(matches!(result, Err(PaletteError::InvalidCount(0))));
    }

    #[test]
    fn invalid_ranges_are_rejected_before_drawing() {
        let ranges = HslRanges {
            hue_min: 300,
            hue_max: 10,
            ..HslRanges::default()
        };
        let mut rng = Xorshift64::new(1);
        let result = generate(3, GenerationMode::Random, &ranges, None, &no_locks(), &mut rng);
        assert!(matches!(result, Err(PaletteError::InvalidRange { channel: "hue", .. })));
    }

    #[test]
    fn locked_position_is_copied_unchanged() {
        let previous = Palette::new(vec![
            Color::from_hsl(10, 40, 50),
            Color::from_hsl(77, 33, 44),
            Color::from_hsl(300, 60, 70),
        ]);
        let locks: LockSet = [1].into_iter().collect();
        let mut rng = Xorshift64::new(9);
        let p = generate(
            3,
            GenerationMode::Random,
            &HslRanges::default(),
            Some(&previous),
            &locks,
            &mut rng,
        )
        .unwrap();
        assert_eq!(p.get(1), previous.get(1));
    }

    #[test]
    fn locked_color_survives_even_outside_current_ranges() {
        let previous = Palette::new(vec![Color::from_hsl(0, 5, 5)]);
        let locks: LockSet = [0].into_iter().collect();
        let mut rng = Xorshift64::new(3);
        let p = generate(2, GenerationMode::Random, &HslRanges::default(), Some(&previous), &locks, &mut rng)
            .unwrap();
        assert_eq!(p.first(), previous.first());
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn lock_without_previous_color_synthesizes() {
        let previous = Palette::new(vec![Color::from_hsl(10, 40, 50)]);
        let locks: LockSet = [3].into_iter().collect();
        let mut rng = Scripted::new(&[100, 50, 50, 200, 50, 50, 250, 50, 50, 300, 50, 50]);
        let p = generate(4, GenerationMode::Random, &HslRanges::default(), Some(&previous), &locks, &mut rng)
            .unwrap();
        assert_eq!(hues(&p), vec![100, 200, 250, 300]);
    }

    #[test]
    fn harmonious_adds_offset_and_wraps() {
        // base 350, offset index 1 (180°)
        let mut rng = Scripted::new(&[350, 1, 50, 50]);
        let p = generate(1, GenerationMode::Harmonious, &HslRanges::default(), None, &no_locks(), &mut rng)
            .unwrap();
        assert_eq!(hues(&p), vec![170]);
    }

    #[test]
    fn harmonious_zero_offset_keeps_base() {
        let mut rng = Scripted::new(&[42, 0, 50, 50]);
        let p = generate(1, GenerationMode::Harmonious, &HslRanges::default(), None, &no_locks(), &mut rng)
            .unwrap();
        assert_eq!(hues(&p), vec![42]);
    }

    #[test]
    fn analogous_negative_offset_wraps_into_range() {
        let mut rng = Scripted::new(&[10, -30, 50, 50]);
        let p = generate(1, GenerationMode::Analogous, &HslRanges::default(), None, &no_locks(), &mut rng)
            .unwrap();
        assert_eq!(hues(&p), vec![340]);
    }

    #[test]
    fn gradient_without_anchor_draws_random_hue() {
        let mut rng = Scripted::new(&[200, 50, 50]);
        let p = generate(1, GenerationMode::Gradient, &HslRanges::default(), None, &no_locks(), &mut rng)
            .unwrap();
        assert_eq!(hues(&p), vec![200]);
    }

    #[test]
    fn gradient_continues_from_previous_palette_and_wraps() {
        let previous = Palette::new(vec![Color::from_hsl(0, 50, 50), Color::from_hsl(350, 50, 50)]);
        let mut rng = Scripted::new(&[]);
        let p = generate(
            3,
            GenerationMode::Gradient,
            &HslRanges::default(),
            Some(&previous),
            &no_locks(),
            &mut rng,
        )
        .unwrap();
        // (350 + 36) mod 360 = 26 for every position
        assert_eq!(hues(&p), vec![26, 26, 26]);
    }

    #[test]
    fn gradient_without_previous_draws_each_hue_independently() {
        let mut rng = Scripted::new(&[0, 50, 50, 90, 50, 50, 180, 50, 50, 270, 50, 50]);
        let p = generate(4, GenerationMode::Gradient, &HslRanges::default(), None, &no_locks(), &mut rng)
            .unwrap();
        assert_eq!(hues(&p), vec![0, 90, 180, 270]);
    }

    #[test]
    fn gradient_stays_inside_offset_hue_range() {
        let ranges = HslRanges {
            hue_min: 100,
            hue_max: 200,
            ..HslRanges::default()
        };
        let previous = Palette::new(vec![Color::from_hsl(195, 50, 50)]);
        let mut rng = Scripted::new(&[]);
        let p = generate(3, GenerationMode::Gradient, &ranges, Some(&previous), &no_locks(), &mut rng)
            .unwrap();
        assert_eq!(hues(&p), vec![105, 105, 105]);
    }

    #[test]
    fn gradient_zero_width_range_pins_hue() {
        let ranges = HslRanges {
            hue_min: 45,
            hue_max: 45,
            ..HslRanges::default()
        };
        let previous = Palette::new(vec![Color::from_hsl(300, 50, 50)]);
        let mut rng = Xorshift64::new(4);
        let p = generate(3, GenerationMode::Gradient, &ranges, Some(&previous), &no_locks(), &mut rng)
            .unwrap();
        assert_eq!(hues(&p), vec![45, 45, 45]);
    }

    #[test]
    fn same_seed_same_palette() {
        let ranges = HslRanges::default();
        let mut a = Xorshift64::new(77);
        let mut b = Xorshift64::new(77);
        for mode in [
            GenerationMode::Random,
            GenerationMode::Harmonious,
            GenerationMode::Analogous,
            GenerationMode::Gradient,
        ] {
            let pa = generate(6, mode, &ranges, None, &no_locks(), &mut a).unwrap();
            let pb = generate(6, mode, &ranges, None, &no_locks(), &mut b).unwrap();
            assert_eq!(pa, pb, "mode {mode}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn mode() -> impl Strategy<Value = GenerationMode> {
            prop_oneof![
                Just(GenerationMode::Random),
                Just(GenerationMode::Harmonious),
                Just(GenerationMode::Analogous),
                Just(GenerationMode::Gradient),
            ]
        }

        proptest! {
            #[test]
            fn generated_colors_respect_sat_light_ranges_and_count(
                seed: u64,
                count in 1_usize..12,
                mode in mode(),
                sat in (0_u8..=100, 0_u8..=100),
                light in (0_u8..=100, 0_u8..=100),
            ) {
                let ranges = HslRanges {
                    sat_min: sat.0.min(sat.1),
                    sat_max: sat.0.max(sat.1),
                    light_min: light.0.min(light.1),
                    light_max: light.0.max(light.1),
                    ..HslRanges::default()
                };
                let mut rng = Xorshift64::new(seed);
                let p = generate(count, mode, &ranges, None, &LockSet::new(), &mut rng).unwrap();
                prop_assert_eq!(p.len(), count);
                for c in &p {
                    prop_assert!(c.hue() < 360);
                    prop_assert!((ranges.sat_min..=ranges.sat_max).contains(&c.saturation()));
                    prop_assert!((ranges.light_min..=ranges.light_max).contains(&c.lightness()));
                }
            }

            #[test]
            fn locked_positions_always_match_previous(
                seed: u64,
                mode in mode(),
                lock in 0_usize..5,
            ) {
                let mut rng = Xorshift64::new(seed);
                let ranges = HslRanges::default();
                let previous = generate(5, mode, &ranges, None, &LockSet::new(), &mut rng).unwrap();
                let locks: LockSet = [lock].into_iter().collect();
                let next = generate(5, mode, &ranges, Some(&previous), &locks, &mut rng).unwrap();
                prop_assert_eq!(next.get(lock), previous.get(lock));
            }
        }
    }
}
