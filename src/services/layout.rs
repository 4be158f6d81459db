use crate::models::{HorizontalAlign, Language, PlacementInstruction, Tier};
use crate::services::sampling::TierSamples;

#[cfg(test)]
use mockall::automock;

/// Fixed rectangular band one tier's titles are drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Renderer capability consumed by the center-alignment overflow case.
///
/// The drawing surface owns the real font metrics; the planner only needs an
/// estimate of how wide a line will come out.
#[cfg_attr(test, automock)]
pub trait TextMeasurer: Send + Sync {
    fn text_width(&self, text: &str) -> f32;
}

/// Width estimate from average glyph width at the poster font size
pub struct GlyphEstimateMeasurer {
    pub glyph_width: f32,
}

impl Default for GlyphEstimateMeasurer {
    fn default() -> Self {
        // 20px Verdana averages out near 11px per glyph
        Self { glyph_width: 11.0 }
    }
}

impl TextMeasurer for GlyphEstimateMeasurer {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.glyph_width
    }
}

/// The band a tier's titles land in; bands stack top to bottom in tier order
/// and never overlap.
pub fn tier_region(tier: Tier) -> TierRegion {
    const BAND_TOPS: [f32; 8] = [90.0, 230.0, 370.0, 510.0, 650.0, 790.0, 930.0, 1070.0];
    TierRegion {
        x: 0.0,
        y: BAND_TOPS[tier.index()],
        width: 1000.0,
        height: 100.0,
    }
}

/// Converts per-tier samples into ordered placement instructions.
///
/// Within a tier, sample indices 0-2 run down the left edge and 3-5 down the
/// right; anything past that is centered on the band using the renderer's
/// width estimate. Output preserves tier order, then sample order.
pub fn plan_layout(
    samples: &TierSamples,
    language: Language,
    measurer: &dyn TextMeasurer,
) -> Vec<PlacementInstruction> {
    let mut placements = Vec::new();

    for tier in Tier::ALL {
        let region = tier_region(tier);
        for (index, title) in samples[tier.index()].iter().enumerate() {
            let text = title.rendered_title(language).to_string();
            let placement = match index {
                0..=2 => PlacementInstruction {
                    x: region.x + 25.0,
                    y: region.y + 40.0 + index as f32 * 50.0,
                    align: HorizontalAlign::Left,
                    text,
                },
                3..=5 => PlacementInstruction {
                    x: region.x + region.width / 1.3,
                    y: region.y + 65.0 + (index as f32 - 3.0) * 50.0,
                    align: HorizontalAlign::Right,
                    text,
                },
                _ => PlacementInstruction {
                    x: region.x + region.width / 2.0 - measurer.text_width(&text) * 1.2,
                    y: region.y + 135.0,
                    align: HorizontalAlign::Center,
                    text,
                },
            };
            placements.push(placement);
        }
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WatchStatus, WatchedTitle};

    fn title(romaji: &str, english: &str) -> WatchedTitle {
        WatchedTitle {
            title_romaji: romaji.to_string(),
            title_english: english.to_string(),
            id: 1,
            rank: None,
            popularity: 10_000,
            release_year: 2010,
            average_score: 65.0,
            is_adult: false,
            status: WatchStatus::Completed,
            media_format: "TV".to_string(),
        }
    }

    fn samples_with(tier: Tier, titles: Vec<WatchedTitle>) -> TierSamples {
        let mut samples = TierSamples::default();
        samples[tier.index()] = titles;
        samples
    }

    #[test]
    fn test_regions_stack_without_overlap() {
        for pair in Tier::ALL.windows(2) {
            let upper = tier_region(pair[0]);
            let lower = tier_region(pair[1]);
            assert!(upper.y + upper.height <= lower.y);
        }
    }

    #[test]
    fn test_three_samples_left_aligned() {
        let samples = samples_with(
            Tier::Sky,
            vec![title("A", "A"), title("B", "B"), title("C", "C")],
        );
        let measurer = GlyphEstimateMeasurer::default();

        let placements = plan_layout(&samples, Language::Romaji, &measurer);

        // Sky band starts at y = 90
        assert_eq!(placements.len(), 3);
        let ys: Vec<f32> = placements.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![130.0, 180.0, 230.0]);
        for placement in &placements {
            assert_eq!(placement.align, HorizontalAlign::Left);
            assert_eq!(placement.x, 25.0);
        }
    }

    #[test]
    fn test_fourth_and_fifth_samples_right_aligned() {
        let samples = samples_with(
            Tier::High,
            (0..5).map(|i| title(&format!("T{}", i), "")).collect(),
        );
        let measurer = GlyphEstimateMeasurer::default();

        let placements = plan_layout(&samples, Language::Romaji, &measurer);

        assert_eq!(placements.len(), 5);
        let region = tier_region(Tier::High);
        for (offset, placement) in placements[3..].iter().enumerate() {
            assert_eq!(placement.align, HorizontalAlign::Right);
            assert_eq!(placement.x, region.width / 1.3);
            assert_eq!(placement.y, region.y + 65.0 + offset as f32 * 50.0);
        }
    }

    #[test]
    fn test_overflow_sample_centered_with_measured_width() {
        let samples = samples_with(
            Tier::Mid,
            (0..7).map(|i| title(&format!("T{}", i), "")).collect(),
        );

        let mut measurer = MockTextMeasurer::new();
        measurer.expect_text_width().return_const(100.0f32);

        let placements = plan_layout(&samples, Language::Romaji, &measurer);
        let overflow = &placements[6];

        let region = tier_region(Tier::Mid);
        assert_eq!(overflow.align, HorizontalAlign::Center);
        assert_eq!(overflow.y, region.y + 135.0);
        assert_eq!(overflow.x, region.width / 2.0 - 100.0 * 1.2);
    }

    #[test]
    fn test_language_preference_with_fallback() {
        let samples = samples_with(
            Tier::Sky,
            vec![title("Yuru Camp", "Laid-Back Camp"), title("Kaiba", "")],
        );
        let measurer = GlyphEstimateMeasurer::default();

        let placements = plan_layout(&samples, Language::English, &measurer);

        assert_eq!(placements[0].text, "Laid-Back Camp");
        // Preferred field empty, falls back to romaji
        assert_eq!(placements[1].text, "Kaiba");
    }

    #[test]
    fn test_tier_order_preserved() {
        let mut samples = TierSamples::default();
        samples[Tier::Abyss.index()] = vec![title("Deep Cut", "")];
        samples[Tier::Sky.index()] = vec![title("Crowd Pleaser", "")];
        let measurer = GlyphEstimateMeasurer::default();

        let placements = plan_layout(&samples, Language::Romaji, &measurer);

        assert_eq!(placements[0].text, "Crowd Pleaser");
        assert_eq!(placements[1].text, "Deep Cut");
    }

    #[test]
    fn test_empty_samples_produce_no_placements() {
        let measurer = GlyphEstimateMeasurer::default();
        assert!(plan_layout(&TierSamples::default(), Language::Romaji, &measurer).is_empty());
    }
}
