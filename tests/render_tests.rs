//! # Render Tests
//!
//! End-to-end checks from a fixed instant to decoded image bytes.
//!
//! ## Test Coverage
//!
//! - **Calendar → plan**: day counts for fixed instants and zones
//! - **Plan geometry**: every day gets exactly one non-overlapping dot inside
//!   the content area, for each preset
//! - **Pixels**: rings for all days, solid centers for elapsed days only
//! - **Encoding**: PNG decodes to the exact canvas, JPEG decodes to the
//!   right size

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use yeardots::calendar::{YearProgress, compute_year_progress};
use yeardots::encode::{OutputFormat, encode_png};
use yeardots::raster::Color;
use yeardots::render::{Preset, RenderOptions, render_preset};
use yeardots::scene::{Dot, LayoutVariant, ScenePlan, paint, plan_scene, render_scene};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn march_first_2023() -> YearProgress {
    let now = Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap();
    compute_year_progress(now, Some("UTC")).unwrap()
}

fn plan_for(preset: Preset, progress: &YearProgress) -> ScenePlan {
    let (width, height) = preset.dimensions();
    plan_scene(width, height, progress, preset.variant()).unwrap()
}

/// Assert the dot boxes are pairwise disjoint and inside the content area.
fn assert_dots_well_placed(plan: &ScenePlan) {
    let r = plan.dot_radius;
    let dots: Vec<Dot> = plan.dots().collect();
    assert_eq!(dots.len() as u32, plan.total);

    for dot in &dots {
        assert!(dot.cx - r >= plan.content.x, "dot {} left of content", dot.index);
        assert!(dot.cx + r < plan.content.right(), "dot {} right of content", dot.index);
        assert!(dot.cy - r >= plan.grid_area.y, "dot {} above grid", dot.index);
        assert!(dot.cy + r < plan.grid_area.bottom(), "dot {} below grid", dot.index);
    }

    for (i, a) in dots.iter().enumerate() {
        for b in &dots[i + 1..] {
            let apart_x = a.cx.abs_diff(b.cx) > 2 * r;
            let apart_y = a.cy.abs_diff(b.cy) > 2 * r;
            assert!(apart_x || apart_y, "dots {} and {} overlap", a.index, b.index);
        }
    }
}

// ============================================================================
// CALENDAR TO PLAN
// ============================================================================

#[test]
fn test_march_first_non_leap() {
    let progress = march_first_2023();
    assert_eq!(
        progress,
        YearProgress {
            year: 2023,
            total: 365,
            filled: 60,
            percent: "16.4".to_string(),
        }
    );
}

#[test]
fn test_zone_changes_rendered_header() {
    let now = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();
    let auckland = compute_year_progress(now, Some("Pacific/Auckland")).unwrap();
    let plan = plan_for(Preset::Square, &auckland);
    assert_eq!(plan.header.text, "1/365");
    assert_eq!(plan.footer.text, "2025");
}

#[test]
fn test_square_plan_has_365_dots() {
    let plan = plan_for(Preset::Square, &march_first_2023());
    assert_eq!(plan.variant, LayoutVariant::Square);
    assert_dots_well_placed(&plan);
    assert_eq!(plan.dots().filter(|d| d.filled).count(), 60);
}

#[test]
fn test_all_presets_well_placed() {
    let leap_end = YearProgress::for_date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    for preset in [Preset::Square, Preset::Story, Preset::Og] {
        assert_dots_well_placed(&plan_for(preset, &leap_end));
    }
    assert_dots_well_placed(&plan_for(Preset::Custom { width: 800, height: 1000 }, &leap_end));
}

#[test]
fn test_story_uses_fewer_columns() {
    let progress = march_first_2023();
    let story = plan_for(Preset::Story, &progress);
    let og = plan_for(Preset::Og, &progress);
    assert_eq!(story.layout.columns, 19);
    assert_eq!(og.layout.columns, 37);
    assert!(story.layout.dot_diameter > og.layout.dot_diameter);
}

// ============================================================================
// PIXELS
// ============================================================================

#[test]
fn test_every_day_has_a_ring() {
    let plan = plan_for(Preset::Square, &march_first_2023());
    let canvas = paint(&plan).unwrap();
    let r = plan.dot_radius as i32;

    for dot in plan.dots() {
        let (cx, cy) = (dot.cx as i32, dot.cy as i32);
        for (x, y) in [(cx + r, cy), (cx - r, cy), (cx, cy + r), (cx, cy - r)] {
            assert_eq!(canvas.pixel(x, y), Some(Color::WHITE), "ring of day {}", dot.index);
        }
        let center = if dot.filled { Color::WHITE } else { Color::BLACK };
        assert_eq!(canvas.pixel(cx, cy), Some(center), "center of day {}", dot.index);
    }
}

#[test]
fn test_corners_stay_background() {
    let canvas = render_scene(1080, 1920, &march_first_2023(), LayoutVariant::Story).unwrap();
    for (x, y) in [(0, 0), (1079, 0), (0, 1919), (1079, 1919)] {
        assert_eq!(canvas.pixel(x, y), Some(Color::BLACK));
    }
}

// ============================================================================
// ENCODING
// ============================================================================

#[test]
fn test_png_round_trip_of_scene() {
    let canvas = render_scene(1200, 630, &march_first_2023(), LayoutVariant::Wide).unwrap();
    let png = encode_png(&canvas).unwrap();
    let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (1200, 630));
    assert!(decoded.as_raw().as_slice() == canvas.pixels());
}

#[test]
fn test_jpeg_story() {
    let options = RenderOptions {
        format: OutputFormat::Jpeg,
        quality: 80,
    };
    let jpeg = render_preset(Preset::Story, &march_first_2023(), &options).unwrap();
    let decoded = image::load_from_memory_with_format(&jpeg, image::ImageFormat::Jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1080, 1920));
}

#[test]
fn test_render_is_deterministic() {
    let progress = march_first_2023();
    let options = RenderOptions::default();
    let a = render_preset(Preset::Og, &progress, &options).unwrap();
    let b = render_preset(Preset::Og, &progress, &options).unwrap();
    assert!(a == b);
}
