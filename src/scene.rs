//! # Scene Composer
//!
//! Lays out and paints the year-progress image: a `filled/total` header, a
//! `percent%` sub-header, one dot per day and the year as a footer.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────── width ────────────────┐
//! │            safe area (top)            │
//! │              60/365                   │  header
//! │              16.4%                    │  sub-header
//! │   ◉ ◉ ◉ ◉ ◉ ◉ ◉ ○ ○ ○ ○ ○ ○ ○ ○ ○     │
//! │   ○ ○ ○ ○ ○ ○ ○ ○ ○ ○ ○ ○ ○ ○ ○ ○     │  grid (centered in its area)
//! │   ○ ○ ○ ○ ○ ...                       │
//! │               2026                    │  footer
//! │           safe area (bottom)          │
//! └───────────────────────────────────────┘
//! ```
//!
//! Planning ([`plan_scene`]) is separate from painting ([`paint`]) so other
//! renderers can reuse the exact same geometry.

use serde::Serialize;

use crate::calendar::YearProgress;
use crate::error::{Result, YearDotsError};
use crate::layout::{GridConstraints, LayoutResult, solve_layout};
use crate::raster::font::{measure_text, text_height};
use crate::raster::{Canvas, Color};

/// Glyph units between characters.
pub const LETTER_SPACING: u32 = 2;

const BACKGROUND: Color = Color::BLACK;
const HEADER_COLOR: Color = Color::WHITE;
const SUBHEADER_COLOR: Color = Color::gray(220);
const FOOTER_COLOR: Color = Color::gray(153);
const DOT_COLOR: Color = Color::WHITE;

/// Grid shape policy keyed by output aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    /// Landscape, e.g. the 1200x630 Open Graph card
    Wide,
    /// 1:1 social post
    Square,
    /// Portrait, e.g. a 1080x1920 story
    Story,
}

impl LayoutVariant {
    pub fn for_size(width: u32, height: u32) -> Self {
        match width.cmp(&height) {
            std::cmp::Ordering::Greater => LayoutVariant::Wide,
            std::cmp::Ordering::Equal => LayoutVariant::Square,
            std::cmp::Ordering::Less => LayoutVariant::Story,
        }
    }

    /// Grid columns; narrower outputs get fewer, larger dots.
    pub fn columns(self) -> u32 {
        match self {
            LayoutVariant::Wide => 37,
            LayoutVariant::Square => 28,
            LayoutVariant::Story => 19,
        }
    }
}

/// Insets kept free of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafeArea {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl SafeArea {
    /// 8% of the shorter side everywhere; stories reserve extra room for
    /// the platform's top bar and bottom controls.
    pub fn for_variant(variant: LayoutVariant, width: u32, height: u32) -> Self {
        let pad = fraction(width.min(height), 0.08);
        match variant {
            LayoutVariant::Story => Self {
                top: pad.max(fraction(height, 0.135)),
                bottom: pad.max(fraction(height, 0.167)),
                left: pad,
                right: pad,
            },
            LayoutVariant::Wide | LayoutVariant::Square => Self {
                top: pad,
                bottom: pad,
                left: pad,
                right: pad,
            },
        }
    }
}

fn fraction(value: u32, ratio: f64) -> u32 {
    (f64::from(value) * ratio).round() as u32
}

/// Axis-aligned rectangle in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// A line of bitmap text with its resolved position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub x: u32,
    pub y: u32,
    pub scale: u32,
    pub color: Color,
}

impl TextBlock {
    pub fn width(&self) -> u32 {
        measure_text(&self.text, self.scale, LETTER_SPACING)
    }

    pub fn height(&self) -> u32 {
        text_height(self.scale)
    }
}

/// One day of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub index: u32,
    pub cx: u32,
    pub cy: u32,
    pub filled: bool,
}

/// Fully resolved geometry of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePlan {
    pub width: u32,
    pub height: u32,
    pub variant: LayoutVariant,
    pub safe_area: SafeArea,
    pub content: Rect,
    pub header: TextBlock,
    pub subheader: TextBlock,
    pub footer: TextBlock,
    /// Area the grid was solved for
    pub grid_area: Rect,
    /// Top-left of the drawn (centered) grid block
    pub grid_origin: (u32, u32),
    pub layout: LayoutResult,
    /// Outer radius of every dot ring
    pub dot_radius: u32,
    pub ring_thickness: u32,
    /// Radius of the disk painted inside rings of elapsed days
    pub fill_radius: u32,
    pub total: u32,
    pub filled: u32,
}

impl ScenePlan {
    /// Every day's dot, in reading order.
    pub fn dots(&self) -> impl Iterator<Item = Dot> + '_ {
        let half = self.layout.dot_diameter / 2;
        (0..self.total).map(move |index| {
            let (ox, oy) = self.layout.cell_offset(index);
            Dot {
                index,
                cx: self.grid_origin.0 + ox + half,
                cy: self.grid_origin.1 + oy + half,
                filled: index < self.filled,
            }
        })
    }
}

/// Largest scale `<= scale` at which `text` fits in `max_width`.
fn fit_scale(text: &str, scale: u32, max_width: u32) -> u32 {
    let units = measure_text(text, 1, LETTER_SPACING).max(1);
    scale.min(max_width / units).max(1)
}

fn centered_text(text: String, content: Rect, y: u32, scale: u32, color: Color) -> TextBlock {
    let width = measure_text(&text, scale, LETTER_SPACING);
    TextBlock {
        x: content.x + content.width.saturating_sub(width) / 2,
        y,
        scale,
        color,
        text,
    }
}

/// Resolve all geometry for a `width x height` image of `progress`.
pub fn plan_scene(
    width: u32,
    height: u32,
    progress: &YearProgress,
    variant: LayoutVariant,
) -> Result<ScenePlan> {
    if width == 0 || height == 0 {
        return Err(YearDotsError::Geometry(format!(
            "output must be at least 1x1, got {}x{}",
            width, height
        )));
    }
    let safe_area = SafeArea::for_variant(variant, width, height);
    if safe_area.left + safe_area.right >= width || safe_area.top + safe_area.bottom >= height {
        return Err(YearDotsError::Geometry(format!(
            "output {}x{} leaves no content area",
            width, height
        )));
    }
    let content = Rect {
        x: safe_area.left,
        y: safe_area.top,
        width: width - safe_area.left - safe_area.right,
        height: height - safe_area.top - safe_area.bottom,
    };

    // Typography
    let header_text = progress.fraction_text();
    let subheader_text = progress.percent_text();
    let footer_text = progress.year.to_string();

    let header_scale = fit_scale(
        &header_text,
        (content.width.min(content.height) / 60).max(8),
        content.width,
    );
    let subheader_scale = fit_scale(&subheader_text, (header_scale * 7 / 10).max(6), content.width);
    let footer_scale = fit_scale(&footer_text, (header_scale / 2).max(4), content.width);

    let header_y = content.y;
    let subheader_y = header_y + text_height(header_scale) + header_scale;
    let text_bottom = subheader_y + text_height(subheader_scale);
    let footer_y = i64::from(content.bottom()) - i64::from(text_height(footer_scale));

    // Grid area between the text blocks
    let section_gap = i64::from(header_scale * 2);
    let grid_top = i64::from(text_bottom) + section_gap;
    let grid_bottom = footer_y - section_gap;
    if grid_bottom <= grid_top || footer_y < i64::from(content.y) {
        return Err(YearDotsError::Geometry(format!(
            "output {}x{} has no room for the dot grid below the header",
            width, height
        )));
    }
    let grid_area = Rect {
        x: content.x,
        y: grid_top as u32,
        width: content.width,
        height: (grid_bottom - grid_top) as u32,
    };

    let constraints = GridConstraints::with_columns(variant.columns());
    let layout = solve_layout(progress.total, grid_area.width, grid_area.height, &constraints)?;
    let grid_origin = (
        grid_area.x + (grid_area.width - layout.drawn_width()) / 2,
        grid_area.y + (grid_area.height - layout.drawn_height()) / 2,
    );

    let dot = layout.dot_diameter;
    let dot_radius = (dot - 1) / 2;
    let ring_thickness = ((f64::from(dot) * 0.12).round() as u32).clamp(2, 6);

    Ok(ScenePlan {
        width,
        height,
        variant,
        safe_area,
        content,
        header: centered_text(header_text, content, header_y, header_scale, HEADER_COLOR),
        subheader: centered_text(
            subheader_text,
            content,
            subheader_y,
            subheader_scale,
            SUBHEADER_COLOR,
        ),
        footer: centered_text(footer_text, content, footer_y as u32, footer_scale, FOOTER_COLOR),
        grid_area,
        grid_origin,
        layout,
        dot_radius,
        ring_thickness,
        fill_radius: dot_radius.saturating_sub(ring_thickness),
        total: progress.total,
        filled: progress.filled.min(progress.total),
    })
}

/// Paint a resolved plan onto a fresh canvas.
pub fn paint(plan: &ScenePlan) -> Result<Canvas> {
    let mut canvas = Canvas::new(plan.width as usize, plan.height as usize)?;
    canvas.clear(BACKGROUND);

    for block in [&plan.header, &plan.subheader, &plan.footer] {
        canvas.draw_text(
            &block.text,
            block.x as i32,
            block.y as i32,
            block.scale,
            block.color,
            LETTER_SPACING,
        );
    }

    let radius = plan.dot_radius as i32;
    let thickness = plan.ring_thickness as i32;
    for dot in plan.dots() {
        let (cx, cy) = (dot.cx as i32, dot.cy as i32);
        canvas.draw_ring(cx, cy, radius, thickness, DOT_COLOR);
        if dot.filled {
            canvas.fill_circle(cx, cy, plan.fill_radius as i32, DOT_COLOR);
        }
    }

    Ok(canvas)
}

/// Lay out and paint a `width x height` image of `progress`.
pub fn render_scene(
    width: u32,
    height: u32,
    progress: &YearProgress,
    variant: LayoutVariant,
) -> Result<Canvas> {
    let plan = plan_scene(width, height, progress, variant)?;
    paint(&plan)
}
