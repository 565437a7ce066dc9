//! # Grid Layout Solver
//!
//! Fits `N` equally sized dots into a content rectangle with a fixed column
//! count.
//!
//! ## Formula
//!
//! ```text
//! rows    = ceil(N / cols)
//! by_w    = width  / (cols + (cols - 1) * gap_ratio)
//! by_h    = height / (rows + (rows - 1) * gap_ratio)
//! dot     = floor(min(by_w, by_h))
//! gap     = floor(dot * gap_ratio)
//! dot,gap = clamp(dot, min_dot, max_dot), clamp(gap, min_gap, max_gap)
//! ```
//!
//! The max clamps keep dots legible on very large canvases; the drawn block
//! is then smaller than the rectangle and callers center it with
//! `(rect - drawn) / 2` on both axes. If the min clamps would push the block
//! past the rectangle the solve fails instead of overflowing.

use serde::Serialize;

use crate::error::{Result, YearDotsError};

/// Column count plus size/gap bounds for one grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridConstraints {
    pub columns: u32,
    /// Gap as a fraction of the dot diameter. Default: 0.32
    pub gap_ratio: f64,
    /// Default: 12
    pub min_dot: u32,
    /// Default: 64
    pub max_dot: u32,
    /// Default: 3
    pub min_gap: u32,
    /// Default: 28
    pub max_gap: u32,
}

impl GridConstraints {
    /// Default bounds for `columns` columns.
    pub const fn with_columns(columns: u32) -> Self {
        Self {
            columns,
            gap_ratio: 0.32,
            min_dot: 12,
            max_dot: 64,
            min_gap: 3,
            max_gap: 28,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(YearDotsError::Geometry("grid needs at least one column".into()));
        }
        if !self.gap_ratio.is_finite() || self.gap_ratio < 0.0 {
            return Err(YearDotsError::Geometry(format!(
                "gap ratio must be a non-negative number, got {}",
                self.gap_ratio
            )));
        }
        if self.min_dot == 0 || self.min_dot > self.max_dot {
            return Err(YearDotsError::Geometry(format!(
                "invalid dot bounds [{}, {}]",
                self.min_dot, self.max_dot
            )));
        }
        if self.min_gap > self.max_gap {
            return Err(YearDotsError::Geometry(format!(
                "invalid gap bounds [{}, {}]",
                self.min_gap, self.max_gap
            )));
        }
        Ok(())
    }
}

/// Solved grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutResult {
    pub columns: u32,
    pub rows: u32,
    pub dot_diameter: u32,
    pub gap: u32,
}

impl LayoutResult {
    /// Distance between the origins of neighbouring cells.
    pub fn pitch(&self) -> u32 {
        self.dot_diameter + self.gap
    }

    pub fn drawn_width(&self) -> u32 {
        span(self.columns, self.dot_diameter, self.gap)
    }

    pub fn drawn_height(&self) -> u32 {
        span(self.rows, self.dot_diameter, self.gap)
    }

    /// Top-left corner of cell `index`, relative to the grid origin.
    pub fn cell_offset(&self, index: u32) -> (u32, u32) {
        let row = index / self.columns;
        let col = index % self.columns;
        (col * self.pitch(), row * self.pitch())
    }
}

fn span(count: u32, dot: u32, gap: u32) -> u32 {
    count * dot + count.saturating_sub(1) * gap
}

/// Solve dot diameter and gap for `total_dots` dots in a
/// `content_width x content_height` rectangle.
pub fn solve_layout(
    total_dots: u32,
    content_width: u32,
    content_height: u32,
    constraints: &GridConstraints,
) -> Result<LayoutResult> {
    constraints.validate()?;
    if total_dots == 0 {
        return Err(YearDotsError::Geometry("grid needs at least one dot".into()));
    }
    if content_width == 0 || content_height == 0 {
        return Err(YearDotsError::Geometry(format!(
            "content area {}x{} is empty",
            content_width, content_height
        )));
    }

    let columns = constraints.columns;
    let rows = total_dots.div_ceil(columns);
    let ratio = constraints.gap_ratio;

    let fit = |length: u32, count: u32| {
        f64::from(length) / (f64::from(count) + f64::from(count - 1) * ratio)
    };
    let dot = fit(content_width, columns)
        .min(fit(content_height, rows))
        .floor();
    let gap = (dot * ratio).floor();

    let dot_diameter = (dot as u32).clamp(constraints.min_dot, constraints.max_dot);
    let gap = (gap as u32).clamp(constraints.min_gap, constraints.max_gap);

    let layout = LayoutResult {
        columns,
        rows,
        dot_diameter,
        gap,
    };

    if layout.drawn_width() > content_width || layout.drawn_height() > content_height {
        return Err(YearDotsError::Geometry(format!(
            "{} dots in {} columns need at least {}x{}, content area is {}x{}",
            total_dots,
            columns,
            layout.drawn_width(),
            layout.drawn_height(),
            content_width,
            content_height
        )));
    }

    tracing::debug!(
        total_dots,
        columns,
        rows,
        dot = dot_diameter,
        gap,
        "solved grid layout"
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_square_grid() {
        let layout = solve_layout(365, 908, 609, &GridConstraints::with_columns(28)).unwrap();
        assert_eq!(
            layout,
            LayoutResult {
                columns: 28,
                rows: 14,
                dot_diameter: 24,
                gap: 7,
            }
        );
        assert_eq!(layout.drawn_width(), 861);
        assert_eq!(layout.drawn_height(), 427);
    }

    #[test]
    fn test_rows_round_up() {
        let layout = solve_layout(366, 2000, 2000, &GridConstraints::with_columns(19)).unwrap();
        assert_eq!(layout.rows, 20);
        let layout = solve_layout(361, 2000, 2000, &GridConstraints::with_columns(19)).unwrap();
        assert_eq!(layout.rows, 19);
    }

    #[test]
    fn test_fits_and_respects_bounds() {
        // Under the min clamps the widest block is 552 (37 columns) and the
        // tallest 297 (20 rows of 19), so every size below must solve.
        let constraints_list = [19, 28, 37].map(GridConstraints::with_columns);
        let mut solved = 0;
        for constraints in &constraints_list {
            for total in [365, 366] {
                for width in (600..=2400).step_by(150) {
                    for height in (400..=2400).step_by(200) {
                        let layout = solve_layout(total, width, height, constraints)
                            .unwrap_or_else(|e| panic!("{}x{}: {}", width, height, e));
                        solved += 1;
                        assert!(layout.drawn_width() <= width);
                        assert!(layout.drawn_height() <= height);
                        assert!((12..=64).contains(&layout.dot_diameter));
                        assert!((3..=28).contains(&layout.gap));
                        assert!(layout.columns * layout.rows >= total);
                    }
                }
            }
        }
        // 3 column counts x 2 totals x 13 widths x 11 heights
        assert_eq!(solved, 858);
    }

    #[test]
    fn test_min_clamp_boundary() {
        // 19 * 12 + 18 * 3 = 282
        let constraints = GridConstraints::with_columns(19);
        let layout = solve_layout(365, 282, 2000, &constraints).unwrap();
        assert_eq!((layout.dot_diameter, layout.gap), (12, 3));
        assert_eq!(layout.drawn_width(), 282);
        assert!(matches!(
            solve_layout(365, 281, 2000, &constraints),
            Err(YearDotsError::Geometry(_))
        ));
    }

    #[test]
    fn test_max_clamp_shrinks_block() {
        let layout = solve_layout(365, 10_000, 10_000, &GridConstraints::with_columns(19)).unwrap();
        assert_eq!(layout.dot_diameter, 64);
        assert_eq!(layout.gap, 28);
        assert!(layout.drawn_width() < 10_000);
    }

    #[test]
    fn test_too_small_is_rejected() {
        let err = solve_layout(365, 100, 100, &GridConstraints::with_columns(19)).unwrap_err();
        assert!(matches!(err, YearDotsError::Geometry(_)));
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        let ok = GridConstraints::with_columns(19);
        assert!(solve_layout(365, 1000, 1000, &GridConstraints::with_columns(0)).is_err());
        assert!(solve_layout(0, 1000, 1000, &ok).is_err());
        assert!(solve_layout(365, 0, 1000, &ok).is_err());
        assert!(solve_layout(365, 1000, 0, &ok).is_err());

        let bad_ratio = GridConstraints {
            gap_ratio: f64::NAN,
            ..ok
        };
        assert!(solve_layout(365, 1000, 1000, &bad_ratio).is_err());

        let bad_bounds = GridConstraints {
            min_dot: 70,
            ..ok
        };
        assert!(solve_layout(365, 1000, 1000, &bad_bounds).is_err());
    }

    #[test]
    fn test_single_column() {
        let layout = solve_layout(3, 50, 200, &GridConstraints::with_columns(1)).unwrap();
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.drawn_width(), layout.dot_diameter);
    }

    #[test]
    fn test_cell_offset() {
        let layout = LayoutResult {
            columns: 19,
            rows: 20,
            dot_diameter: 36,
            gap: 11,
        };
        assert_eq!(layout.cell_offset(0), (0, 0));
        assert_eq!(layout.cell_offset(18), (18 * 47, 0));
        assert_eq!(layout.cell_offset(19), (0, 47));
        assert_eq!(layout.cell_offset(364), (3 * 47, 19 * 47));
    }
}
