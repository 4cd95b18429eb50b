//! Fixed-size character plot of a line fit.
//!
//! Output is fully determined by the samples and the grid size, so the golden
//! test below pins it exactly. Later layers overwrite earlier ones:
//! - measured points: `o`
//! - fitted line: `-`
//! - y error bars (when the set carries a measurement uncertainty): `|`

use crate::domain::{FitResult, SampleSet};
use crate::fit::line_grid;

/// Render the samples, their error bars and the fitted line.
pub fn render_ascii_plot(samples: &SampleSet, fit: &FitResult, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = samples
        .x_range()
        .filter(|(lo, hi)| hi > lo)
        .unwrap_or((0.0, 1.0));
    let line = line_grid(fit, x_min, x_max, width);
    let curve: Vec<(f64, f64)> = line.x.iter().copied().zip(line.y.iter().copied()).collect();

    let (y_min, y_max) = y_range(samples, &curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the line first so bars and points overlay it.
    draw_curve(&mut grid, &curve, x_min, x_max, y_min, y_max);

    if let Some(sigma) = samples.y_sigma().filter(|s| *s > 0.0) {
        for s in samples.samples() {
            let col = map_x(s.x, x_min, x_max, width);
            let top = map_y(s.y + sigma, y_min, y_max, height);
            let bottom = map_y(s.y - sigma, y_min, y_max, height);
            for row in grid.iter_mut().take(bottom + 1).skip(top) {
                row[col] = '|';
            }
        }
    }

    for s in samples.samples() {
        let col = map_x(s.x, x_min, x_max, width);
        let row = map_y(s.y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(samples: &SampleSet, curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let (mut min_y, mut max_y) = samples.y_range().unwrap_or((f64::INFINITY, f64::NEG_INFINITY));
    for &(_, y) in curve {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorModel, Estimator};

    fn identity_fit() -> FitResult {
        FitResult {
            slope: 1.0,
            intercept: 0.0,
            slope_error: 0.0,
            intercept_error: 0.0,
            n: 3,
            sse: 0.0,
            estimator: Estimator::ClosedForm,
            error_model: ErrorModel::Covariance,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let samples = SampleSet::from_pairs(&[(0.0, 0.0), (4.5, 4.5), (9.0, 9.0)]).unwrap();

        let txt = render_ascii_plot(&samples, &identity_fit(), 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 9.000] | y=[-0.45, 9.45]\n",
            "         o\n",
            "      --- \n",
            "    -o    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn error_bars_surround_points() {
        let samples = SampleSet::from_pairs(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)])
            .unwrap()
            .with_y_sigma(3.0)
            .unwrap();

        let txt = render_ascii_plot(&samples, &identity_fit(), 21, 21);
        let rows: Vec<Vec<char>> = txt.lines().skip(1).map(|l| l.chars().collect()).collect();
        let middle: Vec<char> = rows.iter().map(|r| r[10]).collect();

        let point_row = middle.iter().position(|&c| c == 'o').unwrap();
        assert_eq!(middle[point_row - 1], '|');
        assert_eq!(middle[point_row + 1], '|');
        assert!(txt.starts_with("Plot: x=[0.000, 10.000]"));
    }

    #[test]
    fn tiny_dimensions_are_clamped() {
        let samples = SampleSet::from_pairs(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        let txt = render_ascii_plot(&samples, &identity_fit(), 1, 1);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.chars().count() == 10));
    }
}
