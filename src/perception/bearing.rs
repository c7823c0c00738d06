//! Bearing estimation from one panoramic row of classified pixels
//!
//! The four cameras are stitched side by side into a row of `4w` pixels that
//! covers the full circle. Pixel `w/2` looks straight ahead and the row wraps
//! from its last pixel back to pixel 0, so a landmark straddling the seam shows
//! up as two runs that have to be joined before picking the largest one.

use super::color::PixelClass;
use log::warn;
use std::f32::consts::FRAC_PI_2;

/// A contiguous run of one pixel class, possibly wrapping past the row end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: usize,
    len: usize,
}

fn collect_runs(row: &[PixelClass], target: PixelClass) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut current: Option<Run> = None;

    for (i, &class) in row.iter().enumerate() {
        if class == target {
            match current.as_mut() {
                Some(run) => run.len += 1,
                None => current = Some(Run { start: i, len: 1 }),
            }
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    if let Some(run) = current {
        runs.push(run);
    }

    runs
}

/// Bearing in (-pi, pi] of the largest run of `target` in a panoramic row
///
/// Returns NaN when the row holds no pixel of `target`.
pub fn estimate_bearing(row: &[PixelClass], target: PixelClass) -> f32 {
    let n = row.len();
    let mut runs = collect_runs(row, target);

    if runs.is_empty() {
        warn!("No interval found when estimating {:?} bearing", target);
        return f32::NAN;
    }

    // Join the run touching the row end with the run starting at pixel 0
    if runs.len() > 1 && runs[0].start == 0 {
        let last = runs[runs.len() - 1];
        if last.start + last.len == n {
            runs[0] = Run {
                start: last.start,
                len: last.len + runs[0].len,
            };
            runs.pop();
        }
    }

    let mut largest = runs[0];
    for run in &runs[1..] {
        if run.len > largest.len {
            largest = *run;
        }
    }

    let pixel = (largest.start + largest.len / 2) % n;
    let fraction = pixel as f32 / n as f32;
    let mut quadrants = fraction * 4.0 - 0.5;
    if quadrants > 2.0 {
        quadrants -= 4.0;
    }
    quadrants * FRAC_PI_2
}
