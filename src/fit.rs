//! Font fitting for the name display.
//!
//! Finds the largest font size at which a string still fits the display
//! width. Text measurement is supplied by the caller so the search does not
//! depend on any particular graphics backend.

use serde::{Deserialize, Serialize};

/// Measures the rendered width of `text` at font size `size`
pub trait TextMeasure {
    fn width(&mut self, text: &str, size: u32) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str, u32) -> f32,
{
    fn width(&mut self, text: &str, size: u32) -> f32 {
        self(text, size)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrategy {
    /// Step down one size at a time from the maximum
    #[default]
    Linear,
    /// Bisect the size range; same result when width grows with size
    Binary,
}

/// The box a name has to fit in
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitBox {
    pub max_width: f32,
    pub max_size: u32,
    pub min_size: u32,
}

impl FitBox {
    /// Smallest size that will ever be returned. Never below 1, never above `max_size`.
    fn floor(&self) -> u32 {
        self.min_size.max(1).min(self.max_size.max(1))
    }
}

/// Largest size in `[1, max_height]` whose width is at most `max_width`,
/// or 1 if none fits.
pub fn fit<M: TextMeasure + ?Sized>(text: &str, max_width: f32, max_height: u32, measure: &mut M) -> u32 {
    let fit_box = FitBox {
        max_width,
        max_size: max_height,
        min_size: 1,
    };
    fit_linear(text, &fit_box, measure)
}

pub fn fit_with<M: TextMeasure + ?Sized>(
    text: &str,
    fit_box: &FitBox,
    strategy: FitStrategy,
    measure: &mut M,
) -> u32 {
    match strategy {
        FitStrategy::Linear => fit_linear(text, fit_box, measure),
        FitStrategy::Binary => fit_binary(text, fit_box, measure),
    }
}

fn fit_linear<M: TextMeasure + ?Sized>(text: &str, fit_box: &FitBox, measure: &mut M) -> u32 {
    let floor = fit_box.floor();
    let mut size = fit_box.max_size.max(floor);
    while size > floor && measure.width(text, size) > fit_box.max_width {
        size -= 1;
    }
    size
}

/// Bisection over `[floor, max_size]`. Assumes width never shrinks as size grows.
pub fn fit_binary<M: TextMeasure + ?Sized>(text: &str, fit_box: &FitBox, measure: &mut M) -> u32 {
    let floor = fit_box.floor();
    let max = fit_box.max_size.max(floor);

    if measure.width(text, max) <= fit_box.max_width {
        return max;
    }

    // Invariant: `lo` is the floor or fits, `hi` does not fit
    let (mut lo, mut hi) = (floor, max);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if measure.width(text, mid) <= fit_box.max_width {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}
