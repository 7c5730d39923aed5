//! Where a straight line on the psychrometric chart meets the saturation curve.

use std::convert::Infallible;

use airco_solve::equation::bisection::{self, Config};
use airco_thermo::{
    PropertyError,
    humid_air::relations::{T_MIN, saturation_humidity_ratio},
};

/// Scan step when searching for a sign change, K.
const SCAN_STEP: f64 = 0.5;

/// Finds where a humidity-ratio line meets saturation at or below `start`.
///
/// `line` gives the line's humidity ratio at a dry bulb in °C. The search
/// walks down from `start` until the line rises above the saturation curve,
/// then bisects. Returns `None` if `start` is already supersaturated or the
/// line stays below saturation down to -100 °C.
pub(crate) fn crossing_below(
    start: f64,
    p: f64,
    line: impl Fn(f64) -> f64,
) -> Result<Option<f64>, PropertyError> {
    let gap = |t: f64| saturation_humidity_ratio(t, p) - line(t);
    let at_start = gap(start);
    if at_start.abs() < 1e-9 {
        return Ok(Some(start));
    }
    if at_start < 0.0 {
        return Ok(None);
    }

    let mut hi = start;
    while hi > T_MIN {
        let lo = (hi - SCAN_STEP).max(T_MIN);
        if gap(lo) < 0.0 {
            let solution = bisection::find_root(
                |t| Ok::<_, Infallible>(gap(t)),
                0.0,
                [lo, hi],
                &Config::default(),
            )?;
            return Ok(Some(solution.x));
        }
        hi = lo;
    }
    Ok(None)
}
