//! Linear Predictive Coding (LPC) utilities
//!
//! This module solves the autocorrelation normal equations of linear
//! prediction with the Levinson-Durbin recursion. Coefficients follow the
//! inverse-filter convention
//! A(z) = 1 + a[1]*z^-1 + a[2]*z^-2 + ... + a[p]*z^-p,
//! so a signal obeying x[n] = -sum_k a[k] * x[n-k] is predicted exactly.

/// Residual energy, relative to r[0], below which the frame counts as exactly
/// predicted and the recursion stops
const EXACT_PREDICTION_RATIO: f64 = 1e-12;

/// Result of LPC analysis
#[derive(Debug, Clone, PartialEq)]
pub struct LpcResult {
    /// LPC coefficients a[0..=p] with a[0] = 1.0
    pub coefficients: Vec<f64>,
    /// Residual prediction-error energy (never negative)
    pub residual: f64,
    /// Reflection coefficients k[1..=p] (k[0] unused, zero)
    pub reflection: Vec<f64>,
}

/// Compute LPC coefficients with the Levinson-Durbin recursion
///
/// # Arguments
/// * `autocorrelation` - Autocorrelation lags r[0..], at least `order + 1` of them
/// * `order` - Predictor order p
///
/// # Returns
/// LPC result with `order + 1` coefficients and the residual energy.
///
/// # Panics
/// Panics if fewer than `order + 1` autocorrelation lags are supplied.
pub fn levinson_durbin(autocorrelation: &[f64], order: usize) -> LpcResult {
    let mut coefficients = vec![0.0; order + 1];
    let mut reflection = vec![0.0; order + 1];
    let residual = solve(autocorrelation, order, &mut coefficients, Some(&mut reflection));

    LpcResult {
        coefficients,
        residual,
        reflection,
    }
}

/// Levinson-Durbin into a caller-owned coefficient buffer
///
/// Writes `order + 1` coefficients into `lpc` (a[0] = 1.0, the rest
/// overwritten) and returns the residual energy. The recursion updates the
/// coefficients in place, so no temporary storage is allocated.
///
/// A silent frame (r[0] <= 0) yields zero predictor coefficients and a zero
/// residual. If the residual collapses (below 1e-12 of r[0]) before `order`
/// steps the signal is predicted exactly; the recursion stops there, the
/// remaining coefficients stay zero and the residual is reported as zero.
///
/// # Panics
/// Panics if `lpc` holds fewer than `order + 1` values or fewer than
/// `order + 1` autocorrelation lags are supplied.
pub fn levinson_durbin_into(autocorrelation: &[f64], order: usize, lpc: &mut [f64]) -> f64 {
    solve(autocorrelation, order, lpc, None)
}

fn solve(r: &[f64], order: usize, a: &mut [f64], mut reflection: Option<&mut Vec<f64>>) -> f64 {
    assert!(r.len() > order, "need order + 1 autocorrelation lags");
    assert!(a.len() > order, "need room for order + 1 coefficients");

    a[..=order].fill(0.0);
    a[0] = 1.0;

    let energy = r[0];
    if energy <= 0.0 || !energy.is_finite() {
        return 0.0;
    }
    let floor = energy * EXACT_PREDICTION_RATIO;
    let mut err = energy;

    for m in 1..=order {
        // k = -(r[m] + sum_{j=1}^{m-1} a[j] * r[m-j]) / err
        let mut acc = r[m];
        for j in 1..m {
            acc += a[j] * r[m - j];
        }
        let k = -acc / err;

        // a[j] += k * a[m-j] for j < m, done pairwise from both ends
        let half = m / 2;
        for j in 1..=half {
            let lo = a[j];
            let hi = a[m - j];
            a[j] = lo + k * hi;
            if j != m - j {
                a[m - j] = hi + k * lo;
            }
        }
        a[m] = k;

        if let Some(reflection) = reflection.as_deref_mut() {
            reflection[m] = k;
        }

        err *= 1.0 - k * k;
        if err <= floor {
            return 0.0;
        }
    }

    err
}
