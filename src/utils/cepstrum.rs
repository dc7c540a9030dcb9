//! LPC to cepstrum conversion
//!
//! Cepstral coefficients of the all-pole model 1 / A(z) follow from the
//! predictor coefficients through a closed recurrence, so no spectrum has to
//! be computed.

/// Smallest residual energy fed to the logarithm; ln(1e-10) ~ -23.03.
///
/// Silent or exactly predicted frames report a zero residual; they are mapped
/// to this floor so the zeroth coefficient stays finite.
pub const MIN_RESIDUAL_ENERGY: f64 = 1e-10;

/// Log energy term c[0] for a residual, with the floor applied
pub fn log_energy(residual: f64) -> f64 {
    if residual.is_nan() {
        return MIN_RESIDUAL_ENERGY.ln();
    }
    residual.max(MIN_RESIDUAL_ENERGY).ln()
}

/// Convert LPC coefficients to `count` cepstral coefficients
///
/// See [`lpc_to_cepstrum_into`].
pub fn lpc_to_cepstrum(lpc: &[f64], residual: f64, count: usize) -> Vec<f64> {
    let mut cepstrum = vec![0.0; count];
    lpc_to_cepstrum_into(lpc, residual, &mut cepstrum);
    cepstrum
}

/// Convert LPC coefficients into a caller-owned cepstrum buffer
///
/// * `lpc` - a[0..=p] in the convention of [`crate::utils::lpc`]; a[0] is ignored
/// * `residual` - prediction-error energy from the same analysis
/// * `out` - receives `out.len()` coefficients
///
/// c[0] = ln(residual) and, for n >= 1,
/// c[n] = -a[n] - (1/n) * sum_{k=1}^{n-1} k * c[k] * a[n-k],
/// with a[j] = 0 beyond the predictor order. Coefficients past the order keep
/// following the recurrence and form a decaying tail.
pub fn lpc_to_cepstrum_into(lpc: &[f64], residual: f64, out: &mut [f64]) {
    if out.is_empty() {
        return;
    }

    let coefficient = |j: usize| lpc.get(j).copied().unwrap_or(0.0);

    out[0] = log_energy(residual);

    for n in 1..out.len() {
        let mut sum = 0.0;
        for k in 1..n {
            sum += k as f64 * out[k] * coefficient(n - k);
        }
        out[n] = -coefficient(n) - sum / n as f64;
    }
}
