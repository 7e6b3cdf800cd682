//! Poisson and Binomial upper-tail (survival function) probabilities.
//!
//! Both are computed via a log-space recurrence on the summand rather than
//! direct multiplication, so moderately large counts don't overflow
//! intermediate factorial or power terms.

/// `PoissonSF(k, lambda) = 1 - sum_{i=0}^{k-1} e^{-lambda} lambda^i / i!`.
///
/// Returns `1.0` for `k <= 0` (the sum is empty) and `0.0` for `lambda <= 0`
/// with `k > 0` (all mass is at zero).
#[must_use]
pub fn poisson_sf(k: i64, lambda: f64) -> f64 {
    if k <= 0 {
        return 1.0;
    }
    if lambda <= 0.0 {
        return 0.0;
    }

    let mut log_term = -lambda;
    let mut cdf = log_term.exp();
    for i in 1..k {
        log_term += lambda.ln() - (i as f64).ln();
        cdf += log_term.exp();
    }
    (1.0 - cdf).clamp(0.0, 1.0)
}

/// `BinomialSF(nCas, nCon, p) = 1 - sum_{i=0}^{nCas-1} C(n,i) p^i (1-p)^(n-i)`,
/// `n = nCas + nCon`.
///
/// Returns `1.0` for `nCas <= 0`.
#[must_use]
pub fn binomial_sf(n_cas: i64, n_con: i64, p: f64) -> f64 {
    if n_cas <= 0 {
        return 1.0;
    }
    let n = n_cas + n_con;
    if n == 0 {
        return 0.0;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let n_f = n as f64;
    let mut log_term = n_f * (1.0 - p).ln();
    let mut cdf = log_term.exp();
    for i in 1..n_cas {
        let i_f = i as f64;
        log_term += (n_f - i_f + 1.0).ln() + p.ln() - i_f.ln() - (1.0 - p).ln();
        cdf += log_term.exp();
    }
    (1.0 - cdf).clamp(0.0, 1.0)
}
