/// Number of nonzero terms summed by each matrix Taylor series.
///
/// `log` evaluates `log(I + X)` for `X = A - I`, so it only converges when
/// `X` is small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaylorTerms {
    /// Terms of `sin`.
    pub sin: usize,
    /// Terms of `cos`.
    pub cos: usize,
    /// Terms of `sinh`.
    pub sinh: usize,
    /// Terms of `cosh`.
    pub cosh: usize,
    /// Terms of `exp`.
    pub exp: usize,
    /// Terms of `log`.
    pub log: usize,
}

impl Default for TaylorTerms {
    fn default() -> Self {
        TaylorTerms {
            sin: 18,
            cos: 18,
            sinh: 18,
            cosh: 18,
            exp: 35,
            log: 8,
        }
    }
}

/// Power iteration limits of the spectral norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpectralNormConfig {
    /// Upper bound on power iteration steps.
    pub max_iterations: usize,
}

impl Default for SpectralNormConfig {
    fn default() -> Self {
        SpectralNormConfig { max_iterations: 64 }
    }
}
