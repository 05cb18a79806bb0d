/// Stopping rule applied to the SSE of two consecutive iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvergencePolicy {
    /// Stop once `|previous - current| < threshold`.
    Absolute(f64),
    /// Stop once `(previous - current) / previous < threshold`.
    Relative(f64),
}

impl ConvergencePolicy {
    pub fn threshold(&self) -> f64 {
        match *self {
            ConvergencePolicy::Absolute(threshold) | ConvergencePolicy::Relative(threshold) => threshold,
        }
    }

    /// `previous` is `f64::INFINITY` before the first iteration, which never converges.
    pub fn has_converged(&self, previous: f64, current: f64) -> bool {
        if previous.is_infinite() {
            return false;
        }

        match *self {
            ConvergencePolicy::Absolute(threshold) => (previous - current).abs() < threshold,
            ConvergencePolicy::Relative(threshold) => {
                // both SSEs are zero: nothing left to improve
                if previous == 0.0 {
                    return current == 0.0;
                }
                (previous - current) / previous < threshold
            }
        }
    }
}
