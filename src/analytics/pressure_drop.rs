//! Causal maximum pressure drop over a trailing window.
//!
//! For window `W` and pressures `v_0, v_1, ...` the tracker reports
//!
//! ```text
//! max over j >= W-1 of ( max(v[j-W+1 .. j-1]) - v[j] ), clamped to >= 0
//! ```
//!
//! i.e. the largest fall from any of the `W-1` preceding samples down to the
//! current one. A monotonic deque holds the candidates for the trailing
//! maximum so each sample costs O(1) amortized.

use std::collections::VecDeque;
use thiserror::Error;

/// Why a tracker cannot produce a value yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PressureDropError {
    #[error("window must be at least 1")]
    InvalidWindow,

    #[error("window {window} needs {window} samples, only {samples} seen")]
    InsufficientData { window: usize, samples: u64 },
}

/// Sliding-window causal maximum-drop state for one (well, window) pair.
///
/// NaN pressures count as samples but never enter the deque, so they
/// neither hide a real maximum nor produce a candidate.
#[derive(Debug, Clone)]
pub struct PressureDropTracker {
    window: usize,
    /// (sample index, pressure), strictly decreasing in pressure front to back
    deque: VecDeque<(u64, f64)>,
    samples: u64,
    /// Largest candidate seen; `None` until the first comparison fires
    best: Option<f64>,
}

impl PressureDropTracker {
    /// Create a tracker for a window of `window` samples (current included).
    pub fn new(window: usize) -> Self {
        Self {
            window,
            deque: VecDeque::with_capacity(window.min(1024)),
            samples: 0,
            best: None,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of pressures fed so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Feed the next finalized pressure value.
    pub fn push(&mut self, value: f64) {
        let idx = self.samples;
        let lookback = self.window.saturating_sub(1) as u64;

        // Drop entries older than the W-1 samples preceding this one
        let lower_bound = idx.saturating_sub(lookback);
        while let Some(&(front_idx, _)) = self.deque.front() {
            if front_idx < lower_bound {
                self.deque.pop_front();
            } else {
                break;
            }
        }

        if lookback > 0 && idx >= lookback {
            if let Some(&(_, front_value)) = self.deque.front() {
                let candidate = front_value - value;
                // NaN candidates never displace a real value
                if self.best.map_or(!candidate.is_nan(), |best| candidate > best) {
                    self.best = Some(candidate);
                }
            }
        }

        // A NaN sample still occupies its index but can never be the maximum
        if value.is_nan() {
            self.samples += 1;
            return;
        }

        while let Some(&(_, back_value)) = self.deque.back() {
            if back_value <= value {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back((idx, value));

        self.samples += 1;
    }

    /// Maximum causal drop seen so far, never negative.
    pub fn result(&self) -> Result<f64, PressureDropError> {
        if self.window == 0 {
            return Err(PressureDropError::InvalidWindow);
        }
        if self.samples < self.window as u64 {
            return Err(PressureDropError::InsufficientData {
                window: self.window,
                samples: self.samples,
            });
        }
        match self.best {
            Some(best) if self.window > 1 && best > 0.0 => Ok(best),
            _ => Ok(0.0),
        }
    }
}
