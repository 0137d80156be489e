//! Bounded scan + bisection for the instant a scalar function crosses zero.

use crate::config::SearchSettings;
use crate::error::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};

/// Julian-day interval scanned in fixed steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub start_jd: f64,
    pub end_jd: f64,
    pub step_days: f64,
}

impl SearchWindow {
    pub fn new(start_jd: f64, end_jd: f64, step_days: f64) -> ChartResult<Self> {
        let window = Self {
            start_jd,
            end_jd,
            step_days,
        };
        window.validate()?;
        Ok(window)
    }

    /// Window of `days` starting at `start_jd`
    pub fn starting_at(start_jd: f64, days: f64, step_days: f64) -> ChartResult<Self> {
        Self::new(start_jd, start_jd + days, step_days)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !(self.start_jd.is_finite() && self.end_jd.is_finite() && self.step_days.is_finite()) {
            return Err(ChartError::MalformedInput("non-finite search window".to_string()));
        }
        if self.end_jd <= self.start_jd {
            return Err(ChartError::MalformedInput(format!(
                "search window ends before it starts ({} .. {})",
                self.start_jd, self.end_jd
            )));
        }
        if self.step_days <= 0.0 {
            return Err(ChartError::MalformedInput(format!("search step must be positive: {}", self.step_days)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Bisection stops once the bracket is narrower than this
    pub tolerance_days: f64,
    pub max_iterations: u32,
    /// Sign changes with a jump in value larger than this are discontinuities
    /// (angle wraps), not crossings
    pub jump_limit: Option<f64>,
    /// Event name reported when nothing is found
    #[serde(skip, default = "default_event")]
    pub event: &'static str,
}

fn default_event() -> &'static str {
    "crossing"
}

impl SearchOptions {
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            tolerance_days: settings.tolerance_days,
            max_iterations: settings.max_iterations,
            ..Self::default()
        }
    }

    pub fn with_jump_limit(mut self, limit: f64) -> Self {
        self.jump_limit = Some(limit);
        self
    }

    pub fn with_event(mut self, event: &'static str) -> Self {
        self.event = event;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            tolerance_days: 1e-7,
            max_iterations: 100,
            jump_limit: None,
            event: default_event(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub jd: f64,
    /// Function goes from negative to positive
    pub rising: bool,
}

/// First zero crossing of `f` in the window
pub fn find_first_crossing<F>(f: F, window: &SearchWindow, options: &SearchOptions) -> ChartResult<Crossing>
where
    F: FnMut(f64) -> ChartResult<f64>,
{
    scan(f, window, options, true)?
        .into_iter()
        .next()
        .ok_or_else(|| not_found(window, options))
}

/// Every zero crossing of `f` in the window, in time order. Empty when there is none.
pub fn find_crossings<F>(f: F, window: &SearchWindow, options: &SearchOptions) -> ChartResult<Vec<Crossing>>
where
    F: FnMut(f64) -> ChartResult<f64>,
{
    scan(f, window, options, false)
}

pub(crate) fn not_found(window: &SearchWindow, options: &SearchOptions) -> ChartError {
    ChartError::EventNotFound {
        event: options.event.to_string(),
        detail: format!("none between JD {:.5} and JD {:.5}", window.start_jd, window.end_jd),
    }
}

fn scan<F>(mut f: F, window: &SearchWindow, options: &SearchOptions, first_only: bool) -> ChartResult<Vec<Crossing>>
where
    F: FnMut(f64) -> ChartResult<f64>,
{
    window.validate()?;
    let mut crossings = Vec::new();
    let mut a = window.start_jd;
    let mut fa = checked(&mut f, a)?;

    while a < window.end_jd {
        let b = (a + window.step_days).min(window.end_jd);
        let fb = checked(&mut f, b)?;

        let jump = options.jump_limit.is_some_and(|limit| (fb - fa).abs() > limit);
        if fa == 0.0 && a == window.start_jd {
            crossings.push(Crossing { jd: a, rising: fb > 0.0 });
        } else if fb == 0.0 && !jump {
            crossings.push(Crossing { jd: b, rising: fa < 0.0 });
        } else if fa.signum() != fb.signum() && fa != 0.0 && !jump {
            let jd = bisect(&mut f, (a, fa), (b, fb), options)?;
            crossings.push(Crossing { jd, rising: fa < 0.0 });
        }
        if first_only && !crossings.is_empty() {
            break;
        }
        a = b;
        fa = fb;
    }
    Ok(crossings)
}

fn bisect<F>(f: &mut F, (mut a, mut fa): (f64, f64), (mut b, _): (f64, f64), options: &SearchOptions) -> ChartResult<f64>
where
    F: FnMut(f64) -> ChartResult<f64>,
{
    for _ in 0..options.max_iterations {
        let mid = 0.5 * (a + b);
        if b - a <= options.tolerance_days {
            return Ok(mid);
        }
        let fm = checked(f, mid)?;
        if fm == 0.0 {
            return Ok(mid);
        }
        if fm.signum() == fa.signum() {
            a = mid;
            fa = fm;
        } else {
            b = mid;
        }
    }
    if b - a <= options.tolerance_days {
        Ok(0.5 * (a + b))
    } else {
        Err(ChartError::EventNotFound {
            event: options.event.to_string(),
            detail: format!("bisection did not converge within {} iterations", options.max_iterations),
        })
    }
}

fn checked<F>(f: &mut F, jd: f64) -> ChartResult<f64>
where
    F: FnMut(f64) -> ChartResult<f64>,
{
    let value = f(jd)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::MalformedInput(format!("search function is not finite at JD {jd}")))
    }
}
