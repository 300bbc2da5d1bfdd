use crate::consts::MIN_REGRESSION_POINTS;
use crate::error::{CorrMapError, Result};

/// Fitted straight line `y = intercept + slope * x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    pub intercept: f64,
    pub slope: f64,
}

/// Ordinary least-squares fit of one response against one predictor.
///
/// Borrows both sequences. Fitted state exists only after [`compute`],
/// every accessor fails with [`CorrMapError::UncomputedModel`] before that.
///
/// Slope is `cov(x, y) / var(x)` with population (divide-by-N) forms for
/// both; intercept is `mean(y) - slope * mean(x)`.
///
/// [`compute`]: LinearRegression::compute
#[derive(Clone, Debug)]
pub struct LinearRegression<'a> {
    x: &'a [f32],
    y: &'a [f32],
    fitted: Option<Coefficients>,
}

impl<'a> LinearRegression<'a> {
    pub fn new(x: &'a [f32], y: &'a [f32]) -> Self {
        Self { x, y, fitted: None }
    }

    pub fn predictor(&self) -> &'a [f32] {
        self.x
    }

    pub fn response(&self) -> &'a [f32] {
        self.y
    }

    pub fn is_computed(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fit the line. Re-running recomputes from the same inputs.
    pub fn compute(&mut self) -> Result<()> {
        let len = self.x.len().min(self.y.len());
        if len < MIN_REGRESSION_POINTS {
            return Err(CorrMapError::InsufficientData { len });
        }
        if self.x.len() != self.y.len() {
            return Err(CorrMapError::DimensionMismatch {
                what: "regression response length",
                expected: self.x.len(),
                actual: self.y.len(),
            });
        }

        let slope = covariance(self.x, self.y) / variance(self.x);
        let intercept = mean(self.y) - slope * mean(self.x);
        self.fitted = Some(Coefficients { intercept, slope });
        Ok(())
    }

    pub fn coefficients(&self) -> Result<Coefficients> {
        self.fitted.ok_or(CorrMapError::UncomputedModel)
    }

    /// Value of the fitted line at `x`.
    pub fn evaluate_at(&self, x: f64) -> Result<f64> {
        let c = self.coefficients()?;
        Ok(c.intercept + c.slope * x)
    }

    /// Residual `y - intercept - slope * x` for an arbitrary point.
    pub fn error_at(&self, x: f64, y: f64) -> Result<f64> {
        let c = self.coefficients()?;
        Ok(y - c.intercept - c.slope * x)
    }
}

fn mean(data: &[f32]) -> f64 {
    data.iter().map(|&v| v as f64).sum::<f64>() / data.len() as f64
}

fn variance(data: &[f32]) -> f64 {
    let m = mean(data);
    data.iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum::<f64>()
        / data.len() as f64
}

fn covariance(x: &[f32], y: &[f32]) -> f64 {
    let mx = mean(x);
    let my = mean(y);
    x.iter()
        .zip(y)
        .map(|(&a, &b)| (a as f64 - mx) * (b as f64 - my))
        .sum::<f64>()
        / x.len() as f64
}
