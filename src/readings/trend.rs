// src/readings/trend.rs
//
// Ordinary least squares of weight against time.

use chrono::NaiveDateTime;

use super::WeightReading;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Least-squares line through `points`. `None` for no points; identical
    /// x values give a flat line through the mean.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        // Centered sums keep precision with epoch-sized x.
        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), &(x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        Some(Self { slope, intercept: mean_y - slope * mean_x })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Time as a numeric ordinal: seconds since the epoch, fractional part kept.
pub fn ordinal(t: NaiveDateTime) -> f64 {
    let utc = t.and_utc();
    utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9
}

/// Fitted weight at each weight-reading timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub fit: LinearFit,
    pub points: Vec<(NaiveDateTime, f64)>,
}

impl TrendLine {
    pub fn from_weight(weight: &[WeightReading]) -> Option<Self> {
        let xy: Vec<(f64, f64)> = weight.iter().map(|w| (ordinal(w.at), w.weight)).collect();
        let fit = LinearFit::fit(&xy)?;
        let points = weight.iter().map(|w| (w.at, fit.predict(ordinal(w.at)))).collect();
        Some(Self { fit, points })
    }
}
