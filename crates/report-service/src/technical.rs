//! Indicator computation over daily close series.

/// Mean of the last `window` closes. `None` when the series is shorter than
/// the window.
pub fn moving_average(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window {
        return None;
    }
    let tail = &closes[closes.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// (high, low) of the whole series; `None` for an empty series.
pub fn range_high_low(closes: &[f64]) -> (Option<f64>, Option<f64>) {
    if closes.is_empty() {
        return (None, None);
    }
    let high = closes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let low = closes.iter().cloned().fold(f64::INFINITY, f64::min);
    (Some(high), Some(low))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_average_exact() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(moving_average(&closes, 5), Some(3.0));
        assert_eq!(moving_average(&closes, 2), Some(4.5));
    }

    #[test]
    fn moving_average_short_series_is_none() {
        let closes = [1.0, 2.0];
        assert_eq!(moving_average(&closes, 5), None);
        assert_eq!(moving_average(&[], 1), None);
        assert_eq!(moving_average(&closes, 0), None);
    }

    #[test]
    fn range_over_series() {
        let closes = [10.0, 25.5, 7.2, 18.0];
        assert_eq!(range_high_low(&closes), (Some(25.5), Some(7.2)));
    }

    #[test]
    fn range_empty_is_none() {
        assert_eq!(range_high_low(&[]), (None, None));
    }
}
