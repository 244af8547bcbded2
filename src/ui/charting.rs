use fastwrite::time_series::TimeSeriesPoint;

/// X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(points: &[TimeSeriesPoint], duration_secs: Option<u64>) -> (f64, f64) {
    let highest_wpm = points.iter().map(|p| p.wpm).fold(0.0, f64::max);

    let overall_duration = match (points.last(), duration_secs) {
        (Some(last), Some(secs)) => last.t.max(secs as f64),
        (Some(last), None) => last.t,
        (None, secs) => secs.map_or(1.0, |s| s as f64),
    };

    (overall_duration.max(1.0), highest_wpm.round())
}

pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_uses_duration() {
        assert_eq!(compute_chart_params(&[], Some(15)), (15.0, 0.0));
        assert_eq!(compute_chart_params(&[], None), (1.0, 0.0));
    }

    #[test]
    fn bounds_follow_samples() {
        let points = [
            TimeSeriesPoint::new(1.0, 30.0),
            TimeSeriesPoint::new(2.0, 52.4),
            TimeSeriesPoint::new(3.0, 48.0),
        ];
        assert_eq!(compute_chart_params(&points, None), (3.0, 52.0));
        assert_eq!(compute_chart_params(&points, Some(30)), (30.0, 52.0));
    }

    #[test]
    fn labels() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
