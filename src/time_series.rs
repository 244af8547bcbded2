/// WPM observed at a whole second of a running session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}

/// One sample per whole second; repeated ticks within a second are dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WpmSeries {
    points: Vec<TimeSeriesPoint>,
}

impl WpmSeries {
    pub fn record(&mut self, second: u64, wpm: u32) -> bool {
        if second == 0 || self.last_second() >= Some(second) {
            return false;
        }
        self.points
            .push(TimeSeriesPoint::new(second as f64, wpm as f64));
        true
    }

    fn last_second(&self) -> Option<u64> {
        self.points.last().map(|p| p.t as u64)
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
