use web_time::Instant;

use settle_core::{DriverState, TickReport};

/// Running totals over a driver's ticks, rendered as a one-line HUD.
pub struct Hud {
    pub enabled: bool,
    tick_count: u64,
    last_tick: Option<Instant>,
    rate_smooth: f32,
    pub totals: Totals,
    pub last: Option<TickReport>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub painted: u64,
    pub expired: u64,
    pub invalidated: u64,
    /// Times the driver went from animating to idle.
    pub idles: u64,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            enabled: false,
            tick_count: 0,
            last_tick: None,
            rate_smooth: 0.0,
            totals: Totals::default(),
            last: None,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Smoothed ticks per second, measured on the driver's clock.
    pub fn tick_rate(&self) -> f32 {
        self.rate_smooth
    }

    pub fn record(&mut self, report: &TickReport) {
        self.tick_count += 1;
        if let Some(prev) = self.last_tick.replace(report.at) {
            let dt = report.at.saturating_duration_since(prev).as_secs_f32();
            if dt > 0.0 {
                let rate = 1.0 / dt;
                // simple EMA
                let a = 0.2;
                self.rate_smooth = if self.rate_smooth == 0.0 {
                    rate
                } else {
                    (1.0 - a) * self.rate_smooth + a * rate
                };
            }
        }

        self.totals.painted += report.painted as u64;
        self.totals.expired += report.expired as u64;
        self.totals.invalidated += report.invalidated as u64;
        if report.state == DriverState::Idle {
            self.totals.idles += 1;
            // Next burst starts a fresh rate measurement.
            self.last_tick = None;
            log::debug!("settle hud: idle after {} ticks", self.tick_count);
        }
        self.last = Some(*report);
    }

    pub fn line(&self) -> String {
        let mut parts = vec![
            format!("tick: {}", self.tick_count),
            format!("rate: {:.1}/s", self.rate_smooth),
        ];
        if let Some(r) = &self.last {
            parts.push(format!("live: {}", r.live));
            parts.push(format!("{:?}", r.state).to_lowercase());
        }
        parts.push(format!(
            "painted {} · expired {} · invalid {}",
            self.totals.painted, self.totals.expired, self.totals.invalidated
        ));
        parts.join("  |  ")
    }

    /// The HUD line when enabled.
    pub fn overlay(&self) -> Option<String> {
        self.enabled.then(|| self.line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    fn report(at: Instant, live: usize, state: DriverState) -> TickReport {
        TickReport {
            at,
            live,
            painted: live,
            expired: 0,
            invalidated: 0,
            state,
        }
    }

    #[test]
    fn test_rate_tracks_tick_spacing() {
        let t0 = Instant::now();
        let mut hud = Hud::new();
        for i in 0..10 {
            hud.record(&report(
                t0 + Duration::from_millis(16 * i),
                1,
                DriverState::Animating,
            ));
        }
        assert_eq!(hud.tick_count(), 10);
        assert!((hud.tick_rate() - 62.5).abs() < 0.5);
        assert_eq!(hud.totals.painted, 10);
    }

    #[test]
    fn test_idle_resets_rate_window() {
        let t0 = Instant::now();
        let mut hud = Hud::new();
        hud.record(&report(t0, 1, DriverState::Animating));
        hud.record(&report(t0 + Duration::from_millis(16), 0, DriverState::Idle));
        assert_eq!(hud.totals.idles, 1);

        // A long pause before the next burst must not drag the rate down.
        let rate = hud.tick_rate();
        hud.record(&report(t0 + Duration::from_secs(30), 1, DriverState::Animating));
        assert_eq!(hud.tick_rate(), rate);
    }

    #[test]
    fn test_overlay_only_when_enabled() {
        let mut hud = Hud::new();
        hud.record(&report(Instant::now(), 2, DriverState::Animating));
        assert!(hud.overlay().is_none());
        hud.toggle();
        let line = hud.overlay().unwrap();
        assert!(line.contains("live: 2"));
        assert!(line.contains("animating"));
    }
}
