use web_time::{Duration, Instant};

use crate::animation::FRAME_PERIOD;
use crate::{
    Clock, DocChange, DocumentBounds, IntervalId, PaintSurface, ProgressRenderer, RangeTracker,
    RepeatingTimer, Settings, Snapshot, TextSpan, Theme, ThemeQuery, TimerHost,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DriverState {
    /// No timer running.
    #[default]
    Idle,
    /// Timer running; at least one span was live at the last check.
    Animating,
}

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub at: Instant,
    /// Intervals left after the tick.
    pub live: usize,
    pub painted: usize,
    /// Dropped for having fully settled.
    pub expired: usize,
    /// Dropped because their span could not be mapped or painted.
    pub invalidated: usize,
    pub state: DriverState,
}

/// Drives the settle animation for one document.
///
/// Edits go in through [`on_change`](Self::on_change), timer fires through
/// [`tick`](Self::tick). The driver owns at most one host timer at a time and
/// cancels it when nothing is left to animate or when dropped.
pub struct Driver<C: Clock, T: TimerHost> {
    tracker: RangeTracker,
    renderer: ProgressRenderer,
    settings: Snapshot<Settings>,
    clock: C,
    timers: T,
    timer: Option<RepeatingTimer>,
    period: Duration,
}

impl<C: Clock, T: TimerHost> Driver<C, T> {
    pub fn new(settings: Settings, clock: C, timers: T) -> Self {
        Self::with_period(settings, clock, timers, FRAME_PERIOD)
    }

    pub fn with_period(settings: Settings, clock: C, timers: T, period: Duration) -> Self {
        let settings = Snapshot::new(settings);
        settings.subscribe(|s| {
            log::debug!(
                "settle: settings now {:.1}s at intensity {:.2}",
                s.transition_duration,
                s.intensity
            );
        });
        let mut driver = Self {
            tracker: RangeTracker::new(),
            renderer: ProgressRenderer::new(),
            settings,
            clock,
            timers,
            timer: None,
            period,
        };
        // First tick finds nothing and parks the driver.
        driver.restart_timer();
        driver
    }

    pub fn state(&self) -> DriverState {
        if self.timer.is_some() {
            DriverState::Animating
        } else {
            DriverState::Idle
        }
    }

    pub fn tracker(&self) -> &RangeTracker {
        &self.tracker
    }

    pub fn settings(&self) -> Settings {
        self.settings.get()
    }

    /// Shared handle for a settings UI that lives outside the driver.
    pub fn settings_handle(&self) -> Snapshot<Settings> {
        self.settings.clone()
    }

    /// Swap the settings snapshot. Takes effect on the next tick.
    pub fn replace_settings(&mut self, settings: Settings) -> Settings {
        self.settings.replace(settings)
    }

    /// Feed a host edit. Returns how many spans started settling.
    pub fn on_change(&mut self, change: &DocChange) -> usize {
        let now = self.clock.now();
        let added = self.tracker.apply_change(change, now);
        if added > 0 {
            self.restart_timer();
        }
        added
    }

    /// Feed raw inserted `(from, to)` pairs for hosts without change sets.
    pub fn on_insert(&mut self, spans: impl IntoIterator<Item = (usize, usize)>) -> usize {
        let now = self.clock.now();
        let added = self.tracker.on_insert_raw(spans, now);
        if added > 0 {
            self.restart_timer();
        }
        added
    }

    /// Like [`on_insert`](Self::on_insert) with already validated spans.
    pub fn on_insert_spans(&mut self, spans: impl IntoIterator<Item = TextSpan>) -> usize {
        let now = self.clock.now();
        let added = self.tracker.on_insert(spans, now);
        if added > 0 {
            self.restart_timer();
        }
        added
    }

    /// One animation frame: prune, render, paint, repaint.
    pub fn tick<V>(&mut self, view: &mut V, bounds: DocumentBounds) -> TickReport
    where
        V: PaintSurface + ThemeQuery,
    {
        let now = self.clock.now();
        let settings = self.settings.get();

        let before = self.tracker.len();
        let flagged = self
            .tracker
            .intervals()
            .iter()
            .filter(|iv| !iv.is_valid())
            .count();
        let live = self.tracker.prune(now, &settings);
        let expired = before - live.len() - flagged;

        let theme = Theme::from_dark(view.is_dark_theme());
        let pass = self.renderer.render(live, now, &settings, theme, bounds);

        let mut dropped: Vec<IntervalId> = pass.invalid;
        let mut painted = 0;
        for ins in &pass.instructions {
            match view.paint(ins.span, &ins.style) {
                Ok(()) => painted += 1,
                Err(e) => {
                    log::debug!("settle: {e}");
                    dropped.push(ins.id);
                }
            }
        }
        self.tracker.invalidate(&dropped);
        view.request_repaint();

        if self.tracker.is_empty() {
            self.stop_timer();
        }

        let report = TickReport {
            at: now,
            live: self.tracker.len(),
            painted,
            expired,
            invalidated: flagged + dropped.len(),
            state: self.state(),
        };
        log::trace!("settle: {report:?}");
        report
    }

    /// Cancel any pending timer and forget every span.
    pub fn dispose(&mut self) {
        self.stop_timer();
        self.tracker.clear();
    }

    fn restart_timer(&mut self) {
        // Old timer is cancelled before the new one exists.
        if let Some(old) = self.timer.take() {
            old.cancel();
        }
        let cancel = self.timers.start_repeating(self.period);
        self.timer = Some(RepeatingTimer::new(cancel));
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
            log::debug!("settle: all spans settled, timer stopped");
        }
    }
}
