use web_time::Instant;

use crate::{DocChange, Settings, TextSpan};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntervalId(pub u64);

/// A freshly inserted span and when it was inserted.
#[derive(Clone, Debug, PartialEq)]
pub struct SettlingInterval {
    pub id: IntervalId,
    pub span: TextSpan,
    pub created_at: Instant,
    /// Document version `span` is expressed in.
    pub version: u64,
    valid: bool,
}

impl SettlingInterval {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn age(&self, now: Instant) -> web_time::Duration {
        now.saturating_duration_since(self.created_at)
    }
}

/// Owns every span that is still settling, in insertion order.
#[derive(Debug, Default)]
pub struct RangeTracker {
    intervals: Vec<SettlingInterval>,
    next_id: u64,
    /// Last document version seen, `None` until the first change arrives.
    version: Option<u64>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intervals(&self) -> &[SettlingInterval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn version(&self) -> Option<u64> {
        self.version
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Start tracking `spans` as of `now`, in the current document version.
    /// Returns how many were added.
    pub fn on_insert(&mut self, spans: impl IntoIterator<Item = TextSpan>, now: Instant) -> usize {
        let version = self.version.unwrap_or(0);
        let before = self.intervals.len();
        for span in spans {
            let id = IntervalId(self.next_id);
            self.next_id += 1;
            self.intervals.push(SettlingInterval {
                id,
                span,
                created_at: now,
                version,
                valid: true,
            });
        }
        let added = self.intervals.len() - before;
        if added > 0 {
            log::debug!("settle: tracking {added} new span(s), {} live", self.len());
        }
        added
    }

    /// Like [`on_insert`](Self::on_insert) for raw host offsets; empty or
    /// inverted pairs are skipped.
    pub fn on_insert_raw(
        &mut self,
        spans: impl IntoIterator<Item = (usize, usize)>,
        now: Instant,
    ) -> usize {
        self.on_insert(
            spans.into_iter().filter_map(|(f, t)| TextSpan::new(f, t)),
            now,
        )
    }

    /// Carry every tracked span through `change`, then track the text it
    /// inserted. Returns how many spans were added.
    pub fn apply_change(&mut self, change: &DocChange, now: Instant) -> usize {
        let in_sequence = match self.version {
            None => true,
            Some(v) => change.version == v.wrapping_add(1),
        };

        if !in_sequence {
            log::debug!(
                "settle: document jumped from version {:?} to {}; dropping {} span(s)",
                self.version,
                change.version,
                self.len()
            );
        }

        for iv in self.intervals.iter_mut().filter(|iv| iv.valid) {
            let mapped = if in_sequence {
                iv.span.map_through(change)
            } else {
                None
            };
            match mapped {
                Some(span) => {
                    iv.span = span;
                    iv.version = change.version;
                }
                None => iv.valid = false,
            }
        }

        self.version = Some(change.version);
        self.on_insert(change.inserted_spans(), now)
    }

    /// Mark intervals as unpaintable and drop them.
    pub fn invalidate(&mut self, ids: &[IntervalId]) {
        if ids.is_empty() {
            return;
        }
        let before = self.len();
        self.intervals.retain(|iv| !ids.contains(&iv.id));
        log::debug!("settle: dropped {} unpaintable span(s)", before - self.len());
    }

    /// Drop settled and invalidated intervals. Returns the survivors.
    pub fn prune(&mut self, now: Instant, settings: &Settings) -> &[SettlingInterval] {
        let duration = settings.duration();
        self.intervals.retain(|iv| iv.valid && iv.age(now) <= duration);
        &self.intervals
    }
}
