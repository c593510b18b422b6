//! Collaborator traits the host editor implements.

use thiserror::Error;
use web_time::Duration;

use crate::{Dispose, SettleStyle, TextSpan};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    #[error("span {}..{} is outside a document of length {doc_len}", .span.from(), .span.to())]
    OutOfBounds { span: TextSpan, doc_len: usize },
    #[error("span refers to a document version the host no longer has")]
    Stale,
}

/// Applies settle marks to the host's rendered text.
pub trait PaintSurface {
    /// Mark `span` with `style`. Failure drops the interval for good.
    fn paint(&mut self, span: TextSpan, style: &SettleStyle) -> Result<(), PaintError>;

    /// Called once per tick after every mark was applied.
    fn request_repaint(&mut self);
}

pub trait ThemeQuery {
    fn is_dark_theme(&self) -> bool;
}

/// Starts repeating timers on the host's event loop.
///
/// Each fire should call [`Driver::tick`](crate::Driver::tick). Running the
/// returned [`Dispose`] stops the timer.
pub trait TimerHost {
    fn start_repeating(&mut self, period: Duration) -> Dispose;
}

/// The host's generic key-value settings storage.
pub trait SettingsStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

impl SettingsStore for std::collections::HashMap<String, String> {
    fn load(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }
}
