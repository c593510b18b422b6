use web_time::Instant;

use crate::animation::{Interpolate, progress};
use crate::{DocumentBounds, IntervalId, Settings, SettlingInterval, TextSpan};

/// Which visual channel carries the de-emphasis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Light themes fade text toward the background.
    Opacity,
    /// Dark themes darken text instead.
    Brightness,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Theme::Dark } else { Theme::Light }
    }

    pub fn channel(self) -> Channel {
        match self {
            Theme::Light => Channel::Opacity,
            Theme::Dark => Channel::Brightness,
        }
    }
}

/// Style descriptor for one mark. `value` is 1.0 when fully settled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleStyle {
    pub channel: Channel,
    pub value: f32,
}

impl SettleStyle {
    pub fn at(channel: Channel, progress: f32, intensity: f32) -> Self {
        let start = 1.0 - intensity;
        let value = if progress >= 1.0 {
            1.0
        } else {
            start.interpolate(&1.0, progress.max(0.0))
        };
        Self { channel, value }
    }

    pub fn is_settled(&self) -> bool {
        self.value >= 1.0
    }

    /// Inline style for hosts that paint with CSS.
    pub fn to_css(&self) -> String {
        match self.channel {
            Channel::Opacity => format!("opacity: {:.3}", self.value),
            Channel::Brightness => format!("filter: brightness({:.3})", self.value),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PaintInstruction {
    pub id: IntervalId,
    pub span: TextSpan,
    pub progress: f32,
    pub style: SettleStyle,
}

/// Output of one render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderPass {
    /// In tracker order; later entries win where spans overlap.
    pub instructions: Vec<PaintInstruction>,
    /// Intervals whose span no longer fits the document.
    pub invalid: Vec<IntervalId>,
}

/// Turns live intervals into paint instructions. Holds no state between
/// passes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressRenderer;

impl ProgressRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        intervals: &[SettlingInterval],
        now: Instant,
        settings: &Settings,
        theme: Theme,
        bounds: DocumentBounds,
    ) -> RenderPass {
        let duration = settings.duration();
        let channel = theme.channel();
        let mut pass = RenderPass::default();

        for iv in intervals {
            if !is_paintable(iv, bounds) {
                pass.invalid.push(iv.id);
                continue;
            }
            let p = progress(iv.created_at, now, duration);
            pass.instructions.push(PaintInstruction {
                id: iv.id,
                span: iv.span,
                progress: p,
                style: SettleStyle::at(channel, p, settings.intensity),
            });
        }

        pass
    }
}

fn is_paintable(iv: &SettlingInterval, bounds: DocumentBounds) -> bool {
    iv.is_valid() && iv.version == bounds.version && iv.span.fits(bounds.doc_len)
}
