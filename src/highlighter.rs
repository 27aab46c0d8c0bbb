use tokio::time::{Duration, Instant};

use crate::{Dom, OverlayKind, OverlayStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Visible { fade_at: Instant },
    Fading { remove_at: Instant },
}

/// Transient "reveal" highlight.
///
/// The highlight stays for `duration`, then fades out for `fade` and is
/// removed. The highlighter does not own a timer; whoever drives it asks for
/// [`Highlighter::deadline`] and calls [`Highlighter::advance`] when it passes.
pub struct Highlighter {
    phase: Option<Phase>,
    duration: Duration,
    fade: Duration,
    style: OverlayStyle,
}

impl Highlighter {
    pub fn new(duration: Duration, fade: Duration, style: OverlayStyle) -> Self {
        Self {
            phase: None,
            duration,
            fade,
            style,
        }
    }

    /// Replace any current highlight with one over `element` and scroll it
    /// into view.
    pub fn show<D: Dom>(&mut self, host: &mut D, element: &D::Element, now: Instant) {
        host.remove_overlay(OverlayKind::Reveal);
        let rect = host.page_rect(element);
        host.show_overlay(OverlayKind::Reveal, rect, &self.style);
        host.scroll_into_view(element);
        self.phase = Some(Phase::Visible {
            fade_at: now + self.duration,
        });
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.phase? {
            Phase::Visible { fade_at } => Some(fade_at),
            Phase::Fading { remove_at } => Some(remove_at),
        }
    }

    /// Apply every transition due at `now`.
    pub fn advance<D: Dom>(&mut self, host: &mut D, now: Instant) {
        if let Some(Phase::Visible { fade_at }) = self.phase {
            if now >= fade_at {
                host.set_overlay_opacity(OverlayKind::Reveal, 0.0);
                self.phase = Some(Phase::Fading {
                    remove_at: fade_at + self.fade,
                });
            }
        }
        if let Some(Phase::Fading { remove_at }) = self.phase {
            if now >= remove_at {
                host.remove_overlay(OverlayKind::Reveal);
                self.phase = None;
            }
        }
    }
}
