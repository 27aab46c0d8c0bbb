use tokio::time::Duration;

use crate::OverlayStyle;

/// Inspector configuration.
///
/// Use the builder methods to customize, or [`Default`] for the values the
/// browser extension ships with.
///
/// # Examples
///
/// ```rust
/// use lensing::Config;
/// use std::time::Duration;
///
/// let config = Config::default()
///     .with_reveal_duration(Duration::from_secs(1))
///     .with_asset_host("assets.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of the request channel between client and page agent.
    /// Default: 64
    pub channel_size: usize,

    /// Capacity of the channel carrying DOM events into the page agent.
    /// Pointer moves arrive at the page's native rate, so keep it roomy.
    /// Default: 256
    pub event_channel_size: usize,

    /// How long a reveal highlight stays fully visible.
    /// Default: 2 s
    pub reveal_duration: Duration,

    /// Fade-out time of a reveal highlight before it is removed.
    /// Default: 300 ms
    pub reveal_fade: Duration,

    /// Overlay following the pointer while picking.
    pub picker_overlay: OverlayStyle,

    /// Overlay drawn by reveal.
    pub reveal_overlay: OverlayStyle,

    /// Host serving module assets, see [`AssetMatcher`](crate::assets::AssetMatcher).
    pub asset_host: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            channel_size: 64,
            event_channel_size: 256,
            reveal_duration: Duration::from_millis(2000),
            reveal_fade: Duration::from_millis(300),
            picker_overlay: OverlayStyle::picker(),
            reveal_overlay: OverlayStyle::reveal(),
            asset_host: "d3mmydk2yvkj9n.cloudfront.net".into(),
        }
    }
}

impl Config {
    pub fn with_channel_size(mut self, size: usize) -> Self {
        self.channel_size = size;
        self
    }

    pub fn with_event_channel_size(mut self, size: usize) -> Self {
        self.event_channel_size = size;
        self
    }

    pub fn with_reveal_duration(mut self, duration: Duration) -> Self {
        self.reveal_duration = duration;
        self
    }

    pub fn with_reveal_fade(mut self, fade: Duration) -> Self {
        self.reveal_fade = fade;
        self
    }

    pub fn with_picker_overlay(mut self, style: OverlayStyle) -> Self {
        self.picker_overlay = style;
        self
    }

    pub fn with_reveal_overlay(mut self, style: OverlayStyle) -> Self {
        self.reveal_overlay = style;
        self
    }

    pub fn with_asset_host(mut self, host: impl Into<String>) -> Self {
        self.asset_host = host.into();
        self
    }
}
