//! Network-side observation of module assets loaded by the page.

mod feed;
mod matcher;

pub use feed::{AssetFeed, AssetModule, ListenerId, ProjectAssets};
pub use matcher::{AssetMatcher, AssetRequest};
