//! Lensing - inspector for live reactive pages
//!
//! Walks the component tree of a running page, extracts per-component state
//! as JSON, resolves page elements back to the components that rendered them,
//! and drives an interactive element picker and a reveal highlight.
//!
//! The page is reached through the [`Dom`] and [`Framework`] traits.
//! [`Inspector`] bundles the operations for direct use inside the page;
//! [`agent`] splits them across an asynchronous boundary.
//!
//! See `demos/walkthrough.rs`.

mod component_id;
mod config;
mod error;
mod extractor;
mod highlighter;
mod host;
mod inspector;
mod live;
mod serializer;
mod walker;

pub mod agent;
pub mod assets;
pub mod locator;
pub mod memory;
pub mod picker;
pub mod stores;

pub use component_id::ComponentId;
pub use config::Config;
pub use error::Error;
pub use extractor::{DependencyRecord, ExtractedState, extract_state};
pub use highlighter::Highlighter;
pub use host::{Dom, Framework, OverlayKind, OverlayStyle, Point, Rect, Size};
pub use inspector::{Inspector, PickerResolution};
pub use live::{Live, LiveArray, LiveObject};
pub use serializer::{CIRCULAR_SENTINEL, MAX_DEPTH, SerializeError, UNSERIALIZABLE_SENTINEL, serialize, try_serialize};
pub use walker::{ANONYMOUS, ComponentNode, Visit, Walker};

pub type Result<T = ()> = std::result::Result<T, Error>;
