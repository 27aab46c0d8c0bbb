//! Interactive element picker.
//!
//! While armed, the session follows the pointer with an overlay, captures the
//! element under a click and treats Escape as cancellation. The outcome is
//! published through a one-shot signal carried by the [`PickerHandle`], so
//! the inspector side awaits it instead of polling the page.
//!
//! # Example
//!
//! ```ignore
//! let mut handle = session.arm(&mut host);
//! session.handle(&mut host, &PageEvent::PointerMove { target: button });
//! session.handle(&mut host, &PageEvent::Click { target: button });
//!
//! assert_eq!(handle.outcome().await, PickerOutcome::Selected);
//! let PickerSelection::Selected(element) = session.finish(handle.session()) else { unreachable!() };
//! ```

mod event;
mod outcome;
mod session;

pub use event::{EventDisposition, PageEvent};
pub use outcome::{PickerHandle, PickerOutcome, PickerSelection, PickerStatus, SessionId};
pub use session::PickerSession;
