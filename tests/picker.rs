mod common;

use lensing::{
    ComponentId, Config, Inspector, OverlayKind, PickerResolution, Rect,
    memory::MemoryHost,
    picker::{PageEvent, PickerOutcome, PickerStatus},
};

fn inspector() -> (Inspector<MemoryHost>, common::TodoPage) {
    let mut page = common::todo_page();
    let host = std::mem::take(&mut page.host);
    (Inspector::new(host, Config::default()), page)
}

#[test]
fn test_escape_cancels_and_detaches() {
    let (mut inspector, page) = inspector();
    let handle = inspector.arm_picker();
    let session = handle.session();

    inspector.dispatch(&PageEvent::PointerMove { target: page.labels[0] });
    let disposition = inspector.dispatch(&PageEvent::escape());
    assert!(disposition.is_swallowed());
    assert_eq!(
        inspector.poll_picker(session),
        PickerStatus {
            selected: false,
            cancelled: true
        }
    );
    assert_eq!(handle.current(), PickerOutcome::Cancelled);
    assert!(!inspector.is_picking());
    assert!(!inspector.host().overlay(OverlayKind::Picker).unwrap().visible);

    // Listeners are gone: a later click reaches the page untouched.
    let disposition = inspector.dispatch(&PageEvent::Click { target: page.items[0] });
    assert!(!disposition.is_swallowed());
    assert!(!inspector.poll_picker(session).selected);

    assert_eq!(inspector.resolve_picker(session), PickerResolution::Cancelled);
}

#[test]
fn test_click_selects_hovered_element() {
    let (mut inspector, page) = inspector();
    let handle = inspector.arm_picker();
    let session = handle.session();

    assert_eq!(inspector.poll_picker(session), PickerStatus::default());
    assert_eq!(inspector.resolve_picker(session), PickerResolution::Pending);

    inspector.dispatch(&PageEvent::PointerMove { target: page.header });
    let overlay = inspector.host().overlay(OverlayKind::Picker).unwrap();
    assert_eq!(overlay.rect, Rect::new(0.0, 0.0, 800.0, 60.0));
    assert!(overlay.visible);

    inspector.dispatch(&PageEvent::PointerMove { target: page.labels[1] });
    let disposition = inspector.dispatch(&PageEvent::Click { target: page.labels[1] });
    assert!(disposition.is_swallowed());
    assert!(inspector.poll_picker(session).selected);
    assert_eq!(handle.current(), PickerOutcome::Selected);

    assert_eq!(
        inspector.resolve_picker(session),
        PickerResolution::Selected(Some(ComponentId::new(4)))
    );
    // Resolution consumes the session.
    assert_eq!(inspector.resolve_picker(session), PickerResolution::Cancelled);
    assert_eq!(inspector.poll_picker(session), PickerStatus::default());
}

#[test]
fn test_click_without_hover_selects_click_target() {
    let (mut inspector, page) = inspector();
    let session = inspector.arm_picker().session();

    inspector.dispatch(&PageEvent::Click { target: page.list });
    assert_eq!(
        inspector.resolve_picker(session),
        PickerResolution::Selected(Some(ComponentId::new(2)))
    );
}

#[test]
fn test_selection_outside_application_resolves_to_none() {
    let (mut inspector, page) = inspector();
    let session = inspector.arm_picker().session();

    inspector.dispatch(&PageEvent::PointerMove { target: page.outside });
    inspector.dispatch(&PageEvent::Click { target: page.outside });
    assert_eq!(inspector.resolve_picker(session), PickerResolution::Selected(None));
}

#[test]
fn test_other_keys_pass_through() {
    let (mut inspector, _) = inspector();
    let session = inspector.arm_picker().session();

    let disposition = inspector.dispatch(&PageEvent::key("Enter"));
    assert!(!disposition.is_swallowed());
    assert!(inspector.is_picking());
    assert_eq!(inspector.poll_picker(session), PickerStatus::default());
}

#[test]
fn test_rearming_tears_down_previous_session() {
    let (mut inspector, page) = inspector();
    let first = inspector.arm_picker();
    inspector.dispatch(&PageEvent::PointerMove { target: page.header });

    let second = inspector.arm_picker();
    assert_ne!(first.session(), second.session());
    assert_eq!(first.current(), PickerOutcome::Cancelled);
    assert!(inspector.host().overlay(OverlayKind::Picker).is_none());

    inspector.dispatch(&PageEvent::Click { target: page.items[0] });
    assert_eq!(inspector.poll_picker(first.session()), PickerStatus::default());
    assert!(inspector.poll_picker(second.session()).selected);
}

#[test]
fn test_disable_is_idempotent() {
    let (mut inspector, page) = inspector();
    let handle = inspector.arm_picker();
    let session = handle.session();
    inspector.dispatch(&PageEvent::PointerMove { target: page.header });

    inspector.disable_picker(session);
    assert!(!inspector.is_picking());
    assert_eq!(handle.current(), PickerOutcome::Cancelled);
    assert!(inspector.host().overlay(OverlayKind::Picker).is_none());

    inspector.disable_picker(session);
    assert!(!inspector.is_picking());

    let disposition = inspector.dispatch(&PageEvent::Click { target: page.header });
    assert!(!disposition.is_swallowed());
}

#[test]
fn test_disable_ignores_stale_session() {
    let (mut inspector, _) = inspector();
    let stale = inspector.arm_picker().session();
    inspector.disable_picker(stale);

    let current = inspector.arm_picker().session();
    inspector.disable_picker(stale);
    assert!(inspector.is_picking());
    assert_eq!(inspector.resolve_picker(current), PickerResolution::Pending);
}

#[tokio::test]
async fn test_handle_completes_when_selected() {
    let (mut inspector, page) = inspector();
    let mut handle = inspector.arm_picker();

    inspector.dispatch(&PageEvent::Click { target: page.items[0] });
    assert_eq!(handle.outcome().await, PickerOutcome::Selected);
}
