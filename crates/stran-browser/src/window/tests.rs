//! Tests for window chrome projection and the close state machine.

use super::*;
use crate::profile::InjectedScript;
use crate::testing::{FakeEngine, SurfaceCall};
use stran_config::StaticSettings;

fn window() -> (Window, FakeEngine) {
    let mut engine = FakeEngine::default();
    let profile = Arc::new(ContentProfile::new(
        "stran",
        vec![InjectedScript::new("translator", "")],
    ));
    let window = Window::create(&mut engine, profile, Geometry::default(), "about:blank").unwrap();
    (window, engine)
}

fn with_tabs(count: usize) -> (Window, FakeEngine) {
    let (mut w, mut engine) = window();
    for _ in 1..count {
        w.create_tab(&mut engine, false).unwrap();
    }
    (w, engine)
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn new_window_has_one_active_tab() {
    let (w, engine) = window();
    assert_eq!(w.container().len(), 1);
    assert_eq!(w.container().active_index(), Some(0));
    assert_eq!(engine.opened, vec![(w.id(), Geometry::new(100, 100, 800, 600))]);
    assert_eq!(w.title(), "S-Tran");

    let tab = w.active_tab_id().unwrap();
    assert_eq!(
        engine.surface(tab).content_calls(),
        vec![SurfaceCall::Load("about:blank".into())]
    );
}

#[test]
fn failed_initial_tab_closes_native_window() {
    let mut engine = FakeEngine {
        fail_surfaces: true,
        ..Default::default()
    };
    let profile = Arc::new(ContentProfile::new("stran", Vec::new()));
    let result = Window::create(&mut engine, profile, Geometry::default(), "");
    assert!(result.is_err());
    assert_eq!(engine.opened.len(), 1);
    assert_eq!(engine.closed, vec![engine.opened[0].0]);
}

// =============================================================================
// Chrome projection
// =============================================================================

#[test]
fn active_tab_title_reaches_window_title() {
    let (mut w, _) = window();
    let tab = w.active_tab_id().unwrap();
    w.handle_surface_event(tab, &SurfaceEvent::TitleChanged("Example Domain".into()))
        .unwrap();
    assert_eq!(w.title(), "Example Domain - S-Tran");
}

#[test]
fn background_tab_events_leave_chrome_untouched() {
    let (mut w, mut engine) = window();
    let front = w.active_tab_id().unwrap();
    w.handle_surface_event(front, &SurfaceEvent::UrlChanged("https://front.test/".into()))
        .unwrap();
    let back = w.create_tab(&mut engine, true).unwrap();

    let before = w.chrome().clone();
    let events = [
        SurfaceEvent::TitleChanged("Background".into()),
        SurfaceEvent::UrlChanged("https://back.test/".into()),
        SurfaceEvent::NavigationEnabledChanged {
            action: NavAction::Back,
            enabled: true,
        },
        SurfaceEvent::NavigationEnabledChanged {
            action: NavAction::Forward,
            enabled: true,
        },
        SurfaceEvent::LoadFinished,
    ];
    for event in &events {
        w.handle_surface_event(back, event).unwrap();
        assert_eq!(w.chrome(), &before);
    }
}

#[test]
fn switching_tabs_mirrors_new_tab_exactly() {
    let (mut w, mut engine) = window();
    let settings = StaticSettings::new("sk", "ko");
    let mut notifications = NotificationQueue::default();

    let first = w.active_tab_id().unwrap();
    w.handle_surface_event(first, &SurfaceEvent::TitleChanged("First".into()))
        .unwrap();
    w.handle_surface_event(
        first,
        &SurfaceEvent::NavigationEnabledChanged {
            action: NavAction::Back,
            enabled: true,
        },
    )
    .unwrap();
    w.toggle_translation(&settings, &mut notifications).unwrap();
    assert!(w.chrome().translation_enabled);

    let second = w.create_tab(&mut engine, false).unwrap();
    assert!(w.chrome().matches(w.container().tab(1).unwrap().state()));
    assert_eq!(w.title(), "S-Tran");
    assert!(!w.chrome().back_enabled);
    assert!(!w.chrome().translation_enabled);

    w.handle_surface_event(second, &SurfaceEvent::TitleChanged("Second".into()))
        .unwrap();
    w.select_tab(0).unwrap();
    assert!(w.chrome().matches(w.container().tab(0).unwrap().state()));
    assert_eq!(w.title(), "First - S-Tran");
    assert!(w.chrome().back_enabled);
    assert!(w.chrome().translation_enabled);
}

#[test]
fn toggle_without_key_leaves_chrome_and_tab_unchanged() {
    let (mut w, _) = window();
    let mut notifications = NotificationQueue::default();
    let before = w.chrome().clone();

    w.toggle_translation(&StaticSettings::default(), &mut notifications)
        .unwrap();

    assert_eq!(w.chrome(), &before);
    assert!(!w.container().active_tab().unwrap().is_translation_enabled());
    assert_eq!(notifications.len(), 1);
}

#[test]
fn navigate_normalizes_address() {
    let (mut w, engine) = window();
    let tab = w.active_tab_id().unwrap();
    assert!(w.navigate("  example.com ").unwrap());
    assert!(!w.navigate("   ").unwrap());
    assert_eq!(
        engine.surface(tab).content_calls().last(),
        Some(&SurfaceCall::Load("https://example.com/".into()))
    );
}

// =============================================================================
// Close state machine
// =============================================================================

#[test]
fn single_tab_window_closes_without_confirmation() {
    let (mut w, _) = window();
    assert_eq!(w.request_close().unwrap(), CloseDecision::Closing);
    assert!(w.is_disposed());
    assert_eq!(w.take_closing_notice(), Some(w.id()));
    assert_eq!(w.take_closing_notice(), None);
}

#[test]
fn declining_confirmation_changes_nothing() {
    let (mut w, _) = with_tabs(2);
    w.select_tab(0).unwrap();
    let tabs_before: Vec<_> = w.container().tabs().iter().map(|t| t.id()).collect();
    let chrome_before = w.chrome().clone();

    assert_eq!(w.request_close().unwrap(), CloseDecision::NeedsConfirmation);
    assert_eq!(w.state(), WindowState::ConfirmPending);
    assert_eq!(w.resolve_close(false).unwrap(), CloseDecision::Cancelled);

    assert_eq!(w.state(), WindowState::Open);
    let tabs_after: Vec<_> = w.container().tabs().iter().map(|t| t.id()).collect();
    assert_eq!(tabs_after, tabs_before);
    assert_eq!(w.container().active_index(), Some(0));
    assert_eq!(w.chrome(), &chrome_before);
    assert_eq!(w.take_closing_notice(), None);
}

#[test]
fn pending_prompt_does_not_block_single_tab_close() {
    let (mut w, _) = with_tabs(2);
    assert_eq!(w.request_close().unwrap(), CloseDecision::NeedsConfirmation);
    assert_eq!(w.state(), WindowState::ConfirmPending);

    w.close_tab(1).unwrap();
    assert_eq!(w.container().len(), 1);

    assert_eq!(w.request_close().unwrap(), CloseDecision::Closing);
    assert!(w.is_disposed());
    assert_eq!(w.take_closing_notice(), Some(w.id()));
}

#[test]
fn repeated_request_keeps_prompt_pending() {
    let (mut w, _) = with_tabs(3);
    assert_eq!(w.request_close().unwrap(), CloseDecision::NeedsConfirmation);
    assert_eq!(w.request_close().unwrap(), CloseDecision::NeedsConfirmation);
    assert_eq!(w.resolve_close(false).unwrap(), CloseDecision::Cancelled);
    assert_eq!(w.state(), WindowState::Open);
    assert_eq!(w.container().len(), 3);
}

#[test]
fn accepting_confirmation_closes() {
    let (mut w, _) = with_tabs(3);
    assert_eq!(w.request_close().unwrap(), CloseDecision::NeedsConfirmation);
    assert_eq!(w.resolve_close(true).unwrap(), CloseDecision::Closing);
    assert!(w.is_disposed());
    assert!(w.container().is_empty());
    assert_eq!(w.container().pending_disposal(), 3);
    assert!(w.take_closing_notice().is_some());
}

#[test]
fn resolve_without_pending_request_is_a_noop() {
    let (mut w, _) = with_tabs(2);
    assert_eq!(w.resolve_close(true).unwrap(), CloseDecision::Cancelled);
    assert_eq!(w.state(), WindowState::Open);
}

#[test]
fn disposed_window_rejects_operations() {
    let (mut w, mut engine) = window();
    w.request_close().unwrap();

    assert!(matches!(
        w.request_close(),
        Err(BrowserError::WindowDisposed(_))
    ));
    assert!(w.create_tab(&mut engine, false).is_err());
    assert!(w.navigate("example.com").is_err());
    assert!(w.close_tab(0).is_err());
}

#[test]
fn closing_last_tab_closes_window_once() {
    let (mut w, _) = with_tabs(2);
    w.close_tab(0).unwrap();
    assert_eq!(w.state(), WindowState::Open);

    w.close_tab(0).unwrap();
    assert!(w.is_disposed());
    assert_eq!(w.chrome(), &ChromeState::default());
    assert!(w.take_closing_notice().is_some());
    assert!(w.take_closing_notice().is_none());
}

#[test]
fn page_close_of_only_tab_closes_window() {
    let (mut w, _) = window();
    let tab = w.active_tab_id().unwrap();
    w.handle_surface_event(tab, &SurfaceEvent::CloseRequested)
        .unwrap();
    assert!(w.is_disposed());
}
