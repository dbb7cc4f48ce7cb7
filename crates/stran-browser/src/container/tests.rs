//! Tests for tab container lifecycle and signal filtering.

use super::*;
use crate::profile::InjectedScript;
use crate::signals::{ChromeState, TabSignal};
use crate::testing::{FakeEngine, SurfaceCall};
use stran_config::StaticSettings;

fn container() -> (TabContainer, FakeEngine) {
    let profile = Arc::new(ContentProfile::new(
        "stran",
        vec![InjectedScript::new("translator", "")],
    ));
    (TabContainer::new(WindowId(1), profile), FakeEngine::default())
}

fn open(container: &mut TabContainer, engine: &mut FakeEngine, background: bool) -> TabId {
    container.create_tab(engine, background).unwrap().0
}

fn assert_active_valid(container: &TabContainer) {
    match container.active_index() {
        None => assert!(container.is_empty()),
        Some(i) => assert!(i < container.len()),
    }
}

fn tab_signals(signals: &[ContainerSignal]) -> impl Iterator<Item = &TabSignal> {
    signals.iter().filter_map(|s| match s {
        ContainerSignal::Tab(signal) => Some(signal),
        ContainerSignal::CloseRequested => None,
    })
}

fn chrome_after(signals: &[ContainerSignal], mut chrome: ChromeState) -> ChromeState {
    for signal in tab_signals(signals) {
        chrome.apply(signal);
    }
    chrome
}

// =============================================================================
// Creation and activation
// =============================================================================

#[test]
fn first_tab_becomes_active_even_in_background() {
    let (mut c, mut engine) = container();
    let (id, signals) = c.create_tab(&mut engine, true).unwrap();
    assert_eq!(c.active_index(), Some(0));
    assert_eq!(c.active_tab().unwrap().id(), id);
    assert_eq!(signals.len(), 5);
}

#[test]
fn foreground_tab_takes_focus() {
    let (mut c, mut engine) = container();
    let first = open(&mut c, &mut engine, false);
    let second = open(&mut c, &mut engine, false);

    assert_eq!(c.active_index(), Some(1));
    assert_eq!(engine.surface(first).last_visibility(), Some(false));
    assert_eq!(engine.surface(second).last_visibility(), Some(true));
}

#[test]
fn background_tab_keeps_current_focus() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    let (bg, signals) = c.create_tab(&mut engine, true).unwrap();

    assert!(signals.is_empty());
    assert_eq!(c.active_index(), Some(0));
    assert_eq!(engine.surface(bg).last_visibility(), Some(false));
}

#[test]
fn every_tab_shares_the_profile() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    open(&mut c, &mut engine, true);
    assert_eq!(engine.profiles.len(), 2);
    assert!(engine.profiles.iter().all(|p| Arc::ptr_eq(p, c.profile())));
}

#[test]
fn failed_surface_creation_adds_nothing() {
    let (mut c, mut engine) = container();
    engine.fail_surfaces = true;
    assert!(c.create_tab(&mut engine, false).is_err());
    assert!(c.is_empty());
    assert_eq!(c.active_index(), None);
}

// =============================================================================
// Closing
// =============================================================================

#[test]
fn closing_last_tab_requests_close_once() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);

    let signals = c.close_tab(0);
    let closes = signals
        .iter()
        .filter(|s| **s == ContainerSignal::CloseRequested)
        .count();
    assert_eq!(closes, 1);
    assert!(c.is_empty());
    assert_eq!(c.active_index(), None);

    // the window sees the empty state before the close request
    let chrome = chrome_after(&signals, ChromeState {
        page_title: "stale".into(),
        back_enabled: true,
        translation_enabled: true,
        ..Default::default()
    });
    assert_eq!(chrome, ChromeState::default());

    assert!(c.close_tab(0).is_empty());
}

#[test]
fn closing_active_tab_activates_right_neighbour() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    open(&mut c, &mut engine, false);
    let third = open(&mut c, &mut engine, false);
    c.set_active(1);

    c.close_tab(1);
    assert_eq!(c.active_index(), Some(1));
    assert_eq!(c.active_tab().unwrap().id(), third);
}

#[test]
fn closing_rightmost_active_tab_activates_new_last() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    let second = open(&mut c, &mut engine, false);
    open(&mut c, &mut engine, false);

    c.close_tab(2);
    assert_eq!(c.active_index(), Some(1));
    assert_eq!(c.active_tab().unwrap().id(), second);
}

#[test]
fn closing_tab_before_active_keeps_active_tab() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    open(&mut c, &mut engine, false);
    let third = open(&mut c, &mut engine, false);

    let signals = c.close_tab(0);
    assert!(signals.is_empty());
    assert_eq!(c.active_index(), Some(1));
    assert_eq!(c.active_tab().unwrap().id(), third);
}

#[test]
fn removed_tabs_wait_for_flush() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    open(&mut c, &mut engine, false);

    c.close_tab(0);
    assert_eq!(c.pending_disposal(), 1);
    assert_eq!(c.flush_disposed(), 1);
    assert_eq!(c.pending_disposal(), 0);
}

#[test]
fn out_of_range_close_is_ignored() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    assert!(c.close_tab(5).is_empty());
    assert_eq!(c.len(), 1);
}

#[test]
fn active_index_stays_valid_over_any_sequence() {
    let (mut c, mut engine) = container();
    // deterministic pseudo-random walk over create/close/select/move
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let len = c.len();
        match seed % 5 {
            0 | 1 => {
                c.create_tab(&mut engine, seed % 3 == 0).unwrap();
            }
            2 if len > 0 => {
                c.close_tab((seed as usize / 7) % (len + 1));
            }
            3 if len > 0 => {
                c.set_active((seed as usize / 11) % len);
            }
            4 if len > 1 => {
                c.move_tab((seed as usize / 13) % len, (seed as usize / 17) % len);
            }
            _ => {}
        }
        assert_active_valid(&c);
    }
}

// =============================================================================
// Signal filtering
// =============================================================================

#[test]
fn background_tab_signals_are_dropped() {
    let (mut c, mut engine) = container();
    let front = open(&mut c, &mut engine, false);
    let back = open(&mut c, &mut engine, true);

    let signals = c.handle_surface_event(back, &SurfaceEvent::TitleChanged("Background".into()));
    assert!(signals.is_empty());
    assert_eq!(c.tab(1).unwrap().title(), "Background");

    let signals = c.handle_surface_event(front, &SurfaceEvent::TitleChanged("Front".into()));
    assert_eq!(
        signals,
        vec![ContainerSignal::Tab(TabSignal::TitleChanged("Front".into()))]
    );
}

#[test]
fn switching_tabs_replays_full_state() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    let other = open(&mut c, &mut engine, true);

    c.handle_surface_event(other, &SurfaceEvent::UrlChanged("https://b.test/".into()));
    c.handle_surface_event(
        other,
        &SurfaceEvent::NavigationEnabledChanged {
            action: NavAction::Forward,
            enabled: true,
        },
    );

    let signals = c.set_active(1);
    let chrome = chrome_after(&signals, ChromeState::default());
    assert!(chrome.matches(c.tab(1).unwrap().state()));
    assert_eq!(chrome.address, "https://b.test/");
    assert!(chrome.forward_enabled);
    assert!(!chrome.back_enabled);
}

#[test]
fn selecting_active_tab_again_emits_nothing() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    assert!(c.set_active(0).is_empty());
}

#[test]
fn page_close_request_closes_its_tab() {
    let (mut c, mut engine) = container();
    let first = open(&mut c, &mut engine, false);
    open(&mut c, &mut engine, false);

    c.handle_surface_event(first, &SurfaceEvent::CloseRequested);
    assert_eq!(c.len(), 1);
    assert!(!c.contains(first));
}

#[test]
fn events_for_unknown_tabs_are_ignored() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    assert!(c
        .handle_surface_event(TabId(u32::MAX), &SurfaceEvent::LoadFinished)
        .is_empty());
}

// =============================================================================
// Delegation
// =============================================================================

#[test]
fn set_url_and_actions_go_to_active_tab_only() {
    let (mut c, mut engine) = container();
    let first = open(&mut c, &mut engine, false);
    let second = open(&mut c, &mut engine, true);

    assert!(c.set_url("https://example.com/"));
    assert!(c.trigger_navigation_action(NavAction::Back));

    assert_eq!(
        engine.surface(first).content_calls(),
        vec![
            SurfaceCall::Load("https://example.com/".into()),
            SurfaceCall::Action(NavAction::Back)
        ]
    );
    assert!(engine.surface(second).content_calls().is_empty());
}

#[test]
fn delegation_without_tabs_is_a_noop() {
    let (mut c, _) = container();
    assert!(!c.set_url("https://example.com/"));
    assert!(!c.trigger_navigation_action(NavAction::Reload));
    let mut notifications = NotificationQueue::default();
    assert!(c
        .toggle_translation(&StaticSettings::new("sk", "ko"), &mut notifications)
        .is_empty());
}

#[test]
fn toggle_without_key_emits_nothing() {
    let (mut c, mut engine) = container();
    open(&mut c, &mut engine, false);
    let mut notifications = NotificationQueue::default();

    let signals = c.toggle_translation(&StaticSettings::default(), &mut notifications);
    assert!(signals.is_empty());
    assert!(!c.active_tab().unwrap().is_translation_enabled());
    assert_eq!(notifications.len(), 1);
}

#[test]
fn delivery_to_closed_tab_reports_false() {
    let (mut c, mut engine) = container();
    let first = open(&mut c, &mut engine, false);
    open(&mut c, &mut engine, false);

    assert!(c.deliver_translation(first, "{}"));
    c.close_tab_by_id(first);
    assert!(!c.deliver_translation(first, "{}"));
    assert!(!c.send_bridge_reply(first, 1, "{}"));
}

// =============================================================================
// Reordering
// =============================================================================

#[test]
fn move_keeps_same_tab_active() {
    let (mut c, mut engine) = container();
    let a = open(&mut c, &mut engine, false);
    let b = open(&mut c, &mut engine, false);
    let d = open(&mut c, &mut engine, false);
    c.set_active(0);

    assert!(c.move_tab(0, 2));
    let order: Vec<_> = c.tabs().iter().map(Tab::id).collect();
    assert_eq!(order, vec![b, d, a]);
    assert_eq!(c.active_index(), Some(2));
    assert_eq!(c.active_tab().unwrap().id(), a);

    assert!(!c.move_tab(0, 3));
}

#[test]
fn summaries_mark_active_tab() {
    let (mut c, mut engine) = container();
    let a = open(&mut c, &mut engine, false);
    open(&mut c, &mut engine, true);
    c.handle_surface_event(a, &SurfaceEvent::TitleChanged("Alpha".into()));

    let summaries = c.summaries();
    assert_eq!(summaries[0].label, "Alpha");
    assert!(summaries[0].active);
    assert_eq!(summaries[1].label, "New Tab");
    assert!(!summaries[1].active);
}
