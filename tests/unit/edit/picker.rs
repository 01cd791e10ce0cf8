use std::sync::{Arc, Mutex};

use super::*;
use crate::edit::state::EditState;
use crate::template::model::TemplateSpec;

#[test]
fn unsupported_platform_yields_no_subscription() {
    let hub = ColorPickEvents::new(false);
    assert!(!hub.is_supported());
    assert!(hub.subscribe(|_| {}).is_none());
    assert_eq!(hub.listener_count(), 0);
    hub.emit(HexColor::rgb(1, 2, 3));
}

#[test]
fn picks_flow_into_edit_state_until_unsubscribed() {
    let hub = ColorPickEvents::new(true);
    let state = Arc::new(Mutex::new(EditState::from_template(&TemplateSpec::default())));

    let sink = Arc::clone(&state);
    let sub = hub
        .subscribe(move |c| sink.lock().unwrap().pick_custom_color(c))
        .expect("supported");
    assert_eq!(hub.listener_count(), 1);

    hub.emit(HexColor::rgb(10, 20, 30));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.selected_color, HexColor::rgb(10, 20, 30));
        assert_eq!(s.color_history.len(), 2);
    }

    sub.unsubscribe();
    assert_eq!(hub.listener_count(), 0);
    hub.emit(HexColor::rgb(99, 99, 99));
    assert_eq!(state.lock().unwrap().selected_color, HexColor::rgb(10, 20, 30));
}

#[test]
fn dropping_one_handle_keeps_the_others() {
    let hub = ColorPickEvents::new(true);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let a = {
        let seen = Arc::clone(&seen);
        hub.subscribe(move |c| seen.lock().unwrap().push(("a", c)))
    };
    let b = {
        let seen = Arc::clone(&seen);
        hub.subscribe(move |c| seen.lock().unwrap().push(("b", c)))
    };
    drop(a);
    hub.emit(HexColor::rgb(0, 0, 0));
    assert_eq!(*seen.lock().unwrap(), vec![("b", HexColor::rgb(0, 0, 0))]);
    drop(b);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn handle_outliving_hub_is_harmless() {
    let hub = ColorPickEvents::new(true);
    let sub = hub.subscribe(|_| {});
    drop(hub);
    drop(sub);
}
