use super::*;

#[test]
fn get_returns_the_latest_value() {
    let value = ObservableValue::new(0);
    assert_eq!(value.get(), 0);
    value.set(7);
    assert_eq!(value.get(), 7);
}

#[test]
fn subscribers_receive_every_set_in_order() {
    let value = ObservableValue::new("start".to_string());
    let rx = value.subscribe();

    value.set("a".to_string());
    value.set("b".to_string());

    assert_eq!(rx.try_recv().expect("first change"), "a");
    assert_eq!(rx.try_recv().expect("second change"), "b");
    assert!(rx.try_recv().is_err());
}

#[test]
fn redundant_sets_still_notify() {
    let value = ObservableValue::new(1);
    let rx = value.subscribe();

    value.set(1);
    value.set(1);

    assert_eq!(rx.try_recv().expect("first notification"), 1);
    assert_eq!(rx.try_recv().expect("second notification"), 1);
}

#[test]
fn subscription_starts_at_the_next_change() {
    let value = ObservableValue::new(1);
    value.set(2);

    let rx = value.subscribe();
    assert!(rx.try_recv().is_err());

    value.set(3);
    assert_eq!(rx.try_recv().expect("change after subscribe"), 3);
}

#[test]
fn dropped_subscribers_are_pruned() {
    let value = ObservableValue::new(0);
    let gone = value.subscribe();
    drop(gone);

    let live = value.subscribe();
    value.set(5);
    assert_eq!(live.try_recv().expect("live subscriber"), 5);
}

#[test]
fn clones_share_state() {
    let value = ObservableValue::new(0);
    let alias = value.clone();
    let rx = alias.subscribe();

    value.set(9);

    assert_eq!(alias.get(), 9);
    assert_eq!(rx.try_recv().expect("notified through alias"), 9);
}
