use super::*;
use tokio::sync::broadcast::error::TryRecvError;

fn events(count: usize) -> Vec<Event> {
    (1..=count)
        .map(|n| Event::new(n as i64, format!("E{n}"), format!("2024-07-{n:02}")))
        .collect()
}

fn names(controller: &EventDisplayController) -> Vec<&str> {
    controller
        .visible_events()
        .iter()
        .map(|event| event.name.as_str())
        .collect()
}

#[test]
fn show_more_grows_by_one_page_per_call() {
    let mut controller = EventDisplayController::with_events(2, events(3));
    for n in 0..10 {
        assert_eq!(controller.visible_count(), 2 + n * 2);
        assert_eq!(
            controller.visible_events().len(),
            controller.visible_count().min(controller.total())
        );
        controller.show_more();
    }
}

#[test]
fn show_less_always_resets_to_first_page() {
    let mut controller = EventDisplayController::with_events(2, events(9));
    controller.show_less();
    assert_eq!(controller.visible_count(), 2);
    assert!(!controller.can_show_less());

    for _ in 0..4 {
        controller.show_more();
    }
    controller.show_less();
    assert_eq!(controller.visible_count(), 2);
    assert!(!controller.can_show_less());

    controller.show_less();
    assert_eq!(controller.visible_count(), 2);
}

#[test]
fn has_more_is_false_exactly_when_everything_is_visible() {
    let mut controller = EventDisplayController::with_events(3, events(7));
    loop {
        let all_visible = controller.visible_events().len() == controller.total();
        assert_eq!(controller.has_more(), !all_visible);
        if all_visible {
            break;
        }
        controller.show_more();
    }
}

#[test]
fn five_events_with_page_size_two() {
    let mut controller = EventDisplayController::with_events(2, events(5));
    assert_eq!(names(&controller), ["E1", "E2"]);
    assert!(controller.has_more());
    assert!(!controller.can_show_less());
    assert_eq!(controller.count_label().as_deref(), Some("2 of 5"));

    controller.show_more();
    assert_eq!(names(&controller), ["E1", "E2", "E3", "E4"]);
    assert!(controller.has_more());
    assert!(controller.can_show_less());

    controller.show_more();
    assert_eq!(names(&controller), ["E1", "E2", "E3", "E4", "E5"]);
    assert!(!controller.has_more());
    assert_eq!(controller.visible_count(), 6);
    assert_eq!(controller.count_label().as_deref(), Some("5 of 5"));

    controller.show_less();
    assert_eq!(names(&controller), ["E1", "E2"]);
    assert!(!controller.can_show_less());
}

#[test]
fn empty_list_has_no_controls_and_no_count() {
    let controller = EventDisplayController::new(DEFAULT_PAGE_SIZE);
    assert!(controller.visible_events().is_empty());
    assert!(controller.is_empty());
    assert!(!controller.has_more());
    assert!(!controller.can_show_less());
    assert!(!controller.shows_pagination_controls());
    assert_eq!(controller.count_label(), None);
}

#[test]
fn exactly_one_page_never_shows_controls() {
    let mut controller = EventDisplayController::with_events(2, events(2));
    assert!(!controller.shows_pagination_controls());
    assert!(!controller.has_more());

    controller.show_more();
    assert!(!controller.shows_pagination_controls());
}

#[test]
fn fewer_events_than_a_page_show_everything_without_controls() {
    let controller = EventDisplayController::with_events(2, events(1));
    assert!(!controller.shows_pagination_controls());
    assert!(!controller.has_more());
    assert!(!controller.can_show_less());
    assert_eq!(names(&controller), ["E1"]);
    assert_eq!(controller.count_label().as_deref(), Some("1 of 1"));
}

#[test]
fn zero_page_size_is_raised_to_one() {
    let mut controller = EventDisplayController::with_events(0, events(3));
    assert_eq!(controller.page_size(), 1);
    assert_eq!(names(&controller), ["E1"]);
    controller.show_more();
    assert_eq!(names(&controller), ["E1", "E2"]);
}

#[test]
fn replacing_events_starts_over_on_first_page() {
    let mut controller = EventDisplayController::with_events(2, events(5));
    controller.show_more();
    controller.show_more();

    controller.set_events(events(4));
    assert_eq!(controller.visible_count(), 2);
    assert_eq!(names(&controller), ["E1", "E2"]);
}

#[test]
fn subscribers_see_every_transition_with_post_state() {
    let mut controller = EventDisplayController::new(2);
    let mut rx = controller.subscribe();

    controller.set_events(events(3));
    controller.show_more();
    controller.show_less();

    let replaced = rx.try_recv().expect("replaced");
    assert_eq!(replaced.transition, Transition::EventsReplaced);
    assert_eq!(replaced.snapshot.shown, 2);
    assert!(replaced.snapshot.has_more);

    let more = rx.try_recv().expect("more");
    assert_eq!(more.transition, Transition::ShowMore);
    assert_eq!(more.snapshot.shown, 3);
    assert!(!more.snapshot.has_more);
    assert!(more.snapshot.can_show_less);

    let less = rx.try_recv().expect("less");
    assert_eq!(less.transition, Transition::ShowLess);
    assert_eq!(less.snapshot, controller.snapshot());

    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}
