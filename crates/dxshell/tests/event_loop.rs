use std::{cell::RefCell, rc::Rc};

use dxshell::{
    event::{NativeId, OsEvent},
    input::{HeldButtons, KeyCode},
    platform::headless::{FailAt, Headless},
    ButtonState, CallbackKind, Config, Error, Extent, LoopStatus, MouseButton, Point, ScreenPx,
    Shell, SpecialKey, WindowIndex,
};

type Log = Rc<RefCell<Vec<String>>>;

fn shell() -> Shell<Headless> {
    Shell::with_platform(Headless::new(), Config::default())
}

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

fn id(shell: &Shell<Headless>, index: WindowIndex) -> NativeId {
    shell.get(Some(index)).unwrap().native_id()
}

fn push(shell: &mut Shell<Headless>, index: WindowIndex, event: OsEvent) {
    let id = id(shell, index);
    shell.platform_mut().push_event(id, event);
}

fn extent(width: u32, height: u32) -> Extent<u32, ScreenPx> {
    Extent::new(width, height)
}

fn point(x: i32, y: i32) -> Point<i32, ScreenPx> {
    Point::new(x, y)
}

#[test]
fn create_window_makes_it_active_and_current() {
    let mut shell = shell();
    shell.init_window_size(extent(200, 100));

    let a = shell.create_window("a").unwrap();
    assert_eq!(shell.window(), Some(a));
    assert_eq!(shell.window_extent(), Some(extent(200, 100)));
    assert_eq!(shell.platform().current_target(), Some(id(&shell, a)));

    let window = shell.get(None).unwrap();
    assert!(window.must_redisplay());
    assert!(window.changed_size());
    assert_eq!(window.surface().title(), "a");
}

#[test]
fn new_windows_start_at_their_client_size() {
    let log = log();
    let mut shell = shell();
    shell.platform_mut().set_frame(extent(16, 39));
    shell.init_window_size(extent(640, 480));

    let w = shell.create_window("w").unwrap();
    assert_eq!(shell.window_extent(), Some(extent(624, 441)));

    let l = log.clone();
    shell.reshape_func(move |_, e| l.borrow_mut().push(format!("{}x{}", e.width, e.height)));
    shell.step();

    assert_eq!(entries(&log), ["624x441"]);
    assert_eq!(shell.get(Some(w)).unwrap().surface().extent(), extent(624, 441));
}

#[test]
fn resize_reaches_only_the_resized_window() {
    let log = log();
    let mut shell = shell();

    shell.init_window_size(extent(200, 100));
    let a = shell.create_window("a").unwrap();
    let l = log.clone();
    shell.reshape_func(move |_, e| l.borrow_mut().push(format!("a {}x{}", e.width, e.height)));

    shell.init_window_size(extent(50, 50));
    let b = shell.create_window("b").unwrap();
    let l = log.clone();
    shell.reshape_func(move |_, e| l.borrow_mut().push(format!("b {}x{}", e.width, e.height)));

    assert_eq!(shell.step(), LoopStatus::Continue);
    assert_eq!(entries(&log), ["a 200x100", "b 50x50"]);
    log.borrow_mut().clear();

    push(&mut shell, a, OsEvent::Resized(extent(300, 150)));
    shell.step();
    shell.step();

    assert_eq!(entries(&log), ["a 300x150"]);
    assert_eq!(shell.get(Some(a)).unwrap().extent(), extent(300, 150));
    assert_eq!(shell.get(Some(a)).unwrap().surface().extent(), extent(300, 150));
    assert_eq!(shell.get(Some(b)).unwrap().extent(), extent(50, 50));
}

#[test]
fn reshape_runs_before_display() {
    let log = log();
    let mut shell = shell();
    shell.create_window("w").unwrap();

    let l = log.clone();
    shell.display_func(move |_| l.borrow_mut().push("display".to_owned()));
    let l = log.clone();
    shell.reshape_func(move |_, _| l.borrow_mut().push("reshape".to_owned()));

    shell.step();
    assert_eq!(entries(&log), ["reshape", "display"]);
}

#[test]
fn redisplay_from_display_is_deferred() {
    let count = Rc::new(RefCell::new(0));
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();

    let c = count.clone();
    shell.display_func(move |shell| {
        *c.borrow_mut() += 1;
        shell.post_redisplay();
    });

    shell.step();
    assert_eq!(*count.borrow(), 1);
    assert!(shell.get(Some(w)).unwrap().must_redisplay());

    shell.step();
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn display_acknowledges_the_paint_region() {
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();
    shell.display_func(|shell| shell.swap_buffers());

    shell.step();
    let surface = shell.get(Some(w)).unwrap().surface();
    assert_eq!(surface.presents(), 1);
    assert_eq!(surface.validations(), 1);

    push(&mut shell, w, OsEvent::Paint);
    shell.step();
    shell.step();
    assert_eq!(shell.get(Some(w)).unwrap().surface().validations(), 2);
}

#[test]
fn registering_a_callback_replaces_the_previous_one() {
    let log = log();
    let mut shell = shell();
    shell.create_window("w").unwrap();

    let l = log.clone();
    shell.display_func(move |_| l.borrow_mut().push("first".to_owned()));
    let l = log.clone();
    shell.display_func(move |_| l.borrow_mut().push("second".to_owned()));

    shell.step();
    assert_eq!(entries(&log), ["second"]);
}

#[test]
fn cleared_callbacks_are_not_invoked() {
    let log = log();
    let mut shell = shell();
    shell.create_window("w").unwrap();

    let l = log.clone();
    shell.display_func(move |_| l.borrow_mut().push("display".to_owned()));
    shell.clear_func(CallbackKind::Display);

    assert!(!shell.get(None).unwrap().callbacks().is_set(CallbackKind::Display));
    shell.step();
    assert!(entries(&log).is_empty());
}

#[test]
fn pointer_motion_is_routed_by_held_buttons() {
    let log = log();
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();

    let l = log.clone();
    shell.passive_motion_func(move |_, at| l.borrow_mut().push(format!("passive {},{}", at.x, at.y)));
    let l = log.clone();
    shell.motion_func(move |_, at| l.borrow_mut().push(format!("drag {},{}", at.x, at.y)));
    shell.idle_func(|_| {});

    push(&mut shell, w, OsEvent::PointerMoved {
        at: point(10, 20),
        held: HeldButtons::empty(),
    });
    push(&mut shell, w, OsEvent::PointerMoved {
        at: point(30, 40),
        held: HeldButtons::LEFT,
    });
    shell.step();

    assert_eq!(entries(&log), ["passive 10,20", "drag 30,40"]);
    assert_eq!(shell.get(Some(w)).unwrap().cursor_position(), point(30, 40));
}

#[test]
fn keys_are_sorted_into_keyboard_and_special_callbacks() {
    let log = log();
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();

    let l = log.clone();
    shell.keyboard_func(move |_, key, at| l.borrow_mut().push(format!("down {key:#x} {},{}", at.x, at.y)));
    let l = log.clone();
    shell.keyboard_up_func(move |_, key, _| l.borrow_mut().push(format!("up {key:#x}")));
    let l = log.clone();
    shell.special_func(move |_, key, _| l.borrow_mut().push(format!("special {key:?}")));
    let l = log.clone();
    shell.special_up_func(move |_, key, _| l.borrow_mut().push(format!("special up {key:?}")));
    shell.idle_func(|_| {});

    push(&mut shell, w, OsEvent::PointerMoved {
        at: point(5, 6),
        held: HeldButtons::empty(),
    });
    push(&mut shell, w, OsEvent::KeyDown(KeyCode(0x41)));
    push(&mut shell, w, OsEvent::KeyUp(KeyCode(0x41)));
    push(&mut shell, w, OsEvent::KeyDown(KeyCode(0x2E)));
    push(&mut shell, w, OsEvent::KeyDown(KeyCode(0xBC)));
    push(&mut shell, w, OsEvent::KeyDown(KeyCode(0x65)));
    push(&mut shell, w, OsEvent::KeyUp(KeyCode(0x6B)));
    push(&mut shell, w, OsEvent::KeyDown(KeyCode(0x70)));
    push(&mut shell, w, OsEvent::KeyUp(KeyCode(0x26)));
    shell.step();

    assert_eq!(
        entries(&log),
        [
            "down 0x41 5,6",
            "up 0x41",
            "down 0x7f 5,6",
            "down 0x2c 5,6",
            "down 0x35 5,6",
            "up 0x2b",
            "special F1",
            "special up Up",
        ]
    );
}

#[test]
fn mouse_buttons_report_the_cached_position() {
    let log: Rc<RefCell<Vec<(MouseButton, ButtonState, Point<i32, ScreenPx>)>>> =
        Rc::new(RefCell::new(Vec::new()));
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();

    let l = log.clone();
    shell.mouse_func(move |_, button, state, at| l.borrow_mut().push((button, state, at)));
    shell.idle_func(|_| {});

    push(&mut shell, w, OsEvent::PointerMoved {
        at: point(7, 8),
        held: HeldButtons::empty(),
    });
    push(&mut shell, w, OsEvent::Button {
        button: MouseButton::Right,
        state: ButtonState::Pressed,
    });
    push(&mut shell, w, OsEvent::Wheel { delta: -120 });
    push(&mut shell, w, OsEvent::Wheel { delta: 120 });
    shell.step();

    assert_eq!(
        *log.borrow(),
        [
            (MouseButton::Right, ButtonState::Pressed, point(7, 8)),
            (MouseButton::WheelDown, ButtonState::Pressed, point(7, 8)),
            (MouseButton::WheelDown, ButtonState::Released, point(7, 8)),
            (MouseButton::WheelUp, ButtonState::Pressed, point(7, 8)),
            (MouseButton::WheelUp, ButtonState::Released, point(7, 8)),
        ]
    );
}

#[test]
fn events_for_untracked_windows_are_ignored() {
    let log = log();
    let mut shell = shell();
    shell.create_window("w").unwrap();

    let l = log.clone();
    shell.keyboard_func(move |_, key, _| l.borrow_mut().push(format!("{key}")));
    shell.idle_func(|_| {});

    shell
        .platform_mut()
        .push_event(NativeId(999), OsEvent::KeyDown(KeyCode(0x41)));
    shell.step();

    assert!(entries(&log).is_empty());
    assert_eq!(shell.platform().pending(), 0);
}

#[test]
fn destroying_the_last_window_ends_the_loop() {
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();
    let native = id(&shell, w);

    shell.display_func(move |shell| shell.destroy_window(w));
    shell.main_loop();

    assert_eq!(shell.window_count(), 0);
    assert_eq!(shell.platform().quits_posted(), 1);
    assert_eq!(shell.platform().exhausted_waits(), 0);
    assert_eq!(shell.platform().destroyed(), [native]);
}

#[test]
fn close_request_destroys_the_window() {
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();
    push(&mut shell, w, OsEvent::CloseRequested);

    shell.main_loop();

    assert_eq!(shell.window_count(), 0);
    assert!(shell.get(Some(w)).is_none());
    assert_eq!(shell.platform().quits_posted(), 1);
}

#[test]
fn destroying_one_of_several_windows_keeps_the_loop_running() {
    let mut shell = shell();
    let a = shell.create_window("a").unwrap();
    let b = shell.create_window("b").unwrap();

    shell.destroy_window(a);
    assert_eq!(shell.platform().quits_posted(), 0);
    assert_eq!(shell.window_count(), 1);

    // Indices are never reused.
    let c = shell.create_window("c").unwrap();
    assert_ne!(c, a);
    assert_ne!(c, b);
}

#[test]
fn destroying_the_active_window_leaves_a_stale_index() {
    let mut shell = shell();
    let _a = shell.create_window("a").unwrap();
    let b = shell.create_window("b").unwrap();

    shell.destroy_window(b);

    assert_eq!(shell.window(), Some(b));
    assert!(shell.get(None).is_none());
    assert_eq!(shell.window_width(), None);
    assert_eq!(shell.window_height(), None);
}

#[test]
fn invalid_indices_are_ignored() {
    let mut shell = shell();
    let a = shell.create_window("a").unwrap();

    shell.set_window(WindowIndex(42));
    shell.destroy_window(WindowIndex(42));

    assert_eq!(shell.window(), Some(a));
    assert_eq!(shell.window_count(), 1);
}

#[test]
fn operations_without_windows_do_nothing() {
    let mut shell = shell();

    assert_eq!(shell.window(), None);
    assert!(shell.get(None).is_none());
    assert_eq!(shell.window_extent(), None);

    shell.display_func(|_| panic!("no window to register on"));
    shell.post_redisplay();
    shell.swap_buffers();
    shell.clear_func(CallbackKind::Mouse);

    assert_eq!(shell.window_count(), 0);
}

#[test]
fn idle_can_unregister_itself() {
    let count = Rc::new(RefCell::new(0));
    let mut shell = shell();

    let c = count.clone();
    shell.idle_func(move |shell| {
        *c.borrow_mut() += 1;
        if *c.borrow() == 3 {
            shell.clear_idle_func();
        }
    });
    shell.main_loop();

    assert_eq!(*count.borrow(), 3);
    // Nothing posts a quit, so the loop only ends once it waits on an empty
    // queue.
    assert_eq!(shell.platform().exhausted_waits(), 1);
    assert_eq!(shell.platform().quits_posted(), 0);
}

#[test]
fn idle_replaced_from_inside_idle_takes_effect() {
    let log = log();
    let mut shell = shell();

    let l = log.clone();
    shell.idle_func(move |shell| {
        l.borrow_mut().push("first".to_owned());
        let l = l.clone();
        shell.idle_func(move |shell| {
            l.borrow_mut().push("second".to_owned());
            shell.clear_idle_func();
        });
    });
    shell.main_loop();

    assert_eq!(entries(&log), ["first", "second"]);
}

#[test]
fn callbacks_see_their_own_window_as_active() {
    let log = log();
    let mut shell = shell();

    for title in ["a", "b"] {
        let index = shell.create_window(title).unwrap();
        let l = log.clone();
        shell.display_func(move |shell| {
            let active = shell.window() == Some(index);
            let current = shell.platform().current_target() == Some(shell.get(None).unwrap().native_id());
            l.borrow_mut().push(format!("{title} {active} {current}"));
        });
    }

    shell.step();
    assert_eq!(entries(&log), ["a true true", "b true true"]);
}

#[test]
fn windows_destroyed_during_a_scan_are_skipped() {
    let log = log();
    let mut shell = shell();

    let a = shell.create_window("a").unwrap();
    let b = shell.create_window("b").unwrap();

    shell.set_window(a);
    let l = log.clone();
    shell.display_func(move |shell| {
        l.borrow_mut().push("a".to_owned());
        shell.destroy_window(b);
    });

    shell.set_window(b);
    let l = log.clone();
    shell.display_func(move |_| l.borrow_mut().push("b".to_owned()));

    shell.step();
    assert_eq!(entries(&log), ["a"]);
    assert_eq!(shell.window_count(), 1);
}

#[test]
fn failed_creation_registers_nothing() {
    let mut shell = shell();

    shell.platform_mut().fail_next_surface(FailAt::SwapChain);
    assert!(matches!(shell.create_window("w"), Err(Error::SwapChain(_))));

    shell.platform_mut().fail_next_surface(FailAt::Window);
    assert!(matches!(shell.create_window("w"), Err(Error::Window { .. })));

    shell.platform_mut().fail_next_surface(FailAt::RenderTarget);
    assert!(matches!(shell.create_window("w"), Err(Error::RenderTarget(_))));

    assert_eq!(shell.window_count(), 0);
    assert_eq!(shell.window(), None);

    assert!(shell.create_window("w").is_ok());
}

#[test]
fn request_exit_ends_the_loop_after_pending_events() {
    let log = log();
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();

    let l = log.clone();
    shell.keyboard_func(move |_, key, _| l.borrow_mut().push(format!("{key:#x}")));
    shell.idle_func(|shell| shell.request_exit());

    push(&mut shell, w, OsEvent::KeyDown(KeyCode(0x20)));
    assert_eq!(shell.step(), LoopStatus::Continue);
    assert_eq!(shell.step(), LoopStatus::Exit);

    assert_eq!(entries(&log), ["0x20"]);
    assert_eq!(shell.window_count(), 1);
}

#[test]
fn special_key_names_the_function_key() {
    let log: Rc<RefCell<Vec<SpecialKey>>> = Rc::new(RefCell::new(Vec::new()));
    let mut shell = shell();
    let w = shell.create_window("w").unwrap();

    let l = log.clone();
    shell.special_func(move |_, key, _| l.borrow_mut().push(key));
    shell.idle_func(|_| {});

    for code in [0x70, 0x7B, 0x24, 0x91] {
        push(&mut shell, w, OsEvent::KeyDown(KeyCode(code)));
    }
    shell.step();

    assert_eq!(
        *log.borrow(),
        [
            SpecialKey::F1,
            SpecialKey::F12,
            SpecialKey::Home,
            SpecialKey::Other(0x91),
        ]
    );
}

#[test]
fn elapsed_time_is_monotonic() {
    let shell = shell();
    let first = shell.elapsed_ms();
    let second = shell.elapsed_ms();
    assert!(second >= first);
}
