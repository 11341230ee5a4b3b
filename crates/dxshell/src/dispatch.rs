use crate::{
    event::{Events, NativeId, OsEvent},
    input::{ButtonState, Key, KeyCode, MouseButton},
    platform::Platform,
    registry::WindowIndex,
    Shell,
};

impl<P: Platform> Shell<P> {
    pub(crate) fn dispatch_all(&mut self, events: &mut Events) {
        for (id, event) in events.drain(..) {
            self.dispatch(id, event);
        }
    }

    /// Routes one event to the window it was addressed to. The window is made
    /// active first so that callbacks see it as the current window.
    pub(crate) fn dispatch(&mut self, id: NativeId, event: OsEvent) {
        let Some(index) = self.registry.position(|window| window.native_id() == id) else {
            log::debug!("ignoring {event:?} for untracked window {id:?}");
            return;
        };

        self.set_window(index);

        match event {
            OsEvent::Resized(extent) => {
                if let Some(window) = self.registry.get_mut(Some(index)) {
                    window.extent = extent;
                    window.changed_size = true;
                }
            }
            OsEvent::Paint => {
                if let Some(window) = self.registry.get_mut(Some(index)) {
                    window.must_redisplay = true;
                }
            }
            OsEvent::CloseRequested => self.destroy_window(index),
            OsEvent::KeyDown(code) => self.key(index, code, ButtonState::Pressed),
            OsEvent::KeyUp(code) => self.key(index, code, ButtonState::Released),
            OsEvent::PointerMoved { at, held } => {
                if let Some(window) = self.registry.get_mut(Some(index)) {
                    window.cursor = at;
                }

                if held.is_empty() {
                    self.invoke(index, |c| &mut c.passive_motion, |f, shell| f(shell, at));
                } else {
                    self.invoke(index, |c| &mut c.motion, |f, shell| f(shell, at));
                }
            }
            OsEvent::Button { button, state } => self.button(index, button, state),
            OsEvent::Wheel { delta } => {
                let button = if delta < 0 {
                    MouseButton::WheelDown
                } else {
                    MouseButton::WheelUp
                };

                self.button(index, button, ButtonState::Pressed);
                self.button(index, button, ButtonState::Released);
            }
        }
    }

    fn key(&mut self, index: WindowIndex, code: KeyCode, state: ButtonState) {
        let Some(at) = self.registry.get(Some(index)).map(|window| window.cursor) else {
            return;
        };

        match (code.classify(), state) {
            (Key::Char(c), ButtonState::Pressed) => {
                self.invoke(index, |cb| &mut cb.keyboard, |f, shell| f(shell, c, at));
            }
            (Key::Char(c), ButtonState::Released) => {
                self.invoke(index, |cb| &mut cb.keyboard_up, |f, shell| f(shell, c, at));
            }
            (Key::Special(key), ButtonState::Pressed) => {
                self.invoke(index, |cb| &mut cb.special, |f, shell| f(shell, key, at));
            }
            (Key::Special(key), ButtonState::Released) => {
                self.invoke(index, |cb| &mut cb.special_up, |f, shell| f(shell, key, at));
            }
        }
    }

    fn button(&mut self, index: WindowIndex, button: MouseButton, state: ButtonState) {
        let Some(at) = self.registry.get(Some(index)).map(|window| window.cursor) else {
            return;
        };

        self.invoke(index, |c| &mut c.mouse, |f, shell| f(shell, button, state, at));
    }
}
