use geometry::{Extent, Point, ScreenPx};

use crate::{
    input::{ButtonState, MouseButton, SpecialKey},
    platform::Platform,
    Shell,
};

pub type DisplayFn<P> = Box<dyn FnMut(&mut Shell<P>)>;
pub type IdleFn<P> = Box<dyn FnMut(&mut Shell<P>)>;
pub type ReshapeFn<P> = Box<dyn FnMut(&mut Shell<P>, Extent<u32, ScreenPx>)>;
pub type KeyboardFn<P> = Box<dyn FnMut(&mut Shell<P>, u8, Point<i32, ScreenPx>)>;
pub type SpecialFn<P> = Box<dyn FnMut(&mut Shell<P>, SpecialKey, Point<i32, ScreenPx>)>;
pub type MouseFn<P> =
    Box<dyn FnMut(&mut Shell<P>, MouseButton, ButtonState, Point<i32, ScreenPx>)>;
pub type MotionFn<P> = Box<dyn FnMut(&mut Shell<P>, Point<i32, ScreenPx>)>;

/// Names a per-window callback slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    Display,
    Reshape,
    Keyboard,
    KeyboardUp,
    Special,
    SpecialUp,
    Mouse,
    Motion,
    PassiveMotion,
}

/// Holds at most one handler.
///
/// A handler is moved out of its slot while it runs so that it can be handed
/// a mutable reference to the shell that owns the slot. Every `set` or
/// `clear` bumps the slot's epoch, which is how `restore` tells whether the
/// running handler replaced or removed itself.
pub struct Slot<F> {
    handler: Option<F>,
    epoch: u32,
}

impl<F> Default for Slot<F> {
    fn default() -> Self {
        Self {
            handler: None,
            epoch: 0,
        }
    }
}

impl<F> Slot<F> {
    pub fn set(&mut self, handler: F) {
        self.handler = Some(handler);
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.handler = None;
        self.epoch = self.epoch.wrapping_add(1);
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.handler.is_some()
    }

    /// Moves the handler out for the duration of a call.
    pub fn take(&mut self) -> Option<(F, u32)> {
        self.handler.take().map(|handler| (handler, self.epoch))
    }

    /// Puts back a handler obtained from [`Slot::take`], unless the slot was
    /// set or cleared in the meantime.
    pub fn restore(&mut self, handler: F, epoch: u32) {
        if self.epoch == epoch && self.handler.is_none() {
            self.handler = Some(handler);
        }
    }
}

/// One slot for each kind of per-window event.
pub struct Callbacks<P: Platform> {
    pub display: Slot<DisplayFn<P>>,
    pub reshape: Slot<ReshapeFn<P>>,
    pub keyboard: Slot<KeyboardFn<P>>,
    pub keyboard_up: Slot<KeyboardFn<P>>,
    pub special: Slot<SpecialFn<P>>,
    pub special_up: Slot<SpecialFn<P>>,
    pub mouse: Slot<MouseFn<P>>,
    pub motion: Slot<MotionFn<P>>,
    pub passive_motion: Slot<MotionFn<P>>,
}

impl<P: Platform> Default for Callbacks<P> {
    fn default() -> Self {
        Self {
            display: Slot::default(),
            reshape: Slot::default(),
            keyboard: Slot::default(),
            keyboard_up: Slot::default(),
            special: Slot::default(),
            special_up: Slot::default(),
            mouse: Slot::default(),
            motion: Slot::default(),
            passive_motion: Slot::default(),
        }
    }
}

impl<P: Platform> Callbacks<P> {
    pub fn clear(&mut self, kind: CallbackKind) {
        match kind {
            CallbackKind::Display => self.display.clear(),
            CallbackKind::Reshape => self.reshape.clear(),
            CallbackKind::Keyboard => self.keyboard.clear(),
            CallbackKind::KeyboardUp => self.keyboard_up.clear(),
            CallbackKind::Special => self.special.clear(),
            CallbackKind::SpecialUp => self.special_up.clear(),
            CallbackKind::Mouse => self.mouse.clear(),
            CallbackKind::Motion => self.motion.clear(),
            CallbackKind::PassiveMotion => self.passive_motion.clear(),
        }
    }

    #[must_use]
    pub fn is_set(&self, kind: CallbackKind) -> bool {
        match kind {
            CallbackKind::Display => self.display.is_set(),
            CallbackKind::Reshape => self.reshape.is_set(),
            CallbackKind::Keyboard => self.keyboard.is_set(),
            CallbackKind::KeyboardUp => self.keyboard_up.is_set(),
            CallbackKind::Special => self.special.is_set(),
            CallbackKind::SpecialUp => self.special_up.is_set(),
            CallbackKind::Mouse => self.mouse.is_set(),
            CallbackKind::Motion => self.motion.is_set(),
            CallbackKind::PassiveMotion => self.passive_motion.is_set(),
        }
    }
}
