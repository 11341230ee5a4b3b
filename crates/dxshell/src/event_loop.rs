//! The main loop.
//!
//! Each iteration runs three phases:
//!
//! 1. Every window whose size changed has its buffers resized and its reshape
//!    callback run. While doing so, note whether any window wants to be
//!    redrawn.
//! 2. If there is an idle callback or a pending redraw, drain the message
//!    queue without blocking and then run the idle callback. Otherwise block
//!    until a message arrives. Either way, a quit message ends the loop once
//!    the messages received with it have been dispatched.
//! 3. Every window flagged for redisplay has its display callback run.
//!
//! Redisplay requests made from inside a display callback take effect on the
//! next iteration, not the current one.

use crate::{
    event::{Events, PumpMode, PumpStatus},
    platform::Platform,
    Shell,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopStatus {
    Continue,
    Exit,
}

impl<P: Platform> Shell<P> {
    /// Runs until a quit message is received. The quit message is posted when
    /// the last window is destroyed or [`Shell::request_exit`] is called.
    pub fn main_loop(&mut self) {
        log::debug!("entering main loop");
        while self.step() == LoopStatus::Continue {}
        log::debug!("main loop exited");
    }

    /// Runs one iteration of the main loop.
    pub fn step(&mut self) -> LoopStatus {
        let wants_redisplay = self.reshape_pass();

        let mode = if self.idle.is_set() || wants_redisplay {
            PumpMode::Poll
        } else {
            PumpMode::Wait
        };

        log::trace!("pumping messages ({mode:?})");
        let mut events = Events::new();
        let status = self.platform.pump(mode, &mut events);
        self.dispatch_all(&mut events);

        if status == PumpStatus::Quit {
            log::debug!("quit received");
            return LoopStatus::Exit;
        }

        if mode == PumpMode::Poll {
            self.invoke_idle();
        }

        self.display_pass();
        LoopStatus::Continue
    }

    fn reshape_pass(&mut self) -> bool {
        let mut wants_redisplay = false;

        for index in self.registry.indices() {
            let Some(window) = self.registry.get_mut(Some(index)) else {
                continue;
            };

            if window.changed_size {
                window.changed_size = false;
                let extent = window.extent;

                if let Err(err) = self.platform.resize(&mut window.surface, extent) {
                    log::warn!("window {index}: {}", crate::error::report(&err));
                }

                self.set_window(index);
                self.invoke(index, |c| &mut c.reshape, |f, shell| f(shell, extent));
            }

            if let Some(window) = self.registry.get(Some(index)) {
                wants_redisplay |= window.must_redisplay;
            }
        }

        wants_redisplay
    }

    fn display_pass(&mut self) {
        for index in self.registry.indices() {
            let Some(window) = self.registry.get_mut(Some(index)) else {
                continue;
            };

            if !window.must_redisplay {
                continue;
            }
            window.must_redisplay = false;

            self.set_window(index);
            self.invoke(index, |c| &mut c.display, |f, shell| f(shell));

            if let Some(window) = self.registry.get_mut(Some(index)) {
                self.platform.validate(&mut window.surface);
            }
        }
    }
}
