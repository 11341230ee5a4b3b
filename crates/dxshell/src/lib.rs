//! A small callback-driven windowing toolkit for Direct3D 11.
//!
//! Applications create a [`Shell`], open one or more windows, register
//! callbacks on them, and hand control to [`Shell::main_loop`]:
//!
//! ```ignore
//! use dxshell::{Config, DisplayMode, Shell};
//!
//! dxshell::logging::init();
//!
//! let mut shell = Shell::new(Config::from_env().with_args(std::env::args()));
//! shell.init_display_mode(DisplayMode::DOUBLE);
//! shell.create_window("triangle")?;
//!
//! shell.display_func(|shell| {
//!     // draw with shell.platform().context()
//!     shell.swap_buffers();
//! });
//! shell.keyboard_func(|shell, key, _| {
//!     if key == 0x1B {
//!         shell.request_exit();
//!     }
//! });
//!
//! shell.main_loop();
//! ```
//!
//! Everything happens on one thread. Callbacks receive the shell itself, so
//! they can create and destroy windows from inside the loop. Such changes are
//! visible to the rest of the loop iteration.
//!
//! OS access goes through the [`platform::Platform`] trait. On Windows,
//! [`platform::win32::Direct3D`] is the real thing; [`platform::headless`]
//! drives the same loop from scripted events.

pub mod callbacks;
pub mod config;
mod dispatch;
pub mod error;
pub mod event;
mod event_loop;
pub mod input;
pub mod logging;
pub mod platform;
pub mod registry;
mod shell;
mod window;

pub use callbacks::CallbackKind;
pub use config::{Config, DisplayMode};
pub use error::Error;
pub use event_loop::LoopStatus;
pub use geometry::{Extent, Point, ScreenPx};
pub use input::{ButtonState, MouseButton, SpecialKey};
pub use registry::WindowIndex;
pub use shell::Shell;
pub use window::Window;
