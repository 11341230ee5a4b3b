//! The seam between the toolkit and the OS + graphics API.
//!
//! `Shell` only talks to windows and devices through [`Platform`]. The Win32
//! + Direct3D 11 implementation lives in [`win32`]; [`headless`] is an
//! in-memory implementation driven by scripted events.

use geometry::{Extent, ScreenPx};

use crate::{
    config::DisplayMode,
    error::Error,
    event::{Events, NativeId, PumpMode, PumpStatus},
};

pub mod headless;

#[cfg(target_os = "windows")]
pub mod win32;

/// A description of a window to be created.
#[derive(Clone, Copy, Debug)]
pub struct WindowDesc<'a> {
    pub title: &'a str,
    /// Outer size of the window, including decorations.
    pub size: Extent<u32, ScreenPx>,
    pub mode: DisplayMode,
}

/// An OS window together with the presentation resources bound to it.
///
/// Dropping a surface releases everything it owns.
pub trait Surface {
    fn native_id(&self) -> NativeId;

    /// Size of the buffers, which matches the client area of the window.
    fn extent(&self) -> Extent<u32, ScreenPx>;
}

pub trait Platform: Sized + 'static {
    type Surface: Surface;

    /// Creates a visible window centered on the primary display, along with a
    /// swap chain and a render target view for its back buffer.
    ///
    /// `desc.size` is the outer size of the window. The surface reports the
    /// size of its client area.
    fn create_surface(&mut self, desc: &WindowDesc) -> Result<Self::Surface, Error>;

    /// Releases a surface. If its render target was current, it is unbound
    /// first.
    fn destroy_surface(&mut self, surface: Self::Surface);

    /// Binds the surface's render target as the target for subsequent draws.
    fn make_current(&mut self, surface: &Self::Surface);

    /// Resizes the surface's buffers to `extent` and recreates its render
    /// target view.
    fn resize(
        &mut self,
        surface: &mut Self::Surface,
        extent: Extent<u32, ScreenPx>,
    ) -> Result<(), Error>;

    fn present(&mut self, surface: &mut Self::Surface) -> Result<(), Error>;

    /// Marks the surface's client area as repainted.
    fn validate(&mut self, surface: &mut Self::Surface);

    /// Retrieves OS messages and appends the events they produce to `events`.
    fn pump(&mut self, mode: PumpMode, events: &mut Events) -> PumpStatus;

    /// Asks the message queue to deliver a quit message.
    fn post_quit(&mut self);
}
