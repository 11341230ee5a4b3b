use geometry::{Extent, Point, ScreenPx};

use crate::{
    callbacks::Callbacks,
    config::DisplayMode,
    event::NativeId,
    platform::{Platform, Surface},
};

/// Everything the toolkit tracks about one OS window.
pub struct Window<P: Platform> {
    pub(crate) surface: P::Surface,
    pub(crate) extent: Extent<u32, ScreenPx>,
    pub(crate) mode: DisplayMode,
    /// Set by a paint message or an explicit request; cleared right before
    /// the display callback runs.
    pub(crate) must_redisplay: bool,
    /// Set by a resize message; cleared right before the reshape callback
    /// runs.
    pub(crate) changed_size: bool,
    pub(crate) cursor: Point<i32, ScreenPx>,
    pub(crate) callbacks: Callbacks<P>,
}

impl<P: Platform> Window<P> {
    pub(crate) fn new(surface: P::Surface, extent: Extent<u32, ScreenPx>, mode: DisplayMode) -> Self {
        Self {
            surface,
            extent,
            mode,
            must_redisplay: true,
            changed_size: true,
            cursor: Point::zero(),
            callbacks: Callbacks::default(),
        }
    }

    #[must_use]
    pub fn native_id(&self) -> NativeId {
        self.surface.native_id()
    }

    #[must_use]
    pub fn surface(&self) -> &P::Surface {
        &self.surface
    }

    #[must_use]
    pub fn extent(&self) -> Extent<u32, ScreenPx> {
        self.extent
    }

    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The pointer position as of the last pointer-move message.
    #[must_use]
    pub fn cursor_position(&self) -> Point<i32, ScreenPx> {
        self.cursor
    }

    #[must_use]
    pub fn must_redisplay(&self) -> bool {
        self.must_redisplay
    }

    #[must_use]
    pub fn changed_size(&self) -> bool {
        self.changed_size
    }

    #[must_use]
    pub fn callbacks(&self) -> &Callbacks<P> {
        &self.callbacks
    }
}
