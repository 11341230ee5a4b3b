use std::time::{Duration, Instant};

use geometry::{Extent, Point, ScreenPx};

use crate::{
    callbacks::{CallbackKind, Callbacks, IdleFn, Slot},
    config::{Config, DisplayMode},
    error::{report, Error},
    input::{ButtonState, MouseButton, SpecialKey},
    platform::{Platform, Surface, WindowDesc},
    registry::{Registry, WindowIndex},
    window::Window,
};

/// The toolkit context: the graphics platform, every window, and the idle
/// callback.
///
/// Operations that don't take a window index apply to the active window,
/// which is whichever window was last created, passed to
/// [`Shell::set_window`], or is currently having one of its callbacks run.
pub struct Shell<P: Platform> {
    // Surfaces must be released before the device that created them, so the
    // registry is declared (and dropped) ahead of the platform.
    pub(crate) registry: Registry<Window<P>>,
    pub(crate) idle: Slot<IdleFn<P>>,
    pub(crate) platform: P,
    config: Config,
    started: Instant,
}

#[cfg(target_os = "windows")]
impl Shell<crate::platform::win32::Direct3D> {
    /// Creates the Direct3D device and registers the window class.
    ///
    /// Aborts the process if the device cannot be created or if a shell
    /// already exists.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let platform = crate::platform::win32::Direct3D::new(&config);
        Self::with_platform(platform, config)
    }
}

impl<P: Platform> Shell<P> {
    #[must_use]
    pub fn with_platform(platform: P, config: Config) -> Self {
        log::debug!(
            "shell initialized: default window size {}x{}, mode {:?}",
            config.window_size.width,
            config.window_size.height,
            config.display_mode
        );

        Self {
            registry: Registry::new(),
            idle: Slot::default(),
            platform,
            config,
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The argument vector the shell was configured with.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.config.args
    }

    /// Sets the outer size of windows created from now on.
    pub fn init_window_size(&mut self, size: Extent<u32, ScreenPx>) {
        self.config.window_size = size;
    }

    /// Sets the display mode of windows created from now on.
    pub fn init_display_mode(&mut self, mode: DisplayMode) {
        self.config.display_mode = mode;
    }

    /// Creates a window with the current default size and display mode, binds
    /// its render target and makes it the active window.
    ///
    /// # Errors
    ///
    /// Fails if the OS window, its swap chain or its render target view could
    /// not be created. Nothing is registered in that case.
    pub fn create_window(&mut self, title: &str) -> Result<WindowIndex, Error> {
        let desc = WindowDesc {
            title,
            size: self.config.window_size,
            mode: self.config.display_mode,
        };

        let surface = self.platform.create_surface(&desc).map_err(|err| {
            log::warn!("{}", report(&err));
            err
        })?;

        let extent = surface.extent();
        let index = self.registry.insert(Window::new(surface, extent, desc.mode));
        self.set_window(index);

        log::debug!("created window {index} \"{title}\"");
        Ok(index)
    }

    /// Destroys a window and releases its presentation resources.
    ///
    /// The active window is not reassigned, even if it was the one destroyed.
    /// When the last window goes away, a quit message is posted so that the
    /// main loop ends.
    pub fn destroy_window(&mut self, index: WindowIndex) {
        let Some(window) = self.registry.remove(index) else {
            return;
        };

        self.platform.destroy_surface(window.surface);
        log::debug!("destroyed window {index}");

        if self.registry.is_empty() {
            log::debug!("no windows left, posting quit");
            self.platform.post_quit();
        }
    }

    /// Makes `index` the active window and binds its render target.
    pub fn set_window(&mut self, index: WindowIndex) {
        if self.registry.set_active(index) {
            if let Some(window) = self.registry.get(Some(index)) {
                self.platform.make_current(&window.surface);
            }
        }
    }

    /// The active window, or `None` if no window was ever made active.
    ///
    /// The index may refer to a window that has since been destroyed.
    #[must_use]
    pub fn window(&self) -> Option<WindowIndex> {
        self.registry.active()
    }

    /// Looks up a window, defaulting to the active one.
    #[must_use]
    pub fn get(&self, index: Option<WindowIndex>) -> Option<&Window<P>> {
        self.registry.get(index)
    }

    /// Number of live windows.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.registry.len()
    }

    pub fn display_func(&mut self, f: impl FnMut(&mut Shell<P>) + 'static) {
        if let Some(callbacks) = self.active_callbacks("display_func") {
            callbacks.display.set(Box::new(f));
        }
    }

    pub fn reshape_func(&mut self, f: impl FnMut(&mut Shell<P>, Extent<u32, ScreenPx>) + 'static) {
        if let Some(callbacks) = self.active_callbacks("reshape_func") {
            callbacks.reshape.set(Box::new(f));
        }
    }

    pub fn keyboard_func(
        &mut self,
        f: impl FnMut(&mut Shell<P>, u8, Point<i32, ScreenPx>) + 'static,
    ) {
        if let Some(callbacks) = self.active_callbacks("keyboard_func") {
            callbacks.keyboard.set(Box::new(f));
        }
    }

    pub fn keyboard_up_func(
        &mut self,
        f: impl FnMut(&mut Shell<P>, u8, Point<i32, ScreenPx>) + 'static,
    ) {
        if let Some(callbacks) = self.active_callbacks("keyboard_up_func") {
            callbacks.keyboard_up.set(Box::new(f));
        }
    }

    pub fn special_func(
        &mut self,
        f: impl FnMut(&mut Shell<P>, SpecialKey, Point<i32, ScreenPx>) + 'static,
    ) {
        if let Some(callbacks) = self.active_callbacks("special_func") {
            callbacks.special.set(Box::new(f));
        }
    }

    pub fn special_up_func(
        &mut self,
        f: impl FnMut(&mut Shell<P>, SpecialKey, Point<i32, ScreenPx>) + 'static,
    ) {
        if let Some(callbacks) = self.active_callbacks("special_up_func") {
            callbacks.special_up.set(Box::new(f));
        }
    }

    pub fn mouse_func(
        &mut self,
        f: impl FnMut(&mut Shell<P>, MouseButton, ButtonState, Point<i32, ScreenPx>) + 'static,
    ) {
        if let Some(callbacks) = self.active_callbacks("mouse_func") {
            callbacks.mouse.set(Box::new(f));
        }
    }

    /// Pointer movement while at least one mouse button is held.
    pub fn motion_func(&mut self, f: impl FnMut(&mut Shell<P>, Point<i32, ScreenPx>) + 'static) {
        if let Some(callbacks) = self.active_callbacks("motion_func") {
            callbacks.motion.set(Box::new(f));
        }
    }

    /// Pointer movement with no mouse button held.
    pub fn passive_motion_func(
        &mut self,
        f: impl FnMut(&mut Shell<P>, Point<i32, ScreenPx>) + 'static,
    ) {
        if let Some(callbacks) = self.active_callbacks("passive_motion_func") {
            callbacks.passive_motion.set(Box::new(f));
        }
    }

    /// Unregisters one of the active window's callbacks.
    pub fn clear_func(&mut self, kind: CallbackKind) {
        if let Some(callbacks) = self.active_callbacks("clear_func") {
            callbacks.clear(kind);
        }
    }

    /// Sets the callback run once per loop iteration while it is registered.
    /// There is a single idle callback for the whole shell.
    pub fn idle_func(&mut self, f: impl FnMut(&mut Shell<P>) + 'static) {
        self.idle.set(Box::new(f));
    }

    pub fn clear_idle_func(&mut self) {
        self.idle.clear();
    }

    /// Schedules the active window's display callback for the next loop
    /// iteration.
    pub fn post_redisplay(&mut self) {
        match self.registry.get_mut(None) {
            Some(window) => window.must_redisplay = true,
            None => log::warn!("post_redisplay: no active window"),
        }
    }

    /// Presents the active window's back buffer.
    pub fn swap_buffers(&mut self) {
        let Some(window) = self.registry.get_mut(None) else {
            log::warn!("swap_buffers: no active window");
            return;
        };

        if let Err(err) = self.platform.present(&mut window.surface) {
            log::warn!("{}", report(&err));
        }
    }

    /// Posts a quit message; the main loop ends once it is received.
    pub fn request_exit(&mut self) {
        self.platform.post_quit();
    }

    #[must_use]
    pub fn window_extent(&self) -> Option<Extent<u32, ScreenPx>> {
        self.registry.get(None).map(Window::extent)
    }

    #[must_use]
    pub fn window_width(&self) -> Option<u32> {
        self.window_extent().map(|extent| extent.width)
    }

    #[must_use]
    pub fn window_height(&self) -> Option<u32> {
        self.window_extent().map(|extent| extent.height)
    }

    /// Time since the shell was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn active_callbacks(&mut self, operation: &str) -> Option<&mut Callbacks<P>> {
        match self.registry.get_mut(None) {
            Some(window) => Some(&mut window.callbacks),
            None => {
                log::warn!("{operation}: no active window");
                None
            }
        }
    }

    /// Runs one of a window's callbacks, giving it full access to the shell.
    ///
    /// Returns false if the window or the callback doesn't exist.
    pub(crate) fn invoke<F: ?Sized>(
        &mut self,
        index: WindowIndex,
        slot: fn(&mut Callbacks<P>) -> &mut Slot<Box<F>>,
        call: impl FnOnce(&mut F, &mut Self),
    ) -> bool {
        let Some(window) = self.registry.get_mut(Some(index)) else {
            return false;
        };
        let Some((mut handler, epoch)) = slot(&mut window.callbacks).take() else {
            return false;
        };

        call(&mut handler, self);

        // The callback may have destroyed its own window.
        if let Some(window) = self.registry.get_mut(Some(index)) {
            slot(&mut window.callbacks).restore(handler, epoch);
        }
        true
    }

    pub(crate) fn invoke_idle(&mut self) {
        if let Some((mut idle, epoch)) = self.idle.take() {
            idle(self);
            self.idle.restore(idle, epoch);
        }
    }
}

impl<P: Platform> Drop for Shell<P> {
    fn drop(&mut self) {
        let windows: Vec<_> = self.registry.drain().collect();
        for (index, window) in windows {
            log::debug!("releasing window {index}");
            self.platform.destroy_surface(window.surface);
        }
    }
}
