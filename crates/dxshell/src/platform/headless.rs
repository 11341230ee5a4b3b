//! A platform with no OS windows and no GPU.
//!
//! Events are queued by hand with [`Headless::push_event`] and handed out by
//! [`Platform::pump`] the way a message queue would. Requests made by the
//! shell are recorded for inspection.

use std::collections::VecDeque;

use geometry::{Extent, ScreenPx};

use crate::{
    error::Error,
    event::{Events, NativeId, OsEvent, PumpMode, PumpStatus},
    platform::{Platform, Surface, WindowDesc},
};

/// The creation step to fail on the next call to `create_surface`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailAt {
    Window,
    SwapChain,
    RenderTarget,
}

#[derive(Debug, thiserror::Error)]
#[error("simulated failure")]
struct Simulated;

#[derive(Debug)]
pub struct HeadlessSurface {
    id: NativeId,
    title: String,
    extent: Extent<u32, ScreenPx>,
    presents: u32,
    validations: u32,
}

impl HeadlessSurface {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Size of the buffers, as of the last resize.
    #[must_use]
    pub fn extent(&self) -> Extent<u32, ScreenPx> {
        self.extent
    }

    #[must_use]
    pub fn presents(&self) -> u32 {
        self.presents
    }

    /// Number of times the paint region was acknowledged.
    #[must_use]
    pub fn validations(&self) -> u32 {
        self.validations
    }
}

impl Surface for HeadlessSurface {
    fn native_id(&self) -> NativeId {
        self.id
    }

    fn extent(&self) -> Extent<u32, ScreenPx> {
        self.extent
    }
}

#[derive(Debug, Default)]
pub struct Headless {
    queue: VecDeque<(NativeId, OsEvent)>,
    quit_pending: bool,
    quits_posted: u32,
    exhausted_waits: u32,
    next_id: u64,
    fail_next: Option<FailAt>,
    frame: Extent<u32, ScreenPx>,
    current: Option<NativeId>,
    destroyed: Vec<NativeId>,
}

impl Headless {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, window: NativeId, event: OsEvent) {
        self.queue.push_back((window, event));
    }

    /// Makes the next `create_surface` fail at `step`.
    pub fn fail_next_surface(&mut self, step: FailAt) {
        self.fail_next = Some(step);
    }

    /// Space taken by window decorations. New surfaces get a client area that
    /// much smaller than the requested outer size.
    pub fn set_frame(&mut self, frame: Extent<u32, ScreenPx>) {
        self.frame = frame;
    }

    /// The surface whose render target is bound.
    #[must_use]
    pub fn current_target(&self) -> Option<NativeId> {
        self.current
    }

    #[must_use]
    pub fn quits_posted(&self) -> u32 {
        self.quits_posted
    }

    /// Number of times the shell waited on an empty queue with no quit
    /// posted. A real message queue would have blocked each time.
    #[must_use]
    pub fn exhausted_waits(&self) -> u32 {
        self.exhausted_waits
    }

    /// Surfaces released so far, in order.
    #[must_use]
    pub fn destroyed(&self) -> &[NativeId] {
        &self.destroyed
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Platform for Headless {
    type Surface = HeadlessSurface;

    fn create_surface(&mut self, desc: &WindowDesc) -> Result<HeadlessSurface, Error> {
        match self.fail_next.take() {
            Some(FailAt::Window) => {
                return Err(Error::Window {
                    title: desc.title.to_owned(),
                    source: Box::new(Simulated),
                })
            }
            Some(FailAt::SwapChain) => return Err(Error::SwapChain(Box::new(Simulated))),
            Some(FailAt::RenderTarget) => return Err(Error::RenderTarget(Box::new(Simulated))),
            None => {}
        }

        self.next_id += 1;
        let surface = HeadlessSurface {
            id: NativeId(self.next_id),
            title: desc.title.to_owned(),
            extent: Extent::new(
                desc.size.width.saturating_sub(self.frame.width),
                desc.size.height.saturating_sub(self.frame.height),
            ),
            presents: 0,
            validations: 0,
        };
        self.current = Some(surface.id);
        Ok(surface)
    }

    fn destroy_surface(&mut self, surface: HeadlessSurface) {
        if self.current == Some(surface.id) {
            self.current = None;
        }
        self.destroyed.push(surface.id);
    }

    fn make_current(&mut self, surface: &HeadlessSurface) {
        self.current = Some(surface.id);
    }

    fn resize(
        &mut self,
        surface: &mut HeadlessSurface,
        extent: Extent<u32, ScreenPx>,
    ) -> Result<(), Error> {
        surface.extent = extent;
        Ok(())
    }

    fn present(&mut self, surface: &mut HeadlessSurface) -> Result<(), Error> {
        surface.presents += 1;
        Ok(())
    }

    fn validate(&mut self, surface: &mut HeadlessSurface) {
        surface.validations += 1;
    }

    /// Like `PeekMessage`/`GetMessage`, a posted quit is only delivered once
    /// the queue is empty. Waiting on an empty queue with no quit posted
    /// would block forever, so it is reported as a quit instead and counted
    /// in [`Headless::exhausted_waits`].
    fn pump(&mut self, mode: PumpMode, events: &mut Events) -> PumpStatus {
        match mode {
            PumpMode::Poll => {
                events.extend(self.queue.drain(..));
                if std::mem::take(&mut self.quit_pending) {
                    PumpStatus::Quit
                } else {
                    PumpStatus::Continue
                }
            }
            PumpMode::Wait => {
                if let Some(event) = self.queue.pop_front() {
                    events.push(event);
                    PumpStatus::Continue
                } else {
                    if !std::mem::take(&mut self.quit_pending) {
                        self.exhausted_waits += 1;
                        log::warn!("waited on an empty headless queue with no quit posted, ending loop");
                    }
                    PumpStatus::Quit
                }
            }
        }
    }

    fn post_quit(&mut self) {
        self.quit_pending = true;
        self.quits_posted += 1;
    }
}
