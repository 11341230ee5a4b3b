use std::ffi::c_void;

use geometry::{Extent, ScreenPx};
use raw_window_handle::{HasRawWindowHandle, RawWindowHandle, Win32WindowHandle};
use windows::{
    core::ComInterface,
    Win32::{
        Foundation::{HMODULE, HWND, RECT},
        Graphics::{
            Direct3D11::{ID3D11RenderTargetView, ID3D11Texture2D},
            Dxgi::{
                Common::{
                    DXGI_FORMAT, DXGI_FORMAT_R8G8B8A8_UNORM, DXGI_FORMAT_UNKNOWN, DXGI_MODE_DESC,
                    DXGI_SAMPLE_DESC,
                },
                IDXGIDevice, IDXGIFactory, IDXGISwapChain, DXGI_SWAP_CHAIN_DESC,
                DXGI_SWAP_EFFECT_DISCARD, DXGI_USAGE_RENDER_TARGET_OUTPUT,
            },
        },
        UI::WindowsAndMessaging::{DestroyWindow, GetClientRect},
    },
};

use super::dx;
use crate::{
    config::DisplayMode,
    error::{Error, PlatformError},
    event::NativeId,
};

pub(super) const FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;

/// Owns an `HWND` and destroys it when dropped.
pub struct NativeWindow {
    hwnd: HWND,
    instance: HMODULE,
}

impl NativeWindow {
    pub(super) fn new(hwnd: HWND, instance: HMODULE) -> Self {
        Self { hwnd, instance }
    }

    #[must_use]
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        let _ = unsafe { DestroyWindow(self.hwnd) };
    }
}

unsafe impl HasRawWindowHandle for NativeWindow {
    fn raw_window_handle(&self) -> RawWindowHandle {
        let mut handle = Win32WindowHandle::empty();
        handle.hwnd = self.hwnd.0 as *mut c_void;
        handle.hinstance = self.instance.0 as *mut c_void;
        RawWindowHandle::Win32(handle)
    }
}

/// A window, its swap chain, and a render target view of the swap chain's
/// back buffer.
pub struct Win32Surface {
    // Fields drop in declaration order: view, then swap chain, then window.
    pub(super) render_target: Option<ID3D11RenderTargetView>,
    swapchain: IDXGISwapChain,
    window: NativeWindow,
    pub(super) extent: Extent<u32, ScreenPx>,
}

impl Win32Surface {
    pub(super) fn new(
        dx: &dx::Interfaces,
        window: NativeWindow,
        mode: DisplayMode,
    ) -> Result<Self, Error> {
        let extent = client_extent(window.hwnd);
        let swapchain = create_swapchain(dx, window.hwnd, mode).map_err(Error::SwapChain)?;
        let render_target = create_render_target(dx, &swapchain).map_err(Error::RenderTarget)?;

        Ok(Self {
            render_target: Some(render_target),
            swapchain,
            window,
            extent,
        })
    }

    #[must_use]
    pub fn hwnd(&self) -> HWND {
        self.window.hwnd
    }

    #[must_use]
    pub fn swapchain(&self) -> &IDXGISwapChain {
        &self.swapchain
    }

    #[must_use]
    pub fn render_target(&self) -> Option<&ID3D11RenderTargetView> {
        self.render_target.as_ref()
    }

    /// Releases the render target view, resizes the swap chain's buffers and
    /// recreates the view. The view must not be bound when this is called.
    pub(super) fn resize(
        &mut self,
        dx: &dx::Interfaces,
        extent: Extent<u32, ScreenPx>,
    ) -> Result<(), Error> {
        self.render_target = None;

        unsafe {
            self.swapchain
                .ResizeBuffers(0, extent.width, extent.height, DXGI_FORMAT_UNKNOWN, 0)
        }
        .map_err(|err| Error::Resize(Box::new(err)))?;

        self.extent = extent;
        self.render_target =
            Some(create_render_target(dx, &self.swapchain).map_err(Error::RenderTarget)?);
        Ok(())
    }

    pub(super) fn present(&self) -> Result<(), Error> {
        unsafe { self.swapchain.Present(0, 0) }
            .ok()
            .map_err(|err| Error::Present(Box::new(err)))
    }
}

impl crate::platform::Surface for Win32Surface {
    fn native_id(&self) -> NativeId {
        NativeId(self.window.hwnd.0 as u64)
    }

    fn extent(&self) -> Extent<u32, ScreenPx> {
        self.extent
    }
}

/// Size of the window's client area, which is what a swap chain created with
/// a zero width and height is sized to.
fn client_extent(hwnd: HWND) -> Extent<u32, ScreenPx> {
    let mut rect = RECT::default();
    if !unsafe { GetClientRect(hwnd, &mut rect) }.as_bool() {
        log::warn!(
            "failed to read client area: {}",
            windows::core::Error::from_win32()
        );
    }

    Extent::new(
        u32::try_from(rect.right - rect.left).unwrap_or(0),
        u32::try_from(rect.bottom - rect.top).unwrap_or(0),
    )
}

unsafe impl HasRawWindowHandle for Win32Surface {
    fn raw_window_handle(&self) -> RawWindowHandle {
        self.window.raw_window_handle()
    }
}

fn create_swapchain(
    dx: &dx::Interfaces,
    hwnd: HWND,
    mode: DisplayMode,
) -> Result<IDXGISwapChain, PlatformError> {
    let (count, quality) = if mode.contains(DisplayMode::MULTISAMPLE) {
        dx.sample_desc(FORMAT)
    } else {
        (1, 0)
    };

    let buffer_count = if mode.contains(DisplayMode::DOUBLE) { 2 } else { 1 };

    let desc = DXGI_SWAP_CHAIN_DESC {
        BufferDesc: DXGI_MODE_DESC {
            // Zero matches the size of the window's client area.
            Width: 0,
            Height: 0,
            Format: FORMAT,
            ..Default::default()
        },
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: count,
            Quality: quality,
        },
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        BufferCount: buffer_count,
        OutputWindow: hwnd,
        Windowed: true.into(),
        SwapEffect: DXGI_SWAP_EFFECT_DISCARD,
        Flags: 0,
    };

    let factory: IDXGIFactory = unsafe {
        let device: IDXGIDevice = dx.device.cast()?;
        let adapter = device.GetAdapter()?;
        adapter.GetParent()?
    };

    let mut swapchain = None;
    unsafe { factory.CreateSwapChain(&dx.device, &desc, &mut swapchain) }.ok()?;

    swapchain.ok_or_else(|| "swap chain creation returned no swap chain".into())
}

fn create_render_target(
    dx: &dx::Interfaces,
    swapchain: &IDXGISwapChain,
) -> Result<ID3D11RenderTargetView, PlatformError> {
    let mut view = None;
    unsafe {
        let back_buffer: ID3D11Texture2D = swapchain.GetBuffer(0)?;
        dx.device
            .CreateRenderTargetView(&back_buffer, None, Some(&mut view))?;
    }

    view.ok_or_else(|| "render target view creation returned no view".into())
}
