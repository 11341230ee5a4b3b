use geometry::{Extent, Point, ScreenPx};

use crate::input::{ButtonState, HeldButtons, KeyCode, MouseButton};

/// Identifies the OS window an event was addressed to.
///
/// For the Win32 backend this is the `HWND` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeId(pub u64);

/// An OS window message, already decoded from its raw parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsEvent {
    /// The client area changed size.
    Resized(Extent<u32, ScreenPx>),
    /// Some or all of the client area must be repainted.
    Paint,
    /// The user asked to close the window (close button, Alt+F4...).
    CloseRequested,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    PointerMoved {
        at: Point<i32, ScreenPx>,
        held: HeldButtons,
    },
    Button {
        button: MouseButton,
        state: ButtonState,
    },
    /// Wheel rotation; positive values rotate away from the user.
    Wheel { delta: i16 },
}

/// Storage for the events produced by a single pump.
pub type Events = smallvec::SmallVec<[(NativeId, OsEvent); 16]>;

/// How the platform should wait for messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpMode {
    /// Drain whatever is queued and return without blocking.
    Poll,
    /// Block until one message arrives.
    Wait,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpStatus {
    Continue,
    /// A quit message was received.
    Quit,
}
