pub use euclid::{Point2D as Point, Size2D as Extent, Vector2D as Offset};

/// Unit tag for physical pixels on the desktop or within a window's client
/// area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenPx();

/// Returns the top-left corner that places a rectangle of size `inner` in the
/// middle of a rectangle of size `outer` anchored at the origin.
///
/// The result is negative on an axis where `inner` is larger than `outer`,
/// matching what the OS does when a window is bigger than the display.
#[must_use]
pub fn centered(outer: Extent<i32, ScreenPx>, inner: Extent<i32, ScreenPx>) -> Point<i32, ScreenPx> {
    Point::new(
        (outer.width - inner.width) / 2,
        (outer.height - inner.height) / 2,
    )
}

/// Converts an unsigned extent into a signed one, saturating at `i32::MAX`.
#[must_use]
pub fn to_signed(extent: Extent<u32, ScreenPx>) -> Extent<i32, ScreenPx> {
    Extent::new(
        i32::try_from(extent.width).unwrap_or(i32::MAX),
        i32::try_from(extent.height).unwrap_or(i32::MAX),
    )
}
