//! Placement of the toolbar and content WebViews inside a window.

/// Height of the toolbar strip in logical pixels.
pub const TOOLBAR_HEIGHT: f64 = 72.0;

/// Bounds of the toolbar for a window whose inner size is `width` x `height`.
pub fn toolbar_bounds(width: f64, _height: f64) -> wry::Rect {
    logical_rect(0.0, 0.0, width, TOOLBAR_HEIGHT)
}

/// Bounds of every content surface; only the visible one is drawn.
pub fn content_bounds(width: f64, height: f64) -> wry::Rect {
    logical_rect(
        0.0,
        TOOLBAR_HEIGHT,
        width,
        (height - TOOLBAR_HEIGHT).max(0.0),
    )
}

fn logical_rect(x: f64, y: f64, width: f64, height: f64) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(x, y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(width, height)),
    }
}
