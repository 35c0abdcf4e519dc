/// A connected display monitor as reported by one enumeration call.
///
/// Identity is the position in the enumerated list; it is only stable for the
/// lifetime of that list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monitor {
    /// X coordinate of the top-left corner in virtual-desktop space (may be negative).
    pub x: i32,
    /// Y coordinate of the top-left corner in virtual-desktop space (may be negative).
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Whether the OS reports this as the primary display.
    pub is_primary: bool,
}

impl Monitor {
    pub fn new(x: i32, y: i32, width: u32, height: u32, is_primary: bool) -> Self {
        Self {
            x,
            y,
            width,
            height,
            is_primary,
        }
    }

    /// Build a monitor from an OS bounding rectangle (`right`/`bottom` exclusive).
    ///
    /// Inverted rectangles collapse to zero extent rather than wrapping.
    pub fn from_bounds(left: i32, top: i32, right: i32, bottom: i32, is_primary: bool) -> Self {
        let width = u32::try_from(right.saturating_sub(left)).unwrap_or(0);
        let height = u32::try_from(bottom.saturating_sub(top)).unwrap_or(0);
        Self::new(left, top, width, height, is_primary)
    }

    /// `(x, y, width, height)` in virtual-desktop coordinates.
    pub fn bounds(&self) -> (i32, i32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }

    /// Menu title for the monitor at `index`, e.g. `Monitor 1 (Primary)`.
    pub fn label(&self, index: usize) -> String {
        if self.is_primary {
            format!("Monitor {} (Primary)", index + 1)
        } else {
            format!("Monitor {}", index + 1)
        }
    }

    pub fn resolution(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}
