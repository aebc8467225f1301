//! Drawing values onto a host surface
//!
//! The crate does no painting itself. A control hands [`Value::render`] a
//! [`Surface`] for its device context together with the cell rectangle and the
//! alignment configured for the cell; the value decides which primitive to use.
//!
//! Alignment flags keep the toolkit's public encoding so they can be stored in
//! the same fields as table cell flags:
//!
//! ```text
//! bits 0-1  horizontal: 0 default, 1 left, 3 center, 2 right
//! bits 2-3  vertical:   0 default, 4 top,  0xC center, 8 bottom
//! ```

use crate::color::ColorRef;
use crate::value::{IconHandle, Value, ValueKind};

pub const ALIGN_DEFAULT: u32 = 0x0;
pub const ALIGN_LEFT: u32 = 0x1;
pub const ALIGN_CENTER: u32 = 0x3;
pub const ALIGN_RIGHT: u32 = 0x2;
pub const ALIGN_VDEFAULT: u32 = 0x0;
pub const ALIGN_TOP: u32 = 0x4;
pub const ALIGN_VCENTER: u32 = 0xC;
pub const ALIGN_BOTTOM: u32 = 0x8;

pub const ALIGN_MASK_HORZ: u32 = 0x3;
pub const ALIGN_MASK_VERT: u32 = 0xC;
pub const ALIGN_MASK: u32 = 0xF;

/// Rectangle in surface coordinates; `right` and `bottom` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Whether nothing can be drawn inside
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Default,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Default,
    Top,
    Center,
    Bottom,
}

/// Horizontal and vertical placement of a value inside its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl Alignment {
    pub const DEFAULT: Alignment = Alignment {
        horizontal: HorizontalAlign::Default,
        vertical: VerticalAlign::Default,
    };

    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Alignment {
            horizontal,
            vertical,
        }
    }

    /// Decode alignment flags; bits outside [`ALIGN_MASK`] are ignored
    pub const fn from_flags(flags: u32) -> Self {
        let horizontal = match flags & ALIGN_MASK_HORZ {
            ALIGN_LEFT => HorizontalAlign::Left,
            ALIGN_CENTER => HorizontalAlign::Center,
            ALIGN_RIGHT => HorizontalAlign::Right,
            _ => HorizontalAlign::Default,
        };
        let vertical = match flags & ALIGN_MASK_VERT {
            ALIGN_TOP => VerticalAlign::Top,
            ALIGN_VCENTER => VerticalAlign::Center,
            ALIGN_BOTTOM => VerticalAlign::Bottom,
            _ => VerticalAlign::Default,
        };
        Alignment::new(horizontal, vertical)
    }

    pub const fn flags(self) -> u32 {
        let horizontal = match self.horizontal {
            HorizontalAlign::Default => ALIGN_DEFAULT,
            HorizontalAlign::Left => ALIGN_LEFT,
            HorizontalAlign::Center => ALIGN_CENTER,
            HorizontalAlign::Right => ALIGN_RIGHT,
        };
        let vertical = match self.vertical {
            VerticalAlign::Default => ALIGN_VDEFAULT,
            VerticalAlign::Top => ALIGN_TOP,
            VerticalAlign::Center => ALIGN_VCENTER,
            VerticalAlign::Bottom => ALIGN_BOTTOM,
        };
        horizontal | vertical
    }

    /// Replace `Default` parts with the natural placement for `kind`
    ///
    /// Numbers sit right, text left, colors and icons centered; everything is
    /// vertically centered.
    pub const fn resolve(self, kind: ValueKind) -> Self {
        let horizontal = match self.horizontal {
            HorizontalAlign::Default => {
                if kind.is_numeric() {
                    HorizontalAlign::Right
                } else if kind.is_text() {
                    HorizontalAlign::Left
                } else {
                    HorizontalAlign::Center
                }
            }
            other => other,
        };
        let vertical = match self.vertical {
            VerticalAlign::Default => VerticalAlign::Center,
            other => other,
        };
        Alignment::new(horizontal, vertical)
    }
}

/// Drawing primitives supplied by the host for one paint cycle
pub trait Surface {
    /// Draw single-line text inside `bounds`
    fn draw_text(&mut self, text: &str, bounds: Rect, align: Alignment);

    /// Fill `bounds` with a solid color
    fn fill_rect(&mut self, bounds: Rect, color: ColorRef);

    /// Draw an icon inside `bounds`
    fn draw_icon(&mut self, icon: IconHandle, bounds: Rect, align: Alignment);
}

impl Value {
    /// Draw this value inside `bounds`
    ///
    /// `Default` alignment parts are resolved per kind before reaching the
    /// surface. Nothing is drawn into an empty rectangle.
    pub fn render(&self, surface: &mut dyn Surface, bounds: Rect, align: Alignment) {
        if bounds.is_empty() {
            return;
        }
        let align = align.resolve(self.kind());
        match self {
            Value::StringA(s) => surface.draw_text(s, bounds, align),
            Value::ImmStringA(s) => surface.draw_text(s, bounds, align),
            Value::Color(c) => surface.fill_rect(bounds, *c),
            Value::Icon(icon) => surface.draw_icon(*icon, bounds, align),
            other => surface.draw_text(&other.to_string(), bounds, align),
        }
    }
}
