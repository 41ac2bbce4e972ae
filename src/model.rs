//! Plain data types shared by the gesture state machine and the DOM layer.
//! Geometry is in CSS pixels, client coordinates (origin at the viewport's top-left).

use std::fmt;
use std::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled_down(self, divisor: f64) -> Self {
        Self::new(self.x / divisor, self.y / divisor)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Cumulative pan translation applied on top of centering. Positive values move
/// the image up/left.
pub type PanOffset = Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Portrait or square viewports fill along the width.
    pub fn is_portrait(&self) -> bool {
        self.width <= self.height
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Rect of `size` centered on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// The transform applied to the viewer image. Always rebuilt from its parts and
/// serialized only when handed to the element's style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Transform {
    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// CSS `transform` value. The image is anchored by its center (`left/top: 50%`),
    /// so the pan offset is subtracted from the -50% centering shift.
    pub fn to_css(&self) -> String {
        format!(
            "translate(calc(-50% - {}px), calc(-50% - {}px)) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
    Vw(f64),
    Vh(f64),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", v),
            Length::Percent(v) => write!(f, "{}%", v),
            Length::Vw(v) => write!(f, "{}vw", v),
            Length::Vh(v) => write!(f, "{}vh", v),
        }
    }
}

/// Placement and size bounds for the viewer image. `None` minimums clear the
/// property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageStyle {
    pub left: Length,
    pub top: Length,
    pub max_width: Length,
    pub max_height: Length,
    pub min_width: Option<Length>,
    pub min_height: Option<Length>,
}

impl ImageStyle {
    /// `(property, value)` pairs ready for `style.setProperty`; cleared minimums map to "".
    pub fn css_properties(&self) -> [(&'static str, String); 6] {
        let opt = |l: Option<Length>| l.map(|l| l.to_string()).unwrap_or_default();
        [
            ("left", self.left.to_string()),
            ("top", self.top.to_string()),
            ("max-width", self.max_width.to_string()),
            ("max-height", self.max_height.to_string()),
            ("min-width", opt(self.min_width)),
            ("min-height", opt(self.min_height)),
        ]
    }
}

/// Snapshot of the thumbnail a session was opened from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceImage {
    /// Bounding client rect at open time.
    pub rect: Rect,
    /// clientWidth/clientHeight of the thumbnail.
    pub client_size: Size,
    /// Natural width equals natural height; square images get viewport-filling minimums.
    pub square: bool,
}

/// Layout queries the state machine needs from its host.
pub trait Layout {
    fn viewport(&self) -> Size;
    /// Rendered size of the viewer image before the transform is applied.
    fn image_size(&self) -> Size;
}

/// Which configured transition string the host should put on the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Start,
    End,
}

/// Output of the state machine, applied by the host in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Set the image transform. `animate` runs the start transition, then the end one.
    Transform { transform: Transform, animate: bool },
    /// Replace the image bounds (resize).
    Restyle(ImageStyle),
    /// Drag-to-dismiss fired; the host should close the viewer.
    Dismiss,
}

/// Raw input, already extracted from the platform event.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Wheel { delta: f64 },
    MouseDown { at: Point, time_ms: f64 },
    MouseMove { at: Point },
    MouseUp { time_ms: f64 },
    /// `touches` is the number of fingers down after this start.
    TouchStart { at: Point, touches: u32, time_ms: f64 },
    /// Active touch points, in platform order.
    TouchMove { touches: Vec<Point> },
    TouchEnd { time_ms: f64 },
    Resize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_serializes_translate_then_scale() {
        let t = Transform::new(12.5, -4.0, 2.0);
        assert_eq!(
            t.to_css(),
            "translate(calc(-50% - 12.5px), calc(-50% - -4px)) scale(2)"
        );
        assert_eq!(t.to_string(), t.to_css());
    }

    #[test]
    fn lengths_render_units() {
        assert_eq!(Length::Px(120.0).to_string(), "120px");
        assert_eq!(Length::Percent(100.0).to_string(), "100%");
        assert_eq!(Length::Vw(100.0).to_string(), "100vw");
        assert_eq!(Length::Vh(50.0).to_string(), "50vh");
    }

    #[test]
    fn cleared_minimums_are_empty_strings() {
        let style = ImageStyle {
            left: Length::Percent(50.0),
            top: Length::Percent(50.0),
            max_width: Length::Percent(100.0),
            max_height: Length::Percent(100.0),
            min_width: Some(Length::Vw(100.0)),
            min_height: None,
        };
        let props = style.css_properties();
        assert_eq!(props[4], ("min-width", "100vw".to_string()));
        assert_eq!(props[5], ("min-height", String::new()));
    }

    #[test]
    fn centered_rect_edges() {
        let r = Rect::centered(Point::new(100.0, 50.0), Size::new(40.0, 20.0));
        assert_eq!(r.left, 80.0);
        assert_eq!(r.top, 40.0);
        assert_eq!(r.right(), 120.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Point::new(100.0, 50.0));
    }
}
