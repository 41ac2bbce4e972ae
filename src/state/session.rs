//! Session controller.
//!
//! Owns the single viewer session and routes input through the gesture interpreter,
//! the zoom engine and the boundary resolver. Everything here is platform-free: layout
//! comes in through [`Layout`] and results go out as [`Effect`]s for the host to apply.

use crate::config::ViewerSettings;
use crate::error::ViewerError;
use crate::model::{
    Effect, ImageStyle, InputEvent, Layout, Length, PanOffset, Point, Rect, Size, SourceImage,
    Transform,
};
use crate::state::boundary::{self, Resolution};
use crate::state::gesture::{GestureState, TOUCH_MOUSE_GUARD_MS};
use crate::state::zoom::{self, ScaleLimits};

/// State of one open-to-close lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerSession {
    pub source: SourceImage,
    pub scale: f64,
    pub is_pressed: bool,
    /// A finger is down; mouse presses are ignored until shortly after it lifts.
    pub is_touch_active: bool,
    touch_guard_until_ms: f64,
    pub gesture: GestureState,
}

impl ViewerSession {
    fn new(source: SourceImage, scale: f64) -> Self {
        Self {
            source,
            scale,
            is_pressed: false,
            is_touch_active: false,
            touch_guard_until_ms: f64::NEG_INFINITY,
            gesture: GestureState::default(),
        }
    }

    pub fn diff(&self) -> PanOffset {
        self.gesture.diff
    }

    fn mouse_blocked(&self, time_ms: f64) -> bool {
        self.is_touch_active || time_ms < self.touch_guard_until_ms
    }
}

/// Styles for the open animation: place at the thumbnail first, then move to center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpenPlan {
    pub initial: ImageStyle,
    pub target: ImageStyle,
    pub transform: Transform,
}

/// Styles for the close animation back onto the thumbnail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosePlan {
    pub transform: Transform,
    pub target: ImageStyle,
}

#[derive(Debug, Default)]
pub struct SessionController {
    settings: ViewerSettings,
    session: Option<ViewerSession>,
}

impl SessionController {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Replace the settings. Refused while a session is open.
    pub fn set_settings(&mut self, settings: ViewerSettings) -> Result<(), ViewerError> {
        if self.is_open() {
            return Err(ViewerError::AlreadyOpen);
        }
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn limits(&self) -> ScaleLimits {
        self.settings.limits()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Start a session. Fails without side effects if one is already open.
    pub fn open(&mut self, source: SourceImage, viewport: Size) -> Result<OpenPlan, ViewerError> {
        if self.is_open() {
            return Err(ViewerError::AlreadyOpen);
        }
        let scale = self.limits().clamp(1.0);
        self.session = Some(ViewerSession::new(source, scale));
        log::info!(
            "viewer opened from {}x{} thumbnail",
            source.client_size.width,
            source.client_size.height
        );
        Ok(opening_plan(&source, viewport))
    }

    /// End the session. `source_rect` is the thumbnail's rect now, since the page may
    /// have moved underneath the overlay. Returns `None` when nothing was open.
    pub fn close(&mut self, source_rect: Rect, viewport: Size) -> Option<ClosePlan> {
        let session = self.session.take()?;
        log::info!("viewer closed at scale {}", session.scale);
        Some(closing_plan(&session.source, source_rect, viewport))
    }

    fn transform_of(&self, session: &ViewerSession) -> Transform {
        let diff = session.gesture.diff;
        // Horizontal pan is locked at minimum scale; only drag-to-dismiss moves the image.
        let x = if session.scale <= self.settings.scale_min {
            0.0
        } else {
            diff.x
        };
        Transform::new(x, diff.y, session.scale)
    }

    /// Feed one input event. Events arriving with no open session are ignored.
    pub fn handle(&mut self, event: InputEvent, layout: &impl Layout) -> Vec<Effect> {
        let Some(mut session) = self.session.take() else {
            return Vec::new();
        };
        let effects = self.dispatch(&mut session, event, layout);
        // Stays open on Dismiss too: the host closes through `close`.
        self.session = Some(session);
        effects
    }

    fn dispatch(
        &self,
        session: &mut ViewerSession,
        event: InputEvent,
        layout: &impl Layout,
    ) -> Vec<Effect> {
        match event {
            InputEvent::Wheel { delta } => self.on_wheel(session, delta, layout),
            InputEvent::MouseDown { at, time_ms } => {
                if session.mouse_blocked(time_ms) {
                    log::debug!("ignoring emulated mouse press after touch");
                    return Vec::new();
                }
                self.on_press(session, at, time_ms, true, layout)
            }
            InputEvent::MouseMove { at } => self.on_drag(session, at),
            InputEvent::MouseUp { .. } => self.on_release(session, layout),
            InputEvent::TouchStart { at, touches, time_ms } => {
                session.is_touch_active = true;
                self.on_press(session, at, time_ms, touches <= 1, layout)
            }
            InputEvent::TouchMove { touches } => match touches.as_slice() {
                [] => Vec::new(),
                // A pinch stays a pinch until release.
                [_] if session.gesture.is_pinching() => Vec::new(),
                [single] => self.on_drag(session, *single),
                [a, b, ..] => self.on_pinch(session, *a, *b),
            },
            InputEvent::TouchEnd { time_ms } => {
                session.is_touch_active = false;
                session.touch_guard_until_ms = time_ms + TOUCH_MOUSE_GUARD_MS;
                if session.is_pressed {
                    session.scale = self.limits().clamp(session.scale);
                }
                self.on_release(session, layout)
            }
            InputEvent::Resize => self.on_resize(session, layout),
        }
    }

    fn emit(&self, session: &ViewerSession, animate: bool) -> Effect {
        Effect::Transform {
            transform: self.transform_of(session),
            animate,
        }
    }

    fn on_wheel(
        &self,
        session: &mut ViewerSession,
        delta: f64,
        layout: &impl Layout,
    ) -> Vec<Effect> {
        let limits = self.limits();
        session.scale = zoom::wheel_scale(session.scale, delta, limits);
        let mut animate = false;
        if delta > 0.0 {
            let dampened = zoom::dampen_pan(session.gesture.diff, session.scale);
            session.gesture.set_offset(dampened);
            if session.scale > limits.min && !session.is_pressed {
                let viewport = layout.viewport();
                let transform = self.transform_of(session);
                let rect = boundary::image_rect(viewport, layout.image_size(), &transform);
                let settled = boundary::resolve_zoomed(dampened, rect, viewport);
                animate = settled != dampened;
                session.gesture.set_offset(settled);
            }
        }
        log::debug!("wheel {} -> scale {}", delta, session.scale);
        vec![self.emit(session, animate)]
    }

    fn on_press(
        &self,
        session: &mut ViewerSession,
        at: Point,
        time_ms: f64,
        counts_as_tap: bool,
        layout: &impl Layout,
    ) -> Vec<Effect> {
        session.is_pressed = true;
        session.gesture.press(at);
        if !counts_as_tap {
            return Vec::new();
        }
        if !session.gesture.taps.press(time_ms) {
            return Vec::new();
        }
        let fit = zoom::fit_height_scale(layout.viewport(), layout.image_size());
        let limits = self.limits();
        session.scale = zoom::force_zoom_target(session.scale, fit, limits);
        if session.scale <= limits.min {
            // Back at minimum the image recenters, like wheel zoom-out does.
            session.gesture.set_offset(Point::ZERO);
        }
        log::debug!("double tap -> scale {}", session.scale);
        vec![self.emit(session, true)]
    }

    fn on_drag(&self, session: &mut ViewerSession, at: Point) -> Vec<Effect> {
        if !session.is_pressed {
            return Vec::new();
        }
        session.gesture.drag_to(at);
        vec![self.emit(session, false)]
    }

    fn on_pinch(&self, session: &mut ViewerSession, a: Point, b: Point) -> Vec<Effect> {
        if !session.is_pressed {
            return Vec::new();
        }
        match session.gesture.pinch(a, b) {
            Some(increment) => {
                session.scale = zoom::pinch_scale(session.scale, increment);
                vec![self.emit(session, false)]
            }
            None => {
                log::warn!("ignoring pinch sample with invalid geometry");
                Vec::new()
            }
        }
    }

    fn on_release(&self, session: &mut ViewerSession, layout: &impl Layout) -> Vec<Effect> {
        if !session.is_pressed {
            return Vec::new();
        }
        session.is_pressed = false;
        let diff = session.diff();
        let resolution = boundary::resolve(
            diff,
            session.scale,
            self.settings.scale_min,
            layout.image_size(),
            layout.viewport(),
        );
        match resolution {
            Resolution::Dismiss => {
                log::debug!("drag-to-dismiss at offset {:?}", diff);
                session.gesture.release(diff);
                vec![Effect::Dismiss]
            }
            Resolution::Settle(settled) => {
                session.gesture.release(settled);
                vec![self.emit(session, true)]
            }
        }
    }

    fn on_resize(&self, session: &mut ViewerSession, layout: &impl Layout) -> Vec<Effect> {
        let delta = zoom::resize_wheel_delta(self.limits());
        let mut effects = self.on_wheel(session, delta, layout);
        effects.push(Effect::Restyle(centered_style(&session.source, layout.viewport())));
        effects
    }
}

fn thumbnail_anchor(rect: Rect, size: Size) -> (Length, Length) {
    (
        Length::Px(rect.left + size.width / 2.0),
        Length::Px(rect.top + size.height / 2.0),
    )
}

/// Centered, viewport-bounded style of an open viewer after a resize. Square images
/// get both minimums so they fill the short side of the new viewport.
pub fn centered_style(source: &SourceImage, viewport: Size) -> ImageStyle {
    let (min_width, min_height) = if source.square {
        zoom::square_fill(viewport)
    } else {
        (None, None)
    };
    centered(min_width, min_height)
}

fn centered(min_width: Option<Length>, min_height: Option<Length>) -> ImageStyle {
    ImageStyle {
        left: Length::Percent(50.0),
        top: Length::Percent(50.0),
        max_width: Length::Percent(100.0),
        max_height: Length::Percent(100.0),
        min_width,
        min_height,
    }
}

pub fn opening_plan(source: &SourceImage, viewport: Size) -> OpenPlan {
    let size = source.client_size;
    let (left, top) = thumbnail_anchor(source.rect, size);
    // Opening pins only the dimension along the short viewport side.
    let (open_min_width, open_min_height) = match (source.square, viewport.is_portrait()) {
        (false, _) => (None, None),
        (true, true) => (Some(Length::Vw(100.0)), None),
        (true, false) => (None, Some(Length::Vh(100.0))),
    };
    let (min_width, min_height) = if source.square {
        (Some(Length::Px(size.width)), Some(Length::Px(size.height)))
    } else {
        (None, None)
    };
    OpenPlan {
        initial: ImageStyle {
            left,
            top,
            max_width: Length::Px(size.width),
            max_height: Length::Px(size.height),
            min_width,
            min_height,
        },
        target: centered(open_min_width, open_min_height),
        transform: Transform::identity(),
    }
}

pub fn closing_plan(source: &SourceImage, rect: Rect, viewport: Size) -> ClosePlan {
    let center = rect.center();
    let (left, top) = (Length::Px(center.x), Length::Px(center.y));
    let (min_width, min_height) = match (source.square, viewport.is_portrait()) {
        (false, _) => (None, None),
        (true, true) => (Some(Length::Px(rect.width)), None),
        (true, false) => (None, Some(Length::Px(rect.height))),
    };
    ClosePlan {
        transform: Transform::identity(),
        target: ImageStyle {
            left,
            top,
            max_width: Length::Px(rect.width),
            max_height: Length::Px(rect.height),
            min_width,
            min_height,
        },
    }
}
