//! The embeddable lightbox handle.
//!
//! `Lightbox` owns the [`SessionController`] and, while a session is open, the overlay
//! stage and the window listeners that feed it. Listeners only hold a `Weak` handle, so
//! dropping every `Lightbox` clone also disarms them.

use crate::config::ViewerSettings;
use crate::error::ViewerError;
use crate::model::{Effect, InputEvent, Layout, Point};
use crate::state::SessionController;
use crate::state::zoom;
use crate::util::now_ms;
use crate::web::listeners::Listeners;
use crate::web::stage::{self, Stage};
use crate::web::timer::{self, SETTLE_MS, TRANSITION_MS};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, MouseEvent, TouchEvent, TouchList, WheelEvent};

struct OpenView {
    stage: Stage,
    source: HtmlImageElement,
    listeners: Listeners,
}

#[derive(Default)]
struct Inner {
    controller: SessionController,
    view: Option<OpenView>,
    image_bindings: Listeners,
}

#[derive(Clone, Default)]
pub struct Lightbox {
    inner: Rc<RefCell<Inner>>,
}

impl PartialEq for Lightbox {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Lightbox {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                controller: SessionController::new(settings),
                ..Inner::default()
            })),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().controller.is_open()
    }

    /// Replace the settings; returns false (and keeps the old ones) while a session is
    /// open or when the new settings are invalid.
    pub fn set_settings(&self, settings: ViewerSettings) -> bool {
        match self.inner.borrow_mut().controller.set_settings(settings) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("settings not applied: {}", e);
                false
            }
        }
    }

    /// Open the viewer on `source`. Returns false if a session is already open or the
    /// overlay could not be built.
    pub fn open(&self, source: &HtmlImageElement) -> bool {
        match self.try_open(source) {
            Ok(()) => true,
            Err(ViewerError::AlreadyOpen) => {
                log::debug!("open ignored: viewer already showing");
                false
            }
            Err(e) => {
                log::error!("failed to open viewer: {}", e);
                false
            }
        }
    }

    fn try_open(&self, source: &HtmlImageElement) -> Result<(), ViewerError> {
        if self.is_open() {
            return Err(ViewerError::AlreadyOpen);
        }
        let stage = Stage::mount(&source.src())?;
        let described = stage::describe_source(source);
        let (plan, settings) = {
            let mut inner = self.inner.borrow_mut();
            match inner.controller.open(described, stage.viewport()) {
                Ok(plan) => (plan, inner.controller.settings().clone()),
                Err(e) => {
                    stage.remove();
                    return Err(e);
                }
            }
        };

        let listeners = match bind_session(&self.inner, &stage) {
            Ok(listeners) => listeners,
            Err(e) => {
                self.inner
                    .borrow_mut()
                    .controller
                    .close(described.rect, stage.viewport());
                stage.remove();
                return Err(e);
            }
        };

        stage.lock_page_scroll(true);
        stage.apply_style(&plan.initial);
        stage.apply_transform(&plan.transform);
        stage.animate(&settings);
        stage.fade_in(&settings);
        {
            let stage = stage.clone();
            timer::after(SETTLE_MS, move || stage.apply_style(&plan.target));
        }

        self.inner.borrow_mut().view = Some(OpenView {
            stage,
            source: source.clone(),
            listeners,
        });
        Ok(())
    }

    /// Close the open viewer. Returns false if nothing was open.
    pub fn close(&self) -> bool {
        close_view(&self.inner)
    }

    /// Open the viewer when any `<img>` under `root` (the whole document if `None`) is
    /// clicked. Returns how many images were bound.
    pub fn bind_images(&self, root: Option<&Element>) -> Result<usize, ViewerError> {
        let images = match root {
            Some(root) => root.get_elements_by_tag_name("img"),
            None => web_sys::window()
                .ok_or(ViewerError::NoWindow)?
                .document()
                .ok_or(ViewerError::NoDocument)?
                .get_elements_by_tag_name("img"),
        };
        let mut inner = self.inner.borrow_mut();
        let before = inner.image_bindings.len();
        for i in 0..images.length() {
            let Some(img) = images
                .item(i)
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            else {
                continue;
            };
            let weak = Rc::downgrade(&self.inner);
            let target = img.clone();
            inner
                .image_bindings
                .listen(&img, "click", move |_e: MouseEvent| {
                    if let Some(inner) = weak.upgrade() {
                        Lightbox { inner }.open(&target);
                    }
                })?;
        }
        let bound = inner.image_bindings.len() - before;
        log::info!("bound lightbox to {} images", bound);
        Ok(bound)
    }

    /// Remove every click handler added by [`Lightbox::bind_images`].
    pub fn unbind_images(&self) {
        self.inner.borrow_mut().image_bindings = Listeners::default();
    }
}

fn touch_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn mouse_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

/// `wheelDelta` is non-standard and missing from the typed bindings.
fn legacy_wheel_delta(e: &WheelEvent) -> f64 {
    js_sys::Reflect::get(e, &"wheelDelta".into())
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn bind_session(inner: &Rc<RefCell<Inner>>, stage: &Stage) -> Result<Listeners, ViewerError> {
    let mut listeners = Listeners::default();
    let window = stage.window_target();
    let weak = Rc::downgrade(inner);

    {
        let weak = weak.clone();
        listeners.listen(&window, "wheel", move |e: WheelEvent| {
            let delta = zoom::wheel_delta(e.delta_y(), e.detail() as f64, legacy_wheel_delta(&e));
            dispatch(&weak, InputEvent::Wheel { delta });
        })?;
    }
    {
        let weak = weak.clone();
        listeners.listen(&window, "mousedown", move |e: MouseEvent| {
            dispatch(
                &weak,
                InputEvent::MouseDown {
                    at: mouse_point(&e),
                    time_ms: now_ms(),
                },
            );
        })?;
    }
    {
        let weak = weak.clone();
        listeners.listen(&window, "mousemove", move |e: MouseEvent| {
            dispatch(&weak, InputEvent::MouseMove { at: mouse_point(&e) });
        })?;
    }
    {
        let weak = weak.clone();
        listeners.listen(&window, "mouseup", move |_e: MouseEvent| {
            dispatch(&weak, InputEvent::MouseUp { time_ms: now_ms() });
        })?;
    }
    {
        let weak = weak.clone();
        listeners.listen(&window, "touchstart", move |e: TouchEvent| {
            let Some(touch) = e.changed_touches().item(0) else {
                return;
            };
            dispatch(
                &weak,
                InputEvent::TouchStart {
                    at: Point::new(touch.client_x() as f64, touch.client_y() as f64),
                    touches: e.touches().length(),
                    time_ms: now_ms(),
                },
            );
        })?;
    }
    {
        let weak = weak.clone();
        listeners.listen(&window, "touchmove", move |e: TouchEvent| {
            dispatch(
                &weak,
                InputEvent::TouchMove {
                    touches: touch_points(&e.touches()),
                },
            );
        })?;
    }
    {
        let weak = weak.clone();
        listeners.listen(&window, "touchend", move |_e: TouchEvent| {
            dispatch(&weak, InputEvent::TouchEnd { time_ms: now_ms() });
        })?;
    }
    {
        let weak = weak.clone();
        listeners.listen(&window, "resize", move |_e: web_sys::Event| {
            dispatch(&weak, InputEvent::Resize);
        })?;
    }
    listeners.listen(&stage.close_target(), "click", move |_e: MouseEvent| {
        if let Some(inner) = weak.upgrade() {
            close_view(&inner);
        }
    })?;
    Ok(listeners)
}

fn dispatch(weak: &Weak<RefCell<Inner>>, event: InputEvent) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let (effects, stage, settings) = {
        let mut guard = inner.borrow_mut();
        let Inner {
            controller, view, ..
        } = &mut *guard;
        let Some(view) = view.as_ref() else {
            return;
        };
        let effects = controller.handle(event, &view.stage);
        (effects, view.stage.clone(), controller.settings().clone())
    };
    for effect in effects {
        match effect {
            Effect::Transform { transform, animate } => {
                if animate {
                    stage.animate(&settings);
                }
                stage.apply_transform(&transform);
            }
            Effect::Restyle(style) => stage.apply_style(&style),
            Effect::Dismiss => {
                close_view(&inner);
                break;
            }
        }
    }
}

fn close_view(inner: &Rc<RefCell<Inner>>) -> bool {
    let (view, plan, settings) = {
        let mut guard = inner.borrow_mut();
        let Some(view) = guard.view.take() else {
            return false;
        };
        let rect = stage::client_rect(&view.source);
        let plan = guard.controller.close(rect, view.stage.viewport());
        (view, plan, guard.controller.settings().clone())
    };
    let OpenView {
        stage,
        mut listeners,
        ..
    } = view;
    listeners.detach();

    stage.fade_out(&settings);
    match plan {
        Some(plan) => {
            stage.apply_transform(&plan.transform);
            let stage = stage.clone();
            timer::after(SETTLE_MS, move || {
                stage.apply_style(&plan.target);
                stage.lock_page_scroll(false);
            });
        }
        None => stage.lock_page_scroll(false),
    }
    // The closures may include the one running right now; free them with the overlay.
    timer::after(TRANSITION_MS, move || {
        stage.remove();
        drop(listeners);
    });
    true
}
