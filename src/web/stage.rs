//! The overlay the viewer draws into: a full-window container holding the image and
//! a close button. Only applies styles it is told to; all decisions live in `state`.

use crate::config::ViewerSettings;
use crate::error::ViewerError;
use crate::model::{ImageStyle, Layout, Rect, Size, SourceImage, Transform, Transition};
use crate::util::js_error_message;
use crate::web::timer::{self, SETTLE_MS, TRANSITION_MS};
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, EventTarget, HtmlElement, HtmlImageElement, Window};

pub const CONTAINER_ID: &str = "image-viewer-container";

const CONTAINER_CSS: &str = "position:fixed; inset:0; z-index:1000; overflow:hidden; \
    background-color:#0000; touch-action:none; user-select:none;";
const IMAGE_CSS: &str = "position:absolute; transform-origin:50% 50%; cursor:grab; \
    -webkit-user-drag:none;";
const CLOSE_CSS: &str = "position:absolute; top:12px; right:16px; z-index:1; color:#fff; \
    font-size:24px; line-height:1; cursor:pointer; opacity:1; text-decoration:none;";

fn set(style: &CssStyleDeclaration, name: &str, value: &str) {
    if let Err(e) = style.set_property(name, value) {
        log::warn!("failed to set {}: {}", name, js_error_message(&e));
    }
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, ViewerError> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| ViewerError::Dom(format!("<{}> has an unexpected element type", tag)))
}

/// Measure a thumbnail the viewer is about to open from.
pub fn describe_source(img: &HtmlImageElement) -> SourceImage {
    let natural = (img.natural_width(), img.natural_height());
    SourceImage {
        rect: client_rect(img),
        client_size: Size::new(img.client_width() as f64, img.client_height() as f64),
        square: natural.0 > 0 && natural.0 == natural.1,
    }
}

pub fn client_rect(el: &web_sys::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

#[derive(Clone)]
pub struct Stage {
    window: Window,
    body: HtmlElement,
    container: HtmlElement,
    image: HtmlImageElement,
    close_button: HtmlElement,
}

impl Stage {
    /// Build the overlay for `src` and append it to the body.
    pub fn mount(src: &str) -> Result<Self, ViewerError> {
        let window = web_sys::window().ok_or(ViewerError::NoWindow)?;
        let document = window.document().ok_or(ViewerError::NoDocument)?;
        let body = document.body().ok_or(ViewerError::NoBody)?;

        let container: HtmlElement = create(&document, "div")?;
        container.set_id(CONTAINER_ID);
        container.style().set_css_text(CONTAINER_CSS);

        let image: HtmlImageElement = create(&document, "img")?;
        image.set_src(src);
        image.set_alt("");
        image.style().set_css_text(IMAGE_CSS);

        let close_button: HtmlElement = create(&document, "a")?;
        close_button.set_text_content(Some("\u{2716}"));
        close_button.set_title("Close");
        close_button.style().set_css_text(CLOSE_CSS);

        container.append_child(&close_button)?;
        container.append_child(&image)?;
        body.append_child(&container)?;

        Ok(Self {
            window,
            body,
            container,
            image,
            close_button,
        })
    }

    pub fn window_target(&self) -> EventTarget {
        self.window.clone().into()
    }

    pub fn close_target(&self) -> EventTarget {
        self.close_button.clone().into()
    }

    pub fn lock_page_scroll(&self, locked: bool) {
        set(&self.body.style(), "overflow", if locked { "hidden" } else { "" });
    }

    pub fn apply_style(&self, style: &ImageStyle) {
        let css = self.image.style();
        for (name, value) in style.css_properties() {
            set(&css, name, &value);
        }
    }

    pub fn apply_transform(&self, transform: &Transform) {
        set(&self.image.style(), "transform", &transform.to_css());
    }

    fn set_transition(&self, el: &HtmlElement, settings: &ViewerSettings, which: Transition) {
        set(&el.style(), "transition", settings.transition(which));
    }

    /// Run the start transition on the image, then restore the end transition.
    pub fn animate(&self, settings: &ViewerSettings) {
        self.set_transition(&self.image, settings, Transition::Start);
        let stage = self.clone();
        let end = settings.transition(Transition::End).to_string();
        timer::after(TRANSITION_MS, move || {
            set(&stage.image.style(), "transition", &end);
        });
    }

    pub fn fade_in(&self, settings: &ViewerSettings) {
        let stage = self.clone();
        let start = settings.transition(Transition::Start).to_string();
        timer::after(SETTLE_MS, move || {
            let css = stage.container.style();
            set(&css, "transition", &start);
            set(&css, "background-color", "#000f");
        });
        let stage = self.clone();
        let end = settings.transition(Transition::End).to_string();
        timer::after(TRANSITION_MS, move || {
            set(&stage.container.style(), "transition", &end);
        });
    }

    pub fn fade_out(&self, settings: &ViewerSettings) {
        for el in [&self.container, &self.close_button] {
            self.set_transition(el, settings, Transition::Start);
        }
        set(&self.container.style(), "background-color", "#0000");
        set(&self.close_button.style(), "opacity", "0");
        self.set_transition(&self.image, settings, Transition::Start);
    }

    pub fn remove(&self) {
        self.container.remove();
    }
}

impl Layout for Stage {
    fn viewport(&self) -> Size {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Size::new(width, height)
    }

    fn image_size(&self) -> Size {
        Size::new(
            self.image.client_width() as f64,
            self.image.client_height() as f64,
        )
    }
}
