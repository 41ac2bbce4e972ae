use super::{
    gallery::{demo_pictures, Gallery},
    intro_overlay::IntroOverlay,
    settings_modal::SettingsModal,
};
use crate::config::{ViewerSettings, SETTINGS_STORAGE_KEY};
use crate::util::js_error_message;
use crate::web::Lightbox;
use web_sys::Storage;
use yew::prelude::*;

const INTRO_SEEN_KEY: &str = "lightbox_intro_seen";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Saved settings, falling back to defaults when nothing valid is stored.
fn load_settings() -> ViewerSettings {
    let Some(raw) = storage().and_then(|s| s.get_item(SETTINGS_STORAGE_KEY).ok().flatten())
    else {
        return ViewerSettings::default();
    };
    match ViewerSettings::from_json(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("ignoring stored settings: {}", e);
            ViewerSettings::default()
        }
    }
}

fn save_settings(settings: &ViewerSettings) {
    let Some(store) = storage() else {
        return;
    };
    match settings.to_json() {
        Ok(s) => {
            if let Err(e) = store.set_item(SETTINGS_STORAGE_KEY, &s) {
                log::warn!("failed to save settings: {}", js_error_message(&e));
            }
        }
        Err(e) => log::warn!("failed to save settings: {}", e),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(load_settings);
    let lightbox = use_state(|| Lightbox::new((*settings).clone()));
    let gallery_ref = use_node_ref();
    let pictures = use_memo((), |_| demo_pictures());
    let show_settings = use_state(|| false);
    let show_intro = use_state(|| {
        storage()
            .and_then(|s| s.get_item(INTRO_SEEN_KEY).ok().flatten())
            .is_none()
    });

    // Bind thumbnails once the gallery is in the DOM; unbind on unmount.
    {
        let lightbox = (*lightbox).clone();
        let gallery_ref = gallery_ref.clone();
        use_effect_with((), move |_| {
            let root = gallery_ref.cast::<web_sys::Element>();
            if let Err(e) = lightbox.bind_images(root.as_ref()) {
                log::error!("failed to bind gallery: {}", e);
            }
            move || {
                lightbox.close();
                lightbox.unbind_images();
            }
        });
    }
    // Persist settings and hand them to the viewer
    {
        let lightbox = (*lightbox).clone();
        use_effect_with((*settings).clone(), move |settings| {
            save_settings(settings);
            if !lightbox.set_settings(settings.clone()) {
                log::warn!("viewer kept its previous settings");
            }
            || ()
        });
    }

    let hide_intro = {
        let show_intro = show_intro.clone();
        Callback::from(move |_| {
            if let Some(store) = storage() {
                if let Err(e) = store.set_item(INTRO_SEEN_KEY, "1") {
                    log::warn!("failed to remember intro: {}", js_error_message(&e));
                }
            }
            show_intro.set(false);
        })
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };
    let apply_settings = {
        let settings = settings.clone();
        let show_settings = show_settings.clone();
        Callback::from(move |next: ViewerSettings| {
            settings.set(next);
            show_settings.set(false);
        })
    };
    let reset_settings = {
        let settings = settings.clone();
        Callback::from(move |_| settings.set(ViewerSettings::default()))
    };

    html! {
        <div style="min-height:100vh; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
            <nav style="display:flex; justify-content:space-between; align-items:center; padding:10px 16px; border-bottom:1px solid #30363d;">
                <span style="font-size:18px; color:#58a6ff;">{"Lightbox"}</span>
                <div style="display:flex; gap:8px;">
                    <span style="font-size:12px; opacity:0.7; align-self:center;">
                        { format!("zoom {}x to {}x", settings.scale_min, settings.scale_max) }
                    </span>
                    <button onclick={open_settings}>{"Settings"}</button>
                </div>
            </nav>
            <Gallery pictures={(*pictures).clone()} node_ref={gallery_ref} />
            <IntroOverlay show={*show_intro} {hide_intro} />
            <SettingsModal
                show={*show_settings}
                settings={(*settings).clone()}
                on_close={close_settings}
                on_apply={apply_settings}
                on_reset={reset_settings}
            />
        </div>
    }
}
