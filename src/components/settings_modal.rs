use crate::config::ViewerSettings;
use crate::error::ViewerError;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Text-field contents of the settings form.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsDraft {
    pub scale_min: String,
    pub scale_max: String,
    pub transition_start: String,
    pub transition_end: String,
}

impl SettingsDraft {
    pub fn from_settings(s: &ViewerSettings) -> Self {
        Self {
            scale_min: s.scale_min.to_string(),
            scale_max: s.scale_max.to_string(),
            transition_start: s.transition_start.clone(),
            transition_end: s.transition_end.clone(),
        }
    }

    pub fn parse(&self) -> Result<ViewerSettings, ViewerError> {
        let number = |field: &str, raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ViewerError::InvalidSettings {
                    message: format!("{} must be a number, got '{}'", field, raw),
                })
        };
        let settings = ViewerSettings {
            scale_min: number("scaleMin", &self.scale_min)?,
            scale_max: number("scaleMax", &self.scale_max)?,
            transition_start: self.transition_start.trim().to_string(),
            transition_end: self.transition_end.trim().to_string(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: ViewerSettings,
    pub on_close: Callback<()>,
    pub on_apply: Callback<ViewerSettings>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    let draft = use_state(|| SettingsDraft::from_settings(&props.settings));
    let error = use_state(|| None::<String>);
    {
        let draft = draft.clone();
        let error = error.clone();
        use_effect_with((props.show, props.settings.clone()), move |(_, settings)| {
            draft.set(SettingsDraft::from_settings(settings));
            error.set(None);
            || ()
        });
    }
    if !props.show {
        return html! {};
    }

    let field = |label: &'static str,
                 value: String,
                 update: fn(&mut SettingsDraft, String)|
     -> Html {
        let draft = draft.clone();
        let onchange = Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            update(&mut next, input.value());
            draft.set(next);
        });
        html! {
            <label style="display:flex; align-items:center; justify-content:space-between; gap:8px;">
                <span>{ label }</span>
                <input type="text" {value} {onchange} style="width:160px;" />
            </label>
        }
    };

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let apply_cb = {
        let cb = props.on_apply.clone();
        let draft = draft.clone();
        let error = error.clone();
        Callback::from(move |_| match draft.parse() {
            Ok(settings) => cb.emit(settings),
            Err(e) => error.set(Some(e.to_string())),
        })
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Restore the default zoom limits and transitions?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                { field("Minimum zoom", draft.scale_min.clone(), |d, v| d.scale_min = v) }
                { field("Maximum zoom", draft.scale_max.clone(), |d, v| d.scale_max = v) }
                { field("Animated transition", draft.transition_start.clone(), |d, v| d.transition_start = v) }
                { field("Resting transition", draft.transition_end.clone(), |d, v| d.transition_end = v) }
            </div>
            if let Some(msg) = &*error {
                <div style="color:#f85149; font-size:12px;">{ msg.clone() }</div>
            }
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Restore Defaults"}</button>
                <button onclick={apply_cb} style="flex:0 0 auto;">{"Apply"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Transitions are CSS transition values, e.g. 0.3s ease-out. Settings are saved in this browser."}</div>
        </div>
    </div>}
}
