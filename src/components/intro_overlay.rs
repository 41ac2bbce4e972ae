use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroOverlayProps {
    pub show: bool,
    pub hide_intro: Callback<()>,
}

#[function_component(IntroOverlay)]
pub fn intro_overlay(props: &IntroOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let hide_btn = {
        let cb = props.hide_intro.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:fixed; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:28px 36px; border-radius:14px; max-width:520px; width:90%; box-shadow:0 0 0 1px #1a1f24, 0 6px 18px rgba(0,0,0,0.6); font-size:14px; line-height:1.4; z-index:20;">
            <h2 style="margin:0 0 12px 0; font-size:22px; color:#58a6ff; text-align:center;">{"Lightbox"}</h2>
            <p style="margin:4px 0 10px 0; text-align:center; opacity:0.85;">{"Click any picture to open it full screen."}</p>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{"Scroll the wheel to zoom in and out."}</li>
                <li>{"Double-click or double-tap to cycle fit height, maximum and minimum zoom."}</li>
                <li>{"Pinch with two fingers to zoom on touch screens."}</li>
                <li>{"Drag to pan a zoomed picture; it springs back if you leave a gap."}</li>
                <li>{"At normal size, swipe up or down past half the picture to close."}</li>
                <li>{"The \u{2716} in the corner always closes the viewer."}</li>
            </ul>
            <div style="display:flex; gap:12px; justify-content:center; margin-top:8px;">
                <button onclick={hide_btn}>{"Got it"}</button>
            </div>
            <div style="margin-top:12px; font-size:11px; opacity:0.6; text-align:center;">{"Zoom limits and transition timing can be changed in Settings."}</div>
        </div>
    }
}
