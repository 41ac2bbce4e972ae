use yew::prelude::*;

/// One demo picture: a landscape, a portrait and a square source so every sizing
/// branch of the viewer gets exercised.
#[derive(Clone, PartialEq)]
pub struct Picture {
    pub src: String,
    pub caption: &'static str,
}

pub fn demo_pictures() -> Vec<Picture> {
    [
        (10, 1600, 1000, "Landscape"),
        (20, 900, 1400, "Portrait"),
        (30, 1200, 1200, "Square"),
        (40, 2400, 800, "Panorama"),
        (50, 1000, 1000, "Square (small)"),
        (60, 1280, 1920, "Tall"),
    ]
    .into_iter()
    .map(|(id, w, h, caption)| Picture {
        src: format!("https://picsum.photos/id/{}/{}/{}", id, w, h),
        caption,
    })
    .collect()
}

#[derive(Properties, PartialEq, Clone)]
pub struct GalleryProps {
    pub pictures: Vec<Picture>,
    pub node_ref: NodeRef,
}

#[function_component(Gallery)]
pub fn gallery(props: &GalleryProps) -> Html {
    html! {
        <div ref={props.node_ref.clone()} style="display:grid; grid-template-columns:repeat(auto-fill, minmax(180px, 1fr)); gap:14px; padding:16px;">
            { for props.pictures.iter().map(|p| html! {
                <figure key={p.src.clone()} style="margin:0; background:#161b22; border:1px solid #30363d; border-radius:10px; overflow:hidden;">
                    <img src={p.src.clone()} alt={p.caption} loading="lazy" style="display:block; width:100%; height:160px; object-fit:cover; cursor:zoom-in;" />
                    <figcaption style="padding:6px 10px; font-size:12px; opacity:0.75;">{ p.caption }</figcaption>
                </figure>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_set_covers_square_and_both_orientations() {
        let pics = demo_pictures();
        assert!(pics.iter().any(|p| p.src.ends_with("/1200/1200")));
        assert!(pics.iter().any(|p| p.src.ends_with("/900/1400")));
        assert!(pics.iter().any(|p| p.src.ends_with("/1600/1000")));
    }
}
