//! Boundary resolution: snap a released image back into view, or dismiss it.

use crate::model::{PanOffset, Point, Rect, Size, Transform};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// Vertical drag at minimum scale went past half the image height.
    Dismiss,
    /// Offset to commit.
    Settle(PanOffset),
}

/// Where the image sits on screen for a given transform. The image is centered in the
/// viewport, scaled around its own center, then shifted by the negated pan offset.
pub fn image_rect(viewport: Size, image: Size, transform: &Transform) -> Rect {
    let center = Point::new(
        viewport.width / 2.0 - transform.translate_x,
        viewport.height / 2.0 - transform.translate_y,
    );
    Rect::centered(
        center,
        Size::new(image.width * transform.scale, image.height * transform.scale),
    )
}

/// Resolve a released gesture.
///
/// `image` is the rendered size before scaling. At or below `min_scale` only the
/// vertical offset matters: beyond half the image height it dismisses, otherwise the
/// image recenters.
pub fn resolve(
    diff: PanOffset,
    scale: f64,
    min_scale: f64,
    image: Size,
    viewport: Size,
) -> Resolution {
    if scale <= min_scale {
        let limit = image.height / 2.0;
        if diff.y > limit || diff.y < -limit {
            Resolution::Dismiss
        } else {
            Resolution::Settle(Point::ZERO)
        }
    } else {
        let rect = image_rect(viewport, image, &Transform::new(diff.x, diff.y, scale));
        Resolution::Settle(resolve_zoomed(diff, rect, viewport))
    }
}

/// Pull a zoomed image back so it does not leave a gap at a viewport edge.
pub fn resolve_zoomed(diff: PanOffset, rect: Rect, viewport: Size) -> PanOffset {
    let x = resolve_axis(diff.x, rect.left, rect.right(), rect.width, viewport.width);
    let y = resolve_axis(diff.y, rect.top, rect.bottom(), rect.height, viewport.height);
    Point::new(x, y)
}

fn resolve_axis(offset: f64, start: f64, end: f64, extent: f64, viewport: f64) -> f64 {
    // Fully inside or narrower than the viewport: the image simply centers.
    if (start > 0.0 && end < viewport) || extent < viewport {
        return 0.0;
    }
    if start > 0.0 {
        offset + start
    } else if end < viewport {
        offset - (viewport - end)
    } else {
        offset
    }
}
