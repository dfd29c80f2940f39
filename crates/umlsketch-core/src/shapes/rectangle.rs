//! Class box geometry.

use kurbo::{BezPath, Rect, Shape as KurboShape, Size};

/// Size of a freshly created class box.
pub(super) const DESIGN_SIZE: Size = Size::new(120.0, 80.0);

/// Closed box filling the design size.
pub(super) fn outline() -> BezPath {
    Rect::from_origin_size((0.0, 0.0), DESIGN_SIZE).to_path(0.1)
}
