#[cfg(test)]
mod tests;
pub mod viewport;

use nalgebra::Vector2;
use serde_derive::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};

pub use viewport::{ViewportError, ViewportState};

/// angular width, in degrees, that the full pixel width of the viewport is scaled against
const SCALE_REFERENCE_DEGREES: f64 = 120.0;

/// a pixel position in the viewport's own frame, origin top left
/// it is defined for every finite input, clipping is left to whoever draws it
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedPoint {
    pub x: i32,
    pub y: i32,
}

/// maps a star's equatorial coordinates (degrees) onto the viewport
/// the sky is first turned into an altitude/azimuth like frame whose zenith is the center of the
/// view, which is then flattened with an azimuthal projection and scaled to pixels
/// the field of view must be > 0, see ViewportState::validated
pub fn project(viewport: &ViewportState, ra: f64, dec: f64) -> ProjectedPoint {
    debug_assert!(
        viewport.field_of_view > 0.0,
        "projection needs a positive field of view"
    );
    let center_ra = viewport.center_ra.to_radians();
    let center_dec = viewport.center_dec.to_radians();
    let fov = viewport.field_of_view.to_radians();
    let rotation = viewport.rotation.to_radians();
    let ra = ra.to_radians();
    let dec = dec.to_radians();

    let hour_angle = center_ra - ra;
    let p1 = hour_angle.sin();
    let p2 = hour_angle.cos() * center_dec.sin() - dec.tan() * center_dec.cos();
    let az = azimuth(p1, p2);

    let cos_angle =
        center_dec.sin() * dec.sin() + center_dec.cos() * dec.cos() * hour_angle.cos();
    let alt = altitude(cos_angle);

    let offset = planar_offset(alt, az, rotation, fov);

    // algebraically this is pixel_width / 120 degrees, kept in two steps so the rounding
    // matches catalogs rendered by earlier versions
    let width = viewport.pixel_width as f64;
    let scale = (width / fov) / (SCALE_REFERENCE_DEGREES / viewport.field_of_view);

    ProjectedPoint {
        x: (width / 2.0 + offset.x * scale) as i32,
        y: (viewport.pixel_height as f64 / 2.0 + offset.y * scale) as i32,
    }
}

/// azimuth from the two atan2 arguments. When both are zero the answer is 0 whatever the sign
/// of either zero, atan2 would otherwise give 0, pi, -0 or -pi
pub fn azimuth(p1: f64, p2: f64) -> f64 {
    if p1 == 0.0 && p2 == 0.0 {
        0.0
    } else {
        p1.atan2(p2)
    }
}

/// altitude from the cosine of the angular distance to the view center
/// rounding can push the cosine just above 1 at the center itself, that is clamped to the zenith
pub fn altitude(cos_angle: f64) -> f64 {
    if cos_angle >= 1.0 {
        FRAC_PI_2
    } else {
        cos_angle.asin()
    }
}

/// azimuthal projection of (altitude, azimuth) onto the plane, in units of the field of view
fn planar_offset(alt: f64, az: f64, rotation: f64, fov: f64) -> Vector2<f64> {
    let normalized_radius = 1.0 - 2.0 * alt / PI;
    let adjusted_azimuth = az - FRAC_PI_2 + rotation;
    Vector2::new(
        normalized_radius * adjusted_azimuth.cos(),
        -(normalized_radius * adjusted_azimuth.sin()),
    ) * PI
        / fov
}

/// brings any angle in radians into [0, 2pi)
pub fn normalize_zero_two_pi(angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let two_pi = 2.0 * PI;
    let mut angle = angle;
    while angle >= two_pi {
        angle -= two_pi;
    }
    while angle < 0.0 {
        angle += two_pi;
    }
    // a tiny negative angle rounds up to exactly 2pi when a turn is added
    if angle >= two_pi {
        angle = 0.0;
    }
    angle
}
