use super::*;
extern crate rand;
use approx::assert_relative_eq;
use rand::Rng;

fn cygnus_view() -> ViewportState {
    ViewportState {
        center_ra: 300.0,
        center_dec: 40.0,
        field_of_view: 60.0,
        rotation: 0.0,
        limiting_magnitude: 6.5,
        pixel_width: 640,
        pixel_height: 480,
    }
}

fn generate_random_viewport(rng: &mut impl Rng) -> ViewportState {
    ViewportState {
        center_ra: rng.gen_range(0.0..360.0),
        center_dec: rng.gen_range(-89.0..89.0),
        field_of_view: rng.gen_range(1.0..180.0),
        rotation: rng.gen_range(-180.0..180.0),
        limiting_magnitude: rng.gen_range(0.0..12.0),
        pixel_width: rng.gen_range(100..2000),
        pixel_height: rng.gen_range(100..2000),
    }
}

#[test]
fn test_center_star_lands_in_middle() {
    let point = project(&cygnus_view(), 300.0, 40.0);
    assert_eq!(point, ProjectedPoint { x: 320, y: 240 });
}

#[test]
fn test_equator_center() {
    let view = ViewportState {
        center_ra: 0.0,
        center_dec: 0.0,
        ..cygnus_view()
    };
    assert_eq!(project(&view, 0.0, 0.0), ProjectedPoint { x: 320, y: 240 });
}

#[test]
fn test_north_is_up() {
    // 10 degrees north of the center, straight above it
    let point = project(&cygnus_view(), 300.0, 50.0);
    assert_eq!(point.x, 320);
    assert_eq!(point.y, 138);
}

#[test]
fn test_east_is_left() {
    let east = project(&cygnus_view(), 310.0, 40.0);
    let west = project(&cygnus_view(), 290.0, 40.0);
    assert_eq!(east, ProjectedPoint { x: 242, y: 235 });
    assert_eq!(west, ProjectedPoint { x: 397, y: 235 });
}

#[test]
fn test_rotation_turns_field() {
    let view = ViewportState {
        rotation: 90.0,
        ..cygnus_view()
    };
    // north of the center swings round to the left
    let point = project(&view, 300.0, 50.0);
    assert_eq!(point.x, 218);
    assert!((point.y - 240).abs() <= 1, "y was {}", point.y);
}

#[test]
fn test_celestial_pole_center() {
    let view = ViewportState {
        center_ra: 0.0,
        center_dec: 90.0,
        ..cygnus_view()
    };
    assert_eq!(project(&view, 0.0, 80.0), ProjectedPoint { x: 320, y: 341 });
    let quarter_turn = project(&view, 90.0, 80.0);
    assert_eq!(quarter_turn.x, 218);
    assert!((quarter_turn.y - 240).abs() <= 1, "y was {}", quarter_turn.y);
}

#[test]
fn test_narrow_field_zooms_in() {
    let wide = project(&cygnus_view(), 300.0, 45.0);
    let narrow = project(
        &ViewportState {
            field_of_view: 30.0,
            ..cygnus_view()
        },
        300.0,
        45.0,
    );
    assert!(240 - narrow.y > 240 - wide.y);
}

#[test]
fn test_projection_is_deterministic() {
    let mut rng = rand::thread_rng();
    for _ in 0..500 {
        let view = generate_random_viewport(&mut rng);
        let ra = rng.gen_range(0.0..360.0);
        let dec = rng.gen_range(-89.9..89.9);
        assert_eq!(project(&view, ra, dec), project(&view, ra, dec));
    }
}

#[test]
fn test_azimuth_of_signed_zeros() {
    for (p1, p2) in [(0.0, 0.0), (0.0, -0.0), (-0.0, 0.0), (-0.0, -0.0)] {
        let az = azimuth(p1, p2);
        assert_eq!(az, 0.0);
        assert!(az.is_sign_positive());
    }
}

#[test]
fn test_azimuth_quadrants() {
    assert_relative_eq!(azimuth(1.0, 0.0), FRAC_PI_2);
    assert_relative_eq!(azimuth(0.0, -1.0), PI);
    assert_relative_eq!(azimuth(-1.0, 0.0), -FRAC_PI_2);
    assert_relative_eq!(azimuth(1.0, 1.0), PI / 4.0);
}

#[test]
fn test_altitude_clamps_at_zenith() {
    assert_eq!(altitude(1.0), FRAC_PI_2);
    assert_eq!(altitude(1.0 + f64::EPSILON), FRAC_PI_2);
    assert_eq!(altitude(1.5), FRAC_PI_2);
    assert!(!altitude(1.0 + 1e-12).is_nan());
}

#[test]
fn test_altitude_below_zenith() {
    assert_relative_eq!(altitude(0.0), 0.0);
    assert_relative_eq!(altitude(0.5), PI / 6.0);
    assert_relative_eq!(altitude(-1.0), -FRAC_PI_2);
    assert!(altitude(1.0 - f64::EPSILON) < FRAC_PI_2);
}

#[test]
fn test_normalize_zero_two_pi() {
    assert_relative_eq!(normalize_zero_two_pi(0.0), 0.0);
    assert_relative_eq!(normalize_zero_two_pi(-FRAC_PI_2), 1.5 * PI);
    assert_relative_eq!(normalize_zero_two_pi(5.0 * PI), PI, epsilon = 1e-12);
    assert_relative_eq!(normalize_zero_two_pi(-7.0 * PI), PI, epsilon = 1e-12);
    assert_eq!(normalize_zero_two_pi(2.0 * PI), 0.0);
    assert_eq!(normalize_zero_two_pi(-1e-20), 0.0);
    assert!(normalize_zero_two_pi(f64::NAN).is_nan());
}

#[test]
fn test_normalize_random_angles_in_range() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let angle = normalize_zero_two_pi(rng.gen_range(-100.0..100.0));
        assert!((0.0..2.0 * PI).contains(&angle), "{} out of range", angle);
    }
}

#[test]
fn test_viewport_rejects_bad_field_of_view() {
    for fov in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let view = ViewportState {
            field_of_view: fov,
            ..cygnus_view()
        };
        assert!(matches!(
            view.validated(),
            Err(ViewportError::InvalidFieldOfView(_))
        ));
    }
    assert_eq!(cygnus_view().validated().unwrap(), cygnus_view());
}

#[test]
fn test_default_viewport() {
    assert_eq!(ViewportState::default(), cygnus_view());
}

#[test]
fn test_viewport_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.json");
    std::fs::write(&path, r#"{"center_ra": 83.8, "center_dec": -5.4, "field_of_view": 20.0}"#)
        .unwrap();

    let view = ViewportState::from_json_file(&path).unwrap();
    assert_relative_eq!(view.center_ra, 83.8);
    assert_relative_eq!(view.center_dec, -5.4);
    assert_relative_eq!(view.field_of_view, 20.0);
    // unspecified fields fall back to the defaults
    assert_relative_eq!(view.limiting_magnitude, 6.5);
    assert_eq!(view.pixel_width, 640);
}

#[test]
fn test_viewport_from_bad_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.json");

    assert!(matches!(
        ViewportState::from_json_file(&path),
        Err(ViewportError::Config { .. })
    ));

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        ViewportState::from_json_file(&path),
        Err(ViewportError::Config { .. })
    ));

    std::fs::write(&path, r#"{"field_of_view": 0.0}"#).unwrap();
    assert!(matches!(
        ViewportState::from_json_file(&path),
        Err(ViewportError::InvalidFieldOfView(_))
    ));
}
