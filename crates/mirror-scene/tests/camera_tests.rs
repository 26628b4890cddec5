use mirror_base::Vec3;
use mirror_scene::OrbitCamera;
use std::f32::consts::PI;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_initial_position() {
    let camera = OrbitCamera::new(640, 480);
    let p = camera.position();
    assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, 5.0));
}

#[test]
fn test_origin_projects_to_centre() {
    let camera = OrbitCamera::new(640, 480);
    let p = camera.project(Vec3::zero()).unwrap();
    assert!(approx(p.x, 320.0));
    assert!(approx(p.y, 240.0));
    assert!(approx(p.depth, 5.0));
}

#[test]
fn test_projection_orientation() {
    let camera = OrbitCamera::new(640, 480);
    let right = camera.project(Vec3::new(1.0, 0.0, 0.0)).unwrap();
    let up = camera.project(Vec3::new(0.0, 1.0, 0.0)).unwrap();
    assert!(right.x > 320.0);
    assert!(up.y < 240.0);
    // fov 60 at distance 5: one unit is 240 / (5 * tan 30°) pixels
    let expected = 240.0 / (5.0 * (PI / 6.0).tan());
    assert!(approx(up.scale, expected));
    assert!(approx(240.0 - up.y, expected));
}

#[test]
fn test_behind_camera_not_projected() {
    let camera = OrbitCamera::new(640, 480);
    assert!(camera.project(Vec3::new(0.0, 0.0, 10.0)).is_none());
    assert!(camera.project(Vec3::new(0.0, 0.0, 4.95)).is_none());
}

#[test]
fn test_rotate_is_damped_and_clamped() {
    let mut camera = OrbitCamera::new(640, 480);
    camera.rotate(1.0, 0.0);
    camera.update();
    assert!(approx(camera.azimuth(), 0.05));

    // remaining delta keeps easing in
    camera.update();
    assert!(approx(camera.azimuth(), 0.05 + 0.95 * 0.05));

    for _ in 0..1000 {
        camera.rotate(1.0, -1.0);
        camera.update();
    }
    assert!(approx(camera.azimuth(), PI / 6.0));
    assert!(approx(camera.polar(), PI / 2.0 - PI / 6.0));
}

#[test]
fn test_dolly_is_clamped() {
    let mut camera = OrbitCamera::new(640, 480);
    camera.dolly(1.1);
    camera.update();
    assert!(approx(camera.distance(), 5.5));
    camera.dolly(10.0);
    camera.update();
    assert_eq!(camera.distance(), 6.0);
    camera.dolly(0.01);
    camera.update();
    assert_eq!(camera.distance(), 4.0);
    camera.dolly(-1.0);
    camera.update();
    assert_eq!(camera.distance(), 4.0);
}

#[test]
fn test_resize_changes_aspect() {
    let mut camera = OrbitCamera::new(640, 480);
    camera.resize(480, 480);
    assert_eq!(camera.aspect(), 1.0);
    let p = camera.project(Vec3::zero()).unwrap();
    assert!(approx(p.x, 240.0));
    camera.resize(0, 0);
    assert_eq!(camera.viewport(), (1, 1));
}
