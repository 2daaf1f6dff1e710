//! Sensor behavior tests against a populated scene
//!
//! These run the full path: sensor configuration -> scaled parameters ->
//! scene query -> cached results.

use approx::assert_relative_eq;

use crate::foundation::math::{Quat, Transform, Vec3};
use crate::scene::{Collider, ColliderKey, SceneConfig, SensorLayers, SensorScene, TriggerInteraction};

use super::sensor::{PhysicsSensor, SensorSettings};
use super::{BoxCastSensor, BoxOverlapSensor, SphereCastSensor, SphereOverlapSensor};

const EPSILON: f32 = 1e-3;

fn ball_at(scene: &mut SensorScene, position: Vec3, radius: f32) -> ColliderKey {
    scene.add_collider(Collider::ball(radius).at(position))
}

fn settings(max_results: usize) -> SensorSettings {
    SensorSettings {
        max_results,
        ..Default::default()
    }
}

#[test]
fn test_sphere_cast_hits_ball_ahead() {
    let mut scene = SensorScene::new();
    let target = ball_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0.5);

    let mut sensor = SphereCastSensor::new(0.5);
    let count = sensor.update_sensor(&scene, &Transform::identity());

    assert_eq!(count, 1);
    assert!(sensor.has_hit());

    let hit = sensor.ray_hit().copied().unwrap();
    assert_eq!(hit.collider, target);
    // Surfaces meet once the gap of 5 shrinks by both radii.
    assert_relative_eq!(hit.distance, 4.0, epsilon = EPSILON);
    assert_eq!(sensor.hit_collider(), Some(target));
}

#[test]
fn test_ray_cast_reports_triangle_index() {
    let mut scene = SensorScene::new();
    let vertices = vec![
        nalgebra::Point3::new(-1.0, -1.0, 0.0),
        nalgebra::Point3::new(1.0, -1.0, 0.0),
        nalgebra::Point3::new(0.0, 1.0, 0.0),
    ];
    let mesh = Collider::trimesh(vertices, vec![[0, 1, 2]])
        .unwrap()
        .at(Vec3::new(0.0, 0.0, 3.0));
    let key = scene.add_collider(mesh);

    // Radius zero degenerates to a plain ray.
    let mut sensor = SphereCastSensor::new(0.0);
    let count = sensor.update_sensor(&scene, &Transform::identity());

    assert_eq!(count, 1);
    let hit = sensor.ray_hit().copied().unwrap();
    assert_eq!(hit.collider, key);
    assert_eq!(hit.triangle_index, Some(0));
    assert_relative_eq!(hit.distance, 3.0, epsilon = EPSILON);
}

#[test]
fn test_shape_cast_leaves_triangle_index_empty() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0.5);

    let mut sensor = SphereCastSensor::new(0.5);
    sensor.update_sensor(&scene, &Transform::identity());

    assert_eq!(sensor.ray_hit().unwrap().triangle_index, None);
}

#[test]
fn test_box_cast_hits_wall() {
    let mut scene = SensorScene::new();
    let wall = scene.add_collider(
        Collider::cuboid(Vec3::new(5.0, 5.0, 0.5)).at(Vec3::new(0.0, 0.0, 10.0)),
    );

    let mut sensor = BoxCastSensor::new(Vec3::new(1.0, 1.0, 1.0));
    let count = sensor.update_sensor(&scene, &Transform::identity());

    assert_eq!(count, 1);
    let hit = sensor.ray_hit().copied().unwrap();
    assert_eq!(hit.collider, wall);
    // Box front face at z=1 travels to the wall front face at z=9.5.
    assert_relative_eq!(hit.distance, 8.5, epsilon = EPSILON);
    assert_relative_eq!(hit.point.z, 9.5, epsilon = 1e-2);
}

#[test]
fn test_max_distance_limits_cast() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0.5);

    let mut sensor = SphereCastSensor::new(0.5).with_max_distance(2.0);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 0);
    assert!(!sensor.has_hit());

    sensor.max_distance = 10.0;
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);
}

#[test]
fn test_cast_distance_scales_with_z() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0.5);

    // Ray sensor so the scale only affects distance, not a radius.
    let mut sensor = SphereCastSensor::new(0.0).with_max_distance(2.0);

    let stretched = Transform::identity().with_scale(Vec3::new(1.0, 1.0, 3.0));
    assert_eq!(sensor.update_sensor(&scene, &stretched), 1);
    assert_relative_eq!(sensor.cast_distance(&stretched), 6.0, epsilon = EPSILON);

    let squashed = Transform::identity().with_scale(Vec3::new(1.0, 1.0, 0.5));
    assert_eq!(sensor.update_sensor(&scene, &squashed), 0);
}

#[test]
fn test_negative_z_scale_flips_direction() {
    let mut scene = SensorScene::new();
    let behind = ball_at(&mut scene, Vec3::new(0.0, 0.0, -5.0), 0.5);

    let mut sensor = SphereCastSensor::new(0.0);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 0);

    let mirrored = Transform::identity().with_scale(Vec3::new(1.0, 1.0, -1.0));
    assert_eq!(sensor.update_sensor(&scene, &mirrored), 1);
    assert_eq!(sensor.hit_collider(), Some(behind));
}

#[test]
fn test_direction_override_redirects_cast() {
    let mut scene = SensorScene::new();
    let side = ball_at(&mut scene, Vec3::new(5.0, 0.0, 0.0), 0.5);

    let mut sensor = SphereCastSensor::new(0.0);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 0);

    // Rotate the cast 90 degrees about Y: local +Z becomes world +X.
    sensor.direction_override =
        Some(Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2));
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);
    assert_eq!(sensor.hit_collider(), Some(side));
}

#[test]
fn test_single_buffer_selects_closest_hit() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0.5);
    let near = ball_at(&mut scene, Vec3::new(0.0, 0.0, 3.0), 0.5);

    let mut sensor = SphereCastSensor::new(0.0);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);

    let hit = sensor.ray_hit().copied().unwrap();
    assert_eq!(hit.collider, near);
    assert_relative_eq!(hit.distance, 2.5, epsilon = EPSILON);
}

#[test]
fn test_batch_buffer_collects_and_truncates() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 3.0), 0.5);
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0.5);
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 7.0), 0.5);

    let mut sensor = SphereCastSensor::with_settings(0.0, settings(8));
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 3);
    assert_eq!(sensor.ray_hits().len(), 3);

    let mut truncated = SphereCastSensor::with_settings(0.0, settings(2));
    assert_eq!(truncated.update_sensor(&scene, &Transform::identity()), 2);
}

#[test]
fn test_closest_ray_hit_scans_batch_results() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 7.0), 0.5);
    let near = ball_at(&mut scene, Vec3::new(0.0, 0.0, 3.0), 0.5);
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0.5);

    let mut sensor = SphereCastSensor::with_settings(0.0, settings(4));
    sensor.update_sensor(&scene, &Transform::identity());

    let closest = sensor.closest_ray_hit().copied().unwrap();
    assert_eq!(closest.collider, near);
    assert_relative_eq!(closest.distance, 2.5, epsilon = EPSILON);
}

#[test]
fn test_closest_ray_hit_empty() {
    let scene = SensorScene::new();
    let mut sensor = SphereCastSensor::new(0.0);
    sensor.update_sensor(&scene, &Transform::identity());

    assert!(sensor.closest_ray_hit().is_none());
}

#[test]
fn test_hit_colliders_refresh_after_update() {
    let mut scene = SensorScene::new();
    let enemy = scene.add_collider(
        Collider::ball(0.5)
            .at(Vec3::new(0.0, 0.0, 3.0))
            .with_layers(SensorLayers::ENEMY),
    );
    let pickup = scene.add_collider(
        Collider::ball(0.5)
            .at(Vec3::new(0.0, 0.0, 5.0))
            .with_layers(SensorLayers::PICKUP),
    );

    let mut sensor = SphereCastSensor::with_settings(0.0, settings(4));
    sensor.update_sensor(&scene, &Transform::identity());
    let mut seen: Vec<ColliderKey> = sensor.hit_colliders().to_vec();
    seen.sort();
    let mut expected = vec![enemy, pickup];
    expected.sort();
    assert_eq!(seen, expected);

    sensor.settings.layer_mask = SensorLayers::ENEMY;
    sensor.update_sensor(&scene, &Transform::identity());
    assert_eq!(sensor.hit_colliders(), &[enemy]);
}

#[test]
fn test_max_results_change_takes_effect_next_update() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 3.0), 0.5);
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 5.0), 0.5);
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 7.0), 0.5);

    let mut sensor = SphereCastSensor::new(0.0);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);

    sensor.settings.max_results = 4;
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 3);
    assert_eq!(sensor.ray_hits().len(), 3);
}

#[test]
fn test_lazy_allocation_defers_buffers() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 3.0), 0.5);

    let lazy = SensorSettings {
        lazy_allocation: true,
        ..Default::default()
    };
    let mut sensor = SphereCastSensor::with_settings(0.0, lazy);
    assert!(sensor.ray_hits().is_empty());

    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);
    assert_eq!(sensor.ray_hits().len(), 1);
}

#[test]
fn test_zero_max_results_detects_nothing() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 0.0, 3.0), 0.5);

    let mut sensor = SphereCastSensor::with_settings(0.0, settings(0));
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 0);
    assert!(!sensor.has_hit());
    assert_eq!(sensor.hit_collider(), None);
}

#[test]
fn test_capsule_cast_widens_reach() {
    let mut scene = SensorScene::new();
    let offside = ball_at(&mut scene, Vec3::new(1.2, 0.0, 4.0), 0.5);

    let mut sphere = SphereCastSensor::new(0.5);
    assert_eq!(sphere.update_sensor(&scene, &Transform::identity()), 0);

    let mut capsule = SphereCastSensor::new(0.5).with_width(1.0);
    assert_eq!(capsule.update_sensor(&scene, &Transform::identity()), 1);
    assert_eq!(capsule.hit_collider(), Some(offside));
}

#[test]
fn test_sphere_overlap_containment() {
    let mut scene = SensorScene::new();
    let target = ball_at(&mut scene, Vec3::zeros(), 0.5);

    let mut sensor = SphereOverlapSensor::new(1.0);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);
    assert_eq!(sensor.hit_collider(), Some(target));

    let away = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));
    assert_eq!(sensor.update_sensor(&scene, &away), 0);
}

#[test]
fn test_capsule_overlap_widens_reach() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(2.0, 0.0, 0.0), 0.4);

    let mut sphere = SphereOverlapSensor::new(0.5);
    assert_eq!(sphere.update_sensor(&scene, &Transform::identity()), 0);

    let mut capsule = SphereOverlapSensor::new(0.5).with_width(2.0);
    assert_eq!(capsule.update_sensor(&scene, &Transform::identity()), 1);
}

#[test]
fn test_box_overlap_detects_neighbor() {
    let mut scene = SensorScene::new();
    let cargo_box = scene.add_collider(
        Collider::cuboid(Vec3::new(0.5, 0.5, 0.5)).at(Vec3::new(2.0, 0.0, 0.0)),
    );

    let mut sensor = BoxOverlapSensor::new(Vec3::new(1.0, 1.0, 1.0));
    let near = Transform::from_position(Vec3::new(1.2, 0.0, 0.0));
    assert_eq!(sensor.update_sensor(&scene, &near), 1);
    assert_eq!(sensor.hit_collider(), Some(cargo_box));

    let far = Transform::from_position(Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(sensor.update_sensor(&scene, &far), 0);
}

#[test]
fn test_overlap_scales_with_transform() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::new(0.0, 3.0, 0.0), 0.5);

    let mut sensor = SphereOverlapSensor::new(1.0);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 0);

    // Largest scale component inflates the sphere radius to 3.
    let grown = Transform::identity().with_scale(Vec3::new(1.0, 3.0, 1.0));
    assert_eq!(sensor.update_sensor(&scene, &grown), 1);
}

#[test]
fn test_trigger_interaction_modes() {
    let mut scene = SensorScene::new();
    scene.add_collider(
        Collider::ball(0.5)
            .at(Vec3::new(0.0, 0.0, 3.0))
            .as_trigger(),
    );

    let mut sensor = SphereCastSensor::new(0.0);
    // Scene default reports triggers.
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);

    scene.config_mut().queries_hit_triggers = false;
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 0);

    sensor.settings.trigger_interaction = TriggerInteraction::Collide;
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);

    sensor.settings.trigger_interaction = TriggerInteraction::Ignore;
    scene.config_mut().queries_hit_triggers = true;
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 0);
}

#[test]
fn test_layer_mask_filters_queries() {
    let mut scene = SensorScene::new();
    let enemy = scene.add_collider(
        Collider::ball(0.5)
            .at(Vec3::new(0.0, 0.0, 3.0))
            .with_layers(SensorLayers::ENEMY),
    );
    scene.add_collider(
        Collider::ball(0.5)
            .at(Vec3::new(0.0, 0.0, 5.0))
            .with_layers(SensorLayers::PICKUP),
    );

    let mut sensor = SphereCastSensor::with_settings(0.0, settings(4));
    sensor.settings.layer_mask = SensorLayers::ENEMY;
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);
    assert_eq!(sensor.hit_collider(), Some(enemy));
}

#[test]
fn test_removed_collider_disappears() {
    let mut scene = SensorScene::with_config(SceneConfig::default());
    let key = ball_at(&mut scene, Vec3::new(0.0, 0.0, 3.0), 0.5);

    let mut sensor = SphereCastSensor::new(0.0);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);

    assert!(scene.remove_collider(key).is_some());
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 0);
}

#[test]
fn test_cast_starting_inside_reports_zero_distance() {
    let mut scene = SensorScene::new();
    ball_at(&mut scene, Vec3::zeros(), 2.0);

    let mut sensor = SphereCastSensor::new(0.5);
    assert_eq!(sensor.update_sensor(&scene, &Transform::identity()), 1);
    assert_relative_eq!(sensor.ray_hit().unwrap().distance, 0.0, epsilon = EPSILON);
}
