//! Tripwire demo application
//!
//! A headless security rig: a handful of sensors loaded from a RON config
//! watch a small scene while an intruder patrols through it. Detections
//! are logged; on exit the debug-draw queue is dumped so a host renderer
//! could display the final gizmo state.

use rand::Rng;

use sensor_kit::config::{BuiltSensor, NamedSensor, SensorSuiteConfig};
use sensor_kit::foundation::math::{Iso3, Translation3};
use sensor_kit::prelude::*;

const SENSOR_SUITE: &str = include_str!("sensors.ron");
const PATROL_STEPS: usize = 240;

struct Intruder {
    key: ColliderKey,
    angular_speed: f32,
}

impl Intruder {
    fn position(&self, step: usize) -> Vec3 {
        let t = step as f32 * self.angular_speed;
        // Figure-eight through the watched corridor.
        Vec3::new(4.0 * t.cos(), 0.0, 5.0 + 2.0 * (2.0 * t).sin())
    }
}

fn build_scene() -> Result<(SensorScene, Intruder), Box<dyn std::error::Error>> {
    let mut scene = SensorScene::new();

    scene.add_collider(
        Collider::cuboid(Vec3::new(6.0, 2.0, 0.25))
            .at(Vec3::new(0.0, 0.0, 8.0))
            .with_layers(SensorLayers::ENVIRONMENT)
            .named("back_wall"),
    );
    scene.add_collider(
        Collider::cuboid(Vec3::new(0.25, 2.0, 6.0))
            .at(Vec3::new(-6.0, 0.0, 4.0))
            .with_layers(SensorLayers::ENVIRONMENT)
            .named("side_wall"),
    );

    // A ramp made of two triangles, so mesh hits carry triangle indices.
    let ramp = Collider::trimesh(
        vec![
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.5, 2.0),
            Point3::new(-1.0, 1.5, 2.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )?
    .at(Vec3::new(4.0, -1.0, 6.0))
    .with_layers(SensorLayers::ENVIRONMENT)
    .named("ramp");
    scene.add_collider(ramp);

    scene.add_collider(
        Collider::ball(1.5)
            .at(Vec3::new(0.0, 0.0, 6.0))
            .with_layers(SensorLayers::PICKUP)
            .as_trigger()
            .named("alarm_zone"),
    );

    let mut rng = rand::thread_rng();
    let intruder = Intruder {
        key: scene.add_collider(
            Collider::ball(0.4)
                .at(Vec3::new(4.0, 0.0, 5.0))
                .with_layers(SensorLayers::ENEMY)
                .named("intruder"),
        ),
        angular_speed: rng.gen_range(0.04..0.06),
    };

    Ok((scene, intruder))
}

fn hit_summary(scene: &SensorScene, sensor: &mut BuiltSensor) -> String {
    let names: Vec<&str> = sensor
        .hit_colliders()
        .iter()
        .filter_map(|&key| scene.collider(key).map(Collider::display_name))
        .collect();
    names.join(", ")
}

fn run_patrol(
    scene: &mut SensorScene,
    intruder: &Intruder,
    rig: &Transform,
    suite: &mut [NamedSensor],
) {
    let mut was_hit = vec![false; suite.len()];

    for step in 0..PATROL_STEPS {
        let position = intruder.position(step);
        if let Some(collider) = scene.collider_mut(intruder.key) {
            collider.pose = Iso3::from_parts(Translation3::from(position), collider.pose.rotation);
        }

        for (index, named) in suite.iter_mut().enumerate() {
            let count = named.sensor.update_sensor(scene, rig);
            let hit = count > 0;

            if hit != was_hit[index] {
                if hit {
                    log::info!(
                        "[step {step}] {} detected {count}: {}",
                        named.name,
                        hit_summary(scene, &mut named.sensor)
                    );
                } else {
                    log::info!("[step {step}] {} clear", named.name);
                }
                was_hit[index] = hit;
            }

            if let BuiltSensor::SphereCast(cast) = &named.sensor {
                if let Some(closest) = cast.closest_ray_hit() {
                    log::debug!(
                        "[step {step}] {} closest contact at {:.2}",
                        named.name,
                        closest.distance
                    );
                }
            }
        }
    }
}

fn dump_gizmos(scene: &SensorScene, rig: &Transform, suite: &[NamedSensor]) {
    let gizmos = SensorGizmos::new();
    let mut draw = DebugDrawSystem::new();

    for named in suite {
        match &named.sensor {
            BuiltSensor::BoxCast(sensor) => gizmos.draw_box_cast(sensor, scene, rig, &mut draw),
            BuiltSensor::SphereCast(sensor) => {
                gizmos.draw_sphere_cast(sensor, scene, rig, &mut draw);
            }
            BuiltSensor::BoxOverlap(sensor) => {
                gizmos.draw_box_overlap(sensor, scene, rig, &mut draw);
            }
            BuiltSensor::SphereOverlap(sensor) => {
                gizmos.draw_sphere_overlap(sensor, scene, rig, &mut draw);
            }
        }
    }

    log::info!(
        "debug queue holds {} shapes for the host renderer",
        draw.shape_count()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: SensorSuiteConfig = ron::from_str(SENSOR_SUITE)?;
    let mut suite = config.build();
    log::info!("loaded {} sensors", suite.len());

    let (mut scene, intruder) = build_scene()?;
    log::info!("scene holds {} colliders", scene.collider_count());

    // The rig sits at the origin watching down +Z.
    let rig = Transform::identity();

    run_patrol(&mut scene, &intruder, &rig, &mut suite);
    dump_gizmos(&scene, &rig, &suite);

    Ok(())
}
