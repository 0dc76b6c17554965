use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gyre_agents::physics_agent::PhysicsAgent;
use gyre_core::math::{Pose, Vec3};
use gyre_core::physics::{BodyType, CollisionShape, Inertial, JointKind, PhysicsConfig};
use gyre_data::{Collision, JointSpec, Link, Model, World};

fn drop_world(bodies: usize) -> World {
    let mut world = World::new("bench", PhysicsConfig::default());

    let mut ground = Model::new("ground", Pose::IDENTITY);
    let mut plane = Link::new("link", BodyType::Static, Inertial::default());
    plane
        .add_collision(Collision::new(
            "plane",
            Pose::IDENTITY,
            CollisionShape::Plane {
                normal: Vec3::Z,
                offset: 0.0,
            },
        ))
        .unwrap();
    ground.add_link(plane, Pose::IDENTITY).unwrap();
    world.add_model(ground).unwrap();

    for i in 0..bodies {
        let position = Vec3::new(i as f64 * 2.0, 0.0, 5.0);
        let mut model = Model::new(format!("box_{i}"), Pose::from_position(position));
        let mut link = Link::new("link", BodyType::Dynamic, Inertial::point_mass(1.0));
        link.add_collision(Collision::new(
            "collision",
            Pose::IDENTITY,
            CollisionShape::Box {
                half_extents: Vec3::new(0.5, 0.5, 0.5),
            },
        ))
        .unwrap();
        model.add_link(link, Pose::IDENTITY).unwrap();
        world.add_model(model).unwrap();
    }
    world
}

fn chain_world(links: usize) -> World {
    let mut world = World::new("bench", PhysicsConfig::default());
    let mut model = Model::new("chain", Pose::from_position(Vec3::new(0.0, 0.0, 20.0)));
    let mut parent: Option<String> = None;
    for i in 0..links {
        let name = format!("link_{i}");
        model
            .add_link(
                Link::new(name.as_str(), BodyType::Dynamic, Inertial::point_mass(1.0)),
                Pose::from_position(Vec3::new(i as f64 + 1.0, 0.0, 0.0)),
            )
            .unwrap();
        model
            .connect(JointSpec {
                name: &format!("joint_{i}"),
                kind: JointKind::Revolute,
                parent: parent.as_deref(),
                child: &name,
                anchor: Vec3::new(-1.0, 0.0, 0.0),
                axis: Vec3::Y,
                limits: None,
            })
            .unwrap();
        parent = Some(name);
    }
    world.add_model(model).unwrap();
    world
}

fn bench_stepping(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stepping");

    group.bench_function("100 falling boxes x 100 steps", |b| {
        let mut agent = PhysicsAgent::new();
        b.iter_batched(
            || drop_world(100),
            |mut world| {
                agent.step_world(&mut world, 100).unwrap();
                black_box(world.sim_time());
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("10-link chain x 100 steps", |b| {
        let mut agent = PhysicsAgent::new();
        b.iter_batched(
            || chain_world(10),
            |mut world| {
                agent.step_world(&mut world, 100).unwrap();
                black_box(world.sim_time());
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_stepping);
criterion_main!(benches);
