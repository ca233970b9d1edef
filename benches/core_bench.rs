use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use netdiagram3d::core::Axis;
use netdiagram3d::routing::{route_free, route_orthogonal};
use netdiagram3d::{
    BaseRecord, DeviceRecord, EdgeRecord, EntityKey, EntityKind, Layer, Placement, Scene,
};
use std::hint::black_box;

fn bench_routing(c: &mut Criterion) {
    let joints: Vec<Vec3> = (0..64)
        .map(|i| Vec3::new(i as f32 * 0.5, (i % 3) as f32, (i % 5) as f32))
        .collect();
    let p2 = Vec3::new(40.0, 2.0, -3.0);

    c.bench_function("route_free_64_joints", |b| {
        b.iter(|| black_box(route_free(black_box(Vec3::ZERO), p2, &joints)))
    });
    c.bench_function("route_orthogonal_xyz", |b| {
        b.iter(|| {
            black_box(route_orthogonal(
                black_box(Vec3::ZERO),
                p2,
                &[Axis::X, Axis::Y, Axis::Z],
                true,
            ))
        })
    });
}

/// Eine Base mit `device_count` Geräten in einer Reihe, benachbarte Geräte verlinkt.
fn build_rack(device_count: u64) -> Scene {
    let mut scene = Scene::default();
    let base = BaseRecord {
        size: Vec3::new(device_count as f32 * 2.0, 1.0, 4.0),
        ..BaseRecord::default()
    };
    scene.add_base(Layer::Physical, 1, base);
    for i in 0..device_count {
        let record = DeviceRecord {
            name: format!("sw{i}"),
            base: 1,
            placement: Placement::at(Vec3::new(i as f32 * 2.0, 0.0, 0.0)),
            ..DeviceRecord::default()
        };
        scene.add_device(100 + i, record, false);
    }
    for i in 1..device_count {
        let record = EdgeRecord::between(100 + i - 1, 100 + i).orthogonal(&[Axis::X, Axis::Z]);
        scene.add_edge(Layer::Physical, EntityKind::Link, 1000 + i, record);
    }
    scene
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");

    for &device_count in &[16u64, 128u64] {
        let mut scene = build_rack(device_count);
        let base = EntityKey::base(1);
        let mut step = 0.0f32;

        group.bench_with_input(
            BenchmarkId::new("move_base", device_count),
            &device_count,
            |b, _| {
                b.iter(|| {
                    step += 0.5;
                    scene.move_entity(
                        Layer::Physical,
                        base,
                        black_box(Vec3::new(step, 0.0, 0.0)),
                        None,
                        false,
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_picking(c: &mut Criterion) {
    let scene = build_rack(64);
    c.bench_function("pick_viewport_centre", |b| {
        b.iter(|| black_box(scene.pick(black_box(400.0), black_box(300.0)).len()))
    });
}

criterion_group!(benches, bench_routing, bench_cascade, bench_picking);
criterion_main!(benches);
