use criterion::{black_box, criterion_group, BatchSize, Criterion};
use falling_sand::physics::fallingsand::simulation::Simulation;
use falling_sand::physics::fallingsand::util::vectors::CellVector;

/// An 800x600 window of 10 pixel cells
fn get_simulation() -> Simulation {
    Simulation::new(800, 600, 10).unwrap()
}

/// Fill the top half of the grid so every particle is falling
fn half_filled() -> Simulation {
    let mut simulation = get_simulation();
    for row in 0..30 {
        for col in 0..80 {
            simulation.add_particle(CellVector::new(col, row)).unwrap();
        }
    }
    simulation
}

/// Let the half filled grid come to rest so every particle is settled
fn settled_pile() -> Simulation {
    let mut simulation = half_filled();
    while simulation.update() > 0 {}
    simulation
}

fn bench_update_falling(c: &mut Criterion) {
    c.bench_function("update_falling", |b| {
        b.iter_batched(
            half_filled,
            |mut simulation| black_box(simulation.update()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_update_settled(c: &mut Criterion) {
    let mut simulation = settled_pile();
    c.bench_function("update_settled", |b| {
        b.iter(|| black_box(simulation.update()))
    });
}

fn bench_render_snapshot(c: &mut Criterion) {
    let simulation = settled_pile();
    c.bench_function("render_snapshot", |b| {
        b.iter(|| black_box(simulation.render_snapshot()))
    });
}

criterion_group!(
    benches,
    bench_update_falling,
    bench_update_settled,
    bench_render_snapshot
);
