//! Benchmarks for the search engine and the arm roadmap.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use statesearch::arm::{ArmConfig, TotalAngleDelta, Workspace};
use statesearch::geometry::{Point, Rect};
use statesearch::roadmap::{Roadmap, RoadmapConfig};
use statesearch::tiles::{EightPuzzle, TotalManhattanDistance};
use statesearch::{Search, Strategy};

/// A board 6 moves from solved.
fn scrambled() -> EightPuzzle {
    EightPuzzle::new([4, 1, 3, 7, 2, 6, 0, 5, 8]).unwrap_or_else(EightPuzzle::solved)
}

fn workspace() -> Workspace {
    Workspace::new(
        0.4,
        0.4,
        vec![Rect::from_corners(Point::new(0.5, 0.5), Point::new(0.7, 0.7))],
    )
}

fn roadmap_config() -> RoadmapConfig {
    RoadmapConfig {
        samples: 500,
        max_angle_delta: 20.0,
        seed: 42,
        ..RoadmapConfig::default()
    }
}

fn endpoints() -> (ArmConfig, ArmConfig) {
    (
        ArmConfig::from_degrees(10.0, 20.0),
        ArmConfig::from_degrees(80.0, -60.0),
    )
}

/// Benchmark blind breadth-first search on the 8-puzzle.
fn bench_eight_puzzle_bfs(c: &mut Criterion) {
    let goal = EightPuzzle::solved();
    c.bench_function("eight_puzzle_bfs", |b| {
        b.iter(|| {
            let mut search = Search::new(black_box(scrambled()), goal, Strategy::BreadthFirst);
            search.run()
        })
    });
}

/// Benchmark A* with the Manhattan heuristic on the 8-puzzle.
fn bench_eight_puzzle_astar(c: &mut Criterion) {
    let goal = EightPuzzle::solved();
    c.bench_function("eight_puzzle_astar", |b| {
        b.iter(|| {
            let mut search = Search::new(black_box(scrambled()), goal, Strategy::BestFirst)
                .with_heuristic(TotalManhattanDistance::new(&goal));
            search.run()
        })
    });
}

/// Benchmark sampling and connecting a small roadmap.
fn bench_roadmap_build(c: &mut Criterion) {
    let workspace = workspace();
    let (initial, goal) = endpoints();
    let config = roadmap_config();

    let mut group = c.benchmark_group("roadmap");
    group.sample_size(10);
    group.bench_function("build_500", |b| {
        b.iter(|| Roadmap::build(black_box(&workspace), initial, goal, &config))
    });
    group.finish();
}

/// Benchmark A* over a prebuilt roadmap.
fn bench_roadmap_astar(c: &mut Criterion) {
    let workspace = workspace();
    let (initial, goal) = endpoints();
    let Ok(roadmap) = Roadmap::build(&workspace, initial, goal, &roadmap_config()) else {
        return;
    };

    c.bench_function("roadmap_astar", |b| {
        b.iter(|| {
            let mut search = Search::new(
                roadmap.initial_state(),
                roadmap.goal_state(),
                Strategy::BestFirst,
            )
            .with_heuristic(TotalAngleDelta::new(goal));
            search.run()
        })
    });
}

criterion_group!(
    benches,
    bench_eight_puzzle_bfs,
    bench_eight_puzzle_astar,
    bench_roadmap_build,
    bench_roadmap_astar
);
criterion_main!(benches);
