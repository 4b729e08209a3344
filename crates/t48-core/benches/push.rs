use criterion::{Criterion, black_box, criterion_group, criterion_main};
use t48_core::board::Board;
use t48_core::direction::Direction;
use t48_core::game::Game;

fn bench_push(c: &mut Criterion) {
    // Mixed 2s and 4s with gaps: every direction slides and merges.
    let layout: Vec<u8> = (0..16 * 16)
        .map(|i| if i % 3 == 0 { 0 } else { 1 + (i % 2) as u8 })
        .collect();

    c.bench_function("push_16x16_all_directions", |b| {
        b.iter(|| {
            let mut board =
                Board::from_tiles(16, 16, layout.clone(), 0).unwrap_or_else(|e| panic!("{e}"));
            for dir in Direction::ALL {
                black_box(board.push(dir));
            }
        });
    });

    c.bench_function("random_game_8x8", |b| {
        b.iter(|| {
            let mut game = Game::with_seed(8, 8, 1).unwrap_or_else(|e| panic!("{e}"));
            let mut step = 0usize;
            while !game.over() && step < 2_000 {
                game.swipe(Direction::ALL[step % 4]);
                step += 1;
            }
            black_box(game.current_score())
        });
    });
}

criterion_group!(benches, bench_push);
criterion_main!(benches);
