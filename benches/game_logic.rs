use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_duel::core::{Grid, Match, MatchConfig, MatchSnapshot, MatchMode};
use tetris_duel::term::{FrameBuffer, GameView, Viewport};
use tetris_duel::types::{Color, GameAction, PlayerSlot, GRID_COLS};

fn bench_tick(c: &mut Criterion) {
    let mut game = Match::versus(MatchConfig::versus().with_seed(12345));
    game.start();
    let mut now = 0u64;

    c.bench_function("match_tick_16ms", |b| {
        b.iter(|| {
            now += 16;
            game.tick(black_box(now));
            if game.is_over() {
                game.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for row in 16..20 {
                for col in 0..GRID_COLS as i32 {
                    grid.set(col, row, Some(Color::CYAN));
                }
            }
            black_box(grid.clear_lines());
        })
    });
}

fn bench_actions(c: &mut Criterion) {
    let mut game = Match::solo(MatchConfig::solo().with_seed(12345));
    game.start();

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            game.apply_action(PlayerSlot::One, GameAction::MoveLeft);
            game.apply_action(PlayerSlot::One, GameAction::Rotate);
            game.apply_action(PlayerSlot::One, GameAction::MoveRight);
        })
    });
}

fn bench_drop_to_lock(c: &mut Criterion) {
    let mut game = Match::versus(MatchConfig::versus().with_seed(12345));
    game.start();

    c.bench_function("drop_until_lock", |b| {
        b.iter(|| {
            while game.apply_action(PlayerSlot::One, GameAction::Drop) {
                if !game.take_events().is_empty() {
                    break;
                }
            }
            if game.is_over() {
                game.restart();
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = Match::versus(MatchConfig::versus().with_seed(12345));
    game.start();
    let view = GameView::default();
    let mut snap = MatchSnapshot::new(MatchMode::Versus);
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_versus_80x24", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
            black_box(fb.cells().len());
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_actions,
    bench_drop_to_lock,
    bench_render
);
criterion_main!(benches);
