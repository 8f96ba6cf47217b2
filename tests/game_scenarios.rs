//! Game controller scenarios on a 10 x 20 grid.

use blockfall::core::{Game, GameConfig, GameEvent, Grid, RotationRule, StepOutcome};
use blockfall::types::{Cell, ColorId, Command, Phase, ShapeId};

fn config(script: &[ShapeId]) -> GameConfig {
    GameConfig {
        script: script.to_vec(),
        ..GameConfig::default()
    }
}

fn fill(grid: &mut Grid, row: i16, cols: impl IntoIterator<Item = i16>) {
    for col in cols {
        grid.set(Cell::new(col, row), Some(ColorId(9)));
    }
}

#[test]
fn row_five_completed_by_second_lock_is_cleared() {
    let mut grid = Grid::new(10, 20);
    // Floor rows 0..=4 hold everything up, column 0 left open so they never clear.
    for row in 0..5 {
        fill(&mut grid, row, 1..10);
    }
    fill(&mut grid, 5, 0..5);
    // Markers above row 5.
    fill(&mut grid, 7, [0]);
    fill(&mut grid, 8, [1]);

    let mut game = Game::with_grid(config(&[ShapeId::I, ShapeId::Dot]), grid).unwrap();
    game.start();

    // I: columns 3..=6 -> 5..=8, then drop onto row 4.
    assert!(game.apply(Command::MoveRight));
    assert!(game.apply(Command::MoveRight));
    assert!(game.apply(Command::HardDrop));
    assert_eq!(game.lines(), 0);
    assert!(!game.grid().is_row_full(5));
    assert_eq!(game.grid().is_occupied(Cell::new(9, 5)), Ok(false));

    // Dot: column 5 -> 9, drops onto (9, 4).
    for _ in 0..4 {
        assert!(game.apply(Command::MoveRight));
    }
    assert!(game.apply(Command::HardDrop));

    assert_eq!(game.lines(), 1);
    let events = game.take_events();
    assert!(events.contains(&GameEvent::LinesCleared { rows: vec![5] }));

    let grid = game.grid();
    // Rows below are untouched.
    for row in 0..5 {
        assert_eq!(grid.is_occupied(Cell::new(0, row)), Ok(false));
        assert!((1..10).all(|c| grid.is_occupied(Cell::new(c, row)) == Ok(true)));
    }
    // Row 5 lost its blocks and the markers moved down one.
    assert_eq!(grid.is_occupied(Cell::new(0, 6)), Ok(true));
    assert_eq!(grid.is_occupied(Cell::new(1, 7)), Ok(true));
    assert_eq!(grid.is_occupied(Cell::new(0, 7)), Ok(false));
    assert_eq!(grid.is_occupied(Cell::new(1, 8)), Ok(false));
    assert!((1..10).all(|c| grid.is_occupied(Cell::new(c, 5)) == Ok(false)));
}

#[test]
fn two_adjacent_rows_cleared_by_one_lock() {
    let mut grid = Grid::new(10, 20);
    for row in 0..2 {
        fill(&mut grid, row, (0..4).chain(6..10));
    }
    fill(&mut grid, 2, [0]);

    let mut game = Game::with_grid(config(&[ShapeId::O]), grid).unwrap();
    game.start();
    assert!(game.apply(Command::HardDrop));

    assert_eq!(game.lines(), 2);
    assert_eq!(game.grid().stack_height(), 1);
    assert_eq!(game.grid().occupied_count(), 1);
    assert_eq!(game.grid().is_occupied(Cell::new(0, 0)), Ok(true));
    // 100 for a double at level 0, 2 per row hard-dropped.
    assert_eq!(game.score(), 100 + 18 * 2);
}

#[test]
fn locked_cells_are_in_grid_and_piece_is_cleared() {
    let mut game = Game::new(config(&[ShapeId::T])).unwrap();
    game.start();
    game.take_events();

    let mut outcome = StepOutcome::Idle;
    while game.phase() == Phase::Falling {
        outcome = game.tick();
    }
    assert_eq!(outcome, StepOutcome::Locked { lines_cleared: 0 });
    assert!(game.active().is_none());

    let locked = game
        .take_events()
        .into_iter()
        .find_map(|e| match e {
            GameEvent::Locked { cells, .. } => Some(cells),
            _ => None,
        })
        .unwrap();
    for cell in locked {
        assert_eq!(game.grid().is_occupied(cell), Ok(true));
    }
}

#[test]
fn blocked_spawn_ends_game_without_touching_grid() {
    let mut grid = Grid::new(10, 20);
    fill(&mut grid, 18, [4]);
    let before = grid.clone();

    let mut game = Game::with_grid(config(&[ShapeId::T]), grid).unwrap();
    assert_eq!(game.tick(), StepOutcome::GameOver);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(
        game.take_events(),
        vec![GameEvent::GameOver { score: 0, lines: 0 }]
    );

    for _ in 0..5 {
        game.tick();
        game.advance(5_000);
        game.apply(Command::HardDrop);
    }
    assert_eq!(game.grid(), &before);
    assert!(game.take_events().is_empty());
}

#[test]
fn move_left_at_wall_leaves_piece_unchanged() {
    let mut game = Game::new(config(&[ShapeId::L])).unwrap();
    game.start();
    while game.apply(Command::MoveLeft) {}

    let piece = game.active().unwrap();
    let leftmost = piece.occupied_cells().iter().map(|c| c.col).min();
    assert_eq!(leftmost, Some(0));

    assert!(!game.apply(Command::MoveLeft));
    assert_eq!(game.active(), Some(piece));
    assert_eq!(game.phase(), Phase::Falling);
}

#[test]
fn rotation_into_stack_is_rejected_without_kicks() {
    let mut grid = Grid::new(10, 20);
    // Block the column the vertical I would need once it is three rows down.
    fill(&mut grid, 15, [5]);
    let mut game = Game::with_grid(config(&[ShapeId::I]), grid.clone()).unwrap();
    game.start();
    for _ in 0..3 {
        assert_eq!(game.tick(), StepOutcome::Moved);
    }
    let before = game.active();
    assert!(!game.apply(Command::RotateCw));
    assert_eq!(game.active(), before);

    let kicked = GameConfig {
        rotation: RotationRule::Kicks,
        ..config(&[ShapeId::I])
    };
    let mut game = Game::with_grid(kicked, grid).unwrap();
    game.start();
    for _ in 0..3 {
        game.tick();
    }
    assert!(game.apply(Command::RotateCw));
    assert_ne!(game.active().unwrap().anchor.col, 5);
}

#[test]
fn reset_mid_game_starts_a_new_episode() {
    let mut game = Game::new(config(&[ShapeId::O, ShapeId::T])).unwrap();
    game.start();
    game.apply(Command::HardDrop);
    game.apply(Command::HardDrop);
    assert!(game.score() > 0);

    assert!(game.apply(Command::Reset));
    assert_eq!(game.score(), 0);
    assert_eq!(game.grid().occupied_count(), 0);
    assert_eq!(game.episode_id(), 1);
    assert_eq!(game.active().map(|p| p.shape), Some(ShapeId::O));
    assert!(matches!(
        game.take_events().as_slice(),
        [
            ..,
            GameEvent::Locked { .. },
            GameEvent::Reset { episode_id: 1 },
            GameEvent::Spawned { shape: ShapeId::O, .. },
        ]
    ));
}

#[test]
fn same_seed_plays_the_same_game() {
    let play = || {
        let mut game = Game::new(GameConfig {
            seed: 77,
            ..GameConfig::default()
        })
        .unwrap();
        let mut shapes = Vec::new();
        for i in 0..30 {
            game.apply(if i % 2 == 0 { Command::MoveLeft } else { Command::MoveRight });
            shapes.push(game.active().map(|p| p.shape));
            game.apply(Command::HardDrop);
        }
        (shapes, game.grid().clone(), game.score())
    };
    assert_eq!(play(), play());
}

#[test]
fn advance_speeds_up_with_level() {
    let mut game = Game::new(config(&[ShapeId::I])).unwrap();
    assert_eq!(game.fall_interval_ms(), 1000);
    // Ten lines of I pieces on a 4-wide board reach level 1.
    let mut game4 = Game::new(GameConfig {
        width: 4,
        height: 8,
        ..config(&[ShapeId::I])
    })
    .unwrap();
    for _ in 0..10 {
        game4.apply(Command::HardDrop);
    }
    assert_eq!(game4.lines(), 10);
    assert_eq!(game4.level(), 1);
    assert_eq!(game4.fall_interval_ms(), 800);

    game.advance(0);
    assert_eq!(game.advance(1000), 1);
}
