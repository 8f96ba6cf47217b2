use blockfall::core::{Game, GameConfig, Grid};
use blockfall::term::{build_scene, BlockKind, SceneLayout, Vec3};
use blockfall::types::{Cell, ColorId, ShapeId};

#[test]
fn scene_positions_follow_cells_upward() {
    let mut grid = Grid::new(10, 20);
    grid.set(Cell::new(0, 0), Some(ColorId(1)));
    grid.set(Cell::new(9, 19), Some(ColorId(2)));
    let game = Game::with_grid(GameConfig::default(), grid).unwrap();

    let layout = SceneLayout {
        block_size: 1.0,
        origin: Vec3::new(10.0, 20.0, 30.0),
    };
    let blocks = build_scene(&game.snapshot(), &layout);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].position, Vec3::new(10.0, 20.0, 30.0));
    assert_eq!(blocks[1].position, Vec3::new(19.0, 39.0, 30.0));
    assert!(blocks.iter().all(|b| b.kind == BlockKind::Placed));
}

#[test]
fn scene_is_rebuilt_from_scratch_each_time() {
    let config = GameConfig {
        script: vec![ShapeId::T],
        ..GameConfig::default()
    };
    let mut game = Game::new(config).unwrap();
    game.start();
    let layout = SceneLayout::default();

    let first = build_scene(&game.snapshot(), &layout);
    game.tick();
    let second = build_scene(&game.snapshot(), &layout);

    assert_eq!(first.len(), second.len());
    let active = |blocks: &[blockfall::term::SceneBlock]| {
        blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Active)
            .map(|b| b.cell.row)
            .min()
    };
    assert_eq!(active(&second[..]), active(&first[..]).map(|r| r - 1));
}
