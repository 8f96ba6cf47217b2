use blockfall::core::{Game, GameConfig, GameSnapshot};
use blockfall::term::{AnchorY, GameView, Viewport};
use blockfall::types::{ColorId, Command, ShapeId};

fn empty_snapshot() -> GameSnapshot {
    Game::new(GameConfig::default()).unwrap().snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = empty_snapshot();
    let view = GameView::default();

    // cell_w=2, cell_h=1: 10*2 by 20*1 play area plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_floor_cell_on_bottom_row_two_chars_wide() {
    let mut snap = empty_snapshot();
    snap.board[0][0] = Some(ColorId(ShapeId::I.index() as u8));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border origin is (1,1); grid row 0 is the last play row.
    let y0 = 1 + 19;
    assert_eq!(fb.get(1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(2, y0).unwrap().ch, '█');
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let config = GameConfig {
        script: vec![ShapeId::O],
        ..GameConfig::default()
    };
    let mut game = Game::new(config).unwrap();
    game.start();
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&game.snapshot(), Viewport::new(22, 22));

    // O at columns 4,5 -> x = 1 + 4*2 .. 1 + 6*2.
    for x in 9..13 {
        assert_eq!(fb.get(x, 1).unwrap().ch, '█', "active top row x={x}");
        assert_eq!(fb.get(x, 2).unwrap().ch, '█', "active bottom row x={x}");
        assert_eq!(fb.get(x, 19).unwrap().ch, '░', "ghost top row x={x}");
        assert_eq!(fb.get(x, 20).unwrap().ch, '░', "ghost bottom row x={x}");
    }

    let no_ghost = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .with_ghost(false)
        .render(&game.snapshot(), Viewport::new(22, 22));
    assert_eq!(no_ghost.get(9, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = empty_snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 21;

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    let all = text.join("\n");
    for needle in ["SCORE", "1234", "LEVEL", "LINES", "21", "NEXT", "SPEED"] {
        assert!(all.contains(needle), "missing {needle}");
    }

    let narrow = GameView::default().render(&snap, Viewport::new(30, 24));
    let all: String = (0..narrow.height()).map(|y| narrow.row_text(y)).collect();
    assert!(!all.contains("SCORE"));
}

#[test]
fn term_view_follows_grid_dimensions() {
    let config = GameConfig {
        width: 6,
        height: 8,
        ..GameConfig::default()
    };
    let mut game = Game::new(config).unwrap();
    game.apply(Command::HardDrop);
    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&game.snapshot(), Viewport::new(14, 10));
    assert_eq!(fb.get(13, 9).unwrap().ch, '┘');
}
