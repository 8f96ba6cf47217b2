use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use blockfall::input::{handle_key_event, is_repeatable, should_quit, InputHandler};
use blockfall::types::Command;

#[test]
fn every_command_except_quit_has_a_key() {
    let keys = [
        (KeyCode::Left, Command::MoveLeft),
        (KeyCode::Right, Command::MoveRight),
        (KeyCode::Up, Command::RotateCw),
        (KeyCode::Down, Command::SoftDrop),
        (KeyCode::Char(' '), Command::HardDrop),
        (KeyCode::Char('R'), Command::Reset),
    ];
    for (code, cmd) in keys {
        assert_eq!(handle_key_event(KeyEvent::from(code)), Some(cmd));
    }
    assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('q'))), None);
    assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn held_vim_keys_repeat_like_arrows() {
    let mut ih = InputHandler::with_config(100, 20).with_key_release_timeout_ms(10_000);
    assert_eq!(ih.handle_key_press(KeyCode::Char('h')), Some(Command::MoveLeft));
    assert!(is_repeatable(Command::MoveLeft));

    let repeats = ih.update(160);
    assert_eq!(repeats.as_slice(), &[Command::MoveLeft; 3]);
}
