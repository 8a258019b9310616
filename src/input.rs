use crate::grid::Heading;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Turn(Heading),
    Pause,
    Quit,
    Interrupt,
}

/// Maps a key press to a game input. Releases, repeats and unbound keys yield `None`.
pub fn map_key(ev: &KeyEvent) -> Option<Input> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(Input::Interrupt);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Input::Turn(Heading::Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Input::Turn(Heading::Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Input::Turn(Heading::Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Input::Turn(Heading::Right)),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Input::Quit),
        KeyCode::Esc => Some(Input::Pause),
        _ => None,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_and_wasd() {
        assert_eq!(map_key(&press(KeyCode::Up)), Some(Input::Turn(Heading::Up)));
        assert_eq!(map_key(&press(KeyCode::Down)), Some(Input::Turn(Heading::Down)));
        assert_eq!(map_key(&press(KeyCode::Left)), Some(Input::Turn(Heading::Left)));
        assert_eq!(map_key(&press(KeyCode::Right)), Some(Input::Turn(Heading::Right)));

        assert_eq!(map_key(&press(KeyCode::Char('w'))), Some(Input::Turn(Heading::Up)));
        assert_eq!(map_key(&press(KeyCode::Char('a'))), Some(Input::Turn(Heading::Left)));
        assert_eq!(map_key(&press(KeyCode::Char('s'))), Some(Input::Turn(Heading::Down)));
        assert_eq!(map_key(&press(KeyCode::Char('d'))), Some(Input::Turn(Heading::Right)));

        let shifted = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&shifted), Some(Input::Turn(Heading::Right)));
    }

    #[test]
    fn test_quit_pause_and_interrupt() {
        assert_eq!(map_key(&press(KeyCode::Char('q'))), Some(Input::Quit));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(Input::Pause));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(Input::Interrupt));
        assert!(is_ctrl_c(&ctrl_c));
        assert!(!is_ctrl_c(&press(KeyCode::Char('c'))));
    }

    #[test]
    fn test_ignored_keys() {
        assert_eq!(map_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(&press(KeyCode::Enter)), None);

        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(&release), None);
    }
}
