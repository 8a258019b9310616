use std::{cmp::max, thread::sleep, time::{Duration, Instant}};

use crate::board::{Board, StepOutcome};
use crate::grid::{GRID_HEIGHT, GRID_WIDTH};
use crate::input::{map_key, Input};
use crate::render::{clear_board, draw_frame};
use crate::term::TermManager;

use anyhow::{Context, Result};
use log::info;
use rand::Rng;

const STEPS_PER_SECOND: u64 = 20;
const TICK: Duration = Duration::from_millis(1000 / STEPS_PER_SECOND);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitReason {
    QuitKey,
    Interrupted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Reaction {
    None,
    Paused,
    Resumed,
    Exit(ExitReason),
}

/// Board, score and pause state: everything the loop tracks except the terminal.
struct Play<R: Rng> {
    board: Board<R>,
    score: u64,
    best: u64,
    paused: bool,
}

impl<R: Rng> Play<R> {
    fn new(board: Board<R>) -> Self {
        Play { board, score: 0, best: 0, paused: false }
    }

    /// Turns are dropped while paused.
    fn handle_input(&mut self, input: Input) -> Reaction {
        match input {
            Input::Turn(heading) => {
                if !self.paused {
                    self.board.steer(heading);
                }
                Reaction::None
            }
            Input::Pause => {
                self.paused = !self.paused;
                info!("Paused: {}", self.paused);
                if self.paused { Reaction::Paused } else { Reaction::Resumed }
            }
            Input::Quit => Reaction::Exit(ExitReason::QuitKey),
            Input::Interrupt => Reaction::Exit(ExitReason::Interrupted),
        }
    }

    /// Steps the board unless paused, keeping the score in line with the outcome.
    fn tick(&mut self) -> Option<StepOutcome> {
        if self.paused {
            return None;
        }

        let outcome = self.board.step();
        match outcome {
            StepOutcome::Moved => {},
            StepOutcome::Fed => {
                self.score += 1;
                self.best = max(self.best, self.score);
            },
            StepOutcome::Reset(cause) => {
                info!("Round over ({:?}) with score {}", cause, self.score);
                self.score = 0;
            },
        }

        Some(outcome)
    }
}

pub struct SnakeGame<R: Rng> {
    term: TermManager,
    play: Play<R>,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(rng: R) -> Result<Self> {
        let term = TermManager::new((GRID_WIDTH, GRID_HEIGHT))?;
        let board = Board::new(GRID_WIDTH, GRID_HEIGHT, rng);
        Ok(SnakeGame { term, play: Play::new(board) })
    }

    pub fn best(&self) -> u64 {
        self.play.best
    }

    /// Takes over the terminal until the player quits. The terminal is handed
    /// back on every exit path, errors included.
    pub fn run(&mut self, skip_intro: bool) -> Result<ExitReason> {
        let result = self.term.setup().and_then(|_| self.session(skip_intro));
        let restored = self.term.restore();
        settle(result, restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn session(&mut self, skip_intro: bool) -> Result<ExitReason> {
        self.term.clear()?;
        self.term.draw_borders()?;
        draw_frame(&mut self.term, &self.play.board)?;
        self.print_score()?;

        if !skip_intro {
            if let Some(reason) = self.show_intro()? {
                return Ok(reason);
            }
        }

        self.play()
    }

    fn show_intro(&mut self) -> Result<Option<ExitReason>> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "Q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ])?;

        match map_key(&self.term.read_key_blocking()?) {
            Some(Input::Quit) => return Ok(Some(ExitReason::QuitKey)),
            Some(Input::Interrupt) => return Ok(Some(ExitReason::Interrupted)),
            _ => {}
        }

        self.term.hide_message()?;
        Ok(None)
    }

    fn play(&mut self) -> Result<ExitReason> {
        let mut deadline = Instant::now();

        loop {
            let (wait, next) = schedule(deadline, Instant::now());
            sleep(wait);
            deadline = next;

            for key_ev in self.term.read_key_events_queue()? {
                let input = match map_key(&key_ev) {
                    Some(input) => input,
                    None => continue,
                };

                match self.play.handle_input(input) {
                    Reaction::None => {},
                    Reaction::Paused => {
                        self.term.show_message(&["Paused", "Press Esc to resume", "or Q to quit"])?;
                    },
                    Reaction::Resumed => self.term.hide_message()?,
                    Reaction::Exit(reason) => return Ok(self.finish(reason)),
                }
            }

            match self.play.tick() {
                None | Some(StepOutcome::Moved) => {},
                Some(StepOutcome::Fed) => self.print_score()?,
                Some(StepOutcome::Reset(_)) => {
                    let (width, height) = self.play.board.size();
                    clear_board(&mut self.term, width, height)?;
                    self.print_score()?;
                },
            }

            if !self.play.paused {
                draw_frame(&mut self.term, &self.play.board)?;
            }
        }
    }

    fn finish(&self, reason: ExitReason) -> ExitReason {
        info!("Leaving ({:?}), score {}, best {}", reason, self.play.score, self.play.best);
        reason
    }

    fn print_score(&mut self) -> Result<()> {
        let text = format!(" Score: {}   Best: {}", self.play.score, self.play.best);
        self.term.print_status(&text)
    }
}

/// The session's own error wins over a failed restore.
fn settle(result: Result<ExitReason>, restored: Result<()>) -> Result<ExitReason> {
    let reason = result?;
    restored.context("Error restoring terminal")?;
    Ok(reason)
}

/// How long to sleep before the tick due at `deadline`, and when the one after
/// it is due. An overrun tick starts at once and the schedule restarts from `now`.
fn schedule(deadline: Instant, now: Instant) -> (Duration, Instant) {
    if deadline > now {
        (deadline - now, deadline + TICK)
    } else {
        (Duration::ZERO, now + TICK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ResetCause;
    use crate::grid::Heading;
    use anyhow::anyhow;
    use rand::{rngs::StdRng, SeedableRng};

    fn play() -> Play<StdRng> {
        Play::new(Board::new(GRID_WIDTH, GRID_HEIGHT, StdRng::seed_from_u64(9)))
    }

    fn feed(play: &mut Play<StdRng>) -> Option<StepOutcome> {
        let next = crate::grid::neighbour(
            play.board.snake().head(), play.board.snake().heading(), GRID_WIDTH, GRID_HEIGHT,
        );
        play.board.put_food(next);
        play.tick()
    }

    #[test]
    fn test_tick_length() {
        assert_eq!(TICK, Duration::from_millis(50));
    }

    #[test]
    fn test_feeding_scores_and_raises_best() {
        let mut play = play();

        assert_eq!(feed(&mut play), Some(StepOutcome::Fed));
        assert_eq!((play.score, play.best), (1, 1));

        assert_eq!(feed(&mut play), Some(StepOutcome::Fed));
        assert_eq!((play.score, play.best), (2, 2));
    }

    #[test]
    fn test_self_collision_zeroes_score_keeps_best() {
        let mut play = play();
        for _ in 0..4 {
            feed(&mut play);
        }
        assert_eq!((play.score, play.best), (4, 4));

        // Length 5 heading right: down, left, up runs into the body.
        play.board.put_food((0, 0));
        play.handle_input(Input::Turn(Heading::Down));
        assert_eq!(play.tick(), Some(StepOutcome::Moved));
        play.handle_input(Input::Turn(Heading::Left));
        assert_eq!(play.tick(), Some(StepOutcome::Moved));
        play.handle_input(Input::Turn(Heading::Up));
        assert_eq!(play.tick(), Some(StepOutcome::Reset(ResetCause::SelfCollision)));

        assert_eq!((play.score, play.best), (0, 4));
    }

    #[test]
    fn test_full_board_zeroes_score_keeps_best() {
        let mut play = Play::new(Board::new(2, 1, StdRng::seed_from_u64(5)));

        assert_eq!(play.tick(), Some(StepOutcome::Fed));
        assert_eq!((play.score, play.best), (1, 1));

        assert_eq!(play.tick(), Some(StepOutcome::Reset(ResetCause::BoardFull)));
        assert_eq!((play.score, play.best), (0, 1));
    }

    #[test]
    fn test_turn_ignored_while_paused() {
        let mut play = play();

        assert_eq!(play.handle_input(Input::Pause), Reaction::Paused);
        assert_eq!(play.handle_input(Input::Turn(Heading::Up)), Reaction::None);
        assert_eq!(play.board.snake().pending_heading(), None);

        let head = play.board.snake().head();
        assert_eq!(play.tick(), None);
        assert_eq!(play.board.snake().head(), head);
    }

    #[test]
    fn test_pause_toggles_back_to_running() {
        let mut play = play();
        play.board.put_food((0, 0));

        assert_eq!(play.handle_input(Input::Pause), Reaction::Paused);
        assert_eq!(play.handle_input(Input::Pause), Reaction::Resumed);
        assert!(!play.paused);

        assert_eq!(play.handle_input(Input::Turn(Heading::Up)), Reaction::None);
        assert_eq!(play.board.snake().pending_heading(), Some(Heading::Up));
        assert_eq!(play.tick(), Some(StepOutcome::Moved));
    }

    #[test]
    fn test_quit_inputs_exit() {
        let mut play = play();
        assert_eq!(play.handle_input(Input::Quit), Reaction::Exit(ExitReason::QuitKey));
        assert_eq!(play.handle_input(Input::Interrupt), Reaction::Exit(ExitReason::Interrupted));
    }

    #[test]
    fn test_settle_keeps_first_error() {
        let err = settle(Err(anyhow!("draw failed")), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "draw failed");

        let err = settle(Ok(ExitReason::QuitKey), Err(anyhow!("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "Error restoring terminal");

        assert_eq!(settle(Ok(ExitReason::Interrupted), Ok(())).unwrap(), ExitReason::Interrupted);
    }

    #[test]
    fn test_schedule_waits_for_deadline() {
        let now = Instant::now();
        let deadline = now + Duration::from_millis(20);

        let (wait, next) = schedule(deadline, now);
        assert_eq!(wait, Duration::from_millis(20));
        assert_eq!(next, deadline + TICK);
    }

    #[test]
    fn test_schedule_reanchors_after_overrun() {
        let deadline = Instant::now();
        let now = deadline + Duration::from_millis(120);

        let (wait, next) = schedule(deadline, now);
        assert_eq!(wait, Duration::ZERO);
        assert_eq!(next, now + TICK);
    }
}
