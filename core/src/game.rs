use alloc::string::{String, ToString};

use crate::*;

const MINE_COUNT_PROMPT: &str = "How many mines do you want on the field? ";
const ACTION_PROMPT: &str = "Set/unset mine marks or claim a cell as free: ";
const NUMBER_HERE: &str = "There is a number here!";
const LOSS_MESSAGE: &str = "You stepped on a mine and failed!";
const WIN_MESSAGE: &str = "Congratulations! You found all the mines!";

/// Supplies one line of player input per prompt. `None` means the source is
/// exhausted; it is otherwise re-invoked indefinitely.
pub trait LineSource {
    fn next_line(&mut self) -> Option<String>;
}

/// Consumes rendered boards and status messages.
pub trait MessageSink {
    fn write_line(&mut self, line: &str);
}

/// Controller state. `Won` and `Lost` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// Asks for the mine count until the player supplies a positive integer
/// that leaves at least one safe cell on a `rows` x `cols` grid.
pub fn prompt_mine_count<I, O>(input: &mut I, output: &mut O, (rows, cols): Coord2) -> Result<CellCount>
where
    I: LineSource,
    O: MessageSink,
{
    let total = cell_total(rows, cols);
    loop {
        output.write_line(MINE_COUNT_PROMPT);
        let line = input.next_line().ok_or(GameError::InputClosed)?;
        match line.trim().parse::<CellCount>() {
            Ok(mines) if mines >= total => {
                output.write_line("error: Too many bombs for number of spaces.");
            }
            Ok(0) | Err(_) => output.write_line("error: incorrect input"),
            Ok(mines) => return Ok(mines),
        }
    }
}

/// Runs the turn loop: render, obtain one validated action, dispatch it to
/// the board, re-check for a terminal outcome.
pub struct Game<I, O> {
    board: Board,
    input: I,
    output: O,
    state: GameState,
}

impl<I: LineSource, O: MessageSink> Game<I, O> {
    pub fn new(board: Board, input: I, output: O) -> Self {
        Self {
            board,
            input,
            output,
            state: GameState::Playing,
        }
    }

    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Plays until a terminal outcome, then reveals the minefield, renders
    /// it and reports the result. Confirming a flag on every mine wins the
    /// game between turns, independent of the full-reveal win.
    pub fn run(&mut self) -> Result<GameState> {
        while self.state == GameState::Playing
            && self.board.confirmed_flag_count() < self.board.mine_count()
        {
            self.take_turn()?;
        }

        if self.state == GameState::Playing {
            self.state = GameState::Won;
        }

        self.board.reveal_all_mines();
        self.output.write_line(&self.board.to_string());
        self.output.write_line(match self.state {
            GameState::Lost => LOSS_MESSAGE,
            _ => WIN_MESSAGE,
        });
        Ok(self.state)
    }

    fn take_turn(&mut self) -> Result<()> {
        self.output.write_line(&self.board.to_string());
        let action = self.next_action()?;
        log::debug!("action: {:?}", action);

        match action.verb {
            Verb::Reveal => {
                self.board.reveal(action.coord);
            }
            Verb::ToggleFlag => {
                if self.board.toggle_flag(action.coord) == FlagOutcome::RevealedNumber {
                    self.output.write_line(NUMBER_HERE);
                }
            }
        }

        self.state = match self.board.outcome() {
            Outcome::InProgress => GameState::Playing,
            Outcome::Win => GameState::Won,
            Outcome::Loss => GameState::Lost,
        };
        Ok(())
    }

    /// Request/retry loop: a rejected line prints its message and the turn
    /// is re-requested. Rejection never propagates as an error.
    fn next_action(&mut self) -> Result<Action> {
        loop {
            self.output.write_line(ACTION_PROMPT);
            let line = self.input.next_line().ok_or(GameError::InputClosed)?;
            match parse_action(&line, self.board.size()) {
                Ok(action) => return Ok(action),
                Err(rejection) => self.output.write_line(&rejection.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;

    struct Script(VecDeque<&'static str>);

    impl Script {
        fn new(lines: &[&'static str]) -> Self {
            Self(lines.iter().copied().collect())
        }
    }

    impl LineSource for Script {
        fn next_line(&mut self) -> Option<String> {
            self.0.pop_front().map(ToString::to_string)
        }
    }

    #[derive(Default)]
    struct Transcript(Vec<String>);

    impl MessageSink for Transcript {
        fn write_line(&mut self, line: &str) {
            self.0.push(line.to_string());
        }
    }

    impl Transcript {
        fn contains(&self, line: &str) -> bool {
            self.0.iter().any(|entry| entry == line)
        }
    }

    fn game(mines: &[Coord2], lines: &[&'static str]) -> Game<Script, Transcript> {
        let board = Board::with_mines((3, 3), mines).unwrap();
        Game::new(board, Script::new(lines), Transcript::default())
    }

    #[test]
    fn malformed_line_reprompts_and_mutates_nothing() {
        let mut game = game(&[(0, 0)], &["5 5"]);
        assert_eq!(game.run().unwrap_err(), GameError::InputClosed);
        assert_eq!(game.board.opened_count(), 0);
        assert!(game.output.contains(
            "Please enter the Y a space then the X a space then free or mine only"
        ));
    }

    #[test]
    fn out_of_field_line_reprompts() {
        let mut game = game(&[(0, 0)], &["4 1 free"]);
        assert_eq!(game.run().unwrap_err(), GameError::InputClosed);
        assert!(game.output.contains("Input coordinates not in field"));
        assert_eq!(game.board.opened_count(), 0);
    }

    #[test]
    fn stepping_on_a_mine_loses() {
        let mut game = game(&[(0, 0), (0, 2)], &["2 1 free", "1 1 free"]);
        assert_eq!(game.run().unwrap(), GameState::Lost);
        assert!(game.output.contains("You stepped on a mine and failed!"));
        assert_eq!(game.board.outcome(), Outcome::Loss);
    }

    #[test]
    fn opening_every_safe_cell_wins() {
        let mut game = game(&[(0, 0), (0, 2)], &["1 3 free", "2 1 free"]);
        // "1 3 free" floods the bottom rows, "2 1 free" opens the last safe
        // cell at (0, 1).
        assert_eq!(game.run().unwrap(), GameState::Won);
        assert!(game.output.contains("Congratulations! You found all the mines!"));
    }

    #[test]
    fn confirming_a_flag_on_every_mine_wins() {
        let mut game = game(&[(0, 0)], &["1 1 mine"]);
        assert_eq!(game.run().unwrap(), GameState::Won);
        assert!(game.output.contains("Congratulations! You found all the mines!"));
        // terminal rendering shows the minefield
        assert!(game.output.0.iter().any(|entry| entry.contains('X')));
    }

    #[test]
    fn withdrawing_a_confirmed_flag_keeps_playing() {
        let mut game = game(
            &[(0, 0), (0, 2)],
            &["1 1 mine", "1 1 mine", "1 3 free", "2 1 free"],
        );
        assert_eq!(game.run().unwrap(), GameState::Won);
        // the win came from opening cells, not from the flag count
        assert_eq!(game.board.opened_count(), 7);
        assert_eq!(game.board.confirmed_flag_count(), 0);
    }

    #[test]
    fn flagging_an_opened_number_reports_and_continues() {
        let mut game = game(&[(0, 0)], &["2 2 free", "2 2 mine", "1 1 free"]);
        assert_eq!(game.run().unwrap(), GameState::Lost);
        assert!(game.output.contains("There is a number here!"));
    }

    #[test]
    fn prompt_mine_count_retries_until_valid() {
        let mut input = Script::new(&["ten", "0", "100", "10"]);
        let mut output = Transcript::default();

        let mines = prompt_mine_count(&mut input, &mut output, (9, 9)).unwrap();
        assert_eq!(mines, 10);
        assert!(output.contains("error: incorrect input"));
        assert!(output.contains("error: Too many bombs for number of spaces."));
        assert_eq!(
            output
                .0
                .iter()
                .filter(|line| *line == "How many mines do you want on the field? ")
                .count(),
            4
        );
    }

    #[test]
    fn prompt_mine_count_surfaces_a_closed_input() {
        let mut input = Script::new(&[]);
        let mut output = Transcript::default();
        assert_eq!(
            prompt_mine_count(&mut input, &mut output, (9, 9)).unwrap_err(),
            GameError::InputClosed
        );
    }
}
