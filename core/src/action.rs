use alloc::vec::Vec;
use thiserror::Error;

use crate::{Coord, Coord2};

/// What the player wants done with a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verb {
    Reveal,
    ToggleFlag,
}

/// One validated player command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub coord: Coord2,
    pub verb: Verb,
}

/// Why an input line was rejected. The display strings are shown to the
/// player verbatim before re-prompting.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Please enter the Y a space then the X a space then free or mine only")]
    Malformed,
    #[error("Input coordinates not in field")]
    OutOfField,
}

/// Parses one input line into an [`Action`].
///
/// Input is column-major: the player types `x y verb`, 1-based, with `x` as
/// the column and `y` as the row. Storage is row-major, so the mapping to a
/// `(row, col)` coordinate happens here, exactly once; nothing downstream
/// reorders axes. The verb is `free` to reveal or `mine` to toggle a flag,
/// case-insensitive. Both axes must land inside the grid after the 1-based
/// decrement.
pub fn parse_action(line: &str, (rows, cols): Coord2) -> Result<Action, ActionError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let &[x, y, verb] = tokens.as_slice() else {
        return Err(ActionError::Malformed);
    };

    let x: i32 = x.parse().map_err(|_| ActionError::Malformed)?;
    let y: i32 = y.parse().map_err(|_| ActionError::Malformed)?;

    let verb = if verb.eq_ignore_ascii_case("free") {
        Verb::Reveal
    } else if verb.eq_ignore_ascii_case("mine") {
        Verb::ToggleFlag
    } else {
        return Err(ActionError::Malformed);
    };

    let row = y - 1;
    let col = x - 1;
    if !(0..i32::from(rows)).contains(&row) || !(0..i32::from(cols)).contains(&col) {
        return Err(ActionError::OutOfField);
    }

    Ok(Action {
        coord: (row as Coord, col as Coord),
        verb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NINE: Coord2 = (9, 9);

    #[test]
    fn accepts_free_and_mine_case_insensitively() {
        assert_eq!(
            parse_action("3 2 FREE", NINE).unwrap(),
            Action {
                coord: (1, 2),
                verb: Verb::Reveal,
            }
        );
        assert_eq!(
            parse_action("1 1 Mine", NINE).unwrap().verb,
            Verb::ToggleFlag
        );
    }

    #[test]
    fn input_is_column_major() {
        // "x y": the first token picks the column, the second the row.
        let action = parse_action("2 3 free", NINE).unwrap();
        assert_eq!(action.coord, (2, 1));
    }

    #[test]
    fn rejects_a_wrong_token_count() {
        assert_eq!(parse_action("5 5", NINE).unwrap_err(), ActionError::Malformed);
        assert_eq!(
            parse_action("5 5 free now", NINE).unwrap_err(),
            ActionError::Malformed
        );
        assert_eq!(parse_action("", NINE).unwrap_err(), ActionError::Malformed);
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        assert_eq!(
            parse_action("a 5 free", NINE).unwrap_err(),
            ActionError::Malformed
        );
        assert_eq!(
            parse_action("5 5.0 free", NINE).unwrap_err(),
            ActionError::Malformed
        );
    }

    #[test]
    fn rejects_unknown_verbs() {
        assert_eq!(
            parse_action("5 5 open", NINE).unwrap_err(),
            ActionError::Malformed
        );
    }

    #[test]
    fn rejects_out_of_field_coordinates() {
        // zero, negative, and past-the-edge values are all out of field
        assert_eq!(
            parse_action("0 5 free", NINE).unwrap_err(),
            ActionError::OutOfField
        );
        assert_eq!(
            parse_action("-2 5 free", NINE).unwrap_err(),
            ActionError::OutOfField
        );
        assert_eq!(
            parse_action("10 5 free", NINE).unwrap_err(),
            ActionError::OutOfField
        );
        assert_eq!(
            parse_action("5 10 free", NINE).unwrap_err(),
            ActionError::OutOfField
        );

        assert!(parse_action("9 9 free", NINE).is_ok());
        assert!(parse_action("1 1 free", NINE).is_ok());
    }

    #[test]
    fn bounds_follow_each_axis_on_non_square_grids() {
        let tall = (9, 3);
        assert!(parse_action("3 9 free", tall).is_ok());
        assert_eq!(
            parse_action("9 3 free", tall).unwrap_err(),
            ActionError::OutOfField
        );
    }
}
