use kurukuru_core::PuzzleAction;
use tracing::debug;

const DIGIT_KEYS: &str = "1234567890";
const SHIFTED_DIGIT_KEYS: &str = "!@#$%^&*()";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct InputModifiers {
    pub shift: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct KeyPress {
    pub key: char,
    pub modifiers: InputModifiers,
}

impl KeyPress {
    pub(crate) fn plain(key: char) -> Self {
        Self {
            key,
            modifiers: InputModifiers::default(),
        }
    }
}

/// Digits pick permutations 0-9 (`1` is the first, `0` the tenth); shift or
/// the shifted symbol inverts. Letters ignore shift.
pub(crate) fn map_key(press: KeyPress) -> Option<PuzzleAction> {
    if let Some(index) = DIGIT_KEYS.find(press.key) {
        return Some(PuzzleAction::Activate {
            index,
            inverted: press.modifiers.shift,
        });
    }
    if let Some(index) = SHIFTED_DIGIT_KEYS.find(press.key) {
        return Some(PuzzleAction::Activate {
            index,
            inverted: true,
        });
    }
    match press.key.to_ascii_lowercase() {
        'r' => Some(PuzzleAction::Randomize),
        's' => Some(PuzzleAction::Solve),
        'n' => Some(PuzzleAction::NextPuzzle),
        'p' => Some(PuzzleAction::PrevPuzzle),
        _ => None,
    }
}

/// Turns a typed key sequence into actions, dropping whitespace and keys
/// with no binding.
pub(crate) fn parse_script(keys: &str) -> Vec<PuzzleAction> {
    keys.chars()
        .filter(|key| !key.is_whitespace())
        .filter_map(|key| {
            let action = map_key(KeyPress::plain(key));
            if action.is_none() {
                debug!(%key, "ignoring unbound key");
            }
            action
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_activate_in_keyboard_order() {
        assert_eq!(
            map_key(KeyPress::plain('1')),
            Some(PuzzleAction::Activate { index: 0, inverted: false })
        );
        assert_eq!(
            map_key(KeyPress::plain('0')),
            Some(PuzzleAction::Activate { index: 9, inverted: false })
        );
    }

    #[test]
    fn shift_inverts() {
        let press = KeyPress {
            key: '3',
            modifiers: InputModifiers { shift: true },
        };
        assert_eq!(
            map_key(press),
            Some(PuzzleAction::Activate { index: 2, inverted: true })
        );
        assert_eq!(
            map_key(KeyPress::plain('@')),
            Some(PuzzleAction::Activate { index: 1, inverted: true })
        );
    }

    #[test]
    fn letters_and_unknown_keys() {
        assert_eq!(map_key(KeyPress::plain('R')), Some(PuzzleAction::Randomize));
        assert_eq!(map_key(KeyPress::plain('s')), Some(PuzzleAction::Solve));
        assert_eq!(map_key(KeyPress::plain('x')), None);
    }

    #[test]
    fn script_skips_whitespace_and_unbound_keys() {
        let actions = parse_script("1 ! x n");
        assert_eq!(
            actions,
            vec![
                PuzzleAction::Activate { index: 0, inverted: false },
                PuzzleAction::Activate { index: 0, inverted: true },
                PuzzleAction::NextPuzzle,
            ]
        );
    }
}
