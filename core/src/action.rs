/// Discrete requests delivered by input handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleAction {
    Activate { index: usize, inverted: bool },
    Randomize,
    Solve,
    SwitchPuzzle { index: usize },
    NextPuzzle,
    PrevPuzzle,
}
