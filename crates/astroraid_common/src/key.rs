/// Logical keys the game reacts to. The frontend maps platform keycodes to
/// these; anything unmapped never reaches the game.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Left,
    Right,
    Space,
    Return,
}
