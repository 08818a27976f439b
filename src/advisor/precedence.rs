/// How strongly a candidate placement is worth playing, weakest first so
/// the derived ordering matches severity.
///
/// The `*FallThrough` ranks describe a run that exists but cannot be
/// completed yet because a cell beneath the next slot is still empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Precedence {
    #[default]
    None,
    OneFallThrough,
    TwoBlockFallThrough,
    TwoFallThrough,
    ThreeFallThrough,
    One,
    Two,
    /// Denies the opponent a live three.
    TwoBlock,
    Three,
    /// Completes four: an immediate win, or when scanned as the opponent,
    /// a loss that must be blocked.
    Four,
}

impl Precedence {
    /// Map a run length to a rank. `space_available` says whether the run
    /// can be extended to four right now without stacking pieces first.
    pub fn classify(count: usize, space_available: bool) -> Precedence {
        match (count, space_available) {
            (0, _) => Precedence::None,
            (1, true) => Precedence::One,
            (1, false) => Precedence::OneFallThrough,
            (2, true) => Precedence::Two,
            (2, false) => Precedence::TwoFallThrough,
            (3, true) => Precedence::Three,
            (3, false) => Precedence::ThreeFallThrough,
            _ => Precedence::Four,
        }
    }
}
