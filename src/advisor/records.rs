use super::precedence::Precedence;

/// Best column seen so far for one kind of move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Record {
    pub column: Option<usize>,
    pub precedence: Precedence,
}

/// Which record a recommendation came from, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    /// Stops an opponent four.
    Block,
    /// Leaves the opponent no four on top of the new piece.
    NoWin,
    /// Anything playable.
    Default,
}

/// Block, no-win and default candidates collected during one scan.
#[derive(Debug, Clone, Default)]
pub struct MoveRecords {
    block: Record,
    no_win: Record,
    default: Record,
}

impl MoveRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: RecordKind) -> Record {
        match kind {
            RecordKind::Block => self.block,
            RecordKind::NoWin => self.no_win,
            RecordKind::Default => self.default,
        }
    }

    /// Overwrite a record unconditionally.
    pub fn set(&mut self, kind: RecordKind, column: usize, precedence: Precedence) {
        let record = match kind {
            RecordKind::Block => &mut self.block,
            RecordKind::NoWin => &mut self.no_win,
            RecordKind::Default => &mut self.default,
        };
        *record = Record {
            column: Some(column),
            precedence,
        };
    }

    /// Replace a record only with a strictly higher precedence.
    pub fn offer(&mut self, kind: RecordKind, column: usize, precedence: Precedence) -> bool {
        if precedence > self.get(kind).precedence {
            self.set(kind, column, precedence);
            true
        } else {
            false
        }
    }

    /// The strongest populated record.
    pub fn best(&self) -> Option<(RecordKind, usize)> {
        [RecordKind::Block, RecordKind::NoWin, RecordKind::Default]
            .into_iter()
            .find_map(|kind| self.get(kind).column.map(|col| (kind, col)))
    }
}
