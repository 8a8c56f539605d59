use std::fmt::Debug;

/// A closed, totally ordered set of wizard steps.
///
/// Implementors list every step once in [`FlowStep::ORDER`]; numbering and
/// neighbour lookup derive from that slice.
pub trait FlowStep: Copy + Eq + Debug + 'static {
    const ORDER: &'static [Self];

    /// Human-readable step title.
    fn label(self) -> &'static str;

    /// One-based position of the step.
    fn number(self) -> u8 {
        Self::ORDER
            .iter()
            .position(|step| *step == self)
            .map(|index| index as u8 + 1)
            .unwrap_or(0)
    }

    fn first() -> Self {
        Self::ORDER[0]
    }

    fn total() -> u8 {
        Self::ORDER.len() as u8
    }

    fn from_number(number: u8) -> Option<Self> {
        let index = usize::from(number).checked_sub(1)?;
        Self::ORDER.get(index).copied()
    }

    fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn previous(self) -> Option<Self> {
        Self::from_number(self.number().saturating_sub(1))
    }

    fn is_last(self) -> bool {
        self.next().is_none()
    }
}

/// Outcome of a forward move: either the new step or the unmet gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance<S, R> {
    Moved(S),
    Blocked(R),
}

impl<S, R> Advance<S, R> {
    pub fn is_moved(&self) -> bool {
        matches!(self, Advance::Moved(_))
    }
}
