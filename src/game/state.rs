use std::collections::VecDeque;

use super::vector::{Heading, Vec3i};

/// The snake body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Vec3i>,
}

impl Snake {
    /// Create a snake with its body trailing straight behind the head
    pub fn new(head: Vec3i, heading: Heading, length: usize) -> Self {
        let back = heading.opposite().delta();
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(head);

        for _ in 1..length {
            let tail = body[body.len() - 1];
            body.push_back(tail + back);
        }

        Self { body }
    }

    /// Build a snake from explicit cells, head first.
    ///
    /// Returns `None` for an empty list, for repeated cells, or when two
    /// consecutive cells are not lattice neighbours.
    pub fn from_cells(cells: impl IntoIterator<Item = Vec3i>) -> Option<Self> {
        let body: VecDeque<Vec3i> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }

        let adjacent = body
            .iter()
            .zip(body.iter().skip(1))
            .all(|(a, b)| a.manhattan_distance(*b) == 1);
        let distinct = body
            .iter()
            .enumerate()
            .all(|(i, cell)| !body.iter().skip(i + 1).any(|other| other == cell));

        (adjacent && distinct).then_some(Self { body })
    }

    pub fn head(&self) -> Vec3i {
        self.body[0]
    }

    pub fn tail(&self) -> Vec3i {
        self.body[self.body.len() - 1]
    }

    /// Occupied cells, head first
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Vec3i> + '_ {
        self.body.iter().copied()
    }

    pub fn occupies(&self, cell: Vec3i) -> bool {
        self.body.contains(&cell)
    }

    /// Push a new head and drop the tail unless growing
    pub(crate) fn advance(&mut self, new_head: Vec3i, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Head left the lattice
    Wall,
    /// Head moved onto a cell the body occupied
    SelfCollision,
    /// Snake fills every cell, so no food can be placed. Counts as a win.
    BoardFilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(EndReason),
}

impl GameStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }

    pub fn is_over(&self) -> bool {
        !self.is_running()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self {
            GameStatus::Running => None,
            GameStatus::GameOver(reason) => Some(*reason),
        }
    }
}
