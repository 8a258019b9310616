use crate::Cell;
use crate::grid::{neighbour, Heading::{*, self}};

pub struct Snake {
    segments: Vec<Cell>,
    heading: Heading,
    pending_heading: Option<Heading>,
    target_length: usize,
    last_removed: Option<Cell>,
    home: Cell,
}

impl Snake {
    /// A one-cell snake at `home`, heading right. `reset` returns to this state.
    pub fn new(home: Cell) -> Self {
        Snake {
            segments: vec![home],
            heading: Right,
            pending_heading: None,
            target_length: 1,
            last_removed: None,
            home,
        }
    }

    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[cfg(test)]
    pub fn pending_heading(&self) -> Option<Heading> {
        self.pending_heading
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Tail cell vacated by the most recent move, for the renderer to erase.
    pub fn last_removed(&self) -> Option<Cell> {
        self.last_removed
    }

    /// Queues a turn for the next move. Reversals are checked against the
    /// current heading, not the queued one. Returns whether it was accepted.
    pub fn request_heading(&mut self, heading: Heading) -> bool {
        if heading.is_reverse_of(self.heading) {
            return false;
        }

        self.pending_heading = Some(heading);
        true
    }

    pub fn apply_pending_heading(&mut self) {
        if let Some(heading) = self.pending_heading.take() {
            if !heading.is_reverse_of(self.heading) {
                self.heading = heading;
            }
        }
    }

    pub fn advance(&mut self, width: u16, height: u16) {
        let new_head = neighbour(self.head(), self.heading, width, height);
        self.segments.insert(0, new_head);

        self.last_removed = if self.segments.len() > self.target_length {
            self.segments.pop()
        } else {
            None
        };
    }

    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    pub fn bites_itself(&self) -> bool {
        self.segments[1..].contains(&self.head())
    }

    pub fn reset(&mut self) {
        *self = Snake::new(self.home);
    }

    #[cfg(test)]
    pub fn from_segments(segments: Vec<Cell>, heading: Heading, home: Cell) -> Self {
        let target_length = segments.len();
        Snake { segments, heading, pending_heading: None, target_length, last_removed: None, home }
    }
}
