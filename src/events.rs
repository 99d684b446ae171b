//! Events emitted by the maze algorithms, in the order they happen.
//!
//! Generation and solving never draw or wait on anything. They hand each step to an
//! `EventSink` and carry on; staging, timing and drawing belong to whoever consumes the events.

use std::fmt;

use crate::cells::{GridCoordinate, WallSide};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum TraceKind {
    /// Step from a cell into an open neighbour.
    Forward,
    /// Retreat over a segment whose branch never reached the exit.
    Backtrack,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeEvent {
    WallRemoved {
        cell: GridCoordinate,
        side: WallSide,
    },
    SegmentTraced {
        from: GridCoordinate,
        to: GridCoordinate,
        kind: TraceKind,
    },
}

impl fmt::Display for MazeEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeEvent::WallRemoved { cell, side } => write!(f, "remove {} wall of {}", side, cell),
            MazeEvent::SegmentTraced { from, to, kind: TraceKind::Forward } => {
                write!(f, "trace {} -> {}", from, to)
            }
            MazeEvent::SegmentTraced { from, to, kind: TraceKind::Backtrack } => {
                write!(f, "backtrack {} -> {}", from, to)
            }
        }
    }
}

pub trait EventSink {
    /// Called once for every wall flag that is cleared.
    fn on_wall_removed(&mut self, cell: GridCoordinate, side: WallSide);

    fn on_segment_traced(&mut self, from: GridCoordinate, to: GridCoordinate, kind: TraceKind);
}

/// Records every event, for playback after the algorithm finishes.
impl EventSink for Vec<MazeEvent> {
    fn on_wall_removed(&mut self, cell: GridCoordinate, side: WallSide) {
        self.push(MazeEvent::WallRemoved { cell, side });
    }

    fn on_segment_traced(&mut self, from: GridCoordinate, to: GridCoordinate, kind: TraceKind) {
        self.push(MazeEvent::SegmentTraced { from, to, kind });
    }
}

impl<'a, S: EventSink + ?Sized> EventSink for &'a mut S {
    fn on_wall_removed(&mut self, cell: GridCoordinate, side: WallSide) {
        (**self).on_wall_removed(cell, side);
    }

    fn on_segment_traced(&mut self, from: GridCoordinate, to: GridCoordinate, kind: TraceKind) {
        (**self).on_segment_traced(from, to, kind);
    }
}

/// Discards everything.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_wall_removed(&mut self, _: GridCoordinate, _: WallSide) {}

    fn on_segment_traced(&mut self, _: GridCoordinate, _: GridCoordinate, _: TraceKind) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record<S: EventSink>(mut sink: S) {
        sink.on_wall_removed(GridCoordinate::new(0, 0), WallSide::Left);
        sink.on_segment_traced(GridCoordinate::new(0, 0),
                               GridCoordinate::new(0, 1),
                               TraceKind::Forward);
    }

    #[test]
    fn vec_sink_keeps_order() {
        let mut events: Vec<MazeEvent> = Vec::new();
        record(&mut events);
        assert_eq!(events,
                   vec![MazeEvent::WallRemoved {
                            cell: GridCoordinate::new(0, 0),
                            side: WallSide::Left,
                        },
                        MazeEvent::SegmentTraced {
                            from: GridCoordinate::new(0, 0),
                            to: GridCoordinate::new(0, 1),
                            kind: TraceKind::Forward,
                        }]);
    }

    #[test]
    fn event_text() {
        let removed = MazeEvent::WallRemoved {
            cell: GridCoordinate::new(2, 3),
            side: WallSide::Bottom,
        };
        assert_eq!(removed.to_string(), "remove bottom wall of (2, 3)");

        let back = MazeEvent::SegmentTraced {
            from: GridCoordinate::new(1, 1),
            to: GridCoordinate::new(1, 0),
            kind: TraceKind::Backtrack,
        };
        assert_eq!(back.to_string(), "backtrack (1, 1) -> (1, 0)");
    }

    #[test]
    fn null_sink_accepts_events() {
        record(NullSink);
    }
}
