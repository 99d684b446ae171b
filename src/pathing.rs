use std::error::Error;
use std::fmt;

use log::{debug, trace};

use crate::cells::GridCoordinate;
use crate::events::{EventSink, TraceKind};
use crate::grid::{CoordinateSmallVec, Grid, VisitPhase};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolveError {
    /// The search ran out of cells without reaching the exit. A maze carved by
    /// `generators::recursive_backtracker` is always solvable, so this points at a broken grid.
    ExitUnreachable { visited: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SolveError::ExitUnreachable { visited } => {
                write!(f, "exit not reachable from the entrance after visiting {} cells", visited)
            }
        }
    }
}

impl Error for SolveError {}

/// Depth first search from the entrance (top left) to the exit (bottom right) over open passages.
///
/// Neighbours are tried in the grid's fixed left, right, up, down order. A neighbour is a
/// candidate if it has not been visited by this search and no wall pair stands between it and
/// the current cell. Stepping into a candidate emits a `Forward` segment. When a branch runs out
/// of candidates without finding the exit, a `Backtrack` segment is emitted from the abandoned
/// cell back to the cell it was entered from, and the search carries on with that cell's
/// remaining candidates. The first path found wins; it is not necessarily the shortest.
///
/// Returns the path from entrance to exit, both included. Walls and generation marks are never
/// touched; each cell entered is marked in the solving phase.
pub fn solve<S: EventSink>(grid: &mut Grid, sink: &mut S) -> Result<Vec<GridCoordinate>, SolveError> {
    let entrance = grid.entrance();
    let exit = grid.exit();
    debug!("solving from {} to {}", entrance, exit);

    let mut stack = vec![SolveFrame::enter(grid, entrance)];
    if entrance == exit {
        return Ok(vec![entrance]);
    }

    while let Some(frame) = stack.last_mut() {
        let current = frame.coord;

        let candidate = loop {
            match frame.next_neighbour() {
                Some(n) if !grid.is_visited(n, VisitPhase::Solving) &&
                           grid.overlapping_walls(current, n).is_none() => break Some(n),
                Some(_) => continue,
                None => break None,
            }
        };

        match candidate {
            Some(next) => {
                trace!("trace {} -> {}", current, next);
                sink.on_segment_traced(current, next, TraceKind::Forward);
                stack.push(SolveFrame::enter(grid, next));

                if next == exit {
                    let path = stack.iter().map(|frame| frame.coord).collect::<Vec<_>>();
                    debug!("solved with a path of {} cells, {} visited",
                           path.len(),
                           grid.visited_count(VisitPhase::Solving));
                    return Ok(path);
                }
            }
            None => {
                stack.pop();
                if let Some(parent) = stack.last() {
                    trace!("backtrack {} -> {}", current, parent.coord);
                    sink.on_segment_traced(current, parent.coord, TraceKind::Backtrack);
                }
            }
        }
    }

    Err(SolveError::ExitUnreachable { visited: grid.visited_count(VisitPhase::Solving) })
}

struct SolveFrame {
    coord: GridCoordinate,
    neighbours: CoordinateSmallVec,
    next: usize,
}

impl SolveFrame {
    fn enter(grid: &mut Grid, coord: GridCoordinate) -> SolveFrame {
        grid.set_visited(coord, VisitPhase::Solving);
        SolveFrame {
            coord,
            neighbours: grid.neighbours(coord),
            next: 0,
        }
    }

    fn next_neighbour(&mut self) -> Option<GridCoordinate> {
        let neighbour = self.neighbours.get(self.next).cloned();
        if neighbour.is_some() {
            self.next += 1;
        }
        neighbour
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::events::{MazeEvent, NullSink};
    use crate::generators;

    fn gc(row: usize, col: usize) -> GridCoordinate {
        GridCoordinate::new(row, col)
    }

    fn forward(from: GridCoordinate, to: GridCoordinate) -> MazeEvent {
        MazeEvent::SegmentTraced { from, to, kind: TraceKind::Forward }
    }

    fn backtrack(from: GridCoordinate, to: GridCoordinate) -> MazeEvent {
        MazeEvent::SegmentTraced { from, to, kind: TraceKind::Backtrack }
    }

    fn open(grid: &mut Grid, a: GridCoordinate, b: GridCoordinate) {
        let (a_side, b_side) = grid.overlapping_walls(a, b).expect("cells are not walled neighbours");
        assert!(grid.remove_wall_pair(a, a_side, b, b_side));
    }

    fn generated(rows: usize, columns: usize, seed: u64) -> Grid {
        let mut g = Grid::new(rows, columns).unwrap();
        let mut rng = XorShiftRng::seed_from_u64(seed);
        generators::recursive_backtracker(&mut g, &mut rng, &mut NullSink).unwrap();
        g
    }

    #[test]
    fn prefers_left_right_up_down() {
        let mut g = Grid::new(2, 2).unwrap();
        open(&mut g, gc(0, 0), gc(0, 1));
        open(&mut g, gc(0, 0), gc(1, 0));
        open(&mut g, gc(0, 1), gc(1, 1));
        open(&mut g, gc(1, 0), gc(1, 1));

        let mut events: Vec<MazeEvent> = Vec::new();
        let path = solve(&mut g, &mut events).unwrap();
        assert_eq!(path, vec![gc(0, 0), gc(0, 1), gc(1, 1)]);
        assert_eq!(events, vec![forward(gc(0, 0), gc(0, 1)), forward(gc(0, 1), gc(1, 1))]);
    }

    #[test]
    fn dead_end_is_backtracked() {
        let mut g = Grid::new(2, 2).unwrap();
        open(&mut g, gc(0, 0), gc(0, 1));
        open(&mut g, gc(0, 0), gc(1, 0));
        open(&mut g, gc(1, 0), gc(1, 1));

        let mut events: Vec<MazeEvent> = Vec::new();
        let path = solve(&mut g, &mut events).unwrap();
        assert_eq!(path, vec![gc(0, 0), gc(1, 0), gc(1, 1)]);
        assert_eq!(events,
                   vec![forward(gc(0, 0), gc(0, 1)),
                        backtrack(gc(0, 1), gc(0, 0)),
                        forward(gc(0, 0), gc(1, 0)),
                        forward(gc(1, 0), gc(1, 1))]);
    }

    #[test]
    fn single_cell_is_already_solved() {
        let mut g = generated(1, 1, 0);
        let mut events: Vec<MazeEvent> = Vec::new();
        assert_eq!(solve(&mut g, &mut events), Ok(vec![gc(0, 0)]));
        assert!(events.is_empty());
        assert!(g.is_visited(gc(0, 0), VisitPhase::Solving));
    }

    #[test]
    fn walled_in_entrance_is_an_error() {
        let mut g = Grid::new(2, 2).unwrap();
        let mut events: Vec<MazeEvent> = Vec::new();
        assert_eq!(solve(&mut g, &mut events),
                   Err(SolveError::ExitUnreachable { visited: 1 }));
        assert!(events.is_empty());
    }

    #[test]
    fn two_by_two_generated_maze() {
        let mut g = generated(2, 2, 1);
        let mut events: Vec<MazeEvent> = Vec::new();
        let path = solve(&mut g, &mut events).unwrap();
        assert_eq!(path.first(), Some(&gc(0, 0)));
        assert_eq!(path.last(), Some(&gc(1, 1)));
        match events.last() {
            Some(&MazeEvent::SegmentTraced { to, kind: TraceKind::Forward, .. }) => assert_eq!(to, gc(1, 1)),
            other => panic!("unexpected final event {:?}", other),
        }
    }

    #[test]
    fn forward_segments_cross_open_passages() {
        let mut g = generated(15, 11, 42);
        let walls_before = g.cells().to_vec();
        let mut events: Vec<MazeEvent> = Vec::new();
        let path = solve(&mut g, &mut events).unwrap();

        assert_eq!(g.cells(), &walls_before[..]);
        for event in &events {
            if let MazeEvent::SegmentTraced { from, to, .. } = *event {
                assert!(g.neighbours(from).contains(&to), "{} is not adjacent", event);
                assert!(g.is_linked(from, to), "{} crosses a wall", event);
            }
        }
        for (a, b) in path.iter().tuple_windows() {
            assert!(g.is_linked(*a, *b));
        }
        assert!(path.iter().all(|c| g.is_visited(*c, VisitPhase::Solving)));
    }

    #[test]
    fn backtracks_retrace_earlier_forward_segments() {
        let mut g = generated(12, 12, 6);
        let mut events: Vec<MazeEvent> = Vec::new();
        let path = solve(&mut g, &mut events).unwrap();

        let forwards = events.iter()
            .filter_map(|e| match *e {
                MazeEvent::SegmentTraced { from, to, kind: TraceKind::Forward } => Some((from, to)),
                _ => None,
            })
            .collect::<Vec<_>>();
        let backtracks = events.iter()
            .filter_map(|e| match *e {
                MazeEvent::SegmentTraced { from, to, kind: TraceKind::Backtrack } => Some((to, from)),
                _ => None,
            })
            .collect::<Vec<_>>();

        assert!(backtracks.iter().all(|segment| forwards.contains(segment)));
        assert_eq!(forwards.len() - backtracks.len(), path.len() - 1);
    }

    #[test]
    fn solving_leaves_generation_marks_alone() {
        let mut g = Grid::new(1, 3).unwrap();
        open(&mut g, gc(0, 0), gc(0, 1));
        open(&mut g, gc(0, 1), gc(0, 2));
        solve(&mut g, &mut NullSink).unwrap();
        assert_eq!(g.visited_count(VisitPhase::Generation), 0);
        assert_eq!(g.visited_count(VisitPhase::Solving), 3);
    }

    #[test]
    fn second_solve_needs_a_reset() {
        let mut g = generated(6, 6, 9);
        let mut first: Vec<MazeEvent> = Vec::new();
        let path = solve(&mut g, &mut first).unwrap();

        assert!(solve(&mut g, &mut NullSink).is_err());

        g.reset_solving();
        let mut second: Vec<MazeEvent> = Vec::new();
        assert_eq!(solve(&mut g, &mut second), Ok(path));
        assert_eq!(first, second);
    }

    #[test]
    fn quickcheck_generated_mazes_are_solvable() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows as usize % 15 + 1, columns as usize % 15 + 1);
            let mut g = generated(rows, columns, seed);
            match solve(&mut g, &mut NullSink) {
                Ok(path) => {
                    TestResult::from_bool(path.first() == Some(&g.entrance()) &&
                                          path.last() == Some(&g.exit()))
                }
                Err(_) => TestResult::failed(),
            }
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
