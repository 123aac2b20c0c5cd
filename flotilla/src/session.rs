//! The drag-gesture state machine and the placement aggregate that owns the
//! board, the fleet, and the screen geometry.

use log::{debug, warn};

use crate::board::{Board, BoardDim, Coordinate};
use crate::events::DragEvent;
use crate::fleet::{Fleet, ShipId};
use crate::geometry::{BoardGeometry, PixelPos};
use crate::render::{FeedbackRenderer, HighlightColor};

/// State of the current gesture. One gesture is active at a time; the host
/// input layer guarantees ordered delivery per gesture.
#[derive(Debug, Copy, Clone, PartialEq)]
enum DragState {
    /// No gesture in progress.
    Idle,
    /// A ship follows the pointer. `rollback` is the sprite position to
    /// spring back to if the drop is invalid.
    Dragging { ship: ShipId, rollback: PixelPos },
}

/// How a drag gesture ended.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DragOutcome {
    /// The drop was legal; the ship now anchors on this cell.
    Committed(Coordinate),
    /// The drop was rejected; the ship sprang back to where the gesture
    /// started.
    Reverted,
}

/// The placement phase of one player's board: the occupancy grid, the fleet
/// roster, the screen geometry, and the in-flight drag gesture.
///
/// Drive it by feeding [`DragEvent`]s to [`handle`][PlacementSetup::handle];
/// all visual effects flow out through the given [`FeedbackRenderer`].
/// [`reset`][PlacementSetup::reset] is the single entry point that returns
/// the whole aggregate to its initial state.
#[derive(Debug)]
pub struct PlacementSetup {
    board: Board,
    fleet: Fleet,
    geometry: BoardGeometry,
    drag: DragState,
}

impl PlacementSetup {
    /// Create a placement phase over the given board dimensions, geometry,
    /// and fleet.
    pub fn new(dim: BoardDim, geometry: BoardGeometry, fleet: Fleet) -> Self {
        Self {
            board: Board::new(dim),
            fleet,
            geometry,
            drag: DragState::Idle,
        }
    }

    /// Create the standard placement phase: a 10x10 board and the standard
    /// ten-ship fleet stacked below `staging`.
    pub fn standard(geometry: BoardGeometry, staging: PixelPos) -> Self {
        Self::new(BoardDim::default(), geometry, Fleet::standard(staging))
    }

    /// The occupancy grid.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The fleet roster.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// The screen geometry of the board.
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// The ship currently being dragged, if any.
    pub fn dragging(&self) -> Option<ShipId> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging { ship, .. } => Some(ship),
        }
    }

    /// True iff every ship of the fleet has been placed.
    pub fn ready(&self) -> bool {
        self.fleet.all_placed()
    }

    /// Feed one drag event through the state machine. Returns the outcome of
    /// the gesture when `event` ends one, `None` otherwise.
    pub fn handle<R: FeedbackRenderer>(
        &mut self,
        event: DragEvent,
        renderer: &mut R,
    ) -> Option<DragOutcome> {
        match event {
            DragEvent::Start { ship } => {
                self.on_start(ship);
                None
            }
            DragEvent::Move { ship, x, y } => {
                self.on_move(ship, x, y, renderer);
                None
            }
            DragEvent::End { ship } => self.on_end(ship, renderer),
        }
    }

    /// Return the aggregate to its initial state: empty grid, fleet back in
    /// the staging area, no gesture, no highlights, start disabled.
    pub fn reset<R: FeedbackRenderer>(&mut self, renderer: &mut R) {
        self.board.reset();
        self.fleet.reset();
        self.drag = DragState::Idle;
        renderer.clear_highlights();
        renderer.start_enabled(false);
        for ship in self.fleet.ships() {
            renderer.ship_moved(ship.id(), ship.pos());
        }
    }

    fn on_start(&mut self, ship: ShipId) {
        let record = match self.fleet.get(ship) {
            Some(record) => record,
            None => {
                warn!("ignoring drag start for unknown ship {:?}", ship);
                return;
            }
        };
        if let DragState::Dragging { ship: active, .. } = self.drag {
            warn!(
                "drag started for {:?} while {:?} was still active",
                ship, active
            );
        }
        let rollback = record.pos();
        // Free the ship's own footprint so the live check and the drop can
        // use it, including dropping back on the exact same cells.
        if record.placed() {
            self.board.release(ship);
        }
        self.drag = DragState::Dragging { ship, rollback };
    }

    fn on_move<R: FeedbackRenderer>(&mut self, ship: ShipId, x: f32, y: f32, renderer: &mut R) {
        match self.drag {
            DragState::Dragging { ship: active, .. } if active == ship => {}
            _ => {
                warn!("ignoring drag move for {:?} with no active gesture", ship);
                return;
            }
        }
        let pos = PixelPos::new(x, y);
        let len = match self.fleet.get_mut(ship) {
            Some(record) => {
                record.set_pos(pos);
                record.len()
            }
            None => return,
        };
        renderer.ship_moved(ship, pos);

        let anchor = self.geometry.cell_at(pos, len);
        let color = match self.board.check(anchor, len) {
            Ok(()) => HighlightColor::Valid,
            Err(_) => HighlightColor::Invalid,
        };
        renderer.clear_highlights();
        // Light the footprint run; cells hanging off the board are simply
        // not lit.
        let dim = self.board.dim();
        for i in 0..len {
            if let Some(cell) = dim.bound(anchor.offset_col(i as i32)) {
                renderer.highlight(cell, color);
            }
        }
    }

    fn on_end<R: FeedbackRenderer>(
        &mut self,
        ship: ShipId,
        renderer: &mut R,
    ) -> Option<DragOutcome> {
        let rollback = match self.drag {
            DragState::Dragging { ship: active, rollback } if active == ship => rollback,
            _ => {
                warn!("ignoring drag end for {:?} with no active gesture", ship);
                return None;
            }
        };
        self.drag = DragState::Idle;

        let outcome = match self.try_place(ship, renderer) {
            Some(anchor) => {
                debug!("committed {:?} at {}", ship, anchor);
                DragOutcome::Committed(anchor)
            }
            None => {
                // Spring back, then re-run placement at the rollback
                // position. A ship that came off the board re-occupies its
                // old footprint; a staging-area ship misses the board and
                // stays unplaced.
                if let Some(record) = self.fleet.get_mut(ship) {
                    record.set_pos(rollback);
                }
                renderer.ship_moved(ship, rollback);
                if self.try_place(ship, renderer).is_none() {
                    if let Some(record) = self.fleet.get_mut(ship) {
                        record.set_anchor(None);
                    }
                }
                debug!("reverted {:?}", ship);
                DragOutcome::Reverted
            }
        };
        renderer.clear_highlights();
        renderer.start_enabled(self.fleet.all_placed());
        Some(outcome)
    }

    /// Try to commit the ship at its current sprite position: map the sprite
    /// to a cell, place on the grid, and snap the sprite to the cell center.
    fn try_place<R: FeedbackRenderer>(
        &mut self,
        ship: ShipId,
        renderer: &mut R,
    ) -> Option<Coordinate> {
        let (pos, len) = match self.fleet.get(ship) {
            Some(record) => (record.pos(), record.len()),
            None => return None,
        };
        let anchor = self.geometry.cell_at(pos, len);
        match self.board.place(ship, anchor, len) {
            Ok(origin) => {
                let snapped = self.geometry.snap(origin, len);
                if let Some(record) = self.fleet.get_mut(ship) {
                    record.set_pos(snapped);
                    record.set_anchor(Some(origin));
                }
                renderer.ship_moved(ship, snapped);
                Some(origin)
            }
            Err(err) => {
                debug!("placement rejected: {}", err);
                None
            }
        }
    }
}
