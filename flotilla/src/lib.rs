//! Core of the ship-placement phase of a naval board game.
//!
//! A fixed 10x10 board receives ship pieces (lengths 1-4) dragged from a
//! staging area. The crate owns the logic of that phase and nothing else:
//! mapping pointer positions to board cells and back ([`geometry`]), the
//! occupancy grid with the one-cell spacing rule between ships ([`board`]),
//! the fleet roster gating game start ([`fleet`]), and the drag-gesture
//! state machine that validates, commits, or reverts a move ([`session`]).
//!
//! The hosting runtime stays on the far side of two narrow seams: inbound,
//! it translates its pointer callbacks into [`DragEvent`]s; outbound, it
//! implements [`FeedbackRenderer`] to move sprites, light highlight cells,
//! and toggle the start control. The core never touches an engine type.

pub mod board;
pub mod events;
pub mod fleet;
pub mod geometry;
pub mod render;
pub mod session;

pub use board::{Board, BoardDim, CannotPlaceReason, Cell, Coordinate, PlaceError, RawCell};
pub use events::DragEvent;
pub use fleet::{Fleet, Ship, ShipClass, ShipId};
pub use geometry::{BoardGeometry, PixelPos};
pub use render::{FeedbackRenderer, HighlightColor};
pub use session::{DragOutcome, PlacementSetup};
