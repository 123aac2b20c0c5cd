//! Errors used by the [`Board`][crate::board::Board].

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::board::RawCell;
use crate::fleet::ShipId;

/// Reason why a ship could not be placed at a given anchor.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// Part of the footprint lies outside the board.
    #[error("part of the footprint lies outside the board")]
    OutOfBounds,
    /// A footprint cell is already part of another ship's hull.
    #[error("the requested position overlaps another ship")]
    Occupied,
    /// A footprint cell falls on a spacing buffer, or a neighboring cell
    /// holds another ship's hull.
    #[error("the requested position touches another ship's spacing")]
    TooClose,
}

/// Error caused when attempting to place a ship in an invalid position.
#[derive(Error)]
#[error("could not place {ship:?} at {anchor:?}: {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    ship: ShipId,
    anchor: RawCell,
}

impl Debug for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlaceError {
    /// Construct a placement error from a reason, ship, and anchor.
    pub(super) fn new(reason: CannotPlaceReason, ship: ShipId, anchor: RawCell) -> Self {
        Self {
            reason,
            ship,
            anchor,
        }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get the ship whose placement was attempted.
    pub fn ship(&self) -> ShipId {
        self.ship
    }

    /// Get the anchor cell where placement was attempted.
    pub fn anchor(&self) -> RawCell {
        self.anchor
    }
}
