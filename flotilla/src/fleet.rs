//! The fleet roster: ship identities, classes, and placement status.

use crate::board::Coordinate;
use crate::geometry::PixelPos;

/// Vertical distance between ships stacked in the staging area, in pixels.
pub const STAGING_STEP: f32 = 50.0;

/// Handle identifying one ship of a fleet. Fleets hand out ids by roster
/// index; hosts carry them opaquely and pass them back in drag events.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShipId(usize);

impl ShipId {
    /// Construct a [`ShipId`] from a roster index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The roster index this id wraps.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Class of a ship, fixing its length. The standard fleet carries one
/// battleship, two cruisers, three destroyers, and four submarines.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShipClass {
    /// Battleship: length 4.
    Battleship,
    /// Cruiser: length 3.
    Cruiser,
    /// Destroyer: length 2.
    Destroyer,
    /// Submarine: length 1.
    Submarine,
}

impl ShipClass {
    /// Every class, in the order ships stack in the staging area.
    pub const ALL: [ShipClass; 4] = [
        ShipClass::Battleship,
        ShipClass::Cruiser,
        ShipClass::Destroyer,
        ShipClass::Submarine,
    ];

    /// Get the length of this ship class in cells.
    pub fn len(self) -> usize {
        match self {
            ShipClass::Battleship => 4,
            ShipClass::Cruiser => 3,
            ShipClass::Destroyer => 2,
            ShipClass::Submarine => 1,
        }
    }

    /// How many ships of this class the standard fleet carries.
    pub fn count(self) -> usize {
        match self {
            ShipClass::Battleship => 1,
            ShipClass::Cruiser => 2,
            ShipClass::Destroyer => 3,
            ShipClass::Submarine => 4,
        }
    }

    /// The class name.
    pub fn name(self) -> &'static str {
        match self {
            ShipClass::Battleship => "battleship",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Destroyer => "destroyer",
            ShipClass::Submarine => "submarine",
        }
    }
}

/// One ship of the fleet: its identity, class, where its sprite currently
/// sits in screen space, and the board cell it anchors on once placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    id: ShipId,
    class: ShipClass,
    /// Staging-area position the ship returns to on reset.
    home: PixelPos,
    pos: PixelPos,
    anchor: Option<Coordinate>,
}

impl Ship {
    fn new(id: ShipId, class: ShipClass, home: PixelPos) -> Self {
        Self {
            id,
            class,
            home,
            pos: home,
            anchor: None,
        }
    }

    /// This ship's id.
    pub fn id(&self) -> ShipId {
        self.id
    }

    /// This ship's class.
    pub fn class(&self) -> ShipClass {
        self.class
    }

    /// This ship's length in cells.
    pub fn len(&self) -> usize {
        self.class.len()
    }

    /// Where the ship's sprite currently sits in screen space.
    pub fn pos(&self) -> PixelPos {
        self.pos
    }

    /// The staging-area position the ship started from.
    pub fn home(&self) -> PixelPos {
        self.home
    }

    /// The board cell the ship anchors on, if it has been placed.
    pub fn anchor(&self) -> Option<Coordinate> {
        self.anchor
    }

    /// Whether the ship has been committed to the board.
    pub fn placed(&self) -> bool {
        self.anchor.is_some()
    }

    pub(crate) fn set_pos(&mut self, pos: PixelPos) {
        self.pos = pos;
    }

    pub(crate) fn set_anchor(&mut self, anchor: Option<Coordinate>) {
        self.anchor = anchor;
    }
}

/// Owns the ship records of one player's fleet.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    /// Build a fleet from `(class, staging position)` pairs, in roster order.
    pub fn new(ships: impl IntoIterator<Item = (ShipClass, PixelPos)>) -> Self {
        Self {
            ships: ships
                .into_iter()
                .enumerate()
                .map(|(i, (class, home))| Ship::new(ShipId::new(i), class, home))
                .collect(),
        }
    }

    /// Build the standard ten-ship fleet, stacked below `staging` at
    /// [`STAGING_STEP`] intervals: one battleship, two cruisers, three
    /// destroyers, four submarines.
    pub fn standard(staging: PixelPos) -> Self {
        let classes = ShipClass::ALL
            .iter()
            .flat_map(|&class| std::iter::repeat(class).take(class.count()));
        Self::new(classes.enumerate().map(|(i, class)| {
            (
                class,
                PixelPos::new(staging.x, staging.y + i as f32 * STAGING_STEP),
            )
        }))
    }

    /// Get the ship with the given id, if it belongs to this fleet.
    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id.index())
    }

    /// Iterate the ships of this fleet in roster order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Number of ships in this fleet.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Whether this fleet has no ships.
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// True iff the fleet is non-empty and every ship has been placed. Gates
    /// the start control.
    pub fn all_placed(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|ship| ship.placed())
    }

    /// Get an iterator over the ids of ships which still need to be placed.
    pub fn pending_ships(&self) -> impl Iterator<Item = ShipId> + '_ {
        self.ships
            .iter()
            .filter(|ship| !ship.placed())
            .map(|ship| ship.id())
    }

    /// Return every ship to its staging position with no anchor.
    pub(crate) fn reset(&mut self) {
        for ship in &mut self.ships {
            ship.pos = ship.home;
            ship.anchor = None;
        }
    }
}
