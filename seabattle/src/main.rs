use std::{
    env, fmt,
    io::{self, BufRead, Write},
};

use clap::{Arg, ArgAction};
use log::LevelFilter;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use flotilla::{
    BoardGeometry, Cell, Coordinate, DragEvent, DragOutcome, FeedbackRenderer, HighlightColor,
    PixelPos, PlacementSetup, ShipClass, ShipId,
};

/// Staging-area anchor: ships stack below this point, off the board's pixel
/// range so an un-placed ship never maps to a cell.
const STAGING: PixelPos = PixelPos { x: 600.0, y: 25.0 };

fn main() -> io::Result<()> {
    init_logging();
    let matches = clap::Command::new("seabattle")
        .version("1.0")
        .about("Terminal host for the ship placement phase: commands become drag gestures against the placement core.")
        .arg(
            Arg::new("auto")
                .short('a')
                .long("auto")
                .action(ArgAction::SetTrue)
                .help("randomize the whole fleet and print the resulting board"),
        )
        .get_matches();

    let mut setup = PlacementSetup::standard(BoardGeometry::default(), STAGING);
    let mut renderer = TermRenderer::default();
    let mut rng = rand::thread_rng();

    if matches.get_flag("auto") {
        randomize_pending(&mut rng, &mut setup, &mut renderer);
        show_board(&setup, &renderer);
        if setup.ready() {
            println!("Fleet ready: all ships placed.");
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    place_loop(&mut rng, &mut setup, &mut renderer, &mut input)?;
    println!("Fleet ready: all ships placed.");
    Ok(())
}

/// Run the interactive placement loop until every ship is placed and the
/// player types `done`.
fn place_loop<B: BufRead>(
    rng: &mut impl Rng,
    setup: &mut PlacementSetup,
    renderer: &mut TermRenderer,
    input: &mut InputReader<B>,
) -> io::Result<()> {
    enum Cmd {
        Done,
        Place(ShipId, Coordinate),
        Grab(ShipId),
        Drag(Coordinate),
        Drop,
        Randomize,
        Reset,
        Help,
    }
    println!();
    println!("Place ships. Type help or ? for commands.");
    loop {
        println!();
        /// Matchers for commands with arguments.
        static PLACE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?:place|put)\s+
        (?P<ship>[a-z]+)(?P<idx>[0-9]+)?\s+
        (?:(?:at|on|to)\s+)?
        (?P<col>[0-9]+)(?:\s*,\s*|\s+)(?P<row>[0-9]+)$",
            )
            .unwrap()
        });
        static GRAB: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(?x)(?:grab|take)\s+(?P<ship>[a-z]+)(?P<idx>[0-9]+)?$").unwrap()
        });
        static DRAG: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(?x)(?:drag|over)\s+(?P<col>[0-9]+)(?:\s*,\s*|\s+)(?P<row>[0-9]+)$")
                .unwrap()
        });

        // The core drives the start control through the renderer; the banner
        // is that control.
        if renderer.start_enabled {
            println!("All ships placed, type done to start the game");
        } else {
            let mut pending = setup
                .fleet()
                .ships()
                .filter(|ship| !ship.placed())
                .map(|ship| ship.class().name());
            print!("Remaining ships to place: {}", pending.next().unwrap());
            for name in pending {
                print!(", {}", name);
            }
            println!();
        }
        println!("Your current board:");
        show_board(setup, renderer);
        if let Some(held) = setup.dragging() {
            let name = setup.fleet().get(held).map(|s| s.class().name()).unwrap_or("?");
            println!("Holding the {}. Drag <col>,<row> to preview, drop to let go.", name);
        }

        let cmd = input.read_input_lower("> ", |input| match input {
            "?" | "help" | "h" => Some(Cmd::Help),
            "randomize" | "rand" | "random" => Some(Cmd::Randomize),
            "done" | "start" => Some(Cmd::Done),
            "reset" | "clear" => Some(Cmd::Reset),
            "drop" | "release" => Some(Cmd::Drop),
            other => {
                if let Some(captures) = PLACE.captures(other) {
                    let class = parse_class(captures.name("ship").unwrap().as_str())?;
                    let idx = match parse_class_index(captures.name("idx").map(|m| m.as_str())) {
                        Ok(idx) => idx,
                        Err(()) => return None,
                    };
                    let ship = match resolve_ship(setup, class, idx) {
                        Some(ship) => ship,
                        None => {
                            println!("No such ship: the fleet has {} {}(s)", class.count(), class.name());
                            return None;
                        }
                    };
                    let coord = parse_coord(&captures)?;
                    Some(Cmd::Place(ship, coord))
                } else if let Some(captures) = GRAB.captures(other) {
                    let class = parse_class(captures.name("ship").unwrap().as_str())?;
                    let idx = match parse_class_index(captures.name("idx").map(|m| m.as_str())) {
                        Ok(idx) => idx,
                        Err(()) => return None,
                    };
                    match resolve_ship(setup, class, idx) {
                        Some(ship) => Some(Cmd::Grab(ship)),
                        None => {
                            println!("No such ship: the fleet has {} {}(s)", class.count(), class.name());
                            None
                        }
                    }
                } else if let Some(captures) = DRAG.captures(other) {
                    Some(Cmd::Drag(parse_coord(&captures)?))
                } else {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    None
                }
            }
        })?;

        match cmd {
            Cmd::Done if setup.ready() => break,
            Cmd::Done => println!("You must place all your ships first!"),
            Cmd::Place(ship, coord) => {
                if setup.dragging().is_some() {
                    println!("Drop the ship you are holding first.");
                } else {
                    let outcome = place_at(setup, renderer, ship, coord);
                    report_outcome(setup, ship, outcome);
                }
            }
            Cmd::Grab(ship) => {
                if setup.dragging().is_some() {
                    println!("Drop the ship you are holding first.");
                } else {
                    setup.handle(DragEvent::Start { ship }, renderer);
                }
            }
            Cmd::Drag(coord) => match setup.dragging() {
                Some(ship) => {
                    let len = setup.fleet().get(ship).map(|s| s.len()).unwrap_or(1);
                    let target = setup.geometry().snap(coord, len);
                    setup.handle(
                        DragEvent::Move {
                            ship,
                            x: target.x,
                            y: target.y,
                        },
                        renderer,
                    );
                }
                None => println!("Grab a ship first."),
            },
            Cmd::Drop => match setup.dragging() {
                Some(ship) => {
                    let outcome = setup.handle(DragEvent::End { ship }, renderer);
                    report_outcome(setup, ship, outcome);
                }
                None => println!("Nothing to drop."),
            },
            Cmd::Randomize => {
                if setup.dragging().is_some() {
                    println!("Drop the ship you are holding first.");
                } else {
                    randomize_pending(rng, setup, renderer);
                }
            }
            Cmd::Reset => setup.reset(renderer),
            Cmd::Help => {
                println!(
                    "Available Commands:
    done                          if all ships are placed, start the game.
    place <ship> <col>,<row>      drag the ship onto the given cell in one gesture.
        With several ships of a class, suffix an index: \"place destroyer2 4,6\".
        Without one, the first still-unplaced ship of the class is chosen.
    grab <ship>                   pick a ship up.
    drag <col>,<row>              preview the held ship over a cell (highlights show validity).
    drop                          let go of the held ship; an invalid drop springs it back.
    randomize                     randomly place the remaining ships.
    reset                         clear the board and return the fleet to staging.

Available Ships:
    \"battleship\" (\"bb\")
    \"cruiser\" (\"cl\")
    \"destroyer\" (\"dd\")
    \"submarine\" (\"ss\")",
                );
            }
        }
    }
    Ok(())
}

/// Parse a ship class name or abbreviation. Prints a message and returns
/// `None` on an unknown name.
fn parse_class(name: &str) -> Option<ShipClass> {
    match name {
        "bb" | "battleship" => Some(ShipClass::Battleship),
        "cl" | "ca" | "cruiser" => Some(ShipClass::Cruiser),
        "dd" | "destroyer" => Some(ShipClass::Destroyer),
        "ss" | "sub" | "submarine" => Some(ShipClass::Submarine),
        other => {
            println!(
                "invalid ship: {}, choose \"battleship\", \"cruiser\", \"destroyer\", or \"submarine\"",
                other
            );
            None
        }
    }
}

/// Parse the optional 1-based index suffix of a ship name. `Ok(None)` when
/// absent; prints a message and returns `Err` when present but zero.
fn parse_class_index(idx: Option<&str>) -> Result<Option<usize>, ()> {
    match idx {
        None => Ok(None),
        Some(raw) => match raw.parse::<usize>() {
            Ok(0) | Err(_) => {
                println!("invalid ship index: {}, counting starts at 1", raw);
                Err(())
            }
            Ok(n) => Ok(Some(n)),
        },
    }
}

/// Parse `col`/`row` captures into a board coordinate. Prints a message and
/// returns `None` when either is off the board.
fn parse_coord(captures: &regex::Captures) -> Option<Coordinate> {
    let col: usize = match captures.name("col").unwrap().as_str().parse() {
        Ok(col) if col < 10 => col,
        _ => {
            println!(
                "col must be in range [0,9], got {}",
                captures.name("col").unwrap().as_str()
            );
            return None;
        }
    };
    let row: usize = match captures.name("row").unwrap().as_str().parse() {
        Ok(row) if row < 10 => row,
        _ => {
            println!(
                "row must be in range [0,9], got {}",
                captures.name("row").unwrap().as_str()
            );
            return None;
        }
    };
    Some(Coordinate::new(col, row))
}

/// Pick the `idx`-th ship of the class (1-based), or without an index the
/// first still-unplaced one, falling back to the first of the class.
fn resolve_ship(setup: &PlacementSetup, class: ShipClass, idx: Option<usize>) -> Option<ShipId> {
    let mut of_class = setup.fleet().ships().filter(|s| s.class() == class);
    match idx {
        Some(n) => of_class.nth(n - 1).map(|s| s.id()),
        None => {
            let mut of_class = of_class.peekable();
            let first = of_class.peek().map(|s| s.id());
            of_class.find(|s| !s.placed()).map(|s| s.id()).or(first)
        }
    }
}

/// Run a full drag gesture that drops the ship on the given cell.
fn place_at(
    setup: &mut PlacementSetup,
    renderer: &mut TermRenderer,
    ship: ShipId,
    coord: Coordinate,
) -> Option<DragOutcome> {
    let len = setup.fleet().get(ship)?.len();
    let target = setup.geometry().snap(coord, len);
    setup.handle(DragEvent::Start { ship }, renderer);
    setup.handle(
        DragEvent::Move {
            ship,
            x: target.x,
            y: target.y,
        },
        renderer,
    );
    setup.handle(DragEvent::End { ship }, renderer)
}

/// Place every still-unplaced ship on a random legal cell by synthesizing
/// drag gestures until each one commits.
fn randomize_pending(rng: &mut impl Rng, setup: &mut PlacementSetup, renderer: &mut TermRenderer) {
    let dim = setup.board().dim();
    let pending: Vec<ShipId> = setup.fleet().pending_ships().collect();
    for ship in pending {
        let mut placed = false;
        for _ in 0..1000 {
            let coord = Coordinate::new(
                rng.gen_range(0..dim.width()),
                rng.gen_range(0..dim.height()),
            );
            if let Some(DragOutcome::Committed(_)) = place_at(setup, renderer, ship, coord) {
                placed = true;
                break;
            }
        }
        if !placed {
            println!("Could not find a random spot for a ship; try reset.");
            return;
        }
    }
}

/// Report how a gesture ended.
fn report_outcome(setup: &PlacementSetup, ship: ShipId, outcome: Option<DragOutcome>) {
    let name = setup
        .fleet()
        .get(ship)
        .map(|s| s.class().name())
        .unwrap_or("?");
    match outcome {
        Some(DragOutcome::Committed(coord)) => println!("The {} anchored at {}.", name, coord),
        Some(DragOutcome::Reverted) => println!("Invalid position for the {}, sprang back.", name),
        None => {}
    }
}

/// Print the board grid: hulls by class abbreviation, spacing buffers as
/// dots, with any live drag highlights overlaid.
fn show_board(setup: &PlacementSetup, renderer: &TermRenderer) {
    enum BoardCell {
        Empty,
        Buffer,
        Ship(ClassAbbrev),
        Highlight(HighlightColor),
    }
    impl fmt::Display for BoardCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                BoardCell::Empty => f.pad("~~"),
                BoardCell::Buffer => f.pad("."),
                BoardCell::Ship(abbrev) => fmt::Display::fmt(abbrev, f),
                BoardCell::Highlight(HighlightColor::Valid) => f.pad("++"),
                BoardCell::Highlight(HighlightColor::Invalid) => f.pad("!!"),
            }
        }
    }

    print!("   ");
    for col in 0..setup.board().dim().width() {
        print!("{:^4}", col);
    }
    println!();
    for (row_idx, row) in setup.board().iter_rows().enumerate() {
        print!("{:>2} ", row_idx);
        for (col_idx, cell) in row.enumerate() {
            let coord = Coordinate::new(col_idx, row_idx);
            let display = match renderer.highlight_at(coord) {
                Some(color) => BoardCell::Highlight(color),
                None => match cell {
                    Cell::Empty => BoardCell::Empty,
                    Cell::Buffer(_) => BoardCell::Buffer,
                    Cell::Hull(id) => match setup.fleet().get(id) {
                        Some(ship) => BoardCell::Ship(ClassAbbrev(ship.class())),
                        None => BoardCell::Empty,
                    },
                },
            };
            print!("{:^4}", display);
        }
        println!();
    }
}

/// Display helper that prints the ship class abbreviation.
struct ClassAbbrev(ShipClass);

impl ClassAbbrev {
    fn abbrev(&self) -> &'static str {
        match self.0 {
            ShipClass::Battleship => "bb",
            ShipClass::Cruiser => "cl",
            ShipClass::Destroyer => "dd",
            ShipClass::Submarine => "ss",
        }
    }
}

impl fmt::Display for ClassAbbrev {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.abbrev())
    }
}

/// Tracks the visual state the core drives: which highlight cells are lit
/// and whether the start control is enabled. Sprite positions live in the
/// fleet records, so moves only get logged here.
#[derive(Default)]
struct TermRenderer {
    highlights: Vec<(Coordinate, HighlightColor)>,
    start_enabled: bool,
}

impl TermRenderer {
    fn highlight_at(&self, coord: Coordinate) -> Option<HighlightColor> {
        self.highlights
            .iter()
            .find(|(cell, _)| *cell == coord)
            .map(|&(_, color)| color)
    }
}

impl FeedbackRenderer for TermRenderer {
    fn ship_moved(&mut self, ship: ShipId, pos: PixelPos) {
        log::debug!("sprite {:?} moved to ({}, {})", ship, pos.x, pos.y);
    }

    fn highlight(&mut self, cell: Coordinate, color: HighlightColor) {
        self.highlights.push((cell, color));
    }

    fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    fn start_enabled(&mut self, enabled: bool) {
        self.start_enabled = enabled;
        if enabled {
            log::debug!("start control enabled");
        }
    }
}

struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} - {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

/// Initialize logging with a level taken from the `SEABATTLE_LOG` environment
/// variable. Defaults to `warn` if the variable is not set or invalid.
fn init_logging() {
    let level = env::var("SEABATTLE_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Warn);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`.
    /// Converts to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
