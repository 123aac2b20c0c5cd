use flotilla::geometry::anchor_offset;
use flotilla::{BoardGeometry, Coordinate, PixelPos, RawCell};

fn geometry() -> BoardGeometry {
    BoardGeometry::new(PixelPos::new(280.0, 140.0), 50.0)
}

#[test]
fn anchor_offset_per_length() {
    assert_eq!(anchor_offset(1), 1.0);
    assert_eq!(anchor_offset(2), 30.0);
    assert_eq!(anchor_offset(3), 45.0);
    assert_eq!(anchor_offset(4), 60.0);
}

#[test]
fn maps_pixels_anywhere_in_a_cell_to_that_cell() {
    let geometry = geometry();
    // Column 3 of a length-4 ship spans [280+60+150, 280+60+200) on x.
    for dx in [0.0, 0.5, 25.0, 49.5] {
        let pos = PixelPos::new(490.0 + dx, 165.0 + dx / 2.0);
        assert_eq!(geometry.cell_at(pos, 4), RawCell::new(3, 0));
    }
}

#[test]
fn positions_left_of_the_board_map_negative() {
    let geometry = geometry();
    assert_eq!(geometry.cell_at(PixelPos::new(0.0, 0.0), 2), RawCell::new(-7, -3));
}

#[test]
fn snap_lands_on_the_cell_center_plus_offset() {
    let geometry = geometry();
    assert_eq!(
        geometry.snap(Coordinate::new(2, 3), 4),
        PixelPos::new(280.0 + 100.0 + 25.0 + 60.0, 140.0 + 150.0 + 25.0)
    );
    assert_eq!(
        geometry.snap(Coordinate::new(0, 0), 1),
        PixelPos::new(280.0 + 25.0 + 1.0, 140.0 + 25.0)
    );
}

#[test]
fn snap_then_map_roundtrips_every_cell() {
    let geometry = geometry();
    for len in 1..=4 {
        for col in 0..10 {
            for row in 0..10 {
                let coord = Coordinate::new(col, row);
                assert_eq!(
                    geometry.cell_at(geometry.snap(coord, len), len),
                    RawCell::from(coord),
                    "cell {:?} at length {}",
                    coord,
                    len
                );
            }
        }
    }
}
