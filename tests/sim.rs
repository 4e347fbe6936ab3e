use life_torus::{expand, expand_blocks, Error, Field, PixelBuffer, BEACON_CELLS};

const SEED: u64 = 42;

fn field_with(width: usize, height: usize, alive: &[(usize, usize)]) -> Field {
    let mut field = Field::blank(width, height);
    for &(x, y) in alive {
        field.set(x, y, true).unwrap();
    }
    field
}

#[test]
fn rule_table_at_every_neighbor_count() {
    let neighbors = [
        (3, 3),
        (4, 3),
        (5, 3),
        (3, 4),
        (5, 4),
        (3, 5),
        (4, 5),
        (5, 5),
    ];
    for count in 0..=8 {
        for center_alive in [false, true] {
            let mut alive = neighbors[..count].to_vec();
            if center_alive {
                alive.push((4, 4));
            }
            let mut field = field_with(10, 10, &alive);
            field.update(1);
            let expect = if center_alive {
                count == 2 || count == 3
            } else {
                count == 3
            };
            assert_eq!(
                field.get(4, 4).unwrap(),
                expect,
                "center_alive={center_alive}, count={count}"
            );
        }
    }
}

#[test]
fn corners_are_neighbors_across_the_seam() {
    let (w, h) = (8, 6);
    // three live corners are the only neighbors (w-1, h-1) has, all of
    // them through wrap-around, and they give it exactly 3
    let mut field = field_with(w, h, &[(0, 0), (0, h - 1), (w - 1, 0)]);
    field.update(1);
    assert!(field.get(w - 1, h - 1).unwrap());
    // (0, 0) sees two of them, so it survives
    assert!(field.get(0, 0).unwrap());
}

#[test]
fn blinker_oscillates_across_the_edge() {
    let (w, h) = (8, 8);
    let mut field = field_with(w, h, &[(w - 1, 2), (0, 2), (1, 2)]);
    field.update(1);
    for y in 0..h {
        for x in 0..w {
            let expect = x == 0 && (1..=3).contains(&y);
            assert_eq!(field.get(x, y).unwrap(), expect, "({x}, {y})");
        }
    }
    field.update(1);
    assert_eq!(
        field.cells(),
        field_with(w, h, &[(w - 1, 2), (0, 2), (1, 2)]).cells()
    );
}

#[test]
fn beacon_has_period_2() {
    let mut field = Field::blank(8, 8);
    field.seed_beacon().unwrap();
    let initial = field.cells().to_vec();
    assert_eq!(field.population(), BEACON_CELLS.len());

    field.update(1);
    assert_ne!(field.cells(), &initial[..]);
    field.update(1);
    assert_eq!(field.cells(), &initial[..]);

    // one more full period
    field.update(2);
    assert_eq!(field.cells(), &initial[..]);
}

#[test]
fn beacon_keeps_surrounding_cells() {
    let mut field = field_with(8, 8, &[(6, 6)]);
    field.seed_beacon().unwrap();
    assert!(field.get(6, 6).unwrap());
    assert_eq!(field.population(), BEACON_CELLS.len() + 1);
}

#[test]
fn beacon_needs_a_5x5_field() {
    let mut field = Field::blank(4, 4);
    assert!(matches!(field.seed_beacon(), Err(Error::OutOfRange { .. })));
}

#[test]
fn all_dead_is_a_fixed_point() {
    let mut field = Field::blank(16, 12);
    field.update(10);
    assert_eq!(field.population(), 0);
    field.update_par(10);
    assert_eq!(field.population(), 0);
}

#[test]
fn expand_replicates_one_cell_into_a_zoom_block() {
    const ZOOM: usize = 4;
    let (i0, j0) = (3, 2);
    let field = field_with(8, 6, &[(i0, j0)]);
    let mut dest = PixelBuffer::for_field(&field, ZOOM);
    expand(&field, ZOOM, &mut dest).unwrap();

    let (dw, dh) = dest.size();
    assert_eq!((dw, dh), (8 * ZOOM, 6 * ZOOM));
    let mut alive_pixels = 0;
    for y in 0..dh {
        for x in 0..dw {
            let px = dest.pixel(x, y).unwrap();
            if x / ZOOM == i0 && y / ZOOM == j0 {
                assert_eq!(px, 1.0, "({x}, {y})");
                alive_pixels += 1;
            } else {
                assert_eq!(px, 0.0, "({x}, {y})");
            }
        }
    }
    assert_eq!(alive_pixels, ZOOM * ZOOM);
}

#[test]
fn expand_rejects_wrong_dimensions_without_mutation() {
    let field = field_with(8, 6, &[(0, 0), (3, 3)]);
    let mut dest = PixelBuffer::new(10, 10);
    let err = expand(&field, 2, &mut dest).unwrap_err();
    assert_eq!(
        err,
        Error::DimensionMismatch {
            got_width: 10,
            got_height: 10,
            want_width: 16,
            want_height: 12,
        }
    );
    assert!(dest.data().iter().all(|&px| px == 0.0));

    assert!(expand_blocks(&field, 2, &mut dest).is_err());
    assert!(dest.data().iter().all(|&px| px == 0.0));
}

#[test]
fn push_and_pull_expansion_agree() {
    let mut field = Field::blank(33, 17);
    field.randomize(Some(SEED), 0.5).unwrap();
    let mut pulled = PixelBuffer::for_field(&field, 3);
    let mut pushed = PixelBuffer::for_field(&field, 3);
    expand(&field, 3, &mut pulled).unwrap();
    expand_blocks(&field, 3, &mut pushed).unwrap();
    assert_eq!(pulled.data(), pushed.data());
}

#[test]
fn randomize_is_deterministic_per_seed() {
    let mut a = Field::blank(64, 64);
    let mut b = Field::blank(64, 64);
    a.randomize(Some(SEED), 0.5).unwrap();
    b.randomize(Some(SEED), 0.5).unwrap();
    assert_eq!(a.cells(), b.cells());

    b.randomize(Some(SEED + 1), 0.5).unwrap();
    assert_ne!(a.cells(), b.cells());
}

#[test]
fn fill_ratio_is_a_dead_bias() {
    let mut field = Field::blank(64, 64);
    field.randomize(Some(SEED), 1.0).unwrap();
    assert_eq!(field.population(), 0);

    field.randomize(Some(SEED), 0.1).unwrap();
    let dense = field.population();
    field.randomize(Some(SEED), 0.9).unwrap();
    let sparse = field.population();
    assert!(dense > sparse, "dense={dense}, sparse={sparse}");
}

#[test]
fn randomize_rejects_ratio_outside_unit_interval() {
    let mut field = Field::blank(8, 8);
    for ratio in [-0.1, 1.1, f64::NAN] {
        assert!(matches!(
            field.randomize(Some(SEED), ratio),
            Err(Error::InvalidConfig { .. })
        ));
    }
}

#[test]
fn parallel_update_matches_sequential() {
    let dims = [(8, 8), (8, 64), (64, 257), (257, 8), (257, 257)];
    for (seed, &(w, h)) in dims.iter().enumerate() {
        let mut seq = Field::blank(w, h);
        let mut par = Field::blank(w, h);
        seq.randomize(Some(seed as u64), 0.5).unwrap();
        par.randomize(Some(seed as u64), 0.5).unwrap();

        seq.update(2);
        par.update_par(2);
        assert_eq!(seq.cells(), par.cells(), "{w}x{h}");
    }
}

#[test]
fn set_rejects_out_of_range_and_leaves_field_unchanged() {
    let mut field = field_with(8, 6, &[(1, 1)]);
    let before = field.cells().to_vec();
    assert_eq!(
        field.set(8, 0, true),
        Err(Error::OutOfRange {
            x: 8,
            y: 0,
            width: 8,
            height: 6,
        })
    );
    assert!(field.set(0, 6, true).is_err());
    assert!(field.get(100, 100).is_err());
    assert_eq!(field.cells(), &before[..]);
}
