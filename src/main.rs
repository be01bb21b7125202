use anyhow::{ensure, Context};
use hexgrid::{GridAccessor2D, Hex, HexMap, SquareGridIterator};
use itertools::Itertools;
use log::{debug, info, trace};
use mimalloc::MiMalloc;
use simplelog::{
    ColorChoice, ConfigBuilder, LevelFilter, LevelPadding, TermLogger, TerminalMode,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const RADIUS: usize = 3;

/// Seven cells of the radius-3 hexagon, labeled under each convention.
/// Both tables describe the same physical cells.
const CENTER_BASED_CELLS: [(i32, i32, i32); 7] = [
    (0, -3, 1),
    (1, -3, 2),
    (-3, 0, 3),
    (0, 0, 4),
    (3, 0, 5),
    (2, 1, 8),
    (0, 3, 16),
];

const ZERO_BASED_CELLS: [(i32, i32, i32); 7] = [
    (3, 0, 1),
    (4, 0, 2),
    (0, 3, 3),
    (3, 3, 4),
    (6, 3, 5),
    (5, 4, 8),
    (3, 6, 16),
];

fn main() -> anyhow::Result<()> {
    init_log();

    info!(":: Populating Grids ::");

    debug!(
        "radius {} | {}x{} backing array | {}-bit indices | {}-bit coordinates",
        RADIUS,
        HexMap::<i32, RADIUS>::width(),
        HexMap::<i32, RADIUS>::height(),
        HexMap::<i32, RADIUS>::index_width().bits(),
        Hex::<RADIUS>::coord_width().bits(),
    );

    let mut center_based: HexMap<i32, RADIUS, false> = HexMap::new();
    for &(q, r, value) in &CENTER_BASED_CELLS {
        *center_based
            .at_mut(q, r)
            .with_context(|| format!("center-based write at <{} {}>", q, r))? = value;
    }

    let mut zero_based: HexMap<i32, RADIUS> = HexMap::new();
    for &(q, r, value) in &ZERO_BASED_CELLS {
        *zero_based
            .at_mut(q, r)
            .with_context(|| format!("zero-based write at <{} {}>", q, r))? = value;
    }

    for (coords, value) in center_based
        .iter_grid()
        .map(|coords| (coords, center_based.get(coords)))
        .filter(|&(_, value)| value != 0)
        .sorted_by_key(|&(_, value)| value)
    {
        trace!("({}, {}) holds {}", coords.x, coords.y, value);
    }

    info!(":: Rendering ::");

    println!("cb\n\n{}", center_based);
    println!("zb\n\n{}", zero_based);

    ensure!(
        center_based.data() == zero_based.data(),
        "conventions disagree on the physical layout"
    );

    info!(":: Finished ::");
    Ok(())
}

fn init_log() {
    let config = ConfigBuilder::default()
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_level_padding(LevelPadding::Right)
        .build();

    TermLogger::init(
        LevelFilter::Trace,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("safe");
}
