use active_area::prelude::*;
use std::time::Duration;

const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Headless tour: a map with a 360 px side panel flies between cities,
/// loads tiles at each stop and pans a popup clear of the panel
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = AreaProfile::Smooth.resolve();
    let map = Viewport::new(LatLng::new(37.7749, -122.4194), 12.0, Point::new(1280.0, 800.0));
    let mut area = ActiveArea::new(map, InstantScheduler::new(), options.clone());
    area.configure_active_region(RegionStyle::inset_left(360.0), true, false);

    let mut grid = TileLayer::new(options.tiles.clone());
    let mut tiles = TileScheduler::new();
    let mut levels = TileLevels::new();

    let stops = [
        ("New York", LatLng::new(40.7128, -74.0060), 11.0),
        ("London", LatLng::new(51.5074, -0.1278), 10.0),
        ("Tokyo", LatLng::new(35.6762, 139.6503), 12.0),
    ];

    for (name, target, zoom) in stops {
        area.fly_to(target, Some(zoom), &ViewOptions::default());
        let frames = run_frames(&mut area, FRAME_PERIOD).await;
        log::info!("arrived at {} after {} frames", name, frames);

        load_tiles(&area, &mut tiles, &mut grid, &mut levels)?;

        let anchor = area.map().lat_lng_to_container_point(&target);
        let popup = PopupBox::above(anchor.subtract(&Point::new(420.0, 0.0)), 240.0, 120.0, 12.0);
        if let Some(delta) = area.adjust_pan(&popup) {
            log::info!("panned ({:.0}, {:.0}) to show the {} popup", delta.x, delta.y, name);
        }

        let visual = area.get_center(false);
        let raw = area.get_center(true);
        let events = area.map_mut().take_events();
        log::info!(
            "{}: visual center ({:.4}, {:.4}), raw center ({:.4}, {:.4}), {} events",
            name,
            visual.lat,
            visual.lng,
            raw.lat,
            raw.lng,
            events.len()
        );
    }

    Ok(())
}

/// Runs tile passes until the view is covered, then settles every tile
fn load_tiles(
    area: &ActiveArea<Viewport, InstantScheduler>,
    tiles: &mut TileScheduler,
    grid: &mut TileLayer,
    levels: &mut TileLevels,
) -> active_area::Result<()> {
    let max_zoom = grid.options().max_zoom;
    loop {
        let update = area.update_tiles(tiles, grid)?;
        levels.update_levels(area.map(), &grid.resident(), tiles.tile_zoom(), max_zoom);

        match update {
            TileUpdate::ResetRequired { tile_zoom } => {
                log::debug!("rebuilding levels for tile zoom {}", tile_zoom);
            }
            TileUpdate::Queued(queue) => {
                log::info!("queued {} tiles", queue.len());
                break;
            }
            TileUpdate::Idle | TileUpdate::OutOfRange => break,
        }
    }

    grid.complete_all();
    tiles.on_tiles_loaded(grid);

    let batches = grid.take_batches();
    log::debug!("handed {} batches to the fetcher", batches.len());

    let pruned = grid.prune();
    let update = levels.update_levels(area.map(), &grid.resident(), tiles.tile_zoom(), max_zoom);
    levels.set_zoom_transforms(area.map());
    log::info!(
        "{} tiles resident, {} pruned, levels {:?} (dropped {:?})",
        grid.len(),
        pruned.len(),
        levels.zooms(),
        update.dropped
    );

    grid.take_events();
    Ok(())
}
