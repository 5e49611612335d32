//! Demo host: an in-memory voxel scene wired to the linked-door toggle flow.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use wicket_blocks::BlockRegistry;
use wicket_doors::activate_door;
use wicket_grid::{ChunkStore, GridPos};

#[derive(Parser)]
#[command(name = "wicket", about = "Linked-door toggling over an in-memory voxel grid")]
struct Args {
    /// Block registry definition.
    #[arg(long, default_value = "assets/blocks.toml")]
    blocks: PathBuf,

    /// Cell to activate, as "x,y,z"; repeatable. Defaults to a scripted tour
    /// of the demo scene.
    #[arg(long = "activate", value_parser = parse_pos)]
    activations: Vec<GridPos>,
}

fn parse_pos(s: &str) -> Result<GridPos, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z, got {s:?}"));
    }
    let mut nums = [0i32; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part
            .parse::<i32>()
            .map_err(|e| format!("bad coordinate {part:?}: {e}"))?;
    }
    Ok(GridPos::new(nums[0], nums[1], nums[2]))
}

fn place_tall_door(grid: &mut ChunkStore, reg: &BlockRegistry, name: &str, bottom: GridPos) {
    if let Some(block) = reg.make_block_by_name(name, None) {
        grid.set(bottom, block);
        grid.set(bottom.offset(0, 1, 0), block);
    }
}

/// A small scene: a double door, a corridor of three linked doors capped by
/// an iron door, and one door off on its own.
fn build_scene(reg: &BlockRegistry) -> ChunkStore {
    let mut grid = ChunkStore::new(32, 32, 32);
    place_tall_door(&mut grid, reg, "oak_door", GridPos::new(0, 0, 0));
    place_tall_door(&mut grid, reg, "oak_door", GridPos::new(1, 0, 0));

    place_tall_door(&mut grid, reg, "spruce_door", GridPos::new(4, 0, 2));
    place_tall_door(&mut grid, reg, "spruce_door", GridPos::new(5, 0, 2));
    place_tall_door(&mut grid, reg, "birch_door", GridPos::new(6, 0, 2));
    place_tall_door(&mut grid, reg, "iron_door", GridPos::new(7, 0, 2));

    place_tall_door(&mut grid, reg, "oak_door", GridPos::new(10, 0, 5));
    grid
}

fn default_script() -> Vec<GridPos> {
    vec![
        // Top half of the double door: both leaves swing open.
        GridPos::new(0, 1, 0),
        // Bottom half of the other leaf: both swing shut again.
        GridPos::new(1, 0, 0),
        // Corridor trio opens as one; the iron cap stays put.
        GridPos::new(4, 0, 2),
        // Clicking the iron door does nothing.
        GridPos::new(7, 0, 2),
        // Empty cell, also nothing.
        GridPos::new(3, 0, 3),
    ]
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let reg = BlockRegistry::load_from_path(&args.blocks)?;
    let mut grid = build_scene(&reg);
    let stats = grid.stats();
    info!(
        "scene ready: {} blocks across {} chunks",
        stats.block_entries, stats.chunk_entries
    );

    let script = if args.activations.is_empty() {
        default_script()
    } else {
        args.activations
    };
    for clicked in script {
        let events = activate_door(&mut grid, &reg, clicked);
        if events.is_empty() {
            info!("click at {clicked}: nothing to toggle");
            continue;
        }
        for e in &events {
            info!(
                "door at {} {}",
                e.pos,
                if e.open { "swung open" } else { "swung shut" }
            );
        }
    }
    Ok(())
}
