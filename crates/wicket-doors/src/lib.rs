//! Connected-door search and linked toggling.
//!
//! Activating one door toggles every door reachable from it through face
//! adjacency, so double doors and door walls move as one. The search is a
//! plain breadth-first traversal gated by the registry's door classification;
//! two-cell doors are canonicalized to their bottom half before anything is
//! compared or toggled.
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use hashbrown::HashSet;
use wicket_blocks::BlockRegistry;
use wicket_grid::{Face, GridPos, VoxelGrid};

/// Feedback for one door whose state actually changed, in toggle order. The
/// host maps these to audio/visual effects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DoorToggled {
    pub pos: GridPos,
    pub open: bool,
}

/// Canonicalize a door position to its bottom half.
///
/// Two-cell doors store the same block id in both halves; when the block
/// directly below holds that id and is itself a linked door, `pos` is the top
/// half and the bottom is returned. Already-bottom positions (and non-doors)
/// come back unchanged, so resolving twice is the same as resolving once.
/// Doors are at most two cells tall; resolution never recurses.
pub fn resolve_to_bottom(grid: &dyn VoxelGrid, reg: &BlockRegistry, pos: GridPos) -> GridPos {
    let block = grid.block_at(pos);
    let below = pos.below();
    let below_block = grid.block_at(below);
    if below_block.id == block.id && reg.is_linked_door(below_block) {
        below
    } else {
        pos
    }
}

/// Breadth-first search for every linked door reachable from `start` through
/// the six face directions. Returns canonical bottom positions, deduplicated,
/// in first-discovery order. A non-door `start` yields an empty result.
///
/// Neighbors are enqueued only when they already classify as linked doors, so
/// the frontier never leaves door territory and the traversal is bounded by
/// the connected cluster. Read-only.
pub fn connected_doors(grid: &dyn VoxelGrid, reg: &BlockRegistry, start: GridPos) -> Vec<GridPos> {
    let mut frontier: VecDeque<GridPos> = VecDeque::new();
    let mut visited: HashSet<GridPos> = HashSet::new();
    let mut seen_bottoms: HashSet<GridPos> = HashSet::new();
    let mut doors: Vec<GridPos> = Vec::new();

    frontier.push_back(start);
    while let Some(pos) = frontier.pop_front() {
        if !visited.insert(pos) {
            continue;
        }
        if !reg.is_linked_door(grid.block_at(pos)) {
            continue;
        }
        let bottom = resolve_to_bottom(grid, reg, pos);
        if seen_bottoms.insert(bottom) {
            doors.push(bottom);
        }
        for face in Face::ALL {
            let next = pos.neighbor(face);
            if !visited.contains(&next) && reg.is_linked_door(grid.block_at(next)) {
                frontier.push_back(next);
            }
        }
    }
    doors
}

/// Drive every door in `doors` to `target_open`, skipping doors already
/// there. Emits one [`DoorToggled`] per door actually changed, in input
/// order. Calling twice with the same target mutates nothing the second
/// time.
///
/// Positions that no longer hold a door (the grid changed under us) are
/// skipped rather than treated as an error.
pub fn toggle_doors(
    grid: &mut dyn VoxelGrid,
    reg: &BlockRegistry,
    doors: &[GridPos],
    target_open: bool,
) -> Vec<DoorToggled> {
    let mut toggled: Vec<DoorToggled> = Vec::new();
    for &pos in doors {
        let block = grid.block_at(pos);
        if !reg.is_door(block) {
            continue;
        }
        if reg.door_is_open(block) == target_open {
            continue;
        }
        grid.set_block(pos, reg.door_with_open(block, target_open));
        log::debug!(target: "doors", "door at {} now open={}", pos, target_open);
        toggled.push(DoorToggled {
            pos,
            open: target_open,
        });
    }
    toggled
}

/// Entry point for a host interaction with a door cell.
///
/// Resolves the clicked cell to its bottom half, reads the current state
/// there, finds the connected cluster, and drives the whole cluster to the
/// inverse state. Clicks on anything that is not a linked door are a no-op
/// returning no events.
pub fn activate_door(
    grid: &mut dyn VoxelGrid,
    reg: &BlockRegistry,
    clicked: GridPos,
) -> Vec<DoorToggled> {
    if !reg.is_linked_door(grid.block_at(clicked)) {
        return Vec::new();
    }
    let bottom = resolve_to_bottom(&*grid, reg, clicked);
    let target_open = !reg.door_is_open(grid.block_at(bottom));
    let doors = connected_doors(&*grid, reg, bottom);
    let toggled = toggle_doors(grid, reg, &doors, target_open);
    log::debug!(
        target: "doors",
        "activation at {} {} {} door(s)",
        clicked,
        if target_open { "opened" } else { "closed" },
        toggled.len()
    );
    toggled
}
