use std::collections::{BTreeSet, VecDeque};

use proptest::prelude::*;
use wicket_blocks::BlockRegistry;
use wicket_doors::activate_door;
use wicket_grid::{ChunkStore, GridPos, VoxelGrid};

type Cell = (i32, i32, i32);

fn registry() -> BlockRegistry {
    BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "air"
        id = 0
        solid = false

        [[blocks]]
        name = "oak_door"
        id = 1
        solid = false
        door = true
    "#,
    )
    .expect("registry")
}

const STEPS: [Cell; 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
    (0, 1, 0),
    (0, -1, 0),
];

/// Reference face-adjacency flood fill over the raw door cell set.
fn component(doors: &BTreeSet<Cell>, start: Cell) -> BTreeSet<Cell> {
    let mut seen: BTreeSet<Cell> = BTreeSet::new();
    let mut queue: VecDeque<Cell> = VecDeque::from([start]);
    while let Some((x, y, z)) = queue.pop_front() {
        if !seen.insert((x, y, z)) {
            continue;
        }
        for (dx, dy, dz) in STEPS {
            let next = (x + dx, y + dy, z + dz);
            if doors.contains(&next) && !seen.contains(&next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

/// Canonical bottoms of a component: a cell whose direct lower neighbor is
/// also a door canonicalizes to that neighbor (one step only).
fn canonical_bottoms(doors: &BTreeSet<Cell>, comp: &BTreeSet<Cell>) -> BTreeSet<Cell> {
    comp.iter()
        .map(|&(x, y, z)| {
            let below = (x, y - 1, z);
            if doors.contains(&below) { below } else { (x, y, z) }
        })
        .collect()
}

fn arb_doors() -> impl Strategy<Value = BTreeSet<Cell>> {
    proptest::collection::btree_set((0i32..5, 0i32..3, 0i32..5), 1..12)
}

proptest! {
    // One activation opens exactly the connected component's canonical
    // bottoms and touches nothing else; a second activation undoes it.
    #[test]
    fn activation_toggles_exactly_the_connected_component(
        doors in arb_doors(),
        idx in any::<prop::sample::Index>(),
    ) {
        let reg = registry();
        let mut grid = ChunkStore::new(8, 8, 8);
        for &(x, y, z) in &doors {
            grid.set_block(
                GridPos::new(x, y, z),
                reg.make_block_by_name("oak_door", None).unwrap(),
            );
        }
        let all: Vec<Cell> = doors.iter().copied().collect();
        let (sx, sy, sz) = all[idx.index(all.len())];
        let start = GridPos::new(sx, sy, sz);

        let comp = component(&doors, (sx, sy, sz));
        let expected_open = canonical_bottoms(&doors, &comp);

        let events = activate_door(&mut grid, &reg, start);
        prop_assert!(events.iter().all(|e| e.open));
        let opened: BTreeSet<Cell> = events.iter().map(|e| (e.pos.x, e.pos.y, e.pos.z)).collect();
        // No duplicate positions in the feedback stream.
        prop_assert_eq!(events.len(), opened.len());
        prop_assert_eq!(&opened, &expected_open);

        // Cells open exactly where a canonical bottom was toggled; every
        // other cell (tops included) still reads closed.
        for &(x, y, z) in &doors {
            let is_open = reg.door_is_open(grid.block_at(GridPos::new(x, y, z)));
            prop_assert_eq!(is_open, expected_open.contains(&(x, y, z)));
        }

        // Involution: triggering the same cell again restores every state.
        let events2 = activate_door(&mut grid, &reg, start);
        prop_assert!(events2.iter().all(|e| !e.open));
        let closed: BTreeSet<Cell> = events2.iter().map(|e| (e.pos.x, e.pos.y, e.pos.z)).collect();
        prop_assert_eq!(&closed, &expected_open);
        for &(x, y, z) in &doors {
            prop_assert!(!reg.door_is_open(grid.block_at(GridPos::new(x, y, z))));
        }
    }
}
