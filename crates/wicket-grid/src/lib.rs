//! Grid addressing and a sparse chunked block store.
#![forbid(unsafe_code)]

use std::fmt;

use hashbrown::HashMap;
use wicket_blocks::Block;

/// An addressable point in the block grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> GridPos {
        GridPos {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    #[inline]
    pub const fn neighbor(self, face: Face) -> GridPos {
        let (dx, dy, dz) = face.offset();
        self.offset(dx, dy, dz)
    }

    #[inline]
    pub const fn below(self) -> GridPos {
        self.offset(0, -1, 0)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The six face-adjacent directions.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosX,
    NegX,
    PosZ,
    NegZ,
    PosY,
    NegY,
}

impl Face {
    /// Neighbor expansion order: horizontals first, then vertical.
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
        Face::PosY,
        Face::NegY,
    ];

    #[inline]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
        }
    }
}

/// Read/write access to a block grid. Reads are total: positions outside any
/// populated region yield [`Block::AIR`], never an error.
pub trait VoxelGrid {
    fn block_at(&self, pos: GridPos) -> Block;
    fn set_block(&mut self, pos: GridPos, block: Block);
}

#[derive(Default, Debug, Clone, Copy)]
pub struct ChunkStoreStats {
    pub chunk_entries: usize,
    pub block_entries: usize,
}

/// Sparse in-memory block store, bucketed by chunk.
#[derive(Clone, Debug)]
pub struct ChunkStore {
    sx: i32,
    sy: i32,
    sz: i32,
    // Map per-chunk: key=(cx,cy,cz) -> map of world coords -> Block
    inner: HashMap<(i32, i32, i32), HashMap<GridPos, Block>>,
}

impl ChunkStore {
    pub fn new(sx: i32, sy: i32, sz: i32) -> Self {
        Self {
            sx,
            sy,
            sz,
            inner: HashMap::new(),
        }
    }

    pub fn stats(&self) -> ChunkStoreStats {
        ChunkStoreStats {
            chunk_entries: self.inner.len(),
            block_entries: self.inner.values().map(|m| m.len()).sum(),
        }
    }

    #[inline]
    fn chunk_key(&self, pos: GridPos) -> (i32, i32, i32) {
        (
            pos.x.div_euclid(self.sx),
            pos.y.div_euclid(self.sy),
            pos.z.div_euclid(self.sz),
        )
    }

    pub fn get(&self, pos: GridPos) -> Option<Block> {
        let k = self.chunk_key(pos);
        self.inner.get(&k).and_then(|m| m.get(&pos).copied())
    }

    pub fn set(&mut self, pos: GridPos, block: Block) {
        let k = self.chunk_key(pos);
        let entry = self.inner.entry(k).or_default();
        entry.insert(pos, block);
    }
}

impl VoxelGrid for ChunkStore {
    #[inline]
    fn block_at(&self, pos: GridPos) -> Block {
        self.get(pos).unwrap_or(Block::AIR)
    }

    #[inline]
    fn set_block(&mut self, pos: GridPos, block: Block) {
        self.set(pos, block);
    }
}
