/// Index into the block registry.
pub type BlockId = u16;

/// Bit-packed property values for one placed block (layout per block type).
pub type BlockState = u16;

/// One grid cell's worth of block data: which type it is plus its packed
/// property state. Cheap to copy; identity of a placed block is the position
/// it is stored at, not this value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };
}
