use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::{BlocksConfig, DoorCfg};
use super::state::{StateField, compute_state_layout};
use super::types::{Block, BlockId, BlockState};

/// How a door block type participates in linked toggling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DoorBehavior {
    /// Kinds with `linked == false` (e.g. externally powered doors) are
    /// excluded from group toggles entirely.
    pub linked: bool,
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry::new();
        let unknown_name = cfg.unknown_block;
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            let solid = def.solid.unwrap_or(true);
            let door = match def.door {
                Some(DoorCfg::Enabled(true)) => Some(DoorBehavior { linked: true }),
                Some(DoorCfg::Detail { linked }) => Some(DoorBehavior {
                    linked: linked.unwrap_or(true),
                }),
                Some(DoorCfg::Enabled(false)) | None => None,
            };
            let mut state_schema = def.state_schema.unwrap_or_default();
            if door.is_some() {
                // Every door type carries an `open` property, declared or not.
                state_schema
                    .entry("open".to_string())
                    .or_insert_with(|| vec!["false".to_string(), "true".to_string()]);
            }
            let (state_fields, prop_index) = compute_state_layout(&state_schema);
            let ty = BlockType {
                id,
                name: def.name,
                solid,
                door,
                state_schema,
                state_fields,
                prop_index,
            };
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.blocks[id as usize] = ty;
        }
        reg.by_name = reg
            .blocks
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| (t.name.clone(), t.id))
            .collect();
        if let Some(name) = unknown_name {
            reg.unknown_block_id = reg.id_by_name(&name);
        }
        Ok(reg)
    }

    pub fn make_block_by_name(
        &self,
        name: &str,
        props: Option<&HashMap<String, String>>,
    ) -> Option<Block> {
        let id = self.id_by_name(name)?;
        let state = if let Some(p) = props {
            self.get(id).map(|ty| ty.pack_state(p)).unwrap_or(0)
        } else {
            0
        };
        Some(Block { id, state })
    }

    /// Any door at all, including kinds excluded from linked toggling.
    #[inline]
    pub fn is_door(&self, block: Block) -> bool {
        self.get(block.id).map_or(false, |ty| ty.door.is_some())
    }

    /// The predicate gating connectivity: door types that join linked toggle
    /// groups. Air, non-doors, and `linked = false` kinds all fail. Pure in
    /// the block value.
    #[inline]
    pub fn is_linked_door(&self, block: Block) -> bool {
        self.get(block.id)
            .and_then(|ty| ty.door)
            .map_or(false, |d| d.linked)
    }

    pub fn door_is_open(&self, block: Block) -> bool {
        match self.get(block.id) {
            Some(ty) if ty.door.is_some() => ty.state_prop_is_value(block.state, "open", "true"),
            _ => false,
        }
    }

    /// The same block with its `open` property set. Non-doors pass through
    /// unchanged.
    pub fn door_with_open(&self, block: Block, open: bool) -> Block {
        match self.get(block.id) {
            Some(ty) if ty.door.is_some() => Block {
                id: block.id,
                state: ty.state_with_prop(block.state, "open", if open { "true" } else { "false" }),
            },
            _ => block,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub door: Option<DoorBehavior>,
    pub state_schema: HashMap<String, Vec<String>>,
    // Precomputed, sorted layout for fast state packing/unpacking
    pub state_fields: Vec<StateField>,
    pub prop_index: HashMap<String, usize>,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            solid: false,
            door: None,
            state_schema: HashMap::new(),
            state_fields: Vec::new(),
            prop_index: HashMap::new(),
        }
    }

    pub fn state_prop_value<'a>(&'a self, state: BlockState, prop: &str) -> Option<&'a str> {
        if self.state_fields.is_empty() {
            return None;
        }
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return f.values.first().map(|s| s.as_str());
        }
        let idx: usize = (((state as u32) >> f.offset) & f.mask()) as usize;
        f.values.get(idx).map(|s| s.as_str())
    }

    pub fn state_prop_is_value(&self, state: BlockState, prop: &str, expect: &str) -> bool {
        self.state_prop_value(state, prop) == Some(expect)
    }

    pub fn pack_state(&self, props: &HashMap<String, String>) -> BlockState {
        if self.state_fields.is_empty() {
            return 0;
        }
        let mut acc: u32 = 0;
        for f in &self.state_fields {
            if f.bits == 0 {
                continue;
            }
            let sel_idx: u32 = match props.get(&f.name) {
                Some(val) => f.values.iter().position(|s| s == val).unwrap_or(0) as u32,
                None => 0,
            };
            acc |= (sel_idx & f.mask()) << f.offset;
        }
        acc as BlockState
    }

    /// Rewrite a single property, leaving the other fields untouched. Unknown
    /// property names or values leave the state as-is.
    pub fn state_with_prop(&self, state: BlockState, prop: &str, value: &str) -> BlockState {
        let Some(&i) = self.prop_index.get(prop) else {
            return state;
        };
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return state;
        }
        let Some(idx) = f.values.iter().position(|s| s == value) else {
            return state;
        };
        let cleared = (state as u32) & !(f.mask() << f.offset);
        (cleared | ((idx as u32 & f.mask()) << f.offset)) as BlockState
    }
}
