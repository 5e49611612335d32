//! TOML-facing config types for the block registry.

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    pub unknown_block: Option<String>,
}

#[derive(Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub id: Option<u16>,
    pub solid: Option<bool>,
    pub door: Option<DoorCfg>,
    pub state_schema: Option<HashMap<String, Vec<String>>>,
}

/// Door marker, either `door = true` or `door = { linked = false }` for
/// kinds that must not join a linked toggle group.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum DoorCfg {
    Enabled(bool),
    Detail { linked: Option<bool> },
}
