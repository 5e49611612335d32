//! Bit-packed block state layout.
//!
//! Each block type declares a schema of named properties with allowed string
//! values; the layout assigns every property a fixed bit range inside a
//! [`BlockState`](crate::types::BlockState). Property names are sorted before
//! assignment so the layout is stable across config reordering.

use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct StateField {
    pub name: String,
    pub values: Vec<String>,
    pub bits: u32,
    pub offset: u32,
}

impl StateField {
    /// Mask for this field's bits, pre-shift.
    #[inline]
    pub fn mask(&self) -> u32 {
        if self.bits >= 32 {
            u32::MAX
        } else if self.bits == 0 {
            0
        } else {
            (1u32 << self.bits) - 1
        }
    }
}

pub(crate) fn compute_state_layout(
    schema: &HashMap<String, Vec<String>>,
) -> (Vec<StateField>, HashMap<String, usize>) {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort();
    let mut offset: u32 = 0;
    let mut fields: Vec<StateField> = Vec::with_capacity(keys.len());
    for k in keys.into_iter() {
        let vals = schema.get(k).cloned().unwrap_or_default();
        let vlen = vals.len() as u32;
        let bits: u32 = if vlen <= 1 {
            0
        } else {
            32 - (vlen - 1).leading_zeros()
        };
        fields.push(StateField {
            name: k.to_string(),
            values: vals,
            bits,
            offset,
        });
        offset = offset.saturating_add(bits);
    }
    let mut index: HashMap<String, usize> = HashMap::with_capacity(fields.len());
    for (i, f) in fields.iter().enumerate() {
        index.insert(f.name.clone(), i);
    }
    (fields, index)
}
