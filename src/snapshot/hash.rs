use crate::foundation::error::StyleResult;
use crate::host::{Host, LayerInfo};
use crate::resolve::resolver::{effect_stack, style_stack};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x4c59_5354_594c_4531;

/// Change signature of the selected layer.
///
/// Covers the layer's identity (composition id and index), the enabled bit of every style-stack
/// child, and the effect count. Value-only edits do not change it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerHash {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl LayerHash {
    /// Signature of "no layer selected".
    pub const NONE: Self = Self { hi: 0, lo: 0 };

    /// Whether this is the "no layer" signature.
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl std::fmt::Display for LayerHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

impl serde::Serialize for LayerHash {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_u8(&mut self, v: u8) {
        self.inner.update(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.inner.update(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.inner.update(&v.to_le_bytes());
    }

    fn finish(self) -> LayerHash {
        let v = self.inner.digest128();
        let h = LayerHash {
            hi: (v >> 64) as u64,
            lo: v as u64,
        };
        // Keep NONE reserved for "no layer".
        if h.is_none() { LayerHash { hi: 0, lo: 1 } } else { h }
    }
}

/// Signature of `layer` as it currently is in the host.
pub fn layer_hash<H: Host + ?Sized>(host: &H, layer: &LayerInfo) -> StyleResult<LayerHash> {
    let mut h = StableHasher::new();
    h.write_u64(layer.comp_id);
    h.write_u32(layer.index);

    match style_stack(host, layer.node)? {
        Some(stack) => {
            let children = host.children(stack)?;
            h.write_u8(b'S');
            h.write_u32(children.len() as u32);
            for child in children {
                h.write_bool(host.node(child)?.enabled);
            }
        }
        None => h.write_u8(0),
    }

    match effect_stack(host, layer.node)? {
        Some(fx) => {
            h.write_u8(b'F');
            h.write_u32(host.children(fx)?.len() as u32);
        }
        None => h.write_u8(0),
    }

    Ok(h.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/hash.rs"]
mod tests;
