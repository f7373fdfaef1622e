//! Serialization between embeddings and the store's vector literal.
//!
//! The literal is what a `vector(64)` column accepts as input:
//! `[0.1,0.23,...]` with exactly 64 comma-separated fields, no whitespace.
//! `f64`'s `Display` keeps dot-decimal formatting (never scientific) and
//! drops the trailing zeros left over from the embedder's 6-decimal
//! rounding, which is exactly the shape the store echoes back.

use anyhow::{anyhow, bail, Result};

use super::embedding::{Embedding, EMBEDDING_DIM};

pub fn encode(vector: &Embedding) -> String {
    let mut literal = String::with_capacity(EMBEDDING_DIM * 9 + 2);
    literal.push('[');
    for (i, component) in vector.iter().enumerate() {
        if i > 0 {
            literal.push(',');
        }
        literal.push_str(&component.to_string());
    }
    literal.push(']');
    literal
}

/// Exact inverse of [`encode`]. The covered request flows never read a raw
/// embedding back out of the store; this exists for verification.
pub fn decode(literal: &str) -> Result<Embedding> {
    let inner = literal
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| anyhow!("vector literal must be wrapped in brackets"))?;

    let mut vector = [0.0f64; EMBEDDING_DIM];
    let mut count = 0;
    for field in inner.split(',') {
        if count == EMBEDDING_DIM {
            bail!("vector literal has more than {EMBEDDING_DIM} components");
        }
        vector[count] = field
            .parse::<f64>()
            .map_err(|e| anyhow!("bad vector component {field:?}: {e}"))?;
        count += 1;
    }
    if count != EMBEDDING_DIM {
        bail!("vector literal has {count} components, expected {EMBEDDING_DIM}");
    }
    Ok(vector)
}
