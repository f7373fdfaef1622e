//! Deterministic lightweight embedding: no model download, no external
//! service, identical text always hashes to the identical vector. It does
//! not capture real semantics; it only has to be stable, cheap, and usable
//! next to the lexical rank.

use unicode_normalization::UnicodeNormalization;

pub const EMBEDDING_DIM: usize = 64;

pub type Embedding = [f64; EMBEDDING_DIM];

/// Hashes text into a 64-dimension unit vector.
///
/// The input is NFKD-decomposed first, so composed and decomposed spellings
/// of the same glyphs land in the same buckets. Each code point selects a
/// bucket (`cp % 64`) and contributes a small weight (`(cp % 31) / 31`).
/// Accumulation is a plain left-to-right sum; nothing else touches the
/// buckets before normalization.
pub fn embed(text: &str) -> Embedding {
    let mut vec = [0.0f64; EMBEDDING_DIM];
    for ch in text.nfkd() {
        let code = ch as u32;
        let bucket = (code % EMBEDDING_DIM as u32) as usize;
        vec[bucket] += f64::from(code % 31) / 31.0;
    }

    // Normalize to unit length. An empty accumulation stays all-zero
    // instead of dividing by zero.
    let norm = vec.iter().map(|v| v * v).sum::<f64>().sqrt();
    let divisor = if norm == 0.0 { 1.0 } else { norm };
    for v in &mut vec {
        *v = round_component(*v / divisor);
    }
    vec
}

fn round_component(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_calls_are_identical() {
        let a = embed("amber haze over the harbor");
        let b = embed("amber haze over the harbor");
        assert_eq!(a, b);
    }

    #[test]
    fn output_is_unit_length() {
        for text in ["note", "Amber haze", "안녕하세요", "a"] {
            let v = embed(text);
            let norm = v.iter().map(|c| c * c).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-4, "norm for {text:?} was {norm}");
        }
    }

    #[test]
    fn empty_text_is_the_zero_vector() {
        let v = embed("");
        assert_eq!(v.len(), EMBEDDING_DIM);
        assert!(v.iter().all(|c| *c == 0.0));
    }

    #[test]
    fn composed_and_decomposed_forms_agree() {
        // U+00E9 vs 'e' + U+0301
        assert_eq!(embed("caf\u{e9}"), embed("cafe\u{301}"));
    }

    #[test]
    fn buckets_and_weights_follow_the_code_points() {
        // "note": n=110, o=111, t=116, e=101.
        // Buckets 46, 47, 52, 37; raw weights 17/31, 18/31, 23/31, 8/31.
        // The shared 1/31 factor cancels during normalization.
        let v = embed("note");
        let norm = ((17.0f64 * 17.0) + (18.0 * 18.0) + (23.0 * 23.0) + (8.0 * 8.0)).sqrt();
        let round = |x: f64| (x * 1_000_000.0).round() / 1_000_000.0;
        assert_eq!(v[46], round(17.0 / norm));
        assert_eq!(v[47], round(18.0 / norm));
        assert_eq!(v[52], round(23.0 / norm));
        assert_eq!(v[37], round(8.0 / norm));
        let touched = v.iter().filter(|c| **c != 0.0).count();
        assert_eq!(touched, 4);
    }

    #[test]
    fn astral_plane_input_does_not_panic() {
        let v = embed("🎨🖼️");
        let norm = v.iter().map(|c| c * c).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }
}
