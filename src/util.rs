use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Turns a snake_case tag such as `brain_region` into display text.
pub fn humanize(tag: &str) -> String {
    tag.replace('_', " ")
}

/// Maps an id onto a deterministic point in `[-1, 1]²`.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_replaces_underscores() {
        assert_eq!(humanize("transcription_factor"), "transcription factor");
        assert_eq!(humanize("gene"), "gene");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let first = stable_pair("SNCA");
        let second = stable_pair("SNCA");
        assert_eq!(first, second);
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }
}
