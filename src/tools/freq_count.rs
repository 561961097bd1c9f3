use rustc_hash::FxHashMap;

/// Returns a frequency count of every character in the text.
pub fn build_frequency_table(text: &str) -> FxHashMap<char, u32> {
    let mut freqs = FxHashMap::default();
    text.chars().for_each(|c| *freqs.entry(c).or_insert(0) += 1);
    freqs
}
