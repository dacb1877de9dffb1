use std::collections::HashSet;

/// Estimate how similar two skill names are, in `[0, 1]`
///
/// Precedence:
/// 1. identical after lowercasing and trimming -> 1.0
/// 2. shared whitespace-separated words -> shared / longer word count
/// 3. otherwise character bigram Jaccard
///
/// Word matches are counted per occurrence in `a`, so repeated words are not
/// deduplicated ("java java" vs "java" is 1.0, the reverse is 0.5).
pub fn skill_similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b {
        return 1.0;
    }

    let words_a: Vec<&str> = a.split_whitespace().collect();
    let words_b: Vec<&str> = b.split_whitespace().collect();

    let common = words_a.iter().filter(|w| words_b.contains(w)).count();
    if common > 0 {
        return common as f64 / words_a.len().max(words_b.len()) as f64;
    }

    bigram_jaccard(&a, &b)
}

/// Jaccard index over the sets of adjacent character pairs
#[inline]
fn bigram_jaccard(a: &str, b: &str) -> f64 {
    let bigrams_a = bigrams(a);
    let bigrams_b = bigrams(b);

    let union = bigrams_a.union(&bigrams_b).count();
    if union == 0 {
        return 0.0;
    }

    bigrams_a.intersection(&bigrams_b).count() as f64 / union as f64
}

fn bigrams(s: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
