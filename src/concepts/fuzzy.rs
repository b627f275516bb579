// Partial fuzzy string matching.
//
// `partial_ratio` scores how well the shorter string matches the best-aligned
// substring of the longer one, on a 0-100 scale. The similarity of two
// strings is the Indel ratio 2*LCS / (len_a + len_b), so a single swapped
// letter in a long word still scores in the high 80s while unrelated text
// scores low. Comparison is per Unicode scalar value; callers lower-case
// both inputs first.

/// Substring-aware similarity between `a` and `b`, rounded to 0..=100.
///
/// Symmetric: the shorter input is slid across the longer one, including
/// windows that hang off either end, and the best window wins. Returns 0 if
/// either input is empty.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let k = short.len();
    let n = long.len();
    let mut best = 0.0_f64;

    // Leading windows shorter than k, then full windows, then trailing ones.
    let windows = (1..k)
        .map(|end| (0, end))
        .chain((0..=n - k).map(|start| (start, start + k)))
        .chain((n - k + 1..n).map(|start| (start, n)));

    for (start, end) in windows {
        let window = &long[start..end];
        let score = indel_ratio(&short, window);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * 100.0).round() as u8
}

/// 2 * LCS / (len_a + len_b), in 0.0..=1.0.
fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * lcs_len(a, b) as f64 / total as f64
}

/// Length of the longest common subsequence, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_substring_scores_100() {
        assert_eq!(partial_ratio("force", "what is the net force here"), 100);
    }

    #[test]
    fn test_misspelling_scores_above_85() {
        let score = partial_ratio("photosynthesis", "explain photosintesis in plants");
        assert!(score > 85, "got {score}");
    }

    #[test]
    fn test_unrelated_scores_low() {
        let score = partial_ratio("photosynthesis", "who was the first roman emperor");
        assert!(score < 60, "got {score}");
    }

    #[test]
    fn test_symmetric() {
        let a = "inflation";
        let b = "how does inflaton affect savings";
        assert_eq!(partial_ratio(a, b), partial_ratio(b, a));
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(partial_ratio("", "anything"), 0);
        assert_eq!(partial_ratio("anything", ""), 0);
    }

    #[test]
    fn test_trailing_partial_window_counts() {
        // "photosynthe" at the very end: 2*11 / (14+11) = 0.88
        assert_eq!(partial_ratio("photosynthesis", "define photosynthe"), 88);
    }

    #[test]
    fn test_lcs_len() {
        let a: Vec<char> = "photosynthesis".chars().collect();
        let b: Vec<char> = "photosintesis".chars().collect();
        assert_eq!(lcs_len(&a, &b), 12);
    }
}
