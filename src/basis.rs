//! The math core: pure index arithmetic over two character sequences.
//!
//! Everything here is case-fold-insensitive and knows nothing about
//! `CharacterType` or display — it only produces a [`Basis`], the index
//! skeleton the text former walks to build a [`crate::model::Text`].

use std::collections::HashMap;

use crate::model::fold;

/// The index skeleton computed by [`calculate_basis`].
///
/// - `source_sequence`: every valid index into `accurate`, in order.
/// - `sequence`: one entry per character of `compared`; `Some(i)` means
///   that position was tentatively assigned to `accurate`'s index `i`.
/// - `subsequence`: the best strictly-increasing run chosen out of
///   `sequence`'s non-`None` entries — the characters that end up
///   `Correct`.
/// - `missing_elements`: indices of `accurate` never covered by
///   `subsequence`, in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Basis {
    pub source_sequence: Vec<usize>,
    pub sequence: Vec<Option<usize>>,
    pub subsequence: Vec<usize>,
    pub missing_elements: Vec<usize>,
}

/// Count of characters `compared` and `accurate` have in common, as a
/// multiset intersection after case-folding. Used by the text former's
/// quick compliance gate.
pub fn count_common_chars(compared: &str, accurate: &str) -> usize {
    let mut counts: HashMap<char, i64> = HashMap::new();
    for c in accurate.chars() {
        *counts.entry(fold(c)).or_insert(0) += 1;
    }
    let mut common = 0usize;
    for c in compared.chars() {
        if let Some(n) = counts.get_mut(&fold(c)) {
            if *n > 0 {
                *n -= 1;
                common += 1;
            }
        }
    }
    common
}

/// Compute the index basis that aligns `compared` against `accurate`.
///
/// Public contract: takes only the two texts, unbounded in the number of
/// raw sequences it is willing to enumerate. Callers that need the
/// resource cap from `AnalysisConfig` go through
/// [`calculate_basis_capped`] instead.
pub fn calculate_basis(compared: &str, accurate: &str) -> Basis {
    calculate_basis_capped(compared, accurate, None)
}

pub(crate) fn calculate_basis_capped(compared: &str, accurate: &str, cap: Option<usize>) -> Basis {
    let cmp_chars: Vec<char> = compared.chars().collect();
    let acc_chars: Vec<char> = accurate.chars().collect();
    let acc_len = acc_chars.len();
    let source_sequence: Vec<usize> = (0..acc_len).collect();

    let cmp_fold: Vec<char> = cmp_chars.iter().copied().map(fold).collect();
    let acc_fold: Vec<char> = acc_chars.iter().copied().map(fold).collect();

    if cmp_fold.len() == acc_fold.len() && cmp_fold == acc_fold {
        tracing::trace!(len = acc_len, "calculate_basis: fast path, fully equal");
        return Basis {
            source_sequence: source_sequence.clone(),
            sequence: source_sequence.iter().map(|&i| Some(i)).collect(),
            subsequence: source_sequence.clone(),
            missing_elements: Vec::new(),
        };
    }

    let max_p = cmp_fold.len().min(acc_fold.len());
    let mut p = 0usize;
    while p < max_p && cmp_fold[p] == acc_fold[p] {
        p += 1;
    }
    let max_s = max_p - p;
    let mut s = 0usize;
    while s < max_s && cmp_fold[cmp_fold.len() - 1 - s] == acc_fold[acc_fold.len() - 1 - s] {
        s += 1;
    }

    tracing::debug!(prefix = p, suffix = s, "calculate_basis: stripped common edges");

    let inner_cmp = &cmp_fold[p..cmp_fold.len() - s];
    let inner_acc_len = acc_fold.len() - s - p;

    let (inner_sequence, inner_subsequence, raw_sequences_seen) =
        enumerate_and_select(inner_cmp, &acc_fold[p..acc_fold.len() - s], cap);

    if let Some(limit) = cap {
        if raw_sequences_seen >= limit {
            tracing::warn!(
                limit,
                seen = raw_sequences_seen,
                "calculate_basis: raw sequence enumeration hit its cap"
            );
        }
    }

    let mut sequence = Vec::with_capacity(cmp_chars.len());
    sequence.extend((0..p).map(Some));
    sequence.extend(inner_sequence.iter().map(|opt| opt.map(|v| v + p)));
    sequence.extend((acc_len - s..acc_len).map(Some));

    let mut subsequence: Vec<usize> = Vec::with_capacity(p + inner_subsequence.len() + s);
    subsequence.extend(0..p);
    subsequence.extend(inner_subsequence.iter().map(|&v| v + p));
    subsequence.extend(acc_len - s..acc_len);

    let covered: std::collections::HashSet<usize> = subsequence.iter().copied().collect();
    let missing_elements: Vec<usize> = (0..inner_acc_len)
        .map(|i| i + p)
        .filter(|i| !covered.contains(i))
        .collect();

    Basis {
        source_sequence,
        sequence,
        subsequence,
        missing_elements,
    }
}

/// Group `inner_cmp`'s positions by character, in first-appearance order.
fn char_groups(inner_cmp: &[char]) -> Vec<(char, Vec<usize>)> {
    let mut index_of: HashMap<char, usize> = HashMap::new();
    let mut groups: Vec<(char, Vec<usize>)> = Vec::new();
    for (i, &c) in inner_cmp.iter().enumerate() {
        match index_of.get(&c) {
            Some(&gi) => groups[gi].1.push(i),
            None => {
                index_of.insert(c, groups.len());
                groups.push((c, vec![i]));
            }
        }
    }
    groups
}

/// All non-decreasing sequences of length `k` drawn from indices `0..m`
/// (combinations with repetition).
fn combinations_with_repetition(m: usize, k: usize) -> Vec<Vec<usize>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if m == 0 {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    fn rec(start: usize, m: usize, k: usize, current: &mut Vec<usize>, result: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            result.push(current.clone());
            return;
        }
        for i in start..m {
            current.push(i);
            rec(i, m, k, current, result);
            current.pop();
        }
    }
    rec(0, m, k, &mut current, &mut result);
    result
}

struct GroupChoices {
    occ_positions: Vec<usize>,
    value_options: Vec<Vec<Option<usize>>>,
}

/// Explore every raw sequence consistent with `inner_cmp` and `inner_acc`
/// by backtracking over each distinct character's candidate assignments,
/// and keep the best `(sequence, subsequence)` pair by the spec's
/// tie-break: longest subsequence, then smallest sum of elements, then
/// first occurrence in enumeration order.
fn enumerate_and_select(
    inner_cmp: &[char],
    inner_acc: &[char],
    cap: Option<usize>,
) -> (Vec<Option<usize>>, Vec<usize>, usize) {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (i, &c) in inner_acc.iter().enumerate() {
        positions.entry(c).or_default().push(i);
    }

    let groups: Vec<GroupChoices> = char_groups(inner_cmp)
        .into_iter()
        .map(|(ch, occ_positions)| {
            let k = occ_positions.len();
            let value_options = match positions.get(&ch) {
                None => vec![vec![None; k]],
                Some(candidates) => combinations_with_repetition(candidates.len(), k)
                    .into_iter()
                    .map(|combo| combo.into_iter().map(|idx| Some(candidates[idx])).collect())
                    .collect(),
            };
            GroupChoices {
                occ_positions,
                value_options,
            }
        })
        .collect();

    let mut buffer: Vec<Option<usize>> = vec![None; inner_cmp.len()];
    let mut best: Option<(Vec<Option<usize>>, Vec<usize>)> = None;
    let mut seen: usize = 0;

    fn rec(
        gi: usize,
        groups: &[GroupChoices],
        buffer: &mut Vec<Option<usize>>,
        best: &mut Option<(Vec<Option<usize>>, Vec<usize>)>,
        cap: Option<usize>,
        seen: &mut usize,
    ) {
        if cap.is_some_and(|c| *seen >= c) {
            return;
        }
        if gi == groups.len() {
            *seen += 1;
            let values: Vec<usize> = buffer.iter().filter_map(|x| *x).collect();
            let candidate_subsequence = longest_increasing_subsequence(&values);
            let is_better = match best {
                None => true,
                Some((_, best_sub)) => {
                    if candidate_subsequence.len() != best_sub.len() {
                        candidate_subsequence.len() > best_sub.len()
                    } else {
                        candidate_subsequence.iter().sum::<usize>()
                            < best_sub.iter().sum::<usize>()
                    }
                }
            };
            if is_better {
                *best = Some((buffer.clone(), candidate_subsequence));
            }
            return;
        }
        for option in &groups[gi].value_options {
            for (k, &pos) in groups[gi].occ_positions.iter().enumerate() {
                buffer[pos] = option[k];
            }
            rec(gi + 1, groups, buffer, best, cap, seen);
            if cap.is_some_and(|c| *seen >= c) {
                return;
            }
        }
    }

    rec(0, &groups, &mut buffer, &mut best, cap, &mut seen);

    let (sequence, subsequence) = best.unwrap_or((vec![None; inner_cmp.len()], Vec::new()));
    (sequence, subsequence, seen)
}

/// Longest strictly-increasing subsequence of `values`, with ties broken
/// toward the smallest possible last element at each length — the
/// classic patience-sorting reconstruction already has this property.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    let mut tails: Vec<usize> = Vec::new();
    let mut parent: Vec<Option<usize>> = vec![None; values.len()];

    for (i, &x) in values.iter().enumerate() {
        let pos = tails.partition_point(|&ti| values[ti] < x);
        if pos > 0 {
            parent[i] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(i);
        } else {
            tails[pos] = i;
        }
    }

    let mut indices = Vec::new();
    let mut cursor = tails.last().copied();
    while let Some(idx) = cursor {
        indices.push(idx);
        cursor = parent[idx];
    }
    indices.reverse();
    indices.into_iter().map(|i| values[i]).collect()
}
