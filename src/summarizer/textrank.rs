//! Graph-centrality sentence ranking
//!
//! Sentences are nodes; edge weights are normalized word overlap. Scores come
//! from weighted PageRank with uniform redistribution of dangling mass.

use std::collections::HashSet;

use super::top_indices;

const DAMPING: f64 = 0.85;
const MAX_ITERATIONS: usize = 100;
const THRESHOLD: f64 = 1e-6;

/// Overlap similarity from the original TextRank paper:
/// `|a ∩ b| / (ln|a| + ln|b|)`.
#[allow(clippy::cast_precision_loss)]
fn similarity(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let set_a: HashSet<&String> = a.iter().collect();
    let overlap = b.iter().collect::<HashSet<_>>().intersection(&set_a).count();
    if overlap == 0 {
        return 0.0;
    }
    let norm = (a.len() as f64).ln() + (b.len() as f64).ln();
    if norm <= f64::EPSILON {
        overlap as f64
    } else {
        overlap as f64 / norm
    }
}

#[allow(clippy::cast_precision_loss)]
fn pagerank(weights: &[Vec<f64>]) -> Vec<f64> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }

    let out_weight: Vec<f64> = weights.iter().map(|row| row.iter().sum()).collect();
    let teleport = (1.0 - DAMPING) / n as f64;
    let mut scores = vec![1.0 / n as f64; n];
    let mut next = vec![0.0; n];

    for _ in 0..MAX_ITERATIONS {
        let dangling_mass: f64 = (0..n)
            .filter(|&i| out_weight[i] <= 0.0)
            .map(|i| scores[i])
            .sum();
        next.fill(teleport + DAMPING * dangling_mass / n as f64);

        for (node, row) in weights.iter().enumerate() {
            if out_weight[node] <= 0.0 {
                continue;
            }
            for (neighbor, &w) in row.iter().enumerate() {
                if w > 0.0 {
                    next[neighbor] += DAMPING * scores[node] * w / out_weight[node];
                }
            }
        }

        let delta: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut scores, &mut next);
        if delta <= THRESHOLD {
            break;
        }
    }

    scores
}

/// Ranks sentences by centrality and returns up to `limit` indices, best first.
#[must_use]
pub fn rank(sentence_words: &[Vec<String>], limit: usize) -> Vec<usize> {
    let n = sentence_words.len();
    let mut weights = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let sim = similarity(&sentence_words[i], &sentence_words[j]);
            weights[i][j] = sim;
            weights[j][i] = sim;
        }
    }
    top_indices(&pagerank(&weights), limit)
}
