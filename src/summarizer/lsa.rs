//! Matrix-decomposition sentence ranking (latent semantic analysis)
//!
//! Builds the term-by-sentence count matrix `A`, takes the leading
//! eigenpairs of `AᵀA` (the squared singular values and right singular
//! vectors of `A`) by power iteration with deflation, and scores sentence `i`
//! as `sqrt(Σ_k σ_k² · v_k[i]²)`.

use std::collections::HashMap;

use super::top_indices;

const MIN_DIMENSIONS: usize = 3;
const POWER_ITERATIONS: usize = 200;
const CONVERGENCE: f64 = 1e-10;

fn term_counts(words: &[String]) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for word in words {
        *counts.entry(word.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

fn gram_matrix(sentence_words: &[Vec<String>]) -> Vec<Vec<f64>> {
    let vectors: Vec<HashMap<&str, f64>> = sentence_words.iter().map(|w| term_counts(w)).collect();
    let n = vectors.len();
    let mut gram = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let dot: f64 = vectors[i]
                .iter()
                .filter_map(|(term, a)| vectors[j].get(term).map(|b| a * b))
                .sum();
            gram[i][j] = dot;
            gram[j][i] = dot;
        }
    }
    gram
}

fn multiply(matrix: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
        .collect()
}

fn normalize(v: &mut [f64]) -> f64 {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
    norm
}

/// Leading eigenpair of a symmetric positive semi-definite matrix.
#[allow(clippy::cast_precision_loss)]
fn dominant_eigenpair(matrix: &[Vec<f64>]) -> Option<(f64, Vec<f64>)> {
    let n = matrix.len();
    let mut v: Vec<f64> = (0..n).map(|i| ((i + 1) as f64).sqrt()).collect();
    normalize(&mut v);

    for _ in 0..POWER_ITERATIONS {
        let mut next = multiply(matrix, &v);
        if normalize(&mut next) <= CONVERGENCE {
            return None;
        }
        let delta: f64 = next.iter().zip(&v).map(|(a, b)| (a - b).abs()).sum();
        v = next;
        if delta <= CONVERGENCE {
            break;
        }
    }

    let mv = multiply(matrix, &v);
    let eigenvalue: f64 = mv.iter().zip(&v).map(|(a, b)| a * b).sum();
    (eigenvalue > CONVERGENCE).then_some((eigenvalue, v))
}

/// Ranks sentences by their weight in the leading latent topics and returns
/// up to `limit` indices, best first.
#[must_use]
pub fn rank(sentence_words: &[Vec<String>], limit: usize) -> Vec<usize> {
    let n = sentence_words.len();
    let dimensions = limit.max(MIN_DIMENSIONS).min(n);
    let mut gram = gram_matrix(sentence_words);
    let mut scores = vec![0.0; n];

    for _ in 0..dimensions {
        let Some((eigenvalue, vector)) = dominant_eigenpair(&gram) else {
            break;
        };
        for (score, component) in scores.iter_mut().zip(&vector) {
            *score += eigenvalue * component * component;
        }
        for i in 0..n {
            for j in 0..n {
                gram[i][j] -= eigenvalue * vector[i] * vector[j];
            }
        }
    }

    let scores: Vec<f64> = scores.into_iter().map(f64::sqrt).collect();
    top_indices(&scores, limit)
}
