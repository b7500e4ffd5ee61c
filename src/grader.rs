use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} answers, got {actual}")]
pub struct LengthMismatch {
    pub expected: usize,
    pub actual: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionResult {
    /// 1-indexed.
    pub position: usize,
    pub submitted: char,
    pub expected: char,
}

impl PositionResult {
    pub fn is_correct(&self) -> bool {
        self.submitted == self.expected
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeResult {
    positions: Vec<PositionResult>,
    correct: usize,
}

impl GradeResult {
    pub fn positions(&self) -> &[PositionResult] {
        &self.positions
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.positions.len()
    }

    pub fn percentage(&self) -> f64 {
        // an empty key scores zero
        if self.positions.is_empty() {
            return 0.0;
        }
        100.0 * self.correct as f64 / self.total() as f64
    }
}

/// Compares `submitted` against `key` symbol by symbol, ignoring case.
pub fn grade(submitted: &str, key: &str) -> Result<GradeResult, LengthMismatch> {
    let submitted: Vec<char> = submitted.to_uppercase().chars().collect();
    let key: Vec<char> = key.to_uppercase().chars().collect();

    if submitted.len() != key.len() {
        return Err(LengthMismatch {
            expected: key.len(),
            actual: submitted.len(),
        });
    }

    let positions: Vec<PositionResult> = submitted
        .into_iter()
        .zip(key)
        .enumerate()
        .map(|(i, (submitted, expected))| PositionResult {
            position: i + 1,
            submitted,
            expected,
        })
        .collect();
    let correct = positions.iter().filter(|p| p.is_correct()).count();

    Ok(GradeResult { positions, correct })
}
