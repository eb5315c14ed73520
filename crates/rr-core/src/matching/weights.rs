/// Fixed weights for the multi-factor scorer. They sum to exactly 1.00, so
/// the total score is a convex combination of bounded sub-scores.
pub const SCORING_WEIGHTS: Weights = Weights {
    education: 0.15,
    degree: 0.20,
    experience: 0.20,
    hard_skill: 0.30,
    soft_skill: 0.15,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub education: f64,
    pub degree: f64,
    pub experience: f64,
    pub hard_skill: f64,
    pub soft_skill: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.education + self.degree + self.experience + self.hard_skill + self.soft_skill
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((SCORING_WEIGHTS.sum() - 1.0).abs() < 1e-9);
    }
}
