use thiserror::Error;

const SUM_TOLERANCE: f64 = 1e-6;

/// Worker matching: skills first, then reputation, then bio text and track record.
pub const WORKER_MATCHING_WEIGHTS: WeightTable = WeightTable {
    name: "worker_matching",
    skill: 0.40,
    text: 0.20,
    rating: 0.25,
    experience: 0.15,
};

/// Worker ↔ project similarity: skill overlap plus bio/description text.
pub const SIMILARITY_WEIGHTS: WeightTable = WeightTable {
    name: "similarity",
    skill: 0.70,
    text: 0.30,
    rating: 0.0,
    experience: 0.0,
};

/// Project recommendation: skill overlap only.
pub const PROJECT_RECOMMENDATION_WEIGHTS: WeightTable = WeightTable {
    name: "project_recommendation",
    skill: 1.0,
    text: 0.0,
    rating: 0.0,
    experience: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable {
    pub name: &'static str,
    pub skill: f64,
    pub text: f64,
    pub rating: f64,
    pub experience: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightTableError {
    #[error("weight table {table}: coefficient {coefficient} must be finite and non-negative (got {value})")]
    InvalidCoefficient {
        table: &'static str,
        coefficient: &'static str,
        value: f64,
    },
    #[error("weight table {table}: coefficients must sum to 1.0 (got {sum:.6})")]
    SumMismatch { table: &'static str, sum: f64 },
}

impl WeightTable {
    pub fn sum(&self) -> f64 {
        self.skill + self.text + self.rating + self.experience
    }

    fn coefficients(&self) -> [(&'static str, f64); 4] {
        [
            ("skill", self.skill),
            ("text", self.text),
            ("rating", self.rating),
            ("experience", self.experience),
        ]
    }

    pub fn validate(&self) -> Result<(), WeightTableError> {
        for (coefficient, value) in self.coefficients() {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightTableError::InvalidCoefficient {
                    table: self.name,
                    coefficient,
                    value,
                });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(WeightTableError::SumMismatch {
                table: self.name,
                sum,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_sum_to_one() {
        for table in [
            WORKER_MATCHING_WEIGHTS,
            SIMILARITY_WEIGHTS,
            PROJECT_RECOMMENDATION_WEIGHTS,
        ] {
            assert!((table.sum() - 1.0).abs() < 1e-6, "{}", table.name);
            assert!(table.validate().is_ok());
        }
    }

    #[test]
    fn rejects_table_summing_to_point_nine() {
        let table = WeightTable {
            name: "short",
            skill: 0.4,
            text: 0.2,
            rating: 0.15,
            experience: 0.15,
        };

        match table.validate() {
            Err(WeightTableError::SumMismatch { table, sum }) => {
                assert_eq!(table, "short");
                assert!((sum - 0.9).abs() < 1e-9);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_coefficients_even_when_sum_is_one() {
        let table = WeightTable {
            name: "negative",
            skill: 1.2,
            text: -0.2,
            rating: 0.0,
            experience: 0.0,
        };

        assert!(matches!(
            table.validate(),
            Err(WeightTableError::InvalidCoefficient {
                coefficient: "text",
                ..
            })
        ));
    }
}
