use crate::error::ApiError;

/// Default and ceiling for a `limit` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitBounds {
    pub default: usize,
    pub max: usize,
}

pub const FIND_WORKERS: LimitBounds = LimitBounds { default: 20, max: 50 };
pub const RECOMMENDATIONS: LimitBounds = LimitBounds { default: 10, max: 30 };
pub const SKILL_SEARCH: LimitBounds = LimitBounds { default: 10, max: 50 };
pub const POPULAR_SKILLS: LimitBounds = LimitBounds { default: 20, max: 100 };
pub const RELATED_SKILLS: LimitBounds = LimitBounds { default: 10, max: 30 };

pub fn validate_limit(requested: Option<i64>, bounds: LimitBounds) -> Result<usize, ApiError> {
    let Some(limit) = requested else {
        return Ok(bounds.default);
    };

    let max = bounds.max as i64;
    if !(1..=max).contains(&limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {max}"
        )));
    }

    Ok(limit as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_limit_uses_default() {
        assert_eq!(validate_limit(None, FIND_WORKERS).unwrap(), 20);
        assert_eq!(validate_limit(None, POPULAR_SKILLS).unwrap(), 20);
    }

    #[test]
    fn limit_bounds_are_inclusive() {
        assert_eq!(validate_limit(Some(1), RECOMMENDATIONS).unwrap(), 1);
        assert_eq!(validate_limit(Some(30), RECOMMENDATIONS).unwrap(), 30);
        assert!(validate_limit(Some(31), RECOMMENDATIONS).is_err());
        assert!(validate_limit(Some(0), SKILL_SEARCH).is_err());
        assert!(validate_limit(Some(-4), RELATED_SKILLS).is_err());
    }
}
