//! Quality level and quality score computation
//!
//! Levels are derived from the complete review set every time, never
//! adjusted incrementally, so the outcome depends only on the reviews
//! themselves.

use crate::record::Review;
use sophia_domain::QualityLevel;

const EXPERT_MIN_REVIEWS: usize = 3;
const EXPERT_MIN_AVERAGE: f64 = 4.5;
const VALIDATED_MIN_REVIEWS: usize = 2;
const VALIDATED_MIN_AVERAGE: f64 = 4.0;
const REVIEWED_MIN_REVIEWS: usize = 1;
const REVIEWED_MIN_AVERAGE: f64 = 3.0;

const MAX_RATING: f64 = 5.0;

/// Mean rating of a review set, `None` when empty
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(total) / reviews.len() as f64)
}

/// Quality level implied by a review set
pub fn compute_quality_level(reviews: &[Review]) -> QualityLevel {
    let Some(average) = average_rating(reviews) else {
        return QualityLevel::Unverified;
    };
    let count = reviews.len();

    if count >= EXPERT_MIN_REVIEWS && average >= EXPERT_MIN_AVERAGE {
        QualityLevel::ExpertApproved
    } else if count >= VALIDATED_MIN_REVIEWS && average >= VALIDATED_MIN_AVERAGE {
        QualityLevel::Validated
    } else if count >= REVIEWED_MIN_REVIEWS && average >= REVIEWED_MIN_AVERAGE {
        QualityLevel::Reviewed
    } else {
        QualityLevel::Unverified
    }
}

/// Combined quality score in [0, 1]
///
/// Mean of up to three factors: the confidence score when present and
/// finite, the average rating divided by 5 when reviews exist, and the level
/// weight.
pub fn compute_quality_score(
    confidence: Option<f64>,
    reviews: &[Review],
    level: QualityLevel,
) -> f64 {
    let mut factors = Vec::with_capacity(3);

    if let Some(confidence) = confidence.filter(|c| c.is_finite()) {
        factors.push(confidence.clamp(0.0, 1.0));
    }
    if let Some(average) = average_rating(reviews) {
        factors.push(average / MAX_RATING);
    }
    factors.push(level.weight());

    let score = factors.iter().sum::<f64>() / factors.len() as f64;
    score.clamp(0.0, 1.0)
}
