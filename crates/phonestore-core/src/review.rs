use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Maximum number of photos attached to one review.
pub const MAX_REVIEW_IMAGES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    /// Star rating, `1..=5`.
    pub rating: u8,
    pub comment: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Star distribution for a product's reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    /// Count per star, index 0 = one star.
    pub counts: [u32; 5],
    pub total: u32,
    pub average: f64,
}

impl ReviewStats {
    /// Computes stats locally; out-of-range ratings are ignored.
    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut stats = Self::default();
        let mut sum = 0u32;
        for review in reviews {
            if !(1..=5).contains(&review.rating) {
                continue;
            }
            stats.counts[usize::from(review.rating - 1)] += 1;
            stats.total += 1;
            sum += u32::from(review.rating);
        }
        if stats.total > 0 {
            stats.average = f64::from(sum) / f64::from(stats.total);
        }
        stats
    }

    #[must_use]
    pub fn count(&self, star: u8) -> u32 {
        match star {
            1..=5 => self.counts[usize::from(star - 1)],
            _ => 0,
        }
    }

    /// Share of reviews with `star` stars, `0.0..=100.0`.
    #[must_use]
    pub fn percentage(&self, star: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.count(star)) / f64::from(self.total) * 100.0
    }

    /// Average formatted to one decimal, `"0.0"` without reviews.
    #[must_use]
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average)
    }
}

/// Reviews of one product with their star distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductReviews {
    pub reviews: Vec<Review>,
    pub stats: ReviewStats,
}

/// A review being written on the product page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
    pub name: String,
    pub phone: String,
    pub images: Vec<String>,
}

impl ReviewDraft {
    /// Keeps only the digits of a phone number as typed.
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = raw.chars().filter(char::is_ascii_digit).collect();
    }

    /// # Errors
    ///
    /// - [`CoreError::TooManyImages`] with more than [`MAX_REVIEW_IMAGES`] photos.
    /// - [`CoreError::InvalidRating`] outside `1..=5`.
    /// - [`CoreError::MissingField`] for a blank name, phone, or comment.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.images.len() > MAX_REVIEW_IMAGES {
            return Err(CoreError::TooManyImages {
                count: self.images.len(),
                max: MAX_REVIEW_IMAGES,
            });
        }
        if !(1..=5).contains(&self.rating) {
            return Err(CoreError::InvalidRating(self.rating));
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::MissingField("name"));
        }
        if self.phone.is_empty() {
            return Err(CoreError::MissingField("phone"));
        }
        if self.comment.trim().is_empty() {
            return Err(CoreError::MissingField("comment"));
        }
        Ok(())
    }
}
