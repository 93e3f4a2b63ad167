use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// One row of the reading log, exactly as ingested.
///
/// Every field is kept as raw text; the layout core decides what is usable.
pub struct BookRecord {
    pub title: String,
    pub author: String,
    /// The reader's own rating.
    #[serde(default)]
    pub rating: String,
    /// Community average rating.
    #[serde(default)]
    pub avg_rating: String,
    /// When reading started.
    #[serde(default)]
    pub start_date_raw: String,
    /// When reading finished.
    #[serde(default)]
    pub end_date_raw: String,
}

impl BookRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        start_date_raw: impl Into<String>,
        end_date_raw: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            start_date_raw: start_date_raw.into(),
            end_date_raw: end_date_raw.into(),
            ..Self::default()
        }
    }

    pub fn with_ratings(mut self, rating: impl Into<String>, avg_rating: impl Into<String>) -> Self {
        self.rating = rating.into();
        self.avg_rating = avg_rating.into();
        self
    }

    /// Numeric rating, if the cell holds a number.
    pub fn rating_value(&self) -> Option<f64> {
        self.rating.trim().parse().ok()
    }

    /// Numeric average rating, if the cell holds a number.
    pub fn avg_rating_value(&self) -> Option<f64> {
        self.avg_rating.trim().parse().ok()
    }
}
