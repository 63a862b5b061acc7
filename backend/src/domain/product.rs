//! Product catalog data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned by the product draft constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    /// The name was empty once trimmed of whitespace.
    EmptyName,
    /// The price was zero, negative, or not a finite number.
    NonPositivePrice,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::NonPositivePrice => {
                write!(f, "product price must be a finite number greater than zero")
            }
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Stable product identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog product as stored.
///
/// `name` is unique across the catalog; the store adapter enforces the
/// constraint. Prices are plain `f64` currency amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    /// Unique display name.
    pub name: String,
    /// Unit price, strictly positive.
    pub price: f64,
    /// Creation timestamp, stamped by the store.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp, stamped by the store.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    price: f64,
}

impl ProductDraft {
    /// Validate a name/price pair.
    ///
    /// The name must be non-empty once trimmed; the price must be a finite
    /// number greater than zero. The name is stored as given, untrimmed.
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, ProductValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(ProductValidationError::NonPositivePrice);
        }
        Ok(Self { name, price })
    }

    /// The validated product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validated unit price.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Partial update for an existing product.
///
/// Absent fields keep their stored values. Construct via
/// [`ProductChanges::try_from_parts`] so present fields carry the same
/// validation as drafts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    name: Option<String>,
    price: Option<f64>,
}

impl ProductChanges {
    /// Validate an optional name/price pair.
    pub fn try_from_parts(
        name: Option<String>,
        price: Option<f64>,
    ) -> Result<Self, ProductValidationError> {
        if name.as_deref().map(str::trim).is_some_and(str::is_empty) {
            return Err(ProductValidationError::EmptyName);
        }
        if price.is_some_and(|price| !price.is_finite() || price <= 0.0) {
            return Err(ProductValidationError::NonPositivePrice);
        }
        Ok(Self { name, price })
    }

    /// Replacement name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replacement price, if any.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}

impl From<ProductDraft> for ProductChanges {
    fn from(draft: ProductDraft) -> Self {
        Self {
            name: Some(draft.name),
            price: Some(draft.price),
        }
    }
}
