//! Core purchase domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::{Error, category::Categories};

/// An opaque, unique identifier for a purchase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(String);

impl PurchaseId {
    /// Generate a fresh, random purchase ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing ID, e.g. one read back from the database.
    pub fn new_unchecked(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for PurchaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PurchaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, non-empty purchase name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct PurchaseName(String);

impl PurchaseName {
    /// Create a purchase name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyPurchaseName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyPurchaseName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a purchase name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for PurchaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PurchaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that was bought: what it was, what it cost, what kind of
/// expense it was and when it happened.
///
/// Purchases are replaced wholesale when edited, the ID never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// The ID of the purchase.
    pub id: PurchaseId,
    /// What was bought.
    pub name: PurchaseName,
    /// How much was spent, never negative.
    pub amount: f64,
    /// The category label, e.g. "Alimentos".
    pub category: String,
    /// The day the purchase was made.
    pub date: Date,
}

impl Purchase {
    /// Combine an ID with the validated fields of a purchase.
    pub fn from_new(id: PurchaseId, new_purchase: NewPurchase) -> Self {
        Self {
            id,
            name: new_purchase.name,
            amount: new_purchase.amount,
            category: new_purchase.category,
            date: new_purchase.date,
        }
    }
}

/// The validated fields of a purchase that has not been assigned an ID yet.
///
/// Also used as the replacement fields when updating a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    /// What was bought.
    pub name: PurchaseName,
    /// How much was spent, never negative.
    pub amount: f64,
    /// One of the configured category labels.
    pub category: String,
    /// The day the purchase was made.
    pub date: Date,
}

impl NewPurchase {
    /// Validate the raw fields of a purchase.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [Error::EmptyPurchaseName] if `name` is empty or only whitespace,
    /// - [Error::InvalidAmount] if `amount` is negative, infinite or NaN,
    /// - or [Error::UnknownCategory] if `category` is not in `categories`.
    pub fn new(
        name: &str,
        amount: f64,
        category: &str,
        date: Date,
        categories: &Categories,
    ) -> Result<Self, Error> {
        let name = PurchaseName::new(name)?;

        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        if !categories.contains(category) {
            return Err(Error::UnknownCategory(category.to_owned()));
        }

        Ok(Self {
            name,
            amount,
            category: category.to_owned(),
            date,
        })
    }
}

/// The body of a request to create or replace a purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseForm {
    /// The purchase name, leading and trailing whitespace is trimmed.
    pub name: String,
    /// The amount spent.
    pub amount: f64,
    /// The category label.
    pub category: String,
    /// The date of the purchase as `YYYY-MM-DD`.
    pub date: Date,
}

impl PurchaseForm {
    /// Validate the form against the configured `categories`.
    ///
    /// # Errors
    ///
    /// See [NewPurchase::new].
    pub fn validate(&self, categories: &Categories) -> Result<NewPurchase, Error> {
        NewPurchase::new(
            &self.name,
            self.amount,
            &self.category,
            self.date,
            categories,
        )
    }
}


#[cfg(test)]
mod new_purchase_tests {
    use time::macros::date;

    use crate::{Error, category::Categories, purchase::NewPurchase};

    #[test]
    fn new_succeeds_on_valid_fields() {
        let categories = Categories::default();

        let purchase =
            NewPurchase::new("Milk", 3.5, "Alimentos", date!(2025 - 10 - 05), &categories)
                .expect("Could not create purchase");

        assert_eq!(purchase.name.as_ref(), "Milk");
        assert_eq!(purchase.amount, 3.5);
        assert_eq!(purchase.category, "Alimentos");
        assert_eq!(purchase.date, date!(2025 - 10 - 05));
    }

    #[test]
    fn new_accepts_zero_amount() {
        let categories = Categories::default();

        let purchase = NewPurchase::new("Gift", 0.0, "Otros", date!(2025 - 10 - 05), &categories);

        assert!(purchase.is_ok());
    }

    #[test]
    fn new_fails_on_negative_amount() {
        let categories = Categories::default();

        let purchase =
            NewPurchase::new("Milk", -1.0, "Alimentos", date!(2025 - 10 - 05), &categories);

        assert_eq!(purchase, Err(Error::InvalidAmount(-1.0)));
    }

    #[test]
    fn new_fails_on_non_finite_amount() {
        let categories = Categories::default();

        let purchase = NewPurchase::new(
            "Milk",
            f64::INFINITY,
            "Alimentos",
            date!(2025 - 10 - 05),
            &categories,
        );

        assert_eq!(purchase, Err(Error::InvalidAmount(f64::INFINITY)));
        assert!(
            NewPurchase::new("Milk", f64::NAN, "Alimentos", date!(2025 - 10 - 05), &categories)
                .is_err()
        );
    }

    #[test]
    fn new_fails_on_unknown_category() {
        let categories = Categories::default();

        let purchase =
            NewPurchase::new("Flight", 120.0, "Viajes", date!(2025 - 10 - 05), &categories);

        assert_eq!(purchase, Err(Error::UnknownCategory("Viajes".to_owned())));
    }

    #[test]
    fn new_fails_on_empty_name() {
        let categories = Categories::default();

        let purchase = NewPurchase::new(" ", 1.0, "Otros", date!(2025 - 10 - 05), &categories);

        assert_eq!(purchase, Err(Error::EmptyPurchaseName));
    }
}
