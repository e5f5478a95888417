//! # Domain Types
//!
//! Wire types shared between the kiosk and the REST data store.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   Transaction   │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (RecordId)  │   │  id (RecordId)  │   │  Food "makanan" │       │
//! │  │  name           │   │  productId      │   │  Drink "minuman"│       │
//! │  │  price (Money)  │   │  productName    │   └─────────────────┘       │
//! │  │  stock (u32)    │   │  price          │                             │
//! │  │  image (URL)    │   │  moneyInserted  │                             │
//! │  │  category       │   │  change         │                             │
//! │  └─────────────────┘   │  timestamp      │                             │
//! │                        └─────────────────┘                             │
//! │                                                                         │
//! │  Write shapes:                                                          │
//! │    ProductForm  ──validate──► ProductDraft   (POST /products, PUT)     │
//! │    ProductPatch                              (PATCH /products/:id)     │
//! │    NewTransaction                            (POST /transactions)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids are assigned by the store. json-server v0 hands out numbers, v1 hands
//! out strings, so [`RecordId`] accepts both and writes back what it read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Record Id
// =============================================================================

/// Store-assigned identifier of a product or transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl RecordId {
    /// Returns the id as it appears in a URL path segment.
    pub fn as_path_segment(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<u64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(trimmed.to_string()),
        })
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl RecordId {
    /// Compares ids by their textual form, so `1` and `"1"` are the same record.
    pub fn same_as(&self, other: &RecordId) -> bool {
        self.to_string() == other.to_string()
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category.
///
/// Stored as the Indonesian words the data set uses. The English names are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[serde(rename = "makanan", alias = "food")]
    Food,
    #[serde(rename = "minuman", alias = "drink")]
    Drink,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Food, Category::Drink];

    /// Wire value of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "makanan",
            Category::Drink => "minuman",
        }
    }

    /// Parses a wire value or its English alias, case-insensitively.
    pub fn parse(value: &str) -> Option<Category> {
        match value.trim().to_lowercase().as_str() {
            "makanan" | "food" => Some(Category::Food),
            "minuman" | "drink" => Some(Category::Drink),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    #[ts(type = "number | string")]
    pub id: RecordId,

    /// Display name, 3 to 50 characters.
    pub name: String,

    /// Price in rupiah, at least Rp1.000 when set by an admin.
    pub price: Money,

    /// Units left. Never negative.
    pub stock: u32,

    /// Image URL shown on the product card.
    pub image: String,

    pub category: Category,
}

impl Product {
    /// A product can be selected only while it has stock.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Pre-fills an admin form with this product's current fields.
    pub fn to_form(&self) -> ProductForm {
        ProductForm {
            name: self.name.clone(),
            price: self.price.rupiah().to_string(),
            stock: self.stock.to_string(),
            image: self.image.clone(),
            category: self.category.as_str().to_string(),
        }
    }
}

/// Looks a product up by id in a fetched list. `1` and `"1"` match.
pub fn find_product<'a>(products: &'a [Product], id: &RecordId) -> CoreResult<&'a Product> {
    products
        .iter()
        .find(|p| p.id.same_as(id))
        .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
}

// =============================================================================
// Product Write Shapes
// =============================================================================

/// Raw admin input, exactly as typed.
///
/// Numbers stay strings here so that "abc" and "1.5" can be reported as
/// field errors instead of failing to parse somewhere upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub image: String,
    pub category: String,
}

/// Validated product fields without an id.
///
/// Only [`crate::validation::validate_product_form`] builds one from user
/// input; it is the body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub stock: u32,
    pub image: String,
    pub category: Category,
}

impl ProductDraft {
    /// Attaches an id, producing the full product sent by `PUT`.
    pub fn into_product(self, id: RecordId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            stock: self.stock,
            image: self.image,
            category: self.category,
        }
    }
}

/// Partial product update. Only the fields that are set are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub price: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub stock: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub category: Option<Category>,
}

impl ProductPatch {
    /// A patch that only sets `stock`.
    pub fn stock(stock: u32) -> Self {
        ProductPatch {
            stock: Some(stock),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.image.is_none()
            && self.category.is_none()
    }

    /// Applies the set fields to `product`, the way the store merges a PATCH.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(image) = &self.image {
            product.image = image.clone();
        }
        if let Some(category) = self.category {
            product.category = category;
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed purchase. Append-only; never edited after creation.
///
/// ## Invariant
/// `money_inserted >= price` and `change == money_inserted - price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Transaction {
    #[ts(type = "number | string")]
    pub id: RecordId,

    #[ts(type = "number | string")]
    pub product_id: RecordId,

    pub product_name: String,

    pub price: Money,

    pub money_inserted: Money,

    pub change: Money,

    /// ISO-8601 time of purchase.
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

/// Transaction fields without an id; the body of `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewTransaction {
    #[ts(type = "number | string")]
    pub product_id: RecordId,

    pub product_name: String,

    pub price: Money,

    pub money_inserted: Money,

    pub change: Money,

    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl NewTransaction {
    /// Attaches the id the store assigned.
    pub fn into_transaction(self, id: RecordId) -> Transaction {
        Transaction {
            id,
            product_id: self.product_id,
            product_name: self.product_name,
            price: self.price,
            money_inserted: self.money_inserted,
            change: self.change,
            timestamp: self.timestamp,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
