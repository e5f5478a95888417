//! # Validation Module
//!
//! Product form rules for the admin manager.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Product Form Rules                                 │
//! │                                                                         │
//! │  name      required, 3..=50 characters as typed, trimmed                │
//! │  price     required, whole number, positive, at least Rp1.000           │
//! │  stock     required, whole number, at least 0                           │
//! │  image     required, absolute http(s) URL                               │
//! │  category  "makanan" or "minuman" (English aliases accepted)            │
//! │                                                                         │
//! │  validate_product_form runs ALL rules and reports EVERY failing field.  │
//! │  A form with any failure produces no ProductDraft, so nothing is sent.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vending_core::validation::{validate_product_name, validate_price};
//!
//! assert!(validate_product_name("Teh Botol").is_ok());
//! assert!(validate_product_name("Aq").is_err());
//!
//! assert_eq!(validate_price("8000").unwrap().rupiah(), 8000);
//! assert!(validate_price("500").is_err());
//! ```

use url::Url;

use crate::error::{FieldErrors, ValidationError};
use crate::money::Money;
use crate::types::{Category, ProductDraft, ProductForm};
use crate::{MINIMUM_PRICE, MINIMUM_STOCK, PRODUCT_NAME_MAX_LENGTH, PRODUCT_NAME_MIN_LENGTH};

pub use crate::error::ValidationResult;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// Length is counted in characters, not bytes, so "Kopi Susu Gula Aren"
/// and names with accents measure the way a customer reads them. The
/// bounds apply to the name as typed, surrounding spaces included, so
/// `"  Aq  "` is long enough. A blank name is still required.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    let length = name.chars().count();

    if length < PRODUCT_NAME_MIN_LENGTH {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: PRODUCT_NAME_MIN_LENGTH,
        });
    }

    if length > PRODUCT_NAME_MAX_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: PRODUCT_NAME_MAX_LENGTH,
        });
    }

    Ok(name.trim().to_string())
}

/// Validates a price typed by an admin.
///
/// ## Example
/// ```rust
/// use vending_core::validation::validate_price;
///
/// assert!(validate_price("1000").is_ok());
/// assert!(validate_price("999").is_err());
/// assert!(validate_price("0").is_err());
/// assert!(validate_price("harga").is_err());
/// ```
pub fn validate_price(input: &str) -> ValidationResult<Money> {
    let value = parse_whole_number("price", input)?;

    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if value < MINIMUM_PRICE {
        return Err(ValidationError::BelowMinimum {
            field: "price".to_string(),
            min: MINIMUM_PRICE,
        });
    }

    Ok(Money::from_rupiah(value))
}

/// Validates a stock count typed by an admin.
pub fn validate_stock(input: &str) -> ValidationResult<u32> {
    let value = parse_whole_number("stock", input)?;

    if value < MINIMUM_STOCK {
        return Err(ValidationError::BelowMinimum {
            field: "stock".to_string(),
            min: MINIMUM_STOCK,
        });
    }

    u32::try_from(value).map_err(|_| ValidationError::InvalidFormat {
        field: "stock".to_string(),
        reason: "too large".to_string(),
    })
}

/// Validates a product image URL. Only absolute `http`/`https` URLs pass.
pub fn validate_image_url(input: &str) -> ValidationResult<String> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "image".to_string(),
        reason: "not a valid URL".to_string(),
    };

    let url = Url::parse(input).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }

    Ok(input.to_string())
}

/// Validates a category value.
pub fn validate_category(input: &str) -> ValidationResult<Category> {
    Category::parse(input).ok_or_else(|| ValidationError::NotAllowed {
        field: "category".to_string(),
        allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
    })
}

// =============================================================================
// Form Validator
// =============================================================================

/// Validates a whole product form.
///
/// Every field is checked; the error lists all failures in field order.
///
/// ## Example
/// ```rust
/// use vending_core::types::ProductForm;
/// use vending_core::validation::validate_product_form;
///
/// let form = ProductForm {
///     name: "Aq".into(),
///     price: "500".into(),
///     stock: "3".into(),
///     image: "https://example.com/aqua.jpg".into(),
///     category: "minuman".into(),
/// };
///
/// let errors = validate_product_form(&form).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert!(errors.get("name").is_some());
/// assert!(errors.get("price").is_some());
/// ```
pub fn validate_product_form(form: &ProductForm) -> Result<ProductDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = validate_product_name(&form.name).map_err(|e| errors.push(e)).ok();
    let price = validate_price(&form.price).map_err(|e| errors.push(e)).ok();
    let stock = validate_stock(&form.stock).map_err(|e| errors.push(e)).ok();
    let image = validate_image_url(&form.image).map_err(|e| errors.push(e)).ok();
    let category = validate_category(&form.category).map_err(|e| errors.push(e)).ok();

    match (name, price, stock, image, category) {
        (Some(name), Some(price), Some(stock), Some(image), Some(category)) => Ok(ProductDraft {
            name,
            price,
            stock,
            image,
            category,
        }),
        _ => Err(errors),
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_whole_number(field: &str, input: &str) -> ValidationResult<i64> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if let Ok(value) = input.parse::<i64>() {
        return Ok(value);
    }

    // "1.5" is a number but not a whole one; "abc" is not a number at all.
    let reason = if input.parse::<f64>().is_ok() {
        "must be a whole number"
    } else {
        "must be a number"
    };

    Err(ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Teh Botol".to_string(),
            price: "8000".to_string(),
            stock: "5".to_string(),
            image: "https://example.com/teh.jpg".to_string(),
            category: "minuman".to_string(),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("  Teh Botol  ").unwrap(), "Teh Botol");
        assert_eq!(validate_product_name("Abc").unwrap(), "Abc");
        assert!(matches!(
            validate_product_name("Aq"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(matches!(
            validate_product_name(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_product_name(&"a".repeat(50)).is_ok());
        assert!(matches!(
            validate_product_name(&"a".repeat(51)),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
    }

    #[test]
    fn test_name_length_counts_surrounding_spaces() {
        assert_eq!(validate_product_name("  Aq  ").unwrap(), "Aq");
        assert!(matches!(
            validate_product_name("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_product_name(&format!(" {} ", "a".repeat(49))),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price("1000").unwrap(), Money::from_rupiah(1000));
        assert!(matches!(
            validate_price("999"),
            Err(ValidationError::BelowMinimum { min: 1000, .. })
        ));
        assert!(matches!(
            validate_price("0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_price("-5000"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_price("murah"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(validate_price(""), Err(ValidationError::Required { .. })));
    }

    #[test]
    fn test_validate_stock() {
        assert_eq!(validate_stock("0").unwrap(), 0);
        assert_eq!(validate_stock(" 12 ").unwrap(), 12);
        assert!(matches!(
            validate_stock("-1"),
            Err(ValidationError::BelowMinimum { min: 0, .. })
        ));
        match validate_stock("1.5") {
            Err(ValidationError::InvalidFormat { reason, .. }) => {
                assert_eq!(reason, "must be a whole number")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://images.example.com/a.png").is_ok());
        assert!(validate_image_url("http://localhost:3000/a.png").is_ok());
        assert!(validate_image_url("bukan url").is_err());
        assert!(validate_image_url("ftp://example.com/a.png").is_err());
        assert!(matches!(
            validate_image_url("  "),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_category() {
        assert_eq!(validate_category("makanan").unwrap(), Category::Food);
        assert_eq!(validate_category("drink").unwrap(), Category::Drink);
        match validate_category("snack") {
            Err(ValidationError::NotAllowed { allowed, .. }) => {
                assert_eq!(allowed, vec!["makanan", "minuman"])
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_validate_product_form_ok() {
        let draft = validate_product_form(&valid_form()).unwrap();
        assert_eq!(draft.name, "Teh Botol");
        assert_eq!(draft.price, Money::from_rupiah(8000));
        assert_eq!(draft.stock, 5);
        assert_eq!(draft.category, Category::Drink);
    }

    #[test]
    fn test_validate_product_form_reports_every_field() {
        let form = ProductForm {
            name: "Aq".to_string(),
            price: "abc".to_string(),
            stock: "-2".to_string(),
            image: "not-a-url".to_string(),
            category: "snack".to_string(),
        };

        let errors = validate_product_form(&form).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["name", "price", "stock", "image", "category"]);
    }
}
