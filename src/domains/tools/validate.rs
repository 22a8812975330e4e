//! Input validation for tool arguments.
//!
//! Every assertion here runs before any network call and returns an explicit
//! [`ValidationError`] carrying the fully-qualified path of the offending
//! field. Paths compose across nesting: an item failure inside an array is
//! reported as `services[1].tax_symbol`, never just `tax_symbol`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A single argument contract violation.
#[derive(Debug, Clone, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted/indexed path into the argument bag, e.g. `services[2].name`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type for validation checks.
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

/// Require a string that is non-empty after trimming.
pub fn require_non_empty(value: &str, field: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must be a non-empty string"));
    }
    Ok(())
}

/// Require a finite number strictly greater than zero.
pub fn require_positive(value: f64, field: &str) -> ValidationResult {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new(field, "must be a positive number"));
    }
    Ok(())
}

/// Require a finite number greater than or equal to zero.
pub fn require_non_negative(value: f64, field: &str) -> ValidationResult {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(field, "must be a non-negative number"));
    }
    Ok(())
}

/// Require a calendar-valid date in `YYYY-MM-DD` format.
///
/// The parsed date is formatted back and compared against the original
/// string, which rejects both shape violations ("2024-1-1") and impossible
/// dates chrono would refuse to construct ("2024-02-30", "2024-13-01").
pub fn require_date(value: &str, field: &str) -> ValidationResult {
    match chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) if date.format("%Y-%m-%d").to_string() == value => Ok(()),
        _ => Err(ValidationError::new(
            field,
            "must be a valid date in YYYY-MM-DD format",
        )),
    }
}

/// Require a `local@domain.tld`-shaped email address.
///
/// Intentionally permissive; this is a shape check, not RFC 5322.
pub fn require_email(value: &str, field: &str) -> ValidationResult {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !value.chars().any(char::is_whitespace)
                && value.matches('@').count() == 1
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::new(field, "must be a valid email address"));
    }
    Ok(())
}

/// Require a canonical UUID (8-4-4-4-12 hex groups, case-insensitive).
pub fn require_uuid(value: &str, field: &str) -> ValidationResult {
    const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

    let groups: Vec<&str> = value.split('-').collect();
    let valid = groups.len() == GROUP_LENGTHS.len()
        && groups
            .iter()
            .zip(GROUP_LENGTHS)
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(ValidationError::new(field, "must be a valid UUID"));
    }
    Ok(())
}

/// Require a purely numeric identifier.
///
/// Identifiers are interpolated into request paths, so anything beyond
/// ASCII digits (separators, traversal characters, query markers) is
/// rejected before a URL is ever built.
pub fn require_numeric_id(value: &str, field: &str) -> ValidationResult {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(field, "must be a numeric identifier"));
    }
    Ok(())
}

/// Require a URL-safe opaque token: letters, digits, `-`, `_`.
///
/// Same rationale as [`require_numeric_id`], for identifiers the remote
/// side issues as opaque strings.
pub fn require_token(value: &str, field: &str) -> ValidationResult {
    if value.is_empty()
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::new(
            field,
            "must contain only letters, digits, '-' or '_'",
        ));
    }
    Ok(())
}

/// Require membership in a fixed allowed-value set.
pub fn require_one_of(value: &str, allowed: &[&str], field: &str) -> ValidationResult {
    if !allowed.contains(&value) {
        return Err(ValidationError::new(
            field,
            format!("must be one of: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}

/// Require a present (non-None) optional value, narrowing to a reference.
pub fn require_present<'a, T>(value: &'a Option<T>, field: &str) -> ValidationResult<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ValidationError::new(field, "is required"))
}

/// Require a non-empty array and apply an item validator to every element.
///
/// The item validator reports fields relative to the item; failures are
/// re-wrapped as `field[index].inner` so paths compose across nesting.
pub fn require_items<T>(
    items: &[T],
    field: &str,
    mut check: impl FnMut(&T) -> ValidationResult,
) -> ValidationResult {
    if items.is_empty() {
        return Err(ValidationError::new(field, "must be a non-empty array"));
    }
    for (index, item) in items.iter().enumerate() {
        check(item).map_err(|e| {
            ValidationError::new(format!("{field}[{index}].{}", e.field), e.message)
        })?;
    }
    Ok(())
}

/// Validate pagination parameters.
///
/// `offset`, when present, must be non-negative. `limit`, when present, must
/// be positive and at most 100 — values above 100 fail explicitly rather
/// than being clamped.
pub fn validate_pagination(offset: Option<i64>, limit: Option<i64>) -> ValidationResult {
    if let Some(offset) = offset {
        if offset < 0 {
            return Err(ValidationError::new("offset", "must be a non-negative number"));
        }
    }
    if let Some(limit) = limit {
        if limit <= 0 {
            return Err(ValidationError::new("limit", "must be a positive number"));
        }
        if limit > 100 {
            return Err(ValidationError::new("limit", "must not exceed 100"));
        }
    }
    Ok(())
}

/// Drop null-valued keys from a parameter bag.
///
/// Used before building remote request bodies so optional fields the caller
/// left unset are not sent as empty filters.
pub fn sanitize(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter().filter(|(_, v)| !v.is_null()).collect()
}

// ============================================================================
// Line items (invoice services)
// ============================================================================

/// A VAT rate identifier, accepted as either a symbol string ("23", "zw")
/// or a bare numeric rate (23).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum TaxSymbol {
    Text(String),
    Rate(f64),
}

/// One invoice line item as supplied by the caller.
///
/// Prices are integer minor-unit amounts (grosze), passed to the API as
/// given.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ServiceInput {
    /// Name of the service or product being invoiced.
    pub name: String,

    /// VAT rate symbol, e.g. "23", "8", "zw", or a numeric rate.
    pub tax_symbol: TaxSymbol,

    /// Total net price in grosze.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_price: Option<f64>,

    /// Unit net price in grosze.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_net_price: Option<f64>,

    /// Total gross price in grosze.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_price: Option<f64>,

    /// Quantity of units (default 1 on the remote side).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

/// Per-item field checks, with item-relative field paths.
fn validate_service_fields(service: &ServiceInput) -> ValidationResult {
    require_non_empty(&service.name, "name")?;
    if let TaxSymbol::Text(symbol) = &service.tax_symbol {
        require_non_empty(symbol, "tax_symbol")?;
    }
    for (name, price) in [
        ("net_price", service.net_price),
        ("unit_net_price", service.unit_net_price),
        ("gross_price", service.gross_price),
    ] {
        if let Some(price) = price {
            require_non_negative(price, name)?;
        }
    }
    Ok(())
}

/// Validate a non-empty services array.
///
/// Each item must carry a non-empty name, a tax symbol, and at least one of
/// `net_price`, `unit_net_price`, `gross_price`. A missing-price failure is
/// attributed to the containing array field, not to a specific price field.
pub fn validate_services(services: &[ServiceInput], field: &str) -> ValidationResult {
    require_items(services, field, validate_service_fields)?;
    for (index, service) in services.iter().enumerate() {
        if service.net_price.is_none()
            && service.unit_net_price.is_none()
            && service.gross_price.is_none()
        {
            return Err(ValidationError::new(
                field,
                format!(
                    "service at index {index} must set at least one of \
                     net_price, unit_net_price, gross_price"
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service(net: Option<f64>, unit_net: Option<f64>, gross: Option<f64>) -> ServiceInput {
        ServiceInput {
            name: "Dev".to_string(),
            tax_symbol: TaxSymbol::Text("23".to_string()),
            net_price: net,
            unit_net_price: unit_net,
            gross_price: gross,
            quantity: None,
        }
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("ACME", "company_name").is_ok());
        assert!(require_non_empty("", "company_name").is_err());
        assert!(require_non_empty("   ", "company_name").is_err());
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive(1.0, "limit").is_ok());
        assert!(require_positive(0.0, "limit").is_err());
        assert!(require_positive(-1.0, "limit").is_err());
        assert!(require_positive(f64::NAN, "limit").is_err());
        assert!(require_positive(f64::INFINITY, "limit").is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative(0.0, "net_price").is_ok());
        assert!(require_non_negative(-0.5, "net_price").is_err());
    }

    #[test]
    fn test_require_date_valid() {
        assert!(require_date("2024-01-31", "paid_date").is_ok());
        // Leap year
        assert!(require_date("2024-02-29", "paid_date").is_ok());
    }

    #[test]
    fn test_require_date_invalid() {
        // Impossible day in February
        assert!(require_date("2024-02-30", "paid_date").is_err());
        // Non-leap year
        assert!(require_date("2023-02-29", "paid_date").is_err());
        // Impossible month
        assert!(require_date("2024-13-01", "paid_date").is_err());
        // Shape violations
        assert!(require_date("2024-1-01", "paid_date").is_err());
        assert!(require_date("24-01-01", "paid_date").is_err());
        assert!(require_date("2024/01/01", "paid_date").is_err());
        assert!(require_date("not a date", "paid_date").is_err());
    }

    #[test]
    fn test_require_email() {
        assert!(require_email("jan.kowalski@example.com", "email").is_ok());
        assert!(require_email("a@b.co", "email").is_ok());
        assert!(require_email("no-at-sign", "email").is_err());
        assert!(require_email("@example.com", "email").is_err());
        assert!(require_email("user@nodot", "email").is_err());
        assert!(require_email("user@@example.com", "email").is_err());
        assert!(require_email("user name@example.com", "email").is_err());
    }

    #[test]
    fn test_require_uuid() {
        assert!(require_uuid("5b11f4ce-a62d-471e-81fc-a69a8278c7da", "invoice_uuid").is_ok());
        assert!(require_uuid("5B11F4CE-A62D-471E-81FC-A69A8278C7DA", "invoice_uuid").is_ok());
        assert!(require_uuid("5b11f4ce-a62d-471e-81fc", "invoice_uuid").is_err());
        assert!(require_uuid("5b11f4ce_a62d_471e_81fc_a69a8278c7da", "invoice_uuid").is_err());
        assert!(require_uuid("not-a-uuid", "invoice_uuid").is_err());
        assert!(require_uuid("zb11f4ce-a62d-471e-81fc-a69a8278c7da", "invoice_uuid").is_err());
    }

    #[test]
    fn test_require_numeric_id() {
        assert!(require_numeric_id("42", "client_id").is_ok());
        assert!(require_numeric_id("007", "client_id").is_ok());
        assert!(require_numeric_id("", "client_id").is_err());
        assert!(require_numeric_id("42a", "client_id").is_err());
        assert!(require_numeric_id("-1", "client_id").is_err());
        // Path and query characters must never reach URL interpolation.
        assert!(require_numeric_id("42/pdf", "client_id").is_err());
        assert!(require_numeric_id("42?x=1", "client_id").is_err());
        assert!(require_numeric_id("../7", "client_id").is_err());
    }

    #[test]
    fn test_require_token() {
        assert!(require_token("abc123", "task_reference").is_ok());
        assert!(require_token("5b11f4ce-a62d", "task_reference").is_ok());
        assert!(require_token("ref_2024", "task_reference").is_ok());
        assert!(require_token("", "task_reference").is_err());
        assert!(require_token("a/b", "task_reference").is_err());
        assert!(require_token("a?b", "task_reference").is_err());
        assert!(require_token("a b", "task_reference").is_err());
        assert!(require_token("a#b", "task_reference").is_err());
    }

    #[test]
    fn test_require_one_of() {
        let allowed = ["transfer", "cash", "card"];
        assert!(require_one_of("cash", &allowed, "payment_method").is_ok());
        let err = require_one_of("bitcoin", &allowed, "payment_method").unwrap_err();
        assert!(err.message.contains("transfer, cash, card"));
    }

    #[test]
    fn test_require_present() {
        let some: Option<String> = Some("x".to_string());
        let none: Option<String> = None;
        assert_eq!(require_present(&some, "paid_date").unwrap(), "x");
        assert_eq!(require_present(&none, "paid_date").unwrap_err().field, "paid_date");
    }

    #[test]
    fn test_require_items_composes_paths() {
        let items = vec!["ok".to_string(), "".to_string()];
        let err = require_items(&items, "services", |item| require_non_empty(item, "name"))
            .unwrap_err();
        assert_eq!(err.field, "services[1].name");
    }

    #[test]
    fn test_require_items_rejects_empty() {
        let items: Vec<String> = vec![];
        let err = require_items(&items, "services", |_| Ok(())).unwrap_err();
        assert_eq!(err.field, "services");
    }

    #[test]
    fn test_pagination_limits() {
        assert!(validate_pagination(None, None).is_ok());
        assert!(validate_pagination(Some(0), Some(100)).is_ok());
        assert!(validate_pagination(Some(-1), None).is_err());
        assert!(validate_pagination(None, Some(0)).is_err());
        assert!(validate_pagination(None, Some(101)).is_err());
    }

    #[test]
    fn test_sanitize_drops_nulls() {
        let map = json!({"a": 1, "b": null, "c": "x"});
        let sanitized = sanitize(map.as_object().unwrap().clone());
        assert_eq!(sanitized.len(), 2);
        assert!(!sanitized.contains_key("b"));
    }

    #[test]
    fn test_service_gross_only_passes() {
        let services = vec![service(None, None, Some(12300.0))];
        assert!(validate_services(&services, "services").is_ok());
    }

    #[test]
    fn test_service_no_price_fails_at_array_field() {
        let services = vec![service(None, None, None)];
        let err = validate_services(&services, "services").unwrap_err();
        assert_eq!(err.field, "services");
        assert!(err.message.contains("index 0"));
    }

    #[test]
    fn test_service_negative_price_path() {
        let services = vec![
            service(Some(100.0), None, None),
            service(Some(-5.0), None, None),
        ];
        let err = validate_services(&services, "services").unwrap_err();
        assert_eq!(err.field, "services[1].net_price");
    }

    #[test]
    fn test_service_empty_name_path() {
        let mut item = service(Some(100.0), None, None);
        item.name = String::new();
        let err = validate_services(&[item], "services").unwrap_err();
        assert_eq!(err.field, "services[0].name");
    }

    #[test]
    fn test_tax_symbol_accepts_string_and_number() {
        let text: ServiceInput =
            serde_json::from_value(json!({"name": "Dev", "tax_symbol": "23", "net_price": 100}))
                .unwrap();
        assert!(matches!(text.tax_symbol, TaxSymbol::Text(_)));

        let rate: ServiceInput =
            serde_json::from_value(json!({"name": "Dev", "tax_symbol": 23, "net_price": 100}))
                .unwrap();
        assert!(matches!(rate.tax_symbol, TaxSymbol::Rate(_)));
    }
}
