//! Request payload validation
//!
//! Country-specific address shapes (most destinations use a flat
//! line1/city/postal shape; Nepal addresses are hierarchical with no
//! postal code) and discount range checks for quote updates.

use shared::models::{DeliveryAddressCreate, QuoteUpdate};
use shared::ApiError;

/// Nepal's seven provinces
const NEPAL_PROVINCES: [&str; 7] = [
    "Koshi",
    "Madhesh",
    "Bagmati",
    "Gandaki",
    "Lumbini",
    "Karnali",
    "Sudurpashchim",
];

/// Reject out-of-range discount values before they reach the calculator
pub fn validate_discounts(data: &QuoteUpdate) -> Result<(), ApiError> {
    if data.order_discount.is_some_and(|d| !d.is_in_range()) {
        return Err(ApiError::validation(
            "order_discount percentage must be 0-100 and amounts non-negative",
        ));
    }
    if data.shipping_discount.is_some_and(|d| !d.is_in_range()) {
        return Err(ApiError::validation(
            "shipping_discount percentage must be 0-100 and amounts non-negative",
        ));
    }
    Ok(())
}

/// Validate the country-specific shape of an address payload
pub fn validate_address_shape(data: &DeliveryAddressCreate) -> Result<(), ApiError> {
    if data.country.eq_ignore_ascii_case("NP") {
        validate_nepal(data)
    } else {
        validate_flat(data)
    }
}

fn validate_nepal(data: &DeliveryAddressCreate) -> Result<(), ApiError> {
    let province = data
        .province
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::validation("province is required for Nepal addresses"))?;
    if !NEPAL_PROVINCES
        .iter()
        .any(|p| p.eq_ignore_ascii_case(province))
    {
        return Err(ApiError::validation(format!(
            "unknown Nepal province: {}",
            province
        )));
    }
    if data.district.as_deref().map_or(true, |d| d.trim().is_empty()) {
        return Err(ApiError::validation("district is required for Nepal addresses"));
    }
    if data
        .municipality
        .as_deref()
        .map_or(true, |m| m.trim().is_empty())
    {
        return Err(ApiError::validation(
            "municipality is required for Nepal addresses",
        ));
    }
    match data.ward {
        Some(w) if (1..=35).contains(&w) => Ok(()),
        Some(w) => Err(ApiError::validation(format!("ward {} out of range", w))),
        None => Err(ApiError::validation("ward is required for Nepal addresses")),
    }
}

fn validate_flat(data: &DeliveryAddressCreate) -> Result<(), ApiError> {
    if data.line1.as_deref().map_or(true, |l| l.trim().is_empty()) {
        return Err(ApiError::validation("line1 is required"));
    }
    if data.city.as_deref().map_or(true, |c| c.trim().is_empty()) {
        return Err(ApiError::validation("city is required"));
    }
    if data
        .postal_code
        .as_deref()
        .map_or(true, |p| p.trim().is_empty())
    {
        return Err(ApiError::validation("postal_code is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderDiscount, ShippingDiscount};

    #[test]
    fn test_discounts_outside_range_are_rejected() {
        let mut update = QuoteUpdate {
            shipping_discount: Some(ShippingDiscount::Percentage { value: 150.0 }),
            ..Default::default()
        };
        assert!(validate_discounts(&update).is_err());

        update.shipping_discount = Some(ShippingDiscount::Fixed { amount: -5.0 });
        assert!(validate_discounts(&update).is_err());

        update.shipping_discount = Some(ShippingDiscount::Percentage { value: 50.0 });
        update.order_discount = Some(OrderDiscount::Percentage { value: 101.0 });
        assert!(validate_discounts(&update).is_err());

        update.order_discount = Some(OrderDiscount::Fixed { amount: 20.0 });
        assert!(validate_discounts(&update).is_ok());
    }

    fn base(country: &str) -> DeliveryAddressCreate {
        DeliveryAddressCreate {
            user_id: "u1".into(),
            recipient_name: "Asha".into(),
            phone: "+9779800000000".into(),
            country: country.into(),
            line1: None,
            line2: None,
            city: None,
            postal_code: None,
            province: None,
            district: None,
            municipality: None,
            ward: None,
            is_default: false,
        }
    }

    #[test]
    fn test_flat_address_requires_line1_city_postal() {
        let mut a = base("US");
        assert!(validate_address_shape(&a).is_err());
        a.line1 = Some("1 Main St".into());
        a.city = Some("Portland".into());
        a.postal_code = Some("97201".into());
        assert!(validate_address_shape(&a).is_ok());
    }

    #[test]
    fn test_nepal_requires_hierarchical_fields() {
        let mut a = base("NP");
        assert!(validate_address_shape(&a).is_err());
        a.province = Some("Bagmati".into());
        a.district = Some("Kathmandu".into());
        a.municipality = Some("Kathmandu Metropolitan".into());
        a.ward = Some(10);
        assert!(validate_address_shape(&a).is_ok());
    }

    #[test]
    fn test_nepal_rejects_unknown_province_and_bad_ward() {
        let mut a = base("NP");
        a.province = Some("Atlantis".into());
        a.district = Some("Kathmandu".into());
        a.municipality = Some("Kathmandu Metropolitan".into());
        a.ward = Some(10);
        assert!(validate_address_shape(&a).is_err());

        a.province = Some("Bagmati".into());
        a.ward = Some(99);
        assert!(validate_address_shape(&a).is_err());
    }
}
