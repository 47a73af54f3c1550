//! Landed-Cost Calculator
//!
//! Deterministic pipeline from quote inputs to a cost breakdown:
//! items subtotal → shipping → customs duty → local tax → handling fee →
//! gateway fee → insurance → order discount → totals.
//!
//! Uses rust_decimal for precise calculations, stores as f64.

use std::collections::HashMap;

use rust_decimal::prelude::*;

use shared::models::{
    Country, HandlingFeeType, OrderDiscount, PaymentGateway, QuoteBreakdown, QuoteItem,
    ShippingDiscount, ShippingMethod, BREAKDOWN_VERSION,
};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Fixed handling fee component in USD
const HANDLING_FEE_FIXED_USD: f64 = 10.0;

/// Percentage handling fee component (of items subtotal)
const HANDLING_FEE_PERCENT: f64 = 2.0;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Everything the calculator needs, resolved up-front by the caller
///
/// Reference data (destination rates, HSN rates, gateway fees, exchange
/// rate) is injected here instead of being looked up through globals, so
/// the calculation itself stays pure.
#[derive(Debug)]
pub struct CalculationInput<'a> {
    pub items: &'a [QuoteItem],
    /// Destination country row; `None` falls back to zero duty/tax with a warning
    pub destination: Option<&'a Country>,
    pub shipping_method: ShippingMethod,
    pub insurance_required: bool,
    pub handling_fee_type: HandlingFeeType,
    /// Selected gateway; `None` means no gateway fee yet
    pub gateway: Option<&'a PaymentGateway>,
    pub order_discount: Option<OrderDiscount>,
    pub shipping_discount: Option<ShippingDiscount>,
    /// Duty rate per HSN code, pre-resolved for the item set
    pub hsn_rates: &'a HashMap<String, f64>,
    /// Insurance rate from a previous breakdown, carried over on recalculation
    pub carried_insurance_rate: Option<f64>,
    /// Insurance rate when nothing is carried (config, default 1.5%)
    pub default_insurance_rate: f64,
    /// Customer display currency and the USD rate resolved for it
    pub customer_currency: &'a str,
    pub exchange_rate: f64,
}

/// Run the landed-cost pipeline
///
/// Invalid item rows (empty name, zero price) are skipped silently; they
/// are draft rows, not errors. The final total is floored at zero.
pub fn calculate(input: &CalculationInput<'_>) -> QuoteBreakdown {
    let hundred = Decimal::ONE_HUNDRED;

    let (default_duty_rate, tax_rate, tax_name) = match input.destination {
        Some(c) => (
            to_decimal(c.customs_default_rate),
            to_decimal(c.local_tax_rate),
            c.local_tax_name.clone(),
        ),
        None => {
            tracing::warn!("unknown destination country, duty and tax default to 0");
            (Decimal::ZERO, Decimal::ZERO, "Tax".to_string())
        }
    };

    // Step 1: items subtotal over calculable rows, per-item discounts applied
    let mut subtotal = Decimal::ZERO;
    let mut duty = Decimal::ZERO;
    let mut calculated_items: u32 = 0;
    for item in input.items.iter().filter(|i| i.is_calculable()) {
        let qty = Decimal::from(item.quantity);
        let line = to_decimal(item.unit_price_usd)
            * qty
            * (Decimal::ONE - to_decimal(item.discount_percentage) / hundred);
        subtotal += line;

        // Step 3 (per line): HSN override when opted in and resolvable
        let duty_rate = match (&item.hsn_code, item.use_hsn_rate) {
            (Some(code), true) => input
                .hsn_rates
                .get(code)
                .map(|r| to_decimal(*r))
                .unwrap_or(default_duty_rate),
            _ => default_duty_rate,
        };
        duty += line * duty_rate;
        calculated_items += 1;
    }

    // Step 2: weight-based shipping, discount applied after base shipping
    let rate_per_kg = to_decimal(input.shipping_method.rate_per_kg());
    let mut shipping_base = Decimal::ZERO;
    for item in input.items.iter().filter(|i| i.is_calculable()) {
        shipping_base += to_decimal(item.weight_kg) * Decimal::from(item.quantity) * rate_per_kg;
    }
    // Out-of-range discounts (over 100%, negative values) clamp to [0, base]
    let shipping = match input.shipping_discount {
        Some(ShippingDiscount::Percentage { value }) => {
            shipping_base * (Decimal::ONE - to_decimal(value) / hundred)
        }
        Some(ShippingDiscount::Fixed { amount }) => shipping_base - to_decimal(amount),
        Some(ShippingDiscount::Free) => Decimal::ZERO,
        None => shipping_base,
    }
    .clamp(Decimal::ZERO, shipping_base);

    // Step 4: local tax on (subtotal + duty)
    let local_tax = (subtotal + duty) * tax_rate;

    // Step 5: handling fee
    let handling_fee = match input.handling_fee_type {
        HandlingFeeType::None => Decimal::ZERO,
        HandlingFeeType::Fixed => to_decimal(HANDLING_FEE_FIXED_USD),
        HandlingFeeType::Percentage => subtotal * to_decimal(HANDLING_FEE_PERCENT) / hundred,
        HandlingFeeType::Both => {
            to_decimal(HANDLING_FEE_FIXED_USD) + subtotal * to_decimal(HANDLING_FEE_PERCENT) / hundred
        }
    };

    // Step 6: gateway fee on the running subtotal
    let running = subtotal + shipping + duty + local_tax + handling_fee;
    let gateway_fee = match input.gateway {
        Some(g) => running * to_decimal(g.fees.percent) / hundred + to_decimal(g.fees.fixed),
        None => Decimal::ZERO,
    };

    // Step 7: insurance on the items subtotal
    let insurance_rate = input
        .carried_insurance_rate
        .unwrap_or(input.default_insurance_rate);
    let insurance = if input.insurance_required {
        subtotal * to_decimal(insurance_rate)
    } else {
        Decimal::ZERO
    };

    // Step 8: order discount last, capped so the total never goes negative
    let before_discount = running + gateway_fee + insurance;
    let order_discount = match input.order_discount {
        Some(OrderDiscount::Percentage { value }) => {
            before_discount * to_decimal(value) / hundred
        }
        Some(OrderDiscount::Fixed { amount }) => to_decimal(amount),
        None => Decimal::ZERO,
    }
    .min(before_discount)
    .max(Decimal::ZERO);

    // Step 9: totals
    let total_usd = (before_discount - order_discount).max(Decimal::ZERO);

    // Step 10: customer currency conversion (rate resolved by the caller);
    // a missing rate falls back to 1:1 and the breakdown records the rate used
    let applied_rate = if input.exchange_rate > 0.0 {
        input.exchange_rate
    } else {
        1.0
    };
    let total_customer = total_usd * to_decimal(applied_rate);

    let effective_customs_rate = if subtotal.is_zero() {
        0.0
    } else {
        (duty / subtotal)
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or_default()
    };

    QuoteBreakdown {
        version: BREAKDOWN_VERSION,
        items_subtotal: to_f64(subtotal),
        shipping: to_f64(shipping),
        shipping_before_discount: to_f64(shipping_base),
        customs_duty: to_f64(duty),
        customs_rate: effective_customs_rate,
        local_tax: to_f64(local_tax),
        local_tax_name: tax_name,
        handling_fee: to_f64(handling_fee),
        gateway_fee: to_f64(gateway_fee),
        insurance: to_f64(insurance),
        insurance_rate,
        order_discount: to_f64(order_discount),
        total_usd: to_f64(total_usd),
        total_customer_currency: to_f64(total_customer),
        customer_currency: input.customer_currency.to_string(),
        exchange_rate: applied_rate,
        calculated_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{FeeSchedule, GatewayFlow};

    fn make_item(name: &str, price: f64, qty: u32, weight: f64) -> QuoteItem {
        QuoteItem {
            id: format!("item-{}", name),
            name: name.to_string(),
            quantity: qty,
            unit_price_usd: price,
            weight_kg: weight,
            hsn_code: None,
            use_hsn_rate: false,
            discount_percentage: 0.0,
        }
    }

    fn nepal() -> Country {
        Country {
            code: "NP".into(),
            name: "Nepal".into(),
            currency: "NPR".into(),
            symbol: "रू".into(),
            rate_from_usd: 132.5,
            customs_default_rate: 0.30,
            local_tax_rate: 0.13,
            local_tax_name: "VAT".into(),
            minimum_payment_amount: 10.0,
            shipping_allowed: true,
        }
    }

    fn base_input<'a>(
        items: &'a [QuoteItem],
        destination: Option<&'a Country>,
        hsn: &'a HashMap<String, f64>,
    ) -> CalculationInput<'a> {
        CalculationInput {
            items,
            destination,
            shipping_method: ShippingMethod::Standard,
            insurance_required: false,
            handling_fee_type: HandlingFeeType::None,
            gateway: None,
            order_discount: None,
            shipping_discount: None,
            hsn_rates: hsn,
            carried_insurance_rate: None,
            default_insurance_rate: 0.015,
            customer_currency: "NPR",
            exchange_rate: 132.5,
        }
    }

    #[test]
    fn test_subtotal_over_valid_items() {
        let items = vec![
            make_item("phone", 10.0, 2, 0.0),
            make_item("case", 5.0, 1, 0.0),
        ];
        let hsn = HashMap::new();
        let b = calculate(&base_input(&items, None, &hsn));
        assert_eq!(b.items_subtotal, 25.0);
        assert_eq!(b.calculated_items, 2);
    }

    #[test]
    fn test_invalid_items_skipped_silently() {
        let mut draft = make_item("", 10.0, 1, 0.0);
        draft.name = "".into();
        let zero_price = make_item("freebie", 0.0, 1, 0.0);
        let items = vec![draft, zero_price, make_item("phone", 10.0, 2, 0.0)];
        let hsn = HashMap::new();
        let b = calculate(&base_input(&items, None, &hsn));
        assert_eq!(b.items_subtotal, 20.0);
        assert_eq!(b.calculated_items, 1);
    }

    #[test]
    fn test_per_item_discount() {
        let mut item = make_item("shoes", 100.0, 1, 0.0);
        item.discount_percentage = 10.0;
        let items = vec![item];
        let hsn = HashMap::new();
        let b = calculate(&base_input(&items, None, &hsn));
        assert_eq!(b.items_subtotal, 90.0);
    }

    #[test]
    fn test_weight_based_shipping() {
        // 2 × 0.5kg × $12/kg = $12
        let items = vec![make_item("phone", 10.0, 2, 0.5)];
        let hsn = HashMap::new();
        let b = calculate(&base_input(&items, None, &hsn));
        assert_eq!(b.shipping, 12.0);
        assert_eq!(b.shipping_before_discount, 12.0);
    }

    #[test]
    fn test_shipping_discount_after_base() {
        let items = vec![make_item("phone", 10.0, 2, 0.5)];
        let hsn = HashMap::new();
        let mut input = base_input(&items, None, &hsn);
        input.shipping_discount = Some(ShippingDiscount::Percentage { value: 50.0 });
        let b = calculate(&input);
        assert_eq!(b.shipping_before_discount, 12.0);
        assert_eq!(b.shipping, 6.0);

        input.shipping_discount = Some(ShippingDiscount::Free);
        let b = calculate(&input);
        assert_eq!(b.shipping, 0.0);

        // Fixed discount larger than base never goes negative
        input.shipping_discount = Some(ShippingDiscount::Fixed { amount: 100.0 });
        let b = calculate(&input);
        assert_eq!(b.shipping, 0.0);
    }

    #[test]
    fn test_out_of_range_shipping_discount_is_clamped() {
        let items = vec![make_item("phone", 10.0, 2, 0.5)];
        let hsn = HashMap::new();
        let mut input = base_input(&items, None, &hsn);

        // Percentage above 100 floors shipping at zero instead of going negative
        input.shipping_discount = Some(ShippingDiscount::Percentage { value: 150.0 });
        let b = calculate(&input);
        assert_eq!(b.shipping_before_discount, 12.0);
        assert_eq!(b.shipping, 0.0);

        // Negative fixed amount never inflates shipping above base
        input.shipping_discount = Some(ShippingDiscount::Fixed { amount: -5.0 });
        let b = calculate(&input);
        assert_eq!(b.shipping, 12.0);

        // Negative percentage is capped at base too
        input.shipping_discount = Some(ShippingDiscount::Percentage { value: -25.0 });
        let b = calculate(&input);
        assert_eq!(b.shipping, 12.0);
    }

    #[test]
    fn test_duty_and_tax_for_destination() {
        // subtotal 20, duty 30% = 6, tax 13% of 26 = 3.38
        let items = vec![make_item("phone", 10.0, 2, 0.0)];
        let np = nepal();
        let hsn = HashMap::new();
        let b = calculate(&base_input(&items, Some(&np), &hsn));
        assert_eq!(b.customs_duty, 6.0);
        assert_eq!(b.local_tax, 3.38);
        assert_eq!(b.local_tax_name, "VAT");
    }

    #[test]
    fn test_hsn_rate_override() {
        // laptop opts into HSN 8471 at 5% instead of Nepal's 30%
        let mut laptop = make_item("laptop", 1000.0, 1, 0.0);
        laptop.hsn_code = Some("8471".into());
        laptop.use_hsn_rate = true;
        let items = vec![laptop];
        let np = nepal();
        let mut hsn = HashMap::new();
        hsn.insert("8471".to_string(), 0.05);
        let b = calculate(&base_input(&items, Some(&np), &hsn));
        assert_eq!(b.customs_duty, 50.0);
        assert_eq!(b.customs_rate, 0.05);
    }

    #[test]
    fn test_hsn_opt_in_without_resolution_uses_default() {
        let mut item = make_item("widget", 100.0, 1, 0.0);
        item.hsn_code = Some("0000".into());
        item.use_hsn_rate = true;
        let items = vec![item];
        let np = nepal();
        let hsn = HashMap::new();
        let b = calculate(&base_input(&items, Some(&np), &hsn));
        assert_eq!(b.customs_duty, 30.0);
    }

    #[test]
    fn test_unknown_destination_zero_rates() {
        let items = vec![make_item("phone", 10.0, 2, 0.0)];
        let hsn = HashMap::new();
        let b = calculate(&base_input(&items, None, &hsn));
        assert_eq!(b.customs_duty, 0.0);
        assert_eq!(b.local_tax, 0.0);
    }

    #[test]
    fn test_handling_fee_types() {
        let items = vec![make_item("phone", 100.0, 1, 0.0)];
        let hsn = HashMap::new();
        let mut input = base_input(&items, None, &hsn);

        input.handling_fee_type = HandlingFeeType::Fixed;
        assert_eq!(calculate(&input).handling_fee, 10.0);

        input.handling_fee_type = HandlingFeeType::Percentage;
        assert_eq!(calculate(&input).handling_fee, 2.0);

        input.handling_fee_type = HandlingFeeType::Both;
        assert_eq!(calculate(&input).handling_fee, 12.0);
    }

    #[test]
    fn test_gateway_fee_on_running_subtotal() {
        // subtotal 100, no other components: fee = 2.9% + 0.30 = 3.20
        let items = vec![make_item("phone", 100.0, 1, 0.0)];
        let hsn = HashMap::new();
        let gateway = PaymentGateway {
            id: "stripe".into(),
            name: "Stripe".into(),
            supported_countries: vec![],
            supported_currencies: vec![],
            fees: FeeSchedule { percent: 2.9, fixed: 0.30 },
            flow: GatewayFlow::Inline,
            is_active: true,
        };
        let mut input = base_input(&items, None, &hsn);
        input.gateway = Some(&gateway);
        let b = calculate(&input);
        assert_eq!(b.gateway_fee, 3.20);
    }

    #[test]
    fn test_insurance_default_and_carried_rate() {
        let items = vec![make_item("phone", 1000.0, 1, 0.0)];
        let hsn = HashMap::new();
        let mut input = base_input(&items, None, &hsn);
        input.insurance_required = true;
        let b = calculate(&input);
        assert_eq!(b.insurance, 15.0);
        assert_eq!(b.insurance_rate, 0.015);

        input.carried_insurance_rate = Some(0.02);
        let b = calculate(&input);
        assert_eq!(b.insurance, 20.0);
        assert_eq!(b.insurance_rate, 0.02);
    }

    #[test]
    fn test_total_never_negative_under_oversized_discount() {
        let items = vec![make_item("phone", 10.0, 1, 0.0)];
        let hsn = HashMap::new();
        let mut input = base_input(&items, None, &hsn);
        input.order_discount = Some(OrderDiscount::Fixed { amount: 500.0 });
        let b = calculate(&input);
        assert_eq!(b.total_usd, 0.0);
        // Discount actually applied is capped at the running total
        assert_eq!(b.order_discount, 10.0);
    }

    #[test]
    fn test_percentage_order_discount_applied_last() {
        // subtotal 100 + fixed handling 10 = 110, minus 10% = 99
        let items = vec![make_item("phone", 100.0, 1, 0.0)];
        let hsn = HashMap::new();
        let mut input = base_input(&items, None, &hsn);
        input.handling_fee_type = HandlingFeeType::Fixed;
        input.order_discount = Some(OrderDiscount::Percentage { value: 10.0 });
        let b = calculate(&input);
        assert_eq!(b.order_discount, 11.0);
        assert_eq!(b.total_usd, 99.0);
    }

    #[test]
    fn test_reference_example_us_to_nepal() {
        // items=[{price:10,qty:2}], US→NP, standard shipping, no discounts:
        // subtotal 20, shipping 0 (no weight), duty 6, tax 3.38 ⇒ 29.38
        let items = vec![make_item("phone", 10.0, 2, 0.0)];
        let np = nepal();
        let hsn = HashMap::new();
        let input = base_input(&items, Some(&np), &hsn);
        let first = calculate(&input);
        assert_eq!(first.total_usd, 29.38);
        assert_eq!(first.total_customer_currency, 3892.85);

        // Recalculation is idempotent
        let second = calculate(&input);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_exchange_rate_degrades_to_one_to_one() {
        let items = vec![make_item("phone", 10.0, 2, 0.0)];
        let hsn = HashMap::new();
        let mut input = base_input(&items, None, &hsn);
        input.exchange_rate = 0.0;
        let b = calculate(&input);
        assert_eq!(b.total_customer_currency, b.total_usd);
        // The breakdown records the rate actually applied, not the missing input
        assert_eq!(b.exchange_rate, 1.0);
    }

    #[test]
    fn test_breakdown_carries_current_version() {
        let items = vec![make_item("phone", 10.0, 1, 0.0)];
        let hsn = HashMap::new();
        let b = calculate(&base_input(&items, None, &hsn));
        assert!(b.is_current_version());
    }
}
