use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{
    api::stores,
    documents::{Deal, FilterState, SortOption},
};

use super::currency;

/// Applies the platform filter, the display-price range and the selected
/// ordering to `deals`. Pure; ties keep their input order.
pub fn apply(deals: &[Deal], state: &FilterState) -> Vec<Deal> {
    let min_bound = parse_bound(state.min_price.as_deref()).unwrap_or(Decimal::ZERO);
    let max_bound = parse_bound(state.max_price.as_deref()).unwrap_or(Decimal::MAX);

    let mut deals: Vec<Deal> = deals
        .iter()
        .filter(|deal| match state.platform.store_name() {
            Some(name) => stores::name_for(&deal.store_id) == name,
            None => true,
        })
        .filter(|deal| {
            let price = currency::to_display(deal.sale_price);
            min_bound <= price && price <= max_bound
        })
        .cloned()
        .collect();

    match state.sort {
        SortOption::Price => deals.sort_by(|a, b| a.sale_price.cmp(&b.sale_price)),
        SortOption::Discount => deals.sort_by(|a, b| b.savings.cmp(&a.savings)),
        SortOption::Unsorted => {}
    }
    deals
}

/// Parses a user-typed price bound. Takes the leading numeric part of the
/// input so "12.5 eur" reads as 12.5; blank or non-numeric input yields None.
pub fn parse_bound(input: Option<&str>) -> Option<Decimal> {
    lazy_static! {
        static ref RE: Regex =
            Regex::new(r"^(?P<sign>[+-]?)(?P<int>\d*)(\.(?P<frac>\d*))?").unwrap();
    }

    let captures = RE.captures(input?.trim())?;
    let int = captures.name("int").map_or("", |m| m.as_str());
    let frac = captures.name("frac").map_or("", |m| m.as_str());
    if int.is_empty() && frac.is_empty() {
        return None;
    }

    let sign = match captures.name("sign").map(|m| m.as_str()) {
        Some("-") => "-",
        _ => "",
    };
    let int = if int.is_empty() { "0" } else { int };
    let frac = if frac.is_empty() { "0" } else { frac };
    Decimal::from_str(&format!("{sign}{int}.{frac}")).ok()
}
