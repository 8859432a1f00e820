use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A single store listing for a game as returned by the deals API.
///
/// Field names follow the remote API so that persisted favorites decode with
/// the same type. Missing fields fall back to defaults.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
#[serde(default)]
pub struct Deal {
    #[serde(rename = "gameID", deserialize_with = "string_or_number")]
    pub game_id: String,

    #[serde(rename = "dealID")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub deal_id: String,

    pub title: String,

    #[serde(rename = "storeID", deserialize_with = "string_or_number")]
    pub store_id: String,

    #[serde(rename = "salePrice")]
    pub sale_price: Decimal,

    #[serde(rename = "normalPrice")]
    pub normal_price: Decimal,

    #[serde(rename = "isOnSale", deserialize_with = "flag")]
    pub is_on_sale: bool,

    pub savings: Decimal,

    pub thumb: String,
}

/// The API encodes ids as strings, but numbers show up for some endpoints.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

/// Accepts `"1"`/`"0"` flags as sent by the API as well as plain booleans.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Number(value) => value != 0,
        Flag::Text(text) => text == "1" || text.eq_ignore_ascii_case("true"),
    })
}
