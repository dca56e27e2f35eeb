use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::actor_framework::Entity;

/// A product record as stored by the catalog backend.
///
/// The JSON keys follow the backend's column names. Reads are lenient about
/// numeric strings, null text columns and timestamp-shaped dates, since SQL
/// drivers emit those for decimal and date columns. Range rules belong to the
/// form; a listed row is shown as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "kode_produk", alias = "code")]
    pub code: String,
    #[serde(rename = "nama_produk", alias = "name")]
    pub name: String,
    #[serde(rename = "kategori", alias = "category", default, deserialize_with = "nullable_text")]
    pub category: String,
    #[serde(rename = "harga", alias = "price", deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(rename = "stok", alias = "stock", deserialize_with = "lenient_stock")]
    pub stock: i64,
    #[serde(rename = "deskripsi", alias = "description", default, deserialize_with = "nullable_text")]
    pub description: String,
    #[serde(rename = "tanggal_input", alias = "input_date", default, deserialize_with = "lenient_date")]
    pub input_date: Option<NaiveDate>,
}

#[cfg(test)]
impl Product {
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category: String::new(),
            price,
            stock,
            description: String::new(),
            input_date: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_input_date(mut self, input_date: NaiveDate) -> Self {
        self.input_date = Some(input_date);
        self
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &String {
        &self.code
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

fn nullable_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    use serde::de::Error;

    let price = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.as_f64(),
        NumberOrText::Text(s) => s.trim().parse::<f64>().ok(),
    };
    price
        .filter(|p| p.is_finite())
        .ok_or_else(|| D::Error::custom("price is not a finite number"))
}

fn lenient_stock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    use serde::de::Error;

    let stock = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_number)),
        NumberOrText::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_number))
        }
    };
    stock.ok_or_else(|| D::Error::custom("stock is not an integer"))
}

// DECIMAL columns arrive as "7.00".
fn whole_number(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64).then(|| value as i64)
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    use serde::de::Error;

    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_wire_date(raw)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("unrecognized date: {:?}", raw)))
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DD HH:MM:SS`.
/// RFC 3339 timestamps are read as local time: a DATE column serialized by a
/// driver becomes local midnight shifted into UTC.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|ts| ts.date())
}
