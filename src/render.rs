//! Plain-text rendering of the product table.

use chrono::NaiveDate;

use crate::domain::Product;

pub const EMPTY_TABLE: &str = "No product data yet";

const HEADERS: [&str; 7] = [
    "Code",
    "Name",
    "Category",
    "Price",
    "Stock",
    "Description",
    "Input Date",
];

/// Rupiah with `.` grouping and `,` decimals, e.g. `Rp 1.500,5`.
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("Rp {}{}", sign, grouped),
        f if f % 10 == 0 => format!("Rp {}{},{}", sign, grouped, f / 10),
        f => format!("Rp {}{},{:02}", sign, grouped, f),
    }
}

/// Day/month/year without padding; `-` when the row has no date.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%-d/%-m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn cells(product: &Product) -> [String; 7] {
    [
        product.code.clone(),
        product.name.clone(),
        product.category.clone(),
        format_price(product.price),
        product.stock.to_string(),
        product.description.clone(),
        format_date(product.input_date),
    ]
}

/// Renders the rows as an aligned table, in server order.
pub fn render_table(products: &[Product]) -> String {
    let rows: Vec<[String; 7]> = products.iter().map(cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |values: &[String]| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(widths.iter())
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect();
        format!("| {} |", padded.join(" | "))
    };
    let rule = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(rule.clone());
    out.push(line(&HEADERS.map(String::from)));
    out.push(rule.clone());
    if rows.is_empty() {
        out.push(EMPTY_TABLE.to_string());
    }
    for row in &rows {
        out.push(line(row));
    }
    out.push(rule);
    out.join("\n")
}
