use std::fmt;

use chrono::NaiveDate;

use super::product::Product;
use crate::error::FormError;

/// The editable fields of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Code,
    Name,
    Category,
    Price,
    Stock,
    Description,
    InputDate,
}

impl FormField {
    /// Form order, top to bottom.
    pub const ALL: [FormField; 7] = [
        FormField::Code,
        FormField::Name,
        FormField::Category,
        FormField::Price,
        FormField::Stock,
        FormField::Description,
        FormField::InputDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Code => "Product code",
            FormField::Name => "Product name",
            FormField::Category => "Category",
            FormField::Price => "Price",
            FormField::Stock => "Stock",
            FormField::Description => "Description",
            FormField::InputDate => "Input date",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FormField::Category | FormField::Description)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form input, held as typed until the form is submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub description: String,
    pub input_date: String,
}

impl ProductDraft {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Code => &self.code,
            FormField::Name => &self.name,
            FormField::Category => &self.category,
            FormField::Price => &self.price,
            FormField::Stock => &self.stock,
            FormField::Description => &self.description,
            FormField::InputDate => &self.input_date,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Code => &mut self.code,
            FormField::Name => &mut self.name,
            FormField::Category => &mut self.category,
            FormField::Price => &mut self.price,
            FormField::Stock => &mut self.stock,
            FormField::Description => &mut self.description,
            FormField::InputDate => &mut self.input_date,
        };
        *slot = value.into();
    }

    /// Applies the form's input constraints and builds the record to send.
    ///
    /// `include_code` is false in edit mode, where the code input is hidden and
    /// the caller supplies the locked code itself.
    pub fn validate(&self, include_code: bool) -> Result<Product, FormError> {
        for field in FormField::ALL {
            if field == FormField::Code && !include_code {
                continue;
            }
            if field.is_required() && self.get(field).trim().is_empty() {
                return Err(FormError::MissingField(field));
            }
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| FormError::InvalidNumber {
                field: FormField::Price,
                value: self.price.clone(),
            })?;
        if price < 0.0 {
            return Err(FormError::Negative {
                field: FormField::Price,
                value: self.price.clone(),
            });
        }

        let stock = parse_stock(&self.stock)?;

        let input_date = NaiveDate::parse_from_str(self.input_date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(FormField::InputDate, self.input_date.clone()))?;

        Ok(Product {
            code: self.code.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            price,
            stock,
            description: self.description.clone(),
            input_date: Some(input_date),
        })
    }
}

fn parse_stock(raw: &str) -> Result<i64, FormError> {
    match raw.trim().parse::<i64>() {
        Ok(stock) if stock >= 0 => Ok(stock),
        Ok(_) => Err(FormError::Negative {
            field: FormField::Stock,
            value: raw.to_string(),
        }),
        Err(_) => Err(FormError::InvalidNumber {
            field: FormField::Stock,
            value: raw.to_string(),
        }),
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            description: product.description.clone(),
            input_date: product
                .input_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}
