use std::path::Path;

use crate::loader::{Cell, RowError};
use crate::models::RawRecord;
use crate::pipeline::PipelineError;

static EMPTY: Cell = Cell::Empty;

/// The columns every input must provide.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Column {
    Invoice,
    Sku,
    Description,
    Quantity,
    InvoiceDate,
    UnitPrice,
    CustomerId,
    Country
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Invoice,
        Column::Sku,
        Column::Description,
        Column::Quantity,
        Column::InvoiceDate,
        Column::UnitPrice,
        Column::CustomerId,
        Column::Country
    ];

    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Invoice => "InvoiceNo",
            Column::Sku => "StockCode",
            Column::Description => "Description",
            Column::Quantity => "Quantity",
            Column::InvoiceDate => "InvoiceDate",
            Column::UnitPrice => "UnitPrice",
            Column::CustomerId => "CustomerID",
            Column::Country => "Country"
        }
    }

    /// Accepted header spellings after normalization.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::Invoice => &["invoiceno", "invoice", "invoiceid", "invoicenumber"],
            Column::Sku => &["stockcode", "sku", "skucode"],
            Column::Description => &["description"],
            Column::Quantity => &["quantity", "qty"],
            Column::InvoiceDate => &["invoicedate", "invoicetimestamp", "date"],
            Column::UnitPrice => &["unitprice", "price"],
            Column::CustomerId => &["customerid", "customer"],
            Column::Country => &["country"]
        }
    }

    fn matches(&self, header: &str) -> bool {
        let normalized = normalize(header);
        self.aliases().contains(&normalized.as_str())
    }
}

/// Lowercases and drops everything but letters and digits, so `Unit Price`,
/// `unit_price` and `UnitPrice` all compare equal.
pub fn normalize(header: &str) -> String {
    header.chars()
        .filter(|character| character.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Position of every required column within a row.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    indices: [usize; 8]
}

impl ColumnMap {
    /// Locates every required column, failing with all missing names at once.
    pub fn resolve(headers: &[String], path: &Path) -> Result<Self, PipelineError> {
        let mut indices = [0; 8];
        let mut missing = Vec::new();

        for (slot, column) in Column::ALL.iter().enumerate() {
            match headers.iter().position(|header| column.matches(header)) {
                Some(index) => indices[slot] = index,
                None => missing.push(column.name().to_string())
            }
        }

        if !missing.is_empty() {
            return Err(PipelineError::missing_columns(path, missing));
        }

        Ok(Self { indices })
    }

    pub fn index_of(&self, column: Column) -> usize {
        self.indices[column as usize]
    }

    fn cell<'a>(&self, row: &'a [Cell], column: Column) -> &'a Cell {
        row.get(self.index_of(column)).unwrap_or(&EMPTY)
    }

    /// Converts one row into a raw record. Identifiers may be empty here; the
    /// cleaning stage decides what to do with them.
    pub fn parse_row(&self, row: &[Cell]) -> Result<RawRecord, RowError> {
        let quantity_cell = self.cell(row, Column::Quantity);
        let quantity = quantity_cell.as_quantity()
            .ok_or_else(|| RowError::invalid_value(Column::Quantity.name(), describe(quantity_cell)))?;

        let price_cell = self.cell(row, Column::UnitPrice);
        let unit_price = price_cell.as_decimal()
            .ok_or_else(|| RowError::invalid_value(Column::UnitPrice.name(), describe(price_cell)))?;

        let date_cell = self.cell(row, Column::InvoiceDate);
        let invoice_date = date_cell.as_datetime()
            .ok_or_else(|| RowError::invalid_value(Column::InvoiceDate.name(), describe(date_cell)))?;

        Ok(RawRecord {
            invoice: self.cell(row, Column::Invoice).as_text().unwrap_or_default(),
            sku: self.cell(row, Column::Sku).as_text().unwrap_or_default(),
            description: self.cell(row, Column::Description).as_text(),
            quantity,
            invoice_date,
            unit_price,
            customer_id: self.cell(row, Column::CustomerId).as_text(),
            country: self.cell(row, Column::Country).as_text().unwrap_or_default()
        })
    }
}

fn describe(cell: &Cell) -> String {
    cell.as_text().unwrap_or_else(|| "<empty>".to_string())
}
