use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowError {
    #[error("Invalid {column} value [{value}]")]
    InvalidValue {
        column: &'static str,
        value: String
    }
}

impl RowError {
    pub fn invalid_value(column: &'static str, value: impl ToString) -> Self {
        Self::InvalidValue { column, value: value.to_string() }
    }
}
