use serde::Deserialize;
use crate::error::AppError;

/// Capacity as the admin form sends it: a JSON number or the raw text of
/// the input box.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CapacityInput {
    Number(i64),
    Text(String),
}

/// `None`, an empty string and `0` mean unlimited.
pub fn parse_capacity(input: Option<&CapacityInput>) -> Result<Option<i32>, AppError> {
    let value = match input {
        None => return Ok(None),
        Some(CapacityInput::Number(n)) => *n,
        Some(CapacityInput::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<i64>()
                .map_err(|_| AppError::Validation("Kapasite bir sayı olmalıdır.".into()))?
        }
    };

    match value {
        0 => Ok(None),
        n if n < 0 => Err(AppError::Validation("Kapasite negatif olamaz.".into())),
        n => i32::try_from(n)
            .map(Some)
            .map_err(|_| AppError::Validation("Kapasite çok büyük.".into())),
    }
}
