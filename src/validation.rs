// Copyright 2025 Cowboy AI, LLC.

//! Argument checks shared by the catalog entity setters

use crate::errors::{CatalogError, CatalogResult};

/// Reject empty or whitespace-only input.
pub fn not_blank(entity: &str, field: &str, value: &str) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::invalid_argument(
            field,
            format!("{entity} {field} can not be null, empty or white space"),
        ));
    }
    Ok(())
}

/// Reject input longer than `max` characters.
pub fn max_length(entity: &str, field: &str, value: &str, max: usize) -> CatalogResult<()> {
    if value.chars().count() > max {
        return Err(CatalogError::invalid_argument(
            field,
            format!("{entity} {field} can not be longer than {max}"),
        ));
    }
    Ok(())
}

/// Required text: not blank and at most `max` characters.
pub fn required_text(entity: &str, field: &str, value: String, max: usize) -> CatalogResult<String> {
    not_blank(entity, field, &value)?;
    max_length(entity, field, &value, max)?;
    Ok(value)
}

/// Optional text bounded by `max` characters when present.
pub fn optional_max_length(
    entity: &str,
    field: &str,
    value: Option<String>,
    max: usize,
) -> CatalogResult<Option<String>> {
    if let Some(value) = &value {
        max_length(entity, field, value, max)?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(not_blank("Category", "name", "Books").is_ok());
        for blank in ["", "   ", "\t\n"] {
            let err = not_blank("Category", "name", blank).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn length_is_counted_in_characters() {
        // Four characters, twelve bytes.
        assert!(max_length("Brand", "name", "品牌名称", 4).is_ok());
        let err = max_length("Brand", "name", "品牌名称!", 4).unwrap_err();
        assert_eq!(
            err,
            CatalogError::invalid_argument("name", "Brand name can not be longer than 4")
        );
    }

    #[test]
    fn optional_text_allows_none() {
        assert_eq!(optional_max_length("Brand", "image", None, 3).unwrap(), None);
        assert!(optional_max_length("Brand", "image", Some("abcd".into()), 3).is_err());
        assert_eq!(
            required_text("Brand", "brief", "ok".into(), 3).unwrap(),
            "ok".to_string()
        );
    }
}
