//! Field-level validation for recipe, tag, ingredient and user input.

use std::collections::HashSet;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::types::IngredientAmount;
use crate::error::RecipesServiceError;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_USER_FIELD_LEN: usize = 150;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_COOKING_TIME: i64 = 1;
pub const MAX_COOKING_TIME: i64 = 1440;
pub const MIN_AMOUNT: i64 = 1;
pub const MAX_AMOUNT: i64 = 10000;

type Result<T> = std::result::Result<T, RecipesServiceError>;

/// Non-empty after trimming and at most `max` characters.
pub fn bounded_text(field: &'static str, value: &str, max: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecipesServiceError::validation(field, "must not be empty"));
    }
    if trimmed.chars().count() > max {
        return Err(RecipesServiceError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(trimmed.to_owned())
}

pub fn recipe_name(value: &str) -> Result<String> {
    bounded_text("name", value, MAX_NAME_LEN)
}

pub fn recipe_text(value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(RecipesServiceError::validation("text", "must not be empty"));
    }
    Ok(value.to_owned())
}

pub fn cooking_time(value: i64) -> Result<i16> {
    if !(MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&value) {
        return Err(RecipesServiceError::validation(
            "cooking_time",
            format!("must be between {MIN_COOKING_TIME} and {MAX_COOKING_TIME} minutes"),
        ));
    }
    Ok(value as i16)
}

/// Ingredient lines as `(ingredient id, amount)` pairs.
pub fn ingredient_amounts(lines: &[(i32, i64)]) -> Result<Vec<IngredientAmount>> {
    if lines.is_empty() {
        return Err(RecipesServiceError::validation(
            "ingredients",
            "at least one ingredient is required",
        ));
    }
    let mut seen = HashSet::with_capacity(lines.len());
    let mut out = Vec::with_capacity(lines.len());
    for &(ingredient_id, amount) in lines {
        if !seen.insert(ingredient_id) {
            return Err(RecipesServiceError::validation(
                "ingredients",
                "ingredient already added",
            ));
        }
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
            return Err(RecipesServiceError::validation(
                "ingredients",
                format!("amount must be between {MIN_AMOUNT} and {MAX_AMOUNT}"),
            ));
        }
        out.push(IngredientAmount {
            ingredient_id,
            amount: amount as i16,
        });
    }
    Ok(out)
}

pub fn tag_ids(ids: &[i32]) -> Result<Vec<i32>> {
    if ids.is_empty() {
        return Err(RecipesServiceError::validation(
            "tags",
            "at least one tag is required",
        ));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(RecipesServiceError::validation("tags", "tag already added"));
        }
    }
    Ok(ids.to_vec())
}

/// Accepts `data:image/<subtype>;base64,<payload>` and returns it unchanged.
pub fn image_data_uri(value: &str) -> Result<String> {
    let invalid = || RecipesServiceError::validation("image", "must be a base64 image data URI");
    let rest = value.strip_prefix("data:image/").ok_or_else(invalid)?;
    let (subtype, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
    let subtype_ok = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !subtype_ok || payload.is_empty() {
        return Err(invalid());
    }
    STANDARD.decode(payload).map_err(|_| invalid())?;
    Ok(value.to_owned())
}

/// `#RRGGBB`, returned lowercased.
pub fn tag_color(value: &str) -> Result<String> {
    let hex = value
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()));
    match hex {
        Some(_) => Ok(value.to_ascii_lowercase()),
        None => Err(RecipesServiceError::validation(
            "color",
            "must be a hex color like #49b64e",
        )),
    }
}

/// `[-a-zA-Z0-9_]+`, at most 200 characters.
pub fn tag_slug(value: &str) -> Result<String> {
    let ok = !value.is_empty()
        && value.len() <= MAX_NAME_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        return Err(RecipesServiceError::validation(
            "slug",
            "may only contain letters, digits, hyphens and underscores",
        ));
    }
    Ok(value.to_owned())
}

/// `[\w.@+-]{1,150}`.
pub fn username(value: &str) -> Result<String> {
    let len = value.chars().count();
    let ok = (1..=MAX_USER_FIELD_LEN).contains(&len)
        && value
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'));
    if !ok {
        return Err(RecipesServiceError::validation(
            "username",
            "may only contain letters, digits and @/./+/-/_",
        ));
    }
    Ok(value.to_owned())
}

pub fn email(value: &str) -> Result<String> {
    let value = value.trim();
    let ok = value.len() <= MAX_EMAIL_LEN
        && value
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !ok {
        return Err(RecipesServiceError::validation(
            "email",
            "must be a valid email address",
        ));
    }
    Ok(value.to_owned())
}
