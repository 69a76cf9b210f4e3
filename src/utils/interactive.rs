use crate::utils::error::{AppError, AppResult};
use anyhow::Result;
use std::io::{self, Write};

pub fn prompt_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

pub fn prompt_yes_no(prompt: &str) -> Result<bool> {
    loop {
        let input = prompt_input(&format!("{} [y/N]: ", prompt))?;
        match input.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => println!("Please enter 'y' or 'n'"),
        }
    }
}

/// Trimmed, non-empty entity name
pub fn require_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Parse a user-entered amount. Unparsable text counts as zero; negative
/// values are rejected.
pub fn parse_amount(field: &str, raw: &str) -> AppResult<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let value = cleaned.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0);
    if value < 0.0 {
        return Err(AppError::Validation(format!("{} cannot be negative", field)));
    }
    Ok(value)
}

/// Like [`parse_amount`] for optional flags
pub fn parse_optional_amount(field: &str, raw: Option<&str>) -> AppResult<Option<f64>> {
    raw.map(|r| parse_amount(field, r)).transpose()
}

/// Target dates are stored as `YYYY-MM-DD`; an empty string clears the date
pub fn parse_target_date(raw: &str) -> AppResult<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|d| Some(d.format("%Y-%m-%d").to_string()))
        .map_err(|_| AppError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_name() {
        assert_eq!(require_name("  Rent ").expect("valid"), "Rent");
        assert!(matches!(require_name("   "), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("Planned", "1,500").expect("valid"), 1500.0);
        assert_eq!(parse_amount("Planned", "12.75").expect("valid"), 12.75);
        assert_eq!(parse_amount("Planned", "abc").expect("valid"), 0.0);
        assert_eq!(parse_amount("Planned", "").expect("valid"), 0.0);
        assert!(parse_amount("Planned", "-5").is_err());
    }

    #[test]
    fn test_parse_optional_amount() {
        assert_eq!(parse_optional_amount("Spent", None).expect("valid"), None);
        assert_eq!(parse_optional_amount("Spent", Some("20")).expect("valid"), Some(20.0));
    }

    #[test]
    fn test_parse_target_date() {
        assert_eq!(parse_target_date("2027-01-31").expect("valid").as_deref(), Some("2027-01-31"));
        assert_eq!(parse_target_date("").expect("valid"), None);
        assert!(parse_target_date("31/01/2027").is_err());
    }
}
