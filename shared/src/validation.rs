//! Validation utilities for the Warehouse Stock Management Platform
//!
//! Includes Brazilian document validations for supplier records.

use crate::types::DateRange;

// ============================================================================
// Stock Validations
// ============================================================================

/// Validate that a movement quantity is a positive integer
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be a positive integer");
    }
    Ok(())
}

/// Validate a report date range (start must not come after end)
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if range.start > range.end {
        return Err("Start date must not come after end date");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate a descriptive name (non-empty, at most 120 characters)
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > 120 {
        return Err("Name must be at most 120 characters");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Allowed product image extensions
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Validate a product image filename by its extension
pub fn validate_image_extension(filename: &str) -> Result<&str, &'static str> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .ok_or("Image file must have an extension")?;

    if ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    {
        Ok(extension)
    } else {
        Err("Only jpg, jpeg, png and gif images are accepted")
    }
}

// ============================================================================
// Brazil-Specific Validations
// ============================================================================

/// Validate a Brazilian company tax id (CNPJ)
/// 14-digit number with two check digits, accepts punctuated input
/// (e.g. 11.222.333/0001-81)
pub fn validate_cnpj(cnpj: &str) -> Result<(), &'static str> {
    let digits: Vec<u32> = cnpj.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 14 {
        return Err("CNPJ must have 14 digits");
    }

    // All-equal digit sequences pass the checksum but are not valid ids
    if digits.windows(2).all(|w| w[0] == w[1]) {
        return Err("Invalid CNPJ");
    }

    let check = |len: usize| -> u32 {
        let weights = (2..=9).cycle();
        let sum: u32 = digits[..len]
            .iter()
            .rev()
            .zip(weights)
            .map(|(d, w)| d * w)
            .sum();
        match sum % 11 {
            0 | 1 => 0,
            r => 11 - r,
        }
    };

    if check(12) != digits[12] || check(13) != digits[13] {
        return Err("Invalid CNPJ check digits");
    }

    Ok(())
}

/// Validate a Brazilian individual tax id (CPF)
/// 11-digit number with two check digits
pub fn validate_cpf(cpf: &str) -> Result<(), &'static str> {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return Err("CPF must have 11 digits");
    }

    if digits.windows(2).all(|w| w[0] == w[1]) {
        return Err("Invalid CPF");
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .zip((2..=len as u32 + 1).rev())
            .map(|(d, w)| d * w)
            .sum();
        match (sum * 10) % 11 {
            10 => 0,
            r => r,
        }
    };

    if check(9) != digits[9] || check(10) != digits[10] {
        return Err("Invalid CPF check digits");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // ========================================================================
    // Stock Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_quantity_positive() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
    }

    #[test]
    fn test_validate_quantity_non_positive() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-10).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let ok = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        };
        assert!(validate_date_range(&ok).is_ok());

        let same_day = DateRange {
            start: ok.start,
            end: ok.start,
        };
        assert!(validate_date_range(&same_day).is_ok());

        let inverted = DateRange {
            start: ok.end,
            end: ok.start,
        };
        assert!(validate_date_range(&inverted).is_err());
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("keeper@warehouse.gov.br").is_ok());
        assert!(validate_email("user.name@domain.com").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Office supplies").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_image_extension_allowed() {
        assert_eq!(validate_image_extension("photo.jpg"), Ok("jpg"));
        assert_eq!(validate_image_extension("photo.JPEG"), Ok("JPEG"));
        assert_eq!(validate_image_extension("scan.png"), Ok("png"));
        assert_eq!(validate_image_extension("anim.gif"), Ok("gif"));
    }

    #[test]
    fn test_validate_image_extension_rejected() {
        assert!(validate_image_extension("payload.exe").is_err());
        assert!(validate_image_extension("document.pdf").is_err());
        assert!(validate_image_extension("no_extension").is_err());
    }

    // ========================================================================
    // Brazil-Specific Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_cnpj_valid() {
        assert!(validate_cnpj("11222333000181").is_ok());
        // Punctuated form
        assert!(validate_cnpj("11.222.333/0001-81").is_ok());
    }

    #[test]
    fn test_validate_cnpj_invalid() {
        // Wrong length
        assert!(validate_cnpj("112223330001").is_err());
        // Bad check digits
        assert!(validate_cnpj("11222333000182").is_err());
        // Repeated digits
        assert!(validate_cnpj("00000000000000").is_err());
    }

    #[test]
    fn test_validate_cpf_valid() {
        assert!(validate_cpf("52998224725").is_ok());
        assert!(validate_cpf("529.982.247-25").is_ok());
    }

    #[test]
    fn test_validate_cpf_invalid() {
        assert!(validate_cpf("5299822472").is_err());
        assert!(validate_cpf("52998224726").is_err());
        assert!(validate_cpf("11111111111").is_err());
    }
}
