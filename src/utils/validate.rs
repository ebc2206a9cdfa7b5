//! 用户输入校验工具。
//!
//! 所有写入用户集合的字段都必须先经过这里的校验，
//! 避免脏数据进入存储层。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{Result, SchoolSystemError};

/// 邮箱格式正则
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_\-\.]+)@([a-zA-Z0-9_\-\.]+)\.([a-zA-Z]{2,5})$")
        .expect("email regex must compile")
});

/// 个人简介允许的字符集（最长 100 字符）
static BIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[\w .+()\[\]{}?*&^%$#/'"~<>,:;!_=@-]{1,100}$"#).expect("bio regex must compile")
});

/// 简介为空时的默认值
pub const DEFAULT_BIO: &str = "A short bio.";
/// 出生日期为空时的默认值
pub const DEFAULT_DATE_OF_BIRTH: &str = "14-03-1879";

/// 校验邮箱格式
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(SchoolSystemError::validation(format!(
            "Invalid email address: {email}"
        )))
    }
}

/// 校验密码强度：至少 8 位，且同时包含字母和数字
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(SchoolSystemError::validation(
            "Password must be at least 8 characters long",
        ));
    }
    let has_alpha = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_alpha || !has_digit {
        return Err(SchoolSystemError::validation(
            "Password must contain both letters and digits",
        ));
    }
    Ok(())
}

/// 规范化个人简介：空值退回默认简介，否则校验长度和字符集
pub fn normalize_bio(bio: Option<&str>) -> Result<String> {
    match bio.map(str::trim) {
        None | Some("") => Ok(DEFAULT_BIO.to_string()),
        Some(bio) => {
            if BIO_RE.is_match(bio) {
                Ok(bio.to_string())
            } else {
                Err(SchoolSystemError::validation(
                    "Bio must be at most 100 characters and contain only permitted characters",
                ))
            }
        }
    }
}

/// 规范化出生日期：空值退回默认日期，否则要求 DD-MM-YYYY 且不在未来
pub fn normalize_date_of_birth(date: Option<&str>) -> Result<String> {
    match date.map(str::trim) {
        None | Some("") => Ok(DEFAULT_DATE_OF_BIRTH.to_string()),
        Some(date) => {
            let parsed = chrono::NaiveDate::parse_from_str(date, "%d-%m-%Y").map_err(|_| {
                SchoolSystemError::validation(format!(
                    "Invalid date of birth (expected DD-MM-YYYY): {date}"
                ))
            })?;
            if parsed > chrono::Utc::now().date_naive() {
                return Err(SchoolSystemError::validation(
                    "Date of birth cannot be in the future",
                ));
            }
            Ok(date.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b-c_d@mail.example.org").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("user@domain.toolongtld").is_err());
        assert!(validate_email("user@domain.com ").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("passw0rd").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("12345678").is_err());
    }

    #[test]
    fn test_normalize_bio() {
        assert_eq!(normalize_bio(None).unwrap(), DEFAULT_BIO);
        assert_eq!(normalize_bio(Some("")).unwrap(), DEFAULT_BIO);
        assert_eq!(normalize_bio(Some("I teach maths.")).unwrap(), "I teach maths.");
        // 101 字符超出上限
        let long = "a".repeat(101);
        assert!(normalize_bio(Some(&long)).is_err());
    }

    #[test]
    fn test_normalize_date_of_birth() {
        assert_eq!(
            normalize_date_of_birth(None).unwrap(),
            DEFAULT_DATE_OF_BIRTH
        );
        assert_eq!(
            normalize_date_of_birth(Some("01-09-2005")).unwrap(),
            "01-09-2005"
        );
        assert!(normalize_date_of_birth(Some("2005-09-01")).is_err());
        assert!(normalize_date_of_birth(Some("31-02-2005")).is_err());
        assert!(normalize_date_of_birth(Some("01-01-3000")).is_err());
    }
}
