//! 邮箱名单与密码策略校验

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// 规范化邮箱：去空白并转小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 校验一组邮箱，返回错误信息列表，空列表表示通过
///
/// 空白项忽略；编号按非空项从 1 开始计数。
/// `existing` 非空时同时检查是否已在班级中。
pub fn validate_emails(candidates: &[String], existing: &[String]) -> Vec<String> {
    let mut errors = Vec::new();
    let emails: Vec<&str> = candidates
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();

    for (index, email) in emails.iter().enumerate() {
        if !is_valid_email(email) {
            errors.push(format!(
                "Email {}: \"{}\" is not a valid email address",
                index + 1,
                email
            ));
        }
    }

    // 按第二次出现的顺序列出重复项，每项一次
    let mut duplicates: Vec<&str> = Vec::new();
    for (index, email) in emails.iter().enumerate() {
        if emails[..index].contains(email) && !duplicates.contains(email) {
            duplicates.push(email);
        }
    }
    if !duplicates.is_empty() {
        errors.push(format!(
            "Duplicate emails found: {}",
            duplicates.join(", ")
        ));
    }

    if !existing.is_empty() {
        let mut already: Vec<&str> = Vec::new();
        for email in &emails {
            if existing.iter().any(|e| e == email) && !already.contains(email) {
                already.push(email);
            }
        }
        if !already.is_empty() {
            errors.push(format!(
                "These emails are already in the class: {}",
                already.join(", ")
            ));
        }
    }

    errors
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 密码策略：至少 8 位，包含大小写字母与数字，且不是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    const WEAK_PASSWORDS: &[&str] = &["password1", "qwerty123", "abcd1234", "welcome1"];
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_emails(&list(&["a@x.io", "b@y.org"]), &[]).is_empty());
    }

    #[test]
    fn test_invalid_email_positions_skip_blanks() {
        let errors = validate_emails(&list(&["a@x.io", "  ", "bad"]), &[]);
        assert_eq!(errors, vec!["Email 2: \"bad\" is not a valid email address"]);
    }

    #[test]
    fn test_duplicates_reported_once() {
        let errors = validate_emails(
            &list(&["a@x.io", "b@y.org", "a@x.io", "b@y.org", "a@x.io"]),
            &[],
        );
        assert_eq!(errors, vec!["Duplicate emails found: a@x.io, b@y.org"]);
    }

    #[test]
    fn test_existing_members() {
        let errors = validate_emails(&list(&["a@x.io", "c@z.net"]), &list(&["a@x.io"]));
        assert_eq!(
            errors,
            vec!["These emails are already in the class: a@x.io"]
        );
    }

    #[test]
    fn test_blank_list_is_valid() {
        assert!(validate_emails(&list(&["", "  "]), &[]).is_empty());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@School.EDU "), "alice@school.edu");
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_valid);
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(!validate_password("Password1").is_valid);
    }
}
