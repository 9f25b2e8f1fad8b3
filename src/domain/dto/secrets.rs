//! 시크릿 요청 DTO

use serde::Deserialize;

/// 시크릿 제출 폼 (`POST /submit`)
///
/// 제출된 문자열은 가공 없이 그대로 저장됩니다.
/// 같은 사용자가 다시 제출하면 기존 시크릿을 덮어씁니다.
#[derive(Debug, Deserialize)]
pub struct SubmitSecretForm {
    pub secret: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_secret_form_preserves_exact_string() {
        // 공백을 포함한 문자열도 가공 없이 유지되어야 한다
        let json = r#"{"secret": "  I ate the last cookie.  "}"#;
        let form: SubmitSecretForm = serde_json::from_str(json).unwrap();

        assert_eq!(form.secret, "  I ate the last cookie.  ");
    }
}
