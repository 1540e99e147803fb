//! Parsing of `Authorization: Basic ...` headers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Username and password taken from a Basic authorization header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Decode the value of an `Authorization` header.
///
/// Returns `None` unless the value uses the Basic scheme and decodes to
/// UTF-8 `username:password`. The password may itself contain `:`.
pub fn parse_basic(header: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn decodes_credentials() {
        assert_eq!(
            parse_basic(&encode("user:pass")),
            Some(BasicCredentials {
                username: "user".into(),
                password: "pass".into(),
            })
        );
    }

    #[test]
    fn password_may_contain_colon() {
        let creds = parse_basic(&encode("user:a:b")).unwrap();
        assert_eq!(creds.password, "a:b");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let header = encode("user:pass").replace("Basic", "basic");
        assert!(parse_basic(&header).is_some());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert_eq!(parse_basic("Bearer abc.def"), None);
        assert_eq!(parse_basic("Basic !!!"), None);
        assert_eq!(parse_basic(&encode("no-colon")), None);
        assert_eq!(parse_basic("Basic"), None);
    }
}
