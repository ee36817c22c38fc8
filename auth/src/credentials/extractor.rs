use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::CredentialError;

pub const BEARER_SCHEME: &str = "Bearer";
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// Only checks syntax; the token's authenticity is up to the caller.
///
/// # Errors
/// * `MissingOrMalformed` - Header absent, not `Bearer`, or token empty
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CredentialError> {
    authorization_value(headers, BEARER_SCHEME)
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
///
/// # Errors
/// * `MissingOrMalformed` - Header absent, not `ApiKey`, or key empty
pub fn api_key(headers: &HeaderMap) -> Result<&str, CredentialError> {
    authorization_value(headers, API_KEY_SCHEME)
}

fn authorization_value<'a>(
    headers: &'a HeaderMap,
    scheme: &str,
) -> Result<&'a str, CredentialError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(CredentialError::MissingOrMalformed)?
        .to_str()
        .map_err(|_| CredentialError::MissingOrMalformed)?;

    let (found_scheme, value) = header
        .split_once(' ')
        .ok_or(CredentialError::MissingOrMalformed)?;

    if found_scheme != scheme
        || value.is_empty()
        || value.chars().any(char::is_whitespace)
    {
        return Err(CredentialError::MissingOrMalformed);
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers_with(authorization: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = authorization {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_bearer_token_valid() {
        let headers = headers_with(Some("Bearer abcdef"));
        assert_eq!(bearer_token(&headers), Ok("abcdef"));
    }

    #[test]
    fn test_bearer_token_rejections() {
        let cases = [
            None,
            Some(""),
            Some("abcdef"),
            Some("Invalid abcdef"),
            Some("bearer abcdef"),
            Some("Bearer"),
            Some("Bearer "),
            Some("Bearer  abcdef"),
            Some("Bearer abc def"),
            Some("ApiKey abcdef"),
        ];

        for case in cases {
            let headers = headers_with(case);
            assert_eq!(
                bearer_token(&headers),
                Err(CredentialError::MissingOrMalformed),
                "expected rejection for {:?}",
                case
            );
        }
    }

    #[test]
    fn test_api_key_valid() {
        let headers = headers_with(Some("ApiKey f271c81ff7084ee5b99a5091b42d486e"));
        assert_eq!(api_key(&headers), Ok("f271c81ff7084ee5b99a5091b42d486e"));
    }

    #[test]
    fn test_api_key_rejections() {
        for case in [None, Some("Bearer abcdef"), Some("ApiKey "), Some("ApiKey")] {
            let headers = headers_with(case);
            assert_eq!(api_key(&headers), Err(CredentialError::MissingOrMalformed));
        }
    }

    #[test]
    fn test_non_ascii_header_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );

        assert_eq!(
            bearer_token(&headers),
            Err(CredentialError::MissingOrMalformed)
        );
    }
}
