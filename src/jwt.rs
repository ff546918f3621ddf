// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;

pub const INVALID_TOKEN: &str = "Invalid token. Please login again.";

#[derive(Debug, Deserialize)]
pub struct Claims {
    sub: Option<Value>,
    #[serde(rename = "x-hasura-user-id")]
    hasura_user_id: Option<Value>,
}

/// Checks that a token has the three dot-separated parts of a JWT.
pub fn is_well_formed(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() == 3 && parts.iter().all(|part| !part.is_empty())
}

/// Decodes the payload segment. The signature is not checked; the platform
/// does that when the token is used.
pub fn decode_claims(token: &str) -> Fallible<Claims> {
    if !is_well_formed(token) {
        return Err(ErrorReport::auth(INVALID_TOKEN));
    }
    let payload = token.split('.').nth(1).unwrap_or_default();
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    serde_json::from_slice(&bytes).map_err(|_| ErrorReport::auth(INVALID_TOKEN))
}

/// The numeric user id: `sub`, falling back to `x-hasura-user-id`.
pub fn user_id(token: &str) -> Fallible<u64> {
    let claims = decode_claims(token)?;
    claims
        .sub
        .as_ref()
        .and_then(numeric)
        .or_else(|| claims.hasura_user_id.as_ref().and_then(numeric))
        .ok_or_else(|| ErrorReport::auth(INVALID_TOKEN))
}

fn numeric(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn make_token(claims: &str) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_string_sub() -> Fallible<()> {
        assert_eq!(user_id(&make_token(r#"{"sub": "1234"}"#))?, 1234);
        Ok(())
    }

    #[test]
    fn test_numeric_sub() -> Fallible<()> {
        assert_eq!(user_id(&make_token(r#"{"sub": 42}"#))?, 42);
        Ok(())
    }

    #[test]
    fn test_hasura_fallback() -> Fallible<()> {
        let token = make_token(r#"{"x-hasura-user-id": "77"}"#);
        assert_eq!(user_id(&token)?, 77);
        Ok(())
    }

    #[test]
    fn test_padded_payload() -> Fallible<()> {
        // Eleven bytes encode to fifteen characters, so a padded encoder
        // would append one '='.
        let token = format!("a.{}=.c", URL_SAFE_NO_PAD.encode(r#"{"sub":"9"}"#));
        assert_eq!(user_id(&token)?, 9);
        Ok(())
    }

    #[test]
    fn test_invalid_tokens() {
        let cases = [
            "".to_string(),
            "only.two".to_string(),
            "a.!!!.c".to_string(),
            make_token("not json"),
            make_token(r#"{"sub": "abc"}"#),
            make_token(r#"{"name": "jdoe"}"#),
        ];
        for token in cases {
            let err = user_id(&token).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Auth, "{token}");
            assert_eq!(err.message(), INVALID_TOKEN);
        }
    }
}
