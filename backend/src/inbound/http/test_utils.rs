//! Test helpers for inbound HTTP components.

use actix_web::http::header::AUTHORIZATION;
use chrono::Utc;

use crate::domain::Caller;
use crate::inbound::http::auth::{AccessClaims, JwtVerifier};

const TEST_SECRET: &[u8] = b"inbound-http-test-secret";

/// Verifier sharing a fixed secret with [`bearer_header`].
pub fn test_verifier() -> JwtVerifier {
    JwtVerifier::from_secret(TEST_SECRET)
}

/// `Authorization` header carrying a one-hour token for `caller`.
pub fn bearer_header(caller: &Caller) -> (actix_web::http::header::HeaderName, String) {
    let exp = u64::try_from(Utc::now().timestamp() + 3_600).expect("positive timestamp");
    let token = test_verifier()
        .issue(&AccessClaims::for_caller(caller, exp))
        .expect("test token signs");
    (AUTHORIZATION, format!("Bearer {token}"))
}
