//! Bearer-token authentication for mobile clients.
//!
//! Mobile apps present an HS256 JWT issued by the account service. The
//! [`AuthenticatedCaller`] extractor verifies it with the [`JwtVerifier`]
//! registered as app data and turns the claims into a domain [`Caller`].
//! Tenant and role come only from verified claims.

use std::future::{Ready, ready};
use std::str::FromStr;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Caller, Error, OrgId, Role, UserId};

/// Claims carried by a mobile access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// User id.
    pub sub: String,
    /// Organisation (tenant) id.
    pub org_id: String,
    /// One of `admin`, `manager` or `carer`.
    pub role: String,
    /// Expiry as seconds since the epoch.
    pub exp: u64,
}

impl AccessClaims {
    /// Claims for `caller` expiring at `exp` (epoch seconds).
    #[must_use]
    pub fn for_caller(caller: &Caller, exp: u64) -> Self {
        Self {
            sub: caller.user_id().to_string(),
            org_id: caller.org_id().to_string(),
            role: caller.role().as_str().to_owned(),
            exp,
        }
    }

    fn into_caller(self) -> Result<Caller, String> {
        let user_id = UserId::from_str(&self.sub).map_err(|err| format!("sub: {err}"))?;
        let org_id = OrgId::from_str(&self.org_id).map_err(|err| format!("orgId: {err}"))?;
        let role = Role::from_str(&self.role).map_err(|err| err.to_string())?;
        Ok(Caller::new(org_id, user_id, role))
    }
}

/// Verifies (and, for tooling, issues) HS256 access tokens.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

impl JwtVerifier {
    /// Build a verifier for a shared secret.
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            decoding: DecodingKey::from_secret(secret),
            encoding: EncodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify `token` and resolve the caller it names.
    pub fn verify(&self, token: &str) -> Result<Caller, Error> {
        let data = decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "bearer token rejected");
                Error::unauthorized("invalid bearer token")
            })?;
        data.claims.into_caller().map_err(|reason| {
            debug!(%reason, "bearer token claims rejected");
            Error::unauthorized("invalid bearer token")
        })
    }

    /// Sign claims with this verifier's secret.
    pub fn issue(&self, claims: &AccessClaims) -> Result<String, Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|err| Error::internal(format!("failed to sign access token: {err}")))
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(Error::unauthorized("malformed authorization header"));
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<Caller, Error> {
    let verifier = req
        .app_data::<web::Data<JwtVerifier>>()
        .ok_or_else(|| Error::internal("JWT verifier is not configured"))?;
    verifier.verify(bearer_token(req)?)
}

/// Extractor yielding the verified caller or rejecting with `401`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCaller(pub Caller);

impl AuthenticatedCaller {
    /// Unwrap the verified caller.
    #[must_use]
    pub fn into_inner(self) -> Caller {
        self.0
    }
}

impl FromRequest for AuthenticatedCaller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Self).map_err(Into::into))
    }
}
