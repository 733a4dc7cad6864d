//! Symmetric token codec (HS256).
//!
//! Pure functions over a key fixed at process start; no I/O, no clock reads.
//! Expiry *judgment* for authorization lives in [`crate::inspect`]; `decode`
//! still rejects an elapsed window so that non-inspector callers cannot
//! accept stale tokens by accident, and [`TokenCodec::decode_allow_expired`]
//! is the single path that recovers claims after expiry (token refresh).

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::SignedClaims;
use crate::error::{DecodeError, EncodeError};

pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Build a codec over a pre-shared symmetric key.
    ///
    /// The key never rotates within a process lifetime.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // Expiry comparisons are done manually against an injectable clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Serialize and sign claims into a compact `header.payload.signature`
    /// string. Deterministic for identical claims and key.
    pub fn encode<C: SignedClaims>(&self, claims: &C) -> Result<String, EncodeError> {
        if claims.expires_at() <= claims.issued_at() {
            return Err(EncodeError::InvalidClaims(
                "expires_at must be after issued_at".to_string(),
            ));
        }

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding_key,
        )?)
    }

    /// Verify and deserialize a token, rejecting elapsed validity windows.
    ///
    /// The boundary is strict: a token whose `exp` equals `now` is expired.
    pub fn decode<C: SignedClaims>(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<C, DecodeError> {
        let claims = self.decode_allow_expired::<C>(token)?;
        if claims.expires_at() <= now {
            return Err(DecodeError::Expired);
        }
        Ok(claims)
    }

    /// Like [`TokenCodec::decode`], but an elapsed window is tolerated.
    ///
    /// Every other verification failure (signature, structure, algorithm)
    /// still fails closed.
    pub fn decode_allow_expired<C: SignedClaims>(&self, token: &str) -> Result<C, DecodeError> {
        let data = jsonwebtoken::decode::<C>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use proptest::prelude::*;

    use memberbase_core::{MemberId, MemberStatus};

    use super::*;
    use crate::claims::AccessClaims;
    use crate::role::Role;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"unit-test-secret")
    }

    fn claims_expiring_in(ttl: Duration) -> AccessClaims {
        AccessClaims::new(
            MemberId::new(),
            vec![Role::Member],
            MemberStatus::Confirmed,
            Utc::now(),
            ttl,
        )
        .unwrap()
    }

    #[test]
    fn round_trips_valid_claims() {
        let codec = codec();
        let claims = claims_expiring_in(Duration::hours(2));

        let token = codec.encode(&claims).unwrap();
        let decoded: AccessClaims = codec.decode(&token, Utc::now()).unwrap();

        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.roles, claims.roles);
        assert_eq!(decoded.status, claims.status);
    }

    #[test]
    fn encoding_is_deterministic_for_identical_input() {
        let codec = codec();
        let claims = claims_expiring_in(Duration::hours(1));

        assert_eq!(codec.encode(&claims).unwrap(), codec.encode(&claims).unwrap());
    }

    #[test]
    fn rejects_tokens_signed_with_another_key() {
        let claims = claims_expiring_in(Duration::hours(1));
        let token = TokenCodec::new(b"other-secret").encode(&claims).unwrap();

        let err = codec()
            .decode::<AccessClaims>(&token, Utc::now())
            .unwrap_err();
        assert_eq!(err, DecodeError::InvalidSignature);
    }

    #[test]
    fn flipping_any_signature_byte_fails_verification() {
        let codec = codec();
        let token = codec.encode(&claims_expiring_in(Duration::hours(1))).unwrap();

        let (prefix, signature) = token.rsplit_once('.').unwrap();
        for i in 0..signature.len() {
            let mut bytes = signature.as_bytes().to_vec();
            // Case-toggling (or swapping to a letter) always changes the
            // high bits of the base64url group, so the decoded signature
            // bytes differ even at the trailing-bits position.
            bytes[i] = if bytes[i].is_ascii_alphabetic() {
                bytes[i] ^ 0x20
            } else {
                b'A'
            };
            let tampered = format!("{prefix}.{}", String::from_utf8(bytes).unwrap());

            assert!(
                codec.decode::<AccessClaims>(&tampered, Utc::now()).is_err(),
                "tampered signature byte {i} was accepted"
            );
        }
    }

    #[test]
    fn rejects_malformed_structure() {
        let err = codec()
            .decode::<AccessClaims>("definitely-not-a-token", Utc::now())
            .unwrap_err();
        assert_eq!(err, DecodeError::Malformed);
    }

    #[test]
    fn rejects_foreign_algorithms() {
        // A token honestly signed with HS384 under the same secret must
        // still be refused by the HS256-only codec.
        let claims = claims_expiring_in(Duration::hours(1));
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();

        let err = codec()
            .decode::<AccessClaims>(&token, Utc::now())
            .unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedAlgorithm);
    }

    #[test]
    fn decode_rejects_elapsed_window() {
        let codec = codec();
        let claims = claims_expiring_in(Duration::seconds(30));
        let token = codec.encode(&claims).unwrap();

        let err = codec
            .decode::<AccessClaims>(&token, claims.exp + Duration::seconds(1))
            .unwrap_err();
        assert_eq!(err, DecodeError::Expired);
    }

    #[test]
    fn expiry_boundary_is_strict() {
        let codec = codec();
        let claims = claims_expiring_in(Duration::seconds(30));
        let token = codec.encode(&claims).unwrap();

        // One second before the boundary: valid.
        assert!(codec
            .decode::<AccessClaims>(&token, claims.exp - Duration::seconds(1))
            .is_ok());
        // Exactly at the boundary: expired.
        assert_eq!(
            codec
                .decode::<AccessClaims>(&token, claims.exp)
                .unwrap_err(),
            DecodeError::Expired
        );
    }

    #[test]
    fn allow_expired_recovers_elapsed_but_signed_claims() {
        let codec = codec();
        let claims = claims_expiring_in(Duration::seconds(30));
        let token = codec.encode(&claims).unwrap();

        // Well past expiry the strict path refuses...
        let later = claims.exp + Duration::hours(5);
        assert_eq!(
            codec.decode::<AccessClaims>(&token, later).unwrap_err(),
            DecodeError::Expired
        );

        // ...while the explicit allow-expired path recovers the claims.
        let recovered: AccessClaims = codec.decode_allow_expired(&token).unwrap();
        assert_eq!(recovered.sub, claims.sub);
    }

    #[test]
    fn allow_expired_still_rejects_bad_signatures() {
        let claims = claims_expiring_in(Duration::seconds(1));
        let token = TokenCodec::new(b"other-secret").encode(&claims).unwrap();

        let err = codec()
            .decode_allow_expired::<AccessClaims>(&token)
            .unwrap_err();
        assert_eq!(err, DecodeError::InvalidSignature);
    }

    #[test]
    fn encode_refuses_inverted_time_window() {
        let mut claims = claims_expiring_in(Duration::hours(1));
        claims.exp = claims.iat - Duration::seconds(1);

        assert!(matches!(
            codec().encode(&claims).unwrap_err(),
            EncodeError::InvalidClaims(_)
        ));
    }

    proptest! {
        #[test]
        fn any_valid_claims_round_trip(
            seed in any::<u128>(),
            role_mask in 1u8..8,
            issued_secs in 1_000_000_000i64..4_000_000_000,
            ttl_secs in 1i64..=86_400 * 365,
        ) {
            let roles: Vec<Role> = [Role::Member, Role::Finance, Role::Admin]
                .into_iter()
                .enumerate()
                .filter(|(i, _)| role_mask & (1 << i) != 0)
                .map(|(_, r)| r)
                .collect();

            let claims = AccessClaims::new(
                MemberId::from_uuid(uuid::Uuid::from_u128(seed)),
                roles,
                MemberStatus::Confirmed,
                DateTime::from_timestamp(issued_secs, 0).unwrap(),
                Duration::seconds(ttl_secs),
            )
            .unwrap();

            let codec = codec();
            let token = codec.encode(&claims).unwrap();
            let decoded: AccessClaims = codec.decode_allow_expired(&token).unwrap();
            prop_assert_eq!(decoded, claims);
        }
    }
}
