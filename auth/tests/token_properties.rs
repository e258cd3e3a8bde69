use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use auth::ManualClock;
use auth::Principal;
use auth::Role;
use auth::TokenIssuer;
use auth::ValidationError;
use chrono::TimeZone;
use chrono::Utc;
use proptest::prelude::*;

const SECRET: &[u8] = b"property_test_secret_key_at_least_64_bytes_long_for_hs512_tokens";

fn issuer_at(start_secs: i64, validity_secs: u64) -> (TokenIssuer, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc.timestamp_opt(start_secs, 0).unwrap()));
    let issuer = TokenIssuer::with_clock(SECRET, Duration::from_secs(validity_secs), clock.clone())
        .expect("Failed to create issuer");
    (issuer, clock)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: a token validates back to the principal it was issued for,
    /// whatever order the roles were supplied in.
    #[test]
    fn round_trip_preserves_principal(
        username in "[a-z][a-z0-9_]{0,31}",
        role_names in prop::collection::vec("[A-Z][A-Z0-9_:.-]{0,15}", 0..6),
        validity_secs in 1u64..86_400,
        elapsed_fraction in 0.0f64..1.0,
    ) {
        let (issuer, clock) = issuer_at(1_700_000_000, validity_secs);

        let roles: Vec<Role> = role_names.iter().map(|r| Role::new(r.clone()).unwrap()).collect();
        let principal = Principal::new(username.clone(), roles.clone()).unwrap();
        let reversed = Principal::new(username, roles.into_iter().rev()).unwrap();

        let token = issuer.generate(&principal).unwrap();

        let elapsed = ((validity_secs as f64) * elapsed_fraction) as i64;
        clock.advance(chrono::Duration::seconds(elapsed.min(validity_secs as i64 - 1)));

        let decoded = issuer.validate(&token).unwrap();
        prop_assert_eq!(&decoded, &principal);
        prop_assert_eq!(&decoded, &reversed);

        let expected: BTreeSet<&str> = role_names.iter().map(String::as_str).collect();
        let actual: BTreeSet<&str> = decoded.roles().iter().map(Role::as_str).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: once the validity duration has elapsed the token is expired.
    #[test]
    fn expired_after_validity(
        validity_secs in 0u64..86_400,
        overshoot_secs in 0i64..86_400,
    ) {
        let (issuer, clock) = issuer_at(1_700_000_000, validity_secs);
        let principal = Principal::new("alice", [Role::new("USER").unwrap()]).unwrap();

        let token = issuer.generate(&principal).unwrap();
        clock.advance(chrono::Duration::seconds(validity_secs as i64 + overshoot_secs));

        prop_assert_eq!(issuer.validate(&token), Err(ValidationError::ExpiredToken));
    }

    /// Property: arbitrary strings never validate.
    #[test]
    fn arbitrary_input_never_validates(input in "\\PC{0,200}") {
        let (issuer, _) = issuer_at(1_700_000_000, 3_600);
        prop_assert!(issuer.validate(&input).is_err());
    }
}
