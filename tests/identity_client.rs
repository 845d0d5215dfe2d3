//! Identity client against the in-process fake.

mod common;

use common::{start_fakes, USER_EMAIL, USER_ID, USER_TOKEN};
use mealplanner::auth::{parse_redirect, AuthError, IdentityProvider, RestIdentityProvider};
use mealplanner::AuthEvent;

#[tokio::test]
async fn test_restore_from_redirect() {
    let fakes = start_fakes(vec![]).await;
    let identity = RestIdentityProvider::new(&fakes.store_config());
    let mut events = identity.subscribe();

    let redirect = format!(
        "http://localhost:3000/#access_token={}&expires_in=3600&refresh_token=r-1&token_type=bearer",
        USER_TOKEN
    );
    let session = identity
        .restore(parse_redirect(&redirect).unwrap())
        .await
        .unwrap();

    assert_eq!(session.user.id, USER_ID);
    assert_eq!(session.user.email.as_deref(), Some(USER_EMAIL));
    assert!(!session.is_expired());
    assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedIn(session.clone()));
    assert_eq!(identity.get_session().await.unwrap(), Some(session));
}

#[tokio::test]
async fn test_restore_with_bad_token() {
    let fakes = start_fakes(vec![]).await;
    let identity = RestIdentityProvider::new(&fakes.store_config());

    let err = identity
        .restore(parse_redirect("#access_token=forged").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Api { status: 401, .. }));
    assert!(identity.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn test_sign_out_revokes_and_notifies() {
    let fakes = start_fakes(vec![]).await;
    let identity = RestIdentityProvider::new(&fakes.store_config());
    identity
        .restore(parse_redirect(&format!("#access_token={}", USER_TOKEN)).unwrap())
        .await
        .unwrap();

    let mut events = identity.subscribe();
    identity.sign_out().await.unwrap();

    assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedOut);
    assert!(identity.get_session().await.unwrap().is_none());

    let logout = fakes
        .state
        .seen()
        .into_iter()
        .find(|s| s.path == "/auth/v1/logout")
        .expect("logout request");
    assert_eq!(
        logout.authorization.as_deref(),
        Some(format!("Bearer {}", USER_TOKEN).as_str())
    );
}

#[tokio::test]
async fn test_restore_with_out_of_range_lifetime() {
    let fakes = start_fakes(vec![]).await;
    let identity = RestIdentityProvider::new(&fakes.store_config());

    let redirect = format!(
        "#access_token={}&expires_in=9223372036854775807",
        USER_TOKEN
    );
    let session = identity
        .restore(parse_redirect(&redirect).unwrap())
        .await
        .unwrap();

    assert_eq!(session.expires_at, None);
    assert!(!session.is_expired());
}
