//! Query layer tests against a live PostgreSQL database

mod common;

use chrono::{Duration, Utc};
use uuid::Uuid;

use bank_ledger::Store;
use bank_ledger::store::{
    CreateAccountParams, CreateSessionParams, ListAccountsParams, UpdateUserParams,
};
use common::{Fixtures, create_test_store};

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn test_create_and_get_account() {
    let store = create_test_store().await;
    let mut fx = Fixtures::new();
    let user = fx.user(&store).await;

    let balance = fx.money();
    let account = store
        .create_account(CreateAccountParams {
            owner: user.username.clone(),
            balance,
            currency: "USD".to_string(),
        })
        .await
        .unwrap();

    assert!(account.id > 0);
    assert_eq!(account.owner, user.username);
    assert_eq!(account.balance, balance);
    assert_eq!(account.currency, "USD");

    let fetched = store.get_account(account.id).await.unwrap();
    assert_eq!(fetched, account);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn test_get_missing_account_is_not_found() {
    let store = create_test_store().await;
    let err = store.get_account(i64::MAX).await.unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {}", err);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn test_account_owner_must_exist() {
    let store = create_test_store().await;
    let mut fx = Fixtures::new();

    let err = store
        .create_account(CreateAccountParams {
            owner: fx.owner(),
            balance: 0,
            currency: "EUR".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {}", err);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn test_one_account_per_owner_and_currency() {
    let store = create_test_store().await;
    let mut fx = Fixtures::new();
    let user = fx.user(&store).await;

    let params = CreateAccountParams {
        owner: user.username.clone(),
        balance: 10,
        currency: "CAD".to_string(),
    };
    store.create_account(params.clone()).await.unwrap();

    let err = store.create_account(params).await.unwrap_err();
    assert!(err.is_unique_violation(), "unexpected error: {}", err);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn test_list_accounts_by_owner() {
    let store = create_test_store().await;
    let mut fx = Fixtures::new();
    let user = fx.user(&store).await;

    for currency in ["USD", "EUR", "JPY"] {
        store
            .create_account(CreateAccountParams {
                owner: user.username.clone(),
                balance: fx.money(),
                currency: currency.to_string(),
            })
            .await
            .unwrap();
    }

    let page = store
        .list_accounts(ListAccountsParams {
            owner: user.username.clone(),
            limit: 2,
            offset: 1,
        })
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|a| a.owner == user.username));
    assert!(page[0].id < page[1].id);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn test_create_get_update_user() {
    let store = create_test_store().await;
    let mut fx = Fixtures::new();
    let user = fx.user(&store).await;

    let fetched = store.get_user(&user.username).await.unwrap();
    assert_eq!(fetched, user);

    let new_name = "Updated Name".to_string();
    let updated = store
        .update_user(UpdateUserParams {
            username: user.username.clone(),
            full_name: Some(new_name.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.full_name, new_name);
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.hashed_password, user.hashed_password);

    let changed_at = Utc::now();
    let updated = store
        .update_user(UpdateUserParams {
            username: user.username.clone(),
            hashed_password: Some("$argon2id$v=19$new".to_string()),
            password_changed_at: Some(changed_at),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.hashed_password, "$argon2id$v=19$new");
    assert_eq!(updated.full_name, new_name);
    assert!((updated.password_changed_at - changed_at).num_milliseconds().abs() < 1);
}

#[tokio::test]
#[ignore = "requires PostgreSQL database"]
async fn test_create_and_get_session() {
    let store = create_test_store().await;
    let mut fx = Fixtures::new();
    let user = fx.user(&store).await;

    let params = CreateSessionParams {
        id: Uuid::new_v4(),
        username: user.username.clone(),
        refresh_token: fx.string(40),
        user_agent: "integration-test".to_string(),
        client_ip: "127.0.0.1".to_string(),
        is_blocked: false,
        expires_at: Utc::now() + Duration::hours(24),
    };
    let session = store.create_session(params.clone()).await.unwrap();

    assert_eq!(session.id, params.id);
    assert_eq!(session.username, user.username);
    assert!(!session.is_blocked);

    let fetched = store.get_session(params.id).await.unwrap();
    assert_eq!(fetched, session);
}
