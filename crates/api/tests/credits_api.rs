//! HTTP-level integration tests for the credit balance and history
//! endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, seed_user, token_for};
use sqlx::PgPool;

use promptlens_core::credits::STARTING_CREDITS;
use promptlens_db::models::generated_prompt::CreateGeneratedPrompt;
use promptlens_db::repositories::GeneratedPromptRepo;

// ---------------------------------------------------------------------------
// /user-credits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn credits_require_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/user-credits").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn first_read_grants_starting_balance(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/user-credits", &token_for(user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["credits"], STARTING_CREDITS);
    assert_eq!(json["data"]["total_used"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_reads_do_not_regrant(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let app = common::build_test_app(pool);
    let token = token_for(user.id);

    get_auth(app.clone(), "/api/v1/user-credits", &token).await;
    let response = get_auth(app, "/api/v1/user-credits", &token).await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["credits"], STARTING_CREDITS);
}

// ---------------------------------------------------------------------------
// /user-prompts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn history_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/user-prompts").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_starts_empty(pool: PgPool) {
    let user = seed_user(&pool, "alice").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/user-prompts", &token_for(user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
    assert_eq!(json["meta"]["total"], 0);
    assert_eq!(json["meta"]["has_next"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_lists_own_entries_newest_first(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    for (user_id, body) in [
        (alice.id, "first generation"),
        (alice.id, "second generation"),
        (bob.id, "someone else's generation"),
    ] {
        GeneratedPromptRepo::create(
            &pool,
            &CreateGeneratedPrompt {
                user_id,
                body: body.to_string(),
                source_image_url: None,
                style: None,
                category: None,
                credits_used: 1,
            },
        )
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/user-prompts", &token_for(alice.id)).await;

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["body"], "second generation");
    assert_eq!(items[1]["body"], "first generation");
    assert_eq!(json["meta"]["total"], 2);
}
