//! Handler for the `/user-credits` resource.

use axum::extract::State;
use axum::Json;
use promptlens_db::models::credits::UserCredits;
use promptlens_db::repositories::CreditRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user-credits
///
/// Return the caller's credit balance, creating it with the starting grant
/// on first access.
pub async fn get_credits(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserCredits>>> {
    let credits = CreditRepo::get_or_init(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: credits }))
}
