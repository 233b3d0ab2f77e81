use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{self, AppState};
use crate::messages;
use crate::middleware::require_auth;
use crate::users;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/users", get(users::list_users))
        .route("/users/{user_id}", get(users::get_user))
        .route("/users/{user_id}/messages", get(users::user_messages))
        .route("/users/{user_id}/following", get(users::user_following))
        .route("/users/{user_id}/followers", get(users::user_followers))
        .route("/users/{user_id}/likes", get(users::user_likes))
        .route("/messages/{message_id}", get(messages::get_message))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/users/follow/{user_id}",
            post(users::follow).delete(users::unfollow),
        )
        .route("/users/profile", patch(users::update_profile))
        .route("/users/me", axum::routing::delete(users::delete_me))
        .route("/messages", post(messages::create_message))
        .route(
            "/messages/{message_id}/delete",
            post(messages::delete_message),
        )
        .route("/messages/{message_id}/like", post(messages::toggle_like))
        .route("/timeline", get(messages::timeline))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
