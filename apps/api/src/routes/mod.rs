pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{admin, auth, chat, courses, dashboard, marks, profile, riasec};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/register", post(auth::handlers::handle_register))
        .route("/api/v1/auth/login", post(auth::handlers::handle_login))
        .route("/api/v1/auth/logout", post(auth::handlers::handle_logout))
        // Onboarding: marks, then the RIASEC survey
        .route(
            "/api/v1/marks",
            get(marks::handlers::handle_list_marks).post(marks::handlers::handle_add_mark),
        )
        .route(
            "/api/v1/marks/subjects",
            get(marks::handlers::handle_default_subjects),
        )
        .route(
            "/api/v1/marks/finish",
            post(marks::handlers::handle_finish_marks),
        )
        .route(
            "/api/v1/marks/:id",
            patch(marks::handlers::handle_update_mark).delete(marks::handlers::handle_delete_mark),
        )
        .route(
            "/api/v1/survey",
            get(riasec::handlers::handle_get_survey).post(riasec::handlers::handle_submit_survey),
        )
        .route(
            "/api/v1/riasec/results",
            get(riasec::handlers::handle_get_results),
        )
        .route(
            "/api/v1/riasec/traits/:code",
            get(riasec::handlers::handle_get_trait),
        )
        // Home and dashboard
        .route("/api/v1/home", get(dashboard::handlers::handle_home))
        .route("/api/v1/dashboard", get(dashboard::handlers::handle_dashboard))
        // Advisor chat
        .route("/api/v1/chat", get(chat::handlers::handle_get_chat))
        .route("/api/v1/chat/send", post(chat::handlers::handle_send_message))
        .route("/api/v1/chat/clear", post(chat::handlers::handle_clear_chat))
        // Course graph
        .route(
            "/api/v1/courses/search",
            get(courses::handlers::handle_search_courses),
        )
        .route("/api/v1/courses/:code", get(courses::handlers::handle_get_course))
        .route(
            "/api/v1/courses/:code/tree",
            get(courses::handlers::handle_course_tree),
        )
        .route("/api/v1/jobs/search", get(courses::handlers::handle_search_jobs))
        .route(
            "/api/v1/playlist",
            get(courses::handlers::handle_get_playlist)
                .post(courses::handlers::handle_add_to_playlist),
        )
        .route(
            "/api/v1/playlist/:code",
            delete(courses::handlers::handle_remove_from_playlist),
        )
        // Profiles
        .route(
            "/api/v1/profile",
            get(profile::handlers::handle_get_profile)
                .patch(profile::handlers::handle_patch_profile)
                .put(profile::handlers::handle_put_profile),
        )
        .route(
            "/api/v1/profile/images",
            get(profile::handlers::handle_get_images).post(profile::handlers::handle_upload_image),
        )
        .route(
            "/api/v1/public/profiles/:username",
            get(profile::handlers::handle_public_profile),
        )
        // Admin
        .route("/api/v1/admin/stats", get(admin::handlers::handle_stats))
        .route("/api/v1/admin/admins", get(admin::handlers::handle_list_admins))
        .route(
            "/api/v1/admin/users/:username",
            patch(admin::handlers::handle_set_admin),
        )
        .with_state(state)
}
