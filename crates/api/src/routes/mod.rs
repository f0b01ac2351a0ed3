pub mod billing;
pub mod download;
pub mod gallery;
pub mod identity;
pub mod manage;
pub mod plans;
pub mod root;

use crate::routes::billing::handlers::{checkout, stripe_webhook};
use crate::routes::download::handlers::{download_gallery_zip, download_single_photo};
use crate::routes::gallery::handlers::{get_gallery, get_gallery_photos, verify_password};
use crate::routes::manage::handlers::{create_gallery, list_galleries, share_gallery};
use crate::routes::plans::handlers::check_plan_permission;
use crate::routes::root::handlers::root;
use crate::state::AppState;
use axum::http::HeaderValue;
use axum::{
    Router,
    routing::{get, post},
};
use common_artydrop::settings;
use tower_http::cors::{Any, CorsLayer};
use tower_http::{LatencyUnit, trace::TraceLayer};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

// --- API Documentation ---
#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        // Public gallery handlers
        gallery::handlers::get_gallery,
        gallery::handlers::verify_password,
        gallery::handlers::get_gallery_photos,
        // Download handlers
        download::handlers::download_single_photo,
        download::handlers::download_gallery_zip,
        // Plan policy handlers
        plans::handlers::check_plan_permission,
        // Billing handlers
        billing::handlers::checkout,
        billing::handlers::stripe_webhook,
        // Gallery management handlers
        manage::handlers::create_gallery,
        manage::handlers::list_galleries,
        manage::handlers::share_gallery,
    ),
    components(
        schemas(
            // Shared enums
            common_artydrop::MediaKind,
            common_artydrop::GalleryStatus,
            // Gallery schemas
            gallery::interfaces::GallerySummaryResponse,
            gallery::interfaces::VerifyPasswordBody,
            gallery::interfaces::VerifyPasswordResponse,
            gallery::interfaces::GalleryPhotosResponse,
            gallery::interfaces::PhotoDto,
            gallery::interfaces::FolderDto,
            // Download schemas
            download::interfaces::DownloadPhotoBody,
            // Plan schemas
            plans::interfaces::PlanAction,
            plans::interfaces::CheckPermissionBody,
            plans::interfaces::PermissionDecision,
            // Billing schemas
            billing::interfaces::CheckoutBody,
            billing::interfaces::CheckoutResponse,
            // Management schemas
            manage::interfaces::CreateGalleryBody,
            manage::interfaces::GalleryResponse,
            manage::interfaces::ShareGalleryBody,
            manage::interfaces::ShareLinkResponse,
            manage::interfaces::GalleryListItem,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Artydrop", description = "Artydrop gallery API"),
        (name = "Galleries", description = "Public share-token access and owner management")
    )
)]
struct ApiDoc;

/// A modifier to add bearer token security to the `OpenAPI` specification.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

// --- Router Construction ---
pub fn create_router(state: AppState) -> Router {
    let openapi = ApiDoc::openapi();

    Router::new()
        .merge(Scalar::with_url("/docs", openapi))
        .merge(public_routes())
        .merge(account_routes())
        .with_state(state)
        .layer(cors_layer())
        .layer(
            TraceLayer::new_for_http().on_response(
                tower_http::trace::DefaultOnResponse::new()
                    .level(tracing::Level::INFO)
                    .latency_unit(LatencyUnit::Micros),
            ),
        )
}

/// Everything reachable with a share token (or no credential at all).
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/gallery/{token}", get(get_gallery))
        .route("/api/gallery/{token}/verify", post(verify_password))
        .route("/api/gallery/{token}/photos", get(get_gallery_photos))
        .route(
            "/api/gallery/{token}/download-photo",
            post(download_single_photo),
        )
        .route(
            "/api/gallery/{token}/download-zip",
            post(download_gallery_zip),
        )
        .route("/api/webhooks/stripe", post(stripe_webhook))
}

/// Endpoints requiring the identity provider's bearer credential; the
/// `AuthUser` extractor on each handler rejects anonymous calls.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api/galleries", post(create_gallery).get(list_galleries))
        .route("/api/galleries/{id}/share", post(share_gallery))
        .route(
            "/api/galleries/check-permission",
            post(check_plan_permission),
        )
        .route("/api/checkout", post(checkout))
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = settings()
        .api
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
