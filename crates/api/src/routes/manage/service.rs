use crate::routes::gallery::db_model::{Gallery, GalleryLink};
use crate::routes::gallery::hashing::hash_password;
use crate::routes::manage::error::ManageError;
use crate::routes::manage::interfaces::{
    CreateGalleryBody, GalleryListItem, GalleryResponse, ShareGalleryBody, ShareLinkResponse,
};
use crate::routes::plans::limits::limits_for;
use crate::routes::plans::service::{
    count_galleries, decide_create_gallery, load_profile, plan_is_active,
};
use chrono::Local;
use common_artydrop::{nice_id, settings};
use sqlx::PgPool;

const NO_ACTIVE_PLAN: &str = "You need an active plan to do this.";

/// Create a gallery in `draft` status, subject to the caller's plan limits.
pub async fn create_gallery(
    pool: &PgPool,
    user_id: &str,
    body: &CreateGalleryBody,
) -> Result<GalleryResponse, ManageError> {
    let profile = load_profile(pool, user_id).await?;
    let limits = profile
        .filter(|p| plan_is_active(p, Local::now().date_naive()))
        .and_then(|p| limits_for(p.plan_tier))
        .ok_or_else(|| ManageError::PlanDenied(NO_ACTIVE_PLAN.to_string()))?;

    let existing = count_galleries(pool, user_id).await?;
    let decision = decide_create_gallery(&limits, existing);
    if !decision.allowed {
        return Err(ManageError::PlanDenied(
            decision.reason.unwrap_or_else(|| NO_ACTIVE_PLAN.to_string()),
        ));
    }

    let id = nice_id(settings().database.token_length);
    let gallery = sqlx::query_as::<_, Gallery>(
        "INSERT INTO galleries (id, owner_id, title, client_name, event_date, notes)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, owner_id, title, client_name, event_date, notes, status,
                   password_hash, allow_download, cover_media_id, created_at, updated_at",
    )
    .bind(&id)
    .bind(user_id)
    .bind(&body.title)
    .bind(&body.client_name)
    .bind(body.event_date)
    .bind(&body.notes)
    .fetch_one(pool)
    .await?;

    Ok(to_response(gallery))
}

/// Create or update the gallery's share link and activate the gallery.
///
/// In practice a gallery has one link; a repeated share call updates that
/// link's settings and keeps its token stable.
pub async fn share_gallery(
    pool: &PgPool,
    user_id: &str,
    gallery_id: &str,
    body: &ShareGalleryBody,
) -> Result<ShareLinkResponse, ManageError> {
    let gallery = owned_gallery(pool, user_id, gallery_id).await?;

    let password_hash = match &body.password {
        Some(password) => Some(hash_password(password).map_err(ManageError::Internal)?),
        None => None,
    };

    let existing = sqlx::query_as::<_, GalleryLink>(
        "SELECT id, gallery_id, token, password_hash, expires_at, allow_download,
                view_count, last_viewed_at
         FROM gallery_links WHERE gallery_id = $1
         ORDER BY id LIMIT 1",
    )
    .bind(&gallery.id)
    .fetch_optional(pool)
    .await?;

    let link = match existing {
        Some(link) => {
            sqlx::query_as::<_, GalleryLink>(
                "UPDATE gallery_links
                 SET password_hash = $2, expires_at = $3, allow_download = $4
                 WHERE id = $1
                 RETURNING id, gallery_id, token, password_hash, expires_at, allow_download,
                           view_count, last_viewed_at",
            )
            .bind(&link.id)
            .bind(&password_hash)
            .bind(body.expires_at)
            .bind(body.allow_download)
            .fetch_one(pool)
            .await?
        }
        None => {
            let token_length = settings().database.token_length;
            sqlx::query_as::<_, GalleryLink>(
                "INSERT INTO gallery_links
                     (id, gallery_id, token, password_hash, expires_at, allow_download)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id, gallery_id, token, password_hash, expires_at, allow_download,
                           view_count, last_viewed_at",
            )
            .bind(nice_id(token_length))
            .bind(&gallery.id)
            .bind(nice_id(token_length))
            .bind(&password_hash)
            .bind(body.expires_at)
            .bind(body.allow_download)
            .fetch_one(pool)
            .await?
        }
    };

    // Sharing is what takes a gallery out of draft.
    sqlx::query("UPDATE galleries SET status = 'active', updated_at = NOW()
                 WHERE id = $1 AND status = 'draft'")
        .bind(&gallery.id)
        .execute(pool)
        .await?;

    Ok(ShareLinkResponse {
        requires_password: link.requires_password(),
        token: link.token,
        expires_at: link.expires_at,
        allow_download: link.allow_download,
    })
}

pub async fn list_galleries(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<GalleryListItem>, ManageError> {
    let items = sqlx::query_as::<_, GalleryListItem>(
        "SELECT g.id, g.title, g.client_name, g.event_date, g.status, g.created_at,
                COUNT(m.id) AS media_count
         FROM galleries g
         LEFT JOIN media_items m ON m.gallery_id = g.id
         WHERE g.owner_id = $1
         GROUP BY g.id
         ORDER BY g.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

async fn owned_gallery(
    pool: &PgPool,
    user_id: &str,
    gallery_id: &str,
) -> Result<Gallery, ManageError> {
    sqlx::query_as::<_, Gallery>(
        "SELECT id, owner_id, title, client_name, event_date, notes, status,
                password_hash, allow_download, cover_media_id, created_at, updated_at
         FROM galleries WHERE id = $1 AND owner_id = $2",
    )
    .bind(gallery_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ManageError::NotFound)
}

fn to_response(gallery: Gallery) -> GalleryResponse {
    GalleryResponse {
        id: gallery.id,
        title: gallery.title,
        client_name: gallery.client_name,
        event_date: gallery.event_date,
        notes: gallery.notes,
        status: gallery.status,
        allow_download: gallery.allow_download,
        created_at: gallery.created_at,
    }
}
