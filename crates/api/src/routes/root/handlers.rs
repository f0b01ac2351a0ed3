#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn root() -> &'static str {
    "OK"
}
