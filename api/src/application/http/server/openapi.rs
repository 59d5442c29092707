use crate::application::http::{
    authentication::router::AuthenticationApiDoc, file::router::FileApiDoc,
    health::router::HealthApiDoc, metadata::router::MetadataApiDoc,
    search::router::SearchApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Box Portal API"
    ),
    nest(
        (path = "/auth", api = AuthenticationApiDoc),
        (path = "/files", api = FileApiDoc),
        (path = "/files/search", api = SearchApiDoc),
        (path = "/files/metadata/templates", api = MetadataApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
