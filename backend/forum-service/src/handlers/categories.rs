use crate::models::Category;
use actix_web::HttpResponse;

/// The fixed category list, in display order
pub async fn list_categories() -> HttpResponse {
    HttpResponse::Ok().json(Category::ALL)
}
