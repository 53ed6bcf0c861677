use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct BookingRequestDoc {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub package: String,
    pub date: String,
    pub details: Option<String>,
}

#[derive(ToSchema)]
pub struct StatusBodyDoc {
    pub status: String,
}

#[derive(ToSchema)]
pub struct LoginRequestDoc {
    pub username: String,
    pub password: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::bookings::create,
        crate::routes::bookings::list,
        crate::routes::bookings::set_status,
        crate::routes::admin::login,
    ),
    components(
        schemas(
            BookingRequestDoc,
            StatusBodyDoc,
            LoginRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "booking"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
