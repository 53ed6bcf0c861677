use std::sync::Arc;

use service::assets::AssetService;
use service::auth::repo::seaorm::SeaOrmAdminRepository;
use service::auth::AuthService;
use service::booking::repo::seaorm::SeaOrmBookingRepository;
use service::booking::BookingService;

pub type Bookings = BookingService<SeaOrmBookingRepository>;
pub type Auth = AuthService<SeaOrmAdminRepository>;

/// Shared handler state: the three services built over one connection pool
/// at startup.
#[derive(Clone)]
pub struct ServerState {
    pub bookings: Arc<Bookings>,
    pub assets: Arc<AssetService>,
    pub auth: Arc<Auth>,
    pub whatsapp_number: String,
}
