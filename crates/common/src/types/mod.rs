use serde::{Deserialize, Serialize};

/// Liveness payload with the couple of deployment facts the dashboard
/// surfaces.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
    /// Admin number booking notifications target.
    pub whatsapp: String,
    /// Active image storage backend.
    pub storage: &'static str,
}
