/// Configuration options specific to the storefront service.
#[derive(Clone)]
pub struct ServerConfig {
    /// Phone number (international format, digits only) that receives the
    /// "contact seller" messaging deep links from the public catalog.
    pub contact_phone: String,
    /// Directory where uploaded product images are stored.
    pub media_root: String,
}
