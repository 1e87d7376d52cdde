pub mod event;

/// Opaque bearer credential handed out at login. The token itself carries no
/// claims; the admin id it maps to lives in the key-value store until the TTL
/// expires or logout revokes it.
pub struct AccessToken(pub String);
