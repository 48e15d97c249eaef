//! Built-in IOL endpoint and market defaults.

/// IOL API origin shared by the token endpoint and the data endpoints.
pub const BASE_URL: &str = "https://api.invertironline.com";

/// Country used when the caller has no preference.
pub const DEFAULT_COUNTRY: &str = "argentina";

/// Instrument type used when the caller has no preference.
pub const DEFAULT_INSTRUMENT: &str = "acciones";

/// Market used when the caller has no preference (Bolsa de Comercio de Buenos Aires).
pub const DEFAULT_MARKET: &str = "bCBA";
