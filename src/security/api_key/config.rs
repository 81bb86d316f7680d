//! API key extraction configuration.

/// Where to look for the API key in requests.
#[derive(Debug, Clone)]
pub enum ApiKeyLocation {
    /// Look for the API key in a header (e.g., "X-API-Key").
    Header(String),
    /// Look for the API key in a query parameter (e.g., "?api_key=...").
    Query(String),
    /// Look for the API key in the Authorization header with a custom
    /// scheme. Example: `Authorization: ApiKey tok_abc123`
    AuthorizationHeader(String),
}

impl Default for ApiKeyLocation {
    fn default() -> Self {
        Self::Header("X-API-Key".to_string())
    }
}

impl ApiKeyLocation {
    /// Creates a header-based location.
    pub fn header(name: impl Into<String>) -> Self {
        Self::Header(name.into())
    }

    /// Creates a query parameter-based location.
    pub fn query(name: impl Into<String>) -> Self {
        Self::Query(name.into())
    }

    /// Creates an Authorization header-based location with a custom scheme.
    pub fn authorization(scheme: impl Into<String>) -> Self {
        Self::AuthorizationHeader(scheme.into())
    }
}

/// Configuration for API key extraction: the locations checked, in order.
#[derive(Debug, Clone)]
pub struct ApiKeyConfig {
    locations: Vec<ApiKeyLocation>,
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self {
            locations: vec![
                ApiKeyLocation::default(),
                ApiKeyLocation::authorization("ApiKey"),
                ApiKeyLocation::query("api_key"),
            ],
        }
    }
}

impl ApiKeyConfig {
    /// Creates a configuration with the default locations
    /// (X-API-Key header, `Authorization: ApiKey`, `?api_key=`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that only looks in a header.
    pub fn header(name: impl Into<String>) -> Self {
        Self {
            locations: vec![ApiKeyLocation::Header(name.into())],
        }
    }

    /// Creates a configuration that only looks in a query parameter.
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            locations: vec![ApiKeyLocation::Query(name.into())],
        }
    }

    /// Creates a configuration that only looks in the Authorization header.
    pub fn authorization(scheme: impl Into<String>) -> Self {
        Self {
            locations: vec![ApiKeyLocation::AuthorizationHeader(scheme.into())],
        }
    }

    /// Adds a location to look for the API key.
    pub fn add_location(mut self, location: ApiKeyLocation) -> Self {
        self.locations.push(location);
        self
    }

    /// Sets the locations to look for the API key.
    pub fn locations(mut self, locations: Vec<ApiKeyLocation>) -> Self {
        self.locations = locations;
        self
    }

    /// Returns the locations to check for the API key.
    pub fn get_locations(&self) -> &[ApiKeyLocation] {
        &self.locations
    }
}
