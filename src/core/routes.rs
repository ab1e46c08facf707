//! Static route table.
//!
//! Built once at startup and immutable afterwards. Lookup is exact-match on
//! the path component; an unmatched path resolves to the not-found route.

use serde::Deserialize;

use crate::config::{NOT_FOUND_KEY, ROUTES_TOML};
use crate::core::error::RouteTableError;
use crate::models::Route;

#[derive(Deserialize)]
struct RouteFile {
    routes: Vec<Route>,
}

/// Ordered set of routes with a guaranteed not-found sentinel.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    not_found: usize,
}

impl RouteTable {
    /// Build a table from routes, validating uniqueness and the sentinel.
    ///
    /// The sentinel is the route keyed `notFound`.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        for (i, route) in routes.iter().enumerate() {
            if !route.path.starts_with('/') {
                return Err(RouteTableError::RelativePath(route.path.clone()));
            }
            let earlier = &routes[..i];
            if earlier.iter().any(|r| r.path == route.path) {
                return Err(RouteTableError::DuplicatePath(route.path.clone()));
            }
            if earlier.iter().any(|r| r.key == route.key) {
                return Err(RouteTableError::DuplicateKey(route.key.clone()));
            }
        }

        let not_found = routes
            .iter()
            .position(|r| r.key == NOT_FOUND_KEY)
            .ok_or(RouteTableError::MissingNotFound)?;

        Ok(Self { routes, not_found })
    }

    /// Parse a `[[routes]]` TOML document.
    pub fn from_toml(source: &str) -> Result<Self, RouteTableError> {
        let file: RouteFile = toml::from_str(source)?;
        Self::new(file.routes)
    }

    /// The site's embedded route table.
    pub fn site() -> Result<Self, RouteTableError> {
        Self::from_toml(ROUTES_TOML)
    }

    /// Resolve a path (query already stripped) to its route.
    ///
    /// Never fails: unmatched paths yield the not-found route.
    pub fn resolve(&self, path: &str) -> &Route {
        self.lookup(path).unwrap_or_else(|| self.not_found())
    }

    /// Exact-match lookup without the not-found fallback.
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Whether `route` is the not-found sentinel.
    pub fn is_not_found(&self, route: &Route) -> bool {
        route.key == self.not_found().key
    }

    pub fn not_found(&self) -> &Route {
        &self.routes[self.not_found]
    }

    /// Look up a route by key.
    pub fn get(&self, key: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
