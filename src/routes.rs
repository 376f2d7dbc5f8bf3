//! Route table of the client application

/// A navigable page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteInfo {
    pub path: &'static str,
    pub name: &'static str,
}

pub const HOME: RouteInfo = RouteInfo {
    path: "/",
    name: "home",
};

pub const DRINKS: RouteInfo = RouteInfo {
    path: "/drinks",
    name: "drinks",
};

pub const PERSONS: RouteInfo = RouteInfo {
    path: "/persons",
    name: "persons",
};

pub const ROUTES: [RouteInfo; 3] = [HOME, DRINKS, PERSONS];

impl RouteInfo {
    /// Route for an exact path, ignoring a trailing slash
    pub fn by_path(path: &str) -> Option<RouteInfo> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        ROUTES.iter().copied().find(|route| route.path == path)
    }

    pub fn by_name(name: &str) -> Option<RouteInfo> {
        ROUTES.iter().copied().find(|route| route.name == name)
    }
}
