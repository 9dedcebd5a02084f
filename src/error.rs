//! Errors raised while talking to a routing provider.

use std::fmt;

#[derive(Debug)]
pub enum RoutingError {
    /// Transport failure, non-success HTTP status or undecodable body.
    Http(reqwest::Error),
    /// The provider answered, but its status field was not the success sentinel.
    Status(String),
    /// Successful status with an empty route list.
    NoRoutes,
    /// Route geometry with fewer than two vertices.
    DegenerateGeometry(usize),
}

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::Http(err) => write!(f, "routing request failed: {}", err),
            RoutingError::Status(code) => write!(f, "routing provider returned status {}", code),
            RoutingError::NoRoutes => write!(f, "routing provider returned no routes"),
            RoutingError::DegenerateGeometry(n) => {
                write!(f, "route geometry has {} vertices, need at least 2", n)
            }
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoutingError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RoutingError {
    fn from(err: reqwest::Error) -> Self {
        RoutingError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_cause() {
        assert_eq!(
            RoutingError::Status("NoRoute".to_string()).to_string(),
            "routing provider returned status NoRoute"
        );
        assert!(RoutingError::DegenerateGeometry(1).to_string().contains("1 vertices"));
        assert!(RoutingError::NoRoutes.to_string().contains("no routes"));
    }
}
