//! NewType for the address of the ReProv API, which users provide when first configuring a client.

use crate::errors::InvalidServiceUrl;
use aliri_braid::braid;

/// A [ServiceUrl] is the root URL of the ReProv API, e.g.
/// `https://reprov.example.org/api`
#[braid(validator, serde)]
pub struct ServiceUrl(String);

impl aliri_braid::Validator for ServiceUrl {
    type Error = InvalidServiceUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            Err(InvalidServiceUrl::Protocol(s.to_string()))
        } else if s.contains('?') {
            Err(InvalidServiceUrl::Query(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl ServiceUrl {
    /// Join a resource path segment onto this URL, e.g. `workflow_registry`.
    pub fn resource(&self, segment: &str) -> super::ResourceUrl {
        let root = self.as_str().trim_end_matches('/');
        super::ResourceUrl::new(format!("{}/{}", root, segment.trim_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("http://localhost")]
    #[case("http://localhost:8000/")]
    #[case("https://reprov.example.org/api")]
    fn test_parse_url(#[case] url: &str) {
        assert!(ServiceUrl::try_from(url).is_ok());
    }

    #[rstest]
    #[case("ftp://localhost/")]
    #[case("localhost:8000")]
    fn test_reject_bad_protocol(#[case] url: &str) {
        assert!(matches!(
            ServiceUrl::try_from(url).unwrap_err(),
            InvalidServiceUrl::Protocol { .. }
        ))
    }

    #[test]
    fn test_reject_query_string() {
        assert!(matches!(
            ServiceUrl::try_from("http://localhost/?page=2").unwrap_err(),
            InvalidServiceUrl::Query { .. }
        ))
    }

    #[rstest]
    #[case("http://localhost:8000", "http://localhost:8000/provenance")]
    #[case("http://localhost:8000/", "http://localhost:8000/provenance")]
    #[case("http://localhost:8000///", "http://localhost:8000/provenance")]
    fn test_resource_trims_slashes(#[case] root: &str, #[case] expected: &str) {
        let url = ServiceUrl::try_from(root).unwrap();
        assert_eq!(url.resource("provenance").as_str(), expected);
    }
}
