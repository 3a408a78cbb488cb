use serde::Serialize;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use typed_builder::TypedBuilder;

/// The network context of a node in the service graph.
///
/// Endpoints compare structurally: two endpoints are the same participant
/// only when every field matches.
#[derive(TypedBuilder, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[builder(setter(strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    service_name: Option<String>,
    #[builder(setter(strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    ipv4: Option<Ipv4Addr>,
    #[builder(setter(strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    ipv6: Option<Ipv6Addr>,
    #[builder(setter(strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
}

impl Endpoint {
    /// Creates an endpoint for `service_name`, listening on `socket_addr` if known.
    pub fn new(service_name: String, socket_addr: Option<SocketAddr>) -> Self {
        match socket_addr {
            Some(SocketAddr::V4(v4)) => Endpoint::builder()
                .service_name(service_name)
                .ipv4(*v4.ip())
                .port(v4.port())
                .build(),
            Some(SocketAddr::V6(v6)) => Endpoint::builder()
                .service_name(service_name)
                .ipv6(*v6.ip())
                .port(v6.port())
                .build(),
            None => Endpoint::builder().service_name(service_name).build(),
        }
    }

    /// Lower-case label of the service, if instrumentation recorded one.
    pub fn service_name(&self) -> Option<&str> {
        self.service_name.as_deref()
    }

    /// IPv4 address of the host.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.ipv4
    }

    /// IPv6 address of the host.
    pub fn ipv6(&self) -> Option<Ipv6Addr> {
        self.ipv6
    }

    /// Listen port, when the endpoint is a server or the port is known.
    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

#[cfg(test)]
mod tests {
    use crate::model::endpoint::Endpoint;
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

    #[test]
    fn test_empty() {
        test_json_serialization(Endpoint::builder().build(), "{}");
    }

    #[test]
    fn test_ipv4_empty() {
        test_json_serialization(
            Endpoint::builder()
                .service_name("open-telemetry".to_owned())
                .ipv4(Ipv4Addr::new(127, 0, 0, 1))
                .port(8080)
                .build(),
            "{\"serviceName\":\"open-telemetry\",\"ipv4\":\"127.0.0.1\",\"port\":8080}",
        );
    }

    #[test]
    fn test_new_from_socket_addr() {
        let v4 = Endpoint::new(
            "backend".to_owned(),
            Some(SocketAddr::new(Ipv4Addr::new(192, 168, 99, 101).into(), 9000)),
        );
        assert_eq!(v4.service_name(), Some("backend"));
        assert_eq!(v4.ipv4(), Some(Ipv4Addr::new(192, 168, 99, 101)));
        assert_eq!(v4.ipv6(), None);
        assert_eq!(v4.port(), Some(9000));

        let v6 = Endpoint::new(
            "backend".to_owned(),
            Some(SocketAddr::new(Ipv6Addr::LOCALHOST.into(), 9000)),
        );
        assert_eq!(v6.ipv4(), None);
        assert_eq!(v6.ipv6(), Some(Ipv6Addr::LOCALHOST));

        let bare = Endpoint::new("backend".to_owned(), None);
        assert_eq!(bare, Endpoint::builder().service_name("backend".to_owned()).build());
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Endpoint::new("frontend".to_owned(), None);
        let b = Endpoint::new("frontend".to_owned(), None);
        let c = Endpoint::builder()
            .service_name("frontend".to_owned())
            .port(80)
            .build();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    fn test_json_serialization(endpoint: Endpoint, desired: &str) {
        let result = serde_json::to_string(&endpoint).unwrap();
        assert_eq!(result, desired.to_owned());
    }
}
