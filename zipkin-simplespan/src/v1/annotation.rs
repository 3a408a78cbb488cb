use crate::model::Endpoint;
use crate::v1::constants::{CLIENT_ADDR, SERVER_ADDR};

/// A timestamped event, optionally tagged with the host that recorded it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Annotation {
    timestamp: u64,
    value: String,
    endpoint: Option<Endpoint>,
}

impl Annotation {
    /// Creates an annotation at `timestamp` (epoch microseconds).
    pub fn new<T: Into<String>>(timestamp: u64, value: T, endpoint: Option<Endpoint>) -> Self {
        Annotation {
            timestamp,
            value: value.into(),
            endpoint,
        }
    }

    /// Epoch microseconds of the event.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Event value, either a reserved RPC marker such as "cs" or a user event.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The host that recorded the event, absent when instrumentation omitted it.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }
}

/// Which side of an RPC an address annotation points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// "ca": the endpoint is the caller.
    Client,
    /// "sa": the endpoint is the callee.
    Server,
}

impl AddressKind {
    /// The reserved binary annotation key for this address.
    pub fn key(self) -> &'static str {
        match self {
            AddressKind::Client => CLIENT_ADDR,
            AddressKind::Server => SERVER_ADDR,
        }
    }
}

/// A fact about a span that has no timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryAnnotation {
    /// A string tag recorded by `endpoint`.
    String {
        /// Tag key, such as "http.path".
        key: String,
        /// Tag value, possibly empty.
        value: String,
        /// The host that recorded the tag.
        endpoint: Option<Endpoint>,
    },
    /// Records that `endpoint` took part in the RPC as the client or server.
    Address {
        /// Which role the endpoint played.
        kind: AddressKind,
        /// The remote participant.
        endpoint: Endpoint,
    },
}

impl BinaryAnnotation {
    /// Creates a string tag.
    pub fn string<K, V>(key: K, value: V, endpoint: Option<Endpoint>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        BinaryAnnotation::String {
            key: key.into(),
            value: value.into(),
            endpoint,
        }
    }

    /// Creates an address annotation.
    pub fn address(kind: AddressKind, endpoint: Endpoint) -> Self {
        BinaryAnnotation::Address { kind, endpoint }
    }

    /// The binary annotation key; "ca" or "sa" for addresses.
    pub fn key(&self) -> &str {
        match self {
            BinaryAnnotation::String { key, .. } => key,
            BinaryAnnotation::Address { kind, .. } => kind.key(),
        }
    }

    /// The endpoint attached to this binary annotation.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        match self {
            BinaryAnnotation::String { endpoint, .. } => endpoint.as_ref(),
            BinaryAnnotation::Address { endpoint, .. } => Some(endpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_keys() {
        let endpoint = Endpoint::new("backend".to_owned(), None);
        let ca = BinaryAnnotation::address(AddressKind::Client, endpoint.clone());
        let sa = BinaryAnnotation::address(AddressKind::Server, endpoint.clone());
        assert_eq!(ca.key(), "ca");
        assert_eq!(sa.key(), "sa");
        assert_eq!(sa.endpoint(), Some(&endpoint));
    }

    #[test]
    fn test_string_without_endpoint() {
        let tag = BinaryAnnotation::string("http.path", "/api", None);
        assert_eq!(tag.key(), "http.path");
        assert_eq!(tag.endpoint(), None);
    }
}
