use crate::model::{annotation::Annotation, endpoint::Endpoint, id};
use opentelemetry::trace::{SpanId, TraceId};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use typed_builder::TypedBuilder;

/// The role a span's local endpoint played in an RPC.
///
/// A span without a kind (`None` wherever `Option<Kind>` appears) is local
/// work, or an RPC whose role was never recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    /// The local endpoint sent the request and received the response.
    Client,
    /// The local endpoint received the request and sent the response.
    Server,
}

/// A single participant's view of an operation.
///
/// Unlike a [`v1::Span`](crate::v1::Span), a simple span never mixes data
/// from two hosts: every annotation and tag belongs to the local endpoint.
#[derive(TypedBuilder, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub(crate) trace_id: TraceId,
    #[builder(setter(strip_option), default)]
    pub(crate) parent_id: Option<SpanId>,
    pub(crate) id: SpanId,
    #[builder(setter(into), default)]
    pub(crate) name: String,
    #[builder(default)]
    pub(crate) kind: Option<Kind>,
    #[builder(setter(strip_option), default)]
    pub(crate) local_endpoint: Option<Endpoint>,
    #[builder(setter(strip_option), default)]
    pub(crate) remote_endpoint: Option<Endpoint>,
    #[builder(setter(strip_option), default)]
    pub(crate) start_timestamp: Option<u64>,
    #[builder(setter(strip_option), default)]
    pub(crate) finish_timestamp: Option<u64>,
    #[builder(default)]
    pub(crate) annotations: Vec<Annotation>,
    #[builder(default)]
    pub(crate) tags: BTreeMap<String, String>,
    #[builder(default = false)]
    pub(crate) shared: bool,
}

impl Span {
    /// Trace this span belongs to.
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Parent span id, absent on root spans.
    pub fn parent_id(&self) -> Option<SpanId> {
        self.parent_id
    }

    /// Span id, unique within the trace (or within the client/server pair if shared).
    pub fn id(&self) -> SpanId {
        self.id
    }

    /// Logical operation name, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// RPC role of the local endpoint.
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    /// The host that recorded this span.
    pub fn local_endpoint(&self) -> Option<&Endpoint> {
        self.local_endpoint.as_ref()
    }

    /// The other side of the connection, when known.
    pub fn remote_endpoint(&self) -> Option<&Endpoint> {
        self.remote_endpoint.as_ref()
    }

    /// Epoch microseconds of the start of this span.
    pub fn start_timestamp(&self) -> Option<u64> {
        self.start_timestamp
    }

    /// Epoch microseconds of the end of this span. Absent while the span is incomplete.
    pub fn finish_timestamp(&self) -> Option<u64> {
        self.finish_timestamp
    }

    /// `finish - start`, when both are known and ordered.
    pub fn duration(&self) -> Option<u64> {
        id::duration(self.start_timestamp, self.finish_timestamp)
    }

    /// Events recorded by the local endpoint, in recorded order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Tags recorded by the local endpoint.
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// True for the server side of an RPC that reuses the client's span id.
    pub fn shared(&self) -> bool {
        self.shared
    }
}

/// Zipkin v2 JSON shape of a [`Span`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSpan<'a> {
    trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<String>,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<Kind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_endpoint: Option<&'a Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote_endpoint: Option<&'a Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotations: Option<&'a [Annotation]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shared: Option<bool>,
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        JsonSpan {
            trace_id: id::trace_id_to_hex(self.trace_id),
            parent_id: self.parent_id.map(id::span_id_to_hex),
            id: id::span_id_to_hex(self.id),
            kind: self.kind,
            name: Some(self.name.as_str()).filter(|name| !name.is_empty()),
            timestamp: self.start_timestamp,
            duration: self.duration(),
            local_endpoint: self.local_endpoint.as_ref(),
            remote_endpoint: self.remote_endpoint.as_ref(),
            annotations: Some(self.annotations.as_slice()).filter(|a| !a.is_empty()),
            tags: Some(&self.tags).filter(|tags| !tags.is_empty()),
            shared: self.shared.then_some(true),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::annotation::Annotation;
    use crate::model::endpoint::Endpoint;
    use crate::model::span::{Kind, Span};
    use opentelemetry::trace::{SpanId, TraceId};
    use std::collections::BTreeMap;
    use std::net::Ipv4Addr;

    fn trace_id(value: u128) -> TraceId {
        TraceId::from_bytes(value.to_be_bytes())
    }

    fn span_id(value: u64) -> SpanId {
        SpanId::from_bytes(value.to_be_bytes())
    }

    #[test]
    fn test_empty() {
        test_json_serialization(
            Span::builder().trace_id(trace_id(1)).id(span_id(2)).build(),
            "{\"traceId\":\"0000000000000001\",\"id\":\"0000000000000002\"}",
        );
    }

    #[test]
    fn test_full_span() {
        let mut tags = BTreeMap::new();
        tags.insert("a".to_owned(), "b".to_owned());
        test_json_serialization(
            Span::builder()
                .trace_id(trace_id(0x4e44_1824_ec2b_6a44_ffdc_9bb9_a645_3df3))
                .parent_id(span_id(0xffdc_9bb9_a645_3df3))
                .id(span_id(0xefdc_9cd9_a184_9df3))
                .kind(Some(Kind::Server))
                .name("main")
                .start_timestamp(1_502_787_600_000_000)
                .finish_timestamp(1_502_787_600_150_000)
                .local_endpoint(
                    Endpoint::builder()
                        .service_name("remote-service".to_owned())
                        .ipv4(Ipv4Addr::new(192, 168, 0, 1))
                        .port(8080)
                        .build()
                )
                .remote_endpoint(
                    Endpoint::builder()
                        .service_name("open-telemetry".to_owned())
                        .ipv4(Ipv4Addr::new(127, 0, 0, 1))
                        .port(8080)
                        .build()
                )
                .annotations(vec![Annotation::new(1_502_780_000_000_000, "interesting event")])
                .tags(tags)
                .shared(true)
                .build(),
            "{\"traceId\":\"4e441824ec2b6a44ffdc9bb9a6453df3\",\"parentId\":\"ffdc9bb9a6453df3\",\"id\":\"efdc9cd9a1849df3\",\"kind\":\"SERVER\",\"name\":\"main\",\"timestamp\":1502787600000000,\"duration\":150000,\"localEndpoint\":{\"serviceName\":\"remote-service\",\"ipv4\":\"192.168.0.1\",\"port\":8080},\"remoteEndpoint\":{\"serviceName\":\"open-telemetry\",\"ipv4\":\"127.0.0.1\",\"port\":8080},\"annotations\":[{\"timestamp\":1502780000000000,\"value\":\"interesting event\"}],\"tags\":{\"a\":\"b\"},\"shared\":true}",
        );
    }

    #[test]
    fn test_incomplete_span_has_no_duration() {
        let span = Span::builder()
            .trace_id(trace_id(1))
            .id(span_id(2))
            .kind(Some(Kind::Client))
            .start_timestamp(1_000)
            .build();
        assert_eq!(span.duration(), None);
        test_json_serialization(
            span,
            "{\"traceId\":\"0000000000000001\",\"id\":\"0000000000000002\",\"kind\":\"CLIENT\",\"timestamp\":1000}",
        );
    }

    #[test]
    fn test_duration_is_never_negative() {
        let span = Span::builder()
            .trace_id(trace_id(1))
            .id(span_id(2))
            .start_timestamp(2_000)
            .finish_timestamp(1_000)
            .build();
        assert_eq!(span.duration(), None);
    }

    fn test_json_serialization(span: Span, desired: &str) {
        let result = serde_json::to_string(&span).unwrap();
        assert_eq!(result, desired.to_owned());
    }
}
