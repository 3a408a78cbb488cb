use crate::model::{id, Kind, Span};
use crate::v1::{
    self,
    constants::{CLIENT_RECV, CLIENT_SEND, LOCAL_COMPONENT, SERVER_RECV, SERVER_SEND},
    AddressKind, BinaryAnnotation,
};

/// The (start, finish) annotations a span of `kind` records.
fn rpc_annotations(kind: Option<Kind>) -> Option<(&'static str, &'static str)> {
    match kind {
        Some(Kind::Client) => Some((CLIENT_SEND, CLIENT_RECV)),
        Some(Kind::Server) => Some((SERVER_RECV, SERVER_SEND)),
        None => None,
    }
}

/// Converts a simple span into a v1 span.
///
/// The local endpoint is attached to every annotation and tag. The remote
/// endpoint, if any, becomes a single address annotation: "sa" for a client,
/// "ca" otherwise.
pub fn to_wire(span: &Span) -> v1::Span {
    let (trace_id_high, trace_id) = id::trace_id_halves(span.trace_id);
    let local = span.local_endpoint.as_ref();

    let mut annotations = Vec::with_capacity(span.annotations.len() + 2);
    if let Some((begin, end)) = rpc_annotations(span.kind) {
        if let Some(start) = span.start_timestamp {
            annotations.push(v1::Annotation::new(start, begin, local.cloned()));
        }
        if let Some(finish) = span.finish_timestamp {
            annotations.push(v1::Annotation::new(finish, end, local.cloned()));
        }
    }
    annotations.extend(
        span.annotations
            .iter()
            .map(|event| v1::Annotation::new(event.timestamp(), event.value(), local.cloned())),
    );
    // stable: RPC annotations stay ahead of events sharing their timestamp
    annotations.sort_by_key(v1::Annotation::timestamp);

    let mut binary_annotations: Vec<BinaryAnnotation> = span
        .tags
        .iter()
        .map(|(key, value)| BinaryAnnotation::string(key.as_str(), value.as_str(), local.cloned()))
        .collect();
    if span.kind.is_none() && span.tags.is_empty() {
        if let Some(local) = local {
            binary_annotations.push(BinaryAnnotation::string(LOCAL_COMPONENT, "", Some(local.clone())));
        }
    }
    if let Some(remote) = &span.remote_endpoint {
        let kind = match span.kind {
            Some(Kind::Client) => AddressKind::Server,
            Some(Kind::Server) | None => AddressKind::Client,
        };
        binary_annotations.push(BinaryAnnotation::address(kind, remote.clone()));
    }

    v1::Span {
        trace_id_high,
        trace_id,
        parent_id: span.parent_id.map(id::span_id_to_u64),
        id: id::span_id_to_u64(span.id),
        name: span.name.clone(),
        timestamp: span.start_timestamp,
        duration: span.duration(),
        annotations,
        binary_annotations,
    }
}
