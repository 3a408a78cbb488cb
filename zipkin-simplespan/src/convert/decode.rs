use crate::internal_logging::zipkin_debug;
use crate::model::{id, Annotation, Endpoint, Kind, Span};
use crate::v1::{
    self,
    constants::{CLIENT_RECV, CLIENT_SEND, LOCAL_COMPONENT, SERVER_RECV, SERVER_SEND},
    AddressKind, BinaryAnnotation,
};
use std::collections::BTreeMap;

/// An annotation marking a boundary of a client or server span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RpcAnnotation {
    ClientSend,
    ClientRecv,
    ServerRecv,
    ServerSend,
}

impl RpcAnnotation {
    fn parse(value: &str) -> Option<Self> {
        match value {
            CLIENT_SEND => Some(RpcAnnotation::ClientSend),
            CLIENT_RECV => Some(RpcAnnotation::ClientRecv),
            SERVER_RECV => Some(RpcAnnotation::ServerRecv),
            SERVER_SEND => Some(RpcAnnotation::ServerSend),
            _ => None,
        }
    }

    fn kind(self) -> Kind {
        match self {
            RpcAnnotation::ClientSend | RpcAnnotation::ClientRecv => Kind::Client,
            RpcAnnotation::ServerRecv | RpcAnnotation::ServerSend => Kind::Server,
        }
    }

    fn is_start(self) -> bool {
        matches!(self, RpcAnnotation::ClientSend | RpcAnnotation::ServerRecv)
    }
}

fn rpc_kind(annotation: &v1::Annotation) -> Option<Kind> {
    RpcAnnotation::parse(annotation.value()).map(RpcAnnotation::kind)
}

/// Everything one endpoint recorded in a v1 span.
#[derive(Debug)]
struct Group<'a> {
    local: Option<&'a Endpoint>,
    remote: Option<&'a Endpoint>,
    kind: Option<Kind>,
    annotations: Vec<&'a v1::Annotation>,
    tags: Vec<(&'a str, &'a str)>,
}

impl<'a> Group<'a> {
    fn new(local: Option<&'a Endpoint>) -> Self {
        Group {
            local,
            remote: None,
            kind: None,
            annotations: Vec::new(),
            tags: Vec::new(),
        }
    }

    fn records(&self, kind: Kind) -> bool {
        self.annotations.iter().any(|a| rpc_kind(a) == Some(kind))
    }

    /// Core annotations only mark a role when they name the endpoint that
    /// recorded them. Without one they stay plain events.
    fn infer_kind(&self) -> Option<Kind> {
        if self.local.is_none() {
            None
        } else if self.records(Kind::Client) {
            Some(Kind::Client)
        } else if self.records(Kind::Server) {
            Some(Kind::Server)
        } else {
            None
        }
    }

    /// Accepts `remote` unless it is the local endpoint itself.
    fn offer_remote(&mut self, address: AddressKind, remote: &'a Endpoint) {
        if self.local == Some(remote) {
            zipkin_debug!(name: "SpanDecoder.SelfAddressDropped", address = address.key());
        } else if self.remote.is_none() {
            self.remote = Some(remote);
        }
    }

    fn earliest(&self) -> Option<u64> {
        self.annotations.iter().map(|a| a.timestamp()).min()
    }

    fn latest(&self) -> Option<u64> {
        self.annotations.iter().map(|a| a.timestamp()).max()
    }

    /// Start and finish of this group. `wire` is the v1 span's own
    /// (timestamp, timestamp + duration), passed only to the owning group.
    fn timestamps(&self, wire: Option<(u64, Option<u64>)>) -> (Option<u64>, Option<u64>) {
        let Some(kind) = self.kind else {
            return match wire {
                Some((timestamp, finish)) => (Some(timestamp), finish),
                None => {
                    let earliest = self.earliest();
                    (earliest, self.latest().filter(|latest| Some(*latest) != earliest))
                }
            };
        };

        let (mut begin, mut end) = (None, None);
        for annotation in &self.annotations {
            match RpcAnnotation::parse(annotation.value()) {
                Some(rpc) if rpc.kind() == kind && rpc.is_start() => {
                    begin.get_or_insert(annotation.timestamp());
                }
                Some(rpc) if rpc.kind() == kind => {
                    end.get_or_insert(annotation.timestamp());
                }
                _ => {}
            }
        }
        let start = begin
            .or_else(|| wire.map(|(timestamp, _)| timestamp))
            .or_else(|| self.earliest());
        let finish = end.or_else(|| wire.and_then(|(_, finish)| finish));
        (start, finish)
    }

    fn into_span(self, wire: &v1::Span, owner_timing: Option<(u64, Option<u64>)>, shared: bool) -> Span {
        let (start_timestamp, mut finish_timestamp) = self.timestamps(owner_timing);
        if let (Some(start), Some(finish)) = (start_timestamp, finish_timestamp) {
            if finish < start {
                zipkin_debug!(name: "SpanDecoder.NegativeDurationDropped", start = start, finish = finish);
                finish_timestamp = None;
            }
        }

        // only this group's own boundary annotations are consumed
        let kind = self.kind;
        let annotations = self
            .annotations
            .iter()
            .filter(|a| kind.is_none() || rpc_kind(a) != kind)
            .map(|a| Annotation::new(a.timestamp(), a.value()))
            .collect();

        // a lone empty "lc" on an unlabeled span is the local-only marker to_wire adds
        let local_only = kind.is_none() && matches!(self.tags.as_slice(), [(LOCAL_COMPONENT, "")]);
        let mut tags = BTreeMap::new();
        if !local_only {
            for (key, value) in self.tags {
                tags.insert(key.to_owned(), value.to_owned());
            }
        }

        Span {
            trace_id: id::trace_id_from_halves(wire.trace_id_high, wire.trace_id),
            parent_id: wire.parent_id.map(id::span_id_from_u64),
            id: id::span_id_from_u64(wire.id),
            name: wire.name.clone(),
            kind,
            local_endpoint: self.local.cloned(),
            remote_endpoint: self.remote.cloned(),
            start_timestamp,
            finish_timestamp,
            annotations,
            tags,
            shared,
        }
    }
}

fn group_for<'a, 'g>(groups: &'g mut Vec<Group<'a>>, local: Option<&'a Endpoint>) -> &'g mut Group<'a> {
    let index = match groups.iter().position(|group| group.local == local) {
        Some(index) => index,
        None => {
            groups.push(Group::new(local));
            groups.len() - 1
        }
    };
    &mut groups[index]
}

/// Groups annotations and tags by endpoint, in order of first appearance.
///
/// Data without an endpoint belongs to the first endpoint seen, or forms the
/// only group when no data has an endpoint.
fn partition(span: &v1::Span) -> (Vec<Group<'_>>, Vec<(AddressKind, &Endpoint)>) {
    let first_endpoint = span
        .annotations
        .iter()
        .filter_map(v1::Annotation::endpoint)
        .chain(span.binary_annotations.iter().filter_map(|binary| match binary {
            BinaryAnnotation::String { endpoint, .. } => endpoint.as_ref(),
            BinaryAnnotation::Address { .. } => None,
        }))
        .next();

    let mut groups = Vec::new();
    let mut addresses = Vec::new();
    for annotation in &span.annotations {
        let local = annotation.endpoint().or(first_endpoint);
        group_for(&mut groups, local).annotations.push(annotation);
    }
    for binary in &span.binary_annotations {
        match binary {
            BinaryAnnotation::String {
                key,
                value,
                endpoint,
            } => {
                let local = endpoint.as_ref().or(first_endpoint);
                group_for(&mut groups, local)
                    .tags
                    .push((key.as_str(), value.as_str()));
            }
            BinaryAnnotation::Address { kind, endpoint } => addresses.push((*kind, endpoint)),
        }
    }
    if groups.is_empty() {
        groups.push(Group::new(None));
    }
    (groups, addresses)
}

/// Splits an endpoint that recorded both client and server annotations into a
/// client group and a server group sharing that endpoint.
fn split_loopback(groups: Vec<Group<'_>>) -> Vec<Group<'_>> {
    let mut result = Vec::with_capacity(groups.len() + 1);
    for group in groups {
        if group.local.is_none() || !(group.records(Kind::Client) && group.records(Kind::Server)) {
            result.push(group);
            continue;
        }
        zipkin_debug!(
            name: "SpanDecoder.LoopbackSplit",
            service_name = group.local.and_then(Endpoint::service_name).unwrap_or_default()
        );
        let Group {
            local,
            annotations,
            tags,
            ..
        } = group;
        let (server, client): (Vec<_>, Vec<_>) = annotations
            .into_iter()
            .partition(|a| rpc_kind(a) == Some(Kind::Server));
        result.push(Group {
            annotations: client,
            tags,
            ..Group::new(local)
        });
        result.push(Group {
            annotations: server,
            ..Group::new(local)
        });
    }
    result
}

fn find_address<'a>(addresses: &[(AddressKind, &'a Endpoint)], kind: AddressKind) -> Option<&'a Endpoint> {
    addresses
        .iter()
        .find(|(address, _)| *address == kind)
        .map(|(_, endpoint)| *endpoint)
}

fn resolve_single<'a>(group: &mut Group<'a>, addresses: &[(AddressKind, &'a Endpoint)]) {
    if group.local.is_none() {
        let ca = find_address(addresses, AddressKind::Client);
        let sa = find_address(addresses, AddressKind::Server);
        if let (Some(ca), Some(sa)) = (ca, sa) {
            // nothing carried an endpoint, so the addresses name both sides
            group.local = Some(ca);
            group.offer_remote(AddressKind::Server, sa);
            return;
        }
    }
    let preference = match group.kind {
        Some(Kind::Client) => [AddressKind::Server, AddressKind::Client],
        Some(Kind::Server) | None => [AddressKind::Client, AddressKind::Server],
    };
    for wanted in preference {
        for (kind, endpoint) in addresses.iter().filter(|(kind, _)| *kind == wanted) {
            group.offer_remote(*kind, *endpoint);
        }
    }
}

/// Sets each group's remote endpoint from the span's address annotations.
///
/// "ca" names the client, so it is the remote side of the server group, and
/// "sa" the remote side of the client group.
fn resolve_addresses<'a>(groups: &mut [Group<'a>], addresses: &[(AddressKind, &'a Endpoint)]) {
    if addresses.is_empty() {
        return;
    }
    match groups.len() {
        1 => resolve_single(&mut groups[0], addresses),
        2 => {
            for (kind, endpoint) in addresses {
                let role = match kind {
                    AddressKind::Client => Kind::Server,
                    AddressKind::Server => Kind::Client,
                };
                match groups.iter_mut().find(|group| group.kind == Some(role)) {
                    Some(group) => group.offer_remote(*kind, *endpoint),
                    None => {
                        zipkin_debug!(name: "SpanDecoder.AddressUnresolved", address = kind.key());
                    }
                }
            }
        }
        _ => {
            zipkin_debug!(
                name: "SpanDecoder.AddressUnresolved",
                addresses = addresses.len(),
                groups = groups.len()
            );
        }
    }
}

/// Converts a v1 span into one simple span per participating endpoint.
///
/// The result is never empty. When a client and a server shared the v1
/// span, the client comes first and owns the v1 timestamp and duration; the
/// server follows, marked [`shared`](Span::shared). More than two endpoints
/// cannot be told apart by role, so each becomes a span without a kind.
pub fn from_wire(span: &v1::Span) -> Vec<Span> {
    let (groups, addresses) = partition(span);
    let mut groups = split_loopback(groups);

    if groups.len() > 2 {
        zipkin_debug!(name: "SpanDecoder.TooManyEndpoints", groups = groups.len());
    } else {
        for group in groups.iter_mut() {
            group.kind = group.infer_kind();
        }
    }
    resolve_addresses(&mut groups, &addresses);

    let owner = groups
        .iter()
        .position(|group| group.kind == Some(Kind::Client))
        .unwrap_or(0);
    let owned = groups.remove(owner);
    groups.insert(0, owned);

    let owner_timing = span
        .timestamp
        .map(|timestamp| (timestamp, span.duration.and_then(|d| timestamp.checked_add(d))));
    groups
        .into_iter()
        .enumerate()
        .map(|(index, group)| {
            if index == 0 {
                group.into_span(span, owner_timing, false)
            } else {
                let shared = group.kind == Some(Kind::Server);
                group.into_span(span, None, shared)
            }
        })
        .collect()
}
