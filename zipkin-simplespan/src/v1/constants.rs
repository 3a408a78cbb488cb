//! Reserved annotation values and binary annotation keys of the v1 model.
//!
//! The four RPC annotations (`cs`, `sr`, `ss`, `cr`) mark the boundaries of a
//! client or server span. Everything else is a user event.

/// The client sent ("cs") a request to a server.
///
/// Marks the start of a client span.
pub const CLIENT_SEND: &str = "cs";

/// The client received ("cr") the response from a server.
///
/// Marks the end of a client span.
pub const CLIENT_RECV: &str = "cr";

/// The server sent ("ss") a response to a client.
///
/// Marks the end of a server span.
pub const SERVER_SEND: &str = "ss";

/// The server received ("sr") a request from a client.
///
/// Marks the start of a server span.
pub const SERVER_RECV: &str = "sr";

/// Optionally logs the moment the first byte of a request went on the wire.
///
/// Recorded as a plain event; it never changes the role of a span.
pub const WIRE_SEND: &str = "ws";

/// Optionally logs the moment the last byte of a response came off the wire.
pub const WIRE_RECV: &str = "wr";

/// Key of the address annotation naming the caller of an RPC.
pub const CLIENT_ADDR: &str = "ca";

/// Key of the address annotation naming the callee of an RPC.
pub const SERVER_ADDR: &str = "sa";

/// The component that recorded a span without any RPC.
///
/// Ex. "finatra" or "jdbc". An empty value only marks the span as local work.
pub const LOCAL_COMPONENT: &str = "lc";
