//! # Zipkin Simple Span Conversion
//!
//! Converts between the two shapes a Zipkin span can take:
//!
//! * the **v1 wire span** ([`v1::Span`]): a flat record of timestamped
//!   annotations and key/value binary annotations, each optionally tagged with
//!   the [`Endpoint`] that recorded it. Client and server sides of one RPC may
//!   share a single wire span.
//! * the **simple span** ([`Span`]): one participant's view, with an explicit
//!   [`Kind`], a single local and remote endpoint, start/finish timestamps and
//!   a tag map. This is the shape of the Zipkin v2 JSON API.
//!
//! [`to_wire`] is a deterministic encoder. [`from_wire`] groups a wire span's
//! annotations by endpoint, infers each group's role, and returns one simple
//! span per participant.
//!
//! ```
//! use std::net::Ipv4Addr;
//! use zipkin_simplespan::{from_wire, to_wire, Endpoint, Kind, Span, SpanId, TraceId};
//!
//! let frontend = Endpoint::builder()
//!     .service_name("frontend".to_owned())
//!     .ipv4(Ipv4Addr::new(127, 0, 0, 1))
//!     .build();
//!
//! let span = Span::builder()
//!     .trace_id(TraceId::from_bytes(1u128.to_be_bytes()))
//!     .id(SpanId::from_bytes(2u64.to_be_bytes()))
//!     .name("get")
//!     .kind(Some(Kind::Client))
//!     .local_endpoint(frontend)
//!     .start_timestamp(1_472_470_996_199_000)
//!     .finish_timestamp(1_472_470_996_406_000)
//!     .build();
//!
//! let wire = to_wire(&span);
//! assert_eq!(wire.duration(), Some(207_000));
//! assert_eq!(from_wire(&wire), vec![span]);
//! ```
//!
//! ## Feature flags
//!
//! * `internal-logs` (default): emits `tracing` debug events when the decoder
//!   has to apply a policy to unusual input (loopback spans, self-referencing
//!   addresses, more than two endpoints).
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod internal_logging;

pub mod convert;
mod error;
pub mod model;
pub mod v1;

pub use convert::{from_wire, to_wire};
pub use error::Error;
pub use model::{Annotation, Endpoint, Kind, ListOfSpans, Span};
pub use opentelemetry::trace::{SpanId, TraceId};
