//! Conversion between [`v1::Span`] and simple [`Span`]s.
//!
//! Encoding is lossless: every field of a simple span maps onto the v1 model.
//! Decoding splits a v1 span into one simple span per participating
//! endpoint, so a v1 span shared by a client and a server becomes two simple
//! spans with the same id, the server one marked [`shared`](Span::shared).
use crate::model::Span;
use crate::v1;

mod decode;
mod encode;

pub use decode::from_wire;
pub use encode::to_wire;

impl From<&Span> for v1::Span {
    fn from(span: &Span) -> v1::Span {
        to_wire(span)
    }
}

impl From<Span> for v1::Span {
    fn from(span: Span) -> v1::Span {
        to_wire(&span)
    }
}
