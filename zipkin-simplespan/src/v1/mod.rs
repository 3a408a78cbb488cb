//! The v1 wire span model.
//!
//! A v1 span may carry data from both sides of an RPC: each annotation and
//! binary annotation names the endpoint that recorded it.
use typed_builder::TypedBuilder;

mod annotation;
pub mod constants;

pub use annotation::{AddressKind, Annotation, BinaryAnnotation};

/// A span as transported and stored by v1 collectors.
#[derive(TypedBuilder, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// Upper 64 bits of a 128-bit trace id, zero for 64-bit trace ids.
    #[builder(default)]
    pub(crate) trace_id_high: u64,
    /// Lower 64 bits of the trace id.
    pub(crate) trace_id: u64,
    /// The parent's span id, absent on root spans.
    #[builder(setter(strip_option), default)]
    pub(crate) parent_id: Option<u64>,
    /// Span id.
    pub(crate) id: u64,
    /// Operation name, possibly empty.
    #[builder(setter(into), default)]
    pub(crate) name: String,
    /// Epoch microseconds of the start of the span, when one host owns it.
    #[builder(setter(strip_option), default)]
    pub(crate) timestamp: Option<u64>,
    /// Duration in microseconds, when the span is complete.
    #[builder(setter(strip_option), default)]
    pub(crate) duration: Option<u64>,
    /// Events, in recorded order.
    #[builder(default)]
    pub(crate) annotations: Vec<Annotation>,
    /// Tags and address annotations, in recorded order.
    #[builder(default)]
    pub(crate) binary_annotations: Vec<BinaryAnnotation>,
}

impl Span {
    /// Upper 64 bits of the trace id, zero for 64-bit trace ids.
    pub fn trace_id_high(&self) -> u64 {
        self.trace_id_high
    }

    /// Lower 64 bits of the trace id.
    pub fn trace_id(&self) -> u64 {
        self.trace_id
    }

    /// The parent's span id.
    pub fn parent_id(&self) -> Option<u64> {
        self.parent_id
    }

    /// Span id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Epoch microseconds of the start of the span.
    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Duration in microseconds.
    pub fn duration(&self) -> Option<u64> {
        self.duration
    }

    /// Events, in recorded order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Tags and address annotations, in recorded order.
    pub fn binary_annotations(&self) -> &[BinaryAnnotation] {
        &self.binary_annotations
    }
}
