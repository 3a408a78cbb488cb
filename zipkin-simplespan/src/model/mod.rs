//! The simple (Zipkin v2) span model.
use serde::Serialize;

pub(crate) mod annotation;
pub(crate) mod endpoint;
pub(crate) mod id;
pub(crate) mod span;

pub use annotation::Annotation;
pub use endpoint::Endpoint;
pub use id::{parse_span_id, parse_trace_id};
pub use span::{Kind, Span};

use crate::Error;

/// A batch of spans, serialized as the JSON array a Zipkin v2 collector accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ListOfSpans(Vec<Span>);

impl ListOfSpans {
    /// The spans in this batch.
    pub fn spans(&self) -> &[Span] {
        &self.0
    }

    /// Encodes the batch as a Zipkin v2 JSON request body.
    pub fn to_json_vec(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl From<Vec<Span>> for ListOfSpans {
    fn from(spans: Vec<Span>) -> Self {
        ListOfSpans(spans)
    }
}

impl FromIterator<Span> for ListOfSpans {
    fn from_iter<T: IntoIterator<Item = Span>>(iter: T) -> Self {
        ListOfSpans(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        let body = ListOfSpans::default().to_json_vec().unwrap();
        assert_eq!(body, b"[]");
    }

    #[test]
    fn test_list_of_spans() {
        let spans: ListOfSpans = (1..=2u64)
            .map(|id| {
                Span::builder()
                    .trace_id(id::trace_id_from_u128(7))
                    .id(id::span_id_from_u64(id))
                    .name("get")
                    .build()
            })
            .collect();
        assert_eq!(spans.spans().len(), 2);
        assert_eq!(
            String::from_utf8(spans.to_json_vec().unwrap()).unwrap(),
            "[{\"traceId\":\"0000000000000007\",\"id\":\"0000000000000001\",\"name\":\"get\"},\
             {\"traceId\":\"0000000000000007\",\"id\":\"0000000000000002\",\"name\":\"get\"}]"
        );
    }
}
