use serde::Serialize;

/// A point-in-time event recorded by a span's local endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    timestamp: u64,
    value: String,
}

impl Annotation {
    /// Creates an event at `timestamp` (epoch microseconds).
    pub fn new<T: Into<String>>(timestamp: u64, value: T) -> Self {
        Annotation {
            timestamp,
            value: value.into(),
        }
    }

    /// Epoch microseconds of the event.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Usually a short tag indicating an event, like "error".
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use crate::model::annotation::Annotation;

    #[test]
    fn test_full_annotation() {
        test_json_serialization(
            Annotation::new(1_502_787_600_000_000, "open-telemetry"),
            "{\"timestamp\":1502787600000000,\"value\":\"open-telemetry\"}",
        );
    }

    fn test_json_serialization(annotation: Annotation, desired: &str) {
        let result = serde_json::to_string(&annotation).unwrap();
        assert_eq!(result, desired.to_owned());
    }
}
