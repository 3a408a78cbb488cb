use std::net::Ipv4Addr;
use zipkin_simplespan::v1::{self, AddressKind, BinaryAnnotation};
use zipkin_simplespan::{from_wire, to_wire, Endpoint, ListOfSpans};

fn shared_span() -> v1::Span {
    let frontend = Endpoint::builder()
        .service_name("frontend".to_owned())
        .ipv4(Ipv4Addr::new(127, 0, 0, 1))
        .build();
    let backend = Endpoint::builder()
        .service_name("backend".to_owned())
        .ipv4(Ipv4Addr::new(192, 168, 99, 101))
        .port(9000)
        .build();

    v1::Span::builder()
        .trace_id(0x216a_2aea_45d0_8fc9)
        .id(0x5b41_8566_6d50_f68b)
        .name("get")
        .timestamp(1_472_470_996_199_000)
        .duration(207_000)
        .annotations(vec![
            v1::Annotation::new(1_472_470_996_199_000, "cs", Some(frontend.clone())),
            v1::Annotation::new(1_472_470_996_250_000, "sr", Some(backend.clone())),
            v1::Annotation::new(1_472_470_996_350_000, "ss", Some(backend.clone())),
            v1::Annotation::new(1_472_470_996_406_000, "cr", Some(frontend.clone())),
        ])
        .binary_annotations(vec![
            BinaryAnnotation::string("http.path", "/api", Some(frontend.clone())),
            BinaryAnnotation::string("http.path", "/backend", Some(backend.clone())),
            BinaryAnnotation::address(AddressKind::Client, frontend),
            BinaryAnnotation::address(AddressKind::Server, backend),
        ])
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    // decoder policy events are emitted at debug level
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let wire = shared_span();
    let spans = from_wire(&wire);
    for span in &spans {
        let v1 = to_wire(span);
        println!(
            "{:?} span at {:?}: {} annotations, {} binary annotations on the wire",
            span.kind(),
            span.local_endpoint().and_then(Endpoint::service_name),
            v1.annotations().len(),
            v1.binary_annotations().len(),
        );
    }

    let json = ListOfSpans::from(spans).to_json_vec()?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}
