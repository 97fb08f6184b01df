use std::io;
use tokio::time::{sleep, Duration};

use spanlog::{Context, JsonHandler, JsonHandlerOptions, Level, Logger, Span, TraceHandler};

#[tokio::main]
async fn main() {
    let options = JsonHandlerOptions {
        min_level: Level::Debug,
        add_source: true,
        service_name: Some("sample-service".to_string()),
    };
    let sink = JsonHandler::with_options(io::stdout(), options);
    let logger = Logger::new(TraceHandler::new(Box::new(sink)));

    let mut workers = Vec::new();
    for request in 0..4u32 {
        let logger = logger.clone();
        workers.push(tokio::spawn(async move {
            // One span per simulated request, carried in the context.
            let span = Span::start("GET /hello");
            let cx = Context::new().with_span(span.clone());

            sleep(Duration::from_millis(10 * u64::from(request))).await;
            let result = logger
                .with_attrs(vec![("request".to_string(), request.into())])
                .info(&cx, "handling request");
            if let Err(e) = result {
                eprintln!("failed to emit log: {e}");
            }
            assert!(span.is_finished());
        }));
    }
    for worker in workers {
        let _ = worker.await;
    }

    // Outside any request there is no span and no correlation group.
    if let Err(e) = logger.info(&Context::new(), "service stopping") {
        eprintln!("failed to emit log: {e}");
    }
}
