use conduit::config::Config;
use conduit::docproc::Document;
use conduit::host::Container;
use conduit::http::request::{Method, RequestBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let container = Container::from_config(&cfg)?;

    let path = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let request = RequestBuilder::new()
        .method(Method::GET)
        .uri(format!("http://localhost:8080{path}"))
        .local_port(8080)
        .build()?;

    let delivery = container.handle(request, None).await;
    tracing::info!(
        status = delivery.response().status().as_u16(),
        headers = ?delivery.response().headers(),
        body = %String::from_utf8_lossy(delivery.body()),
        "Sample request served"
    );

    for name in container.chain_names() {
        let Some(chain) = container.chain(name) else {
            continue;
        };

        let mut document = Document::new(format!("id:demo:{name}")).with_field("title", "Conduit");
        match chain.process(&mut document) {
            Ok(outcome) => tracing::info!(chain = name, ?outcome, fields = ?document, "Sample document processed"),
            Err(e) => tracing::error!(chain = name, error = %e, "Sample document failed"),
        }
    }

    Ok(())
}
