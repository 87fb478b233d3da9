use comet::config::Config;
use comet::{AppBuilder, Method, Response};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let app = AppBuilder::from_config(&cfg)
        .route("/", "text/plain", Method::GET, |req| async move {
            Ok(Response::text(format!("{:?}", req.headers)))
        })?
        .route("/hello", "text/plain", Method::GET, |_req| async {
            Ok(Response::text("hi"))
        })?
        .build();

    tokio::select! {
        res = app.serve() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
