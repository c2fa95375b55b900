use lantern::config::Config;
use lantern::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let static_root = cfg.static_root.clone();
    let mut server = Server::new(cfg);

    server
        .get("/health", |_req, mut res| {
            res.set_status(200);
            res.set_body("The Server is working correctly!");
            Ok(res)
        })
        .get("/hello", |req, mut res| {
            res.set_body(format!("Hello {}", req.value("name").unwrap_or_default()));
            Ok(res)
        })
        .get("/pi", |_req, mut res| {
            res.set_body(format!("Pi is approximately {}", std::f64::consts::PI));
            Ok(res)
        });
    server.static_files(static_root)?;

    let handle = server.handle();
    let listening = match server.bind().await {
        Ok(listening) => listening,
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    };

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            handle.stop();
        }
    });

    listening.serve().await
}
