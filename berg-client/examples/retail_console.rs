//! Minimal retail console: login, mirror the order list, follow the
//! live order feed and print each alert.
//!
//! Usage: cargo run --example retail_console -- <base_url> <feed_addr> <email> <password>

use berg_client::{ClientConfig, OrderBoard, OrderFeedSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let base_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let feed_addr = args.next().unwrap_or_else(|| "localhost:9090".to_string());
    let email = args
        .next()
        .unwrap_or_else(|| "owner@example.com".to_string());
    let password = args.next().unwrap_or_default();

    let config = ClientConfig::new(&base_url).with_feed_addr(&feed_addr);
    let mut http = config.build_http_client();

    let login = http.login(&email, &password).await?;
    let restaurant_id = login
        .user
        .restaurant_id
        .ok_or("account manages no restaurant")?;
    println!("Logged in as {} ({})", login.user.email, restaurant_id);

    let board = OrderBoard::new();
    board.replace_all(http.fetch_orders().await?);
    println!("{} orders mirrored", board.len());

    let config = config.with_token(login.token);
    let mut feed = OrderFeedSubscriber::from_config(&config, board.clone())?;
    let mut alerts = feed.alerts();
    feed.subscribe(&restaurant_id).await?;
    println!("Feed connected, waiting for orders (ctrl-c to quit)");

    while let Ok(alert) = alerts.recv().await {
        println!(
            "NEW ORDER {} from {}, total {}",
            alert.order_id, alert.customer, alert.total
        );
    }

    feed.shutdown().await;
    Ok(())
}
