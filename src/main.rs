use concord::config::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_args();
    concord::run(config).await;
}
