#[tokio::main]
async fn main() {
    stay_backend::run().await;
}
