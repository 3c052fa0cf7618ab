#[tokio::main]
async fn main() {
    seminar_backend::run().await;
}
