#[tokio::main]
async fn main() -> std::io::Result<()> {
    appointment_backend::run().await
}
