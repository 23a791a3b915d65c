#[tokio::main]
async fn main() {
    if let Err(err) = notelens::run().await {
        eprintln!("notelens: {err}");
        std::process::exit(1);
    }
}
