//! eirinix-sample entry point.
//!
//! The single process-termination point: every fatal condition surfaces here
//! as an `AppError` from [`eirinix_sample::run`].

#[tokio::main]
async fn main() {
    if let Err(e) = eirinix_sample::run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
