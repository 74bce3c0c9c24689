use rig_ready_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("rig-ready error: {err}");
        std::process::exit(1);
    }
}
