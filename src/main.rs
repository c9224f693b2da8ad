//! Pixel Pioneers site server
//!
//! Natively this serves the pages and the wasm bundle. The browser side
//! starts from `platform::web` in the library.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pixel Pioneers (native) starting...");

    let settings = pixel_pioneers::Settings::from_env();
    pixel_pioneers::server::serve(&settings).await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library's start function mounts the games
}
