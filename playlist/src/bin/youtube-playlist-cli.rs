use eyre::Context;
use std::io::IsTerminal;
use tokio_stream::StreamExt;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_playlist::{ClientConfig, PlaylistOptions, open_playlist};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let Some(url) = std::env::args().nth(1) else {
        eyre::bail!("usage: youtube-playlist-cli <playlist url or id>");
    };

    let config = ClientConfig::from_env()?;
    let options = PlaylistOptions::default().callback(|msg: &str| tracing::info!("{msg}"));
    let mut playlist = open_playlist(&url, config, options)
        .await
        .with_context(|| format!("open playlist {url}"))?;

    println!("{}", playlist.info().await?);
    println!();

    let videos = playlist.iter();
    let mut videos = std::pin::pin!(videos);
    let mut index = 0;
    while let Some(video) = videos.next().await {
        let video = video.context("fetch playlist page")?;
        index += 1;
        println!("{index:>4}. {video}  {}", video.watch_url());
    }

    Ok(())
}
