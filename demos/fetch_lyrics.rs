//! 用于演示 `repertoire_lyrics` 库的核心功能。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --example fetch_lyrics -- "Adele" "Hello"
//! ```
//!
//! 设置 `MUSIXMATCH_API_KEY` 并在配置中加入 `musixmatch` 后可以获取逐行计时歌词。

use repertoire_lyrics::{
    FetchOutcome, LyricsService, MemoryStore, SongRef, TimingMode,
    config::load_service_config,
    converter::{format_time, switch_timing},
    error::Result,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,repertoire_lyrics=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let artist = args.next().unwrap_or_else(|| "Adele".to_string());
    let title = args.next().unwrap_or_else(|| "Hello".to_string());

    let config = load_service_config()?;
    let service = LyricsService::from_config(&config)?;
    info!("提供商顺序: {:?}", service.provider_names());

    let store = MemoryStore::new();
    let song = SongRef::new("demo-song", artist, title);

    match service.fetch_and_store(&store, &song).await? {
        FetchOutcome::Stored(document) => {
            info!("歌词来源: {:?}", document.source);
            println!("{}", document.plain_text());

            let timed = switch_timing(&document, TimingMode::Timed);
            for line in timed.lines.iter().take(5) {
                let time = line.time.map(format_time).unwrap_or_default();
                println!("{time:>8}  {}", line.text);
            }
        }
        outcome @ FetchOutcome::NotFound => warn!("{}", outcome.message()),
    }

    // 不存在的歌曲应当平稳地返回 NotFound，而不是报错
    let missing = SongRef::new("missing", "No Such Artist Zzz", "No Such Song Zzz");
    let outcome = service.fetch_and_store(&store, &missing).await;
    info!("不存在的歌曲: {}", FetchOutcome::message_for(&outcome));

    Ok(())
}
