use clap::Parser;
use pagecraft_blocks::BlockRegistry;
use pagecraft_page::BlockKind;
use pagecraft_workspace::{
    router, AppState, LocalAssetStore, MemoryFormSink, NewPage, PageStore,
};
use std::sync::Arc;

/// Pagecraft workspace server — authoring, preview and public surfaces
/// over one in-memory page store.
#[derive(Parser, Debug)]
#[command(name = "pagecraft-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "4000")]
    port: u16,

    /// Directory uploaded assets are written to
    #[arg(long, default_value = "./assets")]
    assets_dir: std::path::PathBuf,

    /// Create a demo page on startup
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let registry = Arc::new(BlockRegistry::with_builtin_blocks());
    let store = Arc::new(PageStore::new(Arc::clone(&registry)));

    if args.seed {
        seed_demo_page(&store)?;
    }

    let state = AppState {
        store,
        assets: Arc::new(LocalAssetStore::new(&args.assets_dir)),
        forms: Arc::new(MemoryFormSink::new()),
    };

    let addr = format!("127.0.0.1:{}", args.port);
    tracing::info!(%addr, "pagecraft server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// A page built from every registered kind's default config, so the
/// preview has something to show immediately.
fn seed_demo_page(store: &PageStore) -> anyhow::Result<()> {
    let registry = store.registry();
    let mut ids = pagecraft_common::IdGenerator::new("demo");

    let content = [
        BlockKind::Hero,
        BlockKind::Statistics,
        BlockKind::Features,
        BlockKind::Faq,
        BlockKind::Form,
        BlockKind::Copyright,
    ]
    .into_iter()
    .filter_map(|kind| {
        registry.default_config(&kind).map(|config| {
            pagecraft_page::Block::new(ids.new_id(kind.as_str()), kind, config)
        })
    })
    .collect();

    let page = store
        .create(NewPage {
            title: "Demo Page".to_string(),
            slug: "demo".to_string(),
            description: Some("Seeded demo page".to_string()),
            content,
        })
        .map_err(|e| anyhow::anyhow!("failed to seed demo page: {e}"))?;

    tracing::info!(slug = %page.slug, blocks = page.content.len(), "demo page seeded");
    Ok(())
}
