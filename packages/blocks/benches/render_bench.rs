use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_blocks::{BlockRegistry, Viewport};
use pagecraft_page::{Block, BlockKind};

fn palette_page(registry: &BlockRegistry) -> Vec<Block> {
    BlockKind::BUILTIN
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            Block::new(
                format!("{}-{}", kind.as_str(), i),
                kind.clone(),
                registry.default_config(kind).unwrap_or_default(),
            )
        })
        .collect()
}

fn bench_render_full_palette(c: &mut Criterion) {
    let registry = BlockRegistry::with_builtin_blocks();
    let content = palette_page(&registry);

    c.bench_function("render_full_palette_desktop", |b| {
        b.iter(|| {
            for block in &content {
                black_box(registry.render_block(block, Viewport::Desktop, false));
            }
        })
    });

    c.bench_function("render_full_palette_mobile", |b| {
        b.iter(|| {
            for block in &content {
                black_box(registry.render_block(block, Viewport::Mobile, false));
            }
        })
    });
}

criterion_group!(benches, bench_render_full_palette);
criterion_main!(benches);
