//! Benchmarks for composing the visible body.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use packager::document::Document;
use packager::ui::compose_body;
use packager::ui::viewport::Viewport;

fn bench_compose_body(c: &mut Criterion) {
    let mut text = String::new();
    for i in 0..2000 {
        text.push_str(&format!("[green]entry {i}[/green] value\n"));
    }
    let doc = Document::new(&text);

    let mut top = Viewport::new(24, doc.line_count());
    c.bench_function("compose_body_top", |b| {
        b.iter(|| compose_body(black_box(&doc), black_box(&top)))
    });

    top.scroll_down(1500);
    c.bench_function("compose_body_deep", |b| {
        b.iter(|| compose_body(black_box(&doc), black_box(&top)))
    });
}

criterion_group!(benches, bench_compose_body);
criterion_main!(benches);
