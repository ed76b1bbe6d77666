use std::collections::HashMap;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sticky_locale::{translate_colors, FunctionRegistry, Interpolator, NoNodes, Variables};

fn bench_interpolate(c: &mut Criterion) {
    let interpolator = Interpolator::new(Arc::new(FunctionRegistry::with_defaults()));
    let variables = Variables::new()
        .with("player", "Steve")
        .with("count", "3")
        .with("banned", "true");

    let mut nodes = HashMap::new();
    nodes.insert("prefix".to_string(), "&8[&bSticky&8]&r".to_string());
    nodes.insert("greeting".to_string(), "{prefix} Hello {player}".to_string());

    c.bench_function("interpolate_plain", |b| {
        b.iter(|| {
            interpolator.interpolate(
                black_box("A message with no placeholders at all."),
                &NoNodes,
                &variables,
            )
        })
    });

    c.bench_function("interpolate_functions", |b| {
        b.iter(|| {
            interpolator.interpolate(
                black_box(r#"{player} has {count} warning{count|pluralize} ({banned|yesno:"banned,free"})"#),
                &NoNodes,
                &variables,
            )
        })
    });

    c.bench_function("interpolate_nested_nodes", |b| {
        b.iter(|| interpolator.interpolate(black_box("{greeting}!"), &nodes, &variables))
    });

    c.bench_function("translate_colors", |b| {
        b.iter(|| translate_colors("&", black_box("&aGreen &lbold &zliteral &rreset")))
    });
}

criterion_group!(benches, bench_interpolate);
criterion_main!(benches);
