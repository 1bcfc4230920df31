use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use almacen_core::{ArticleId, MovementId};
use almacen_inventory::{Article, Movement, MovementKind};
use almacen_ledger::{build_control_card, current_stock, CardFilter};

fn snapshot(articles: usize, movements_per_article: usize) -> (Vec<Article>, Vec<Movement>) {
    let start: NaiveDate = "2023-01-01".parse().unwrap();

    let articles: Vec<Article> = (1..=articles as i64)
        .map(|id| Article {
            id: ArticleId::new(id),
            name: format!("ARTICULO {id}"),
            unit_cost: Decimal::new(100 + id, 2),
        })
        .collect();

    let mut movements = Vec::with_capacity(articles.len() * movements_per_article);
    let mut next_id = 1i64;
    for article in &articles {
        for i in 0..movements_per_article {
            // Alternate entries and exits; entries are twice the size so the
            // balance never goes negative.
            let entrada = i % 2 == 0;
            movements.push(Movement {
                id: MovementId::new(next_id),
                article_id: article.id,
                kind: if entrada {
                    MovementKind::Entrada
                } else {
                    MovementKind::Salida
                },
                quantity: if entrada { 20 } else { 10 },
                date: start + Days::new(i as u64 % 365),
                description: String::new(),
                unit_cost: if entrada { article.unit_cost } else { Decimal::ZERO },
                author: None,
            });
            next_id += 1;
        }
    }

    (articles, movements)
}

fn bench_current_stock(c: &mut Criterion) {
    let mut group = c.benchmark_group("current_stock");
    for size in [100usize, 1_000, 10_000] {
        let (_, movements) = snapshot(10, size / 10);
        group.throughput(Throughput::Elements(movements.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &movements, |b, movements| {
            b.iter(|| current_stock(black_box(movements), ArticleId::new(1)));
        });
    }
    group.finish();
}

fn bench_control_card(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_control_card");
    for size in [100usize, 1_000, 10_000] {
        let (articles, movements) = snapshot(10, size / 10);
        group.throughput(Throughput::Elements(movements.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("full_history", size),
            &(&articles, &movements),
            |b, (articles, movements)| {
                b.iter(|| {
                    build_control_card(
                        black_box(articles),
                        black_box(movements),
                        &CardFilter::default(),
                    )
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("windowed_single_article", size),
            &(&articles, &movements),
            |b, (articles, movements)| {
                let filter = CardFilter {
                    article: Some(ArticleId::new(1)),
                    month: Some(6),
                    year: Some(2023),
                };
                b.iter(|| build_control_card(black_box(articles), black_box(movements), &filter));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_current_stock, bench_control_card);
criterion_main!(benches);
