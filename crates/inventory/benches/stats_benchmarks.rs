use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::Utc;
use storefront_core::ProductId;
use storefront_inventory::{compute_stats, InventoryQuery, StockFilter};
use storefront_products::{Price, Product};

const CATEGORIES: [&str; 6] = ["Kitchen", "Home", "Garden", "Office", "Outdoor", ""];

/// Catalog with a spread of stock levels, a few unpriced items and a blank category.
fn catalog(size: usize) -> Vec<Product> {
    let now = Utc::now();
    (0..size)
        .map(|i| {
            let price = if i % 17 == 0 { None } else { Price::new((i % 250) as f64 + 0.99) };
            Product::new(ProductId::new(), format!("Product {i}"), now)
                .with_category(CATEGORIES[i % CATEGORIES.len()])
                .with_price(price)
                .with_stock((i % 40) as u32)
                .with_in_stock(if i % 23 == 0 { Some(false) } else { None })
        })
        .collect()
}

fn bench_compute_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_stats");

    for size in [100usize, 1_000, 10_000].iter() {
        let products = catalog(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("snapshot", size), &products, |b, products| {
            b.iter(|| black_box(compute_stats(black_box(products), Utc::now())));
        });
    }

    group.finish();
}

fn bench_inventory_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory_listing");
    let products = catalog(10_000);

    group.bench_function("all_first_page", |b| {
        let query = InventoryQuery::default();
        b.iter(|| black_box(query.run(black_box(&products))));
    });

    group.bench_function("low_stock_search", |b| {
        let query = InventoryQuery {
            filter: StockFilter::LowStock,
            search: Some("product 1".to_string()),
            ..Default::default()
        };
        b.iter(|| black_box(query.run(black_box(&products))));
    });

    group.finish();
}

criterion_group!(benches, bench_compute_stats, bench_inventory_listing);
criterion_main!(benches);
