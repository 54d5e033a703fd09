//! Cached string value lookups versus direct member table inspection.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nebula_util::{
    DeclaredEnum, StringValueCache, StringValueExt, convert_to_string, string_enum,
};

string_enum! {
    #[derive(Debug, Clone, Copy)]
    enum Field {
        Id => "id",
        Name => "name",
        Etag => "etag",
        Kind => "kind",
        SelfLink => "selfLink",
        Updated,
    }
}

fn bench_lookup(c: &mut Criterion) {
    let cache = StringValueCache::new();
    let _ = cache.string_value(&Field::SelfLink);

    c.bench_function("string_value_cached", |b| {
        b.iter(|| cache.string_value(black_box(&Field::SelfLink)))
    });

    c.bench_function("string_value_table_scan", |b| {
        b.iter(|| {
            let ordinal = black_box(Field::SelfLink).ordinal();
            Field::MEMBERS
                .iter()
                .find(|member| member.ordinal == ordinal)
                .and_then(|member| member.string_value)
        })
    });

    c.bench_function("string_value_global", |b| {
        b.iter(|| black_box(Field::Etag).string_value())
    });
}

fn bench_convert(c: &mut Criterion) {
    c.bench_function("convert_enum_fallback", |b| {
        b.iter(|| convert_to_string(black_box(&Field::Updated)))
    });

    c.bench_function("convert_integer", |b| {
        b.iter(|| convert_to_string(black_box(&123_456_u64)))
    });
}

criterion_group!(benches, bench_lookup, bench_convert);
criterion_main!(benches);
