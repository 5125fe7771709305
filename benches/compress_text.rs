use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};

fn criterion_benchmark(c: &mut Criterion) {
    const TEXT_SIZE: usize = 256 * 1024;

    // skewed towards the start of the alphabet, like prose
    let alphabet: Vec<char> = " etaoinshrdlucmfwypvbgkjqxz\n.,\t\\ü".chars().collect();
    let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
    let text: String = (0..TEXT_SIZE)
        .map(|_| {
            let idx = rng.gen_range(0..alphabet.len());
            alphabet[rng.gen_range(0..=idx)]
        })
        .collect();
    let packed = ruhuff::compress_to_vec(&text).unwrap();

    c.bench_function("compress text", |b| {
        b.iter(|| ruhuff::compress_to_vec(black_box(&text)).unwrap())
    });
    c.bench_function("decompress text", |b| {
        b.iter(|| ruhuff::decompress(black_box(&packed)).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
