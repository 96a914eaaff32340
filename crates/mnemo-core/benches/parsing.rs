use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mnemo_core::scoring::parse_sequence_answer;

fn bench_sequence_answers(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_answer");

    let short = "3, 7, 2, 9";
    let long = (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join(" , ");

    group.bench_function("4_tokens", |b| {
        b.iter(|| parse_sequence_answer(black_box(short)))
    });

    group.bench_function("200_tokens", |b| {
        b.iter(|| parse_sequence_answer(black_box(&long)))
    });

    group.finish();
}

fn bench_toml_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("toml_parsing");

    // Generate item set TOML strings of various sizes
    let small_toml = generate_item_set_toml(5);
    let medium_toml = generate_item_set_toml(50);
    let large_toml = generate_item_set_toml(200);

    for (name, toml) in [
        ("5_items", &small_toml),
        ("50_items", &medium_toml),
        ("200_items", &large_toml),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                mnemo_core::parser::parse_item_set_str(
                    black_box(toml),
                    black_box("bench.toml".as_ref()),
                )
            })
        });
    }

    group.finish();
}

fn generate_item_set_toml(n: usize) -> String {
    let mut s = String::new();
    s.push_str(
        r#"[item_set]
id = "bench"
name = "Benchmark"
default_difficulty = "medium"
"#,
    );
    for i in 0..n {
        s.push_str(&format!(
            r#"
[[items]]
id = "wm-{i}"
category = "working_memory"
kind = "sequence"
prompt = "Enter the numbers in reverse order"
stimulus = ["{a}", "{b}", "{c}"]
expected = {{ sequence = ["{c}", "{b}", "{a}"] }}

[[items]]
id = "at-{i}"
category = "attention"
prompt = "Which one does not belong?"
options = ["apple", "pear", "hammer"]
expected = {{ exact = "hammer" }}
"#,
            a = i % 10,
            b = (i + 3) % 10,
            c = (i + 7) % 10,
        ));
    }
    s
}

criterion_group!(benches, bench_sequence_answers, bench_toml_parsing);
criterion_main!(benches);
