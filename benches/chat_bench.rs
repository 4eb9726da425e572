//! Criterion benchmarks for the hot path of the chat pipeline:
//! intent classification and title extraction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taskdeskd::chat::{extract, intent};

fn bench_classify(c: &mut Criterion) {
    let messages = [
        "Crear tarea \"Revisar código\"",
        "¿Cuál es el estado del proyecto?",
        "tareas bloqueadas",
        "quién está más ocupado",
        "Hola, ¿qué tal?",
    ];

    c.bench_function("classify_intent", |b| {
        b.iter(|| {
            for msg in &messages {
                let normalized = intent::normalize(black_box(msg));
                black_box(intent::classify(&normalized));
            }
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_title", |b| {
        b.iter(|| {
            black_box(extract::title(black_box("Crear tarea \"Revisar código\"")));
            black_box(extract::title(black_box("nueva tarea: preparar la demo")));
            black_box(extract::title(black_box("crear una tarea por favor")));
        })
    });
}

criterion_group!(benches, bench_classify, bench_extract);
criterion_main!(benches);
