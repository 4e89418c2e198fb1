use criterion::{Criterion, black_box, criterion_group, criterion_main};
use encoding_rs::WINDOWS_1251;

use ege_trainer::config::Delimiter;
use ege_trainer::ingest::decode::decode_or_lossy;
use ege_trainer::ingest::ingest_bytes;
use ege_trainer::ingest::rows::parse_rows;
use ege_trainer::quiz::answer::normalize;
use ege_trainer::quiz::subject::Subject;

const URL: &str = "https://example.com/db/mathematic.csv";

fn make_csv(rows: usize) -> String {
    let subjects = ["math", "physics", "informatics", "russian"];
    let difficulties = ["easy", "medium", "hard", "сложно"];
    let mut out = String::from("subject,question_text,correct_answer,topic,difficulty,explanation\n");
    for i in 0..rows {
        out.push_str(&format!(
            "{},\"Задание {i}: найдите значение выражения {i} + {i}\",{},Тема {},{},\"Сложите {i} и {i}\"\n",
            subjects[i % subjects.len()],
            i * 2,
            i % 12,
            difficulties[i % difficulties.len()],
        ));
        // ~10% unusable rows
        if i % 10 == 0 {
            out.push_str(",,,,,\n");
        }
    }
    out
}

fn bench_decode(c: &mut Criterion) {
    let text = make_csv(2000);
    let utf8 = text.as_bytes().to_vec();
    let (cp1251, _, _) = WINDOWS_1251.encode(&text);
    let cp1251 = cp1251.into_owned();

    c.bench_function("decode utf-8 (2000 rows)", |b| {
        b.iter(|| decode_or_lossy(black_box(&utf8)))
    });
    c.bench_function("decode windows-1251 (2000 rows)", |b| {
        b.iter(|| decode_or_lossy(black_box(&cp1251)))
    });
}

fn bench_parse(c: &mut Criterion) {
    let text = make_csv(2000);
    let semicolon = text.replace(',', ";");

    c.bench_function("parse_rows comma (2000 rows)", |b| {
        b.iter(|| parse_rows(black_box(&text), Delimiter::Comma, Subject::Math))
    });
    c.bench_function("parse_rows semicolon (2000 rows)", |b| {
        b.iter(|| parse_rows(black_box(&semicolon), Delimiter::Semicolon, Subject::Math))
    });
}

fn bench_ingest_bytes(c: &mut Criterion) {
    let text = make_csv(5000);
    let (cp1251, _, _) = WINDOWS_1251.encode(&text);
    let cp1251 = cp1251.into_owned();

    c.bench_function("ingest_bytes windows-1251 (5000 rows)", |b| {
        b.iter(|| ingest_bytes(black_box(&cp1251), URL, Delimiter::Comma))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let answers = ["6X", " 2 , 5 ", "2; 3", "Ёлка", "300000 км/с", "ＡＢＣ"];

    c.bench_function("normalize (6 answers)", |b| {
        b.iter(|| {
            for answer in answers {
                black_box(normalize(black_box(answer)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_parse,
    bench_ingest_bytes,
    bench_normalize
);
criterion_main!(benches);
