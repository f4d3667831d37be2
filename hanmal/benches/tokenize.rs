//! 토큰화 벤치마크

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use hanmal::{KoreanDictionary, KoreanPos, Tokenizer};

fn build_tokenizer() -> Tokenizer {
    let dict = KoreanDictionary::new();
    dict.add_words(
        KoreanPos::Noun,
        ["아버지", "가방", "방", "하늘", "바다", "포만감"],
    );
    dict.add_words(KoreanPos::Josa, ["가", "에", "도", "은", "는"]);
    dict.add_words(KoreanPos::Verb, ["들어가신다"]);
    dict.add_words(KoreanPos::Adjective, ["괜찮아요"]);
    Tokenizer::new(dict)
}

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = build_tokenizer();
    let text = "아버지가방에들어가신다 포만감도 괜찮아요 ㅋㅋㅋ https://example.com";

    c.bench_function("tokenize/sentence", |b| {
        b.iter(|| tokenizer.tokenize(black_box(text)))
    });

    c.bench_function("tokenize/worker_reuse", |b| {
        let mut worker = tokenizer.new_worker();
        b.iter(|| {
            worker.reset_text(black_box(text));
            worker.tokenize();
            worker.num_tokens()
        })
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
