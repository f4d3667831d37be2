//! 형태소 분석을 실행하는 유틸리티
//!
//! 이 바이너리는 표준 입력에서 읽은 텍스트를 한 줄씩 형태소 분석하고,
//! 지정된 출력 형식(plain, wakati, detail)으로 결과를 출력합니다.
//! 사전은 평문 자원 디렉터리 또는 컴파일된 스냅샷 파일에서 읽어들입니다.

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;

use hanmal::{render, DictionaryBuilder, KoreanDictionary, KoreanPos, Tokenizer};

/// 품사별 단어 목록 파일 이름
const WORD_LIST_FILES: &[(&str, KoreanPos)] = &[
    ("noun.txt", KoreanPos::Noun),
    ("verb.txt", KoreanPos::Verb),
    ("adjective.txt", KoreanPos::Adjective),
    ("adverb.txt", KoreanPos::Adverb),
    ("determiner.txt", KoreanPos::Determiner),
    ("exclamation.txt", KoreanPos::Exclamation),
    ("conjunction.txt", KoreanPos::Conjunction),
    ("josa.txt", KoreanPos::Josa),
    ("adverbial_josa.txt", KoreanPos::AdverbialJosa),
    ("eomi.txt", KoreanPos::Eomi),
    ("pre_eomi.txt", KoreanPos::PreEomi),
    ("noun_prefix.txt", KoreanPos::NounPrefix),
    ("verb_prefix.txt", KoreanPos::VerbPrefix),
    ("suffix.txt", KoreanPos::Suffix),
    ("proper_noun.txt", KoreanPos::ProperNoun),
];

/// 출력 모드
#[derive(Clone, Debug)]
enum OutputMode {
    Plain,
    Wakati,
    Detail,
}

/// `OutputMode`의 `FromStr` 구현
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 문자열에서 출력 모드를 해석합니다
    ///
    /// # 인자
    ///
    /// * `mode` - 해석 대상 문자열 ("plain", "wakati", "detail" 중 하나)
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "plain" => Ok(Self::Plain),
            "wakati" => Ok(Self::Wakati),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// 커맨드라인 인자
#[derive(Parser, Debug)]
#[clap(name = "tokenize", about = "Predicts Korean morphemes")]
struct Args {
    /// Directory of plain-text dictionary resources.
    #[clap(short = 'd', long, conflicts_with = "sysdic", required_unless_present = "sysdic")]
    dict_dir: Option<PathBuf>,

    /// Compiled dictionary snapshot.
    #[clap(short = 'i', long)]
    sysdic: Option<PathBuf>,

    /// Output mode. Choices are plain, wakati, and detail.
    #[clap(short = 'O', long, default_value = "plain")]
    output_mode: OutputMode,
}

/// 평문 자원 디렉터리에서 사전을 구축합니다.
///
/// 존재하는 파일만 읽어들입니다.
fn load_dictionary_dir(dir: &Path) -> Result<KoreanDictionary, Box<dyn Error>> {
    let mut builder = DictionaryBuilder::new();
    for &(file, pos) in WORD_LIST_FILES {
        let path = dir.join(file);
        if path.exists() {
            builder = builder.word_list(pos, File::open(path)?)?;
        }
    }
    let freq = dir.join("freq.csv");
    if freq.exists() {
        builder = builder.frequencies(File::open(freq)?)?;
    }
    let family = dir.join("family_names.txt");
    if family.exists() {
        builder = builder.family_names(File::open(family)?)?;
    }
    let given = dir.join("given_names.txt");
    if given.exists() {
        builder = builder.given_names(File::open(given)?)?;
    }
    let full = dir.join("full_names.txt");
    if full.exists() {
        builder = builder.full_names(File::open(full)?)?;
    }
    Ok(builder.build())
}

/// 메인 함수
///
/// 사전을 읽어들이고, 표준 입력의 각 줄을 형태소 분석하여 지정된
/// 형식으로 표준 출력에 기록합니다.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let dict = match (&args.sysdic, &args.dict_dir) {
        (Some(path), _) => KoreanDictionary::from_path(path)?,
        (None, Some(dir)) => load_dictionary_dir(dir)?,
        (None, None) => unreachable!("clap enforces one dictionary source"),
    };

    let tokenizer = Tokenizer::new(dict);
    let mut worker = tokenizer.new_worker();

    eprintln!("Ready to tokenize...");
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        worker.reset_text(&line);
        worker.tokenize();
        match args.output_mode {
            OutputMode::Plain => {
                writeln!(out, "{}", render(worker.tokens()))?;
            }
            OutputMode::Wakati => {
                let surfaces: Vec<&str> = worker
                    .tokens()
                    .iter()
                    .filter(|t| t.pos != KoreanPos::Space)
                    .map(|t| t.text.as_str())
                    .collect();
                writeln!(out, "{}", surfaces.join(" "))?;
            }
            OutputMode::Detail => {
                for t in worker.tokens() {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}\t{}",
                        t.text, t.pos, t.offset, t.length, t.unknown
                    )?;
                }
                writeln!(out, "EOS")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
