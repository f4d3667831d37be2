//! 형태소 분석용 사전 모듈
//!
//! 이 모듈은 품사별 단어 집합, 고유 명사, 인명, 단어 빈도를 보유하는
//! 사전 제공자를 구현합니다. 주요 기능은 다음과 같습니다:
//!
//! - 품사별 소속 판정 (`contains`)
//! - 실행 중 단어 추가 (`add_words`). 추가된 단어는 이후의 분석 호출에서
//!   즉시 관찰됩니다
//! - 인명·인명 변형·한국어 수사 판정 술어
//! - 스냅샷 파일로의 저장과 복원
//!
//! 품사별 저장소는 [`RwLock`]으로 보호된 샤드이므로 여러 스레드가
//! 동시에 분석을 수행하는 동안에도 안전하게 읽을 수 있습니다. 분석기는
//! 사전을 변경하지 않습니다.
//!
//! # 사전 구축
//!
//! 평문 단어 목록과 CSV 빈도 파일로부터는 [`DictionaryBuilder`]로
//! 구축하고, 컴파일된 스냅샷은 [`KoreanDictionary::from_path`]로
//! 읽어들입니다.

pub mod builder;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use bincode::{Decode, Encode};
use hashbrown::{HashMap, HashSet};

use crate::errors::{HanmalError, Result};
use crate::hangul;
use crate::pos::{KoreanPos, DICTIONARY_POS};

pub use crate::dictionary::builder::DictionaryBuilder;

/// 사전 스냅샷 파일을 식별하는 매직 바이트.
///
/// "0.1"은 스냅샷 형식의 버전이며 크레이트의 시맨틱 버전과는 무관합니다.
pub const DICTIONARY_MAGIC: &[u8] = b"HanmalDictionary 0.1\n";

/// 한국어 수사를 이루는 문자 집합
const NUMBER_CHARS: &str = "일이삼사오육칠팔구십백천만억조경해";
/// 수사의 말미에만 추가로 허용되는 단위 문자 집합
const NUMBER_LAST_CHARS: &str = "원배분초";

/// 직렬화 가능한 사전 스냅샷
#[derive(Encode, Decode)]
struct DictionarySnapshot {
    words: Vec<(KoreanPos, Vec<String>)>,
    frequencies: Vec<(String, f32)>,
    family_names: Vec<String>,
    given_names: Vec<String>,
    full_names: Vec<String>,
}

/// 품사별 단어 집합과 보조 술어를 제공하는 사전
///
/// 분석기가 소비하는 계약은 다음과 같습니다: 품사마다 상수 시간
/// 소속 판정, 고유 명사 집합, 그리고 [`is_name`](Self::is_name) ·
/// [`is_korean_name_variation`](Self::is_korean_name_variation) ·
/// [`is_korean_number`](Self::is_korean_number) 술어. 모든 술어는
/// 전역적이고 결정적입니다.
#[derive(Debug)]
pub struct KoreanDictionary {
    words: HashMap<KoreanPos, RwLock<HashSet<String>>>,
    frequencies: RwLock<HashMap<String, f32>>,
    family_names: RwLock<HashSet<String>>,
    given_names: RwLock<HashSet<String>>,
    full_names: RwLock<HashSet<String>>,
}

impl Default for KoreanDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl KoreanDictionary {
    /// 빈 사전을 생성합니다.
    pub fn new() -> Self {
        let mut words = HashMap::with_capacity(DICTIONARY_POS.len());
        for &pos in DICTIONARY_POS {
            words.insert(pos, RwLock::new(HashSet::new()));
        }
        Self {
            words,
            frequencies: RwLock::new(HashMap::new()),
            family_names: RwLock::new(HashSet::new()),
            given_names: RwLock::new(HashSet::new()),
            full_names: RwLock::new(HashSet::new()),
        }
    }

    /// 단어가 주어진 품사의 사전에 실려 있는지 판정합니다.
    ///
    /// 사전이 항목을 보유하지 않는 품사(청커 전용 분류)에 대해서는
    /// 항상 `false`를 반환합니다.
    ///
    /// # 인자
    ///
    /// * `pos` - 품사
    /// * `word` - 판정할 단어
    pub fn contains(&self, pos: KoreanPos, word: &str) -> bool {
        self.words.get(&pos).is_some_and(|shard| {
            shard
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(word)
        })
    }

    /// 주어진 품사의 사전에 단어들을 추가합니다.
    ///
    /// 추가된 단어는 이후의 모든 분석 호출에서 즉시 관찰됩니다.
    /// 사전이 항목을 보유하지 않는 품사면 아무 일도 하지 않습니다.
    ///
    /// # 인자
    ///
    /// * `pos` - 품사
    /// * `words` - 추가할 단어들
    pub fn add_words<I, S>(&self, pos: KoreanPos, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(shard) = self.words.get(&pos) {
            let mut shard = shard.write().unwrap_or_else(PoisonError::into_inner);
            for word in words {
                shard.insert(word.into());
            }
        }
    }

    /// 단어의 상대 빈도(`[0, 1]`)를 반환합니다. 미등록 단어는 `0.0`.
    ///
    /// # 인자
    ///
    /// * `word` - 조회할 단어
    #[inline]
    pub fn frequency(&self, word: &str) -> f32 {
        self.frequencies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(word)
            .copied()
            .unwrap_or(0.0)
    }

    /// 단어의 상대 빈도를 등록합니다.
    ///
    /// # 인자
    ///
    /// * `word` - 단어
    /// * `frequency` - `[0, 1]` 범위의 상대 빈도
    pub fn set_frequency<S>(&self, word: S, frequency: f32)
    where
        S: Into<String>,
    {
        self.frequencies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(word.into(), frequency);
    }

    /// 성씨 목록에 추가합니다.
    pub fn add_family_names<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = self.family_names.write().unwrap_or_else(PoisonError::into_inner);
        set.extend(names.into_iter().map(Into::into));
    }

    /// 이름 목록에 추가합니다.
    pub fn add_given_names<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = self.given_names.write().unwrap_or_else(PoisonError::into_inner);
        set.extend(names.into_iter().map(Into::into));
    }

    /// 전체 성명 목록에 추가합니다.
    pub fn add_full_names<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = self.full_names.write().unwrap_or_else(PoisonError::into_inner);
        set.extend(names.into_iter().map(Into::into));
    }

    /// 단어가 인명인지 판정합니다.
    ///
    /// 전체 성명 또는 이름 목록에 있으면 참이고, 세 글자 단어는
    /// 첫 글자가 성씨이고 나머지 두 글자가 이름이면 참입니다.
    ///
    /// # 인자
    ///
    /// * `word` - 판정할 단어
    pub fn is_name(&self, word: &str) -> bool {
        if self
            .full_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(word)
        {
            return true;
        }
        if self
            .given_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(word)
        {
            return true;
        }

        let chars: Vec<char> = word.chars().collect();
        if chars.len() != 3 {
            return false;
        }
        let family: String = chars[..1].iter().collect();
        let given: String = chars[1..].iter().collect();
        self.family_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(family.as_str())
            && self
                .given_names
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(given.as_str())
    }

    /// 단어가 한국어 수사인지 판정합니다.
    ///
    /// 마지막 글자를 제외한 모든 글자는 수사 문자여야 하고, 마지막
    /// 글자는 수사 문자이거나 단위 문자여야 합니다.
    ///
    /// # 인자
    ///
    /// * `word` - 판정할 단어
    pub fn is_korean_number(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        let Some((&last, init)) = chars.split_last() else {
            return false;
        };
        init.iter().all(|&c| NUMBER_CHARS.contains(c))
            && (NUMBER_CHARS.contains(last) || NUMBER_LAST_CHARS.contains(last))
    }

    /// 단어가 인명의 호격 변형인지 판정합니다.
    ///
    /// `혜미니`(= 혜민 + 이)처럼 이름 말미에 조사 `이`가 붙으며 받침이
    /// 올라간 형태를 자모 분해로 복원하여 인명 목록과 대조합니다.
    ///
    /// # 인자
    ///
    /// * `word` - 판정할 단어
    pub fn is_korean_name_variation(&self, word: &str) -> bool {
        if self.is_name(word) {
            return true;
        }
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        if !(3..=5).contains(&n) {
            return false;
        }
        let Some(decomposed) = chars
            .iter()
            .map(|&c| hangul::decompose(c))
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };

        let last = decomposed[n - 1];
        if last.onset == 'ㅇ' || last.vowel != 'ㅣ' || last.coda.is_some() {
            return false;
        }
        if !hangul::is_coda_jamo(last.onset) {
            return false;
        }
        if decomposed[n - 2].coda.is_some() {
            return false;
        }

        // Recover the original name: merge the final onset into the
        // preceding syllable as its coda, e.g. 혜미 + 니 -> 혜민.
        let mut stem = String::new();
        for &hc in &decomposed[..n - 2] {
            match hangul::compose_char(hc) {
                Some(c) => stem.push(c),
                None => return false,
            }
        }
        match hangul::compose(decomposed[n - 2].onset, decomposed[n - 2].vowel, Some(last.onset)) {
            Some(c) => stem.push(c),
            None => return false,
        }

        if self.is_name(&stem) {
            return true;
        }
        let mut with_jamo = stem;
        with_jamo.push(last.onset);
        self.is_name(&with_jamo)
    }

    /// 사전 스냅샷을 라이터에 기록합니다.
    ///
    /// 매직 바이트에 이어 bincode로 인코딩된 스냅샷이 기록됩니다.
    /// 항목은 재현성을 위해 정렬되어 저장됩니다.
    ///
    /// # 인자
    ///
    /// * `wtr` - 기록 대상 라이터
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        let snapshot = self.snapshot();
        wtr.write_all(DICTIONARY_MAGIC)?;
        bincode::encode_into_std_write(&snapshot, &mut wtr, bincode::config::standard())?;
        Ok(())
    }

    /// 리더로부터 사전 스냅샷을 읽어들입니다.
    ///
    /// # 인자
    ///
    /// * `rdr` - 읽기 대상 리더
    ///
    /// # 오류
    ///
    /// 매직 바이트가 일치하지 않으면 [`HanmalError::InvalidFormat`]을
    /// 반환합니다.
    pub fn read<R>(mut rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0u8; DICTIONARY_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if &magic[..] != DICTIONARY_MAGIC {
            return Err(HanmalError::invalid_format(
                "rdr",
                "invalid dictionary snapshot header",
            ));
        }
        let snapshot: DictionarySnapshot =
            bincode::decode_from_std_read(&mut rdr, bincode::config::standard())?;

        let dict = Self::new();
        for (pos, words) in snapshot.words {
            dict.add_words(pos, words);
        }
        for (word, frequency) in snapshot.frequencies {
            dict.set_frequency(word, frequency);
        }
        dict.add_family_names(snapshot.family_names);
        dict.add_given_names(snapshot.given_names);
        dict.add_full_names(snapshot.full_names);
        Ok(dict)
    }

    /// 파일 경로로부터 사전 스냅샷을 읽어들입니다.
    ///
    /// # 인자
    ///
    /// * `path` - 스냅샷 파일 경로
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::read(BufReader::new(File::open(path)?))
    }

    /// 사전 스냅샷을 파일에 기록합니다.
    ///
    /// # 인자
    ///
    /// * `path` - 기록할 파일 경로
    pub fn write_to_path<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        self.write(BufWriter::new(File::create(path)?))
    }

    fn snapshot(&self) -> DictionarySnapshot {
        let mut words = vec![];
        for &pos in DICTIONARY_POS {
            let shard = self.words[&pos].read().unwrap_or_else(PoisonError::into_inner);
            let mut entries: Vec<String> = shard.iter().cloned().collect();
            entries.sort_unstable();
            words.push((pos, entries));
        }
        let mut frequencies: Vec<(String, f32)> = self
            .frequencies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(w, &f)| (w.clone(), f))
            .collect();
        frequencies.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let sorted = |set: &RwLock<HashSet<String>>| {
            let mut names: Vec<String> = set
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .cloned()
                .collect();
            names.sort_unstable();
            names
        };
        DictionarySnapshot {
            words,
            frequencies,
            family_names: sorted(&self.family_names),
            given_names: sorted(&self.given_names),
            full_names: sorted(&self.full_names),
        }
    }
}
