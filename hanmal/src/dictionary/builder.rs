//! 사전 구축을 위한 빌더
//!
//! 이 모듈은 평문 자원 파일로부터 [`KoreanDictionary`]를 구축하는 빌더를
//! 제공합니다. 단어 목록은 한 줄에 한 단어, 빈도 목록은 `단어,횟수`
//! 형식의 CSV입니다.

use std::io::{BufRead, BufReader, Read};

use crate::dictionary::KoreanDictionary;
use crate::errors::{HanmalError, Result};
use crate::pos::KoreanPos;
use crate::utils::parse_csv_row;

/// 평문 자원 리더들로부터 [`KoreanDictionary`]를 구축하는 빌더
///
/// # 예
///
/// ```
/// use hanmal::{DictionaryBuilder, KoreanPos};
///
/// let dict = DictionaryBuilder::new()
///     .word_list(KoreanPos::Noun, "하늘\n바다".as_bytes())
///     .unwrap()
///     .word_list(KoreanPos::Josa, "은\n는".as_bytes())
///     .unwrap()
///     .build();
/// assert!(dict.contains(KoreanPos::Noun, "하늘"));
/// ```
#[derive(Default)]
pub struct DictionaryBuilder {
    dict: KoreanDictionary,
}

impl DictionaryBuilder {
    /// 빈 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 한 줄에 한 단어씩 적힌 단어 목록을 읽어 주어진 품사에 추가합니다.
    ///
    /// 빈 줄과 `#`으로 시작하는 줄은 무시합니다.
    ///
    /// # 인자
    ///
    /// * `pos` - 단어들이 속할 품사
    /// * `rdr` - 단어 목록 리더
    pub fn word_list<R>(self, pos: KoreanPos, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let words = Self::read_lines(rdr)?;
        self.dict.add_words(pos, words);
        Ok(self)
    }

    /// 성씨 목록을 읽어들입니다.
    ///
    /// # 인자
    ///
    /// * `rdr` - 성씨 목록 리더
    pub fn family_names<R>(self, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let names = Self::read_lines(rdr)?;
        self.dict.add_family_names(names);
        Ok(self)
    }

    /// 이름 목록을 읽어들입니다.
    ///
    /// # 인자
    ///
    /// * `rdr` - 이름 목록 리더
    pub fn given_names<R>(self, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let names = Self::read_lines(rdr)?;
        self.dict.add_given_names(names);
        Ok(self)
    }

    /// 전체 성명 목록을 읽어들입니다.
    ///
    /// # 인자
    ///
    /// * `rdr` - 성명 목록 리더
    pub fn full_names<R>(self, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let names = Self::read_lines(rdr)?;
        self.dict.add_full_names(names);
        Ok(self)
    }

    /// `단어,횟수` 형식의 CSV 빈도 목록을 읽어들입니다.
    ///
    /// 횟수는 목록 내 최대 횟수로 나누어 `[0, 1]` 범위의 상대 빈도로
    /// 정규화되어 저장됩니다.
    ///
    /// # 인자
    ///
    /// * `rdr` - 빈도 목록 리더
    ///
    /// # 오류
    ///
    /// 필드 수가 맞지 않거나 횟수를 정수로 해석할 수 없으면
    /// [`HanmalError::InvalidFormat`]을 반환합니다.
    pub fn frequencies<R>(self, rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut counts: Vec<(String, u64)> = vec![];
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            let row = line.trim();
            if row.is_empty() || row.starts_with('#') {
                continue;
            }
            let fields = parse_csv_row(row);
            if fields.len() != 2 {
                return Err(HanmalError::invalid_format(
                    "frequencies",
                    format!("expected `word,count` but got {row:?}"),
                ));
            }
            let count: u64 = fields[1].trim().parse().map_err(|_| {
                HanmalError::invalid_format(
                    "frequencies",
                    format!("invalid count in row {row:?}"),
                )
            })?;
            counts.push((fields[0].clone(), count));
        }

        let max = counts.iter().map(|&(_, c)| c).max().unwrap_or(0);
        if max > 0 {
            for (word, count) in counts {
                self.dict.set_frequency(word, count as f32 / max as f32);
            }
        }
        Ok(self)
    }

    /// 구축된 사전을 반환합니다.
    pub fn build(self) -> KoreanDictionary {
        self.dict
    }

    fn read_lines<R>(rdr: R) -> Result<Vec<String>>
    where
        R: Read,
    {
        let mut entries = vec![];
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            entries.push(entry.to_string());
        }
        Ok(entries)
    }
}
