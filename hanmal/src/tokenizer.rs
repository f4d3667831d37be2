//! 토크나이저 구현
//!
//! 이 모듈은 한국어 형태소 분석을 수행하는 메인 토크나이저를 제공합니다.
//! 입력은 먼저 스크립트 계열별 청크로 분할되고, 한글 청크마다 사전과
//! 품사 트라이에 기반한 빔 탐색으로 가장 그럴듯한 형태소 열을 찾습니다.
//!
//! # 주요 구조체
//!
//! - [`Tokenizer`]: 사전과 문법을 보유하는 메인 구조체
//! - [`Worker`]: 내부 버퍼를 재사용하며 실제 분석을 수행하는 워커
//!
//! # 예
//!
//! ```
//! use hanmal::{DictionaryBuilder, KoreanPos, Tokenizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dict = DictionaryBuilder::new()
//!     .word_list(KoreanPos::Noun, "아버지\n방".as_bytes())?
//!     .word_list(KoreanPos::Josa, "가\n에".as_bytes())?
//!     .build();
//!
//! let tokenizer = Tokenizer::new(dict);
//! let mut worker = tokenizer.new_worker();
//!
//! worker.reset_text("아버지가");
//! worker.tokenize();
//! assert_eq!(worker.num_tokens(), 2);
//! assert_eq!(worker.token(0).text, "아버지");
//! assert_eq!(worker.token(1).text, "가");
//! # Ok(())
//! # }
//! ```

pub(crate) mod candidate;
pub(crate) mod parser;
pub mod worker;

use std::sync::{Arc, LazyLock};

use crate::dictionary::KoreanDictionary;
use crate::errors::Result;
use crate::pos::trie::PosTrie;
use crate::pos::{KoreanPos, DEFAULT_GRAMMAR};
use crate::profile::TokenizerProfile;
use crate::token::KoreanToken;
use crate::tokenizer::worker::Worker;

/// 기본 문법으로 한 번만 구축되는 품사 트라이.
static DEFAULT_TRIE: LazyLock<Arc<PosTrie>> = LazyLock::new(|| {
    Arc::new(PosTrie::from_grammar(DEFAULT_GRAMMAR).expect("default grammar must compile"))
});

/// 형태소 분석을 수행하는 토크나이저
///
/// 사전과 컴파일된 품사 트라이를 보유하며, [`Worker`] 인스턴스를 여럿
/// 만들어 병렬 분석에 쓸 수 있습니다. 호출 단위로는 동기적이고 상태가
/// 없으므로 여러 스레드가 동시에 [`tokenize`](Self::tokenize)를 호출해도
/// 안전합니다. 사전은 읽기 위주로 공유되며, 실행 중의
/// [`add_words`](KoreanDictionary::add_words)는 이후 호출에서 즉시
/// 관찰됩니다.
#[derive(Clone)]
pub struct Tokenizer {
    dict: Arc<KoreanDictionary>,
    trie: Arc<PosTrie>,
    profile: TokenizerProfile,
}

impl Tokenizer {
    /// 새 토크나이저를 생성합니다.
    ///
    /// 기본 문법과 기본 프로파일을 사용합니다. 사전의 소유권은
    /// 토크나이저로 이동합니다. 여러 토크나이저가 사전을 공유해야 하면
    /// [`Tokenizer::from_shared_dictionary`]를 사용하십시오.
    ///
    /// # 인자
    ///
    /// * `dict` - 형태소 분석에 사용할 사전
    pub fn new(dict: KoreanDictionary) -> Self {
        Self::from_shared_dictionary(Arc::new(dict))
    }

    /// 공유된 사전으로부터 새 토크나이저를 생성합니다.
    ///
    /// 여러 토크나이저 인스턴스가 같은 사전 데이터를 다시 읽어들이지
    /// 않고 공유해야 하는 멀티스레드 시나리오에서 유용합니다.
    ///
    /// # 인자
    ///
    /// * `dict` - 공유할 사전의 `Arc` 참조
    ///
    /// # 예
    ///
    /// ```
    /// use std::sync::Arc;
    /// use hanmal::{KoreanDictionary, Tokenizer};
    ///
    /// let dict = Arc::new(KoreanDictionary::new());
    /// let tokenizer1 = Tokenizer::from_shared_dictionary(dict.clone());
    /// let tokenizer2 = Tokenizer::from_shared_dictionary(dict.clone());
    /// ```
    pub fn from_shared_dictionary(dict: Arc<KoreanDictionary>) -> Self {
        Self {
            dict,
            trie: DEFAULT_TRIE.clone(),
            profile: TokenizerProfile::default(),
        }
    }

    /// 사용자 정의 문법으로 새 토크나이저를 생성합니다.
    ///
    /// # 인자
    ///
    /// * `dict` - 형태소 분석에 사용할 사전
    /// * `grammar` - 품사 열 명세와 말미 품사의 쌍들
    ///
    /// # 오류
    ///
    /// 문법 명세가 잘못되었으면 해당 명세를 지목하는 오류를 반환합니다.
    pub fn with_grammar(dict: KoreanDictionary, grammar: &[(&str, KoreanPos)]) -> Result<Self> {
        Ok(Self {
            dict: Arc::new(dict),
            trie: Arc::new(PosTrie::from_grammar(grammar)?),
            profile: TokenizerProfile::default(),
        })
    }

    /// 기본 프로파일을 교체한 토크나이저를 반환합니다.
    ///
    /// # 인자
    ///
    /// * `profile` - 새 기본 프로파일
    pub fn with_profile(mut self, profile: TokenizerProfile) -> Self {
        self.profile = profile;
        self
    }

    /// 사전에 대한 참조를 반환합니다.
    ///
    /// 실행 중 단어 추가([`add_words`](KoreanDictionary::add_words))에
    /// 사용할 수 있습니다.
    #[inline(always)]
    pub fn dictionary(&self) -> &KoreanDictionary {
        &self.dict
    }

    /// 품사 트라이에 대한 참조를 반환합니다.
    #[inline(always)]
    pub(crate) fn trie(&self) -> &PosTrie {
        &self.trie
    }

    /// 기본 프로파일을 반환합니다.
    #[inline(always)]
    pub(crate) fn profile(&self) -> TokenizerProfile {
        self.profile
    }

    /// 새 워커를 생성합니다.
    ///
    /// 워커는 내부 버퍼를 재사용하므로, 많은 문장을 분석할 때는 워커
    /// 하나를 만들어 반복 사용하는 편이 효율적입니다.
    pub fn new_worker(&self) -> Worker {
        Worker::new(self.clone())
    }

    /// 입력 문자열을 형태소 분석하여 토큰 열을 반환합니다.
    ///
    /// 결과 토큰의 텍스트를 이어 붙이면 입력과 일치하며(공백 포함),
    /// 오프셋은 단조 증가하고 빈틈이 없습니다. 빈 입력은 빈 열을
    /// 반환합니다.
    ///
    /// # 인자
    ///
    /// * `text` - 분석할 입력 문자열
    pub fn tokenize(&self, text: &str) -> Vec<KoreanToken> {
        self.tokenize_with_profile(text, &self.profile)
    }

    /// 주어진 프로파일로 입력 문자열을 형태소 분석합니다.
    ///
    /// # 인자
    ///
    /// * `text` - 분석할 입력 문자열
    /// * `profile` - 이번 호출에만 적용할 점수 가중치
    pub fn tokenize_with_profile(
        &self,
        text: &str,
        profile: &TokenizerProfile,
    ) -> Vec<KoreanToken> {
        let mut worker = self.new_worker();
        worker.set_profile(*profile);
        worker.reset_text(text);
        worker.tokenize();
        worker.take_tokens()
    }
}
