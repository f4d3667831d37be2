//! 청커 모듈
//!
//! 입력 문자열을 한 번 훑으며 각 문자를 스크립트 계열(한글, 자모, 알파벳,
//! 숫자, 문장 부호, 공백, 외국 문자, 분류 불가)로 분류하고, 같은 분류의
//! 최대 연속 구간을
//! 타입이 붙은 청크로 내보냅니다. URL·이메일·해시태그·멘션·숫자 표현은
//! 결정적 최장 일치 규칙(우선순위: URL > 이메일 > 해시태그 > 멘션 > 숫자)
//! 으로 먼저 인식합니다. 오프셋은 문자 단위이며 입력 전체를 빈틈없이
//! 덮습니다.

use std::sync::LazyLock;

use regex::Regex;

use crate::pos::KoreanPos;
use crate::token::KoreanToken;

/// 스크립트 분류에 앞서 적용되는 특수 패턴. 배열 순서가 우선순위입니다.
static CHUNKING_PATTERNS: LazyLock<Vec<(KoreanPos, Regex)>> = LazyLock::new(|| {
    vec![
        (
            KoreanPos::Url,
            Regex::new(r"(?i)\b(?:https?://|www\.)[^\s가-힣]+").expect("valid URL pattern"),
        ),
        (
            KoreanPos::Email,
            Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
                .expect("valid email pattern"),
        ),
        (
            KoreanPos::Hashtag,
            Regex::new(r"#[A-Za-z0-9가-힣]+").expect("valid hashtag pattern"),
        ),
        (
            KoreanPos::ScreenName,
            Regex::new(r"@[A-Za-z0-9_]+").expect("valid screen name pattern"),
        ),
        (
            KoreanPos::Number,
            Regex::new(
                r"\$?[0-9]+(?:,[0-9]{3})*(?:[/~:.-][0-9]+)?(?:천|만|억|조)*(?:%|원|달러|위안|옌|엔|유로|등|년|월|일|회|시간|시|분|초)?",
            )
            .expect("valid number pattern"),
        ),
    ]
});

/// 문자 하나를 스크립트 계열로 분류합니다.
fn char_class(c: char) -> KoreanPos {
    match c {
        '가'..='힣' => KoreanPos::Korean,
        'ㄱ'..='ㅣ' => KoreanPos::KoreanParticle,
        '0'..='9' => KoreanPos::Number,
        'a'..='z' | 'A'..='Z' => KoreanPos::Alpha,
        '·' | '…' | '‥' | '。' | '、' | '「' | '」' | '『' | '』' | '〈' | '〉' | '《' | '》'
        | '“' | '”' | '‘' | '’' | '!' | '?' | '~' => KoreanPos::Punctuation,
        c if c.is_whitespace() => KoreanPos::Space,
        c if c.is_ascii_punctuation() => KoreanPos::Punctuation,
        // Control characters and the replacement character carry no
        // script of their own.
        c if c.is_control() || c == '\u{FFFD}' => KoreanPos::Unknown,
        _ => KoreanPos::Foreign,
    }
}

/// 입력 문자열을 타입이 붙은 청크 열로 분할합니다.
///
/// 결과 토큰의 텍스트를 이어 붙이면 입력과 정확히 일치하며, 오프셋은
/// 단조 증가하고 빈틈이 없습니다. 공백 구간은 `Space` 토큰으로
/// 유지됩니다.
///
/// # 인자
///
/// * `text` - 분할할 입력 문자열
///
/// # 반환값
///
/// 입력 전체를 덮는 청크 토큰 벡터
///
/// # 예
///
/// ```
/// use hanmal::chunker::chunk;
/// use hanmal::KoreanPos;
///
/// let chunks = chunk("한국어 chunking 123");
/// let pos: Vec<KoreanPos> = chunks.iter().map(|t| t.pos).collect();
/// assert_eq!(
///     pos,
///     vec![
///         KoreanPos::Korean,
///         KoreanPos::Space,
///         KoreanPos::Alpha,
///         KoreanPos::Space,
///         KoreanPos::Number,
///     ]
/// );
/// ```
pub fn chunk(text: &str) -> Vec<KoreanToken> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![];
    }

    // Byte positions of each character, for mapping regex spans to char offsets.
    let byte_starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();

    let mut classes: Vec<KoreanPos> = chars.iter().map(|&c| char_class(c)).collect();
    let mut span_ids: Vec<Option<u32>> = vec![None; chars.len()];
    let mut next_span = 0u32;

    for (pos, pattern) in CHUNKING_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let start = byte_starts.partition_point(|&b| b < m.start());
            let end = byte_starts.partition_point(|&b| b < m.end());
            // A higher-priority pattern already claimed part of this span.
            if span_ids[start..end].iter().any(|s| s.is_some()) {
                continue;
            }
            for i in start..end {
                classes[i] = *pos;
                span_ids[i] = Some(next_span);
            }
            next_span += 1;
        }
    }

    let mut tokens = vec![];
    let mut run_start = 0;
    for i in 1..=chars.len() {
        let boundary = i == chars.len()
            || classes[i] != classes[run_start]
            || span_ids[i] != span_ids[run_start];
        if boundary {
            let run_text: String = chars[run_start..i].iter().collect();
            tokens.push(KoreanToken::new(run_text, classes[run_start], run_start));
            run_start = i;
        }
    }
    tokens
}
