//! 토큰 결과 컨테이너
//!
//! 이 모듈은 형태소 분석의 결과로 얻어지는 토큰 타입을 제공합니다.
//! 토큰은 표층형 텍스트, 품사, 문자 단위 위치 정보, 그리고 사전에 없는
//! 형태소임을 나타내는 미상 플래그를 보유합니다.

use std::fmt;

use crate::pos::KoreanPos;

/// 형태소 분석의 결과 토큰
///
/// `offset`과 `length`는 입력 문자열에서의 문자 단위 위치입니다.
/// `unknown`이 참이면 해당 부분 문자열이 어떤 사전에도 실려 있지 않음을
/// 뜻합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KoreanToken {
    /// 표층형 (입력 문자열 중의 부분 문자열)
    pub text: String,
    /// 품사
    pub pos: KoreanPos,
    /// 시작 위치 (문자 단위)
    pub offset: usize,
    /// 길이 (문자 단위)
    pub length: usize,
    /// 사전에 없는 형태소이면 참
    pub unknown: bool,
}

impl KoreanToken {
    /// 새 토큰을 생성합니다.
    ///
    /// 길이는 텍스트의 문자 수로 계산됩니다.
    ///
    /// # 인자
    ///
    /// * `text` - 표층형
    /// * `pos` - 품사
    /// * `offset` - 시작 위치 (문자 단위)
    pub fn new<S>(text: S, pos: KoreanPos, offset: usize) -> Self
    where
        S: Into<String>,
    {
        let text = text.into();
        let length = text.chars().count();
        Self {
            text,
            pos,
            offset,
            length,
            unknown: false,
        }
    }

    /// 미상 플래그가 지정된 새 토큰을 생성합니다.
    ///
    /// # 인자
    ///
    /// * `text` - 표층형
    /// * `pos` - 품사
    /// * `offset` - 시작 위치 (문자 단위)
    /// * `unknown` - 미상 플래그
    pub fn with_unknown<S>(text: S, pos: KoreanPos, offset: usize, unknown: bool) -> Self
    where
        S: Into<String>,
    {
        Self {
            unknown,
            ..Self::new(text, pos, offset)
        }
    }

    /// 토큰의 끝 위치(문자 단위, 배타적)를 반환합니다.
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// `{text}/{pos}` 형식으로 출력합니다. 미상 토큰은 `{text}*/{pos}`.
impl fmt::Display for KoreanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}/{}",
            self.text,
            if self.unknown { "*" } else { "" },
            self.pos
        )
    }
}

/// 토큰 열을 텍스트 형식으로 렌더링합니다.
///
/// 각 토큰을 `{text}/{pos}` 형식으로 출력하여 공백 하나로 잇되,
/// `Space` 토큰은 빈 문자열로 출력하고 그 결과 생기는 연속 공백은
/// 하나로 줄입니다.
///
/// # 인자
///
/// * `tokens` - 렌더링할 토큰 열
///
/// # 예
///
/// ```
/// use hanmal::pos::KoreanPos;
/// use hanmal::token::{render, KoreanToken};
///
/// let tokens = vec![
///     KoreanToken::new("하늘", KoreanPos::Noun, 0),
///     KoreanToken::new(" ", KoreanPos::Space, 2),
///     KoreanToken::new("바다", KoreanPos::Noun, 3),
/// ];
/// assert_eq!(render(&tokens), "하늘/Noun 바다/Noun");
/// ```
pub fn render(tokens: &[KoreanToken]) -> String {
    let parts: Vec<String> = tokens
        .iter()
        .map(|t| {
            if t.pos == KoreanPos::Space {
                String::new()
            } else {
                t.to_string()
            }
        })
        .collect();
    let mut rendered = parts.join(" ");
    loop {
        let collapsed = rendered.replace("  ", " ");
        if collapsed == rendered {
            break;
        }
        rendered = collapsed;
    }
    rendered.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let token = KoreanToken::new("하늘", KoreanPos::Noun, 0);
        assert_eq!(token.to_string(), "하늘/Noun");
        assert_eq!(token.length, 2);

        let unknown = KoreanToken::with_unknown("버카충", KoreanPos::ProperNoun, 0, true);
        assert_eq!(unknown.to_string(), "버카충*/ProperNoun");
    }

    #[test]
    fn test_end() {
        let token = KoreanToken::new("바다", KoreanPos::Noun, 3);
        assert_eq!(token.end(), 5);
    }

    #[test]
    fn test_render_collapses_spaces() {
        let tokens = vec![
            KoreanToken::new("하늘", KoreanPos::Noun, 0),
            KoreanToken::new("  ", KoreanPos::Space, 2),
            KoreanToken::new("은", KoreanPos::Josa, 4),
        ];
        assert_eq!(render(&tokens), "하늘/Noun 은/Josa");
        assert_eq!(render(&[]), "");
    }
}
