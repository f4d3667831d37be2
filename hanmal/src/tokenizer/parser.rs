//! 청크 파서 (동적 계획법 핵심)
//!
//! 한글 청크 하나를 사전에 실린 형태소들의 열로 분할하되, 그 품사 열이
//! 품사 트라이가 허용하는 경로를 이루도록 하는 N-best 탐색을 수행합니다.
//! 해의 표는 끝 위치 `[0, len]`마다 하나의 버킷을 갖는 밀집 배열이며,
//! 각 버킷은 (점수, 동점 판별값) 오름차순으로 상위
//! [`TOP_N_PER_STATE`]개의 후보만 유지합니다. 버킷 벡터는 호출 간에
//! 재사용되어 불필요한 재할당을 피합니다.

use crate::common::{MAX_TRACE_BACK, TOP_N_PER_STATE};
use crate::dictionary::KoreanDictionary;
use crate::pos::trie::PosTrie;
use crate::pos::{KoreanPos, SELF_CONTAINED_POS};
use crate::profile::TokenizerProfile;
use crate::token::KoreanToken;
use crate::tokenizer::candidate::{CandidateParse, ParseArena};

/// 청크 파서의 재사용 버퍼 묶음
#[derive(Default)]
pub(crate) struct ChunkParser {
    solutions: Vec<Vec<CandidateParse>>,
    arena: ParseArena,
    chars: Vec<char>,
}

impl ChunkParser {
    /// 한글 청크 하나를 분석하여 토큰 열을 `out`에 덧붙입니다.
    ///
    /// 결과 토큰의 텍스트를 이어 붙이면 `text`와 일치하고, 오프셋은
    /// `offset`에 청크 내 위치를 더한 값입니다. 분할이 불가능한 청크는
    /// 전체를 덮는 미상 명사 토큰 하나가 됩니다.
    ///
    /// # 인자
    ///
    /// * `dict` - 사전 제공자
    /// * `trie` - 컴파일된 품사 트라이
    /// * `profile` - 점수 가중치
    /// * `text` - 청크의 텍스트
    /// * `offset` - 청크의 입력 내 시작 위치 (문자 단위)
    /// * `out` - 토큰을 덧붙일 출력 벡터
    pub(crate) fn parse_into(
        &mut self,
        dict: &KoreanDictionary,
        trie: &PosTrie,
        profile: &TokenizerProfile,
        text: &str,
        offset: usize,
        out: &mut Vec<KoreanToken>,
    ) {
        // Fast path: the whole chunk is attested under some POS.
        for &pos in SELF_CONTAINED_POS {
            if dict.contains(pos, text) {
                out.push(KoreanToken::new(text, pos, offset));
                return;
            }
        }

        self.chars.clear();
        self.chars.extend(text.chars());
        let len = self.chars.len();
        if len == 0 {
            return;
        }

        self.arena.clear();
        Self::reset_buckets(&mut self.solutions, len + 1);

        let has_space = self.chars.contains(&' ');
        self.solutions[0].push(CandidateParse::initial(trie.roots().to_vec(), has_space));

        for end in 1..=len {
            let lo = end.saturating_sub(MAX_TRACE_BACK);
            let (prefix, rest) = self.solutions.split_at_mut(end);
            let bucket = &mut rest[0];

            for start in (lo..end).rev() {
                let word: String = self.chars[start..end].iter().collect();
                let word_len = (end - start) as u32;
                for candidate in &prefix[start] {
                    for &node in &candidate.frontier {
                        Self::try_advance(
                            &mut self.arena,
                            dict,
                            trie,
                            profile,
                            candidate,
                            &word,
                            word_len,
                            offset + start,
                            node,
                            false,
                            bucket,
                        );
                    }
                    // A completed morpheme may also restart a new word
                    // from the trie root.
                    if candidate.ending.is_some() {
                        for &node in trie.roots() {
                            Self::try_advance(
                                &mut self.arena,
                                dict,
                                trie,
                                profile,
                                candidate,
                                &word,
                                word_len,
                                offset + start,
                                node,
                                true,
                                bucket,
                            );
                        }
                    }
                }
            }

            bucket.sort_by(|a, b| {
                a.score
                    .total_cmp(&b.score)
                    .then_with(|| a.chunk.tie_breaker().cmp(&b.chunk.tie_breaker()))
            });
            bucket.truncate(TOP_N_PER_STATE);
        }

        match self.solutions[len].first() {
            Some(best) => self.arena.collect_into(best.last, out),
            None => out.push(KoreanToken::with_unknown(text, KoreanPos::Noun, offset, true)),
        }
    }

    /// 후보 하나를 트라이 노드 `node`를 거쳐 `word`만큼 전진시킵니다.
    ///
    /// 명사 노드는 사전에 없는 단어도 받아들이며, 그 경우 인명·수사
    /// 판정에 따라 품사와 미상 플래그가 정해집니다.
    #[allow(clippy::too_many_arguments)]
    fn try_advance(
        arena: &mut ParseArena,
        dict: &KoreanDictionary,
        trie: &PosTrie,
        profile: &TokenizerProfile,
        candidate: &CandidateParse,
        word: &str,
        word_len: u32,
        token_offset: usize,
        node: u32,
        new_word: bool,
        bucket: &mut Vec<CandidateParse>,
    ) {
        let node_pos = trie.pos(node);
        if node_pos != KoreanPos::Noun && !dict.contains(node_pos, word) {
            return;
        }

        let (pos, unknown) = if node_pos == KoreanPos::Noun && !dict.contains(KoreanPos::Noun, word)
        {
            let is_name = dict.is_name(word);
            let is_name_variation = dict.is_korean_name_variation(word);
            let is_number = dict.is_korean_number(word);
            let unknown = !(is_name || is_name_variation || is_number);
            let pos = if unknown || is_name || is_name_variation {
                KoreanPos::ProperNoun
            } else {
                KoreanPos::Noun
            };
            (pos, unknown)
        } else if node_pos == KoreanPos::Noun && dict.contains(KoreanPos::ProperNoun, word) {
            (KoreanPos::ProperNoun, false)
        } else {
            (node_pos, false)
        };

        let freq = if pos.is_noun() {
            dict.frequency(word)
        } else {
            0.0
        };
        let chunk = candidate
            .chunk
            .appended(pos, word_len, unknown, freq, new_word);

        let token = KoreanToken::with_unknown(word, pos, token_offset, unknown);
        let last = arena.push(candidate.last, token);

        let mut frontier = Vec::new();
        trie.expand_frontier(node, &mut frontier);

        bucket.push(CandidateParse {
            last,
            frontier,
            ending: trie.ending(node),
            chunk,
            score: chunk.score(profile),
        });
    }

    fn reset_buckets(buckets: &mut Vec<Vec<CandidateParse>>, new_len: usize) {
        for bucket in buckets.iter_mut() {
            bucket.clear();
        }
        let cur_len = buckets.len();
        if cur_len < new_len {
            buckets.reserve(new_len - cur_len);
            for _ in cur_len..new_len {
                buckets.push(Vec::with_capacity(TOP_N_PER_STATE * MAX_TRACE_BACK));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::DEFAULT_GRAMMAR;
    use crate::token::render;

    fn test_dictionary() -> KoreanDictionary {
        let dict = KoreanDictionary::new();
        dict.add_words(
            KoreanPos::Noun,
            ["아버지", "가방", "방", "하늘", "눈", "물"],
        );
        dict.add_words(KoreanPos::Josa, ["가", "에", "은", "도"]);
        dict.add_words(KoreanPos::Verb, ["들어가신다"]);
        dict
    }

    fn parse(dict: &KoreanDictionary, text: &str) -> Vec<KoreanToken> {
        let trie = PosTrie::from_grammar(DEFAULT_GRAMMAR).unwrap();
        let profile = TokenizerProfile::default();
        let mut parser = ChunkParser::default();
        let mut out = vec![];
        parser.parse_into(dict, &trie, &profile, text, 0, &mut out);
        out
    }

    #[test]
    fn test_fast_path_direct_match() {
        let dict = test_dictionary();
        let tokens = parse(&dict, "아버지");
        assert_eq!(render(&tokens), "아버지/Noun");
        let tokens = parse(&dict, "들어가신다");
        assert_eq!(render(&tokens), "들어가신다/Verb");
    }

    #[test]
    fn test_noun_josa_split() {
        let dict = test_dictionary();
        let tokens = parse(&dict, "아버지가");
        assert_eq!(render(&tokens), "아버지/Noun 가/Josa");
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 3);
    }

    #[test]
    fn test_greedy_noun_without_space() {
        let dict = test_dictionary();
        let tokens = parse(&dict, "아버지가방에들어가신다");
        assert_eq!(
            render(&tokens),
            "아버지/Noun 가방/Noun 에/Josa 들어가신다/Verb"
        );
    }

    #[test]
    fn test_unknown_chunk_becomes_proper_noun() {
        let dict = test_dictionary();
        let tokens = parse(&dict, "버카충");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].pos, KoreanPos::ProperNoun);
        assert!(tokens[0].unknown);
    }

    #[test]
    fn test_korean_number_stays_noun() {
        let dict = test_dictionary();
        let tokens = parse(&dict, "오천원");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].pos, KoreanPos::Noun);
        assert!(!tokens[0].unknown);
    }

    #[test]
    fn test_name_becomes_proper_noun() {
        let dict = test_dictionary();
        dict.add_family_names(["김"]);
        dict.add_given_names(["철수"]);
        let tokens = parse(&dict, "김철수가");
        assert_eq!(render(&tokens), "김철수/ProperNoun 가/Josa");
        assert!(!tokens[0].unknown);
    }

    #[test]
    fn test_proper_noun_dictionary_match() {
        let dict = test_dictionary();
        dict.add_words(KoreanPos::Noun, ["서울"]);
        dict.add_words(KoreanPos::ProperNoun, ["서울"]);
        let tokens = parse(&dict, "서울은");
        assert_eq!(render(&tokens), "서울/ProperNoun 은/Josa");
    }

    #[test]
    fn test_unparseable_without_noun_rule() {
        let dict = test_dictionary();
        let trie = PosTrie::from_grammar(&[("j1", KoreanPos::Josa)]).unwrap();
        let profile = TokenizerProfile::default();
        let mut parser = ChunkParser::default();
        let mut out = vec![];
        parser.parse_into(&dict, &trie, &profile, "하늘빛", 0, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].pos, KoreanPos::Noun);
        assert!(out[0].unknown);
        assert_eq!(out[0].text, "하늘빛");
    }

    #[test]
    fn test_beam_width_bound() {
        let dict = test_dictionary();
        let trie = PosTrie::from_grammar(DEFAULT_GRAMMAR).unwrap();
        let profile = TokenizerProfile::default();
        let mut parser = ChunkParser::default();
        let mut out = vec![];
        parser.parse_into(
            &dict,
            &trie,
            &profile,
            "아버지가방에들어가신다더라",
            0,
            &mut out,
        );
        for bucket in &parser.solutions {
            assert!(bucket.len() <= TOP_N_PER_STATE);
        }
    }

    #[test]
    fn test_offsets_partition_chunk() {
        let dict = test_dictionary();
        for text in ["아버지가방에들어가신다", "하늘은", "눈물", "버카충도"] {
            let tokens = parse(&dict, text);
            let mut cursor = 0;
            for t in &tokens {
                assert_eq!(t.offset, cursor);
                cursor += t.length;
            }
            assert_eq!(cursor, text.chars().count());
            let concat: String = tokens.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(concat, text);
        }
    }

    #[test]
    fn test_dictionary_word_up_to_trace_back_is_kept_whole() {
        let dict = test_dictionary();
        dict.add_words(KoreanPos::Noun, ["가나다라마바사아"]);
        let tokens = parse(&dict, "가나다라마바사아");
        assert_eq!(render(&tokens), "가나다라마바사아/Noun");
    }
}
