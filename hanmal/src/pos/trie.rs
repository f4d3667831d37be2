//! 품사 트라이 모듈
//!
//! 품사 열 문법을 품사 문자 위의 접두사 트라이로 컴파일합니다. 노드는
//! 아레나 인덱스로 표현하며, 수량자 `*`/`+`가 만드는 자기 순환은 간선
//! 목록에 예약된 [`SELF_NODE`] 표지로 기록해 두었다가 순회 시점에
//! "현재 노드에 머무름"으로 풀어냅니다. 트라이는 초기화 시 한 번
//! 구축된 뒤 불변이며, 모든 해석이 참조로 공유합니다.

use crate::errors::{HanmalError, Result};
use crate::pos::{parse_spec, KoreanPos, Quantifier};

/// 자기 순환을 나타내는 간선 표지.
///
/// 후보 해석의 전개 경계(frontier)에는 이 값이 직접 나타나지 않습니다.
/// [`PosTrie::expand_frontier`]가 기원 노드의 인덱스로 치환합니다.
pub(crate) const SELF_NODE: u32 = u32::MAX;

/// 트라이 노드
#[derive(Debug)]
struct TrieNode {
    /// 이 노드의 품사
    pos: KoreanPos,
    /// 후속 노드 인덱스 집합. [`SELF_NODE`]는 자기 순환을 뜻합니다.
    edges: Vec<u32>,
    /// 이 노드에서 해석이 완결될 수 있으면 그 말미 품사
    ending: Option<KoreanPos>,
}

/// 품사 열 문법을 컴파일한 트라이
///
/// # 예
///
/// ```
/// use hanmal::pos::{trie::PosTrie, DEFAULT_GRAMMAR};
///
/// let trie = PosTrie::from_grammar(DEFAULT_GRAMMAR).unwrap();
/// assert!(!trie.roots().is_empty());
/// ```
pub struct PosTrie {
    nodes: Vec<TrieNode>,
    roots: Vec<u32>,
}

impl PosTrie {
    /// 문법 테이블로부터 트라이를 구축합니다.
    ///
    /// 명세들은 같은 계층에서 품사와 반복 여부가 일치하는 노드를
    /// 공유합니다. 공유 노드의 `ending`은 먼저 기록된 값을 유지합니다.
    ///
    /// # 인자
    ///
    /// * `grammar` - 명세 문자열과 말미 품사의 쌍들
    ///
    /// # 오류
    ///
    /// 명세 해석에 실패하면 해당 명세를 지목하는
    /// [`HanmalError`](crate::errors::HanmalError)를 반환합니다.
    pub fn from_grammar(grammar: &[(&str, KoreanPos)]) -> Result<Self> {
        if grammar.is_empty() {
            return Err(HanmalError::invalid_argument(
                "grammar",
                "grammar must contain at least one sequence spec",
            ));
        }
        let mut trie = Self {
            nodes: vec![],
            roots: vec![],
        };
        for &(spec, ending) in grammar {
            let pairs = parse_spec(spec)?;
            let mut roots = std::mem::take(&mut trie.roots);
            trie.insert_level(&mut roots, &pairs, ending);
            trie.roots = roots;
        }
        Ok(trie)
    }

    /// 최상위 노드 인덱스 목록을 반환합니다.
    #[inline(always)]
    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// 노드의 품사를 반환합니다.
    #[inline(always)]
    pub(crate) fn pos(&self, node_id: u32) -> KoreanPos {
        self.nodes[node_id as usize].pos
    }

    /// 노드의 말미 품사를 반환합니다.
    #[inline(always)]
    pub(crate) fn ending(&self, node_id: u32) -> Option<KoreanPos> {
        self.nodes[node_id as usize].ending
    }

    /// 노드 수를 반환합니다.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// 노드의 후속 경계를 `out`에 덧붙입니다.
    ///
    /// [`SELF_NODE`] 표지는 기원 노드 자신의 인덱스로 치환되므로,
    /// 결과에는 표지가 남지 않습니다.
    pub(crate) fn expand_frontier(&self, node_id: u32, out: &mut Vec<u32>) {
        for &edge in &self.nodes[node_id as usize].edges {
            out.push(if edge == SELF_NODE { node_id } else { edge });
        }
    }

    fn insert_level(
        &mut self,
        level: &mut Vec<u32>,
        pairs: &[(KoreanPos, Quantifier)],
        ending: KoreanPos,
    ) {
        let Some(&(pos, quantifier)) = pairs.first() else {
            return;
        };
        let rest = &pairs[1..];

        let existing = level.iter().copied().find(|&id| {
            id != SELF_NODE
                && self.nodes[id as usize].pos == pos
                && self.nodes[id as usize].edges.contains(&SELF_NODE) == quantifier.repeatable()
        });
        let node_id = existing.unwrap_or_else(|| {
            let id = u32::try_from(self.nodes.len()).expect("trie node count exceeds u32");
            let edges = if quantifier.repeatable() {
                vec![SELF_NODE]
            } else {
                vec![]
            };
            self.nodes.push(TrieNode {
                pos,
                edges,
                ending: None,
            });
            level.push(id);
            id
        });

        // A node may end the parse when everything after it is optional.
        if rest.iter().all(|&(_, q)| q.optional()) {
            let node = &mut self.nodes[node_id as usize];
            if node.ending.is_none() {
                node.ending = Some(ending);
            }
        }

        let mut edges = std::mem::take(&mut self.nodes[node_id as usize].edges);
        self.insert_level(&mut edges, rest, ending);
        self.nodes[node_id as usize].edges = edges;

        // An optional pair also admits parses that skip it entirely.
        if quantifier.optional() {
            self.insert_level(level, rest, ending);
        }
    }
}

impl std::fmt::Debug for PosTrie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PosTrie {{ roots: {:?}, nodes: [", &self.roots)?;
        for (i, n) in self.nodes.iter().enumerate() {
            writeln!(f, "{i} => {n:?}")?;
        }
        writeln!(f, "]}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::DEFAULT_GRAMMAR;

    fn default_trie() -> PosTrie {
        PosTrie::from_grammar(DEFAULT_GRAMMAR).unwrap()
    }

    fn root_of(trie: &PosTrie, pos: KoreanPos) -> u32 {
        trie.roots()
            .iter()
            .copied()
            .find(|&id| trie.pos(id) == pos)
            .unwrap()
    }

    #[test]
    fn test_root_level_contains_skipped_prefixes() {
        let trie = default_trie();
        let root_pos: Vec<KoreanPos> = trie.roots().iter().map(|&id| trie.pos(id)).collect();
        // D0 and p* are optional, so N appears at the root level too.
        for pos in [
            KoreanPos::Determiner,
            KoreanPos::NounPrefix,
            KoreanPos::Noun,
            KoreanPos::VerbPrefix,
            KoreanPos::Verb,
            KoreanPos::Adjective,
            KoreanPos::Adverb,
            KoreanPos::Conjunction,
            KoreanPos::Exclamation,
            KoreanPos::Josa,
        ] {
            assert!(root_pos.contains(&pos), "missing root {pos:?}");
        }
    }

    #[test]
    fn test_endings() {
        let trie = default_trie();
        assert_eq!(
            trie.ending(root_of(&trie, KoreanPos::Noun)),
            Some(KoreanPos::Noun)
        );
        assert_eq!(
            trie.ending(root_of(&trie, KoreanPos::Verb)),
            Some(KoreanPos::Verb)
        );
        assert_eq!(
            trie.ending(root_of(&trie, KoreanPos::Josa)),
            Some(KoreanPos::Josa)
        );
        // A required pair with mandatory continuation cannot end the parse.
        assert_eq!(trie.ending(root_of(&trie, KoreanPos::Determiner)), None);
        assert_eq!(trie.ending(root_of(&trie, KoreanPos::NounPrefix)), None);
    }

    #[test]
    fn test_noun_successors() {
        let trie = default_trie();
        let mut frontier = vec![];
        trie.expand_frontier(root_of(&trie, KoreanPos::Noun), &mut frontier);
        let pos: Vec<KoreanPos> = frontier.iter().map(|&id| trie.pos(id)).collect();
        // s0 is skippable, so both Suffix and Josa follow the noun directly.
        assert!(pos.contains(&KoreanPos::Suffix));
        assert!(pos.contains(&KoreanPos::Josa));
    }

    #[test]
    fn test_self_loop_resolution() {
        let trie = default_trie();
        let exclamation = root_of(&trie, KoreanPos::Exclamation);
        let mut frontier = vec![];
        trie.expand_frontier(exclamation, &mut frontier);
        // E+ loops back to itself, resolved into a real index.
        assert!(frontier.contains(&exclamation));
        assert!(!frontier.contains(&SELF_NODE));
    }

    #[test]
    fn test_verb_prefix_shared_between_verb_and_adjective() {
        let trie = default_trie();
        let prefix = root_of(&trie, KoreanPos::VerbPrefix);
        let mut frontier = vec![];
        trie.expand_frontier(prefix, &mut frontier);
        let pos: Vec<KoreanPos> = frontier.iter().map(|&id| trie.pos(id)).collect();
        assert!(pos.contains(&KoreanPos::Verb));
        assert!(pos.contains(&KoreanPos::Adjective));
        assert!(frontier.contains(&prefix));
    }

    #[test]
    fn test_verb_and_adjective_endings_stay_separate() {
        let trie = default_trie();
        let verb = root_of(&trie, KoreanPos::Verb);
        let adjective = root_of(&trie, KoreanPos::Adjective);

        let mut verb_frontier = vec![];
        trie.expand_frontier(verb, &mut verb_frontier);
        let verb_eomi = verb_frontier
            .iter()
            .copied()
            .find(|&id| trie.pos(id) == KoreanPos::Eomi)
            .unwrap();
        assert_eq!(trie.ending(verb_eomi), Some(KoreanPos::Verb));

        let mut adj_frontier = vec![];
        trie.expand_frontier(adjective, &mut adj_frontier);
        let adj_eomi = adj_frontier
            .iter()
            .copied()
            .find(|&id| trie.pos(id) == KoreanPos::Eomi)
            .unwrap();
        assert_eq!(trie.ending(adj_eomi), Some(KoreanPos::Adjective));
    }

    #[test]
    fn test_invalid_grammar_reports_spec() {
        let err = PosTrie::from_grammar(&[("N1x", KoreanPos::Noun)]).unwrap_err();
        assert!(err.to_string().contains("N1x"));
        assert!(PosTrie::from_grammar(&[("Z1", KoreanPos::Noun)]).is_err());
        assert!(PosTrie::from_grammar(&[]).is_err());
    }
}
