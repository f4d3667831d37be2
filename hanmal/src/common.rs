//! 공통 상수 정의
//!
//! 청크 파서 전반에서 공유되는 상수를 정의합니다.

/// 하나의 형태소가 가질 수 있는 최대 문자 길이.
///
/// 동적 계획법 파서는 각 끝 위치에서 이 길이만큼만 거슬러 올라가며
/// 후보 형태소를 탐색합니다.
pub const MAX_TRACE_BACK: usize = 8;

/// 각 끝 위치마다 유지하는 후보 해석의 최대 개수(빔 폭).
pub const TOP_N_PER_STATE: usize = 5;
