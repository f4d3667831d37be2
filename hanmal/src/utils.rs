//! 유틸리티 함수를 제공하는 모듈
//!
//! 빈도 사전 등 CSV 형식 자원 파일의 행 해석을 담당합니다.

use csv_core::ReadFieldResult;

/// CSV 형식의 행을 해석하여 필드 벡터로 분할합니다
///
/// 더블쿼트로 감싸진 필드나 필드 내부의 쉼표도 올바르게 처리합니다.
/// 고정 버퍼에 들어가지 않는 긴 필드는 여러 번에 나누어 누적합니다.
///
/// # 인자
///
/// * `row` - 해석할 CSV 형식의 문자열
///
/// # 반환값
///
/// 해석된 필드를 담은 문자열 벡터
///
/// # 예
///
/// ```
/// # use hanmal::utils::parse_csv_row;
/// let fields = parse_csv_row("사과,1530");
/// assert_eq!(fields, vec!["사과", "1530"]);
///
/// let fields_with_quote = parse_csv_row("\"1,2-디클로로에탄\",3");
/// assert_eq!(fields_with_quote, vec!["1,2-디클로로에탄", "3"]);
/// ```
pub fn parse_csv_row(row: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut reader = csv_core::Reader::new();
    let mut remaining = row.as_bytes();
    let mut buf = [0; 1024];
    // Accumulates one field across buffer refills.
    let mut field: Vec<u8> = vec![];

    loop {
        let (result, consumed, written) = reader.read_field(remaining, &mut buf);
        remaining = &remaining[consumed..];
        field.extend_from_slice(&buf[..written]);
        match result {
            ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { .. } => {
                fields.push(String::from_utf8_lossy(&field).into_owned());
                field.clear();
            }
            ReadFieldResult::InputEmpty | ReadFieldResult::End => {
                fields.push(String::from_utf8_lossy(&field).into_owned());
                return fields;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_row() {
        assert_eq!(&["사과", "1530"], parse_csv_row("사과,1530").as_slice());
    }

    #[test]
    fn test_parse_csv_row_with_quote() {
        assert_eq!(
            &["가,나", "7"],
            parse_csv_row("\"가,나\",7").as_slice()
        );
    }

    #[test]
    fn test_parse_csv_row_longer_than_buffer() {
        let long = "하".repeat(2048);
        let row = format!("{long},1");
        assert_eq!(&[long.as_str(), "1"], parse_csv_row(&row).as_slice());
    }
}
