pub mod response;

pub use response::ApiResponse;

/// 解析逗号分隔的 ID 列表，忽略无法解析的项
pub fn parse_id_list(raw: Option<&str>) -> Vec<i64> {
    raw.map(|s| {
        s.split(',')
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list(Some("1, 2,x,3")), vec![1, 2, 3]);
        assert!(parse_id_list(Some("")).is_empty());
        assert!(parse_id_list(None).is_empty());
    }
}
