use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::choices::ProgramLevel;

/// 最多返回的项目数量，需要更多时调用方应缩小搜索范围
pub const PROGRAM_SEARCH_LIMIT: u64 = 50;

// 项目搜索参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/program.ts")]
pub struct ProgramSearchParams {
    pub level: Option<String>,
    pub search: Option<String>,
}

// 项目搜索条件（用于存储层）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramSearchQuery {
    pub level: Option<ProgramLevel>,
    pub search: Option<String>,
    pub limit: u64,
}

impl From<ProgramSearchParams> for ProgramSearchQuery {
    fn from(params: ProgramSearchParams) -> Self {
        Self {
            // 未知的层次值直接忽略
            level: params.level.and_then(|level| level.parse().ok()),
            search: params
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            limit: PROGRAM_SEARCH_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_and_blank_search_are_dropped() {
        let query = ProgramSearchQuery::from(ProgramSearchParams {
            level: Some("DOCTORATE".into()),
            search: Some("   ".into()),
        });
        assert_eq!(query.level, None);
        assert_eq!(query.search, None);
        assert_eq!(query.limit, PROGRAM_SEARCH_LIMIT);
    }

    #[test]
    fn test_known_level_and_trimmed_search() {
        let query = ProgramSearchQuery::from(ProgramSearchParams {
            level: Some("POSTGRAD".into()),
            search: Some("  engineer ".into()),
        });
        assert_eq!(query.level, Some(ProgramLevel::Postgrad));
        assert_eq!(query.search.as_deref(), Some("engineer"));
    }
}
