use crate::types::{Article, ArticleCollection, Comments, SimilarArticle};

fn similar(entries: &[(&str, u64)]) -> Vec<SimilarArticle> {
    entries
        .iter()
        .map(|(source, count)| SimilarArticle {
            source: source.to_string(),
            count: *count,
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed collection served until the collector has written any data.
pub fn sample_articles() -> ArticleCollection {
    ArticleCollection {
        articles: vec![
            Article {
                id: "20250813-001".to_string(),
                title: "유영상 SKT 대표 '고객 최우선·AI·보안 강화로 신뢰받는 통신사 구축'".to_string(),
                source: "디지털데일리".to_string(),
                date: "2025-08-13 11:25".to_string(),
                summary: "SKT 유영상 대표가 고객 최우선 정책과 AI 기술 강화, 보안 체계 구축을 통해 신뢰받는 통신사로 거듭나겠다고 밝혔습니다. 특히 생성형 AI 서비스 확대와 개인정보 보호 강화에 집중할 예정입니다.".to_string(),
                original_url: "https://news.google.com/rss/articles/CBMiZEFVX3lxTE9fSjJHNVBEWkVteU9SUVNBeS1oM09hYjZYODRod3RMUkt4QUdpeGVUY3ROajJmMUQ2ZGV3SE90Q0UxOXRaT3RGYUJoRjFFOGhtTHE4U3ZIYnVxVEROUTNMWUtDcG8?oc=5".to_string(),
                similar_articles: similar(&[
                    ("위키리크스한국", 1),
                    ("글로벌이코노믹", 1),
                    ("네이트", 3),
                    ("Chosun Biz", 1),
                ]),
                comments: Comments {
                    total: 247,
                    positive: 45,
                    negative: 35,
                    neutral: 167,
                    top_reactions: strings(&[
                        "AI 발전은 좋지만 보안이 더 중요",
                        "SKT 주가 상승 기대",
                        "구체적인 계획이 궁금",
                    ]),
                },
                ai_insight: "이번 발표는 SKT가 최근 보안 이슈 이후 신뢰 회복을 위한 종합적인 전략을 제시한 것으로 보입니다. AI 기술 강화와 보안 체계 구축을 동시에 추진하는 것은 통신사의 디지털 전환 트렌드에 부합하는 전략입니다.".to_string(),
                keywords: Some(strings(&["SKT", "AI", "보안", "통신사", "디지털전환"])),
                keyword_counts: Some(vec![15, 12, 8, 6, 4]),
            },
            Article {
                id: "20250813-002".to_string(),
                title: "'비상경영 끝'…SKT, AI 전략 전방위 드라이브".to_string(),
                source: "위키리크스한국".to_string(),
                date: "2025-08-13 08:59".to_string(),
                summary: "SKT가 비상경영 체제를 종료하고 AI 전략을 본격적으로 추진한다고 발표했습니다. 전사적 AI 도입과 새로운 수익 모델 창출에 집중할 계획입니다.".to_string(),
                original_url: "https://news.google.com/rss/articles/CBMib0FVX3lxTE5TYVFMSmR3TVE2YUNXaXRyMTFKZjAxSnN5WWdQVHQ2eXhmSEpDaEdCU3QyM25sOC1zZWlxRXFBaUJUSHpVdC1LN1lWOVZQVE55UmhOa3paYTE0TmpzbEd4d2xpb254SWdpamNhVGxNMA?oc=5".to_string(),
                similar_articles: similar(&[("테크노아", 1), ("민주신문", 1)]),
                comments: Comments {
                    total: 156,
                    positive: 89,
                    negative: 23,
                    neutral: 44,
                    top_reactions: strings(&[
                        "드디어 정상화되는구나",
                        "AI 투자 확대 좋은 신호",
                        "실적 개선 기대",
                    ]),
                },
                ai_insight: "비상경영 종료는 SKT의 재정 안정화가 완료되었음을 시사합니다. AI 전략 집중은 향후 성장 동력 확보를 위한 필수적 선택으로 평가됩니다.".to_string(),
                keywords: Some(strings(&["SKT", "비상경영", "AI전략", "수익모델"])),
                keyword_counts: Some(vec![18, 10, 9, 5]),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_stable() {
        assert_eq!(sample_articles(), sample_articles());
    }

    #[test]
    fn test_sample_contents() {
        let sample = sample_articles();
        assert_eq!(sample.articles.len(), 2);

        let first = &sample.articles[0];
        assert!(first.title.starts_with("유영상 SKT 대표"));
        assert_eq!(first.comments.positive, 45);
        assert_eq!(first.comments.negative, 35);
        assert_eq!(first.comments.neutral, 167);
        assert_eq!(first.comments.total, 247);
        assert_eq!(first.similar_total(), 6);

        let second = &sample.articles[1];
        assert!(second.title.starts_with("'비상경영 끝'"));
        assert_eq!(second.comments.total, 156);
    }
}
