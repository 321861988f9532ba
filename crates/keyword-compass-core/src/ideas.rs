//! Content-idea synthesis from keyword groups.
//!
//! Consumes any mapping of topic-or-cluster label to member scored
//! keywords. The pipeline feeds it clusters, but [`group_by_topic`]
//! offers a simpler pattern-match grouping for callers without vectors.
//! Titles, optimization tips, and outlines are deterministic string
//! templates; there is no randomness and no external call anywhere in
//! this module.

use std::collections::BTreeSet;

use crate::error::EngineError;
use crate::models::{ContentIdea, ContentType, ScoredKeyword};
use crate::normalize::{self, round2};
use crate::vectorize;

/// Minimum members before a group produces an idea.
pub const DEFAULT_MIN_GROUP_SIZE: usize = 3;

/// Primary/secondary keyword picks per idea.
const KEYWORDS_PER_TIER: usize = 3;

/// Fixed seo-score blend: mean opportunity / keyword diversity / intent
/// diversity. Deliberately distinct from the configurable scoring
/// weights; see DESIGN.md.
const SEO_BLEND: (f64, f64, f64) = (0.6, 0.2, 0.2);

/// Fixed traffic-score blend: normalized total volume / inverted mean
/// difficulty.
const TRAFFIC_BLEND: (f64, f64) = (0.7, 0.3);

/// Substring patterns mapping keyword text to a topic vertical. First
/// match wins; keywords matching nothing fall into [`GENERAL_TOPIC`].
const TOPIC_PATTERNS: &[(&str, &str)] = &[
    ("software", "software"),
    ("tool", "tools"),
    ("app", "apps"),
    ("marketing", "marketing"),
    ("seo", "seo"),
    ("ecommerce", "ecommerce"),
    ("shop", "ecommerce"),
    ("finance", "finance"),
    ("money", "finance"),
    ("invest", "finance"),
    ("health", "health"),
    ("fitness", "health"),
    ("recipe", "food"),
    ("food", "food"),
    ("coffee", "food"),
    ("travel", "travel"),
    ("course", "education"),
    ("learn", "education"),
    ("home", "home"),
    ("diy", "home"),
];

/// Fallback topic for keywords matching no pattern.
pub const GENERAL_TOPIC: &str = "general";

/// Group scored keywords by topic pattern, preserving first-match
/// insertion order. An alternative to cluster-based grouping.
pub fn group_by_topic(scored: &[ScoredKeyword]) -> Vec<(String, Vec<ScoredKeyword>)> {
    let mut groups: Vec<(String, Vec<ScoredKeyword>)> = Vec::new();
    for keyword in scored {
        let text = vectorize::preprocess(&keyword.record.keyword);
        let topic = TOPIC_PATTERNS
            .iter()
            .find(|(pattern, _)| text.contains(pattern))
            .map(|(_, topic)| *topic)
            .unwrap_or(GENERAL_TOPIC);
        match groups.iter_mut().find(|(name, _)| name == topic) {
            Some((_, members)) => members.push(keyword.clone()),
            None => groups.push((topic.to_string(), vec![keyword.clone()])),
        }
    }
    groups
}

/// Synthesize content ideas from topic groups.
///
/// Groups below `min_group_size` members produce nothing. Output is
/// sorted by combined score descending; ties keep group iteration order.
pub fn synthesize(
    groups: &[(String, Vec<ScoredKeyword>)],
    min_group_size: usize,
) -> Result<Vec<ContentIdea>, EngineError> {
    if min_group_size == 0 {
        return Err(EngineError::config("min_group_size must be positive"));
    }

    let mut ideas: Vec<ContentIdea> = groups
        .iter()
        .filter(|(_, members)| members.len() >= min_group_size)
        .map(|(topic, members)| build_idea(topic, members))
        .collect();
    // Stable sort: equal combined scores keep group iteration order.
    ideas.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(ideas)
}

fn build_idea(topic: &str, members: &[ScoredKeyword]) -> ContentIdea {
    let mut ranked: Vec<&ScoredKeyword> = members.iter().collect();
    ranked.sort_by(|a, b| {
        b.opportunity
            .partial_cmp(&a.opportunity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let primary_keywords: Vec<String> = ranked
        .iter()
        .take(KEYWORDS_PER_TIER)
        .map(|s| s.record.keyword.clone())
        .collect();
    let secondary_keywords: Vec<String> = ranked
        .iter()
        .skip(KEYWORDS_PER_TIER)
        .take(KEYWORDS_PER_TIER)
        .map(|s| s.record.keyword.clone())
        .collect();

    let count = members.len() as f64;
    let total_volume: u64 = members.iter().map(|s| s.record.volume).sum();
    let avg_difficulty = if members.is_empty() {
        0.0
    } else {
        round2(members.iter().map(|s| s.record.difficulty).sum::<f64>() / count)
    };
    let avg_cpc = if members.is_empty() {
        0.0
    } else {
        round2(members.iter().map(|s| s.record.cpc).sum::<f64>() / count)
    };
    let mean_opportunity = if members.is_empty() {
        0.0
    } else {
        members.iter().map(|s| s.opportunity).sum::<f64>() / count
    };

    let combined_text = members
        .iter()
        .map(|s| vectorize::preprocess(&s.record.keyword))
        .collect::<Vec<_>>()
        .join(" ");
    let content_type = detect_content_type(&combined_text);

    let distinct_keywords: BTreeSet<&str> =
        members.iter().map(|s| s.record.keyword.as_str()).collect();
    let distinct_intents: BTreeSet<String> = members
        .iter()
        .flat_map(|s| s.record.intents.iter())
        .map(|tag| tag.to_lowercase())
        .collect();
    let keyword_diversity = (distinct_keywords.len().min(10) * 10) as f64;
    let intent_diversity = (distinct_intents.len().min(4) * 25) as f64;

    let seo_score = round2(
        SEO_BLEND.0 * mean_opportunity
            + SEO_BLEND.1 * keyword_diversity
            + SEO_BLEND.2 * intent_diversity,
    );
    let traffic_score = round2(
        TRAFFIC_BLEND.0 * normalize::volume_score(total_volume as f64)
            + TRAFFIC_BLEND.1 * normalize::difficulty_score(avg_difficulty),
    );
    let combined_score = round2((seo_score + traffic_score) / 2.0);

    let primary = primary_keywords
        .first()
        .map(String::as_str)
        .unwrap_or(topic);

    ContentIdea {
        topic: topic.to_string(),
        title: idea_title(content_type, topic, primary),
        content_type,
        tips: optimization_tips(
            primary,
            &secondary_keywords,
            avg_difficulty,
            total_volume,
            distinct_intents.len(),
        ),
        outline: idea_outline(primary, &secondary_keywords, topic),
        primary_keywords,
        secondary_keywords,
        seo_score,
        traffic_score,
        combined_score,
        total_volume,
        avg_difficulty,
        avg_cpc,
    }
}

/// Detect the article format from a group's combined keyword text.
///
/// First match wins and the check order is significant: review signals
/// are checked before how-to, comparison, and list signals so that a
/// group mixing "best …" and "… review" keywords lands on `Review`.
pub fn detect_content_type(text: &str) -> ContentType {
    let padded = format!(" {} ", text);
    if ["review", "rating", "best", "top"]
        .iter()
        .any(|p| text.contains(p))
    {
        ContentType::Review
    } else if ["how to", "guide"].iter().any(|p| text.contains(p)) {
        ContentType::HowToGuide
    } else if padded.contains(" vs ") || text.contains("versus") || text.contains("compare") {
        ContentType::Comparison
    } else if ["list", "ideas", "ways"].iter().any(|p| text.contains(p)) {
        ContentType::ListArticle
    } else if ["tutorial", "learn", "course"].iter().any(|p| text.contains(p)) {
        ContentType::Tutorial
    } else if text.contains("case study") || text.contains("example") {
        ContentType::CaseStudy
    } else {
        ContentType::Informational
    }
}

fn idea_title(content_type: ContentType, topic: &str, primary: &str) -> String {
    let topic_title = title_case(topic);
    let primary_title = title_case(primary);
    match content_type {
        ContentType::Review => format!("{primary_title}: An Honest Review"),
        ContentType::HowToGuide => {
            format!("How to Get Started with {topic_title}: A Step-by-Step Guide")
        }
        ContentType::Comparison => format!("{primary_title} Compared: Which Is Right for You?"),
        ContentType::ListArticle => format!("The Best {topic_title} Picks, Ranked"),
        ContentType::Tutorial => format!("{topic_title} Tutorial: Learn {primary_title}"),
        ContentType::CaseStudy => format!("{topic_title} in Practice: Real-World Lessons"),
        ContentType::Informational => format!("Everything You Need to Know About {primary_title}"),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn optimization_tips(
    primary: &str,
    secondary: &[String],
    avg_difficulty: f64,
    total_volume: u64,
    intent_count: usize,
) -> Vec<String> {
    let mut tips = vec![format!(
        "Target \"{primary}\" as the primary keyword in the title and opening paragraph"
    )];
    if !secondary.is_empty() {
        tips.push(format!(
            "Work supporting keywords into H2 subheadings: {}",
            secondary.join(", ")
        ));
    }
    if avg_difficulty > 50.0 {
        tips.push(format!(
            "Average difficulty is {avg_difficulty:.0}; build internal links and backlinks before expecting rankings"
        ));
    } else {
        tips.push(format!(
            "Average difficulty is {avg_difficulty:.0}; a well-structured piece can rank without much link building"
        ));
    }
    if total_volume >= 5000 {
        tips.push(format!(
            "Combined search volume is {total_volume}; consider a pillar page with internal links to supporting posts"
        ));
    }
    if intent_count > 1 {
        tips.push(
            "Mixed search intent in this group; address both informational and commercial angles"
                .to_string(),
        );
    }
    tips
}

fn idea_outline(primary: &str, secondary: &[String], topic: &str) -> String {
    let supporting = if secondary.is_empty() {
        format!("related {topic} subtopics")
    } else {
        secondary.join("; ")
    };
    format!(
        "Introduction framing \"{primary}\"; one section per supporting angle ({supporting}); \
         FAQ block answering related queries; conclusion with a clear next step"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeywordRecord, OpportunityCategory};

    fn scored(keyword: &str, volume: u64, difficulty: f64, opportunity: f64, intents: &[&str]) -> ScoredKeyword {
        ScoredKeyword {
            record: KeywordRecord {
                keyword: keyword.to_string(),
                volume,
                difficulty,
                cpc: 1.0,
                intents: intents.iter().map(|s| s.to_string()).collect(),
            },
            volume_score: 50.0,
            difficulty_score: 100.0 - difficulty,
            cpc_score: 30.0,
            intent_score: 80.0,
            opportunity,
            category: OpportunityCategory::from_score(opportunity),
            primary_intent: intents.first().map(|s| s.to_string()),
        }
    }

    fn coffee_group() -> (String, Vec<ScoredKeyword>) {
        (
            "coffee grinder".to_string(),
            vec![
                scored("best coffee grinder", 4400, 35.0, 63.5, &["Commercial"]),
                scored("coffee grinder review", 900, 28.0, 58.34, &["Commercial"]),
                scored("how to clean coffee grinder", 300, 15.0, 56.61, &["Informational"]),
            ],
        )
    }

    #[test]
    fn test_small_groups_produce_no_idea() {
        let groups = vec![(
            "tiny".to_string(),
            vec![
                scored("alpha", 100, 20.0, 50.0, &[]),
                scored("beta", 100, 20.0, 50.0, &[]),
            ],
        )];
        let ideas = synthesize(&groups, 3).unwrap();
        assert!(ideas.is_empty());
    }

    #[test]
    fn test_zero_min_group_size_rejected() {
        assert!(synthesize(&[], 0).is_err());
    }

    #[test]
    fn test_review_detected_before_how_to() {
        let (_, members) = coffee_group();
        let groups = vec![("coffee grinder".to_string(), members)];
        let ideas = synthesize(&groups, 3).unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].content_type, ContentType::Review);
    }

    #[test]
    fn test_detection_order_is_significant() {
        assert_eq!(detect_content_type("best running shoes"), ContentType::Review);
        assert_eq!(detect_content_type("how to tie a tie"), ContentType::HowToGuide);
        assert_eq!(detect_content_type("iphone vs android"), ContentType::Comparison);
        assert_eq!(detect_content_type("gift ideas for dad"), ContentType::ListArticle);
        assert_eq!(detect_content_type("learn piano online"), ContentType::Tutorial);
        assert_eq!(
            detect_content_type("marketing case study saas"),
            ContentType::CaseStudy
        );
        assert_eq!(detect_content_type("what is a solstice"), ContentType::Informational);
        // "how to" loses to an earlier review signal in the same text.
        assert_eq!(
            detect_content_type("best grinder how to clean"),
            ContentType::Review
        );
    }

    #[test]
    fn test_primary_and_secondary_split_by_opportunity() {
        let members = vec![
            scored("k1", 100, 20.0, 90.0, &[]),
            scored("k2", 100, 20.0, 80.0, &[]),
            scored("k3", 100, 20.0, 70.0, &[]),
            scored("k4", 100, 20.0, 60.0, &[]),
            scored("k5", 100, 20.0, 50.0, &[]),
        ];
        let groups = vec![("general".to_string(), members)];
        let ideas = synthesize(&groups, 3).unwrap();
        assert_eq!(ideas[0].primary_keywords, vec!["k1", "k2", "k3"]);
        assert_eq!(ideas[0].secondary_keywords, vec!["k4", "k5"]);
    }

    #[test]
    fn test_aggregates_sum_and_mean() {
        let (_, members) = coffee_group();
        let groups = vec![("coffee".to_string(), members)];
        let ideas = synthesize(&groups, 3).unwrap();
        let idea = &ideas[0];
        assert_eq!(idea.total_volume, 5600);
        assert_eq!(idea.avg_difficulty, 26.0);
        assert!((0.0..=100.0).contains(&idea.seo_score));
        assert!((0.0..=100.0).contains(&idea.traffic_score));
        assert_eq!(
            idea.combined_score,
            ((idea.seo_score + idea.traffic_score) / 2.0 * 100.0).round() / 100.0
        );
    }

    #[test]
    fn test_ideas_sorted_by_combined_score() {
        let strong = (
            "strong".to_string(),
            vec![
                scored("strong one", 9000, 10.0, 90.0, &["Commercial"]),
                scored("strong two", 8000, 12.0, 88.0, &["Informational"]),
                scored("strong three", 7000, 15.0, 85.0, &["Commercial"]),
            ],
        );
        let weak = (
            "weak".to_string(),
            vec![
                scored("weak one", 50, 80.0, 20.0, &[]),
                scored("weak two", 40, 85.0, 18.0, &[]),
                scored("weak three", 30, 90.0, 15.0, &[]),
            ],
        );
        let ideas = synthesize(&[weak, strong], 3).unwrap();
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].topic, "strong");
        assert!(ideas[0].combined_score >= ideas[1].combined_score);
    }

    #[test]
    fn test_group_by_topic_patterns_and_fallback() {
        let scored_batch = vec![
            scored("email marketing software", 100, 20.0, 50.0, &[]),
            scored("content marketing plan", 100, 20.0, 50.0, &[]),
            scored("weather in oslo", 100, 20.0, 50.0, &[]),
        ];
        let groups = group_by_topic(&scored_batch);
        let names: Vec<&str> = groups.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"software"));
        assert!(names.contains(&"marketing"));
        assert!(names.contains(&GENERAL_TOPIC));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let (_, members) = coffee_group();
        let groups = vec![("coffee".to_string(), members)];
        let first = synthesize(&groups, 3).unwrap();
        let second = synthesize(&groups, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_title_and_tips_are_templated() {
        let (_, members) = coffee_group();
        let groups = vec![("coffee grinder".to_string(), members)];
        let ideas = synthesize(&groups, 3).unwrap();
        let idea = &ideas[0];
        assert!(idea.title.contains("Review"));
        assert!(!idea.tips.is_empty());
        assert!(idea.tips[0].contains("best coffee grinder"));
        assert!(idea.outline.contains("Introduction"));
    }
}
