use crate::extractor::extract;
use crate::results::{Image, PageSignals};
use crate::scoring::{
    BasicScore, ContentScore, Issue, ScoringWeights, SubScore, combine, score, score_with,
};

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "https://example.com/page";

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
    }

    fn well_formed_page() -> String {
        format!(
            r#"<html><head>
                <title>{}</title>
                <meta name="description" content="{}">
            </head><body>
                <main>
                    <h1>Welcome</h1>
                    <p>{}</p>
                    <img src="/a.png" alt="First image">
                    <img src="/b.png" alt="Second image">
                    <a href="/one">one</a>
                    <a href="/two">two</a>
                    <a href="https://example.com/three">three</a>
                    <a href="four">four</a>
                </main>
            </body></html>"#,
            "T".repeat(45),
            "M".repeat(140),
            words(600)
        )
    }

    #[test]
    fn test_minimal_page_scenario() {
        let html = format!(
            r#"<html><body><p>{}</p><img src="/photo.jpg"></body></html>"#,
            words(50)
        );
        let report = score(&extract(&html, SOURCE));

        let basic: Vec<String> = report.basic.value().issues.iter().map(|i| i.to_string()).collect();
        assert!(basic.contains(&"missing title".to_string()));
        assert!(basic.contains(&"missing meta description".to_string()));
        assert!(basic.contains(&"missing H1".to_string()));
        assert!(basic.contains(&"1 images missing alt text".to_string()));
        assert_eq!(report.basic.value().score, 40);

        assert!(
            report
                .technical
                .value()
                .issues
                .contains(&Issue::ContentTooShort { min: 300 })
        );
        assert_eq!(report.technical.value().score, 60);
    }

    #[test]
    fn test_well_formed_page_scenario() {
        let signals = extract(&well_formed_page(), SOURCE);
        assert_eq!(signals.title.chars().count(), 45);
        assert_eq!(signals.meta_description.chars().count(), 140);
        assert_eq!(signals.internal_links(), 4);
        assert!(signals.word_count >= 600);

        let report = score(&signals);
        assert_eq!(report.basic.value().score, 100);
        assert!(report.basic.value().issues.is_empty());
        assert_eq!(report.technical.value().score, 100);
        assert_eq!(report.technical.value().internal_link_count, 4);
        assert!(!report.content.is_degraded());
    }

    #[test]
    fn test_missing_alt_never_raises_basic_score() {
        let mut signals = extract(&well_formed_page(), SOURCE);
        let mut previous = score(&signals).basic.value().score;
        for i in 0..10 {
            signals
                .images
                .push(Image::new(format!("https://example.com/{}.png", i), String::new()));
            let current = score(&signals).basic.value().score;
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let pages = [
            String::new(),
            "plain text".to_string(),
            well_formed_page(),
            format!("<h1>a</h1><h1>b</h1><p>{}</p>", words(2000)),
            format!(
                "<title>{}</title><meta name=\"description\" content=\"{}\"><p>{}.</p>",
                "x".repeat(300),
                "y".repeat(500),
                words(80)
            ),
        ];
        let harsh = ScoringWeights {
            basic_issue_penalty: 1000,
            technical_issue_penalty: 1000,
            ..ScoringWeights::default()
        };
        for html in &pages {
            let signals = extract(html, SOURCE);
            for report in [score(&signals), score_with(&signals, &harsh)] {
                assert!(report.basic.value().score <= 100);
                assert!(report.technical.value().score <= 100);
                assert!(report.content.value().score <= 100);
                assert!(report.overall <= 100);
            }
        }
    }

    #[test]
    fn test_combine_weights() {
        let weights = ScoringWeights::default();
        let basic = SubScore::Ok(BasicScore {
            score: 100,
            ..BasicScore::default()
        });
        let content = SubScore::Ok(ContentScore {
            readability: 10,
            quality: 10,
            ..ContentScore::default()
        });
        assert_eq!(combine(&basic, &content, &weights), 100);

        let content = SubScore::Ok(ContentScore {
            readability: 5,
            quality: 9,
            ..ContentScore::default()
        });
        // (40 + 18 + 10) / 80
        assert_eq!(combine(&basic, &content, &weights), 85);
    }

    #[test]
    fn test_degraded_content_contributes_zero() {
        let weights = ScoringWeights::default();
        let basic = SubScore::Ok(BasicScore {
            score: 100,
            ..BasicScore::default()
        });
        let content = SubScore::Degraded {
            value: ContentScore {
                readability: 10,
                quality: 10,
                ..ContentScore::default()
            },
            reason: "mean sentence length is not a finite number".to_string(),
        };
        // Denominator keeps the content weights
        assert_eq!(combine(&basic, &content, &weights), 50);
    }

    #[test]
    fn test_zero_weights_yield_zero() {
        let weights = ScoringWeights {
            basic_weight: 0.0,
            quality_weight: 0.0,
            readability_weight: 0.0,
            ..ScoringWeights::default()
        };
        let signals = extract(&well_formed_page(), SOURCE);
        assert_eq!(score_with(&signals, &weights).overall, 0);
    }

    #[test]
    fn test_report_serialization_tags_status() {
        let signals: PageSignals = extract(&well_formed_page(), SOURCE);
        let json = serde_json::to_value(score(&signals)).unwrap();
        assert_eq!(json["basic"]["status"], "ok");
        assert_eq!(json["basic"]["score"], 100);
        assert!(json["basic"]["titleStatus"]["optimal"].as_bool().unwrap());
        assert_eq!(json["technical"]["internalLinkCount"], 4);
        assert!(json["content"]["keywords"].is_array());
        assert!(json["basic"].get("reason").is_none());

        let degraded = SubScore::Degraded {
            value: ContentScore::default(),
            reason: "boom".to_string(),
        };
        let json = serde_json::to_value(&degraded).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["reason"], "boom");
        assert_eq!(json["score"], 0);
    }
}
