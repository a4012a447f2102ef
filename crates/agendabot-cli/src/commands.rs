//! Diagnostic subcommands: `classify`, `validate` and `status`.

use anyhow::Result;
use serde_json::json;

use agendabot_dialogue::{normalize, validate_date, validate_time, validate_weekday_list};
use agendabot_intent::MatchVia;

use crate::cli::FieldKind;
use crate::config::AppConfig;
use crate::helpers::build_classifier;

/// Classify one utterance and print how it was recognized.
pub fn cmd_classify(config: &AppConfig, text: &str) -> Result<()> {
    let classifier = build_classifier(config);
    let utterance = normalize(text);
    let result = classifier.classify_detailed(&utterance);

    let via = match &result.via {
        MatchVia::Primary(keyword) => json!({"kind": "primary", "keyword": keyword}),
        MatchVia::Lexical(m) => json!({
            "kind": "lexical",
            "token": m.token,
            "synonym": m.synonym,
            "keyword": m.keyword,
            "score": m.score,
        }),
        MatchVia::Nothing => json!({"kind": "none"}),
    };
    let report = json!({
        "utterance": utterance,
        "intent": result.intent,
        "via": via,
        "reply": result.intent.reply(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Run one field validator and print the verdict.
pub fn cmd_validate(kind: FieldKind, value: &str) -> Result<()> {
    let valid = match kind {
        FieldKind::Date => validate_date(value),
        FieldKind::Time => validate_time(value),
        FieldKind::Weekdays => validate_weekday_list(value),
    };
    println!("{}", if valid { "valid" } else { "invalid" });
    Ok(())
}

/// Print the effective configuration.
pub fn cmd_status(config: &AppConfig) -> Result<()> {
    println!();
    println!("  AgendaBot Status");
    println!("  ================");
    println!();
    println!("  Service URL:      {}", config.service.url);
    match config.service.timeout_secs {
        Some(secs) => println!("  Service timeout:  {secs}s"),
        None => println!("  Service timeout:  none"),
    }
    println!(
        "  Matcher:          threshold {:.2}, language {}",
        config.matcher.threshold, config.matcher.language
    );
    if config.lexicon.path.exists() {
        println!("  Lexicon:          OK ({})", config.lexicon.path.display());
    } else {
        println!(
            "  Lexicon:          MISSING ({}), matching without synonyms",
            config.lexicon.path.display()
        );
    }
    println!("  Log level:        {}", config.logging.level);
    println!();
    Ok(())
}
