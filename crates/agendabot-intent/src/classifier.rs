//! Intent classifier -- maps an utterance to one of a fixed set of intents.
//!
//! Each intent owns a primary keyword (checked as a plain substring) and a
//! small keyword set handed to the [`LexicalMatcher`] as a fallback.  Rules
//! are evaluated in a fixed priority order and the first hit wins.

use serde::Serialize;
use tracing::debug;

use crate::matcher::{KeywordSet, LexicalMatcher, MatchOutcome};
use crate::synonyms::SynonymSource;

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// A discrete user goal the classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Questions about which reports exist.
    ReportInfo,
    /// The user wants to schedule a report.
    Scheduling,
    /// Questions about the available frequencies.
    FrequencyInfo,
    /// Questions about being notified when a report is ready.
    Notification,
    /// The user wants to cancel a schedule.
    Cancellation,
    /// The user asks for help.
    Help,
    /// Nothing matched.
    Unknown,
}

impl Intent {
    /// Classification order.  Earlier intents shadow later ones.
    pub const PRIORITY: [Intent; 6] = [
        Intent::ReportInfo,
        Intent::Scheduling,
        Intent::FrequencyInfo,
        Intent::Notification,
        Intent::Cancellation,
        Intent::Help,
    ];

    /// The bot's reply when this intent is recognized outside a collection.
    pub fn reply(self) -> &'static str {
        match self {
            Self::ReportInfo => {
                "Você pode agendar relatórios em CSV. Para isso, informe o período desejado, \
                 a data para o primeiro relatório e a frequência de geração."
            }
            Self::Scheduling => {
                "Para agendar um relatório, forneça a data inicial, data final, data do \
                 primeiro relatório e a frequência desejada (diária, semanal ou mensal)."
            }
            Self::FrequencyInfo => {
                "Você pode escolher entre diferentes frequências: diária, semanal ou mensal. \
                 Qual você prefere?"
            }
            Self::Notification => {
                "Você pode receber uma notificação quando o relatório estiver pronto. \
                 Deseja habilitar isso (sim/não)?"
            }
            Self::Cancellation => {
                "Para cancelar um agendamento, informe o ID do agendamento que você deseja remover."
            }
            Self::Help => {
                "Estou aqui para ajudar com o agendamento de relatórios. Se precisar de mais \
                 informações ou assistência, pergunte."
            }
            Self::Unknown => {
                "Desculpe, não entendi sua solicitação. Tente perguntar sobre agendamento de \
                 relatórios, datas ou frequência."
            }
        }
    }

    /// The substring that recognizes this intent without fuzzy matching.
    pub fn primary_keyword(self) -> Option<&'static str> {
        match self {
            Self::ReportInfo => Some("relatório"),
            Self::Scheduling => Some("agendar"),
            Self::FrequencyInfo => Some("frequência"),
            Self::Notification => Some("mensagem"),
            Self::Cancellation => Some("cancelar"),
            Self::Help => Some("ajuda"),
            Self::Unknown => None,
        }
    }

    /// The keyword set handed to the lexical matcher.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::ReportInfo => &["relatório", "csv", "documento"],
            Self::Scheduling => &["agendar", "marcar", "programar"],
            Self::FrequencyInfo => &["frequência", "periodicidade"],
            Self::Notification => &["mensagem", "notificação"],
            Self::Cancellation => &["cancelar", "remover"],
            Self::Help => &["ajuda", "suporte", "assistência"],
            Self::Unknown => &[],
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReportInfo => write!(f, "report_info"),
            Self::Scheduling => write!(f, "scheduling"),
            Self::FrequencyInfo => write!(f, "frequency_info"),
            Self::Notification => write!(f, "notification"),
            Self::Cancellation => write!(f, "cancellation"),
            Self::Help => write!(f, "help"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// The sub-question asked once a frequency is known.
///
/// Keyed by the literal frequency label; anything else yields the
/// "not recognized" re-prompt.
pub fn frequency_detail_prompt(frequency: &str) -> &'static str {
    match frequency {
        "diária" => "Você deseja gerar o relatório a cada uma ou a cada duas horas?",
        "semanal" => "Quais dias da semana você deseja gerar o relatório e a cada quantas horas?",
        "mensal" => {
            "Quais meses e dias dos meses você deseja gerar o relatório e a cada quantas horas?"
        }
        _ => "Frequência não reconhecida. Escolha entre diária, semanal ou mensal.",
    }
}

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

/// How an intent was recognized.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchVia {
    /// The primary keyword occurs verbatim in the utterance.
    Primary(&'static str),
    /// The lexical matcher found a near-match.
    Lexical(MatchOutcome),
    /// Nothing matched.
    Nothing,
}

/// A classified utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    pub via: MatchVia,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

struct IntentRule {
    intent: Intent,
    primary: &'static str,
    keywords: KeywordSet,
}

/// Priority-ordered intent classifier.
pub struct IntentClassifier<S> {
    matcher: LexicalMatcher<S>,
    rules: Vec<IntentRule>,
}

impl<S: SynonymSource> IntentClassifier<S> {
    /// Build the classifier with the standard intent catalogue.
    pub fn new(matcher: LexicalMatcher<S>) -> Self {
        let rules = Intent::PRIORITY
            .iter()
            .filter_map(|&intent| {
                intent.primary_keyword().map(|primary| IntentRule {
                    intent,
                    primary,
                    keywords: KeywordSet::new(intent.keywords()),
                })
            })
            .collect();
        Self { matcher, rules }
    }

    pub fn matcher(&self) -> &LexicalMatcher<S> {
        &self.matcher
    }

    /// Classify a normalized utterance.
    pub fn classify(&self, utterance: &str) -> Intent {
        self.classify_detailed(utterance).intent
    }

    /// Classify and report which check recognized the intent.
    pub fn classify_detailed(&self, utterance: &str) -> Classification {
        for rule in &self.rules {
            if let Some(via) = self.check(rule, utterance) {
                debug!(intent = %rule.intent, ?via, "intent recognized");
                return Classification {
                    intent: rule.intent,
                    via,
                };
            }
        }
        debug!("no intent recognized");
        Classification {
            intent: Intent::Unknown,
            via: MatchVia::Nothing,
        }
    }

    /// Whether `utterance` expresses `intent`, ignoring priority.
    pub fn expresses(&self, intent: Intent, utterance: &str) -> bool {
        self.rules
            .iter()
            .find(|r| r.intent == intent)
            .is_some_and(|rule| self.check(rule, utterance).is_some())
    }

    fn check(&self, rule: &IntentRule, utterance: &str) -> Option<MatchVia> {
        if utterance.contains(rule.primary) {
            return Some(MatchVia::Primary(rule.primary));
        }
        self.matcher
            .find(utterance, &rule.keywords)
            .map(MatchVia::Lexical)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synonyms::{NoSynonyms, PORTUGUESE, StaticSynonyms};

    fn classifier() -> IntentClassifier<NoSynonyms> {
        IntentClassifier::new(LexicalMatcher::new(NoSynonyms))
    }

    #[test]
    fn report_info_outranks_scheduling() {
        let c = classifier();
        assert_eq!(c.classify("quero agendar um relatório"), Intent::ReportInfo);
        assert!(c.expresses(Intent::Scheduling, "quero agendar um relatório"));
    }

    #[test]
    fn each_primary_keyword_is_recognized() {
        let c = classifier();
        assert_eq!(c.classify("como agendar?"), Intent::Scheduling);
        assert_eq!(c.classify("qual a frequência?"), Intent::FrequencyInfo);
        assert_eq!(c.classify("quero uma mensagem"), Intent::Notification);
        assert_eq!(c.classify("quero cancelar"), Intent::Cancellation);
        assert_eq!(c.classify("preciso de ajuda"), Intent::Help);
    }

    #[test]
    fn fuzzy_fallback_is_used() {
        let c = classifier();
        let result = c.classify_detailed("posso marcar para amanhã");
        assert_eq!(result.intent, Intent::Scheduling);
        assert!(matches!(result.via, MatchVia::Lexical(ref m) if m.keyword == "marcar"));

        assert_eq!(c.classify("qual a periodicidade"), Intent::FrequencyInfo);
        assert_eq!(c.classify("quero receber mensagens"), Intent::Notification);
        assert_eq!(c.classify("o agendamento foi cancelado"), Intent::Cancellation);
        assert_eq!(c.classify("quero agnedar"), Intent::Scheduling);
        assert_eq!(c.classify("quero um cs"), Intent::ReportInfo);
        assert_eq!(c.classify("preciso de suporte"), Intent::Help);
    }

    #[test]
    fn primary_check_is_reported() {
        let c = classifier();
        let result = c.classify_detailed("quero cancelar");
        assert_eq!(result.via, MatchVia::Primary("cancelar"));
    }

    #[test]
    fn synonyms_reach_intents() {
        let table = StaticSynonyms::new().with_group(PORTUGUESE, ["excluir", "remover"]);
        let c = IntentClassifier::new(LexicalMatcher::new(table));
        assert_eq!(c.classify("quero excluir o agendamento"), Intent::Cancellation);
    }

    #[test]
    fn unknown_when_nothing_matches() {
        let c = classifier();
        let result = c.classify_detailed("bom dia");
        assert_eq!(result.intent, Intent::Unknown);
        assert_eq!(result.via, MatchVia::Nothing);
        assert_eq!(c.classify(""), Intent::Unknown);
    }

    #[test]
    fn unknown_is_never_expressed() {
        assert!(!classifier().expresses(Intent::Unknown, "qualquer coisa"));
    }

    #[test]
    fn frequency_prompts_are_keyed_by_label() {
        assert!(frequency_detail_prompt("diária").contains("uma ou a cada duas horas"));
        assert!(frequency_detail_prompt("semanal").contains("dias da semana"));
        assert!(frequency_detail_prompt("mensal").contains("meses"));
        assert!(frequency_detail_prompt("anual").starts_with("Frequência não reconhecida"));
    }
}
