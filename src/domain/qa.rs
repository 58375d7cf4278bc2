use serde::{Deserialize, Serialize};

/// Answer type assigned when the free text does not start with any label
/// from the question's classification set. A valid result, not an error.
pub const UNKNOWN_ANSWER: &str = "Unknown";

/// One predefined compliance question. The catalog is fixed at compile time
/// and not editable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaQuestion {
    pub id: &'static str,
    /// Literal prompt text sent to the external service's ask endpoint.
    pub prompt: &'static str,
    /// Closed set of leading tokens an answer is expected to start with.
    pub labels: &'static [&'static str],
}

pub const QUESTION_CATALOG: &[QaQuestion] = &[
    QaQuestion {
        id: "address-confirmed",
        prompt: "Did the dispatcher ask for or confirm the location of the incident, \
                 such as the street name, street number, nearby location, or landmark, \
                 even if the caller provided it before being asked? The answer must \
                 start with Yes if the dispatcher asked or confirmed the location, \
                 Refused if the caller refused to answer, or No if the dispatcher did \
                 not ask. If the answer is Yes or Refused, include short proof lines \
                 from the conversation in quotes, nothing else.",
        labels: &["Yes", "No", "Refused"],
    },
    QaQuestion {
        id: "callback-confirmed",
        prompt: "Did the dispatcher ask for or confirm a way to contact the caller in \
                 case a callback is needed? The answer must start with Yes if the \
                 dispatcher asked, Refused if the caller refused to answer, or No if \
                 the dispatcher did not ask. If the answer is Yes or Refused, include \
                 2-3 short proof lines from the conversation in quotes, nothing else.",
        labels: &["Yes", "No", "Refused"],
    },
    QaQuestion {
        id: "call-type",
        prompt: "Analyze the following 911 call transcript and determine the type of \
                 the call. The answer must start with Police, Medical (EMD), Fire, or \
                 Other. Include short proof lines from the conversation in quotes that \
                 justify the classification, nothing else.",
        labels: &["Police", "Medical (EMD)", "Fire", "Other"],
    },
];

pub fn catalog_question(id: &str) -> Option<&'static QaQuestion> {
    QUESTION_CATALOG.iter().find(|q| q.id == id)
}

/// Structured QA signal produced from one free-text answer. Invariant:
/// `answer_type` is a member of the question's label set or [`UNKNOWN_ANSWER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub question_id: String,
    pub answer_type: String,
    pub proof: Vec<String>,
}

impl QaAnswer {
    /// Fail-closed answer used when the ask call itself failed.
    pub fn unknown(question_id: &str) -> Self {
        Self {
            question_id: question_id.to_string(),
            answer_type: UNKNOWN_ANSWER.to_string(),
            proof: Vec::new(),
        }
    }
}

/// Parse a free-text answer into its typed classification plus supporting
/// quotations. Total: every input yields some answer.
pub fn parse_answer(question: &QaQuestion, answer_text: &str) -> QaAnswer {
    QaAnswer {
        question_id: question.id.to_string(),
        answer_type: classify(answer_text, question.labels),
        proof: extract_proof(answer_text),
    }
}

/// Match the answer text from its start against a closed label set,
/// case-insensitive, longest label first so that a label which is a prefix
/// of another ("Medical (EMD)" vs a hypothetical "Medical") can never be
/// shadowed.
pub fn classify(answer_text: &str, labels: &[&str]) -> String {
    let mut ordered: Vec<&str> = labels.to_vec();
    ordered.sort_by_key(|label| std::cmp::Reverse(label.len()));

    for label in ordered {
        let bytes = answer_text.as_bytes();
        if bytes.len() >= label.len()
            && bytes[..label.len()].eq_ignore_ascii_case(label.as_bytes())
        {
            return label.to_string();
        }
    }
    UNKNOWN_ANSWER.to_string()
}

/// Collect substrings enclosed in matching quotation marks, in order of
/// appearance. Single and double quotes are both accepted and need not match
/// each other across the answer; each quotation must open and close with the
/// same mark. An opening mark with no closing partner ends the scan.
pub fn extract_proof(answer_text: &str) -> Vec<String> {
    let mut proof = Vec::new();
    let mut rest = answer_text;

    while let Some(open) = rest.find(['"', '\'']) {
        let mark = rest[open..].chars().next().unwrap_or('"');
        let after_open = &rest[open + mark.len_utf8()..];
        match after_open.find(mark) {
            Some(close) => {
                let quoted = &after_open[..close];
                if !quoted.is_empty() {
                    proof.push(quoted.to_string());
                }
                rest = &after_open[close + mark.len_utf8()..];
            }
            None => break,
        }
    }

    proof
}
