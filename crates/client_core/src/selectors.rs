//! Derived view state. Every function here is a pure function of the session.

use shared::{
    domain::ViewToggles,
    protocol::{Annotation, Argument, Event, Predicate, Proposition, RoleSpan},
};

use crate::session::Session;

pub const DEFAULT_TRUNCATE_LENGTH: usize = 50;
pub const ELLIPSIS: &str = "...";

/// `min(active_index, max(0, len - 1))`; 0 for an empty or absent annotation.
pub fn clamped_active_index(session: &Session) -> usize {
    let len = session
        .annotation()
        .map(|annotation| annotation.propositions.len())
        .unwrap_or(0);
    clamp_index(session.active_index(), len)
}

pub fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

pub fn active_proposition(session: &Session) -> Option<&Proposition> {
    session
        .annotation()?
        .proposition(clamped_active_index(session))
}

/// Proposition tab titles in order.
pub fn proposition_tabs(annotation: &Annotation) -> Vec<&str> {
    annotation
        .propositions
        .iter()
        .map(|proposition| proposition.sense.as_str())
        .collect()
}

pub fn is_span_visible(span: &RoleSpan, toggles: &ViewToggles) -> bool {
    (toggles.show_verb_net && span.has_verbnet_role())
        || (toggles.show_prop_bank && span.has_propbank_role() && !span.is_modifier)
        || (toggles.show_modifiers && span.is_modifier && span.has_propbank_role())
        || span.is_predicate
}

/// Spans that carry at least one label under the current toggles, in start-offset order.
pub fn visible_role_spans<'a>(
    proposition: &'a Proposition,
    toggles: &ViewToggles,
) -> Vec<&'a RoleSpan> {
    proposition
        .spans_by_offset()
        .into_iter()
        .filter(|span| is_span_visible(span, toggles))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipKind {
    Sense,
    VerbNet,
    Modifier,
    PropBank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanChip<'a> {
    pub kind: ChipKind,
    pub text: &'a str,
    pub detail: Option<&'a str>,
}

/// Label chips shown next to a span's text. Predicates show the sense instead of their VerbNet role.
pub fn span_chips<'a>(
    span: &'a RoleSpan,
    sense: &'a str,
    toggles: &ViewToggles,
) -> Vec<SpanChip<'a>> {
    let mut chips = Vec::new();
    if span.is_predicate {
        chips.push(SpanChip {
            kind: ChipKind::Sense,
            text: sense,
            detail: None,
        });
    }
    if let Some(vn) = span.verbnet_role.as_deref() {
        if toggles.show_verb_net && !span.is_predicate {
            chips.push(SpanChip {
                kind: ChipKind::VerbNet,
                text: vn,
                detail: None,
            });
        }
    }
    if let Some(pb) = span.propbank_role.as_deref() {
        if span.is_modifier && toggles.show_modifiers {
            chips.push(SpanChip {
                kind: ChipKind::Modifier,
                text: pb,
                detail: span.description.as_deref(),
            });
        }
        if toggles.show_prop_bank && !span.is_modifier && !span.is_predicate {
            chips.push(SpanChip {
                kind: ChipKind::PropBank,
                text: pb,
                detail: span.description.as_deref(),
            });
        }
    }
    chips
}

/// Middle-truncates `text` to exactly `max_len` characters with [`ELLIPSIS`].
pub fn truncated_label(text: &str, max_len: usize) -> String {
    let len = text.chars().count();
    if len <= max_len {
        return text.to_string();
    }

    let shown = max_len.saturating_sub(ELLIPSIS.len());
    let front = shown.div_ceil(2);
    let back = shown / 2;

    let mut out = String::with_capacity(max_len);
    out.extend(text.chars().take(front));
    out.push_str(ELLIPSIS);
    out.extend(text.chars().skip(len - back));
    out
}

struct Relation {
    predicate_type: &'static str,
    functional: &'static str,
    phrase: &'static str,
}

/// Two-argument relations between events, matched case-insensitively on `predicateType`.
const RELATIONS: &[Relation] = &[
    Relation {
        predicate_type: "cause",
        functional: "CAUSE",
        phrase: "causes",
    },
    Relation {
        predicate_type: "co-temporal",
        functional: "CO-TEMPORAL",
        phrase: "is co-temporal with",
    },
    Relation {
        predicate_type: "meets",
        functional: "MEETS",
        phrase: "meets",
    },
    Relation {
        predicate_type: "overlaps",
        functional: "OVERLAPS",
        phrase: "overlaps",
    },
    Relation {
        predicate_type: "precedes",
        functional: "PRECEDES",
        phrase: "precedes",
    },
    Relation {
        predicate_type: "before",
        functional: "BEFORE",
        phrase: "precedes",
    },
    Relation {
        predicate_type: "repeat_of",
        functional: "REPEAT_OF",
        phrase: "repeats",
    },
];

fn relation_for(predicate_type: &str) -> Option<&'static Relation> {
    RELATIONS
        .iter()
        .find(|relation| relation.predicate_type.eq_ignore_ascii_case(predicate_type))
}

fn operand(argument: &Argument) -> &str {
    argument
        .value
        .as_deref()
        .unwrap_or_else(|| argument.arg_type.as_str())
}

/// Text form of a predicate: relations read as `A causes B` / `CAUSE(A, B)`,
/// everything else as `Type(Arg=value, ...)`.
pub fn predicate_display_form(predicate: &Predicate, functional_view: bool) -> String {
    let body = match (relation_for(&predicate.predicate_type), predicate.args.as_slice()) {
        (Some(relation), [first, second, ..]) => {
            if functional_view {
                format!("{}({}, {})", relation.functional, operand(first), operand(second))
            } else {
                format!("{} {} {}", operand(first), relation.phrase, operand(second))
            }
        }
        _ => {
            let args = predicate
                .args
                .iter()
                .map(|argument| format!("{}={}", argument.arg_type, argument.display_value()))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({args})", predicate.predicate_type)
        }
    };

    match (predicate.polarity, functional_view) {
        (true, _) => body,
        (false, true) => format!("¬{body}"),
        (false, false) => format!("NOT {body}"),
    }
}

/// Event panes for the active proposition; `None` when semantics are hidden or nothing is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticsView<'a> {
    pub main_event: Option<&'a Event>,
    pub events: &'a [Event],
}

pub fn semantics_view(session: &Session) -> Option<SemanticsView<'_>> {
    if !session.view_toggles().show_semantics {
        return None;
    }
    let proposition = active_proposition(session)?;
    Some(SemanticsView {
        main_event: proposition.main_event.as_ref(),
        events: &proposition.events,
    })
}

#[cfg(test)]
#[path = "tests/selectors_tests.rs"]
mod tests;
