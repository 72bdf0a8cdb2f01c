use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AnnotationError;

/// Treats `null`, a missing field and a blank string alike; the service emits `""` for absent roles.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

fn default_polarity() -> bool {
    true
}

/// Response body of `GET /predict/semantics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub tokens: Vec<Token>,
    #[serde(rename = "props", alias = "propositions")]
    pub propositions: Vec<Proposition>,
}

impl Annotation {
    pub fn proposition(&self, index: usize) -> Option<&Proposition> {
        self.propositions.get(index)
    }

    /// Checks the cross references the viewer navigates through.
    pub fn validate(&self) -> Result<(), AnnotationError> {
        for (prop_idx, proposition) in self.propositions.iter().enumerate() {
            let event_count = proposition.events.len();
            for (event_idx, event) in proposition.events.iter().enumerate() {
                for (pred_idx, predicate) in event.predicates.iter().enumerate() {
                    for (arg_idx, argument) in predicate.args.iter().enumerate() {
                        if let Some(target) = argument.linked_event_index {
                            if target >= event_count {
                                return Err(AnnotationError::DanglingEventLink {
                                    proposition: prop_idx,
                                    event: event_idx,
                                    predicate: pred_idx,
                                    argument: arg_idx,
                                    target,
                                    event_count,
                                });
                            }
                        }
                    }
                }
            }

            if let Some(main_event) = &proposition.main_event {
                let dangling = main_event
                    .predicates
                    .iter()
                    .flat_map(|predicate| predicate.args.iter())
                    .enumerate()
                    .find_map(|(arg_idx, argument)| {
                        argument
                            .linked_event_index
                            .filter(|target| *target >= event_count)
                            .map(|target| (arg_idx, target))
                    });
                if let Some((argument, target)) = dangling {
                    return Err(AnnotationError::DanglingMainEventLink {
                        proposition: prop_idx,
                        argument,
                        target,
                        event_count,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub is_predicate: bool,
    /// For predicate tokens, the index of the proposition the token opens.
    #[serde(rename = "index", alias = "tokenIndex", default)]
    pub token_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposition {
    pub sense: String,
    #[serde(default)]
    pub spans: Vec<RoleSpan>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_event: Option<Event>,
}

impl Proposition {
    /// Spans ordered by start offset; ties keep their wire order.
    pub fn spans_by_offset(&self) -> Vec<&RoleSpan> {
        let mut spans: Vec<&RoleSpan> = self.spans.iter().collect();
        spans.sort_by_key(|span| span.start_offset);
        spans
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpan {
    pub text: String,
    #[serde(rename = "start", alias = "startOffset")]
    pub start_offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    #[serde(
        rename = "vn",
        alias = "verbnetRole",
        default,
        deserialize_with = "empty_as_none"
    )]
    pub verbnet_role: Option<String>,
    #[serde(
        rename = "pb",
        alias = "propbankRole",
        default,
        deserialize_with = "empty_as_none"
    )]
    pub propbank_role: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_predicate: bool,
    #[serde(default)]
    pub is_modifier: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RoleSpan {
    pub fn has_verbnet_role(&self) -> bool {
        self.verbnet_role.is_some()
    }

    pub fn has_propbank_role(&self) -> bool {
        self.propbank_role.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub predicates: Vec<Predicate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predicate {
    pub predicate_type: String,
    #[serde(default = "default_polarity")]
    pub polarity: bool,
    #[serde(default)]
    pub args: Vec<Argument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

impl Predicate {
    pub fn is_negated(&self) -> bool {
        !self.polarity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    #[serde(rename = "type", alias = "argType")]
    pub arg_type: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_event_index: Option<usize>,
}

impl Argument {
    /// Value when present, otherwise `?`.
    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or("?")
    }
}
