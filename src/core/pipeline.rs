//! Pipeline configuration: shareable workflow topology

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Reserved routing key for the fallback route
pub const DEFAULT_ROUTE: &str = "default";

/// Target of a routing rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteTarget {
    /// Fallback when no other route matches; never a step reference
    Default,
    /// Next step id
    Step(String),
}

impl RouteTarget {
    pub fn from_key(key: &str) -> Self {
        if key == DEFAULT_ROUTE {
            RouteTarget::Default
        } else {
            RouteTarget::Step(key.to_string())
        }
    }

    pub fn as_key(&self) -> &str {
        match self {
            RouteTarget::Default => DEFAULT_ROUTE,
            RouteTarget::Step(id) => id,
        }
    }

    /// The referenced step id, if this is not the fallback route
    pub fn step_id(&self) -> Option<&str> {
        match self {
            RouteTarget::Default => None,
            RouteTarget::Step(id) => Some(id),
        }
    }
}

/// One entry of `routingAwareOutput`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRule {
    pub target: RouteTarget,

    /// Natural-language criterion the LLM uses to pick this route
    pub prompt: String,
}

/// One workflow node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStep {
    /// Identifier (key in the pipeline document)
    #[serde(skip)]
    pub id: String,

    /// Reference to a model config id
    pub model_config: String,

    /// Input path template
    pub input: String,

    /// Output path template
    pub output: String,

    /// Archive path template for processed inputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,

    /// Note template path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Auxiliary file paths or globs, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Candidate next steps (plus an optional default) in document order
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_routes"
    )]
    pub routing_aware_output: Vec<RoutingRule>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Routing rules as the `{ "stepId": "prompt" }` object, in rule order
fn serialize_routes<S: Serializer>(rules: &[RoutingRule], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(rules.iter().map(|rule| (rule.target.as_key(), &rule.prompt)))
}

impl PipelineStep {
    /// Step ids this step may route to, skipping the default route
    pub fn next_step_ids(&self) -> impl Iterator<Item = &str> {
        self.routing_aware_output
            .iter()
            .filter_map(|rule| rule.target.step_id())
    }

    /// Whether this step routes to itself
    pub fn routes_to_self(&self) -> bool {
        self.next_step_ids().any(|id| id == self.id)
    }

    /// Path templates as (field name, template) pairs
    pub fn path_templates(&self) -> Vec<(&'static str, &str)> {
        let mut paths = vec![("input", self.input.as_str()), ("output", self.output.as_str())];
        if let Some(archive) = &self.archive {
            paths.push(("archive", archive.as_str()));
        }
        if let Some(template) = &self.template {
            paths.push(("template", template.as_str()));
        }
        paths
    }
}

/// Mapping from unique identifier to step, in document order
///
/// Steps are kept as an arena keyed by id; edges are derived from
/// `routing_aware_output` on demand rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub steps: Vec<PipelineStep>,
}

impl PipelineConfig {
    pub fn new(steps: Vec<PipelineStep>) -> Self {
        Self { steps }
    }

    /// Get a step by ID
    pub fn get(&self, id: &str) -> Option<&PipelineStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Step ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Serializes back to the document shape: an object keyed by step id
impl Serialize for PipelineConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.steps.len()))?;
        for step in &self.steps {
            map.serialize_entry(&step.id, step)?;
        }
        map.end()
    }
}
