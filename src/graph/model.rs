// src/graph/model.rs

//! Render-time node and edge types.
//!
//! These are disposable: a fresh [`Projection`] is built from the job set on
//! every pass and nothing refers back to a previous one.

use serde::Serialize;

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Scheduler,
    HotStore,
    MetricsStore,
    ColdStore,
    Runner,
}

impl NodeKind {
    /// Caption shown under the node label.
    pub fn caption(self) -> &'static str {
        match self {
            NodeKind::Scheduler => "Scheduler",
            NodeKind::HotStore => "Hot Storage",
            NodeKind::MetricsStore => "Metrics",
            NodeKind::ColdStore => "Cold Storage",
            NodeKind::Runner => "Check Executor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeIcon {
    Clock,
    Database,
    Activity,
    Play,
    CheckCircle,
    XCircle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    /// Secondary line under the label, from [`NodeKind::caption`].
    pub caption: &'static str,
    /// Monitor a runner is checking; `None` for infrastructure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
    pub icon: NodeIcon,
    pub position: Position,
    /// Runner is executing.
    pub active: bool,
    /// Runner is writing a successful result.
    pub success: bool,
    /// Runner is writing a failed result.
    pub error: bool,
    /// Scheduler pulse after a tick.
    pub ticking: bool,
}

/// Stroke colour role of an edge; the renderer maps these to actual colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Accent,
    Success,
    Failure,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeStyle {
    pub tone: Tone,
    pub opacity: f32,
    pub dashed: bool,
}

impl EdgeStyle {
    pub const fn solid(tone: Tone) -> Self {
        Self {
            tone,
            opacity: 1.0,
            dashed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
    /// All edges end in a closed arrow; kept explicit for renderers.
    pub arrow: bool,
    pub style: EdgeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Nodes and edges for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl Projection {
    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&RenderEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Edges with `id` as source or target.
    pub fn edges_touching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a RenderEdge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == id || e.target == id)
    }
}
