// src/graph/infra.rs

//! Static infrastructure nodes that are always on the diagram.

use crate::graph::model::{
    EdgeStyle, NodeIcon, NodeKind, Position, RenderEdge, RenderNode, Tone,
};

pub const SCHEDULER_ID: &str = "scheduler";
pub const HOT_STORE_ID: &str = "hot-store";
pub const METRICS_STORE_ID: &str = "metrics-store";
pub const COLD_STORE_ID: &str = "cold-store";
pub const ARCHIVE_EDGE_ID: &str = "hot-store-cold-store";

fn infra_node(id: &str, kind: NodeKind, label: &str, icon: NodeIcon, position: Position) -> RenderNode {
    RenderNode {
        id: id.to_string(),
        kind,
        label: label.to_string(),
        caption: kind.caption(),
        monitor: None,
        icon,
        position,
        active: false,
        success: false,
        error: false,
        ticking: false,
    }
}

/// Scheduler, hot store, metrics store and cold store at fixed positions.
pub fn static_nodes() -> Vec<RenderNode> {
    vec![
        infra_node(
            SCHEDULER_ID,
            NodeKind::Scheduler,
            "Check Scheduler",
            NodeIcon::Clock,
            Position::new(250.0, 50.0),
        ),
        infra_node(
            HOT_STORE_ID,
            NodeKind::HotStore,
            "Heartbeat Database",
            NodeIcon::Database,
            Position::new(50.0, 450.0),
        ),
        infra_node(
            METRICS_STORE_ID,
            NodeKind::MetricsStore,
            "Metrics Engine",
            NodeIcon::Activity,
            Position::new(250.0, 450.0),
        ),
        infra_node(
            COLD_STORE_ID,
            NodeKind::ColdStore,
            "Archive Bucket",
            NodeIcon::Database,
            Position::new(475.0, 450.0),
        ),
    ]
}

/// Periodic archival from hot to cold storage. Independent of any job.
pub fn archive_edge() -> RenderEdge {
    RenderEdge {
        id: ARCHIVE_EDGE_ID.to_string(),
        source: HOT_STORE_ID.to_string(),
        target: COLD_STORE_ID.to_string(),
        animated: false,
        arrow: true,
        style: EdgeStyle {
            dashed: true,
            ..EdgeStyle::solid(Tone::Muted)
        },
        label: Some("Archive".to_string()),
    }
}
