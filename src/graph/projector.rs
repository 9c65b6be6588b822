// src/graph/projector.rs

use crate::config::ConfigFile;
use crate::graph::infra::{
    HOT_STORE_ID, METRICS_STORE_ID, SCHEDULER_ID, archive_edge, static_nodes,
};
use crate::graph::layout::GridLayout;
use crate::graph::model::{
    EdgeStyle, NodeIcon, NodeKind, Projection, RenderEdge, RenderNode, Tone,
};
use crate::sim::CheckJob;
use crate::types::Phase;

/// Maps the live job set onto the diagram.
///
/// Holds only layout parameters; every call to [`GraphProjector::project`]
/// builds a new, independent [`Projection`].
#[derive(Debug, Clone, Default)]
pub struct GraphProjector {
    layout: GridLayout,
}

impl GraphProjector {
    pub fn new(layout: GridLayout) -> Self {
        Self { layout }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(GridLayout::from_config(cfg.layout()))
    }

    /// Diagram for a stopped simulation: infrastructure only, no edges.
    pub fn idle(&self) -> Projection {
        Projection {
            nodes: static_nodes(),
            edges: Vec::new(),
        }
    }

    /// Diagram for a running simulation.
    pub fn project(&self, jobs: &[CheckJob], scheduler_pulsing: bool) -> Projection {
        let mut nodes = static_nodes();
        if let Some(scheduler) = nodes.iter_mut().find(|n| n.id == SCHEDULER_ID) {
            scheduler.ticking = scheduler_pulsing;
        }

        nodes.extend(
            jobs.iter()
                .enumerate()
                .map(|(idx, job)| self.runner_node(idx, job)),
        );

        let mut edges: Vec<RenderEdge> = jobs.iter().flat_map(job_edges).collect();
        edges.push(archive_edge());

        Projection { nodes, edges }
    }

    fn runner_node(&self, index: usize, job: &CheckJob) -> RenderNode {
        let writing = job.phase() == Phase::Writing;
        let icon = match (writing, job.success()) {
            (true, true) => NodeIcon::CheckCircle,
            (true, false) => NodeIcon::XCircle,
            (false, _) => NodeIcon::Play,
        };

        RenderNode {
            id: job.runner_id().to_string(),
            kind: NodeKind::Runner,
            label: format!("Runner ({})", job.pop()),
            caption: NodeKind::Runner.caption(),
            monitor: Some(job.monitor_id().to_string()),
            icon,
            position: self.layout.position(index),
            active: job.phase() == Phase::Executing,
            success: writing && job.success(),
            error: writing && !job.success(),
            ticking: false,
        }
    }
}

fn outcome_tone(job: &CheckJob) -> Tone {
    if job.success() { Tone::Success } else { Tone::Failure }
}

/// Edges contributed by one job in its current phase.
///
/// The outcome colour only shows from `writing` on, even though it is known
/// at creation.
fn job_edges(job: &CheckJob) -> Vec<RenderEdge> {
    let runner = job.runner_id().as_str();
    let phase = job.phase();
    let mut edges = Vec::with_capacity(3);

    if matches!(phase, Phase::Dispatch | Phase::Executing | Phase::Writing) {
        let style = if phase == Phase::Writing {
            EdgeStyle {
                opacity: 0.4,
                ..EdgeStyle::solid(outcome_tone(job))
            }
        } else {
            EdgeStyle::solid(Tone::Accent)
        };

        edges.push(RenderEdge {
            id: format!("{SCHEDULER_ID}-{runner}"),
            source: SCHEDULER_ID.to_string(),
            target: runner.to_string(),
            animated: phase == Phase::Dispatch,
            arrow: true,
            style,
            label: None,
        });
    }

    if phase == Phase::Writing {
        for store in [HOT_STORE_ID, METRICS_STORE_ID] {
            edges.push(RenderEdge {
                id: format!("{runner}-{store}"),
                source: runner.to_string(),
                target: store.to_string(),
                animated: true,
                arrow: true,
                style: EdgeStyle::solid(outcome_tone(job)),
                label: None,
            });
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Timestamp;
    use crate::graph::infra::{ARCHIVE_EDGE_ID, COLD_STORE_ID};
    use crate::sim::{JobSet, PhaseThresholds, Stats, advance};

    fn job_in_phase(seq: u64, success: bool, age_ms: u64) -> CheckJob {
        let mut set = JobSet::new();
        let mut stats = Stats::default();
        set.admit([CheckJob::new(seq, "AMS", "monitor-0", Timestamp::ZERO, success)]);
        advance(
            &mut set,
            &mut stats,
            Timestamp::from_millis(age_ms),
            &PhaseThresholds::default(),
        );
        set.as_slice()[0].clone()
    }

    #[test]
    fn idle_projection_has_no_edges() {
        let p = GraphProjector::default().idle();
        assert_eq!(p.nodes.len(), 4);
        assert!(p.edges.is_empty());
    }

    #[test]
    fn empty_running_projection_keeps_archive_edge() {
        let p = GraphProjector::default().project(&[], false);
        assert_eq!(p.nodes.len(), 4);
        assert_eq!(p.edges.len(), 1);

        let archive = p.edge(ARCHIVE_EDGE_ID).unwrap();
        assert_eq!(archive.source, HOT_STORE_ID);
        assert_eq!(archive.target, COLD_STORE_ID);
        assert!(archive.style.dashed);
        assert_eq!(archive.label.as_deref(), Some("Archive"));
    }

    #[test]
    fn dispatch_edge_is_animated_accent() {
        let job = job_in_phase(0, true, 200);
        let p = GraphProjector::default().project(&[job], false);

        let edge = p.edge("scheduler-runner-0").unwrap();
        assert!(edge.animated);
        assert_eq!(edge.style.tone, Tone::Accent);
        assert_eq!(p.edges_touching("runner-0").count(), 1);

        let node = p.node("runner-0").unwrap();
        assert_eq!(node.icon, NodeIcon::Play);
        assert_eq!(node.caption, "Check Executor");
        assert_eq!(node.monitor.as_deref(), Some("monitor-0"));
        assert!(p.node(SCHEDULER_ID).unwrap().monitor.is_none());
        assert!(!node.active && !node.success && !node.error);
    }

    #[test]
    fn executing_runner_is_active_without_outcome() {
        let job = job_in_phase(1, false, 1_500);
        let p = GraphProjector::default().project(&[job], false);

        let edge = p.edge("scheduler-runner-1").unwrap();
        assert!(!edge.animated);
        assert_eq!(edge.style.tone, Tone::Accent);
        assert!(p.node("runner-1").unwrap().active);
    }

    #[test]
    fn failed_writing_job_shows_failure_everywhere() {
        let job = job_in_phase(2, false, 2_500);
        let p = GraphProjector::default().project(&[job], false);

        let dispatch = p.edge("scheduler-runner-2").unwrap();
        assert_eq!(dispatch.style.tone, Tone::Failure);
        assert_eq!(dispatch.style.opacity, 0.4);

        for id in ["runner-2-hot-store", "runner-2-metrics-store"] {
            let edge = p.edge(id).unwrap();
            assert!(edge.animated);
            assert_eq!(edge.style.tone, Tone::Failure);
        }

        let node = p.node("runner-2").unwrap();
        assert!(node.error && !node.success);
        assert_eq!(node.icon, NodeIcon::XCircle);
    }

    #[test]
    fn runners_follow_live_set_order() {
        let jobs: Vec<_> = (0..7).map(|i| job_in_phase(i, true, 0)).collect();
        let projector = GraphProjector::default();
        let p = projector.project(&jobs, true);

        assert!(p.node(SCHEDULER_ID).unwrap().ticking);
        assert_eq!(p.node("runner-6").unwrap().position, GridLayout::default().position(6));

        // Dropping the first job shifts everyone else one slot.
        let p = projector.project(&jobs[1..], false);
        assert_eq!(p.node("runner-6").unwrap().position, GridLayout::default().position(5));
        assert!(!p.node(SCHEDULER_ID).unwrap().ticking);
    }
}
