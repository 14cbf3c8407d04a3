use cgmath::{vec3, Vector3};

use super::CurveSettings;
use crate::color::Color;
use crate::teleport_log;

/// One visual marker along the teleport curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveNode {
    pub position: Vector3<f32>,
    pub active: bool,
    pub color: Color,
}

impl CurveNode {
    fn new(template: Color) -> Self {
        CurveNode {
            position: vec3(0.0, 0.0, 0.0),
            active: false,
            color: template,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = self.color.tinted(color);
    }
}

/// Pre-allocated markers reused every frame. Capacity matches
/// [`CurveSettings::max_segments`] so one node exists per sampled segment.
#[derive(Clone, Debug)]
pub struct CurveNodePool {
    nodes: Vec<CurveNode>,
    template: Color,
}

impl CurveNodePool {
    pub fn new(capacity: usize, template: Color) -> Self {
        CurveNodePool {
            nodes: vec![CurveNode::new(template); capacity],
            template,
        }
    }

    pub fn for_settings(settings: &CurveSettings, template: Color) -> Self {
        Self::new(settings.max_segments(), template)
    }

    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[CurveNode] {
        &self.nodes
    }

    pub fn active_nodes(&self) -> impl Iterator<Item = &CurveNode> {
        self.nodes.iter().filter(|node| node.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_nodes().count()
    }

    /// Drops every node and rebuilds the pool, all inactive.
    pub fn resize(&mut self, capacity: usize) {
        self.nodes.clear();
        self.nodes.resize(capacity, CurveNode::new(self.template));
    }

    /// Places one active node per path point, deactivates the rest and tints
    /// the whole pool. Returns the number of active nodes.
    pub fn show_path(&mut self, path: &[Vector3<f32>], color: Color) -> usize {
        if path.len() > self.nodes.len() {
            teleport_log!(
                WARN,
                "curve path of {} points exceeds node pool of {}, growing pool",
                path.len(),
                self.nodes.len()
            );
            self.nodes.resize(path.len(), CurveNode::new(self.template));
        }

        for (index, node) in self.nodes.iter_mut().enumerate() {
            match path.get(index) {
                Some(point) => {
                    node.active = true;
                    node.position = *point;
                }
                None => node.active = false,
            }
        }
        self.set_color(color);
        path.len()
    }

    pub fn set_color(&mut self, color: Color) {
        for node in &mut self.nodes {
            node.set_color(color);
        }
    }

    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.active = false;
        }
    }
}
