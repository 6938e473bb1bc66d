//! Scene lifecycle and per-frame evaluation.

use indexmap::IndexMap;
use serde::Serialize;

use super::endpoints::GraphEndpoints;
use super::engine::{EvaluationContext, GraphEngine, SceneHandle};
use super::lines::LineBuffers;
use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::host::{HostMeshBuffers, HostScene};
use crate::mesh::{Matrix4, SceneObject};

/// A graph output in the host's terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneOutput {
    Mesh(HostMeshBuffers),
    /// Placement only; `None` leaves the host object's matrix alone.
    Axis { matrix: Option<Matrix4> },
}

impl SceneOutput {
    #[must_use]
    pub fn from_object(object: &SceneObject) -> Self {
        match object {
            SceneObject::Mesh(mesh) => Self::Mesh(HostMeshBuffers::from_mesh(mesh)),
            other => {
                let axis = other.axis();
                Self::Axis {
                    matrix: (!axis.is_zero()).then_some(axis.matrix),
                }
            }
        }
    }
}

/// Owns an engine, at most one loaded scene, and that scene's registries.
pub struct Session<E: GraphEngine> {
    engine: E,
    config: BridgeConfig,
    scene: Option<SceneHandle>,
    endpoints: GraphEndpoints,
    last_frame: Option<i64>,
}

impl<E: GraphEngine> Session<E> {
    pub fn new(engine: E, config: BridgeConfig) -> Self {
        Self {
            engine,
            config,
            scene: None,
            endpoints: GraphEndpoints::new(),
            last_frame: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    pub fn endpoints(&self) -> &GraphEndpoints {
        &self.endpoints
    }

    /// Line-viewer buffers filled by the last evaluation.
    pub fn lines(&self) -> &LineBuffers {
        self.endpoints.lines()
    }

    pub fn last_frame(&self) -> Option<i64> {
        self.last_frame
    }

    /// Create a scene from a serialized graph, destroying any previous one.
    pub fn load_scene(&mut self, json: &str) -> Result<SceneHandle> {
        self.delete_scene()?;
        let scene = self.engine.create_scene()?;
        self.scene = Some(scene);
        self.engine.load_graph_json(scene, json)?;
        tracing::info!("Loaded scene {:?} ({} bytes of graph JSON)", scene, json.len());
        Ok(scene)
    }

    /// Destroy the current scene, if any, and forget the frame history.
    pub fn delete_scene(&mut self) -> Result<()> {
        self.last_frame = None;
        self.endpoints.reset();
        if let Some(scene) = self.scene.take() {
            self.engine.destroy_scene(scene)?;
            tracing::info!("Deleted scene {:?}", scene);
        }
        Ok(())
    }

    /// Run one full evaluation against `host`.
    ///
    /// Every declared input must name a host object or collection; the first
    /// one that does not aborts the evaluation before the graph runs.
    pub fn execute(&mut self, host: &dyn HostScene) -> Result<IndexMap<String, SceneOutput>> {
        let scene = self.scene.ok_or(Error::NoActiveScene)?;
        self.engine.switch_graph(scene, &self.config.graph_name)?;

        self.endpoints.reset();
        self.engine.declare(scene, &mut self.endpoints)?;

        let names: Vec<String> = self.endpoints.input_names().map(str::to_string).collect();
        for name in &names {
            self.register_from_host(name, host)?;
        }

        let mut ctx = EvaluationContext::new(&mut self.endpoints, host, &self.config.color.channel);
        self.engine.apply(scene, &mut ctx)?;

        let outputs: IndexMap<String, SceneOutput> = self
            .endpoints
            .outputs()
            .map(|(name, object)| (name.to_string(), SceneOutput::from_object(object)))
            .collect();
        tracing::info!(
            "Executed graph '{}': {} inputs, {} outputs",
            self.config.graph_name,
            names.len(),
            outputs.len()
        );
        Ok(outputs)
    }

    /// Frame-change hook.
    ///
    /// Evaluates only when a scene is loaded and either no frame has run yet
    /// or `frame` directly follows the last one; returns `None` otherwise.
    pub fn update_frame(
        &mut self,
        frame: i64,
        host: &dyn HostScene,
    ) -> Result<Option<IndexMap<String, SceneOutput>>> {
        if self.scene.is_none() {
            return Ok(None);
        }
        let due = match self.last_frame {
            None => true,
            Some(last) => last.checked_add(1) == Some(frame),
        };
        if !due {
            tracing::debug!("Skipping frame {} (last executed {:?})", frame, self.last_frame);
            return Ok(None);
        }

        tracing::info!("Executing frame {}", frame);
        let outputs = self.execute(host)?;
        self.last_frame = Some(frame);
        Ok(Some(outputs))
    }

    fn register_from_host(&mut self, name: &str, host: &dyn HostScene) -> Result<()> {
        if let Some(object) = host.object(name) {
            return self.endpoints.register_host_object(name, &object);
        }

        let members = host
            .collection_members(name)
            .ok_or_else(|| Error::HostObjectNotFound {
                name: name.to_string(),
            })?;
        for member in &members {
            self.endpoints.add_collection_member(name, member);
            let object = host.object(member).ok_or_else(|| Error::HostObjectNotFound {
                name: member.clone(),
            })?;
            self.endpoints.register_host_object(member, &object)?;
        }
        Ok(())
    }
}

impl<E: GraphEngine> Drop for Session<E> {
    fn drop(&mut self) {
        if let Err(err) = self.delete_scene() {
            tracing::warn!("Failed to delete scene on drop: {}", err);
        }
    }
}
