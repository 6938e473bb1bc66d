use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use zenobridge::prelude::*;

fn triangle_fan_mesh() -> Mesh {
    let mut mesh = Mesh::default();
    mesh.geometry.vert.extend([
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.5, 2.0, 0.0],
    ]);
    mesh.geometry.push_polygon(&[0, 1, 2]);
    mesh.geometry.push_polygon(&[0, 2, 3]);
    mesh.geometry.push_polygon(&[3, 2, 4]);
    mesh
}

#[test]
fn test_triangle_mesh_round_trip() {
    let mesh = triangle_fan_mesh();
    let prim = mesh_to_primitive(&mesh, &MeshToPrimitiveOptions::default()).unwrap();
    assert_eq!(prim.tris.as_slice(), vec![[0, 1, 2], [0, 2, 3], [3, 2, 4]]);

    let back = primitive_to_mesh(&prim, &PrimitiveToMeshOptions::default()).unwrap();
    assert_eq!(back.geometry.vert.as_slice(), mesh.geometry.vert.as_slice());
    assert_eq!(back.geometry.poly.as_slice(), mesh.geometry.poly.as_slice());
    assert_eq!(back.geometry.loops.as_slice(), mesh.geometry.loops.as_slice());
}

#[test]
fn test_quad_and_pentagon_decomposition() {
    let mut mesh = Mesh::default();
    mesh.geometry.vert.extend((0..5).map(|i| [i as f32, 0.0, 0.0]));
    mesh.geometry.push_polygon(&[0, 1, 2, 3]);
    mesh.geometry.push_polygon(&[0, 1, 2, 3, 4]);
    mesh.geometry.push_polygon(&[0, 1]);

    let quads = MeshToPrimitiveOptions {
        allow_quads: true,
        ..Default::default()
    };
    let prim = mesh_to_primitive(&mesh, &quads).unwrap();
    assert_eq!(prim.quads.as_slice(), vec![[0, 1, 2, 3]]);
    assert_eq!(prim.tris.as_slice(), vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);

    let prim = mesh_to_primitive(&mesh, &MeshToPrimitiveOptions::default()).unwrap();
    assert!(prim.quads.is_empty());
    assert_eq!(
        prim.tris.as_slice(),
        vec![[0, 1, 2], [0, 2, 3], [0, 1, 2], [0, 2, 3], [0, 3, 4]]
    );
}

#[test]
fn test_translation_applied() {
    let mut mesh = triangle_fan_mesh();
    mesh.axis = Axis::from_translation([1.0, 2.0, 3.0]);
    let prim = mesh_to_primitive(&mesh, &MeshToPrimitiveOptions::default()).unwrap();
    for (out, input) in prim.verts.iter().zip(mesh.geometry.vert.iter()) {
        assert_eq!(*out, [input[0] + 1.0, input[1] + 2.0, input[2] + 3.0]);
    }
}

#[test]
fn test_float3_attribute_round_trip() {
    let mut mesh = triangle_fan_mesh();
    let rest: Vec<[f32; 3]> = (0..5).map(|i| [i as f32 * 0.1, -(i as f32), 7.5]).collect();
    mesh.geometry
        .vert
        .add_attr::<[f32; 3]>("rest")
        .unwrap()
        .copy_from_slice(&rest);

    let prim = mesh_to_primitive(
        &mesh,
        &MeshToPrimitiveOptions {
            has_vert_attr: true,
            ..Default::default()
        },
    )
    .unwrap();
    let back = primitive_to_mesh(
        &prim,
        &PrimitiveToMeshOptions {
            has_vert_attr: true,
            ..Default::default()
        },
    )
    .unwrap();

    let values = back.geometry.vert.attr::<[f32; 3]>("rest").unwrap();
    for (a, b) in values.iter().zip(&rest) {
        for k in 0..3 {
            assert_eq!(a[k].to_bits(), b[k].to_bits());
        }
    }
}

#[test]
fn test_vertex_colors_promoted_to_loops() {
    let mut prim = PrimitiveObject::new();
    prim.verts.extend([[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    prim.tris.push([0, 1, 2]);
    prim.verts
        .add_attr::<[f32; 3]>("clr")
        .unwrap()
        .copy_from_slice(&[[1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);

    let mesh = primitive_to_mesh(
        &prim,
        &PrimitiveToMeshOptions {
            has_vert_color: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(
        mesh.loop_colors,
        vec![[255, 255, 255, 255], [0, 0, 0, 255], [255, 255, 255, 255]]
    );
}

#[test]
fn test_bone_order_violation() {
    let bones = [Bone::new("child", 1), Bone::new("root", -1)];
    assert!(matches!(
        resolve_bone_tree(&bones),
        Err(Error::BoneOrderViolation { index: 0, parent: 1 })
    ));
}

#[test]
fn test_unknown_group_is_empty() {
    let endpoints = GraphEndpoints::new();
    assert!(endpoints.group_members("Never").is_empty());
}

// ==================== Scripted Engine ====================

/// Engine whose graph declares fixed inputs and copies each input to
/// `<name>_out`, converting meshes through the primitive form.
#[derive(Default)]
struct ScriptedEngine {
    inputs: Vec<String>,
    next_scene: u64,
    live: Vec<SceneHandle>,
    graphs: Vec<String>,
    applies: usize,
}

impl ScriptedEngine {
    fn with_inputs(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| (*s).to_string()).collect(),
            ..Default::default()
        }
    }
}

impl GraphEngine for ScriptedEngine {
    fn create_scene(&mut self) -> Result<SceneHandle> {
        self.next_scene += 1;
        let scene = SceneHandle(self.next_scene);
        self.live.push(scene);
        Ok(scene)
    }

    fn destroy_scene(&mut self, scene: SceneHandle) -> Result<()> {
        self.live.retain(|s| *s != scene);
        Ok(())
    }

    fn load_graph_json(&mut self, _scene: SceneHandle, json: &str) -> Result<()> {
        serde_json::from_str::<serde_json::Value>(json)
            .map(|_| ())
            .map_err(|e| Error::engine(e.to_string()))
    }

    fn switch_graph(&mut self, _scene: SceneHandle, graph: &str) -> Result<()> {
        self.graphs.push(graph.to_string());
        Ok(())
    }

    fn declare(&mut self, _scene: SceneHandle, endpoints: &mut GraphEndpoints) -> Result<()> {
        for name in &self.inputs {
            endpoints.declare_input(name);
        }
        Ok(())
    }

    fn apply(&mut self, _scene: SceneHandle, ctx: &mut EvaluationContext<'_>) -> Result<()> {
        self.applies += 1;
        let names: Vec<String> = ctx.endpoints().input_names().map(str::to_string).collect();
        for name in names {
            let members: Vec<String> = ctx.group_members(&name).iter().cloned().collect();
            let sources = if members.is_empty() { vec![name] } else { members };
            for source in sources {
                let object = match ctx.input(&source)? {
                    SceneObject::Mesh(mesh) => {
                        let prim = mesh_to_primitive(&mesh, &MeshToPrimitiveOptions::default())?;
                        ctx.view_lines(&prim)?;
                        SceneObject::Mesh(primitive_to_mesh(&prim, &PrimitiveToMeshOptions::default())?)
                    }
                    other => other,
                };
                ctx.set_output(&format!("{source}_out"), object);
            }
        }
        Ok(())
    }
}

const QUAD_VERTS: [[f32; 3]; 4] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
const QUAD_LOOPS: [HostLoop; 4] = [
    HostLoop { v: 0, e: 0 },
    HostLoop { v: 1, e: 0 },
    HostLoop { v: 2, e: 0 },
    HostLoop { v: 3, e: 0 },
];
const QUAD_POLYS: [HostPolygon; 1] = [HostPolygon {
    loop_start: 0,
    loop_total: 4,
}];

fn host_scene() -> BTreeMap<String, HostObject<'static>> {
    let mut host = BTreeMap::new();
    host.insert(
        "Plane".to_string(),
        HostObject::Mesh {
            axis: Axis::from_translation([0.0, 0.0, 1.0]),
            view: MeshView {
                verts: &QUAD_VERTS,
                loops: &QUAD_LOOPS,
                polys: &QUAD_POLYS,
                ..Default::default()
            },
            is_smooth: false,
            use_auto_smooth: false,
        },
    );
    host.insert("Target".to_string(), HostObject::Empty(Axis::from_translation([3.0, 0.0, 0.0])));
    host
}

#[test]
fn test_session_execute_round_trip() {
    let mut session = Session::new(ScriptedEngine::with_inputs(&["Plane", "Target"]), BridgeConfig::default());
    session.load_scene("{}").unwrap();

    let outputs = session.execute(&host_scene()).unwrap();
    assert_eq!(outputs.keys().collect::<Vec<_>>(), vec!["Plane_out", "Target_out"]);

    let SceneOutput::Mesh(plane) = &outputs["Plane_out"] else {
        panic!("expected a mesh output");
    };
    // Transform baked in, two fan triangles back out.
    assert_eq!(plane.verts[2], [1.0, 1.0, 1.0]);
    assert_eq!(plane.polys, vec![[0, 3], [3, 3]]);
    assert_eq!(plane.matrix, None);
    assert_eq!(
        outputs["Target_out"],
        SceneOutput::Axis {
            matrix: Some(Axis::from_translation([3.0, 0.0, 0.0]).matrix)
        }
    );
    assert_eq!(session.engine().graphs, vec!["NodeTree".to_string()]);
}

#[test]
fn test_missing_host_object_aborts_before_apply() {
    let mut session = Session::new(ScriptedEngine::with_inputs(&["Ghost"]), BridgeConfig::default());
    session.load_scene("{}").unwrap();

    let err = session.execute(&host_scene()).unwrap_err();
    assert_eq!(err.to_string(), "no object named `Ghost` in scene");
    assert_eq!(session.engine().applies, 0);
}

#[test]
fn test_execute_without_scene() {
    let mut session = Session::new(ScriptedEngine::default(), BridgeConfig::default());
    assert!(matches!(session.execute(&host_scene()), Err(Error::NoActiveScene)));
    assert!(session.update_frame(1, &host_scene()).unwrap().is_none());
}

#[test]
fn test_reload_destroys_previous_scene() {
    let mut session = Session::new(ScriptedEngine::default(), BridgeConfig::default());
    let first = session.load_scene("{}").unwrap();
    let second = session.load_scene("{}").unwrap();
    assert_ne!(first, second);
    assert_eq!(session.engine().live, vec![second]);

    session.delete_scene().unwrap();
    assert!(session.engine().live.is_empty());
    assert!(session.scene().is_none());
}

#[test]
fn test_frame_gate() {
    let mut session = Session::new(ScriptedEngine::with_inputs(&["Target"]), BridgeConfig::default());
    session.load_scene("{}").unwrap();
    let host = host_scene();

    assert!(session.update_frame(10, &host).unwrap().is_some());
    assert!(session.update_frame(12, &host).unwrap().is_none());
    assert!(session.update_frame(10, &host).unwrap().is_none());
    assert!(session.update_frame(11, &host).unwrap().is_some());
    assert_eq!(session.last_frame(), Some(11));
    assert_eq!(session.engine().applies, 2);

    // Reloading forgets the frame history.
    session.load_scene("{}").unwrap();
    assert!(session.update_frame(40, &host).unwrap().is_some());
}

#[test]
fn test_collection_inputs_expand_to_members() {
    struct WithCollection(BTreeMap<String, HostObject<'static>>);

    impl HostScene for WithCollection {
        fn object(&self, name: &str) -> Option<HostObject<'_>> {
            self.0.object(name)
        }

        fn collection_members(&self, name: &str) -> Option<Vec<String>> {
            (name == "Props").then(|| vec!["Plane".to_string(), "Target".to_string()])
        }
    }

    let mut session = Session::new(ScriptedEngine::with_inputs(&["Props"]), BridgeConfig::default());
    session.load_scene("{}").unwrap();
    let outputs = session.execute(&WithCollection(host_scene())).unwrap();

    assert_eq!(outputs.len(), 2);
    assert_eq!(session.endpoints().group_members("Props").len(), 2);
    // The quad's four vertices reached the line viewer.
    assert_eq!(session.lines().vertices.len(), 4);
}

#[test]
fn test_armature_input_registers_bone_tree() {
    let mut root = Bone::new("hip", -1).with_host_display_shape("HipShape");
    root.axis.set_translation([0.0, 0.0, 1.0]);
    let mut host = host_scene();
    host.insert(
        "Rig".to_string(),
        HostObject::Armature {
            axis: Axis::identity(),
            bones: vec![root, Bone::new("knee", 0)],
        },
    );

    let mut session = Session::new(ScriptedEngine::with_inputs(&["Rig"]), BridgeConfig::default());
    session.load_scene("{}").unwrap();
    session.execute(&host).unwrap();

    let tree = session.endpoints().armature_bone_tree("Rig").unwrap();
    assert_eq!(tree[0].translation, [0.0, 0.0, 1.0]);
    assert!(session.endpoints().bone_geometries("hip").contains("HipShape"));
    assert!(session.endpoints().bone_geometries("knee").is_empty());
}
