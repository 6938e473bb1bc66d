use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::BridgeConfig;

pub mod convert;
pub mod inspect;
pub mod skeleton;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a mesh JSON file to a flattened primitive
    #[command(name = "to-prim")]
    ToPrim {
        /// Source mesh JSON
        source: PathBuf,

        /// Output primitive JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bridge config JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Keep 4-corner polygons as quads
        #[arg(long)]
        allow_quads: bool,

        /// Leave positions in object space
        #[arg(long)]
        no_transform: bool,

        /// Emit mesh edges as lines
        #[arg(long)]
        edges: bool,

        /// Copy vertex attribute channels
        #[arg(long)]
        vert_attr: bool,
    },

    /// Convert a primitive JSON file back to a mesh
    #[command(name = "to-mesh")]
    ToMesh {
        /// Source primitive JSON
        source: PathBuf,

        /// Output mesh JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bridge config JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Mark polygons smooth-shaded
        #[arg(long)]
        smooth: bool,

        /// Turn lines into mesh edges
        #[arg(long)]
        edges: bool,

        /// Promote the colour channel to per-loop colours
        #[arg(long)]
        vert_color: bool,

        /// Copy vertex attribute channels
        #[arg(long)]
        vert_attr: bool,

        /// Copy triangle/quad attribute channels onto polygons
        #[arg(long)]
        face_attr: bool,
    },

    /// Resolve an armature's bone list to global poses
    Fk {
        /// JSON array of bones in depth-first order
        source: PathBuf,

        /// Output JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a mesh, primitive or bone-list JSON file
    Inspect {
        /// File to inspect
        path: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::ToPrim {
                source,
                output,
                config,
                allow_quads,
                no_transform,
                edges,
                vert_attr,
            } => {
                let mut options = load_config(config.as_deref())?.mesh_to_primitive;
                options.allow_quads |= *allow_quads;
                options.do_transform &= !*no_transform;
                options.has_edges |= *edges;
                options.has_vert_attr |= *vert_attr;
                convert::to_primitive(source, output.as_deref(), &options)
            }
            Commands::ToMesh {
                source,
                output,
                config,
                smooth,
                edges,
                vert_color,
                vert_attr,
                face_attr,
            } => {
                let mut options = load_config(config.as_deref())?.primitive_to_mesh_options();
                options.is_smooth |= *smooth;
                options.has_edges |= *edges;
                options.has_vert_color |= *vert_color;
                options.has_vert_attr |= *vert_attr;
                options.has_face_attr |= *face_attr;
                convert::to_mesh(source, output.as_deref(), &options)
            }
            Commands::Fk { source, output } => skeleton::resolve(source, output.as_deref()),
            Commands::Inspect { path } => inspect::execute(path),
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BridgeConfig> {
    Ok(match path {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    })
}

/// Write pretty JSON to `output`, or stdout.
pub(crate) fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("Written to: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
